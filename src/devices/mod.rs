//! # 板级设备
//!
//! 构建在 [`Gpio`](crate::Gpio) 之上的板载 LED 与按键驱动。
//! 设备编号对应 [`config::LED_PINOUTS`](crate::config::LED_PINOUTS)
//! 与 [`config::BUTTON_PINOUTS`](crate::config::BUTTON_PINOUTS) 中的下标。

mod button;
mod led;

pub use button::{Button, ButtonConfig};
pub use led::{Led, LedConfig};

use crate::error::{GpioError, Result};
use crate::stm32f4::gpio::Pinout;

/// 按编号查找板级引脚
fn lookup(table: &[Pinout], id: u8) -> Result<Pinout> {
    table
        .get(id as usize)
        .copied()
        .ok_or(GpioError::InvalidDeviceId)
}
