//! 引脚所有权登记
//!
//! 每个物理引脚同一时刻只能被一个 [`Gpio`](super::Gpio) 持有。

use core::cell::Cell;

use critical_section::Mutex;

use crate::config::NUM_PORTS;
use crate::error::{GpioError, Result};
use crate::stm32f4::gpio::Pinout;

/// 每个端口一个 16 位占用位图
static CLAIMED: Mutex<Cell<[u16; NUM_PORTS]>> = Mutex::new(Cell::new([0; NUM_PORTS]));

/// 占用引脚，已被占用时返回 [`GpioError::PinInUse`]
pub(crate) fn claim(pinout: Pinout) -> Result<()> {
    critical_section::with(|cs| {
        let cell = CLAIMED.borrow(cs);
        let mut claimed = cell.get();
        let port = pinout.port.index();
        if claimed[port] & pinout.pin.mask() != 0 {
            return Err(GpioError::PinInUse);
        }
        claimed[port] |= pinout.pin.mask();
        cell.set(claimed);
        Ok(())
    })
}

/// 释放引脚
pub(crate) fn release(pinout: Pinout) {
    critical_section::with(|cs| {
        let cell = CLAIMED.borrow(cs);
        let mut claimed = cell.get();
        claimed[pinout.port.index()] &= !pinout.pin.mask();
        cell.set(claimed);
    });
}

/// 查询引脚当前是否被某个句柄持有
pub fn is_claimed(pinout: Pinout) -> bool {
    critical_section::with(|cs| CLAIMED.borrow(cs).get()[pinout.port.index()] & pinout.pin.mask() != 0)
}
