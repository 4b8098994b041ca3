//! # 设备驱动框架
//!
//! 提供统一的引脚驱动抽象和寄存器块定义宏。
//!
//! ## 模块结构
//!
//! - [`traits`]: 设备驱动 trait 定义
//! - [`macros`]: 寄存器块宏
//!
//! ## 支持的设备类型
//!
//! | 设备类型 | Trait | 说明 |
//! |---------|-------|------|
//! | 基础设备 | `Device` | 所有设备的基础 trait |
//! | GPIO | `GpioPin`, `InputPin`, `OutputPin`, `OutputTypePin` | GPIO 引脚操作 |
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use neon_gpio::{Gpio, Config, Pinout, Port, Pin, Mode};
//! use neon_gpio::drivers::{Device, OutputPin};
//!
//! let mut led = Gpio::new(&Config::new(Pinout::new(Port::A, Pin::P6)).mode(Mode::Output))?;
//! led.set_high()?;
//! led.toggle()?;
//! ```
//!
//! `Gpio` 同时实现了 `embedded-hal` 1.0 的 `digital` trait，
//! 可以直接交给生态中的外部驱动使用。

pub mod traits;
pub mod macros;

// 重新导出常用类型
pub use traits::{
    Device,
    GpioPin,
    InputPin,
    OutputPin,
    OutputTypePin,
};
