//! # 设备驱动 Trait 定义
//!
//! 提供统一的引脚驱动抽象接口。
//!
//! ## Trait 层次结构
//!
//! ```text
//! Device (基础设备)
//! GpioPin (GPIO 引脚)
//!    ├── InputPin
//!    └── OutputPin
//!           └── OutputTypePin
//! ```
//!
//! [`Gpio`](crate::Gpio) 实现了全部 trait，
//! 只依赖 trait 的外部代码可以同时接受真实引脚和测试替身。

use crate::stm32f4::gpio::{DriverType, Mode, Pullup};

// ============================================================================
// 基础设备 Trait
// ============================================================================

/// 基础设备 trait
///
/// # 示例
///
/// ```rust,no_run
/// # use neon_gpio::drivers::Device;
/// # struct MyDevice;
/// # #[derive(Debug)]
/// # struct MyDeviceError;
/// impl Device for MyDevice {
///     type Error = MyDeviceError;
///
///     fn init(&mut self) -> Result<(), Self::Error> {
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "MyDevice"
///     }
/// }
/// ```
pub trait Device {
    /// 设备错误类型
    type Error;

    /// 初始化设备
    ///
    /// 将设备配置为创建时给定的状态。
    fn init(&mut self) -> Result<(), Self::Error>;

    /// 获取设备名称，用于调试和日志
    fn name(&self) -> &'static str;

    /// 检查设备是否就绪
    fn is_ready(&self) -> bool {
        true
    }

    /// 重置设备
    ///
    /// 默认实现调用 `init()`。
    fn reset(&mut self) -> Result<(), Self::Error> {
        self.init()
    }
}

// ============================================================================
// GPIO Trait
// ============================================================================

/// GPIO 引脚 trait
pub trait GpioPin {
    /// 错误类型
    type Error;

    /// 获取引脚编号（端口内 0-15）
    fn pin_number(&self) -> u8;

    /// 设置引脚模式
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;

    /// 获取当前模式
    fn mode(&self) -> Mode;

    /// 设置上拉/下拉
    fn set_pull(&mut self, pull: Pullup) -> Result<(), Self::Error>;
}

/// 输入引脚 trait
pub trait InputPin: GpioPin {
    /// 读取引脚电平
    ///
    /// 返回 `true` 表示高电平，`false` 表示低电平
    fn is_high(&self) -> Result<bool, Self::Error>;

    /// 读取引脚电平
    ///
    /// 返回 `true` 表示低电平，`false` 表示高电平
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

/// 输出引脚 trait
pub trait OutputPin: GpioPin {
    /// 设置高电平
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// 设置低电平
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// 切换电平
    fn toggle(&mut self) -> Result<(), Self::Error>;

    /// 设置电平
    ///
    /// `high` 为 `true` 时设置高电平，否则设置低电平
    fn set_state(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}

/// 可配置输出类型的引脚
pub trait OutputTypePin: OutputPin {
    /// 设置输出类型
    fn set_output_type(&mut self, output_type: DriverType) -> Result<(), Self::Error>;
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // 记录调用次数的设备
    struct CountingDevice {
        inits: usize,
    }

    impl Device for CountingDevice {
        type Error = ();

        fn init(&mut self) -> Result<(), Self::Error> {
            self.inits += 1;
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingDevice"
        }
    }

    // 只实现 set_high / set_low 的引脚
    struct LatchPin {
        level: bool,
        mode: Mode,
    }

    impl GpioPin for LatchPin {
        type Error = ();

        fn pin_number(&self) -> u8 {
            0
        }

        fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
            self.mode = mode;
            Ok(())
        }

        fn mode(&self) -> Mode {
            self.mode
        }

        fn set_pull(&mut self, _pull: Pullup) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl InputPin for LatchPin {
        fn is_high(&self) -> Result<bool, Self::Error> {
            Ok(self.level)
        }
    }

    impl OutputPin for LatchPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level = false;
            Ok(())
        }

        fn toggle(&mut self) -> Result<(), Self::Error> {
            self.level = !self.level;
            Ok(())
        }
    }

    #[test]
    fn test_device_defaults() {
        let mut device = CountingDevice { inits: 0 };
        assert!(device.is_ready());
        assert_eq!(device.name(), "CountingDevice");

        device.reset().unwrap();
        assert_eq!(device.inits, 1);
    }

    #[test]
    fn test_output_set_state() {
        let mut pin = LatchPin {
            level: false,
            mode: Mode::Output,
        };

        pin.set_state(true).unwrap();
        assert!(pin.is_high().unwrap());

        pin.set_state(false).unwrap();
        assert!(pin.is_low().unwrap());
    }
}
