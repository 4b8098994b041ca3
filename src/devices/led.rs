//! 板载 LED

use crate::config::LED_PINOUTS;
use crate::error::Result;
use crate::stm32f4::gpio::{Config, DriverType, Gpio, Mode, Pinout, Speed};

/// LED 配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedConfig {
    /// LED 编号
    pub id: u8,
    /// 为 `true` 时 LED 低电平点亮
    pub polarity: bool,
}

/// 板载 LED，推挽输出 50 MHz
///
/// 每个 `Led` 独占一个引脚，不可复制。
#[derive(Debug)]
pub struct Led {
    gpio: Gpio,
    polarity: bool,
}

impl Led {
    /// # 错误
    ///
    /// - [`GpioError::InvalidDeviceId`](crate::error::GpioError::InvalidDeviceId): 板上没有该编号的 LED
    /// - [`GpioError::PinInUse`](crate::error::GpioError::PinInUse): 引脚已被占用
    pub fn new(config: &LedConfig) -> Result<Self> {
        let pinout = super::lookup(LED_PINOUTS, config.id)?;
        let gpio = Gpio::new(
            &Config::new(pinout)
                .mode(Mode::Output)
                .driver(DriverType::PushPull)
                .speed(Speed::Mhz50),
        )?;
        Ok(Self {
            gpio,
            polarity: config.polarity,
        })
    }

    /// 点亮或熄灭
    pub fn set_enable(&mut self, flag: bool) {
        self.gpio.set(flag ^ self.polarity);
    }

    /// 切换亮灭状态
    pub fn switch(&mut self) {
        self.gpio.toggle();
    }

    /// 当前是否点亮
    pub fn is_enabled(&self) -> bool {
        self.gpio.is_set_high() ^ self.polarity
    }

    pub fn pinout(&self) -> Pinout {
        self.gpio.pinout()
    }

    /// 底层引脚
    pub fn gpio(&self) -> &Gpio {
        &self.gpio
    }
}
