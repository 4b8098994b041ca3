//! 板载按键

use crate::config::BUTTON_PINOUTS;
use crate::error::Result;
use crate::stm32f4::gpio::{Config, Gpio, Mode, Pinout, Pullup, Speed};

/// 按键配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonConfig {
    /// 按键编号
    pub id: u8,
    /// 内部上下拉。使用上拉时按键视为低电平有效
    pub pullup: Pullup,
}

/// 板载按键，输入模式 50 MHz
#[derive(Debug)]
pub struct Button {
    gpio: Gpio,
    polarity: bool,
}

impl Button {
    pub fn new(config: &ButtonConfig) -> Result<Self> {
        let pinout = super::lookup(BUTTON_PINOUTS, config.id)?;
        let gpio = Gpio::new(
            &Config::new(pinout)
                .mode(Mode::Input)
                .pullup(config.pullup)
                .speed(Speed::Mhz50),
        )?;
        Ok(Self {
            gpio,
            polarity: config.pullup == Pullup::PullUp,
        })
    }

    /// 按键是否按下
    pub fn read(&self) -> bool {
        self.gpio.read() ^ self.polarity
    }

    pub fn pinout(&self) -> Pinout {
        self.gpio.pinout()
    }
}
