// 芯片与板级配置
use crate::stm32f4::gpio::{Pin, Pinout, Port};

pub const DEVICE_SERIES: &str = "STM32F4";
pub const DEVICE_STRING: &str = "STM32F407xx";

pub const NUM_PORTS: usize = 11; // GPIOA ~ GPIOK
pub const PINS_PER_PORT: usize = 16;

/// 析构时是否将引脚恢复为上电默认配置
pub const DTOR_RESET_PERIPH: bool = cfg!(feature = "dtor-reset");

// STM32F407 开发板引脚分配，下标即 LedConfig / ButtonConfig 中的 id
pub const LED_PINOUTS: &[Pinout] = &[
    Pinout::new(Port::A, Pin::P6),
    Pinout::new(Port::A, Pin::P7),
];

pub const BUTTON_PINOUTS: &[Pinout] = &[
    Pinout::new(Port::A, Pin::P0),
    Pinout::new(Port::E, Pin::P4),
    Pinout::new(Port::E, Pin::P3),
];
