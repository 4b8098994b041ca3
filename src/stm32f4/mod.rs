//! STM32F4 片上外设
//!
//! - `memory_map`: 外设基地址与寄存器偏移
//! - `rcc`: 端口时钟门控
//! - `gpio`: GPIO 引脚驱动

pub mod memory_map;
pub mod rcc;
pub mod gpio;
