//! STM32F4 外设地址映射
//!
//! 参考 RM0090 2.3 节（Memory map）与 8.4 节（GPIO registers）。

/// 外设区起始地址
pub const PERIPH_BASE: usize = 0x4000_0000;
/// AHB1 总线起始地址
pub const AHB1_BASE: usize = PERIPH_BASE + 0x0002_0000;

/// GPIOA 基地址，其余端口依次相隔 [`GPIO_PORT_STRIDE`]
pub const GPIO_BASE: usize = AHB1_BASE;
pub const GPIO_PORT_STRIDE: usize = 0x400;

/// RCC 基地址
pub const RCC_BASE: usize = AHB1_BASE + 0x3800;

/// GPIO 端口寄存器偏移
pub mod gpio {
    pub const MODER: usize = 0x00;
    pub const OTYPER: usize = 0x04;
    pub const OSPEEDR: usize = 0x08;
    pub const PUPDR: usize = 0x0C;
    pub const IDR: usize = 0x10;
    pub const ODR: usize = 0x14;
    pub const BSRR: usize = 0x18;
    pub const LCKR: usize = 0x1C;
    pub const AFRL: usize = 0x20;
    pub const AFRH: usize = 0x24;

    /// 寄存器块大小（字节）
    pub const BLOCK_SIZE: usize = 0x28;
}

/// RCC 寄存器偏移
pub mod rcc {
    pub const AHB1ENR: usize = 0x30;

    /// 寄存器块大小（字节）
    pub const BLOCK_SIZE: usize = 0x90;
}
