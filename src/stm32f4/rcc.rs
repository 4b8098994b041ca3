//! RCC 时钟门控
//!
//! 只负责打开 GPIO 端口所在 AHB1 总线上的外设时钟，
//! 系统时钟树（HSE / PLL）由启动代码配置。

use crate::stm32f4::gpio::Port;
use crate::stm32f4::memory_map::{self, RCC_BASE};
use crate::debug;

crate::device_driver! {
    /// RCC 寄存器块
    name: RccRegs,
    registers: {
        ahb1enr: memory_map::rcc::AHB1ENR;
    }
}

const RCC: RccRegs = RccRegs::at(RCC_BASE);

/// 打开端口时钟
///
/// AHB1ENR 的第 0~10 位依次对应 GPIOA~GPIOK。
pub fn enable_port_clock(port: Port) {
    let bit = 1u32 << port.index();
    let was_enabled = critical_section::with(|_| {
        let before = RCC.ahb1enr();
        RCC.ahb1enr_write(before | bit);
        before & bit != 0
    });
    if !was_enabled {
        debug!("RCC: GPIO{} clock enabled", port.letter());
    }
}

/// 端口时钟是否已打开
pub fn is_port_clock_enabled(port: Port) -> bool {
    RCC.ahb1enr() & (1 << port.index()) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_enable_port_clock() {
        sim::reset();
        for port in Port::ALL {
            assert!(!is_port_clock_enabled(port));
        }

        enable_port_clock(Port::C);
        enable_port_clock(Port::K);
        assert!(is_port_clock_enabled(Port::C));
        assert!(is_port_clock_enabled(Port::K));
        assert!(!is_port_clock_enabled(Port::A));

        // 其他使能位保持不变
        assert_eq!(
            sim::peek(RCC_BASE + memory_map::rcc::AHB1ENR),
            0x0010_0000 | (1 << 2) | (1 << 10)
        );
    }

    #[test]
    #[serial]
    fn test_enable_is_idempotent() {
        sim::reset();
        enable_port_clock(Port::D);
        enable_port_clock(Port::D);
        assert_eq!(
            sim::peek(RCC_BASE + memory_map::rcc::AHB1ENR),
            0x0010_0000 | (1 << 3)
        );
    }
}
