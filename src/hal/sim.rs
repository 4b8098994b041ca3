//! 主机端模拟外设
//!
//! 在非 ARM 目标（包括所有测试）上模拟 STM32F4 的 GPIO 与 RCC 寄存器，
//! 使驱动代码无需硬件即可运行和测试。
//!
//! ## 模拟行为
//!
//! - 复位值与 RM0090 一致（PA13/PA14/PA15、PB3/PB4 为调试接口复用）
//! - BSRR 低 16 位置位、高 16 位复位，同时置位时置位优先，读出恒为 0
//! - IDR 只读，读取时根据模式、输出类型、上下拉和外部驱动计算：
//!
//! | 模式 | IDR |
//! |------|-----|
//! | 推挽输出 | ODR |
//! | 开漏输出 | ODR 为 0 时为 0，否则同输入 |
//! | 输入 / 复用 | 外部驱动电平，无驱动时由上下拉决定（浮空读 0） |
//! | 模拟 | 0 |
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use neon_gpio::hal::sim;
//! use neon_gpio::{Gpio, Config, Pinout, Port, Pin};
//!
//! sim::reset();
//! let button = Gpio::new(&Config::new(Pinout::new(Port::A, Pin::P0)))?;
//!
//! // 模拟外部把引脚拉高
//! sim::drive(button.pinout(), Some(true));
//! assert!(button.read());
//! ```

use spin::Mutex;

use crate::config::NUM_PORTS;
use crate::hal::traits::RegisterAccess;
use crate::stm32f4::gpio::Pinout;
use crate::stm32f4::memory_map::{self, GPIO_BASE, GPIO_PORT_STRIDE, RCC_BASE};
use crate::utils::get_bits;
use crate::trace;

const GPIO_WORDS: usize = memory_map::gpio::BLOCK_SIZE / 4;
const RCC_WORDS: usize = memory_map::rcc::BLOCK_SIZE / 4;

/// 单个 GPIO 端口的模拟状态
#[derive(Clone, Copy)]
struct PortState {
    regs: [u32; GPIO_WORDS],
    /// 外部驱动电平
    input_level: u16,
    /// 哪些引脚被外部驱动
    input_driven: u16,
}

impl PortState {
    const fn power_on(index: usize) -> Self {
        let mut regs = [0u32; GPIO_WORDS];
        match index {
            // GPIOA: PA13/PA14/PA15 为 SWD/JTAG
            0 => {
                regs[memory_map::gpio::MODER / 4] = 0xA800_0000;
                regs[memory_map::gpio::OSPEEDR / 4] = 0x0C00_0000;
                regs[memory_map::gpio::PUPDR / 4] = 0x6400_0000;
            }
            // GPIOB: PB3/PB4 为 JTAG
            1 => {
                regs[memory_map::gpio::MODER / 4] = 0x0000_0280;
                regs[memory_map::gpio::OSPEEDR / 4] = 0x0000_00C0;
                regs[memory_map::gpio::PUPDR / 4] = 0x0000_0100;
            }
            _ => {}
        }
        Self {
            regs,
            input_level: 0,
            input_driven: 0,
        }
    }

    fn reg(&self, offset: usize) -> u32 {
        self.regs[offset / 4]
    }

    /// 按当前配置计算输入数据寄存器
    fn idr(&self) -> u32 {
        let moder = self.reg(memory_map::gpio::MODER);
        let pupdr = self.reg(memory_map::gpio::PUPDR);
        let otyper = self.reg(memory_map::gpio::OTYPER);
        let odr = self.reg(memory_map::gpio::ODR);

        let mut idr = 0;
        for pin in 0..16u32 {
            let external = if self.input_driven & (1 << pin) != 0 {
                self.input_level & (1 << pin) != 0
            } else {
                get_bits(pupdr, pin * 2, 2) == 0b01
            };
            let latch = get_bits(odr, pin, 1) != 0;
            let open_drain = get_bits(otyper, pin, 1) != 0;

            let level = match get_bits(moder, pin * 2, 2) {
                0b01 if !open_drain => latch,
                0b01 => latch && external,
                0b11 => false,
                _ => external,
            };
            if level {
                idr |= 1 << pin;
            }
        }
        idr
    }

    fn write(&mut self, offset: usize, value: u32) {
        match offset {
            memory_map::gpio::IDR => {}
            memory_map::gpio::BSRR => {
                let odr = self.reg(memory_map::gpio::ODR);
                let odr = (odr & !(value >> 16)) | (value & 0xFFFF);
                self.regs[memory_map::gpio::ODR / 4] = odr & 0xFFFF;
            }
            memory_map::gpio::OTYPER | memory_map::gpio::ODR => {
                self.regs[offset / 4] = value & 0xFFFF;
            }
            _ => self.regs[offset / 4] = value,
        }
    }

    fn read(&self, offset: usize) -> u32 {
        match offset {
            memory_map::gpio::IDR => self.idr(),
            memory_map::gpio::BSRR => 0,
            _ => self.reg(offset),
        }
    }
}

struct SimState {
    ports: [PortState; NUM_PORTS],
    rcc: [u32; RCC_WORDS],
    /// GPIO 寄存器写入次数
    gpio_writes: usize,
}

impl SimState {
    const fn power_on() -> Self {
        let mut ports = [PortState::power_on(2); NUM_PORTS];
        ports[0] = PortState::power_on(0);
        ports[1] = PortState::power_on(1);

        let mut rcc = [0u32; RCC_WORDS];
        // CCMDATARAMEN 复位值为 1
        rcc[memory_map::rcc::AHB1ENR / 4] = 0x0010_0000;

        Self {
            ports,
            rcc,
            gpio_writes: 0,
        }
    }
}

static SIM: Mutex<SimState> = Mutex::new(SimState::power_on());

/// 地址解码结果
enum Target {
    Gpio { port: usize, offset: usize },
    Rcc { offset: usize },
    Unmapped,
}

fn decode(addr: usize) -> Target {
    if addr % 4 != 0 {
        return Target::Unmapped;
    }
    if (GPIO_BASE..GPIO_BASE + NUM_PORTS * GPIO_PORT_STRIDE).contains(&addr) {
        let port = (addr - GPIO_BASE) / GPIO_PORT_STRIDE;
        let offset = (addr - GPIO_BASE) % GPIO_PORT_STRIDE;
        if offset < memory_map::gpio::BLOCK_SIZE {
            return Target::Gpio { port, offset };
        }
    } else if (RCC_BASE..RCC_BASE + memory_map::rcc::BLOCK_SIZE).contains(&addr) {
        return Target::Rcc {
            offset: addr - RCC_BASE,
        };
    }
    Target::Unmapped
}

fn read_locked(state: &SimState, addr: usize) -> u32 {
    match decode(addr) {
        Target::Gpio { port, offset } => state.ports[port].read(offset),
        Target::Rcc { offset } => state.rcc[offset / 4],
        Target::Unmapped => {
            trace!("sim: read from unmapped address {:#010x}", addr);
            0
        }
    }
}

fn write_locked(state: &mut SimState, addr: usize, value: u32) {
    match decode(addr) {
        Target::Gpio { port, offset } => {
            state.ports[port].write(offset, value);
            state.gpio_writes += 1;
        }
        Target::Rcc { offset } => state.rcc[offset / 4] = value,
        Target::Unmapped => {
            trace!("sim: write {:#010x} to unmapped address {:#010x}", value, addr);
        }
    }
}

/// 模拟寄存器访问
pub struct SimBus;

impl RegisterAccess for SimBus {
    fn read(addr: usize) -> u32 {
        read_locked(&SIM.lock(), addr)
    }

    fn write(addr: usize, value: u32) {
        write_locked(&mut SIM.lock(), addr, value);
    }

    fn modify<F: FnOnce(u32) -> u32>(addr: usize, f: F) {
        let mut state = SIM.lock();
        let value = read_locked(&state, addr);
        write_locked(&mut state, addr, f(value));
    }
}

/// 将所有模拟寄存器恢复为上电复位值，并撤销所有外部驱动
pub fn reset() {
    *SIM.lock() = SimState::power_on();
}

/// 模拟外部电路驱动引脚
///
/// `Some(level)` 以给定电平驱动引脚，`None` 撤销驱动（恢复由上下拉决定）。
pub fn drive(pinout: Pinout, level: Option<bool>) {
    let mut state = SIM.lock();
    let port = &mut state.ports[pinout.port.index()];
    let bit = 1u16 << pinout.pin.number();
    match level {
        Some(high) => {
            port.input_driven |= bit;
            if high {
                port.input_level |= bit;
            } else {
                port.input_level &= !bit;
            }
        }
        None => {
            port.input_driven &= !bit;
            port.input_level &= !bit;
        }
    }
}

/// 读取寄存器当前值（测试用）
pub fn peek(addr: usize) -> u32 {
    read_locked(&SIM.lock(), addr)
}

/// 自上次 [`reset`] 以来对 GPIO 寄存器的写入次数
pub fn gpio_write_count() -> usize {
    SIM.lock().gpio_writes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stm32f4::gpio::{Pin, Port};
    use serial_test::serial;

    const GPIOA: usize = GPIO_BASE;
    const GPIOC: usize = GPIO_BASE + 2 * GPIO_PORT_STRIDE;

    #[test]
    #[serial]
    fn test_power_on_values() {
        reset();
        assert_eq!(peek(GPIOA + memory_map::gpio::MODER), 0xA800_0000);
        assert_eq!(peek(GPIOA + memory_map::gpio::PUPDR), 0x6400_0000);
        assert_eq!(peek(GPIO_BASE + GPIO_PORT_STRIDE + memory_map::gpio::MODER), 0x0000_0280);
        assert_eq!(peek(GPIOC + memory_map::gpio::MODER), 0);
        assert_eq!(peek(RCC_BASE + memory_map::rcc::AHB1ENR), 0x0010_0000);
    }

    #[test]
    #[serial]
    fn test_bsrr_semantics() {
        reset();
        SimBus::write(GPIOC + memory_map::gpio::BSRR, 0b1010);
        assert_eq!(peek(GPIOC + memory_map::gpio::ODR), 0b1010);

        // 复位位 1，置位位 0
        SimBus::write(GPIOC + memory_map::gpio::BSRR, (0b0010 << 16) | 0b0001);
        assert_eq!(peek(GPIOC + memory_map::gpio::ODR), 0b1001);

        // 同时置位与复位时置位优先
        SimBus::write(GPIOC + memory_map::gpio::BSRR, (1 << 20) | (1 << 4));
        assert_eq!(peek(GPIOC + memory_map::gpio::ODR), 0b1_1001);

        assert_eq!(SimBus::read(GPIOC + memory_map::gpio::BSRR), 0);
    }

    #[test]
    #[serial]
    fn test_idr_follows_configuration() {
        reset();
        let pin3 = Pinout::new(Port::C, Pin::P3);

        // 浮空输入读 0，外部驱动优先
        assert_eq!(peek(GPIOC + memory_map::gpio::IDR) & (1 << 3), 0);
        drive(pin3, Some(true));
        assert_ne!(peek(GPIOC + memory_map::gpio::IDR) & (1 << 3), 0);
        drive(pin3, None);

        // 上拉
        SimBus::write(GPIOC + memory_map::gpio::PUPDR, 0b01 << 6);
        assert_ne!(peek(GPIOC + memory_map::gpio::IDR) & (1 << 3), 0);

        // 模拟模式恒为 0
        SimBus::write(GPIOC + memory_map::gpio::MODER, 0b11 << 6);
        assert_eq!(peek(GPIOC + memory_map::gpio::IDR) & (1 << 3), 0);

        // 推挽输出读回 ODR
        SimBus::write(GPIOC + memory_map::gpio::MODER, 0b01 << 6);
        SimBus::write(GPIOC + memory_map::gpio::BSRR, 1 << (3 + 16));
        assert_eq!(peek(GPIOC + memory_map::gpio::IDR) & (1 << 3), 0);
    }

    #[test]
    #[serial]
    fn test_idr_is_read_only() {
        reset();
        SimBus::write(GPIOC + memory_map::gpio::IDR, 0xFFFF);
        assert_eq!(peek(GPIOC + memory_map::gpio::IDR), 0);
    }

    #[test]
    #[serial]
    fn test_unmapped_access() {
        reset();
        SimBus::write(0x2000_0000, 0xDEAD_BEEF);
        assert_eq!(SimBus::read(0x2000_0000), 0);
        assert_eq!(SimBus::read(GPIOA + 1), 0);
    }

    #[test]
    #[serial]
    fn test_gpio_write_count() {
        reset();
        SimBus::write(GPIOC + memory_map::gpio::BSRR, 1);
        SimBus::modify(GPIOC + memory_map::gpio::MODER, |v| v | 1);
        SimBus::write(RCC_BASE + memory_map::rcc::AHB1ENR, 0);
        assert_eq!(gpio_write_count(), 2);

        reset();
        assert_eq!(gpio_write_count(), 0);
    }

    #[test]
    #[serial]
    fn test_modify() {
        reset();
        SimBus::modify(RCC_BASE + memory_map::rcc::AHB1ENR, |v| v | 0b100);
        assert_eq!(peek(RCC_BASE + memory_map::rcc::AHB1ENR), 0x0010_0004);
    }
}
