//! GPIO 引脚标识与配置类型
//!
//! 各枚举的判别值即写入寄存器的编码，参考 RM0090 8.4.1 ~ 8.4.4 节。

use core::fmt;

use crate::config::{NUM_PORTS, PINS_PER_PORT};
use crate::error::GpioError;
use crate::stm32f4::memory_map::{GPIO_BASE, GPIO_PORT_STRIDE};

/// GPIO 端口
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
}

impl Port {
    /// 所有端口，按地址顺序排列
    pub const ALL: [Port; NUM_PORTS] = [
        Port::A,
        Port::B,
        Port::C,
        Port::D,
        Port::E,
        Port::F,
        Port::G,
        Port::H,
        Port::I,
        Port::J,
        Port::K,
    ];

    /// 端口序号，同时也是 RCC AHB1ENR 中的时钟使能位
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 端口寄存器块基地址
    pub const fn base_addr(self) -> usize {
        GPIO_BASE + self.index() * GPIO_PORT_STRIDE
    }

    /// 端口字母
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl TryFrom<u8> for Port {
    type Error = GpioError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Port::ALL
            .get(index as usize)
            .copied()
            .ok_or(GpioError::InvalidPort)
    }
}

impl TryFrom<char> for Port {
    type Error = GpioError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        let upper = letter.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(GpioError::InvalidPort);
        }
        Port::try_from(upper as u8 - b'A')
    }
}

/// 端口内的引脚编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Pin {
    P0 = 0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
    P11,
    P12,
    P13,
    P14,
    P15,
}

impl Pin {
    const ALL: [Pin; PINS_PER_PORT] = [
        Pin::P0,
        Pin::P1,
        Pin::P2,
        Pin::P3,
        Pin::P4,
        Pin::P5,
        Pin::P6,
        Pin::P7,
        Pin::P8,
        Pin::P9,
        Pin::P10,
        Pin::P11,
        Pin::P12,
        Pin::P13,
        Pin::P14,
        Pin::P15,
    ];

    /// 引脚编号 0-15
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// 该引脚在 16 位端口寄存器中的掩码
    pub const fn mask(self) -> u16 {
        1 << self.number()
    }
}

impl TryFrom<u8> for Pin {
    type Error = GpioError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Pin::ALL
            .get(number as usize)
            .copied()
            .ok_or(GpioError::InvalidPin)
    }
}

/// MCU 引脚：端口 + 引脚编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pinout {
    pub port: Port,
    pub pin: Pin,
}

impl Pinout {
    pub const fn new(port: Port, pin: Pin) -> Self {
        Self { port, pin }
    }
}

impl Default for Pinout {
    fn default() -> Self {
        Self::new(Port::A, Pin::P0)
    }
}

impl fmt::Display for Pinout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port.letter(), self.pin.number())
    }
}

/// GPIO 模式 (MODER)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Mode {
    /// 输入
    #[default]
    Input = 0b00,
    /// 通用输出
    Output = 0b01,
    /// 复用功能
    AltFn = 0b10,
    /// 模拟
    Analog = 0b11,
}

impl Mode {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Mode::Input,
            0b01 => Mode::Output,
            0b10 => Mode::AltFn,
            _ => Mode::Analog,
        }
    }
}

/// 输出速度 (OSPEEDR)
///
/// 频率为 VDD = 3.3 V、CL = 30 pF 时的典型最大翻转频率。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Speed {
    #[default]
    Mhz2 = 0b00,
    Mhz25 = 0b01,
    Mhz50 = 0b10,
    Mhz100 = 0b11,
}

impl Speed {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Speed::Mhz2,
            0b01 => Speed::Mhz25,
            0b10 => Speed::Mhz50,
            _ => Speed::Mhz100,
        }
    }
}

/// 内部上拉/下拉电阻 (PUPDR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Pullup {
    #[default]
    None = 0b00,
    PullUp = 0b01,
    PullDown = 0b10,
}

impl Pullup {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// 0b11 为保留编码，按无上下拉处理
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Pullup::PullUp,
            0b10 => Pullup::PullDown,
            _ => Pullup::None,
        }
    }
}

/// 输出驱动类型 (OTYPER)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DriverType {
    #[default]
    PushPull = 0,
    OpenDrain = 1,
}

impl DriverType {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Self {
        if bits & 1 == 0 {
            DriverType::PushPull
        } else {
            DriverType::OpenDrain
        }
    }
}

/// 复用功能编号 (AFRL/AFRH)，有效范围 0-15
pub type AltFn = u8;

/// 最大复用功能编号
pub const MAX_ALTFN: AltFn = 15;

/// GPIO 配置
///
/// # 示例
///
/// ```rust
/// use neon_gpio::{Config, Mode, Pin, Pinout, Port, Speed};
///
/// let config = Config::new(Pinout::new(Port::D, Pin::P12))
///     .mode(Mode::Output)
///     .speed(Speed::Mhz50);
/// assert_eq!(config.mode, Mode::Output);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// 要初始化的引脚，默认 PA0
    pub pinout: Pinout,
    /// 默认输入模式
    pub mode: Mode,
    /// 默认 2 MHz
    pub speed: Speed,
    /// 默认无上下拉
    pub pullup: Pullup,
    /// 默认推挽
    pub driver: DriverType,
    /// 默认 AF0
    pub altfn: AltFn,
}

impl Config {
    /// 以默认配置创建指定引脚的配置
    pub const fn new(pinout: Pinout) -> Self {
        Self {
            pinout,
            mode: Mode::Input,
            speed: Speed::Mhz2,
            pullup: Pullup::None,
            driver: DriverType::PushPull,
            altfn: 0,
        }
    }

    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub const fn pullup(mut self, pullup: Pullup) -> Self {
        self.pullup = pullup;
        self
    }

    pub const fn driver(mut self, driver: DriverType) -> Self {
        self.driver = driver;
        self
    }

    /// 设置复用功能编号，范围在创建 [`Gpio`](super::Gpio) 时检查
    pub const fn altfn(mut self, altfn: AltFn) -> Self {
        self.altfn = altfn;
        self
    }
}

/// 引脚的上电复位配置
///
/// 调试接口引脚（PA13~PA15、PB3、PB4）上电即处于复用模式，
/// 其余引脚为浮空输入。
pub const fn power_on_config(pinout: Pinout) -> Config {
    let config = Config::new(pinout);
    match (pinout.port, pinout.pin) {
        // JTMS-SWDIO
        (Port::A, Pin::P13) => config.mode(Mode::AltFn).pullup(Pullup::PullUp).speed(Speed::Mhz100),
        // JTCK-SWCLK
        (Port::A, Pin::P14) => config.mode(Mode::AltFn).pullup(Pullup::PullDown),
        // JTDI
        (Port::A, Pin::P15) => config.mode(Mode::AltFn).pullup(Pullup::PullUp),
        // JTDO / TRACESWO
        (Port::B, Pin::P3) => config.mode(Mode::AltFn).speed(Speed::Mhz100),
        // NJTRST
        (Port::B, Pin::P4) => config.mode(Mode::AltFn).pullup(Pullup::PullUp),
        _ => config,
    }
}
