//! # STM32F4 GPIO 驱动
//!
//! 一个 [`Gpio`] 对象对应并管理 MCU 上的一个 GPIO 引脚，
//! 提供读取、置位/复位、翻转以及恢复上电配置等操作。
//!
//! ## 所有权
//!
//! - 同一引脚同时只能存在一个 `Gpio`，重复创建返回 [`GpioError::PinInUse`]
//! - `Gpio` 不可复制，只能移动；移动后所有权随之转移
//! - 析构时释放引脚，启用 `dtor-reset` feature 时同时恢复上电配置
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use neon_gpio::{Gpio, Config, Pinout, Port, Pin, Mode, Speed};
//!
//! let led = Gpio::new(
//!     &Config::new(Pinout::new(Port::D, Pin::P12))
//!         .mode(Mode::Output)
//!         .speed(Speed::Mhz50),
//! )?;
//!
//! led.set(true);
//! led.toggle();
//! assert!(!led.read());
//! ```

mod claim;
mod types;

pub use claim::is_claimed;
pub use types::{
    power_on_config, AltFn, Config, DriverType, Mode, Pin, Pinout, Port, Pullup, Speed, MAX_ALTFN,
};

use core::convert::Infallible;

use crate::config::DTOR_RESET_PERIPH;
use crate::drivers::{Device, GpioPin, InputPin, OutputPin, OutputTypePin};
use crate::error::{GpioError, Result};
use crate::stm32f4::memory_map;
use crate::stm32f4::rcc;
use crate::utils::{get_bits, reset_and_set};
use crate::{debug, error, trace};

crate::device_driver! {
    /// GPIO 端口寄存器块
    name: GpioRegs,
    registers: {
        moder: memory_map::gpio::MODER;
        otyper: memory_map::gpio::OTYPER;
        ospeedr: memory_map::gpio::OSPEEDR;
        pupdr: memory_map::gpio::PUPDR;
        idr: memory_map::gpio::IDR;
        odr: memory_map::gpio::ODR;
        bsrr: memory_map::gpio::BSRR;
        afrl: memory_map::gpio::AFRL;
        afrh: memory_map::gpio::AFRH;
    }
}

/// STM32F4 GPIO 引脚
#[derive(Debug)]
pub struct Gpio {
    pinout: Pinout,
    /// 创建时的配置，`Device::init` 时重新写入
    initial: Config,
}

impl Gpio {
    /// 按配置创建并初始化引脚
    ///
    /// 依次检查复用功能编号、占用引脚、打开端口时钟，再写入引脚配置。
    ///
    /// # 错误
    ///
    /// - [`GpioError::InvalidAltFn`]: 复用功能编号大于 15
    /// - [`GpioError::PinInUse`]: 引脚已被其他 `Gpio` 持有
    pub fn new(config: &Config) -> Result<Self> {
        if config.altfn > MAX_ALTFN {
            error!("{}: alternate function {} out of range", config.pinout, config.altfn);
            return Err(GpioError::InvalidAltFn);
        }
        if let Err(e) = claim::claim(config.pinout) {
            error!("{}: {}", config.pinout, e);
            return Err(e);
        }

        rcc::enable_port_clock(config.pinout.port);

        let gpio = Self {
            pinout: config.pinout,
            initial: *config,
        };
        gpio.apply(config);
        debug!(
            "{}: {:?} {:?} {:?} {:?} AF{}",
            config.pinout, config.mode, config.pullup, config.speed, config.driver, config.altfn
        );
        Ok(gpio)
    }

    /// 按各项参数创建引脚，复用功能为 AF0
    ///
    /// 与 [`Gpio::new`] 等价，一般推荐使用 `new` 以提高可读性。
    pub fn from_parts(
        pinout: Pinout,
        mode: Mode,
        pullup: Pullup,
        speed: Speed,
        driver: DriverType,
    ) -> Result<Self> {
        Self::new(&Config {
            pinout,
            mode,
            speed,
            pullup,
            driver,
            altfn: 0,
        })
    }

    /// 当前管理的引脚
    pub fn pinout(&self) -> Pinout {
        self.pinout
    }

    #[inline]
    fn regs(&self) -> GpioRegs {
        GpioRegs::at(self.pinout.port.base_addr())
    }

    #[inline]
    fn n(&self) -> u32 {
        self.pinout.pin.number() as u32
    }

    /// 写入完整配置
    ///
    /// 模式最后写入，切换到输出/复用时输出级已经按新配置就绪。
    fn apply(&self, config: &Config) {
        let regs = self.regs();
        let n = self.n();
        critical_section::with(|_| {
            self.write_altfn(config.altfn);
            regs.otyper_modify(|v| reset_and_set(v, n, 1, config.driver.bits()));
            regs.ospeedr_modify(|v| reset_and_set(v, n * 2, 2, config.speed.bits()));
            regs.pupdr_modify(|v| reset_and_set(v, n * 2, 2, config.pullup.bits()));
            regs.moder_modify(|v| reset_and_set(v, n * 2, 2, config.mode.bits()));
        });
    }

    /// 复用功能寄存器：0~7 号引脚在 AFRL，8~15 号在 AFRH，每脚 4 位
    fn write_altfn(&self, altfn: AltFn) {
        let regs = self.regs();
        let n = self.n();
        if n < 8 {
            regs.afrl_modify(|v| reset_and_set(v, n * 4, 4, altfn as u32));
        } else {
            regs.afrh_modify(|v| reset_and_set(v, (n - 8) * 4, 4, altfn as u32));
        }
    }

    // ------------------------------------------------------------------
    // I/O
    // ------------------------------------------------------------------

    /// 读取引脚当前逻辑电平
    ///
    /// 返回 `true` 表示高电平，`false` 表示低电平
    pub fn read(&self) -> bool {
        get_bits(self.regs().idr(), self.n(), 1) != 0
    }

    /// 设置输出电平
    ///
    /// `true` 输出高电平，`false` 输出低电平。通过 BSRR 单次写入完成，
    /// 不影响同端口其他引脚。在输入模式下调用会预置输出锁存器。
    pub fn set(&self, state: bool) {
        let bit = 1u32 << self.n();
        self.regs().bsrr_write(if state { bit } else { bit << 16 });
    }

    /// 翻转输出电平，高变低、低变高
    pub fn toggle(&self) {
        let regs = self.regs();
        let bit = 1u32 << self.n();
        let odr = regs.odr();
        regs.bsrr_write(if odr & bit != 0 { bit << 16 } else { bit });
    }

    /// 输出锁存器当前是否为高电平
    pub fn is_set_high(&self) -> bool {
        get_bits(self.regs().odr(), self.n(), 1) != 0
    }

    /// 将引脚恢复为上电复位时的配置
    pub fn reset(&self) {
        self.apply(&power_on_config(self.pinout));
        trace!("{}: restored power-on configuration", self.pinout);
    }

    /// 恢复上电配置并释放引脚，之后可以被重新创建
    ///
    /// 不论是否启用 `dtor-reset`，寄存器只写入一次。
    pub fn release(self) {
        self.reset();
        claim::release(self.pinout);
        trace!("{}: released", self.pinout);
        // 已完成析构的全部工作
        core::mem::forget(self);
    }

    // ------------------------------------------------------------------
    // 配置读取
    // ------------------------------------------------------------------

    /// 当前模式
    pub fn mode(&self) -> Mode {
        Mode::from_bits(get_bits(self.regs().moder(), self.n() * 2, 2))
    }

    /// 当前上下拉配置
    pub fn pullup(&self) -> Pullup {
        Pullup::from_bits(get_bits(self.regs().pupdr(), self.n() * 2, 2))
    }

    /// 当前输出速度
    pub fn speed(&self) -> Speed {
        Speed::from_bits(get_bits(self.regs().ospeedr(), self.n() * 2, 2))
    }

    /// 当前输出驱动类型
    pub fn driver(&self) -> DriverType {
        DriverType::from_bits(get_bits(self.regs().otyper(), self.n(), 1))
    }

    /// 当前复用功能编号
    pub fn altfn(&self) -> AltFn {
        let n = self.n();
        let bits = if n < 8 {
            get_bits(self.regs().afrl(), n * 4, 4)
        } else {
            get_bits(self.regs().afrh(), (n - 8) * 4, 4)
        };
        bits as AltFn
    }

    /// 从寄存器读回的完整配置
    pub fn config(&self) -> Config {
        Config {
            pinout: self.pinout,
            mode: self.mode(),
            speed: self.speed(),
            pullup: self.pullup(),
            driver: self.driver(),
            altfn: self.altfn(),
        }
    }

    // ------------------------------------------------------------------
    // 单项重新配置
    // ------------------------------------------------------------------

    /// 切换模式，其余配置不变
    pub fn set_mode(&mut self, mode: Mode) {
        let (regs, n) = (self.regs(), self.n());
        critical_section::with(|_| regs.moder_modify(|v| reset_and_set(v, n * 2, 2, mode.bits())));
    }

    /// 修改上下拉
    pub fn set_pullup(&mut self, pullup: Pullup) {
        let (regs, n) = (self.regs(), self.n());
        critical_section::with(|_| regs.pupdr_modify(|v| reset_and_set(v, n * 2, 2, pullup.bits())));
    }

    /// 修改输出速度
    pub fn set_speed(&mut self, speed: Speed) {
        let (regs, n) = (self.regs(), self.n());
        critical_section::with(|_| regs.ospeedr_modify(|v| reset_and_set(v, n * 2, 2, speed.bits())));
    }

    /// 修改输出驱动类型
    pub fn set_driver(&mut self, driver: DriverType) {
        let (regs, n) = (self.regs(), self.n());
        critical_section::with(|_| regs.otyper_modify(|v| reset_and_set(v, n, 1, driver.bits())));
    }

    /// 设置复用功能编号
    ///
    /// 编号大于 15 时返回 [`GpioError::InvalidAltFn`]，寄存器保持不变。
    pub fn set_altfn(&mut self, altfn: AltFn) -> Result<()> {
        if altfn > MAX_ALTFN {
            return Err(GpioError::InvalidAltFn);
        }
        critical_section::with(|_| self.write_altfn(altfn));
        Ok(())
    }
}

impl Drop for Gpio {
    fn drop(&mut self) {
        if DTOR_RESET_PERIPH {
            Gpio::reset(self);
        }
        claim::release(self.pinout);
        trace!("{}: released", self.pinout);
    }
}

// ============================================================================
// 驱动 trait 实现
// ============================================================================

impl Device for Gpio {
    type Error = GpioError;

    fn init(&mut self) -> Result<()> {
        let initial = self.initial;
        self.apply(&initial);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "GPIO"
    }

    fn reset(&mut self) -> Result<()> {
        Gpio::reset(self);
        Ok(())
    }
}

impl GpioPin for Gpio {
    type Error = GpioError;

    fn pin_number(&self) -> u8 {
        self.pinout.pin.number()
    }

    fn set_mode(&mut self, mode: Mode) -> Result<()> {
        Gpio::set_mode(self, mode);
        Ok(())
    }

    fn mode(&self) -> Mode {
        Gpio::mode(self)
    }

    fn set_pull(&mut self, pull: Pullup) -> Result<()> {
        self.set_pullup(pull);
        Ok(())
    }
}

impl InputPin for Gpio {
    fn is_high(&self) -> Result<bool> {
        Ok(self.read())
    }
}

impl OutputPin for Gpio {
    fn set_high(&mut self) -> Result<()> {
        self.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.set(false);
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        Gpio::toggle(self);
        Ok(())
    }
}

impl OutputTypePin for Gpio {
    fn set_output_type(&mut self, output_type: DriverType) -> Result<()> {
        self.set_driver(output_type);
        Ok(())
    }
}

// embedded-hal 1.0
impl embedded_hal::digital::ErrorType for Gpio {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for Gpio {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(self.read())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!self.read())
    }
}

impl embedded_hal::digital::OutputPin for Gpio {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for Gpio {
    fn is_set_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(Gpio::is_set_high(self))
    }

    fn is_set_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!Gpio::is_set_high(self))
    }

    fn toggle(&mut self) -> core::result::Result<(), Infallible> {
        Gpio::toggle(self);
        Ok(())
    }
}

// ============================================================================
// 单元测试
// ============================================================================
