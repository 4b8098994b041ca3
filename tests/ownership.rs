use neon_gpio::error::GpioError;
use neon_gpio::hal::sim;
use neon_gpio::stm32f4::gpio::is_claimed;
use neon_gpio::stm32f4::memory_map::gpio::{MODER, PUPDR};
use neon_gpio::{Config, Gpio, Mode, Pin, Pinout, Port, Pullup};
use serial_test::serial;

const PIN: Pinout = Pinout::new(Port::H, Pin::P2);

#[test]
#[serial]
fn test_pin_has_single_owner() {
    sim::reset();
    let first = Gpio::new(&Config::new(PIN)).unwrap();
    assert!(is_claimed(PIN));

    let err = Gpio::new(&Config::new(PIN).mode(Mode::Output)).unwrap_err();
    assert_eq!(err, GpioError::PinInUse);

    // 失败的创建不会改动已有配置
    assert_eq!(first.mode(), Mode::Input);

    drop(first);
    assert!(!is_claimed(PIN));
    let _again = Gpio::new(&Config::new(PIN)).unwrap();
}

#[test]
#[serial]
fn test_move_transfers_ownership() {
    sim::reset();
    let gpio = Gpio::new(&Config::new(PIN).mode(Mode::Output)).unwrap();
    let moved = gpio;
    moved.set(true);
    assert!(moved.read());
    assert!(is_claimed(PIN));

    // 移动赋值：旧句柄被析构，引脚随新句柄转移
    let other_pin = Pinout::new(Port::H, Pin::P3);
    let mut slot = Gpio::new(&Config::new(other_pin)).unwrap();
    assert_eq!(slot.pinout(), other_pin);
    slot = moved;
    assert!(!is_claimed(other_pin));
    assert!(is_claimed(PIN));
    assert_eq!(slot.pinout(), PIN);
}

#[test]
#[serial]
fn test_release_frees_pin() {
    sim::reset();
    let gpio = Gpio::new(&Config::new(PIN).mode(Mode::Output).pullup(Pullup::PullUp)).unwrap();
    gpio.release();
    assert!(!is_claimed(PIN));

    let gpio = Gpio::new(&Config::new(PIN)).unwrap();
    assert_eq!(gpio.pullup(), Pullup::None);
}

#[cfg(feature = "dtor-reset")]
#[test]
#[serial]
fn test_drop_restores_power_on() {
    sim::reset();
    {
        let gpio = Gpio::new(&Config::new(PIN).mode(Mode::Output).pullup(Pullup::PullDown)).unwrap();
        assert_eq!(gpio.pullup(), Pullup::PullDown);
    }
    assert_eq!(sim::peek(Port::H.base_addr() + MODER), 0);
    assert_eq!(sim::peek(Port::H.base_addr() + PUPDR), 0);

    let gpio = Gpio::new(&Config::new(PIN).mode(Mode::Analog)).unwrap();
    assert_eq!(sim::peek(Port::H.base_addr() + MODER), 0b11 << 4);
    drop(gpio);
    assert_eq!(sim::peek(Port::H.base_addr() + MODER), 0);
}

#[cfg(not(feature = "dtor-reset"))]
#[test]
#[serial]
fn test_drop_keeps_configuration() {
    sim::reset();
    {
        let gpio = Gpio::new(&Config::new(PIN).mode(Mode::Output).pullup(Pullup::PullDown)).unwrap();
        gpio.set(true);
    }
    assert!(!is_claimed(PIN));
    assert_eq!(sim::peek(Port::H.base_addr() + MODER), 0b01 << 4);
    assert_eq!(sim::peek(Port::H.base_addr() + PUPDR), 0b10 << 4);

    // release 仍然显式复位
    let gpio = Gpio::new(&Config::new(PIN).mode(Mode::Analog)).unwrap();
    gpio.release();
    assert_eq!(sim::peek(Port::H.base_addr() + MODER), 0);
    assert!(!is_claimed(PIN));
}

#[test]
#[serial]
fn test_invalid_altfn() {
    sim::reset();
    let err = Gpio::new(&Config::new(PIN).mode(Mode::AltFn).altfn(16)).unwrap_err();
    assert_eq!(err, GpioError::InvalidAltFn);
    assert!(!is_claimed(PIN));
}
