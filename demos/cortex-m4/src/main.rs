#![no_std]
#![no_main]

use core::panic::PanicInfo;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use neon_gpio::devices::{Button, ButtonConfig, Led, LedConfig};
use neon_gpio::log::{set_log_level, LogLevel};
use neon_gpio::{info, Pullup};

// 16 MHz HSI 下大约 100ms
const BLINK_DELAY: u32 = 1_600_000;

#[panic_handler]
fn panic_halt(p: &PanicInfo) -> ! {
    hprintln!("{}", p);
    loop {}
}

#[entry]
fn main() -> ! {
    set_log_level(LogLevel::Debug);
    info!(
        "{} ({}) GPIO demo",
        neon_gpio::config::DEVICE_STRING,
        neon_gpio::config::DEVICE_SERIES
    );

    let (mut led, button) = match (
        Led::new(&LedConfig { id: 0, polarity: true }),
        Button::new(&ButtonConfig { id: 0, pullup: Pullup::PullDown }),
    ) {
        (Ok(led), Ok(button)) => (led, button),
        (Err(e), _) | (_, Err(e)) => {
            hprintln!("init failed: {}", e);
            loop {}
        }
    };

    // 按住按键时 LED 闪烁，松开后熄灭
    loop {
        if button.read() {
            led.switch();
        } else {
            led.set_enable(false);
        }
        cortex_m::asm::delay(BLINK_DELAY);
    }
}
