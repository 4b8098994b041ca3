#![cfg_attr(not(test), no_std)]
#[cfg(test)]
extern crate std;

pub mod error;
pub mod config;
pub mod log;
pub mod utils;
pub mod hal;
pub mod drivers;
pub mod stm32f4;
pub mod devices;

pub use paste;

pub use stm32f4::gpio::{AltFn, Config, DriverType, Gpio, Mode, Pin, Pinout, Port, Pullup, Speed};
