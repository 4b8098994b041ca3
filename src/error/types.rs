#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    // 引脚标识
    InvalidPort,
    InvalidPin,

    // 引脚配置
    InvalidAltFn,

    // 所有权
    PinInUse,

    // 板级设备
    InvalidDeviceId,
}

impl core::fmt::Display for GpioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GpioError::InvalidPort => write!(f, "Invalid GPIO port"),
            GpioError::InvalidPin => write!(f, "Invalid GPIO pin number"),
            GpioError::InvalidAltFn => write!(f, "Alternate function out of range (0-15)"),
            GpioError::PinInUse => write!(f, "GPIO pin is already owned by another handle"),
            GpioError::InvalidDeviceId => write!(f, "Device id not present in board configuration"),
        }
    }
}

pub type Result<T> = core::result::Result<T, GpioError>;
