//! 硬件抽象层 (HAL)
//!
//! 提供寄存器访问的抽象接口：
//! - Cortex-M4 目标：直接 volatile 访问内存映射寄存器
//! - 其他目标（含测试）：访问模拟的 STM32F4 外设寄存器

pub mod traits;

#[cfg(all(feature = "cortex_m4", not(test), target_arch = "arm"))]
pub mod cortex_m4;
#[cfg(not(all(feature = "cortex_m4", not(test), target_arch = "arm")))]
pub mod sim;

#[cfg(all(
    not(feature = "spin"),
    not(all(feature = "cortex_m4", not(test), target_arch = "arm"))
))]
compile_error!("the simulated peripheral backend needs the `spin` feature");

// 重新导出 traits
pub use traits::*;

// 架构特定实现导出
#[cfg(all(feature = "cortex_m4", not(test), target_arch = "arm"))]
pub use cortex_m4::Mmio as Bus;

#[cfg(not(all(feature = "cortex_m4", not(test), target_arch = "arm")))]
pub use sim::SimBus as Bus;
