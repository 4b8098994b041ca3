//! # 设备驱动宏
//!
//! 提供便捷的宏来定义外设寄存器块。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use neon_gpio::device_driver;
//!
//! device_driver! {
//!     /// 通用定时器
//!     name: Tim2,
//!     registers: {
//!         cr1: 0x00;
//!         sr: 0x10;
//!         cnt: 0x24;
//!     }
//! }
//! ```

/// 定义寄存器块的宏
///
/// 自动生成寄存器块结构体和寄存器访问方法，
/// 所有访问都经过 [`crate::hal::Bus`]，因此在主机上会落到模拟外设。
///
/// # 语法
///
/// ```rust,ignore
/// device_driver! {
///     name: BlockName,
///     registers: {
///         reg_name: offset;
///         ...
///     }
/// }
/// ```
///
/// # 生成内容
///
/// - 寄存器块结构体 `BlockName`，通过 `BlockName::at(base)` 创建
/// - 每个寄存器的读取方法 `reg_name()`
/// - 每个寄存器的写入方法 `reg_name_write()`
/// - 每个寄存器的读-改-写方法 `reg_name_modify()`
/// - 每个寄存器的地址方法 `reg_name_addr()`
///
/// # 示例
///
/// ```rust,ignore
/// device_driver! {
///     name: Usart1,
///     registers: {
///         sr: 0x00;
///         dr: 0x04;
///     }
/// }
///
/// let usart = Usart1::at(0x4001_1000);
/// let status = usart.sr();
/// usart.dr_write(0x55);
/// ```
#[macro_export]
macro_rules! device_driver {
    (
        $(#[$meta:meta])*
        name: $name:ident,
        registers: {
            $($reg_name:ident : $offset:expr);* $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            base: usize,
        }

        impl $name {
            /// 以给定基地址创建寄存器块
            pub const fn at(base: usize) -> Self {
                Self { base }
            }

            /// 获取基地址
            pub const fn base_addr(&self) -> usize {
                self.base
            }

            $(
                $crate::paste::paste! {
                    /// 读取寄存器值
                    #[inline]
                    pub fn $reg_name(&self) -> u32 {
                        <$crate::hal::Bus as $crate::hal::RegisterAccess>::read(self.base + $offset)
                    }

                    /// 写入寄存器值
                    #[inline]
                    pub fn [<$reg_name _write>](&self, value: u32) {
                        <$crate::hal::Bus as $crate::hal::RegisterAccess>::write(self.base + $offset, value)
                    }

                    /// 读-改-写寄存器
                    #[inline]
                    pub fn [<$reg_name _modify>]<F: FnOnce(u32) -> u32>(&self, f: F) {
                        <$crate::hal::Bus as $crate::hal::RegisterAccess>::modify(self.base + $offset, f)
                    }

                    /// 获取寄存器地址
                    #[inline]
                    pub const fn [<$reg_name _addr>](&self) -> usize {
                        self.base + $offset
                    }
                }
            )*
        }
    };
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::hal::sim;
    use serial_test::serial;

    // GPIOD 之上的测试寄存器块
    device_driver! {
        /// 测试寄存器块
        name: TestBlock,
        registers: {
            ctrl: 0x00;
            data: 0x14;
        }
    }

    const GPIOD_BASE: usize = 0x4002_0C00;

    #[test]
    fn test_register_addresses() {
        let block = TestBlock::at(GPIOD_BASE);
        assert_eq!(block.base_addr(), GPIOD_BASE);
        assert_eq!(block.ctrl_addr(), GPIOD_BASE);
        assert_eq!(block.data_addr(), GPIOD_BASE + 0x14);
    }

    #[test]
    #[serial]
    fn test_register_read_write() {
        sim::reset();
        let block = TestBlock::at(GPIOD_BASE);

        block.ctrl_write(0x5555_0000);
        assert_eq!(block.ctrl(), 0x5555_0000);

        block.data_write(0x00AA);
        block.data_modify(|v| v | 0x0100);
        assert_eq!(block.data(), 0x01AA);
    }
}
