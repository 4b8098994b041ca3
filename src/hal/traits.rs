//! 硬件抽象层 Trait 定义
//!
//! 驱动只通过这些 trait 访问外设寄存器，
//! 真实芯片与主机模拟分别提供实现。

/// 32 位寄存器访问 trait
///
/// 所有 GPIO / RCC 寄存器都是 32 位宽，按字对齐访问。
pub trait RegisterAccess {
    /// 读取寄存器
    ///
    /// # 参数
    /// - `addr`: 寄存器绝对地址
    fn read(addr: usize) -> u32;

    /// 写入寄存器
    ///
    /// # 参数
    /// - `addr`: 寄存器绝对地址
    /// - `value`: 写入值
    fn write(addr: usize, value: u32);

    /// 读-改-写
    ///
    /// 默认实现先读后写，本身不保证原子性，
    /// 共享寄存器需要调用方进入临界区。
    fn modify<F: FnOnce(u32) -> u32>(addr: usize, f: F) {
        let value = Self::read(addr);
        Self::write(addr, f(value));
    }
}
