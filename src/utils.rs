//! 寄存器位域辅助函数

/// 生成从 `offset` 开始、宽度为 `width` 的掩码
#[inline]
pub const fn bitmask(offset: u32, width: u32) -> u32 {
    (((1u64 << width) - 1) as u32) << offset
}

/// 读取位域
#[inline]
pub const fn get_bits(value: u32, offset: u32, width: u32) -> u32 {
    (value & bitmask(offset, width)) >> offset
}

/// 清除位域并写入新值，超出宽度的高位会被截断
#[inline]
pub const fn reset_and_set(value: u32, offset: u32, width: u32, field: u32) -> u32 {
    let mask = bitmask(offset, width);
    (value & !mask) | ((field << offset) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmask() {
        assert_eq!(bitmask(0, 1), 0b1);
        assert_eq!(bitmask(4, 2), 0b11_0000);
        assert_eq!(bitmask(0, 32), u32::MAX);
        assert_eq!(bitmask(30, 2), 0xC000_0000);
    }

    #[test]
    fn test_get_bits() {
        assert_eq!(get_bits(0xA800_0000, 30, 2), 0b10);
        assert_eq!(get_bits(0xA800_0000, 26, 2), 0b10);
        assert_eq!(get_bits(0xA800_0000, 0, 2), 0);
    }

    #[test]
    fn test_reset_and_set() {
        // 只改动目标位域
        assert_eq!(reset_and_set(0xFFFF_FFFF, 4, 4, 0x0), 0xFFFF_FF0F);
        assert_eq!(reset_and_set(0, 2, 2, 0b01), 0b0100);
        // 超宽的值被截断
        assert_eq!(reset_and_set(0, 0, 2, 0b111), 0b11);
    }
}
