use crate::hal::traits::RegisterAccess;
use critical_section::RawRestoreState;

/// 内存映射寄存器访问
pub struct Mmio;

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read(addr: usize) -> u32 {
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write(addr: usize, value: u32) {
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

struct CriticalSection;
critical_section::set_impl!(CriticalSection);

unsafe impl critical_section::Impl for CriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        // 记录进入前的中断状态，支持嵌套
        let was_active = cortex_m::register::primask::read().is_active();
        cortex_m::interrupt::disable();
        was_active
    }

    unsafe fn release(was_active: RawRestoreState) {
        if was_active {
            unsafe {
                cortex_m::interrupt::enable();
            }
        }
    }
}
