use firmware_platform::HartId;

/// Answers "which hart is executing this code".
///
/// Must be hart-local and must not take locks.
pub trait HartIdSource {
    fn hart_id(&self) -> HartId;
}

/// Always reports the same hart. For single-hart bring-up and tests.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FixedHart(pub HartId);

impl HartIdSource for FixedHart {
    #[inline]
    fn hart_id(&self) -> HartId {
        self.0
    }
}

/// Reads the `mhartid` CSR. Requires M-mode.
#[cfg(all(feature = "riscv", any(target_arch = "riscv32", target_arch = "riscv64")))]
#[derive(Debug, Copy, Clone, Default)]
pub struct Mhartid;

#[cfg(all(feature = "riscv", any(target_arch = "riscv32", target_arch = "riscv64")))]
impl HartIdSource for Mhartid {
    #[inline]
    fn hart_id(&self) -> HartId {
        let id: usize;
        unsafe {
            core::arch::asm!("csrr {}, mhartid", out(reg) id, options(nomem, nostack, preserves_flags));
        }
        HartId::saturating_from_usize(id)
    }
}

impl<T: HartIdSource + ?Sized> HartIdSource for &T {
    #[inline]
    fn hart_id(&self) -> HartId {
        (**self).hart_id()
    }
}
