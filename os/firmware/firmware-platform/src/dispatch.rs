//! # Safe Dispatch
//!
//! [`Platform`] is the only way runtime code talks to a board. It wraps a
//! possibly-unresolved descriptor reference; when there is no descriptor
//! every operation falls through to [`NoOps`], so the neutral defaults apply
//! uniformly to "no descriptor" and "board does not implement this".
//!
//! Nothing here logs, retries, locks or interprets backend failure codes.

use crate::descriptor::PlatformDescriptor;
use crate::error::{PlatformError, PlatformResult};
use crate::features::{PlatformFeature, PlatformFeatures};
use crate::hart::HartId;
use crate::ops::{BootKind, NoOps, PlatformOps, ResetType};
use crate::pmp::PmpRegion;
use core::fmt;
use core::hint::spin_loop;

static NO_OPS: NoOps = NoOps;

/// Locates the state of the hart that is currently executing.
///
/// Implementations must be hart-local and lock-free to read, and the
/// descriptor they hand out must stay valid for as long as `self` does.
pub trait HartContext {
    /// Identity of the executing hart.
    fn current_hart(&self) -> HartId;

    /// Descriptor the executing hart was booted with, if any.
    fn platform(&self) -> Option<&PlatformDescriptor<'_>>;
}

/// Dispatch handle over an optional platform descriptor.
///
/// ```
/// use firmware_platform::{Platform, ResetType};
///
/// // No descriptor resolved yet: everything reports its neutral default.
/// let p = Platform::none();
/// assert_eq!(p.name(), None);
/// assert_eq!(p.hart_count(), 0);
/// assert_eq!(p.timer_value(), 0);
/// assert_eq!(p.system_reboot(ResetType::COLD), Ok(()));
/// ```
#[derive(Copy, Clone)]
pub struct Platform<'a> {
    desc: Option<&'a PlatformDescriptor<'a>>,
}

impl<'a> Platform<'a> {
    /// Resolves from an explicit handle.
    #[inline]
    #[must_use]
    pub const fn new(desc: Option<&'a PlatformDescriptor<'a>>) -> Self {
        Self { desc }
    }

    /// A handle with no descriptor.
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self { desc: None }
    }

    /// Resolves from a raw descriptor pointer handed over by boot code.
    ///
    /// # Safety
    /// `ptr` must be null or point to a descriptor that stays valid and
    /// unmodified for `'a`.
    #[inline]
    #[must_use]
    pub unsafe fn from_ptr(ptr: *const PlatformDescriptor<'a>) -> Self {
        // SAFETY: null maps to None; otherwise the caller vouches for validity.
        Self {
            desc: unsafe { ptr.as_ref() },
        }
    }

    /// Resolves the descriptor of the executing hart.
    #[inline]
    #[must_use]
    pub fn this_hart<C: HartContext + ?Sized>(ctx: &'a C) -> Self {
        Self::new(ctx.platform())
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(self) -> Option<&'a PlatformDescriptor<'a>> {
        self.desc
    }

    /// Whether a descriptor was resolved.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.desc.is_some()
    }

    #[inline]
    fn ops(self) -> &'a dyn PlatformOps {
        match self.desc {
            Some(desc) => desc.ops(),
            None => &NO_OPS,
        }
    }

    /// The advertised features; empty without a descriptor.
    #[must_use]
    pub const fn features(self) -> PlatformFeatures {
        match self.desc {
            Some(desc) => desc.features(),
            None => PlatformFeatures::new(),
        }
    }

    /// Whether `feature` is advertised. Independent of which operations the
    /// board actually implements.
    #[must_use]
    pub const fn supports(self, feature: PlatformFeature) -> bool {
        self.features().supports(feature)
    }

    #[must_use]
    pub const fn has_mmio_timer_value(self) -> bool {
        self.supports(PlatformFeature::MmioTimerValue)
    }

    #[must_use]
    pub const fn has_hart_hotplug(self) -> bool {
        self.supports(PlatformFeature::HartHotplug)
    }

    #[must_use]
    pub const fn has_pmp(self) -> bool {
        self.supports(PlatformFeature::Pmp)
    }

    #[must_use]
    pub const fn has_scounteren(self) -> bool {
        self.supports(PlatformFeature::Scounteren)
    }

    #[must_use]
    pub const fn has_mcounteren(self) -> bool {
        self.supports(PlatformFeature::Mcounteren)
    }

    #[must_use]
    pub const fn has_mfaults_delegation(self) -> bool {
        self.supports(PlatformFeature::MfaultsDelegation)
    }

    #[must_use]
    pub fn name(self) -> Option<&'a str> {
        self.desc.map(|desc| desc.name().as_str())
    }

    #[must_use]
    pub const fn hart_count(self) -> u32 {
        match self.desc {
            Some(desc) => desc.hart_count(),
            None => 0,
        }
    }

    #[must_use]
    pub const fn hart_stack_size(self) -> u32 {
        match self.desc {
            Some(desc) => desc.hart_stack_size(),
            None => 0,
        }
    }

    /// Whether `hart` must be treated as absent.
    ///
    /// Identities past the 64-bit mask read as enabled; range checking
    /// against [`hart_count`](Self::hart_count) is up to the caller.
    #[must_use]
    pub const fn hart_disabled(self, hart: HartId) -> bool {
        match self.desc {
            Some(desc) => desc.disabled_harts().contains(hart),
            None => false,
        }
    }

    /// Hart identities in `0..hart_count` that are not disabled.
    pub fn enabled_harts(self) -> impl Iterator<Item = HartId> + 'a {
        (0..self.hart_count())
            .map(HartId::new)
            .filter(move |hart| !self.hart_disabled(*hart))
    }

    /// # Errors
    /// Backend failure, passed through.
    pub fn early_init(self, hart: HartId, boot: BootKind) -> PlatformResult {
        self.ops().early_init(hart, boot)
    }

    /// # Errors
    /// Backend failure, passed through.
    pub fn final_init(self, hart: HartId, boot: BootKind) -> PlatformResult {
        self.ops().final_init(hart, boot)
    }

    #[must_use]
    pub fn pmp_region_count(self, hart: HartId) -> u32 {
        self.ops().pmp_region_count(hart)
    }

    /// Details of one region; [`PmpRegion::EMPTY`] when the board has none.
    ///
    /// # Errors
    /// Backend failure, passed through.
    pub fn pmp_region_info(self, hart: HartId, index: u32) -> PlatformResult<PmpRegion> {
        self.ops().pmp_region_info(hart, index)
    }

    pub fn console_putc(self, ch: u8) {
        self.ops().console_putc(ch);
    }

    #[must_use]
    pub fn console_getc(self) -> u8 {
        self.ops().console_getc()
    }

    /// # Errors
    /// Backend failure, passed through.
    pub fn console_init(self) -> PlatformResult {
        self.ops().console_init()
    }

    /// # Errors
    /// Backend failure, passed through.
    pub fn irqchip_init(self, hart: HartId, boot: BootKind) -> PlatformResult {
        self.ops().irqchip_init(hart, boot)
    }

    /// # Errors
    /// Backend failure, passed through.
    pub fn ipi_init(self, hart: HartId, boot: BootKind) -> PlatformResult {
        self.ops().ipi_init(hart, boot)
    }

    pub fn ipi_inject(self, target: HartId, source: HartId) {
        self.ops().ipi_inject(target, source);
    }

    /// Waits, without bound, for `target` to acknowledge the IPI from `source`.
    ///
    /// Returns immediately on boards without an implementation. Callers that
    /// depend on the barrier must make sure the board really provides one.
    pub fn ipi_sync(self, target: HartId, source: HartId) {
        self.ops().ipi_sync(target, source);
    }

    /// Polls [`PlatformOps::ipi_pending`] at most `max_polls` additional
    /// times after the first check.
    ///
    /// # Errors
    /// [`PlatformError::IpiSyncTimeout`] if the IPI is still pending afterwards.
    pub fn ipi_sync_bounded(
        self,
        target: HartId,
        source: HartId,
        max_polls: u32,
    ) -> PlatformResult {
        let ops = self.ops();
        let mut polls = 0;
        while ops.ipi_pending(target, source) {
            if polls == max_polls {
                return Err(PlatformError::IpiSyncTimeout {
                    target,
                    sender: source,
                });
            }
            polls += 1;
            spin_loop();
        }
        Ok(())
    }

    pub fn ipi_clear(self, target: HartId) {
        self.ops().ipi_clear(target);
    }

    /// # Errors
    /// Backend failure, passed through.
    pub fn timer_init(self, hart: HartId, boot: BootKind) -> PlatformResult {
        self.ops().timer_init(hart, boot)
    }

    #[must_use]
    pub fn timer_value(self) -> u64 {
        self.ops().timer_value()
    }

    pub fn timer_event_start(self, target: HartId, next_event: u64) {
        self.ops().timer_event_start(target, next_event);
    }

    pub fn timer_event_stop(self, target: HartId) {
        self.ops().timer_event_stop(target);
    }

    /// Requests a reboot.
    ///
    /// `Ok(())` does not mean the machine rebooted: a board without a reboot
    /// implementation also reports success.
    ///
    /// # Errors
    /// Backend failure, passed through.
    pub fn system_reboot(self, kind: ResetType) -> PlatformResult {
        self.ops().system_reboot(kind)
    }

    /// Requests a power-off. Same caveat as [`system_reboot`](Self::system_reboot).
    ///
    /// # Errors
    /// Backend failure, passed through.
    pub fn system_shutdown(self, kind: ResetType) -> PlatformResult {
        self.ops().system_shutdown(kind)
    }
}

impl<'a> From<&'a PlatformDescriptor<'a>> for Platform<'a> {
    fn from(desc: &'a PlatformDescriptor<'a>) -> Self {
        Self::new(Some(desc))
    }
}

impl Default for Platform<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Platform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.desc {
            Some(desc) => f.debug_tuple("Platform").field(desc).finish(),
            None => f.write_str("Platform(<unresolved>)"),
        }
    }
}
