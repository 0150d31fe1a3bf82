//! # Board Operation Table
//!
//! [`PlatformOps`] is the per-board set of entry points. Every method has a
//! default body producing the neutral result for "this board does not
//! provide the capability", so a board overrides exactly the subset it
//! implements and nothing needs a presence check at the call site.
//!
//! Implementations are invoked from early boot and from trap handlers on
//! any hart, concurrently. They must not allocate, must not block (except
//! [`ipi_sync`](PlatformOps::ipi_sync)) and must do their own cross-hart
//! synchronization.

use crate::error::PlatformResult;
use crate::hart::HartId;
use crate::pmp::PmpRegion;
use core::fmt;

/// Why a hart is running its init sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BootKind {
    /// First power-on initialization of the system.
    Cold,
    /// A hart coming back from hotplug or suspend.
    Warm,
}

impl BootKind {
    #[inline]
    #[must_use]
    pub const fn from_cold_boot(cold_boot: bool) -> Self {
        if cold_boot { Self::Cold } else { Self::Warm }
    }

    #[inline]
    #[must_use]
    pub const fn is_cold(self) -> bool {
        matches!(self, Self::Cold)
    }
}

impl From<bool> for BootKind {
    fn from(cold_boot: bool) -> Self {
        Self::from_cold_boot(cold_boot)
    }
}

/// Board-defined reboot or shutdown type.
///
/// The dispatch layer never interprets the value; [`COLD`](Self::COLD) and
/// [`WARM`](Self::WARM) are the two types every board is expected to know.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ResetType(u32);

impl ResetType {
    pub const COLD: Self = Self(0);
    pub const WARM: Self = Self(1);

    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ResetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::COLD => f.write_str("ResetType::COLD"),
            Self::WARM => f.write_str("ResetType::WARM"),
            Self(raw) => write!(f, "ResetType({raw})"),
        }
    }
}

/// Entry points a board provides.
#[allow(unused_variables)]
pub trait PlatformOps: Sync {
    /// Earliest per-hart initialization, before most runtime subsystems exist.
    ///
    /// # Errors
    /// Board-specific; passed through untouched. Default: `Ok(())`.
    fn early_init(&self, hart: HartId, boot: BootKind) -> PlatformResult {
        Ok(())
    }

    /// Last per-hart initialization before handing off to the next stage.
    ///
    /// # Errors
    /// Board-specific; passed through untouched. Default: `Ok(())`.
    fn final_init(&self, hart: HartId, boot: BootKind) -> PlatformResult {
        Ok(())
    }

    /// Number of PMP regions configured for `hart`. Default: `0`.
    fn pmp_region_count(&self, hart: HartId) -> u32 {
        0
    }

    /// Details of PMP region `index` of `hart`.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(PmpRegion::EMPTY)`.
    fn pmp_region_info(&self, hart: HartId, index: u32) -> PlatformResult<PmpRegion> {
        Ok(PmpRegion::EMPTY)
    }

    /// Writes one character. Fire-and-forget; default: no-op.
    fn console_putc(&self, ch: u8) {}

    /// Reads one character; polling or blocking is the board's choice.
    /// Default: `0`.
    fn console_getc(&self) -> u8 {
        0
    }

    /// One-time console setup.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(())`.
    fn console_init(&self) -> PlatformResult {
        Ok(())
    }

    /// Per-hart interrupt controller setup.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(())`.
    fn irqchip_init(&self, hart: HartId, boot: BootKind) -> PlatformResult {
        Ok(())
    }

    /// Per-hart IPI setup.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(())`.
    fn ipi_init(&self, hart: HartId, boot: BootKind) -> PlatformResult {
        Ok(())
    }

    /// Raises an IPI on `target` on behalf of `source`. Must not block.
    fn ipi_inject(&self, target: HartId, source: HartId) {}

    /// Blocks until `target` acknowledged the IPI from `source`.
    ///
    /// The default returns immediately, which means **no barrier at all**.
    fn ipi_sync(&self, target: HartId, source: HartId) {}

    /// Whether an IPI from `source` to `target` is still unacknowledged.
    ///
    /// Polled by [`Platform::ipi_sync_bounded`](crate::Platform::ipi_sync_bounded).
    /// Default: `false`.
    fn ipi_pending(&self, target: HartId, source: HartId) -> bool {
        false
    }

    /// Clears a pending IPI on `target`. Default: no-op.
    fn ipi_clear(&self, target: HartId) {}

    /// Per-hart timer setup.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(())`.
    fn timer_init(&self, hart: HartId, boot: BootKind) -> PlatformResult {
        Ok(())
    }

    /// Current value of the free-running counter. Default: `0`.
    fn timer_value(&self) -> u64 {
        0
    }

    /// Arms a one-shot timer interrupt for `target` at absolute `next_event`.
    fn timer_event_start(&self, target: HartId, next_event: u64) {}

    /// Disarms the timer interrupt of `target`.
    fn timer_event_stop(&self, target: HartId) {}

    /// Reboots the machine.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(())` **without rebooting**.
    fn system_reboot(&self, kind: ResetType) -> PlatformResult {
        Ok(())
    }

    /// Powers the machine off.
    ///
    /// # Errors
    /// Board-specific. Default: `Ok(())` **without shutting down**.
    fn system_shutdown(&self, kind: ResetType) -> PlatformResult {
        Ok(())
    }
}

/// A board that provides none of the operations.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoOps;

impl PlatformOps for NoOps {}
