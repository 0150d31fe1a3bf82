//! # Physical Memory Protection Regions

use bitfield_struct::bitfield;
use utils_builder_derive::ConstBuilder;

/// Protection flags of a PMP region, laid out like a `pmpNcfg` byte.
#[bitfield(u8, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct PmpProtection {
    /// Bit 0 — R: reads permitted.
    pub read: bool,

    /// Bit 1 — W: writes permitted.
    pub write: bool,

    /// Bit 2 — X: instruction fetch permitted.
    pub execute: bool,

    /// Bits 3–4 — A: address-matching mode (0 = off, 1 = TOR, 2 = NA4, 3 = NAPOT).
    #[bits(2)]
    pub address_matching: u8,

    /// Bits 5–6 — reserved.
    #[bits(2)]
    pub reserved: u8,

    /// Bit 7 — L: the entry is locked and also applies to M-mode.
    pub locked: bool,
}

impl PmpProtection {
    pub const MATCH_OFF: u8 = 0;
    pub const MATCH_TOR: u8 = 1;
    pub const MATCH_NA4: u8 = 2;
    pub const MATCH_NAPOT: u8 = 3;
}

/// One protection region as reported by the board.
///
/// The all-zero region is what an unimplemented query reports and means
/// "no region", not failure.
///
/// ```
/// use firmware_platform::{PmpProtection, PmpRegion};
///
/// const FIRMWARE: PmpRegion = PmpRegion::EMPTY
///     .with_protection(PmpProtection::new().with_address_matching(PmpProtection::MATCH_NAPOT))
///     .with_base(0x8000_0000)
///     .with_log2_size(19);
/// assert_eq!(FIRMWARE.size(), Some(512 * 1024));
/// ```
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ConstBuilder)]
pub struct PmpRegion {
    /// Access permissions and matching mode.
    protection: PmpProtection,
    /// Base physical address.
    base: usize,
    /// Base-2 logarithm of the region size in bytes.
    log2_size: usize,
}

impl PmpRegion {
    pub const EMPTY: Self = Self {
        protection: PmpProtection::new(),
        base: 0,
        log2_size: 0,
    };

    #[must_use]
    pub const fn new(protection: PmpProtection, base: usize, log2_size: usize) -> Self {
        Self {
            protection,
            base,
            log2_size,
        }
    }

    /// Region size in bytes, or `None` if it does not fit a `usize`.
    #[must_use]
    pub const fn size(&self) -> Option<usize> {
        if self.log2_size >= usize::BITS as usize {
            None
        } else {
            Some(1 << self.log2_size)
        }
    }

    /// Whether this is the neutral "no region" value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.protection.into_bits() == 0 && self.base == 0 && self.log2_size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protection_bits() {
        let p = PmpProtection::new()
            .with_read(true)
            .with_execute(true)
            .with_address_matching(PmpProtection::MATCH_NAPOT)
            .with_locked(true);
        assert_eq!(p.into_bits(), 0b1001_1101);
    }

    #[test]
    fn default_region_is_empty() {
        assert!(PmpRegion::default().is_empty());
        assert_eq!(PmpRegion::default(), PmpRegion::EMPTY);
        assert!(!PmpRegion::EMPTY.with_base(0x1000).is_empty());
    }

    #[test]
    fn oversized_region_has_no_size() {
        let r = PmpRegion::EMPTY.with_log2_size(usize::BITS as usize);
        assert_eq!(r.size(), None);
    }
}
