//! # Optional Platform Capabilities
//!
//! The feature mask is advisory metadata. Callers consult it to decide
//! *whether* to exercise a capability; it says nothing about which
//! [`PlatformOps`](crate::PlatformOps) methods a board overrides, and the two
//! are deliberately kept apart.

use bitfield_struct::bitfield;
use core::fmt;

/// Feature bitmask of a platform descriptor.
///
/// Bits 6–63 are reserved; they are preserved verbatim by
/// [`from_bits`](Self::from_bits) / [`into_bits`](Self::into_bits) so
/// descriptors produced by newer boards round-trip unchanged.
#[bitfield(u64, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct PlatformFeatures {
    /// Bit 0 — the board exposes a memory-mapped free-running timer.
    pub mmio_timer_value: bool,

    /// Bit 1 — harts can be taken offline and brought back.
    pub hart_hotplug: bool,

    /// Bit 2 — physical memory protection is available.
    pub pmp: bool,

    /// Bit 3 — S-mode counter enable (`scounteren`) is implemented.
    pub scounteren: bool,

    /// Bit 4 — M-mode counter enable (`mcounteren`) is implemented.
    pub mcounteren: bool,

    /// Bit 5 — traps may be delegated to lower privilege levels.
    pub mfaults_delegation: bool,

    /// Bits 6–63 — reserved.
    #[bits(58)]
    pub reserved: u64,
}

impl PlatformFeatures {
    /// The feature set most boards start from: everything except hotplug.
    pub const DEFAULT: Self = Self::new()
        .with_mmio_timer_value(true)
        .with_pmp(true)
        .with_scounteren(true)
        .with_mcounteren(true)
        .with_mfaults_delegation(true);

    /// Whether `feature` is advertised.
    #[inline]
    #[must_use]
    pub const fn supports(self, feature: PlatformFeature) -> bool {
        self.into_bits() & feature.bit() != 0
    }

    /// Returns the mask with `feature` advertised.
    #[inline]
    #[must_use]
    pub const fn with_feature(self, feature: PlatformFeature) -> Self {
        Self::from_bits(self.into_bits() | feature.bit())
    }

    /// Iterates over the named features that are advertised.
    pub fn iter(self) -> impl Iterator<Item = PlatformFeature> {
        PlatformFeature::ALL
            .into_iter()
            .filter(move |f| self.supports(*f))
    }
}

/// Comma-separated feature names, or `none`. Reserved bits are not shown.
impl fmt::Display for PlatformFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.iter().map(PlatformFeature::name);
        let Some(first) = names.next() else {
            return f.write_str("none");
        };
        f.write_str(first)?;
        for name in names {
            write!(f, ",{name}")?;
        }
        Ok(())
    }
}

impl FromIterator<PlatformFeature> for PlatformFeatures {
    fn from_iter<I: IntoIterator<Item = PlatformFeature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with_feature)
    }
}

/// A named optional capability.
#[repr(u64)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlatformFeature {
    MmioTimerValue = 1 << 0,
    HartHotplug = 1 << 1,
    Pmp = 1 << 2,
    Scounteren = 1 << 3,
    Mcounteren = 1 << 4,
    MfaultsDelegation = 1 << 5,
}

impl fmt::Display for PlatformFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PlatformFeature {
    pub const ALL: [Self; 6] = [
        Self::MmioTimerValue,
        Self::HartHotplug,
        Self::Pmp,
        Self::Scounteren,
        Self::Mcounteren,
        Self::MfaultsDelegation,
    ];

    /// The single bit this feature occupies in [`PlatformFeatures`].
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u64 {
        self as u64
    }

    /// Short lowercase name, as shown in boot logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MmioTimerValue => "mmio-timer-value",
            Self::HartHotplug => "hart-hotplug",
            Self::Pmp => "pmp",
            Self::Scounteren => "scounteren",
            Self::Mcounteren => "mcounteren",
            Self::MfaultsDelegation => "mfaults-delegation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_bits_line_up_with_bitfield() {
        assert_eq!(
            PlatformFeatures::new().with_mmio_timer_value(true).into_bits(),
            PlatformFeature::MmioTimerValue.bit()
        );
        assert_eq!(
            PlatformFeatures::new().with_hart_hotplug(true).into_bits(),
            PlatformFeature::HartHotplug.bit()
        );
        assert_eq!(
            PlatformFeatures::new().with_pmp(true).into_bits(),
            PlatformFeature::Pmp.bit()
        );
        assert_eq!(
            PlatformFeatures::new().with_scounteren(true).into_bits(),
            PlatformFeature::Scounteren.bit()
        );
        assert_eq!(
            PlatformFeatures::new().with_mcounteren(true).into_bits(),
            PlatformFeature::Mcounteren.bit()
        );
        assert_eq!(
            PlatformFeatures::new().with_mfaults_delegation(true).into_bits(),
            PlatformFeature::MfaultsDelegation.bit()
        );
    }

    #[test]
    fn default_set_excludes_hotplug() {
        assert_eq!(PlatformFeatures::DEFAULT.into_bits(), 0b11_1101);
        assert!(!PlatformFeatures::DEFAULT.supports(PlatformFeature::HartHotplug));
    }

    #[test]
    fn reserved_bits_survive() {
        let raw = (1u64 << 63) | 0b101;
        let f = PlatformFeatures::from_bits(raw);
        assert_eq!(f.into_bits(), raw);
        assert!(f.supports(PlatformFeature::MmioTimerValue));
        assert!(f.supports(PlatformFeature::Pmp));
        assert_eq!(f.iter().count(), 2);
    }

    #[test]
    fn displays_feature_names() {
        assert_eq!(PlatformFeatures::new().to_string(), "none");
        assert_eq!(PlatformFeature::HartHotplug.to_string(), "hart-hotplug");
        assert_eq!(
            PlatformFeatures::DEFAULT.to_string(),
            "mmio-timer-value,pmp,scounteren,mcounteren,mfaults-delegation"
        );
        assert_eq!(
            PlatformFeatures::from_bits((1 << 40) | PlatformFeature::Pmp.bit()).to_string(),
            "pmp"
        );
    }
}
