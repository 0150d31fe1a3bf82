//! # Hart identities and hart sets

use core::fmt;

/// Number of hart identities a [`HartMask`] can represent.
pub const MAX_HARTS: u32 = u64::BITS;

/// Identity of a hardware thread.
///
/// Hart identities are dense: a board exposing `n` harts uses `0..n`.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HartId(u32);

impl HartId {
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Converts a register-width hart id. Ids past `u32::MAX` saturate to
    /// `u32::MAX`, which no hart table can hold.
    #[inline]
    #[must_use]
    pub fn saturating_from_usize(id: usize) -> Self {
        Self(u32::try_from(id).unwrap_or(u32::MAX))
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for HartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hart{}", self.0)
    }
}

impl fmt::Display for HartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for HartId {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl From<HartId> for u32 {
    #[inline]
    fn from(v: HartId) -> Self {
        v.as_u32()
    }
}

/// One bit per hart identity; bit `n` stands for [`HartId`] `n`.
///
/// Identities at or above [`MAX_HARTS`] cannot be represented. They are
/// never reported as members and cannot be inserted.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct HartMask(u64);

impl HartMask {
    pub const EMPTY: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn into_bits(self) -> u64 {
        self.0
    }

    /// Whether bit `hart` is set. Identities past the mask width read as clear.
    #[inline]
    #[must_use]
    pub const fn contains(self, hart: HartId) -> bool {
        match 1u64.checked_shl(hart.as_u32()) {
            Some(bit) => self.0 & bit != 0,
            None => false,
        }
    }

    /// Returns the mask with `hart` added; unrepresentable identities are ignored.
    #[inline]
    #[must_use]
    pub const fn with(self, hart: HartId) -> Self {
        match 1u64.checked_shl(hart.as_u32()) {
            Some(bit) => Self(self.0 | bit),
            None => self,
        }
    }

    #[inline]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for HartMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HartMask({:#b})", self.0)
    }
}

impl FromIterator<HartId> for HartMask {
    fn from_iter<I: IntoIterator<Item = HartId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_matches_bits() {
        let m = HartMask::from_bits(0b0100);
        assert!(m.contains(HartId::new(2)));
        assert!(!m.contains(HartId::new(0)));
        assert!(!m.contains(HartId::new(1)));
        assert!(!m.contains(HartId::new(3)));
    }

    #[test]
    fn highest_representable_hart() {
        let m = HartMask::EMPTY.with(HartId::new(63));
        assert_eq!(m.into_bits(), 1 << 63);
        assert!(m.contains(HartId::new(63)));
    }

    #[test]
    fn out_of_range_ids_are_never_members() {
        let all = HartMask::from_bits(u64::MAX);
        assert!(!all.contains(HartId::new(64)));
        assert!(!all.contains(HartId::new(u32::MAX)));
        assert_eq!(HartMask::EMPTY.with(HartId::new(64)), HartMask::EMPTY);
    }

    #[test]
    fn wide_ids_saturate() {
        assert_eq!(HartId::saturating_from_usize(5), HartId::new(5));
        assert_eq!(
            HartId::saturating_from_usize(u32::MAX as usize),
            HartId::new(u32::MAX)
        );
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            HartId::saturating_from_usize((1 << 32) + 3),
            HartId::new(u32::MAX)
        );
    }

    #[test]
    fn collect_from_ids() {
        let m: HartMask = [1, 3].into_iter().map(HartId::new).collect();
        assert_eq!(m.into_bits(), 0b1010);
        assert_eq!(m.count(), 2);
    }
}
