//! # Platform Descriptor
//!
//! One [`PlatformDescriptor`] exists per board. It is built once, in `const`
//! context or by the boot hart before any other hart runs, and is only read
//! afterwards, so every hart may hold a shared reference without locking.
//!
//! ## Layout
//!
//! The descriptor is `#[repr(C)]` and keeps the historical fixed-offset
//! prefix that boot-stage assembly reads before structure-aware code runs:
//!
//! ```text
//! 0x00 ┌──────────────────────────────┐
//!      │ name        [u8; 64]         │
//! 0x40 ├──────────────────────────────┤
//!      │ features    u64              │
//! 0x48 ├──────────────────────────────┤
//!      │ hart_count  u32              │
//! 0x4C ├──────────────────────────────┤
//!      │ hart_stack_size u32          │
//! 0x50 ├──────────────────────────────┤
//!      │ disabled_hart_mask, ops ...  │
//!      └──────────────────────────────┘
//! ```

use crate::features::PlatformFeatures;
use crate::hart::{HartMask, MAX_HARTS};
use crate::ops::PlatformOps;
use core::fmt;
use core::mem::offset_of;

/// Byte offset of the name in [`PlatformDescriptor`].
pub const NAME_OFFSET: usize = 0x00;
/// Byte offset of the feature mask in [`PlatformDescriptor`].
pub const FEATURES_OFFSET: usize = 0x40;
/// Byte offset of the hart count in [`PlatformDescriptor`].
pub const HART_COUNT_OFFSET: usize = 0x48;
/// Byte offset of the per-hart stack size in [`PlatformDescriptor`].
pub const HART_STACK_SIZE_OFFSET: usize = 0x4C;

const NAME_CAPACITY: usize = 64;

/// Per-hart stack size used unless the board configures one.
pub const DEFAULT_HART_STACK_SIZE: u32 = 8192;

/// Errors raised while building a descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("platform name is {len} bytes long, at most {max} fit")]
    NameTooLong { len: usize, max: usize },
    #[error("platform name contains a NUL byte at offset {0}")]
    NameContainsNul(usize),
    #[error("{count} harts do not fit a hart mask of {max}")]
    TooManyHarts { count: u32, max: u32 },
}

/// Fixed-size, NUL-padded platform name.
///
/// For display and diagnostics only; nothing parses it.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct PlatformName([u8; NAME_CAPACITY]);

impl PlatformName {
    /// Size of the name buffer, including the terminating NUL.
    pub const CAPACITY: usize = NAME_CAPACITY;
    /// Longest name in bytes.
    pub const MAX_LEN: usize = Self::CAPACITY - 1;

    /// Copies `name` into a fixed buffer.
    ///
    /// # Errors
    /// The name is longer than [`MAX_LEN`](Self::MAX_LEN) bytes or contains a NUL.
    pub const fn new(name: &str) -> Result<Self, DescriptorError> {
        let bytes = name.as_bytes();
        if bytes.len() > Self::MAX_LEN {
            return Err(DescriptorError::NameTooLong {
                len: bytes.len(),
                max: Self::MAX_LEN,
            });
        }

        let mut buf = [0u8; Self::CAPACITY];
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == 0 {
                return Err(DescriptorError::NameContainsNul(i));
            }
            buf[i] = bytes[i];
            i += 1;
        }
        Ok(Self(buf))
    }

    /// Wraps a buffer produced elsewhere, e.g. by a board image.
    #[must_use]
    pub const fn from_raw(raw: [u8; Self::CAPACITY]) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::CAPACITY] {
        &self.0
    }

    /// The text up to the first NUL.
    ///
    /// A foreign buffer with broken UTF-8 yields its longest valid prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(Self::CAPACITY);
        let text = &self.0[..len];
        match core::str::from_utf8(text) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&text[..e.valid_up_to()]).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity, topology and entry points of one board.
///
/// ```
/// use firmware_platform::{HartMask, PlatformDescriptor, PlatformFeatures, PlatformOps};
///
/// struct Board;
/// impl PlatformOps for Board {}
///
/// static BOARD: PlatformDescriptor<'static> = PlatformDescriptor::new("example,board", &Board)
///     .with_features(PlatformFeatures::DEFAULT)
///     .with_harts(4, 4096)
///     .with_disabled_harts(HartMask::from_bits(0b0001));
///
/// assert_eq!(BOARD.name().as_str(), "example,board");
/// assert_eq!(BOARD.hart_count(), 4);
/// ```
#[repr(C)]
#[derive(Copy, Clone)]
pub struct PlatformDescriptor<'a> {
    name: PlatformName,
    features: u64,
    hart_count: u32,
    hart_stack_size: u32,
    disabled_hart_mask: HartMask,
    ops: &'a dyn PlatformOps,
}

const _: () = {
    assert!(offset_of!(PlatformDescriptor<'static>, name) == NAME_OFFSET);
    assert!(offset_of!(PlatformDescriptor<'static>, features) == FEATURES_OFFSET);
    assert!(offset_of!(PlatformDescriptor<'static>, hart_count) == HART_COUNT_OFFSET);
    assert!(offset_of!(PlatformDescriptor<'static>, hart_stack_size) == HART_STACK_SIZE_OFFSET);
};

impl<'a> PlatformDescriptor<'a> {
    /// Starts a descriptor for a single-hart board with no advertised features.
    ///
    /// # Panics
    /// If the name is rejected by [`PlatformName::new`]. In a `static`
    /// initializer this is a compile-time error.
    #[must_use]
    pub const fn new(name: &str, ops: &'a dyn PlatformOps) -> Self {
        match Self::try_new(name, ops) {
            Ok(desc) => desc,
            Err(DescriptorError::NameTooLong { .. }) => panic!("platform name too long"),
            Err(_) => panic!("invalid platform name"),
        }
    }

    /// Fallible form of [`new`](Self::new).
    ///
    /// # Errors
    /// See [`PlatformName::new`].
    pub const fn try_new(name: &str, ops: &'a dyn PlatformOps) -> Result<Self, DescriptorError> {
        match PlatformName::new(name) {
            Ok(name) => Ok(Self {
                name,
                features: 0,
                hart_count: 1,
                hart_stack_size: DEFAULT_HART_STACK_SIZE,
                disabled_hart_mask: HartMask::EMPTY,
                ops,
            }),
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub const fn with_features(mut self, features: PlatformFeatures) -> Self {
        self.features = features.into_bits();
        self
    }

    /// Sets the hart topology.
    ///
    /// # Panics
    /// If `count` exceeds [`MAX_HARTS`]; a compile-time error in `const` context.
    #[must_use]
    pub const fn with_harts(self, count: u32, stack_size: u32) -> Self {
        match self.try_with_harts(count, stack_size) {
            Ok(desc) => desc,
            Err(_) => panic!("hart count exceeds the hart mask width"),
        }
    }

    /// Fallible form of [`with_harts`](Self::with_harts).
    ///
    /// # Errors
    /// [`DescriptorError::TooManyHarts`] if `count` exceeds [`MAX_HARTS`].
    pub const fn try_with_harts(
        mut self,
        count: u32,
        stack_size: u32,
    ) -> Result<Self, DescriptorError> {
        if count > MAX_HARTS {
            return Err(DescriptorError::TooManyHarts {
                count,
                max: MAX_HARTS,
            });
        }
        self.hart_count = count;
        self.hart_stack_size = stack_size;
        Ok(self)
    }

    #[must_use]
    pub const fn with_disabled_harts(mut self, mask: HartMask) -> Self {
        self.disabled_hart_mask = mask;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &PlatformName {
        &self.name
    }

    #[must_use]
    pub const fn features(&self) -> PlatformFeatures {
        PlatformFeatures::from_bits(self.features)
    }

    #[must_use]
    pub const fn hart_count(&self) -> u32 {
        self.hart_count
    }

    /// Bytes reserved per hart for exception and interrupt handling.
    #[must_use]
    pub const fn hart_stack_size(&self) -> u32 {
        self.hart_stack_size
    }

    #[must_use]
    pub const fn disabled_harts(&self) -> HartMask {
        self.disabled_hart_mask
    }

    #[must_use]
    pub const fn ops(&self) -> &'a dyn PlatformOps {
        self.ops
    }
}

impl fmt::Debug for PlatformDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDescriptor")
            .field("name", &self.name)
            .field("features", &self.features())
            .field("hart_count", &self.hart_count)
            .field("hart_stack_size", &self.hart_stack_size)
            .field("disabled_hart_mask", &self.disabled_hart_mask)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::NoOps;

    #[test]
    fn name_limits() {
        let longest = "x".repeat(PlatformName::MAX_LEN);
        assert_eq!(PlatformName::new(&longest).unwrap().as_str(), longest);

        let too_long = "x".repeat(PlatformName::CAPACITY);
        assert_eq!(
            PlatformName::new(&too_long),
            Err(DescriptorError::NameTooLong { len: 64, max: 63 })
        );
        assert_eq!(
            PlatformName::new("a\0b"),
            Err(DescriptorError::NameContainsNul(1))
        );
    }

    #[test]
    fn foreign_name_with_bad_utf8_keeps_valid_prefix() {
        let mut raw = [0u8; PlatformName::CAPACITY];
        raw[..4].copy_from_slice(b"ab\xffc");
        assert_eq!(PlatformName::from_raw(raw).as_str(), "ab");

        let full = PlatformName::from_raw([b'z'; PlatformName::CAPACITY]);
        assert_eq!(full.as_str().len(), PlatformName::CAPACITY);
    }

    #[test]
    fn hart_count_bounded_by_mask_width() {
        let d = PlatformDescriptor::new("b", &NoOps);
        assert!(d.try_with_harts(MAX_HARTS, 4096).is_ok());
        assert_eq!(
            d.try_with_harts(MAX_HARTS + 1, 4096).unwrap_err(),
            DescriptorError::TooManyHarts { count: 65, max: 64 }
        );
    }

    #[test]
    fn defaults() {
        let d = PlatformDescriptor::new("b", &NoOps);
        assert_eq!(d.hart_count(), 1);
        assert_eq!(d.hart_stack_size(), DEFAULT_HART_STACK_SIZE);
        assert_eq!(d.features().into_bits(), 0);
        assert!(d.disabled_harts().is_empty());
    }

    #[test]
    fn prefix_offsets_hold_in_memory() {
        let d = PlatformDescriptor::new("layout", &NoOps)
            .with_features(PlatformFeatures::from_bits(0x2A))
            .with_harts(5, 0x2000);
        let base = core::ptr::from_ref(&d).cast::<u8>();
        unsafe {
            assert_eq!(*base.add(NAME_OFFSET), b'l');
            assert_eq!(base.add(FEATURES_OFFSET).cast::<u64>().read_unaligned(), 0x2A);
            assert_eq!(base.add(HART_COUNT_OFFSET).cast::<u32>().read_unaligned(), 5);
            assert_eq!(
                base.add(HART_STACK_SIZE_OFFSET).cast::<u32>().read_unaligned(),
                0x2000
            );
        }
    }
}
