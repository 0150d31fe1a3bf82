//! # Per-Hart Scratch and Descriptor Resolution
//!
//! Every hart owns a small scratch record that tells it, among other
//! things, which [`PlatformDescriptor`] it was booted with. The records live
//! in a hart-indexed [`ScratchTable`]; a [`HartIdSource`] answers "which hart
//! am I", and [`ThisHart`] binds the two into a
//! [`HartContext`](firmware_platform::HartContext) that
//! [`Platform::this_hart`](firmware_platform::Platform::this_hart) consumes.
//!
//! The boot hart installs the records; afterwards lookups are a single
//! acquire load per call with no locking, which keeps them usable from trap
//! handlers.
//!
//! ```
//! use firmware_platform::{HartId, NoOps, Platform, PlatformDescriptor};
//! use firmware_scratch::{FixedHart, HartScratch, ScratchTable, ThisHart};
//!
//! static BOARD: PlatformDescriptor<'static> =
//!     PlatformDescriptor::new("doc", &NoOps).with_harts(2, 4096);
//! static SCRATCH: ScratchTable<'static, 2> = ScratchTable::new();
//!
//! SCRATCH.populate(&BOARD, HartScratch::new(HartId::new(0))).unwrap();
//!
//! let ctx = ThisHart::new(&SCRATCH, FixedHart(HartId::new(1)));
//! assert_eq!(Platform::this_hart(&ctx).name(), Some("doc"));
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod hart_id;
mod scratch;
mod table;

pub use hart_id::{FixedHart, HartIdSource};
#[cfg(all(feature = "riscv", any(target_arch = "riscv32", target_arch = "riscv64")))]
pub use hart_id::Mhartid;
pub use scratch::{HartScratch, NextMode};
pub use table::{ScratchError, ScratchTable, ThisHart};
