//! # Firmware Platform Abstraction
//!
//! This crate is the seam between the generic firmware runtime, which boots
//! and manages every hart before an operating system exists, and the
//! board-specific code that knows how to drive a particular machine.
//!
//! ## Overview
//!
//! The runtime needs console I/O, memory-protection information,
//! inter-processor interrupts, timers, interrupt-controller setup and a way
//! to reboot or power off. How each of those works differs per board, and
//! many boards implement only some of them. The crate splits the problem in
//! two:
//!
//! * **Capability descriptor** ([`PlatformDescriptor`]): identity, advertised
//!   [`PlatformFeatures`], hart topology and a reference to the board's
//!   [`PlatformOps`] implementation. Built once, read-only afterwards.
//! * **Safe dispatch** ([`Platform`]): one method per operation. It accepts a
//!   descriptor that may not have been resolved and a board that may not
//!   implement the operation, and in both cases returns the documented
//!   neutral default instead of faulting.
//!
//! ```text
//! runtime ──► Platform::this_hart(ctx) ──► Option<&PlatformDescriptor>
//!                  │                               │
//!                  ▼                               ▼
//!            Platform::timer_value()   ──►  dyn PlatformOps::timer_value()
//!                                          (default body: 0)
//! ```
//!
//! ## Defaults
//!
//! | Operation | Without descriptor or implementation |
//! |-----------|--------------------------------------|
//! | `*_init`, `console_init` | `Ok(())` |
//! | `pmp_region_count` | `0` |
//! | `pmp_region_info` | `Ok(PmpRegion::EMPTY)` |
//! | `console_getc` | `0` |
//! | `timer_value` | `0` |
//! | `console_putc`, `ipi_*`, `timer_event_*` | no-op |
//! | `system_reboot`, `system_shutdown` | `Ok(())`, machine keeps running |
//! | `name` | `None` |
//! | `hart_count`, `hart_stack_size` | `0` |
//! | `hart_disabled` | `false` |
//!
//! Absence is never reported as an error; only failures a board actually
//! returns surface as [`PlatformError`].
//!
//! ## Concurrency
//!
//! All harts share the descriptor without synchronization since nobody
//! writes it after construction. Synchronization needed to implement IPIs
//! or timers across harts belongs to the board. [`Platform::ipi_sync`] is
//! the only operation that may block, and it does so without a timeout;
//! [`Platform::ipi_sync_bounded`] is the bounded alternative.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod descriptor;
mod dispatch;
mod error;
mod features;
mod hart;
mod ops;
mod pmp;

pub use descriptor::{
    DEFAULT_HART_STACK_SIZE, DescriptorError, FEATURES_OFFSET, HART_COUNT_OFFSET,
    HART_STACK_SIZE_OFFSET, NAME_OFFSET, PlatformDescriptor, PlatformName,
};
pub use dispatch::{HartContext, Platform};
pub use error::{PlatformError, PlatformResult, into_status};
pub use features::{PlatformFeature, PlatformFeatures};
pub use hart::{HartId, HartMask, MAX_HARTS};
pub use ops::{BootKind, NoOps, PlatformOps, ResetType};
pub use pmp::{PmpProtection, PmpRegion};
