//! # Firmware synchronization primitives
//!
//! Firmware state is written once by the boot hart and read by every hart
//! afterwards. [`OnceSlot`] captures exactly that: a single publication
//! followed by lock-free reads, usable from trap context.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod once_slot;

pub use once_slot::{OnceSlot, SlotTaken};
