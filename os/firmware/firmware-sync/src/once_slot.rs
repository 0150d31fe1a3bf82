use core::{
    cell::UnsafeCell,
    fmt,
    mem::MaybeUninit,
    sync::atomic::{AtomicU8, Ordering},
};

const EMPTY: u8 = 0;
const WRITING: u8 = 1;
const PUBLISHED: u8 = 2;

/// A slot that is written at most once and read lock-free afterwards.
///
/// Readers never spin: [`OnceSlot::get`] is a single acquire load and
/// returns `None` until the writer has published. Nobody waits; a second
/// writer racing the first loses with [`SlotTaken`].
///
/// ```
/// use firmware_sync::OnceSlot;
///
/// static BOOT_HART: OnceSlot<u32> = OnceSlot::new();
///
/// assert!(BOOT_HART.get().is_none());
/// BOOT_HART.set(0).unwrap();
/// assert_eq!(BOOT_HART.get(), Some(&0));
/// assert!(BOOT_HART.set(1).is_err());
/// ```
pub struct OnceSlot<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

/// Returned by [`OnceSlot::set`] when the slot already holds a value.
///
/// Carries back the rejected value so the caller may reuse or drop it.
#[derive(Eq, PartialEq)]
pub struct SlotTaken<T>(pub T);

impl<T> fmt::Debug for SlotTaken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlotTaken(..)")
    }
}

impl<T> Default for OnceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OnceSlot<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns `Some(&T)` once a value has been published.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        if self.state.load(Ordering::Acquire) == PUBLISHED {
            // SAFETY: PUBLISHED is only stored after the write completed.
            Some(unsafe { &*(*self.value.get()).as_ptr() })
        } else {
            None
        }
    }

    /// Whether a value has been published.
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.state.load(Ordering::Acquire) == PUBLISHED
    }

    /// Publishes `value` if the slot is still empty.
    ///
    /// # Errors
    /// Returns the value wrapped in [`SlotTaken`] if another writer got there
    /// first, including one that is still in the middle of writing.
    pub fn set(&self, value: T) -> Result<&T, SlotTaken<T>> {
        if self
            .state
            .compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(SlotTaken(value));
        }

        unsafe {
            (*self.value.get()).write(value);
        }
        self.state.store(PUBLISHED, Ordering::Release);

        // SAFETY: just published
        Ok(unsafe { &*(*self.value.get()).as_ptr() })
    }
}

impl<T> Drop for OnceSlot<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == PUBLISHED {
            // SAFETY: exclusive access and the value was initialized.
            unsafe { self.value.get_mut().assume_init_drop() }
        }
    }
}

// Safety: the value is written once before publication and only shared afterwards.
unsafe impl<T: Sync + Send> Sync for OnceSlot<T> {}
unsafe impl<T: Send> Send for OnceSlot<T> {}
