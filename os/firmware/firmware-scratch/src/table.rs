use crate::hart_id::HartIdSource;
use crate::scratch::HartScratch;
use firmware_platform::{HartContext, HartId, Platform, PlatformDescriptor};
use firmware_sync::OnceSlot;
use log::{debug, trace};

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScratchError {
    #[error("hart {hart} is outside a scratch table of {capacity} harts")]
    HartOutOfRange { hart: HartId, capacity: usize },
    #[error("scratch for hart {0} is already installed")]
    AlreadyInstalled(HartId),
}

/// Hart-indexed, write-once table of [`HartScratch`] records.
pub struct ScratchTable<'a, const N: usize> {
    slots: [OnceSlot<HartScratch<'a>>; N],
}

impl<const N: usize> Default for ScratchTable<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> ScratchTable<'a, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { OnceSlot::new() }; N],
        }
    }

    /// Number of harts the table can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Publishes the record for `scratch.hart_id()`.
    ///
    /// # Errors
    /// The hart does not fit the table, or its record was installed before.
    pub fn install(&self, scratch: HartScratch<'a>) -> Result<&HartScratch<'a>, ScratchError> {
        let hart = scratch.hart_id();
        let slot = self
            .slots
            .get(hart.as_usize())
            .ok_or(ScratchError::HartOutOfRange { hart, capacity: N })?;

        let installed = slot
            .set(scratch)
            .map_err(|_| ScratchError::AlreadyInstalled(hart))?;
        trace!("Installed scratch for hart {hart}");
        Ok(installed)
    }

    /// Installs one record per enabled hart of `desc`, each derived from
    /// `template` with its hart id and descriptor filled in.
    ///
    /// Returns the number of records installed.
    ///
    /// # Errors
    /// Stops at the first hart that cannot be installed.
    pub fn populate(
        &self,
        desc: &'a PlatformDescriptor<'a>,
        template: HartScratch<'a>,
    ) -> Result<usize, ScratchError> {
        let mut installed = 0;
        for hart in Platform::from(desc).enabled_harts() {
            self.install(template.with_hart_id(hart).with_platform(Some(desc)))?;
            installed += 1;
        }
        debug!(
            "Populated scratch for {installed} of {} harts on {} (features: {})",
            desc.hart_count(),
            desc.name(),
            desc.features()
        );
        Ok(installed)
    }

    /// The record of `hart`, if installed.
    #[inline]
    #[must_use]
    pub fn get(&self, hart: HartId) -> Option<&HartScratch<'a>> {
        self.slots.get(hart.as_usize()).and_then(OnceSlot::get)
    }
}

/// The executing hart's view of a [`ScratchTable`].
pub struct ThisHart<'t, 'a, const N: usize, S> {
    table: &'t ScratchTable<'a, N>,
    source: S,
}

impl<'t, 'a, const N: usize, S: HartIdSource> ThisHart<'t, 'a, N, S> {
    #[must_use]
    pub const fn new(table: &'t ScratchTable<'a, N>, source: S) -> Self {
        Self { table, source }
    }

    /// The executing hart's scratch record, if installed.
    #[must_use]
    pub fn scratch(&self) -> Option<&'t HartScratch<'a>> {
        self.table.get(self.source.hart_id())
    }

    /// Dispatch handle for the executing hart.
    #[must_use]
    pub fn dispatch(&self) -> Platform<'t> {
        Platform::new(self.scratch().and_then(HartScratch::platform))
    }
}

impl<const N: usize, S: HartIdSource> HartContext for ThisHart<'_, '_, N, S> {
    fn current_hart(&self) -> HartId {
        self.source.hart_id()
    }

    fn platform(&self) -> Option<&PlatformDescriptor<'_>> {
        self.scratch().and_then(HartScratch::platform)
    }
}
