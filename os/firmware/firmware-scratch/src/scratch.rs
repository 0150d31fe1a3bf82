use firmware_platform::{HartId, PlatformDescriptor};
use utils_builder_derive::ConstBuilder;

/// Privilege mode the next boot stage is entered in.
#[repr(usize)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum NextMode {
    User = 0,
    #[default]
    Supervisor = 1,
    Machine = 3,
}

/// Per-hart scratch record.
///
/// Built with the generated `with_*` steps before it is installed, read-only
/// afterwards.
#[derive(Debug, Copy, Clone, ConstBuilder)]
pub struct HartScratch<'a> {
    /// Hart this record belongs to.
    hart_id: HartId,
    /// Descriptor of the board the hart runs on.
    platform: Option<&'a PlatformDescriptor<'a>>,
    /// Entry address of the next boot stage.
    next_addr: usize,
    /// Argument passed to the next boot stage, typically a device tree address.
    next_arg1: usize,
    /// Mode the next boot stage is entered in.
    next_mode: NextMode,
    /// Where a hart resuming from hotplug or suspend re-enters the firmware.
    warmboot_addr: usize,
}

impl HartScratch<'_> {
    #[must_use]
    pub const fn new(hart_id: HartId) -> Self {
        Self {
            hart_id,
            platform: None,
            next_addr: 0,
            next_arg1: 0,
            next_mode: NextMode::Supervisor,
            warmboot_addr: 0,
        }
    }
}
