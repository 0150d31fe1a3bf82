use crate::hart::HartId;

/// Result of a dispatched platform operation.
pub type PlatformResult<T = ()> = Result<T, PlatformError>;

/// Failure of a dispatched platform operation.
///
/// A capability the board does not provide is **not** an error; see the
/// defaults documented on [`PlatformOps`](crate::PlatformOps).
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The board backend reported a failure. The code is passed through
    /// exactly as the backend produced it.
    #[error("platform backend failed with code {0}")]
    Backend(i32),
    /// [`Platform::ipi_sync_bounded`](crate::Platform::ipi_sync_bounded)
    /// gave up waiting for the acknowledgment.
    #[error("hart {target} did not acknowledge the IPI from hart {sender}")]
    IpiSyncTimeout { target: HartId, sender: HartId },
}

impl PlatformError {
    /// Generic failure status.
    pub const FAILED: i32 = -1;

    /// The raw status for callers speaking the C convention
    /// (`0` on success, anything else on failure).
    ///
    /// Never `0`: a backend error carrying `0` reports [`FAILED`](Self::FAILED).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Backend(0) => Self::FAILED,
            Self::Backend(code) => code,
            Self::IpiSyncTimeout { .. } => Self::FAILED,
        }
    }

    /// Converts a raw status into a result; only `0` succeeds.
    ///
    /// # Errors
    /// Any non-zero code becomes [`PlatformError::Backend`] unchanged.
    pub const fn check(status: i32) -> PlatformResult {
        if status == 0 {
            Ok(())
        } else {
            Err(Self::Backend(status))
        }
    }
}

/// Collapses a result into the raw C-convention status.
#[must_use]
pub const fn into_status(result: PlatformResult) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_codes_pass_through() {
        assert_eq!(PlatformError::check(0), Ok(()));
        assert_eq!(PlatformError::check(-5), Err(PlatformError::Backend(-5)));
        assert_eq!(into_status(Err(PlatformError::Backend(-5))), -5);
        assert_eq!(into_status(Ok(())), 0);
    }

    #[test]
    fn positive_codes_are_failures() {
        assert_eq!(PlatformError::check(1), Err(PlatformError::Backend(1)));
        assert_eq!(into_status(PlatformError::check(7)), 7);
    }

    #[test]
    fn backend_zero_never_reads_as_success() {
        assert_eq!(PlatformError::Backend(0).code(), PlatformError::FAILED);
        assert_eq!(into_status(Err(PlatformError::Backend(0))), PlatformError::FAILED);
    }

    #[test]
    fn timeout_maps_to_generic_failure() {
        let e = PlatformError::IpiSyncTimeout {
            target: HartId::new(1),
            sender: HartId::new(0),
        };
        assert_eq!(e.code(), PlatformError::FAILED);
    }
}
