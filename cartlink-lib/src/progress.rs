/// Progress update sent during a dump or flash.
///
/// Transfers report through a `&dyn Fn(TransferProgress)` callback so the
/// CLI can drive a progress bar while the protocol code stays free of any
/// display concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferProgress {
    /// The transfer is about to start
    Started {
        /// Number of blocks (dump) or banks (flash)
        units: usize,
        /// Size of each unit in bytes
        unit_size: usize,
    },

    /// One more unit has been transferred
    Unit {
        /// Units finished so far, counting from 1
        done: usize,
        /// Total units in the transfer
        total: usize,
    },

    /// Every unit has been transferred
    Completed {
        /// Total bytes moved
        bytes: u64,
    },
}

impl TransferProgress {
    pub fn started(units: usize, unit_size: usize) -> Self {
        Self::Started { units, unit_size }
    }

    pub fn unit(done: usize, total: usize) -> Self {
        Self::Unit { done, total }
    }

    pub fn completed(bytes: u64) -> Self {
        Self::Completed { bytes }
    }
}

/// A progress callback that ignores every update.
pub fn no_progress(_: TransferProgress) {}
