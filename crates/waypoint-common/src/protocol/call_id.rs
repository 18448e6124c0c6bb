use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static PROCESS_CALL_IDS: OnceLock<CallIdCounter> = OnceLock::new();

/// Source of JSON-RPC call identifiers.
///
/// Clones share the same underlying counter, so every holder draws from a
/// single monotonically increasing sequence. Each call to [`next_id`]
/// consumes one value; identifiers are never handed out twice.
///
/// Clients use [`CallIdCounter::process_wide`] unless one is injected, which
/// keeps ids unique across every client in the process.
///
/// [`next_id`]: CallIdCounter::next_id
#[derive(Debug, Clone)]
pub struct CallIdCounter {
    next: Arc<AtomicU64>,
}

impl CallIdCounter {
    /// A fresh counter whose first id is 0.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// The counter shared by the whole process.
    pub fn process_wide() -> Self {
        PROCESS_CALL_IDS.get_or_init(CallIdCounter::new).clone()
    }

    /// Takes the next id.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The id the next call will receive, without consuming it.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Whether both handles draw from the same sequence.
    pub fn shares_sequence_with(&self, other: &CallIdCounter) -> bool {
        Arc::ptr_eq(&self.next, &other.next)
    }
}

impl Default for CallIdCounter {
    /// The process-wide counter; use [`CallIdCounter::new`] for an isolated one.
    fn default() -> Self {
        Self::process_wide()
    }
}
