//! Concurrent update stress run
//!
//! Several threads select distinct documents on one store while a listener
//! counts notifications. Every selection must survive and every transition
//! must be announced.

use lex_views::{StoreContext, ViewsConfig};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Stress run outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StressReport {
    /// Writer threads
    pub threads: usize,
    /// Updates issued per thread
    pub updates_per_thread: usize,
    /// Documents selected at the end
    pub selected: usize,
    /// Listener calls observed
    pub notifications: u64,
    /// Wall time
    pub elapsed_ms: u128,
    /// No update lost and none unannounced
    pub success: bool,
}

impl StressReport {
    /// Updates issued across all threads
    #[must_use]
    pub fn expected(&self) -> usize {
        self.threads * self.updates_per_thread
    }
}

/// Run `threads` writers issuing `updates_per_thread` selections each
#[must_use]
pub fn run_stress(config: ViewsConfig, threads: usize, updates_per_thread: usize) -> StressReport {
    let context = StoreContext::new(config);
    let notifications = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&notifications);
    let _subscription = context.documents().store().subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let started = Instant::now();
    std::thread::scope(|scope| {
        for thread in 0..threads {
            let documents = context.documents();
            scope.spawn(move || {
                for update in 0..updates_per_thread {
                    documents.select_document(format!("t{thread}-d{update}"));
                }
            });
        }
    });
    let elapsed_ms = started.elapsed().as_millis();

    let selected = context.documents().get_state().selected_document_ids.len();
    let notifications = notifications.load(Ordering::SeqCst);
    let expected = threads * updates_per_thread;
    let success = selected == expected && notifications == expected as u64;
    if !success {
        tracing::error!(expected, selected, notifications, "stress run lost updates");
    }

    StressReport {
        threads,
        updates_per_thread,
        selected,
        notifications,
        elapsed_ms,
        success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_update_is_lost() {
        let report = run_stress(ViewsConfig::default(), 4, 50);
        assert_eq!(report.expected(), 200);
        assert_eq!(report.selected, 200);
        assert_eq!(report.notifications, 200);
        assert!(report.success);
    }
}
