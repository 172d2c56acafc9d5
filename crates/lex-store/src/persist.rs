//! Optional JSON snapshots
//!
//! Persistence is composed from the outside: a [`SnapshotWriter`] is an
//! ordinary subscriber that rewrites a JSON file after every transition.
//! The store contract does not change when one is attached.

use crate::error::PersistError;
use crate::patch::Merge;
use crate::store::Store;
use crate::subscription::Subscription;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Subscriber that mirrors a store into a JSON file
#[derive(Debug)]
pub struct SnapshotWriter {
    path: PathBuf,
    subscription: Subscription,
    writes: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl SnapshotWriter {
    /// Write the current state to `path` and keep it in sync
    ///
    /// # Errors
    /// Returns error if the initial snapshot cannot be written. Failures of
    /// later writes are logged and counted, see [`SnapshotWriter::failures`].
    pub fn attach<T>(store: &Store<T>, path: impl Into<PathBuf>) -> Result<Self, PersistError>
    where
        T: Merge + Clone + Serialize + Send + Sync + 'static,
    {
        let path = path.into();
        write_snapshot(&*store.get_state(), &path)?;

        let writes = Arc::new(AtomicU64::new(1));
        let failures = Arc::new(AtomicU64::new(0));

        let reader = store.clone();
        let target = path.clone();
        let written = Arc::clone(&writes);
        let failed = Arc::clone(&failures);
        let subscription = store.subscribe(move || {
            match write_snapshot(&*reader.get_state(), &target) {
                Ok(()) => {
                    written.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(store = reader.name(), "snapshot write failed: {}", e);
                }
            }
        });

        Ok(Self {
            path,
            subscription,
            writes,
            failures,
        })
    }

    /// Snapshot path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Successful writes, including the initial one
    #[inline]
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Failed writes after attach
    #[inline]
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Stop mirroring; the file keeps the last written snapshot
    pub fn stop(self) {
        self.subscription.unsubscribe();
    }
}

/// Encode `state` as pretty JSON into `path`
///
/// The JSON goes to a sibling `.tmp` file that is then renamed over `path`,
/// so readers see either the previous snapshot or the new one.
///
/// # Errors
/// Returns error on encoding or IO failure
pub fn write_snapshot<T: Serialize>(state: &T, path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_vec_pretty(state).map_err(PersistError::Encode)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|e| PersistError::io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistError::io_error(path, e))
}

/// Decode a snapshot written by [`write_snapshot`]
///
/// # Errors
/// Returns error if the file is missing or does not match `T`
pub fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let bytes = fs::read(path).map_err(|e| PersistError::io_error(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| PersistError::decode_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    crate::define_state! {
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub(crate) struct Prefs, patch PrefsPatch {
            pub(crate) compact: bool,
            pub(crate) page: u32,
        }
    }

    #[test]
    fn attach_writes_initial_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = Store::new(Prefs::default());

        let writer = SnapshotWriter::attach(&store, &path).unwrap();

        assert_eq!(writer.writes(), 1);
        assert_eq!(load_snapshot::<Prefs>(&path).unwrap(), Prefs::default());
    }

    #[test]
    fn snapshot_follows_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = Store::new(Prefs::default());
        let writer = SnapshotWriter::attach(&store, &path).unwrap();

        store.set_state(PrefsPatch {
            compact: Some(true),
            page: Some(3),
        });

        let restored: Prefs = load_snapshot(&path).unwrap();
        assert_eq!(restored, *store.get_state());
        assert_eq!(writer.writes(), 2);
        assert_eq!(writer.failures(), 0);
    }

    #[test]
    fn snapshot_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, b"stale").unwrap();

        write_snapshot(
            &Prefs {
                compact: true,
                page: 2,
            },
            &path,
        )
        .unwrap();

        assert!(!path.with_extension("tmp").exists());
        assert_eq!(load_snapshot::<Prefs>(&path).unwrap().page, 2);
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn stop_ends_mirroring() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = Store::new(Prefs::default());
        SnapshotWriter::attach(&store, &path).unwrap().stop();

        store.set_state(PrefsPatch {
            page: Some(7),
            ..Default::default()
        });

        assert_eq!(load_snapshot::<Prefs>(&path).unwrap().page, 0);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn missing_snapshot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot::<Prefs>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn malformed_snapshot_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"{\"compact\": 1}").unwrap();

        let err = load_snapshot::<Prefs>(&path).unwrap_err();
        assert!(matches!(err, PersistError::Decode { .. }));
    }
}
