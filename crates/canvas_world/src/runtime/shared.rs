//! Single-writer shell for multi-threaded hosts.

use std::sync::{Arc, Mutex};

use super::error::WorldError;
use super::snapshot::Snapshot;
use super::world::World;

/// Shares one world behind a single write lock, reproducing the serialized
/// ledger discipline: writers run to completion under the lock, readers
/// query a cloned snapshot of the most recently committed state without
/// holding it.
#[derive(Debug, Clone)]
pub struct SharedWorld {
    inner: Arc<Mutex<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(Mutex::new(world)),
        }
    }

    /// Runs one state-mutating operation under the write lock. The
    /// operation either fully commits or fully aborts; there are no
    /// suspension points inside it.
    pub fn write<T>(
        &self,
        op: impl FnOnce(&mut World) -> Result<T, WorldError>,
    ) -> Result<T, WorldError> {
        let mut world = self.inner.lock().expect("lock world");
        op(&mut world)
    }

    /// Consistent snapshot of the latest committed state. Queries against
    /// the returned value run lock-free.
    pub fn read_snapshot(&self) -> Snapshot {
        self.inner.lock().expect("lock world").snapshot()
    }

    /// Runs a side-effect-free query against the current state.
    pub fn read<T>(&self, query: impl FnOnce(&World) -> T) -> T {
        let world = self.inner.lock().expect("lock world");
        query(&world)
    }
}
