use std::path::{Path, PathBuf};
use std::sync::Arc;

use liftlog_core::{ManualClock, UserId};
use liftlog_engine::{Engine, EngineConfig, EngineError};
use liftlog_storage::SqliteStorage;
use tempfile::TempDir;

use crate::{Catalog, TestDevice};

/// A database file shared by any number of devices, each holding its own
/// connection. Removed when the backend is dropped.
pub struct TestBackend {
    _dir: TempDir,
    path: PathBuf,
    catalog: Catalog,
    config: EngineConfig,
    clock: Arc<ManualClock>,
}

impl TestBackend {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let dir = TempDir::new()
            .map_err(|e| EngineError::Config(format!("failed to create temp dir: {e}")))?;
        let path = dir.path().join("liftlog.db");

        let catalog = Catalog::new();
        let mut storage = SqliteStorage::open(&path)?;
        catalog.install(&mut storage)?;

        Ok(Self {
            _dir: dir,
            path,
            catalog,
            config,
            clock: Arc::new(ManualClock::new(1_700_000_000_000)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Clock shared by every device of this backend.
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Open a new connection acting for `user_id`.
    pub fn device(&self, user_id: UserId) -> Result<TestDevice, EngineError> {
        let storage = SqliteStorage::open(&self.path)?;
        let engine = Engine::with_config(user_id, storage, self.config.clone())
            .with_clock(self.clock.clone());
        Ok(TestDevice::new(engine))
    }

    pub fn new_user(&self) -> Result<TestDevice, EngineError> {
        self.device(UserId::new())
    }
}
