use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;

use crate::tournament::Tournament;

// Where the tournament lives between mutations. `save` runs inside every
// mutating operation before the new state is committed; `None` means no
// tournament is running.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save(&self, snapshot: Option<&Tournament>) -> anyhow::Result<()>;
    async fn load(&self) -> anyhow::Result<Option<Tournament>>;
}

// Placeholder for consumers that wire up persistence themselves.
pub struct UnimplementedStorage;

#[async_trait]
impl Storage for UnimplementedStorage {
    async fn save(&self, _: Option<&Tournament>) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("save() unimplemented"))
    }
    async fn load(&self) -> anyhow::Result<Option<Tournament>> {
        Err(anyhow::Error::msg("load() unimplemented"))
    }
}

// Keeps the snapshot in process memory. Enough for tests and for UIs that do
// not care about surviving restarts.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<Tournament>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save(&self, snapshot: Option<&Tournament>) -> anyhow::Result<()> {
        *self.snapshot.lock().unwrap() = snapshot.cloned();
        Ok(())
    }
    async fn load(&self) -> anyhow::Result<Option<Tournament>> {
        Ok(self.snapshot.lock().unwrap().clone())
    }
}

// A single JSON document, rewritten in full on every mutation. A missing
// file reads as "no tournament".
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self { JsonFileStorage { path: path.into() } }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn save(&self, snapshot: Option<&Tournament>) -> anyhow::Result<()> {
        let payload = serde_json::to_vec_pretty(&snapshot)?;
        async_std::fs::write(&self.path, payload)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    async fn load(&self) -> anyhow::Result<Option<Tournament>> {
        match async_std::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse {}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }
}
