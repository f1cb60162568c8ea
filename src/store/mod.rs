// src/store/mod.rs

pub mod seed;

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::AppError;

pub const USERS: &str = "users";
pub const SWAPS: &str = "swaps";
pub const CONVERSATIONS: &str = "conversations";
pub const SESSION: &str = "session";

/// The persistence substrate: opaque string values behind opaque keys.
/// The store imposes no schema beyond the JSON it writes through here.
#[async_trait]
pub trait Substrate: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// One JSON document per key under a data directory.
pub struct FileSubstrate {
    dir: PathBuf,
}

impl FileSubstrate {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Substrate for FileSubstrate {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        // Write-then-rename so a crash mid-write never leaves a truncated
        // collection behind.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// In-memory substrate for tests.
pub struct MemorySubstrate {
    map: Mutex<HashMap<String, String>>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySubstrate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Substrate for MemorySubstrate {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.map.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the named collections.
///
/// Every mutation in the system is "load the whole collection, compute the
/// new whole collection, save it back". A single writer mutex serializes
/// those cycles: callers take `begin_write()` for the full duration of a
/// read-modify-write, so no update can be lost between two concurrent
/// requests and no half-applied state is ever observable.
pub struct Store {
    substrate: Box<dyn Substrate>,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(substrate: Box<dyn Substrate>) -> Self {
        Self {
            substrate,
            write_lock: Mutex::new(()),
        }
    }

    /// File-backed store rooted at `dir`.
    pub fn open(dir: &str) -> Result<Self, AppError> {
        Ok(Self::new(Box::new(FileSubstrate::new(dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySubstrate::new()))
    }

    /// Serializes a full read-modify-write cycle. Hold the returned guard
    /// across every `load`/`save` pair that must be applied as one logical
    /// unit.
    pub async fn begin_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        match self.substrate.get(collection).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), AppError> {
        let raw = serde_json::to_string(records)?;
        self.substrate.set(collection, &raw).await
    }

    /// First-run bootstrap: initializes an absent collection with
    /// `defaults` exactly once, otherwise a no-op. Returns whether seeding
    /// happened.
    pub async fn ensure_seeded<T: Serialize + Sync>(
        &self,
        collection: &str,
        defaults: &[T],
    ) -> Result<bool, AppError> {
        let _guard = self.begin_write().await;
        if self.substrate.get(collection).await?.is_some() {
            return Ok(false);
        }
        self.save(collection, defaults).await?;
        Ok(true)
    }

    /// The authenticated-session pointer: the id of whoever is logged in
    /// now, or none.
    pub async fn session(&self) -> Result<Option<String>, AppError> {
        match self.substrate.get(SESSION).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(None),
        }
    }

    pub async fn set_session(&self, user_id: Option<&str>) -> Result<(), AppError> {
        let raw = serde_json::to_string(&user_id)?;
        self.substrate.set(SESSION, &raw).await
    }
}
