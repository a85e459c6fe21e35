use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Name of the folder that holds everything the application persists.
const APP_DIR_NAME: &str = "libquality";
/// Slot that holds the serialized repository list.
const REPOSITORIES_FILE: &str = "repositories.json";

/// A single string-keyed storage slot for the repository store.
///
/// Production code uses [`FileBackend`]; tests substitute [`MemoryBackend`]
/// so they never touch the real persistence layer.
pub trait StorageBackend {
    /// Read the slot. `None` means no prior data exists.
    fn read(&self) -> Option<String>;
    /// Overwrite the slot with the full serialized payload.
    fn write(&self, payload: &str) -> io::Result<()>;
    /// Erase every key the application owns, not just this slot.
    fn clear(&self) -> io::Result<()>;
}

/// Stores the repository list as a JSON file in the platform data directory.
#[derive(Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Backend rooted at the platform data directory, falling back to the
    /// working directory when the platform reports none.
    pub fn new() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            dir: base.join(APP_DIR_NAME),
        }
    }

    /// Backend rooted at an explicit directory.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn slot_path(&self) -> PathBuf {
        self.dir.join(REPOSITORIES_FILE)
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Option<String> {
        fs::read_to_string(self.slot_path()).ok()
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(), payload)
    }

    fn clear(&self) -> io::Result<()> {
        // Removes the whole application directory, not just this slot.
        match fs::remove_dir_all(&self.dir) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory slot shared between clones, for tests and the integration
/// suite. Cloning yields a handle to the same slot, so a "fresh process
/// start" is modeled by building a second store over a cloned backend.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        *self.slot.lock().unwrap() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
