//! Storage de snapshots en archivos JSON.
//!
//! Layout: `<root>/<session_id>/<scenario_alias>.json`. Los componentes de la
//! clave se validan para que no puedan escapar de `root`.
use flow_core::{ContextStorage, CoreFlowError, FlowSnapshot, SessionKey};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Abre (creando si hace falta) el directorio raíz.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| PersistenceError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: &SessionKey) -> Result<PathBuf, PersistenceError> {
        let session = checked_component(&key.session_id)?;
        let alias = checked_component(&key.scenario_alias)?;
        Ok(self.root.join(session).join(format!("{alias}.json")))
    }

    pub fn read(&self, key: &SessionKey) -> Result<Option<FlowSnapshot>, PersistenceError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(&path, e)),
        };
        serde_json::from_slice(&bytes).map(Some)
                                      .map_err(|e| PersistenceError::json(&path, e))
    }

    pub fn write(&self, key: &SessionKey, snapshot: &FlowSnapshot) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
        }
        let content = serde_json::to_vec_pretty(snapshot).map_err(|e| PersistenceError::json(&path, e))?;
        atomic_write_file(&path, &content).map_err(|e| PersistenceError::io(&path, e))?;
        debug!("saved snapshot {} ({} history entries)", key, snapshot.history.len());
        Ok(())
    }

    pub fn delete(&self, key: &SessionKey) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(&path, e)),
        }
    }
}

impl ContextStorage for JsonFileStorage {
    fn load(&self, key: &SessionKey) -> Result<Option<FlowSnapshot>, CoreFlowError> {
        Ok(self.read(key)?)
    }

    fn save(&self, key: &SessionKey, snapshot: &FlowSnapshot) -> Result<(), CoreFlowError> {
        Ok(self.write(key, snapshot)?)
    }

    fn remove(&self, key: &SessionKey) -> Result<(), CoreFlowError> {
        Ok(self.delete(key)?)
    }
}

fn checked_component(value: &str) -> Result<&str, PersistenceError> {
    let ok = !value.is_empty()
             && value != "."
             && value != ".."
             && value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(value)
    } else {
        Err(PersistenceError::InvalidKey(value.to_string()))
    }
}

fn atomic_write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent()
                     .ok_or_else(|| std::io::Error::other("path has no parent"))?;
    let tmp_name = format!(".{}.tmp-{}-{}",
                           path.file_name().and_then(|v| v.to_str()).unwrap_or("snapshot"),
                           std::process::id(),
                           SystemTime::now().duration_since(UNIX_EPOCH)
                                            .map(|d| d.as_nanos())
                                            .unwrap_or(0));
    let tmp_path = parent.join(tmp_name);
    if let Err(e) = write_then_rename(&tmp_path, path, content) {
        // el temporal no debe sobrevivir a una escritura fallida
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    sync_parent_dir(parent)
}

fn write_then_rename(tmp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    {
        let mut file = fs::OpenOptions::new().create_new(true)
                                             .write(true)
                                             .open(tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }
    fs::rename(tmp_path, path)
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> std::io::Result<()> {
    fs::File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) -> std::io::Result<()> {
    Ok(())
}
