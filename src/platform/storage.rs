//! Key/value persistence for small serde documents
//!
//! Missing keys load as `None`. A value that exists but fails to parse is an
//! error; callers log it and fall back to defaults.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{data_dir, load_from, save_to};

/// Load the value stored under `key`
pub fn load<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    parse(read_raw(key)?)
}

/// Store `value` under `key`, replacing what was there
pub fn save<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    write_raw(key, &serde_json::to_string_pretty(value)?)
}

fn parse<T: DeserializeOwned>(raw: Option<String>) -> Result<Option<T>, StorageError> {
    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw(key: &str) -> Result<Option<String>, StorageError> {
    native::read_raw(&native::data_dir()?, key)
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(key: &str, json: &str) -> Result<(), StorageError> {
    native::write_raw(&native::data_dir()?, key, json)
}

#[cfg(target_arch = "wasm32")]
fn read_raw(key: &str) -> Result<Option<String>, StorageError> {
    web::local_storage()?
        .get_item(&web::storage_key(key))
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
}

#[cfg(target_arch = "wasm32")]
fn write_raw(key: &str, json: &str) -> Result<(), StorageError> {
    web::local_storage()?
        .set_item(&web::storage_key(key), json)
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::error::StorageError;

    pub fn storage_key(key: &str) -> String {
        format!("arcade_pong_{key}")
    }

    pub fn local_storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("LocalStorage is not available".into()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use crate::error::StorageError;

    /// Overrides the data directory (tests, portable installs)
    const DATA_DIR_ENV: &str = "ARCADE_PONG_DATA_DIR";

    /// Directory holding one `<key>.json` file per stored value
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let base = dirs::data_dir()
            .ok_or_else(|| StorageError::Unavailable("could not determine data directory".into()))?;
        Ok(base.join("arcade-pong"))
    }

    fn file_for(dir: &Path, key: &str) -> PathBuf {
        dir.join(format!("{key}.json"))
    }

    pub(super) fn read_raw(dir: &Path, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(file_for(dir, key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(super) fn write_raw(dir: &Path, key: &str, json: &str) -> Result<(), StorageError> {
        fs::create_dir_all(dir)?;
        fs::write(file_for(dir, key), json)?;
        Ok(())
    }

    /// `load` against an explicit directory
    pub fn load_from<T: DeserializeOwned>(dir: &Path, key: &str) -> Result<Option<T>, StorageError> {
        super::parse(read_raw(dir, key)?)
    }

    /// `save` against an explicit directory
    pub fn save_to<T: Serialize>(dir: &Path, key: &str, value: &T) -> Result<(), StorageError> {
        write_raw(dir, key, &serde_json::to_string_pretty(value)?)
    }
}
