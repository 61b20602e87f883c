use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::SessionData;
use crate::error::Result;
use crate::models::User;

/// Read a JSON file, treating a missing file as the default value.
fn read_json_or_default<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Write a value as pretty JSON, creating parent directories as needed.
fn write_json<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load users from a JSON file. A missing file is an empty directory.
pub fn load_users<P: AsRef<Path>>(path: P) -> Result<Vec<User>> {
    read_json_or_default(path)
}

/// Save users to a JSON file.
pub fn save_users<P: AsRef<Path>>(path: P, users: &[User]) -> Result<()> {
    write_json(path, users)
}

/// Load stored sessions keyed by session id.
pub fn load_sessions<P: AsRef<Path>>(path: P) -> Result<HashMap<String, SessionData>> {
    read_json_or_default(path)
}

/// Save stored sessions keyed by session id.
pub fn save_sessions<P: AsRef<Path>>(path: P, sessions: &HashMap<String, SessionData>) -> Result<()> {
    write_json(path, sessions)
}
