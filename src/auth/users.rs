use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ReorderError, Result};
use crate::models::User;
use crate::state::{load_users, save_users};

/// Lookup and registration of users by name.
pub trait UserDirectory {
    fn find_by_name(&self, name: &str) -> Result<Option<User>>;

    fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Register a new user under `name` with a fresh id.
    fn insert(&self, name: &str) -> Result<User>;
}

/// User directory held in memory.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: Mutex<Vec<User>>,
}

impl MemoryUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn users(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| ReorderError::Session("user directory lock poisoned".to_string()))
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        Ok(self.users()?.iter().find(|u| u.name == name).cloned())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users()?.iter().find(|u| u.id == id).cloned())
    }

    fn insert(&self, name: &str) -> Result<User> {
        let user = User::new(name);
        self.users()?.push(user.clone());
        Ok(user)
    }
}

/// User directory stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonUserDirectory {
    path: PathBuf,
}

impl JsonUserDirectory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored user, in insertion order.
    pub fn all_users(&self) -> Result<Vec<User>> {
        load_users(&self.path)
    }
}

impl UserDirectory for JsonUserDirectory {
    fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        Ok(load_users(&self.path)?.into_iter().find(|u| u.name == name))
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(load_users(&self.path)?.into_iter().find(|u| u.id == id))
    }

    fn insert(&self, name: &str) -> Result<User> {
        let mut users = load_users(&self.path)?;
        let user = User::new(name);
        users.push(user.clone());
        save_users(&self.path, &users)?;

        tracing::info!(user = %user.name, "registered user");
        Ok(user)
    }
}
