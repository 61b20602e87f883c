use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{ReorderError, Result};
use crate::state::{load_sessions, save_sessions};

/// What a store keeps for one session between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// One-time values, dropped once read.
    #[serde(default)]
    pub flash: BTreeMap<String, String>,

    /// Unix time (seconds) after which the session no longer resolves.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl SessionData {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// A session as seen by one request.
///
/// A session without an id has never been committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    id: Option<String>,
    data: SessionData,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_data(id: String, data: SessionData) -> Self {
        Self { id: Some(id), data }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.values.contains_key(key) || self.data.flash.contains_key(key)
    }

    /// Read a value. A flashed value is returned once and then forgotten.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if let Some(value) = self.data.flash.remove(key) {
            return Some(value);
        }
        self.data.values.get(key).cloned()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.values.insert(key.into(), value.into());
    }

    /// Store a value that can be read exactly once.
    pub fn flash(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.flash.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, key: &str) {
        self.data.values.remove(key);
        self.data.flash.remove(key);
    }
}

/// Where sessions live between requests.
///
/// Cookies carry only the session id; the data stays in the store.
pub trait SessionStore {
    /// Resolve the session named by a `Cookie` header. Unknown or missing ids
    /// give a fresh, empty session.
    fn get_session(&self, cookie_header: Option<&str>) -> Result<Session>;

    /// Persist the session and return the `Set-Cookie` value that names it.
    fn commit_session(&self, session: &mut Session) -> Result<String>;

    /// Forget the session and return a `Set-Cookie` value that expires it.
    fn destroy_session(&self, session: Session) -> Result<String>;
}

/// Cookie naming and lifetime shared by every store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
}

impl Default for CookieSettings {
    fn default() -> Self {
        SessionConfig::default().into()
    }
}

impl From<SessionConfig> for CookieSettings {
    fn from(config: SessionConfig) -> Self {
        Self {
            name: config.cookie_name,
            max_age_secs: config.max_age_secs,
        }
    }
}

impl CookieSettings {
    /// Pull this cookie's value out of a `Cookie` header.
    pub fn session_id(&self, cookie_header: Option<&str>) -> Option<String> {
        cookie_header?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| name.trim() == self.name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// `Set-Cookie` value naming a session.
    pub fn serialize(&self, session_id: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, session_id, self.max_age_secs
        )
    }

    /// When a session committed at `now` stops resolving.
    pub fn expires_at(&self, now: i64) -> i64 {
        now.saturating_add(i64::try_from(self.max_age_secs).unwrap_or(i64::MAX))
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn expired(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.name)
    }
}

fn lock_poisoned() -> ReorderError {
    ReorderError::Session("session store lock poisoned".to_string())
}

/// Session store backed by a map in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    cookie: CookieSettings,
    sessions: Mutex<HashMap<String, SessionData>>,
}

impl MemorySessionStore {
    pub fn new(cookie: CookieSettings) -> Self {
        Self {
            cookie,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get_session(&self, cookie_header: Option<&str>) -> Result<Session> {
        let Some(id) = self.cookie.session_id(cookie_header) else {
            return Ok(Session::new());
        };

        let sessions = self.sessions.lock().map_err(|_| lock_poisoned())?;
        Ok(match sessions.get(&id) {
            Some(data) if !data.is_expired(unix_now()) => Session::with_data(id, data.clone()),
            _ => Session::new(),
        })
    }

    fn commit_session(&self, session: &mut Session) -> Result<String> {
        let id = session
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        let now = unix_now();
        session.data.expires_at = Some(self.cookie.expires_at(now));

        let mut sessions = self.sessions.lock().map_err(|_| lock_poisoned())?;
        sessions.retain(|_, data| !data.is_expired(now));
        sessions.insert(id.clone(), session.data.clone());
        Ok(self.cookie.serialize(&id))
    }

    fn destroy_session(&self, session: Session) -> Result<String> {
        if let Some(id) = session.id {
            let mut sessions = self.sessions.lock().map_err(|_| lock_poisoned())?;
            sessions.remove(&id);
        }
        Ok(self.cookie.expired())
    }
}

/// Session store backed by a JSON file, re-read on every call.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    cookie: CookieSettings,
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: AsRef<Path>>(path: P, cookie: CookieSettings) -> Self {
        Self {
            cookie,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get_session(&self, cookie_header: Option<&str>) -> Result<Session> {
        let Some(id) = self.cookie.session_id(cookie_header) else {
            return Ok(Session::new());
        };

        let mut sessions = load_sessions(&self.path)?;
        Ok(match sessions.remove(&id) {
            Some(data) if !data.is_expired(unix_now()) => Session::with_data(id, data),
            Some(_) => {
                tracing::debug!("session expired, starting fresh");
                Session::new()
            }
            None => {
                tracing::debug!("unknown session id, starting fresh");
                Session::new()
            }
        })
    }

    fn commit_session(&self, session: &mut Session) -> Result<String> {
        let id = session
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        let now = unix_now();
        session.data.expires_at = Some(self.cookie.expires_at(now));

        let mut sessions = load_sessions(&self.path)?;
        sessions.retain(|_, data| !data.is_expired(now));
        sessions.insert(id.clone(), session.data.clone());
        save_sessions(&self.path, &sessions)?;
        Ok(self.cookie.serialize(&id))
    }

    fn destroy_session(&self, session: Session) -> Result<String> {
        if let Some(id) = session.id {
            let mut sessions = load_sessions(&self.path)?;
            if sessions.remove(&id).is_some() {
                save_sessions(&self.path, &sessions)?;
            }
        }
        Ok(self.cookie.expired())
    }
}
