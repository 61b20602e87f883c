use crate::auth::{SessionStore, UserDirectory};
use crate::error::Result;
use crate::models::User;

/// Session key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "userId";

/// Session key for the one-time error shown on the login page.
pub const ERROR_KEY: &str = "error";

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

pub const MSG_CREDENTIALS_REQUIRED: &str = "Username and password are required";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username/password";
pub const MSG_LOGIN_FAILED: &str = "An error occurred during login";

/// Username and password as submitted. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// The username, if both fields were filled in.
    ///
    /// The password only has to be present; it is never checked.
    fn username_if_complete(&self) -> Option<&str> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        self.password.as_deref().filter(|p| !p.is_empty())?;
        Some(username)
    }
}

/// What a flow asks the caller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Go to `location`, storing `set_cookie` first when present.
    Redirect {
        location: String,
        set_cookie: Option<String>,
    },
    /// Show the page, with the flashed error if there was one.
    Render {
        error: Option<String>,
        set_cookie: String,
    },
}

impl FlowOutcome {
    fn redirect(location: &str, set_cookie: Option<String>) -> Self {
        FlowOutcome::Redirect {
            location: location.to_string(),
            set_cookie,
        }
    }

    pub fn set_cookie(&self) -> Option<&str> {
        match self {
            FlowOutcome::Redirect { set_cookie, .. } => set_cookie.as_deref(),
            FlowOutcome::Render { set_cookie, .. } => Some(set_cookie),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            FlowOutcome::Redirect { location, .. } => Some(location),
            FlowOutcome::Render { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FlowOutcome::Render { error, .. } => error.as_deref(),
            FlowOutcome::Redirect { .. } => None,
        }
    }
}

/// Loader shared by the login and signup pages.
///
/// Signed-in visitors are sent home; everyone else sees the page along with
/// any error flashed by a previous attempt.
pub fn login_loader(sessions: &dyn SessionStore, cookie: Option<&str>) -> Result<FlowOutcome> {
    let mut session = sessions.get_session(cookie)?;

    if session.has(USER_ID_KEY) {
        return Ok(FlowOutcome::redirect(HOME_PATH, None));
    }

    let error = session.get(ERROR_KEY);
    let set_cookie = sessions.commit_session(&mut session)?;
    Ok(FlowOutcome::Render { error, set_cookie })
}

pub fn signup_loader(sessions: &dyn SessionStore, cookie: Option<&str>) -> Result<FlowOutcome> {
    login_loader(sessions, cookie)
}

/// Sign in an existing user.
pub fn login_action(
    sessions: &dyn SessionStore,
    users: &dyn UserDirectory,
    cookie: Option<&str>,
    credentials: &Credentials,
) -> Result<FlowOutcome> {
    match try_login(sessions, users, cookie, credentials) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::error!(error = %e, "login error");
            flash_login_failure(sessions, cookie)
        }
    }
}

/// Sign up, or sign in when the name is already registered.
pub fn signup_action(
    sessions: &dyn SessionStore,
    users: &dyn UserDirectory,
    cookie: Option<&str>,
    credentials: &Credentials,
) -> Result<FlowOutcome> {
    match try_signup(sessions, users, cookie, credentials) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::error!(error = %e, "signup error");
            flash_login_failure(sessions, cookie)
        }
    }
}

/// End the session and send the visitor to the login page.
pub fn logout_action(sessions: &dyn SessionStore, cookie: Option<&str>) -> Result<FlowOutcome> {
    let session = sessions.get_session(cookie)?;
    let set_cookie = sessions.destroy_session(session)?;
    tracing::info!("signed out");
    Ok(FlowOutcome::redirect(LOGIN_PATH, Some(set_cookie)))
}

/// The signed-in user, if the session names one that still exists.
pub fn require_user(
    sessions: &dyn SessionStore,
    users: &dyn UserDirectory,
    cookie: Option<&str>,
) -> Result<Option<User>> {
    let mut session = sessions.get_session(cookie)?;
    let Some(user_id) = session.get(USER_ID_KEY) else {
        return Ok(None);
    };
    users.find_by_id(&user_id)
}

/// End a session whose user no longer exists.
///
/// Returns the `Set-Cookie` value that expires it, or `None` when the session
/// is anonymous or still names a known user.
pub fn discard_orphaned_session(
    sessions: &dyn SessionStore,
    users: &dyn UserDirectory,
    cookie: Option<&str>,
) -> Result<Option<String>> {
    let mut session = sessions.get_session(cookie)?;
    let Some(user_id) = session.get(USER_ID_KEY) else {
        return Ok(None);
    };
    if users.find_by_id(&user_id)?.is_some() {
        return Ok(None);
    }

    tracing::warn!(user_id = %user_id, "session names a missing user, discarding");
    Ok(Some(sessions.destroy_session(session)?))
}

fn try_login(
    sessions: &dyn SessionStore,
    users: &dyn UserDirectory,
    cookie: Option<&str>,
    credentials: &Credentials,
) -> Result<FlowOutcome> {
    let mut session = sessions.get_session(cookie)?;

    let Some(username) = credentials.username_if_complete() else {
        session.flash(ERROR_KEY, MSG_CREDENTIALS_REQUIRED);
        let set_cookie = sessions.commit_session(&mut session)?;
        return Ok(FlowOutcome::redirect(LOGIN_PATH, Some(set_cookie)));
    };

    let Some(user) = users.find_by_name(username)? else {
        tracing::info!(user = username, "login for unknown user");
        session.flash(ERROR_KEY, MSG_INVALID_CREDENTIALS);
        let set_cookie = sessions.commit_session(&mut session)?;
        return Ok(FlowOutcome::redirect(LOGIN_PATH, Some(set_cookie)));
    };

    session.set(USER_ID_KEY, user.id);
    let set_cookie = sessions.commit_session(&mut session)?;
    tracing::info!(user = username, "signed in");
    Ok(FlowOutcome::redirect(HOME_PATH, Some(set_cookie)))
}

fn try_signup(
    sessions: &dyn SessionStore,
    users: &dyn UserDirectory,
    cookie: Option<&str>,
    credentials: &Credentials,
) -> Result<FlowOutcome> {
    let mut session = sessions.get_session(cookie)?;

    // Incomplete signups go back to the login page, not the signup page.
    let Some(username) = credentials.username_if_complete() else {
        session.flash(ERROR_KEY, MSG_CREDENTIALS_REQUIRED);
        let set_cookie = sessions.commit_session(&mut session)?;
        return Ok(FlowOutcome::redirect(LOGIN_PATH, Some(set_cookie)));
    };

    let user = match users.find_by_name(username)? {
        Some(existing) => {
            tracing::info!(user = username, "signup for existing user");
            existing
        }
        None => {
            tracing::info!(user = username, "new user");
            users.insert(username)?
        }
    };

    session.set(USER_ID_KEY, user.id);
    let set_cookie = sessions.commit_session(&mut session)?;
    Ok(FlowOutcome::redirect(HOME_PATH, Some(set_cookie)))
}

fn flash_login_failure(sessions: &dyn SessionStore, cookie: Option<&str>) -> Result<FlowOutcome> {
    let mut session = sessions.get_session(cookie)?;
    session.flash(ERROR_KEY, MSG_LOGIN_FAILED);
    let set_cookie = sessions.commit_session(&mut session)?;
    Ok(FlowOutcome::redirect(LOGIN_PATH, Some(set_cookie)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemorySessionStore, MemoryUserDirectory};
    use crate::error::ReorderError;

    fn browser_cookie(outcome: &FlowOutcome) -> String {
        outcome
            .set_cookie()
            .and_then(|c| c.split(';').next())
            .unwrap()
            .to_string()
    }

    /// Directory whose lookups always fail.
    struct BrokenDirectory;

    impl UserDirectory for BrokenDirectory {
        fn find_by_name(&self, _name: &str) -> Result<Option<User>> {
            Err(ReorderError::Session("directory offline".to_string()))
        }

        fn find_by_id(&self, _id: &str) -> Result<Option<User>> {
            Err(ReorderError::Session("directory offline".to_string()))
        }

        fn insert(&self, _name: &str) -> Result<User> {
            Err(ReorderError::Session("directory offline".to_string()))
        }
    }

    #[test]
    fn test_credentials_require_both_fields() {
        assert_eq!(Credentials::new("a", "b").username_if_complete(), Some("a"));
        assert_eq!(Credentials::new("a", "").username_if_complete(), None);
        assert_eq!(Credentials::new("", "b").username_if_complete(), None);
        assert_eq!(Credentials::default().username_if_complete(), None);
    }

    #[test]
    fn test_missing_credentials_flash_error() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();

        let outcome = login_action(&sessions, &users, None, &Credentials::default()).unwrap();
        assert_eq!(outcome.location(), Some(LOGIN_PATH));

        let cookie = browser_cookie(&outcome);
        let page = login_loader(&sessions, Some(&cookie)).unwrap();
        assert_eq!(page.error(), Some(MSG_CREDENTIALS_REQUIRED));
    }

    #[test]
    fn test_unknown_user_cannot_log_in() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();

        let outcome =
            login_action(&sessions, &users, None, &Credentials::new("ghost", "pw")).unwrap();
        assert_eq!(outcome.location(), Some(LOGIN_PATH));

        let cookie = browser_cookie(&outcome);
        assert_eq!(require_user(&sessions, &users, Some(&cookie)).unwrap(), None);

        let page = login_loader(&sessions, Some(&cookie)).unwrap();
        assert_eq!(page.error(), Some(MSG_INVALID_CREDENTIALS));

        // Flash is gone on the next visit
        let page = login_loader(&sessions, Some(&cookie)).unwrap();
        assert_eq!(page.error(), None);
    }

    #[test]
    fn test_known_user_logs_in() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();
        let alice = users.insert("alice").unwrap();

        let outcome =
            login_action(&sessions, &users, None, &Credentials::new("alice", "anything")).unwrap();
        assert_eq!(outcome.location(), Some(HOME_PATH));

        let cookie = browser_cookie(&outcome);
        assert_eq!(require_user(&sessions, &users, Some(&cookie)).unwrap(), Some(alice));

        // Signed-in visitors skip the login page
        let page = login_loader(&sessions, Some(&cookie)).unwrap();
        assert_eq!(page.location(), Some(HOME_PATH));
        assert_eq!(page.set_cookie(), None);
    }

    #[test]
    fn test_directory_failure_flashes_generic_error() {
        let sessions = MemorySessionStore::default();

        let outcome =
            login_action(&sessions, &BrokenDirectory, None, &Credentials::new("a", "b")).unwrap();
        assert_eq!(outcome.location(), Some(LOGIN_PATH));

        let cookie = browser_cookie(&outcome);
        let page = login_loader(&sessions, Some(&cookie)).unwrap();
        assert_eq!(page.error(), Some(MSG_LOGIN_FAILED));
    }

    #[test]
    fn test_signup_reuses_existing_user() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();

        let first = signup_action(&sessions, &users, None, &Credentials::new("carol", "pw")).unwrap();
        assert_eq!(first.location(), Some(HOME_PATH));
        let carol = require_user(&sessions, &users, Some(&browser_cookie(&first)))
            .unwrap()
            .unwrap();

        let second = signup_action(&sessions, &users, None, &Credentials::new("carol", "pw")).unwrap();
        let again = require_user(&sessions, &users, Some(&browser_cookie(&second)))
            .unwrap()
            .unwrap();
        assert_eq!(carol, again);
    }

    #[test]
    fn test_incomplete_signup_goes_to_login() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();

        let outcome = signup_action(
            &sessions,
            &users,
            None,
            &Credentials {
                username: Some("dave".to_string()),
                password: None,
            },
        )
        .unwrap();
        assert_eq!(outcome.location(), Some(LOGIN_PATH));
        assert_eq!(users.find_by_name("dave").unwrap(), None);
    }

    #[test]
    fn test_logout_ends_session() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();
        users.insert("erin").unwrap();

        let login = login_action(&sessions, &users, None, &Credentials::new("erin", "pw")).unwrap();
        let cookie = browser_cookie(&login);

        let logout = logout_action(&sessions, Some(&cookie)).unwrap();
        assert_eq!(logout.location(), Some(LOGIN_PATH));
        assert!(logout.set_cookie().unwrap().contains("Max-Age=0"));
        assert_eq!(require_user(&sessions, &users, Some(&cookie)).unwrap(), None);
    }

    #[test]
    fn test_orphaned_session_is_discarded() {
        let sessions = MemorySessionStore::default();
        let users = MemoryUserDirectory::default();
        users.insert("frank").unwrap();

        let login = login_action(&sessions, &users, None, &Credentials::new("frank", "pw")).unwrap();
        let cookie = browser_cookie(&login);

        // Still a known user
        assert_eq!(discard_orphaned_session(&sessions, &users, Some(&cookie)).unwrap(), None);
        assert_eq!(discard_orphaned_session(&sessions, &users, None).unwrap(), None);

        // Same session against a directory that has lost the user
        let empty = MemoryUserDirectory::default();
        let expired = discard_orphaned_session(&sessions, &empty, Some(&cookie))
            .unwrap()
            .unwrap();
        assert!(expired.contains("Max-Age=0"));
        assert!(sessions.is_empty());

        let page = login_loader(&sessions, Some(&cookie)).unwrap();
        assert_eq!(page.location(), None);
        assert_eq!(page.error(), None);
    }
}
