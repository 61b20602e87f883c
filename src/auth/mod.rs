pub mod flows;
pub mod session;
pub mod users;

pub use flows::{
    discard_orphaned_session, login_action, login_loader, logout_action, require_user,
    signup_action, signup_loader, Credentials, FlowOutcome, ERROR_KEY, USER_ID_KEY,
};
pub use session::{
    CookieSettings, FileSessionStore, MemorySessionStore, Session, SessionData, SessionStore,
};
pub use users::{JsonUserDirectory, MemoryUserDirectory, UserDirectory};
