mod persistence;

pub use persistence::{load_sessions, load_users, save_sessions, save_users};
