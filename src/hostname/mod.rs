//! Hostname input handling

pub mod validator;

pub use validator::{utils, HostnameValidator};
