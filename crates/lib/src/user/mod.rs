//! Credential store
//!
//! Identity records (email, names, salted password hash) and the password
//! primitives used at signup and login. Storage itself lives behind
//! [`BackendImpl`](crate::backend::BackendImpl); the operations that combine the
//! two are on [`Devlog`](crate::Devlog).

pub mod crypto;
pub mod errors;
pub mod types;

pub use errors::UserError;
pub use types::{NewUser, UserIdentity, UserRecord};
