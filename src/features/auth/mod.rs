//! Auth feature covering credential persistence, the session context and the
//! login/register flows. This module touches security boundaries and must
//! avoid logging secrets or token material.
//!
//! Flow overview: login posts the credentials, stores the returned bearer
//! token through [`state::SessionContext::set_user`], and the session flag is
//! resynced before the call returns. Logout clears the profile and the token
//! the same way. The request client and the navigator both read the token
//! straight from the store, so they never depend on the flag being current.

pub mod client;
pub mod flow;
pub mod state;
pub mod store;
pub mod types;

pub use flow::{RegisterOutcome, login, refresh_profile, register};
pub use state::{SessionContext, SessionSnapshot};
pub use store::{CredentialStore, FileStore, MemoryStore};
