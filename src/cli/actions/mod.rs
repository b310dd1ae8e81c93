pub mod navigate;
pub mod request;
pub mod session;

use anyhow::Result;
use secrecy::SecretString;
use serde::Serialize;

#[derive(Debug)]
pub enum Action {
    Login {
        username: String,
        password: SecretString,
    },
    Register {
        username: String,
        password: SecretString,
    },
    Logout,
    Status,
    Whoami,
    Navigate {
        path: String,
    },
    Get {
        path: String,
    },
}

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
