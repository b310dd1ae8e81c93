//! Domain features of the client. Routes and the CLI import these modules to
//! keep credential handling in one place.

pub mod auth;
