//! Client-side session and access control for the GadgetGuide AI frontend.
//!
//! ## Core pieces
//!
//! - [`features::auth::store`] persists the single bearer credential.
//! - [`features::auth::state`] holds the authenticated flag and the profile of
//!   the signed-in user, recomputed on demand from the store.
//! - [`api`] sends JSON requests with the stored credential attached as
//!   `Authorization: Bearer`.
//! - [`routes`] declares the route surface and runs the navigation guard
//!   before a route renders.
//!
//! [`app::App`] wires them together; the [`cli`] module drives it behind the
//! `gadgetguide` binary.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod features;
pub mod routes;

pub use errors::AppError;
