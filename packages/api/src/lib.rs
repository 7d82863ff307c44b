//! # API crate: client side of the hosted backend
//!
//! Everything the web front end asks of the backend-as-a-service goes through
//! this crate. The backend itself (tables, row-level security, auth) is an
//! external collaborator; nothing here stores data or implements a protocol
//! beyond issuing HTTP requests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Password sign-in, session validation and sign-out against the auth endpoints |
//! | [`backend`] | [`Backend`]: hosted client or seeded demo store, chosen from [`store::BackendConfig`] |
//! | [`demo`] | Seed data and sessions for running without a hosted project |
//! | [`rest`] | [`RestClient`]: [`store::RemoteStore`] over the PostgREST table API |
//! | [`social`] | Feed, comment, like, save and profile operations used by the widgets |
//!
//! ## Error policy
//!
//! Operations return [`ApiError`]. Callers in the UI log failures and keep
//! their previous state; nothing retries.

pub mod auth;
pub mod backend;
pub mod demo;
pub mod error;
pub mod rest;
pub mod social;

pub use auth::{AuthClient, AuthUser, Session};
pub use backend::Backend;
pub use error::ApiError;
pub use rest::RestClient;

pub use store::{Like, Post, PostWithAuthor, Profile, SavedPost};
