//! Boardpipe Trello infrastructure adapter.
//!
//! Implements the traits defined in the [`connector`] crate — [`connector::BoardApi`]
//! and [`connector::SourceConnector`] — over the Trello REST API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All Trello
//! API detail (endpoints, authentication query parameters, the `invalid id`
//! not-found sentinel) is handled here; the [`connector`] crate never sees it.
//!
//! ## Session lifecycle
//!
//! [`OAuthCredentials`] are stored once per completed authorization;
//! [`SessionCell`] lazily binds the single live [`TrelloApi`] handle and is
//! invalidated whenever the credentials are replaced.

mod adapter;
mod client;
mod credentials;
mod session;

pub use adapter::{TrelloConfig, TrelloConnector};
pub use client::TrelloApi;
pub use credentials::OAuthCredentials;
pub use session::SessionCell;
