//! # API Module
//!
//! This module provides the HTTP endpoints served by the short-lived local
//! web server during the interactive OAuth flow.
//!
//! ## Overview
//!
//! The server exists for exactly one login: Spotify redirects the user's
//! browser back to it after authorization, and the handlers here finish the
//! PKCE flow. It provides:
//!
//! - **OAuth Authentication Flow**: the Spotify OAuth 2.0 PKCE callback
//!   handler, which validates the anti-CSRF state, exchanges the
//!   authorization code for a token, persists it, and fires the one-shot
//!   completion signal the main flow is blocked on
//! - **Health Monitoring**: a health check endpoint returning status and
//!   version information
//! - **Request Logging**: a fallback that logs any other request path and
//!   answers 404
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles `GET /callback` requests from Spotify's
//!   authorization server. A state mismatch is answered with 404 and a
//!   failed code exchange with 403; neither emits the completion signal.
//! - [`health`] - Returns application status and version as JSON.
//! - [`not_found`] - Catch-all for every other path; logged only.
//!
//! ## Security Considerations
//!
//! - Uses the OAuth 2.0 PKCE flow, so no client secret ever reaches the
//!   browser
//! - Requests whose `state` parameter does not match the value generated
//!   for this process are rejected before any token exchange happens
//! - The completion signal can fire at most once per process, no matter how
//!   often the endpoint is hit
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spweekly::api::{callback, health, not_found};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .fallback(not_found);
//! ```

mod callback;
mod fallback;
mod health;

pub use callback::callback;
pub use callback::complete_login;
pub use fallback::not_found;
pub use health::health;
