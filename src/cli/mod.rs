//! # CLI Module
//!
//! This module provides the command-line interface layer for the weekly
//! archiver. It implements all user-facing commands and coordinates between
//! the authentication flow, the Spotify API layer, and user interaction.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the interactive Spotify OAuth flow with PKCE security
//!   and persists the resulting token
//! - [`refresh`] - Refreshes the persisted token without any interaction,
//!   for keeping a seldom-used installation alive
//!
//! ### Archival
//!
//! - [`archive`] - The main operation: locates the Discover Weekly playlist
//!   and copies its tracks into a dated private archive playlist, skipping
//!   the copy when one with the target name already exists
//! - [`tracks`] - Shows the current Discover Weekly tracks as a table
//!   without archiving anything
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Commands that need a session pick their auth path themselves: the stored
//! token when present, the interactive flow otherwise. Every fatal condition
//! is reported through the colored output macros and terminates the run
//! non-zero; `AlreadyArchived` is informational and exits zero.

mod archive;
mod auth;
mod refresh;
mod tracks;

pub use archive::archive;
pub use auth::auth;
pub(crate) use auth::session;
pub use refresh::refresh;
pub use tracks::tracks;
