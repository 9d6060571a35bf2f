//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! weekly archiver: authentication, playlist lookup, and playlist creation.
//! It is the only layer that talks HTTP to Spotify; everything above it
//! works with typed values.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, sessions)
//!     └── Playlist Operations (Search, Read, Create, Populate)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements OAuth 2.0 PKCE (Proof Key for Code Exchange):
//! - **Interactive Flow**: browser authorization against a temporary local
//!   callback server, blocked on a one-shot completion signal
//! - **Non-Interactive Flow**: refresh of the persisted token without any
//!   user involvement, the path taken on every run after the first
//! - **Sessions**: the [`auth::Session`] handle all API calls go through,
//!   refreshing its access token transparently before it expires
//!
//! ### Playlist Module
//!
//! [`playlist`] - Provides the archiver's API operations:
//! - **Target Lookup**: finds the Discover Weekly playlist among the search
//!   results by requiring Spotify's own system account as the owner
//! - **Duplicate Detection**: checks the user's playlists for the archive
//!   name before creating anything, making runs idempotent per week
//! - **Archival**: creates the private archive playlist and adds the full
//!   track sequence in one batch call, preserving order
//!
//! ## Error Handling
//!
//! Expected failures are typed: [`auth::AuthError`] for everything around
//! tokens and login, [`playlist::ApiError`] for Web API operations. Remote
//! calls are sequential and never retried; any network failure ends the
//! run. The CLI layer decides what is fatal and what has a fallback (a
//! missing stored token falls back to the interactive flow).
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and token refresh (accounts host)
//! - `GET /me` - current user profile
//! - `GET /search` - playlist search for the weekly playlist
//! - `GET /playlists/{id}` - source track listing
//! - `GET /me/playlists` - duplicate check, with pagination
//! - `POST /users/{user_id}/playlists` - archive creation
//! - `POST /playlists/{playlist_id}/tracks` - batch track insert
//!
//! ## Security Considerations
//!
//! - The PKCE verifier/challenge pair is generated fresh per process
//! - Callback requests are tied to the process via the `state` parameter
//! - The client secret, when configured at all, only ever travels in the
//!   token-endpoint basic auth header, never through the browser

pub mod auth;
pub mod playlist;
