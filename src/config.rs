//! Configuration management for the weekly archiver.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files and bundling them into a single [`Config`]
//! value. The value is constructed once at process start and passed by
//! reference into everything that needs it; nothing below `main` reads the
//! environment on its own.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults

use std::{env, path::PathBuf};

/// Base URL of Spotify's OAuth authorization endpoint.
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// URL for exchanging authorization codes and refresh tokens for access tokens.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Base URL of the Spotify Web API.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// OAuth scopes requested during authorization. Reading the Discover Weekly
/// playlist and creating the private archive need exactly these two.
pub const SPOTIFY_SCOPE: &str = "playlist-read-private playlist-modify-private";

/// Runtime configuration assembled from the environment.
///
/// Every field has a default so the binary starts without any setup, although
/// the placeholder credentials will of course be rejected by Spotify. The
/// value is cheap to clone; the callback server receives its own copy via an
/// axum `Extension`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client ID of the registered Spotify application.
    pub client_id: String,
    /// Client secret of the registered Spotify application. May be left at
    /// its placeholder for pure-PKCE applications.
    pub client_secret: String,
    /// Redirect URI registered with the application. Must point at the
    /// local callback server.
    pub redirect_uri: String,
    /// Address the local callback server binds to.
    pub server_address: String,
    /// Optional fixed name for the archive playlist, overriding the
    /// computed week-based name.
    pub archive_name: Option<String>,
}

impl Config {
    /// Builds a `Config` from environment variables.
    ///
    /// Missing variables fall back to defaults rather than failing: the
    /// credentials default to obvious placeholders and the callback server
    /// defaults to `localhost:8080`, matching the default redirect URI
    /// `http://localhost:8080/callback`.
    ///
    /// # Variables
    ///
    /// - `SPOTIFY_CLIENT_ID`
    /// - `SPOTIFY_CLIENT_SECRET`
    /// - `SPOTIFY_REDIRECT_URI`
    /// - `SERVER_ADDRESS`
    /// - `PLAYLIST_NAME` (optional, no default)
    ///
    /// # Example
    ///
    /// ```
    /// use spweekly::config::Config;
    ///
    /// let config = Config::from_env();
    /// assert!(!config.redirect_uri.is_empty());
    /// ```
    pub fn from_env() -> Self {
        Config {
            client_id: env::var("SPOTIFY_CLIENT_ID").unwrap_or_else(|_| "EMPTY_ID".to_string()),
            client_secret: env::var("SPOTIFY_CLIENT_SECRET")
                .unwrap_or_else(|_| "EMPTY_SECRET".to_string()),
            redirect_uri: env::var("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/callback".to_string()),
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "localhost:8080".to_string()),
            archive_name: env::var("PLAYLIST_NAME").ok().filter(|name| !name.is_empty()),
        }
    }

    /// Whether a real client secret is configured. The placeholder default
    /// counts as unconfigured; pure-PKCE applications run without one.
    pub fn has_client_secret(&self) -> bool {
        !self.client_secret.is_empty() && self.client_secret != "EMPTY_SECRET"
    }
}

/// Loads environment variables from a `.env` file.
///
/// Looks for the file in the platform-specific local data directory under
/// `spweekly/.env`, creating the directory structure if it doesn't exist,
/// and falls back to a `.env` in the working directory. A missing file is
/// not an error; variables already present in the process environment are
/// never overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spweekly/.env`
/// - macOS: `~/Library/Application Support/spweekly/.env`
/// - Windows: `%LOCALAPPDATA%/spweekly/.env`
///
/// # Example
///
/// ```
/// use spweekly::config;
///
/// #[tokio::main]
/// async fn main() {
///     config::load_env().await;
///     let config = config::Config::from_env();
/// }
/// ```
pub async fn load_env() {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spweekly/.env");
    if let Some(parent) = path.parent() {
        let _ = async_fs::create_dir_all(parent).await;
    }

    if dotenv::from_path(&path).is_err() {
        let _ = dotenv::dotenv();
    }
}
