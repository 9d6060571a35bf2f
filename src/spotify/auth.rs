use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::{Mutex, oneshot};

use crate::{
    config::{self, Config},
    error, info,
    management::{TokenError, TokenManager},
    server::{start_api_server, stop_api_server},
    types::{PendingAuth, Token, TokenResponse},
    utils, warning,
};

/// Maximum time to wait for the user to finish the browser login before the
/// run is failed and the callback server is torn down.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no stored token; run `spweekly auth` first")]
    NoStoredToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("code exchange failed: {0}")]
    ExchangeFailed(String),
    #[error("state parameter does not match the one sent")]
    StateMismatch,
    #[error("timed out waiting for the login to complete")]
    LoginTimeout,
}

/// An authenticated Spotify session.
///
/// Bundles the configuration, an HTTP client, and the persisted token into
/// the single handle all Web API calls go through. Sessions are produced by
/// [`interactive`] or [`non_interactive`] only; holding one means the token
/// was usable at construction time.
///
/// `bearer()` hands out the current access token and transparently refreshes
/// it (persisting the replacement) when it is about to expire, so long-lived
/// callers never deal with token lifetimes themselves.
pub struct Session {
    config: Config,
    http: Client,
    tokens: TokenManager,
}

impl Session {
    fn new(config: &Config, tokens: TokenManager) -> Self {
        Session {
            config: config.clone(),
            http: Client::new(),
            tokens,
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Returns a currently valid access token, refreshing it first if it is
    /// within the expiry margin. A refreshed token is persisted before the
    /// call returns.
    pub async fn bearer(&mut self) -> Result<String, AuthError> {
        if self.tokens.is_expired() {
            let current_refresh = self.tokens.current_token().refresh_token.clone();
            let refreshed = refresh_token(&self.config, &self.http, &current_refresh).await?;
            self.tokens.replace(refreshed).await?;
        }

        Ok(self.tokens.current_token().access_token.clone())
    }

    async fn force_refresh(&mut self) -> Result<(), AuthError> {
        let current_refresh = self.tokens.current_token().refresh_token.clone();
        let refreshed = refresh_token(&self.config, &self.http, &current_refresh).await?;
        self.tokens.replace(refreshed).await?;
        Ok(())
    }
}

/// Produces a session from the persisted token without user interaction.
///
/// Loads the token from disk and unconditionally exchanges the stored
/// refresh token for a fresh access token, persisting the result when the
/// access token changed. This is the path taken on every run after the
/// first.
///
/// # Errors
///
/// - [`AuthError::NoStoredToken`] - no token file exists yet; the caller
///   decides whether to fall back to the interactive flow or abort
/// - [`AuthError::Token`] - the token file exists but is corrupt or
///   unreadable
/// - [`AuthError::RefreshFailed`] - Spotify rejected the refresh token or
///   the request failed; fatal, there is no retry
pub async fn non_interactive(config: &Config) -> Result<Session, AuthError> {
    let tokens = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(TokenError::NotFound(_)) => return Err(AuthError::NoStoredToken),
        Err(e) => return Err(AuthError::Token(e)),
    };

    let mut session = Session::new(config, tokens);
    session.force_refresh().await?;
    Ok(session)
}

/// Runs the complete OAuth 2.0 PKCE authentication flow against Spotify.
///
/// This function orchestrates the entire interactive process:
/// 1. Generating the PKCE code verifier, code challenge, and anti-CSRF state
/// 2. Starting a local callback server on a background task
/// 3. Opening the authorization URL in the user's browser
/// 4. Blocking on the one-shot completion signal fired by the callback
/// 5. Tearing the callback server down again
///
/// The callback handler persists the token before it signals, so a session
/// built from a completed login is always backed by a token file.
///
/// # Authentication Flow
///
/// The PKCE (Proof Key for Code Exchange) flow proves that the client
/// completing the exchange is the one that started it: the verifier is
/// random per process, the challenge sent in the authorization URL is its
/// SHA-256 digest, and Spotify checks the pair at exchange time. The state
/// parameter additionally ties the callback request to this process; the
/// handler rejects anything else.
///
/// # Error Handling
///
/// - Browser launch failures produce a warning; the printed URL can be
///   opened manually
/// - A login that does not complete within [`LOGIN_TIMEOUT`] fails with
///   [`AuthError::LoginTimeout`]
/// - Exchange and persistence failures are reported by the callback handler
///   and surface here as a timeout, since no completion signal is emitted
///
/// The callback server is shut down exactly once on every path, successful
/// or not, with a bounded grace period.
pub async fn interactive(config: &Config) -> Result<Session, AuthError> {
    // generate PKCE verifier, challenge and the anti-CSRF state
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let (done_tx, done_rx) = oneshot::channel();
    let shared_state = Arc::new(Mutex::new(PendingAuth {
        code_verifier,
        state: state.clone(),
        token: None,
        done: Some(done_tx),
    }));

    // start API server
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server_config = config.clone();
    let server_state = Arc::clone(&shared_state);
    let mut server =
        tokio::spawn(
            async move { start_api_server(server_config, server_state, shutdown_rx).await },
        );

    // Construct the authorization URL and hand it to the user
    let auth_url = authorize_url(config, &code_challenge, &state);
    info!(
        "Grant access to your Spotify account by visiting the following link:\n{}",
        auth_url
    );
    if webbrowser::open(&auth_url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL manually.");
    }

    // wait for the callback to fire the completion signal
    let outcome = wait_for_login(done_rx).await;

    // Teardown happens exactly once, whether or not the login went through.
    stop_api_server(&mut server, shutdown_tx).await;
    outcome?;

    let token = shared_state.lock().await.token.take();
    let token = token
        .ok_or_else(|| AuthError::ExchangeFailed("login completed without a token".to_string()))?;

    Ok(Session::new(config, TokenManager::new(token)))
}

/// Builds the authorization URL the user is sent to.
///
/// Embeds the client ID, redirect URI, requested scopes, the PKCE challenge
/// (method S256), the anti-CSRF state, and `access_type=offline` so a
/// refresh token is issued alongside the access token.
pub fn authorize_url(config: &Config, code_challenge: &str, state: &str) -> String {
    let url = reqwest::Url::parse_with_params(
        config::SPOTIFY_AUTH_URL,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config::SPOTIFY_SCOPE),
            ("state", state),
            ("access_type", "offline"),
        ],
    );

    match url {
        Ok(url) => url.to_string(),
        Err(e) => error!("Failed to build authorization URL: {}", e),
    }
}

async fn wait_for_login(done: oneshot::Receiver<()>) -> Result<(), AuthError> {
    match tokio::time::timeout(LOGIN_TIMEOUT, done).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(_)) => Err(AuthError::ExchangeFailed(
            "callback server closed before the login completed".to_string(),
        )),
        Err(_) => Err(AuthError::LoginTimeout),
    }
}

/// Exchanges an authorization code for a token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by posting the authorization code
/// received on the callback, together with the original code verifier, to
/// Spotify's token endpoint. This is the final step of the interactive
/// login.
///
/// # Errors
///
/// Fails with [`AuthError::ExchangeFailed`] on network errors, non-success
/// responses (an expired or reused code, a verifier that does not match the
/// challenge), and malformed response bodies.
pub async fn exchange_code_pkce(
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, AuthError> {
    let client = Client::new();
    let res = token_request(
        config,
        &client,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .send()
    .await
    .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::ExchangeFailed(format!("{status}: {body}")));
    }

    let response: TokenResponse = res
        .json()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    Ok(token_from_response(response, None))
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may rotate the refresh token in the process; when the response
/// omits one, the previous refresh token stays valid and is carried over
/// into the returned token.
///
/// # Errors
///
/// Fails with [`AuthError::RefreshFailed`] on network errors, non-success
/// responses (a revoked or invalid refresh token), and malformed response
/// bodies.
pub async fn refresh_token(
    config: &Config,
    client: &Client,
    refresh_token: &str,
) -> Result<Token, AuthError> {
    let res = token_request(
        config,
        client,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ],
    )
    .send()
    .await
    .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::RefreshFailed(format!("{status}: {body}")));
    }

    let response: TokenResponse = res
        .json()
        .await
        .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

    Ok(token_from_response(response, Some(refresh_token)))
}

// Token endpoint requests authenticate with HTTP basic auth only when a
// client secret is actually configured; pure-PKCE setups send the client_id
// form field alone.
fn token_request(
    config: &Config,
    client: &Client,
    params: &[(&str, &str)],
) -> reqwest::RequestBuilder {
    let mut req = client.post(config::SPOTIFY_TOKEN_URL).form(params);
    if config.has_client_secret() {
        req = req.basic_auth(&config.client_id, Some(&config.client_secret));
    }
    req
}

/// Converts a token endpoint response into a stored token, stamping the
/// expiry and carrying the previous refresh token over when the response
/// does not rotate it.
pub fn token_from_response(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    let refresh_token = response
        .refresh_token
        .or_else(|| previous_refresh.map(str::to_string))
        .unwrap_or_default();

    Token {
        access_token: response.access_token,
        token_type: response.token_type,
        refresh_token,
        expiry: Utc::now() + chrono::Duration::seconds(response.expires_in),
    }
}
