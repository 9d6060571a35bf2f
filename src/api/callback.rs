use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    management::TokenManager,
    spotify::auth::{AuthError, exchange_code_pkce},
    types::PendingAuth,
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(config): Extension<Config>,
    Extension(shared_state): Extension<Arc<Mutex<PendingAuth>>>,
) -> (StatusCode, Html<&'static str>) {
    match complete_login(&config, &params, &shared_state).await {
        Ok(()) => (
            StatusCode::OK,
            Html("<h2>Login Completed!</h2><p>You can close this browser window.</p>"),
        ),
        Err(AuthError::StateMismatch) => {
            warning!("Rejected callback with unexpected state parameter.");
            (StatusCode::NOT_FOUND, Html("<h4>Not found.</h4>"))
        }
        Err(e @ AuthError::ExchangeFailed(_)) => {
            warning!("Token exchange failed: {}", e);
            (StatusCode::FORBIDDEN, Html("<h4>Login failed.</h4>"))
        }
        Err(e) => {
            warning!("Failed to save token: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Failed to save token.</h4>"),
            )
        }
    }
}

pub async fn complete_login(
    config: &Config,
    params: &HashMap<String, String>,
    shared_state: &Arc<Mutex<PendingAuth>>,
) -> Result<(), AuthError> {
    let mut state = shared_state.lock().await;

    // The state parameter must match before anything else is looked at.
    if params.get("state").map(String::as_str) != Some(state.state.as_str()) {
        return Err(AuthError::StateMismatch);
    }

    let code = params
        .get("code")
        .ok_or_else(|| AuthError::ExchangeFailed("missing authorization code".to_string()))?;

    let verifier = state.code_verifier.clone();
    let token = exchange_code_pkce(config, code, &verifier).await?;

    TokenManager::new(token.clone()).persist().await?;
    state.token = Some(token);

    // The completion signal fires at most once; a second hit of this
    // endpoint gets a response but no signal.
    if let Some(done) = state.done.take() {
        let _ = done.send(());
    }

    Ok(())
}
