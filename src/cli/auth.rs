use crate::{
    config::Config,
    error, info,
    spotify::{
        self,
        auth::{AuthError, Session},
    },
    success,
};

pub async fn auth(config: &Config) {
    match spotify::auth::interactive(config).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

// Picks the auth path: the stored token when there is one, the full
// interactive flow otherwise. Anything else fatal ends the run here.
pub(crate) async fn session(config: &Config) -> Session {
    match spotify::auth::non_interactive(config).await {
        Ok(session) => session,
        Err(AuthError::NoStoredToken) => {
            info!("No token stored yet. Starting interactive login...");
            match spotify::auth::interactive(config).await {
                Ok(session) => session,
                Err(e) => error!("Authentication failed: {}", e),
            }
        }
        Err(e) => error!("Authentication failed: {}", e),
    }
}
