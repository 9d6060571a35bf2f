use crate::{config::Config, error, spotify, success};

pub async fn refresh(config: &Config) {
    match spotify::auth::non_interactive(config).await {
        Ok(_) => success!("Token refreshed."),
        Err(e) => error!("Token refresh failed: {}", e),
    }
}
