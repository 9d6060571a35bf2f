use std::path::PathBuf;

use chrono::{Duration, Utc};
use thiserror::Error;

use crate::types::Token;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no token stored at {}", .0.display())]
    NotFound(PathBuf),
    #[error("stored token is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("token file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self, TokenError> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, TokenError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TokenError::NotFound(path));
            }
            Err(e) => return Err(TokenError::Io(e)),
        };
        let token: Token = serde_json::from_str(&content)?;
        Ok(TokenManager { token, path })
    }

    pub async fn persist(&self) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    // Swaps in a refreshed token; the file is only rewritten when the
    // access token actually changed.
    pub async fn replace(&mut self, new_token: Token) -> Result<(), TokenError> {
        if new_token.access_token == self.token.access_token {
            return Ok(());
        }

        self.token = new_token;
        self.persist().await
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(240) >= self.token.expiry
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spweekly/token.json");
        path
    }
}
