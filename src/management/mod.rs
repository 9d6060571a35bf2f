mod auth;

pub use auth::TokenError;
pub use auth::TokenManager;
