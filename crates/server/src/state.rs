use crate::auth::tokens::JwtIssuer;
use sea_orm::DatabaseConnection;

/// Shared handler state: the pooled database connection and the token
/// issuer. Cloning is cheap, both members are handles.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: JwtIssuer,
}
