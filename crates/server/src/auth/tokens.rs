use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use models::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access/refresh pair handed to clients on registration and login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenUse {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: i16,
    pub token_use: TokenUse,
    pub exp: i64,
}

/// Issues and verifies the token pair. The scheme behind the tokens is
/// opaque to the rest of the system; callers only see this interface.
pub trait TokenIssuer {
    fn issue(&self, user_id: Uuid, role: Role) -> Result<TokenPair, jsonwebtoken::errors::Error>;

    fn verify_access(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error>;
}

/// HS256-signed JWTs keyed by the `JWT_SECRET` environment variable
#[derive(Clone)]
pub struct JwtIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtIssuer {
    const ACCESS_TTL_MINUTES: i64 = 30;
    const REFRESH_TTL_DAYS: i64 = 7;

    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn sign(
        &self,
        user_id: Uuid,
        role: Role,
        token_use: TokenUse,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id,
            role: role.code(),
            token_use,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user_id: Uuid, role: Role) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access: self.sign(
                user_id,
                role,
                TokenUse::Access,
                Duration::minutes(Self::ACCESS_TTL_MINUTES),
            )?,
            refresh: self.sign(
                user_id,
                role,
                TokenUse::Refresh,
                Duration::days(Self::REFRESH_TTL_DAYS),
            )?,
        })
    }

    fn verify_access(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        // A refresh token is not a credential for requests
        if data.claims.token_use != TokenUse::Access {
            return Err(ErrorKind::InvalidToken.into());
        }

        Ok(data.claims)
    }
}
