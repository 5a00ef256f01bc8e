use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use relaygate_api::models::Id;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::configs::Auth;
use crate::errors::AuthError;
use crate::models::Device;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: Id,
    pub token: String,
    pub iat: u64,
    pub exp: u64,
}

/// Identity carried by a device bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Id,
    pub enroll_id: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Clone)]
pub struct TokenService {
    expiration: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(auth: Auth) -> Self {
        Self {
            expiration: auth.expiration,
            encoding_key: EncodingKey::from_secret(auth.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(auth.secret.as_bytes()),
        }
    }

    pub fn retrieve_token_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    pub fn generate_token(&self, device: &Device) -> Result<Token, jsonwebtoken::errors::Error> {
        let iat = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;
        let exp = iat + self.expiration;

        let claims = TokenClaims {
            sub: device.id,
            enroll_id: device.enroll_id.clone(),
            iat,
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(Token {
            id: claims.sub,
            token,
            iat,
            exp,
        })
    }
}
