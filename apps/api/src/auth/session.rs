//! Session issuance and verification.
//!
//! A session is a signed HS256 token carried in the `session` cookie — it is
//! never stored server-side. Verification fails open: any tampered, expired
//! or otherwise invalid token resolves to "no user", not an error.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session";
/// Fixed session lifetime: 7 days.
pub const SESSION_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims inside the session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims inside the short-lived identity token minted by the auth provider
/// after a successful authentication event.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub exp: i64,
}

/// Signs session cookies and verifies both session and identity tokens.
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    identity_key: DecodingKey,
    secure_cookies: bool,
}

impl SessionManager {
    pub fn new(session_secret: &str, identity_secret: &str, secure_cookies: bool) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(session_secret.as_bytes()),
            identity_key: DecodingKey::from_secret(identity_secret.as_bytes()),
            secure_cookies,
        }
    }

    /// Verifies an identity token and returns its claims.
    /// Expiry is checked; the caller decides how to surface failure.
    pub fn verify_identity(
        &self,
        token: &str,
    ) -> Result<IdentityClaims, jsonwebtoken::errors::Error> {
        let data = decode::<IdentityClaims>(token, &self.identity_key, &Validation::default())?;
        Ok(data.claims)
    }

    /// Issues a session token for the given user id with the fixed 7-day expiry.
    pub fn issue(&self, uid: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: uid.to_string(),
            iat: now,
            exp: now + SESSION_DURATION_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verifies a session token and returns the user id.
    /// Any failure — bad signature, expiry, malformed token — yields `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .ok()
            .map(|data| data.claims.sub)
    }

    /// Builds the `session` cookie: httpOnly, path `/`, SameSite=Lax,
    /// max-age equal to the session lifetime, Secure only in production.
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .max_age(time::Duration::seconds(SESSION_DURATION_SECS))
            .http_only(true)
            .secure(self.secure_cookies)
            .path("/")
            .same_site(SameSite::Lax)
            .build()
    }
}
