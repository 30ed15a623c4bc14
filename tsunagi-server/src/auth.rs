//! Bearer tokens for calls to the GraphQL backend.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::TokenSettings;
use crate::tenant::Tenant;

/// Claims carried by every backend token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendClaims {
    pub iss: String,
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Mints short-lived HS256 tokens scoped to a tenant
pub struct TokenIssuer {
    key: EncodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            key: EncodingKey::from_secret(settings.secret.as_bytes()),
            issuer: settings.issuer.clone(),
            ttl_secs: settings.ttl_secs,
        }
    }

    pub fn claims_for(&self, tenant: &Tenant) -> BackendClaims {
        let now = chrono::Utc::now().timestamp();
        BackendClaims {
            iss: self.issuer.clone(),
            sub: "tsunagi".to_string(),
            agency_id: tenant.agency_id.clone(),
            franchise_id: tenant.franchise_id.clone(),
            iat: now,
            exp: now + self.ttl_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn issue(&self, tenant: &Tenant) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            &self.claims_for(tenant),
            &self.key,
        )
    }
}
