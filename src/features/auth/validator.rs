use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
    claims_namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // Standard JWT claims (validated by jsonwebtoken library)
    sub: String,
    #[serde(rename = "iss")]
    _iss: String,
    #[serde(rename = "aud")]
    _aud: AudienceClaim,
    #[serde(rename = "exp")]
    _exp: u64,

    #[serde(default)]
    kind: Option<String>,

    // Namespaced custom claims are looked up by key at runtime
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

/// Audience can be either a single string or an array of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum AudienceClaim {
    Single(String),
    Multiple(Vec<String>),
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
        claims_namespace: String,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
            claims_namespace,
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        // Token exchange tokens may not have the 'kind' claim
        if let Some(kind) = &claims.kind {
            if kind != "AccessToken" {
                return Err(AppError::Auth("Token is not an access token".to_string()));
            }
        }

        let custom = self.custom_claims(&claims.extra)?;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            roles: custom.roles,
            permissions: custom.permissions,
        })
    }

    fn custom_claims(
        &self,
        extra: &HashMap<String, serde_json::Value>,
    ) -> Result<CustomClaims, AppError> {
        match extra.get(&self.claims_namespace) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| AppError::Auth(format!("Malformed custom claims: {}", e))),
            None => Ok(CustomClaims {
                permissions: Vec::new(),
                roles: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> JwtValidator {
        JwtValidator::new(
            Arc::new(JwksClient::new("http://issuer.test", Duration::from_secs(60))),
            "http://issuer.test".to_string(),
            "h5p-api".to_string(),
            Duration::from_secs(0),
            "https://h5p-api/claims".to_string(),
        )
    }

    #[test]
    fn test_custom_claims_read_from_namespace() {
        let mut extra = HashMap::new();
        extra.insert(
            "https://h5p-api/claims".to_string(),
            json!({ "roles": ["instructor"], "permissions": ["contentbank:upload:7"] }),
        );

        let custom = validator().custom_claims(&extra).unwrap();
        assert_eq!(custom.roles, vec!["instructor"]);
        assert_eq!(custom.permissions, vec!["contentbank:upload:7"]);
    }

    #[test]
    fn test_missing_custom_claims_grant_nothing() {
        let custom = validator().custom_claims(&HashMap::new()).unwrap();
        assert!(custom.roles.is_empty());
        assert!(custom.permissions.is_empty());
    }

    #[test]
    fn test_malformed_custom_claims_rejected() {
        let mut extra = HashMap::new();
        extra.insert("https://h5p-api/claims".to_string(), json!("nope"));
        assert!(validator().custom_claims(&extra).is_err());
    }
}
