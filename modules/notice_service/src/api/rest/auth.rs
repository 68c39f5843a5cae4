//! Bearer token resolution for REST callers

use super::error::Problem;
use crate::config::{AuthConfig, ConfigError};
use crate::contract::AuthContext;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Static bearer token table
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, AuthContext>,
}

impl TokenRegistry {
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let tokens = config
            .tokens
            .iter()
            .filter(|t| !t.token.is_empty())
            .map(|t| Ok((t.token.clone(), t.auth_context()?)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resolve an `Authorization` header value; unknown or missing tokens are anonymous
    pub fn resolve(&self, header: Option<&str>) -> AuthContext {
        header
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .and_then(|token| self.tokens.get(token))
            .cloned()
            .unwrap_or_else(AuthContext::anonymous)
    }
}

/// The authenticated (or anonymous) caller of a request
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let registry = parts
            .extensions
            .get::<Arc<TokenRegistry>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("token registry missing from request extensions");
                Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                    .with_detail("An unexpected error occurred")
            })?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Ok(Caller(registry.resolve(header)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;
    use crate::contract::Capability;

    fn registry() -> TokenRegistry {
        TokenRegistry::from_config(&AuthConfig {
            tokens: vec![
                TokenConfig {
                    token: "editor-token".to_string(),
                    user_id: "editor".to_string(),
                    capabilities: vec!["edit_posts".to_string()],
                },
                TokenConfig {
                    token: String::new(),
                    user_id: "ignored".to_string(),
                    capabilities: vec![],
                },
            ],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_known_token() {
        let ctx = registry().resolve(Some("Bearer editor-token"));
        assert_eq!(ctx.user_id.as_deref(), Some("editor"));
        assert!(ctx.capabilities.contains(&Capability::EditPosts));
    }

    #[test]
    fn test_unknown_or_missing_token_is_anonymous() {
        let registry = registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.resolve(None).is_authenticated());
        assert!(!registry.resolve(Some("Bearer nope")).is_authenticated());
        assert!(!registry.resolve(Some("editor-token")).is_authenticated());
        assert!(!registry.resolve(Some("Bearer ")).is_authenticated());
    }
}
