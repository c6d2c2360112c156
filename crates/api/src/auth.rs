//! Principal resolution.
//!
//! Credential storage and token issuance live in an external auth service;
//! the API only needs to turn a bearer token into a principal. That seam is
//! the [`AuthProvider`] trait. [`StaticTokenAuth`] is the shipped
//! implementation: a fixed token table loaded from configuration, enough to
//! operate the service and drive tests without the auth collaborator.

use std::collections::HashMap;

use timebank_core::roles::ROLE_MEMBER;
use timebank_core::types::DbId;

/// An authenticated caller: account id plus role.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: DbId,
    pub role: String,
}

/// Resolves a bearer token to a principal. Supplied by the auth collaborator.
pub trait AuthProvider: Send + Sync {
    fn resolve_token(&self, token: &str) -> Option<Principal>;
}

/// Fixed token table.
#[derive(Debug, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(
        mut self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.tokens.insert(
            token.into(),
            Principal {
                user_id: user_id.into(),
                role: role.into(),
            },
        );
        self
    }

    /// Parse the `API_TOKENS` config format:
    /// `token=user_id:role,token2=user2` (role defaults to `member`).
    /// Malformed entries are skipped with a warning.
    pub fn from_spec(spec: &str) -> Self {
        let mut auth = Self::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((token, principal)) = entry.split_once('=') else {
                tracing::warn!(entry, "Skipping malformed API_TOKENS entry");
                continue;
            };
            let (user_id, role) = match principal.split_once(':') {
                Some((user_id, role)) => (user_id, role),
                None => (principal, ROLE_MEMBER),
            };
            auth = auth.with_token(token, user_id, role);
        }
        auth
    }
}

impl AuthProvider for StaticTokenAuth {
    fn resolve_token(&self, token: &str) -> Option<Principal> {
        self.tokens.get(token).cloned()
    }
}
