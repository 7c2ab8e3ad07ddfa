//! Mocked identity resolution
//!
//! Authentication is out of scope: the server resolves every caller to a
//! fixed development identity instead of verifying credentials. The mock
//! lives only at this edge - handlers obtain a `ClaimedIdentity` here and
//! pass it (or the bare user id) down explicitly, so swapping in a real
//! identity provider only touches this module and the handler signatures.

use crate::models::ClaimedIdentity;

/// Fixed development identity source.
///
/// `anonymous` mode makes `claims()` return None, which the read-only
/// endpoints treat as an unauthenticated caller and the write endpoints
/// reject with 401.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    identity: ClaimedIdentity,
    anonymous: bool,
}

impl MockIdentityProvider {
    /// Build a provider for a fixed identity.
    pub fn new(identity: ClaimedIdentity) -> Self {
        Self {
            identity,
            anonymous: false,
        }
    }

    /// Build a provider that resolves every caller as anonymous.
    pub fn anonymous() -> Self {
        Self {
            identity: Self::default_identity(),
            anonymous: true,
        }
    }

    /// Build from environment overrides.
    ///
    /// `SQLGYM_MOCK_USER` may be `anonymous` or `<id>:<username>:<email>`;
    /// unset or unparseable values fall back to the default dev identity.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var("SQLGYM_MOCK_USER").ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("anonymous") => Self::anonymous(),
            Some(raw) => {
                let mut parts = raw.splitn(3, ':');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(id), Some(username), Some(email))
                        if !id.is_empty() && !username.is_empty() && !email.is_empty() =>
                    {
                        Self::new(ClaimedIdentity {
                            id: id.to_owned(),
                            username: username.to_owned(),
                            email: email.to_owned(),
                            first_name: None,
                            last_name: None,
                            profile_image_url: None,
                        })
                    }
                    _ => {
                        tracing::warn!(raw, "unparseable SQLGYM_MOCK_USER, using default identity");
                        Self::default()
                    }
                }
            }
            None => Self::default(),
        }
    }

    /// Resolve the caller's claimed identity, if any.
    pub fn claims(&self) -> Option<ClaimedIdentity> {
        if self.anonymous {
            None
        } else {
            Some(self.identity.clone())
        }
    }

    fn default_identity() -> ClaimedIdentity {
        ClaimedIdentity {
            id: "dev-user-1".to_owned(),
            username: "dev".to_owned(),
            email: "dev@sqlgym.local".to_owned(),
            first_name: Some("Dev".to_owned()),
            last_name: Some("User".to_owned()),
            profile_image_url: None,
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new(Self::default_identity())
    }
}
