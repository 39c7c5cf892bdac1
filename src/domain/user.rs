use serde_json::Value;

/// Capability granting the privileged (admin) screens.
pub const ADMIN: &str = "ADMIN";

/// The signed-in user, as described by the claims of their access token.
///
/// Roles are read from the realm-level `realm_access.roles` claim. They gate
/// what the UI offers; the backend remains the authority on every request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserIdentity {
    pub subject: Option<String>,
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl UserIdentity {
    /// Builds an identity from already-decoded token claims.
    pub fn from_claims(claims: &Value) -> Self {
        Self {
            subject: claims.get("sub").and_then(Value::as_str).map(String::from),
            username: claims
                .get("preferred_username")
                .and_then(Value::as_str)
                .map(String::from),
            roles: extract_string_array(claims, &["realm_access", "roles"]),
        }
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("User")
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.roles.iter().any(|role| role == capability)
    }

    pub fn is_admin(&self) -> bool {
        self.has_capability(ADMIN)
    }
}

/// Capability check used for UI gating. `None` (signed out) holds no capability.
pub fn has_capability(user: Option<&UserIdentity>, capability: &str) -> bool {
    user.is_some_and(|user| user.has_capability(capability))
}

fn extract_string_array(claims: &Value, path: &[&str]) -> Vec<String> {
    path.iter()
        .try_fold(claims, |value, key| value.get(*key))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
