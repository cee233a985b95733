//! Provider profiles and the session status derived from them.

use serde::{Deserialize, Serialize, Serializer};

/// The identity-provider account that owns a credential.
///
/// Deserialized straight from the provider's profile document; fields we do
/// not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Account handle.
    pub login: String,
    /// Display name, if the user set one.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Stable numeric account id.
    pub id: u64,
}

/// Whether the current client is logged in, and as whom.
///
/// Recomputed against the provider on every check and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No credential, or the provider rejected it.
    Anonymous,
    /// The provider accepted the credential in this request.
    Authenticated(Profile),
}

impl SessionStatus {
    /// Returns true if the provider accepted the credential.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the profile for an authenticated session.
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(profile) => Some(profile),
        }
    }
}

#[derive(Serialize)]
struct StatusBody<'a> {
    #[serde(rename = "loggedIn")]
    logged_in: bool,
    #[serde(flatten)]
    profile: Option<&'a Profile>,
}

impl Serialize for SessionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatusBody {
            logged_in: self.is_logged_in(),
            profile: self.profile(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn octocat() -> Profile {
        Profile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: Some("https://avatars.githubusercontent.com/u/583231".to_string()),
            id: 583231,
        }
    }

    #[test]
    fn anonymous_serializes_without_profile_fields() {
        let value = serde_json::to_value(SessionStatus::Anonymous).expect("serialize");
        assert_eq!(value, json!({ "loggedIn": false }));
    }

    #[test]
    fn authenticated_serializes_profile_fields_inline() {
        let value =
            serde_json::to_value(SessionStatus::Authenticated(octocat())).expect("serialize");
        assert_eq!(
            value,
            json!({
                "loggedIn": true,
                "login": "octocat",
                "name": "The Octocat",
                "avatar_url": "https://avatars.githubusercontent.com/u/583231",
                "id": 583231,
            })
        );
    }

    #[test]
    fn profile_ignores_unknown_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "login": "octocat",
            "id": 583231,
            "name": null,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "type": "User",
            "site_admin": false,
        }))
        .expect("deserialize");
        assert_eq!(profile.login, "octocat");
        assert!(profile.name.is_none());
    }

    #[test]
    fn profile_requires_login_and_id() {
        let result: Result<Profile, _> = serde_json::from_value(json!({ "name": "nobody" }));
        assert!(result.is_err());
    }
}
