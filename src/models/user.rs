use serde::{Deserialize, Serialize};

/// Profile of the currently authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback_chain() {
        let mut profile = UserProfile {
            id: "u1".to_string(),
            email: Some("ana@example.com".to_string()),
            full_name: Some("Ana Souza".to_string()),
            is_verified: true,
            avatar_url: None,
        };
        assert_eq!(profile.display_name(), "Ana Souza");

        profile.full_name = None;
        assert_eq!(profile.display_name(), "ana@example.com");

        profile.email = None;
        assert_eq!(profile.display_name(), "Unknown");
    }

    #[test]
    fn test_parses_wire_names_with_missing_optionals() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":"u2","isVerified":true}"#).unwrap();
        assert_eq!(profile.id, "u2");
        assert!(profile.is_verified);
        assert!(profile.email.is_none());
    }
}
