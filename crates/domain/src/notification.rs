use serde::{Deserialize, Serialize};

use crate::DirectoryProfile;

/// Rendered in place of optional profile fields the directory left empty.
pub const MISSING_FIELD_PLACEHOLDER: &str = "(none)";

/// Chat message body accepted by incoming webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message text; may contain newlines and emoji shortcodes.
    pub text: String,
}

impl ChatMessage {
    /// Builds the announcement for a newly created directory user.
    #[must_use]
    pub fn new_user_created(profile: &DirectoryProfile) -> Self {
        let display_name = profile
            .display_name
            .as_deref()
            .unwrap_or(MISSING_FIELD_PLACEHOLDER);
        let mail = profile.mail.as_deref().unwrap_or(MISSING_FIELD_PLACEHOLDER);
        let created = profile
            .created_date_time
            .as_deref()
            .unwrap_or(MISSING_FIELD_PLACEHOLDER);

        Self {
            text: format!(
                ":tada: A new user was created\n\
                 • Name: {display_name}\n\
                 • UPN: {}\n\
                 • Mail: {mail}\n\
                 • Created: {created}",
                profile.user_principal_name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChatMessage;
    use crate::DirectoryProfile;

    fn profile(mail: Option<&str>) -> DirectoryProfile {
        DirectoryProfile {
            id: "abc123".to_owned(),
            display_name: Some("Ada Lovelace".to_owned()),
            user_principal_name: "ada@contoso.example".to_owned(),
            mail: mail.map(str::to_owned),
            created_date_time: Some("2025-09-01T10:00:00Z".to_owned()),
        }
    }

    #[test]
    fn message_lists_profile_fields_line_by_line() {
        let message = ChatMessage::new_user_created(&profile(Some("ada@example.com")));

        assert_eq!(
            message.text,
            ":tada: A new user was created\n\
             • Name: Ada Lovelace\n\
             • UPN: ada@contoso.example\n\
             • Mail: ada@example.com\n\
             • Created: 2025-09-01T10:00:00Z"
        );
    }

    #[test]
    fn missing_mail_uses_placeholder() {
        let message = ChatMessage::new_user_created(&profile(None));
        assert!(message.text.contains("• Mail: (none)"));
    }

    #[test]
    fn serializes_as_text_object() {
        let message = ChatMessage {
            text: "hello".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&message).ok(),
            Some(serde_json::json!({ "text": "hello" }))
        );
    }
}
