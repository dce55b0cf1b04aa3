use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use herald_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::parse_timestamp;

/// Fields requested from the directory for a user lookup.
pub const DIRECTORY_PROFILE_FIELDS: &[&str] = &[
    "id",
    "displayName",
    "userPrincipalName",
    "mail",
    "createdDateTime",
];

/// Returns the field projection as a comma-separated select clause.
#[must_use]
pub fn directory_profile_select() -> String {
    DIRECTORY_PROFILE_FIELDS.join(",")
}

/// Identifier of a user object in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryUserId(NonEmptyString);

impl DirectoryUserId {
    /// Creates a validated directory user identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(Self)
            .map_err(|_| AppError::Validation("directory user id must not be blank".to_owned()))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DirectoryUserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// User record resolved from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryProfile {
    /// Directory object identifier.
    pub id: String,
    /// Display name, when the directory has one.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Sign-in principal name.
    pub user_principal_name: String,
    /// Primary mail address, when assigned.
    #[serde(default)]
    pub mail: Option<String>,
    /// Creation timestamp as reported by the directory. Legacy accounts
    /// created before the directory tracked it report `null`.
    #[serde(default)]
    pub created_date_time: Option<String>,
}

impl DirectoryProfile {
    /// Parses the directory creation timestamp. `Ok(None)` means the
    /// directory does not know when the user was created.
    pub fn created_at(&self) -> AppResult<Option<DateTime<Utc>>> {
        let Some(created_date_time) = self.created_date_time.as_deref() else {
            return Ok(None);
        };

        parse_timestamp(created_date_time).map(Some).ok_or_else(|| {
            AppError::Validation(format!(
                "directory user '{}' has unparseable createdDateTime '{created_date_time}'",
                self.id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectoryProfile, DirectoryUserId, directory_profile_select};

    #[test]
    fn select_clause_lists_minimal_projection() {
        assert_eq!(
            directory_profile_select(),
            "id,displayName,userPrincipalName,mail,createdDateTime"
        );
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert!(DirectoryUserId::new("  ").is_err());
        assert!(DirectoryUserId::new("").is_err());
    }

    #[test]
    fn profile_deserializes_graph_payload_with_null_mail() {
        let profile: DirectoryProfile = serde_json::from_value(serde_json::json!({
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users(id)/$entity",
            "id": "abc123",
            "displayName": "Ada Lovelace",
            "userPrincipalName": "ada@example.com",
            "mail": null,
            "createdDateTime": "2025-09-01T10:00:00Z"
        }))
        .unwrap_or_else(|error| panic!("profile should deserialize: {error}"));

        assert_eq!(profile.display_name.as_deref(), Some("Ada Lovelace"));
        assert!(profile.mail.is_none());
        assert_eq!(
            profile
                .created_at()
                .ok()
                .flatten()
                .map(|time| time.timestamp_millis()),
            Some(1_756_720_800_000)
        );
    }

    #[test]
    fn unparseable_creation_time_is_a_validation_error() {
        let profile = DirectoryProfile {
            id: "abc123".to_owned(),
            display_name: None,
            user_principal_name: "ada@example.com".to_owned(),
            mail: None,
            created_date_time: Some("not-a-date".to_owned()),
        };

        assert!(matches!(
            profile.created_at(),
            Err(herald_core::AppError::Validation(_))
        ));
    }

    #[test]
    fn null_creation_time_is_unknown_rather_than_invalid() {
        let profile: DirectoryProfile = serde_json::from_value(serde_json::json!({
            "id": "legacy1",
            "displayName": "Old Account",
            "userPrincipalName": "legacy1@example.com",
            "mail": null,
            "createdDateTime": null
        }))
        .unwrap_or_else(|error| panic!("profile should deserialize: {error}"));

        assert!(profile.created_date_time.is_none());
        assert!(matches!(profile.created_at(), Ok(None)));
    }
}
