//! Directory user lifecycle event envelope.
//!
//! Deliveries arrive either in CloudEvents form (`type`, `time`, `source`) or
//! in the provider's native grid form (`eventType`, `eventTime`, `topic`).
//! Both map onto [`DirectoryUserEvent`] through serde aliases.

use serde::{Deserialize, Serialize};

/// Inbound event envelope for a directory user change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUserEvent {
    /// Delivery identifier assigned by the event source.
    #[serde(default)]
    pub id: String,
    /// Event source (CloudEvents `source`, grid `topic`).
    #[serde(default, alias = "topic")]
    pub source: String,
    /// Event type (CloudEvents `type`, grid `eventType`).
    #[serde(default, rename = "type", alias = "eventType")]
    pub event_type: String,
    /// Resource path such as `Users/<id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Envelope timestamp (CloudEvents `time`, grid `eventTime`).
    #[serde(default, alias = "eventTime", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Change notification payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DirectoryUserEventData>,
}

/// Change notification payload carried in the envelope `data` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUserEventData {
    /// Changed resource details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_data: Option<ResourceData>,
    /// Change kind reported by the directory (`created`, `updated`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,
}

/// Resource block inside a change notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceData {
    /// Directory object identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Time the change happened in the directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
}

impl DirectoryUserEvent {
    /// Returns the payload resource block, if any.
    #[must_use]
    pub fn resource_data(&self) -> Option<&ResourceData> {
        self.data.as_ref()?.resource_data.as_ref()
    }

    /// Returns the payload change type, if any.
    #[must_use]
    pub fn change_type(&self) -> Option<&str> {
        self.data.as_ref()?.change_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::DirectoryUserEvent;

    #[test]
    fn deserializes_cloud_event_shape() {
        let event: DirectoryUserEvent = serde_json::from_value(serde_json::json!({
            "id": "evt-1",
            "source": "/tenants/t-1/applications/a-1",
            "type": "Microsoft.Graph.UserUpdated",
            "subject": "Users/abc123",
            "time": "2025-09-01T10:00:00Z",
            "data": {
                "changeType": "updated",
                "resourceData": {
                    "@odata.type": "#Microsoft.Graph.User",
                    "id": "abc123",
                    "eventTime": "2025-09-01T09:59:58Z"
                }
            }
        }))
        .unwrap_or_else(|error| panic!("cloud event should deserialize: {error}"));

        assert_eq!(event.event_type, "Microsoft.Graph.UserUpdated");
        assert_eq!(event.time.as_deref(), Some("2025-09-01T10:00:00Z"));
        assert_eq!(event.change_type(), Some("updated"));
        assert_eq!(
            event
                .resource_data()
                .and_then(|resource| resource.id.as_deref()),
            Some("abc123")
        );
    }

    #[test]
    fn deserializes_grid_event_shape_through_aliases() {
        let event: DirectoryUserEvent = serde_json::from_value(serde_json::json!({
            "id": "evt-2",
            "topic": "/tenants/t-1",
            "eventType": "Microsoft.Graph.UserCreated",
            "subject": "/tenants/t-1/Users/u-9",
            "eventTime": "2025-09-01T10:00:00Z",
            "dataVersion": "1.0"
        }))
        .unwrap_or_else(|error| panic!("grid event should deserialize: {error}"));

        assert_eq!(event.source, "/tenants/t-1");
        assert_eq!(event.event_type, "Microsoft.Graph.UserCreated");
        assert_eq!(event.time.as_deref(), Some("2025-09-01T10:00:00Z"));
        assert!(event.data.is_none());
    }

    #[test]
    fn tolerates_missing_envelope_fields() {
        let event: DirectoryUserEvent = serde_json::from_value(serde_json::json!({}))
            .unwrap_or_else(|error| panic!("empty event should deserialize: {error}"));

        assert_eq!(event, DirectoryUserEvent::default());
        assert!(event.resource_data().is_none());
    }
}
