//! Directory user lifecycle pipeline.
//!
//! One inbound event runs through normalize → credential → directory lookup →
//! classify → notify. Only a missing user identifier is absorbed; every
//! collaborator failure is returned to the caller unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use herald_core::AppResult;
use herald_domain::{
    ChatMessage, CreationCheck, DirectoryUserEvent, EventTimeSource, normalize_event,
};

use crate::{CredentialProvider, DirectoryClient, NotificationSender};


/// Terminal state of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LifecycleOutcome {
    /// The event carried no usable user identifier.
    Skipped,
    /// The user exists but was not created within the window.
    NotNew {
        /// Directory user identifier.
        user_id: String,
        /// Distance between event and creation time; absent when the
        /// directory has no creation time for the user.
        #[serde(skip_serializing_if = "Option::is_none")]
        skew_ms: Option<u64>,
    },
    /// The user is new and a notification was delivered.
    Notified {
        /// Directory user identifier.
        user_id: String,
        /// Principal name included in the message.
        user_principal_name: String,
    },
    /// The user is new but no notification sender is configured.
    NotificationsDisabled {
        /// Directory user identifier.
        user_id: String,
    },
}

/// Application service that classifies directory user events and announces
/// new users.
#[derive(Clone)]
pub struct UserLifecycleService {
    credential_provider: Arc<dyn CredentialProvider>,
    directory_client: Arc<dyn DirectoryClient>,
    notification_sender: Option<Arc<dyn NotificationSender>>,
}

impl UserLifecycleService {
    /// Creates a new lifecycle service. Passing `None` as the sender disables
    /// notifications without affecting classification.
    #[must_use]
    pub fn new(
        credential_provider: Arc<dyn CredentialProvider>,
        directory_client: Arc<dyn DirectoryClient>,
        notification_sender: Option<Arc<dyn NotificationSender>>,
    ) -> Self {
        Self {
            credential_provider,
            directory_client,
            notification_sender,
        }
    }

    /// Processes one event using the current wall clock as time fallback.
    pub async fn handle_event(&self, event: &DirectoryUserEvent) -> AppResult<LifecycleOutcome> {
        self.handle_event_at(event, Utc::now()).await
    }

    /// Processes one event; `now` stands in for a missing event timestamp.
    pub async fn handle_event_at(
        &self,
        event: &DirectoryUserEvent,
        now: DateTime<Utc>,
    ) -> AppResult<LifecycleOutcome> {
        info!(
            event_id = %event.id,
            event_type = %event.event_type,
            subject = event.subject.as_deref().unwrap_or_default(),
            change_type = event.change_type().unwrap_or_default(),
            "directory user event received"
        );

        let normalized = normalize_event(event, now);
        let Some((identifier_source, user_id)) = normalized.user else {
            warn!(
                event_id = %event.id,
                "no user id in subject or resource data; skipping event"
            );
            return Ok(LifecycleOutcome::Skipped);
        };

        if normalized.event_time_source == EventTimeSource::WallClock {
            debug!(
                event_id = %event.id,
                "event carries no timestamp; comparing against invocation time"
            );
        }

        let access_token = self.credential_provider.access_token().await?;

        info!(
            user_id = %user_id,
            identifier_source = identifier_source.as_str(),
            "fetching directory user profile"
        );
        let profile = self
            .directory_client
            .fetch_user_profile(&access_token, &user_id)
            .await?;

        let Some(created_at) = profile.created_at()? else {
            info!(
                user_id = %user_id,
                user_principal_name = %profile.user_principal_name,
                "directory has no creation time for user; skipping notification"
            );
            return Ok(LifecycleOutcome::NotNew {
                user_id: user_id.to_string(),
                skew_ms: None,
            });
        };

        let check = CreationCheck::new(normalized.event_time, created_at);
        if !check.is_new() {
            info!(
                user_id = %user_id,
                user_principal_name = %profile.user_principal_name,
                skew_ms = check.skew_ms(),
                "user updated but not newly created; skipping notification"
            );
            return Ok(LifecycleOutcome::NotNew {
                user_id: user_id.to_string(),
                skew_ms: Some(check.skew_ms()),
            });
        }

        let Some(notification_sender) = self.notification_sender.as_ref() else {
            debug!(
                user_id = %user_id,
                "new user detected but notifications are disabled"
            );
            return Ok(LifecycleOutcome::NotificationsDisabled {
                user_id: user_id.to_string(),
            });
        };

        notification_sender
            .send_message(&ChatMessage::new_user_created(&profile))
            .await?;

        info!(
            user_id = %user_id,
            user_principal_name = %profile.user_principal_name,
            "new user notification sent"
        );

        Ok(LifecycleOutcome::Notified {
            user_id: user_id.to_string(),
            user_principal_name: profile.user_principal_name,
        })
    }
}
