//! Event normalization.
//!
//! Turns a [`DirectoryUserEvent`] into the user identifier and reference time
//! the classification pipeline needs. Each value is resolved by walking an
//! ordered list of extraction strategies and keeping the first one that
//! yields a value.

use chrono::{DateTime, Utc};

use crate::{DirectoryUserEvent, DirectoryUserId, parse_timestamp};

/// Strategy for locating the affected user's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierSource {
    /// `data.resourceData.id`.
    ResourceData,
    /// Trailing `Users/<id>` segment of the envelope subject.
    Subject,
}

impl IdentifierSource {
    /// Extraction order, highest priority first.
    pub const PRIORITY: [Self; 2] = [Self::ResourceData, Self::Subject];

    /// Attempts to extract an identifier from the event.
    #[must_use]
    pub fn extract(self, event: &DirectoryUserEvent) -> Option<DirectoryUserId> {
        match self {
            Self::ResourceData => event
                .resource_data()
                .and_then(|resource| resource.id.as_deref())
                .and_then(|id| DirectoryUserId::new(id).ok()),
            Self::Subject => event
                .subject
                .as_deref()
                .and_then(user_id_from_subject)
                .and_then(|id| DirectoryUserId::new(id).ok()),
        }
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceData => "resource_data",
            Self::Subject => "subject",
        }
    }
}

/// Strategy that produced the reference event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTimeSource {
    /// Envelope `time`.
    Envelope,
    /// `data.resourceData.eventTime`.
    ResourceData,
    /// Wall clock at invocation; no timestamp was present.
    WallClock,
}

impl EventTimeSource {
    /// Extraction order for timestamps carried by the event itself.
    pub const PRIORITY: [Self; 2] = [Self::Envelope, Self::ResourceData];

    /// Attempts to extract a parseable timestamp from the event.
    #[must_use]
    pub fn extract(self, event: &DirectoryUserEvent) -> Option<DateTime<Utc>> {
        match self {
            Self::Envelope => event.time.as_deref().and_then(parse_timestamp),
            Self::ResourceData => event
                .resource_data()
                .and_then(|resource| resource.event_time.as_deref())
                .and_then(parse_timestamp),
            Self::WallClock => None,
        }
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::ResourceData => "resource_data",
            Self::WallClock => "wall_clock",
        }
    }
}

/// Values extracted from one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    /// Affected user and the strategy that found it, or `None` when the event
    /// carries no usable identifier.
    pub user: Option<(IdentifierSource, DirectoryUserId)>,
    /// Reference time the creation timestamp is compared against.
    pub event_time: DateTime<Utc>,
    /// Strategy that produced `event_time`.
    pub event_time_source: EventTimeSource,
}

impl NormalizedEvent {
    /// Returns the resolved user identifier, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&DirectoryUserId> {
        self.user.as_ref().map(|(_, user_id)| user_id)
    }
}

/// Normalizes an event. `now` is used only when no timestamp is present.
#[must_use]
pub fn normalize_event(event: &DirectoryUserEvent, now: DateTime<Utc>) -> NormalizedEvent {
    let user = first_success(&IdentifierSource::PRIORITY, |source| source.extract(event));
    let (event_time_source, event_time) =
        first_success(&EventTimeSource::PRIORITY, |source| source.extract(event))
            .unwrap_or((EventTimeSource::WallClock, now));

    NormalizedEvent {
        user,
        event_time,
        event_time_source,
    }
}

/// Extracts `<id>` from a subject ending in `Users/<id>`.
///
/// The identifier must be the final path segment and contain no whitespace.
#[must_use]
pub fn user_id_from_subject(subject: &str) -> Option<&str> {
    let (head, token) = subject.rsplit_once('/')?;
    if !head.ends_with("Users") || token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }

    Some(token)
}

fn first_success<S, T>(strategies: &[S], extract: impl Fn(S) -> Option<T>) -> Option<(S, T)>
where
    S: Copy,
{
    strategies
        .iter()
        .copied()
        .find_map(|strategy| extract(strategy).map(|value| (strategy, value)))
}
