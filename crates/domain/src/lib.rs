//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod classification;
mod directory;
mod event;
mod normalizer;
mod notification;
mod timestamp;

pub use classification::{CreationCheck, NEW_WINDOW_MS};
pub use directory::{
    DIRECTORY_PROFILE_FIELDS, DirectoryProfile, DirectoryUserId, directory_profile_select,
};
pub use event::{DirectoryUserEvent, DirectoryUserEventData, ResourceData};
pub use normalizer::{
    EventTimeSource, IdentifierSource, NormalizedEvent, normalize_event, user_id_from_subject,
};
pub use notification::{ChatMessage, MISSING_FIELD_PLACEHOLDER};
pub use timestamp::parse_timestamp;
