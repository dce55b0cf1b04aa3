//! Application services and ports.

#![forbid(unsafe_code)]

mod lifecycle_ports;
mod user_lifecycle_service;

pub use lifecycle_ports::{AccessToken, CredentialProvider, DirectoryClient, NotificationSender};
pub use user_lifecycle_service::{LifecycleOutcome, UserLifecycleService};
