use herald_application::UserLifecycleService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle_service: UserLifecycleService,
}
