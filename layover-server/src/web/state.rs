//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::PlanningService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Validation, recommendation and sessions
    pub planner: Arc<PlanningService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: PlanningService) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
