use crate::planner::generator::PlanGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless; wraps the generation service behind an `Arc`.
    pub generator: PlanGenerator,
}
