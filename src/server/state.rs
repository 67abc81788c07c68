//! Server shared state
//!
//! Holds the resolver shared by all requests. Nothing in here is mutated
//! after startup.

use crate::resolve::AirQualityResolver;

/// Shared state for the HTTP server
pub struct AppState<G, S> {
    /// Resolver used by every request
    pub resolver: AirQualityResolver<G, S>,
}

impl<G, S> AppState<G, S> {
    /// Create new application state
    pub fn new(resolver: AirQualityResolver<G, S>) -> Self {
        Self { resolver }
    }
}
