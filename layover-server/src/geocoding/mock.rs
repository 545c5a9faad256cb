//! Static geocoder for running without a GeoNames account.
//!
//! Serves canned candidates from memory, or fails every lookup in a fixed
//! way so the resolver's fallback path can be exercised.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::GeocodeError;
use super::provider::{GeocodeCandidate, Geocoder};

/// How a static geocoder answers queries it has no canned data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Unknown queries return zero candidates.
    Answer,
    /// Every query fails as if the service were down.
    Unreachable,
    /// Every query fails because no account is configured.
    Disabled,
}

/// Geocoder that serves pre-loaded candidates, keyed by lowercase query.
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    responses: Arc<HashMap<String, Vec<GeocodeCandidate>>>,
    mode: Mode,
    calls: Arc<AtomicUsize>,
}

impl StaticGeocoder {
    /// A geocoder that knows nothing and returns zero candidates.
    pub fn empty() -> Self {
        Self::with_mode(HashMap::new(), Mode::Answer)
    }

    /// A geocoder whose every lookup fails with a 503.
    pub fn unreachable() -> Self {
        Self::with_mode(HashMap::new(), Mode::Unreachable)
    }

    /// A geocoder whose every lookup fails with `NotConfigured`.
    pub fn disabled() -> Self {
        Self::with_mode(HashMap::new(), Mode::Disabled)
    }

    fn with_mode(responses: HashMap<String, Vec<GeocodeCandidate>>, mode: Mode) -> Self {
        Self {
            responses: Arc::new(responses),
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add canned candidates for a query.
    pub fn with_response(mut self, query: &str, candidates: Vec<GeocodeCandidate>) -> Self {
        Arc::make_mut(&mut self.responses).insert(query.to_lowercase(), candidates);
        self
    }

    /// Number of lookups served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.mode {
            Mode::Unreachable => Err(GeocodeError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
            Mode::Disabled => Err(GeocodeError::NotConfigured),
            Mode::Answer => Ok(self
                .responses
                .get(&query.to_lowercase())
                .cloned()
                .unwrap_or_default()),
        }
    }
}
