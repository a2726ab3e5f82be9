//! ==============================================================================
//! store.rs - shared telemetry state
//! ==============================================================================
//!
//! purpose:
//!     owns the one CurrentReading the receiver keeps. handlers get a clone of
//!     the handle, every clone points at the same state.
//!
//! locking:
//!     a single tokio rwlock covers all four fields. an ingest applies both of
//!     its groups under one write guard, so a reader never sees temperature
//!     without the moisture that came with it. racing writers: last one wins.
//!
//! ==============================================================================

use crate::domain::{CurrentReading, GroupUpdate, Ingest};
use crate::render::display_value;

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Clone, Default)]
pub struct TelemetryStore {
    inner: Arc<RwLock<CurrentReading>>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// apply whichever field-groups the payload carries
    pub async fn ingest(&self, payload: &Value) -> Ingest {
        let update = Ingest::extract(payload);
        if update.is_empty() {
            return update;
        }

        self.inner.write().await.apply(&update);

        if let GroupUpdate::Present(sample) = &update.sensor {
            info!(
                "Updated sensor data: Temperature={}, Moisture={}",
                display_value(&sample.temperature),
                display_value(&sample.moisture)
            );
        }
        if let GroupUpdate::Present(verdict) = &update.disease {
            info!(
                "Updated disease data: Disease={}, Probability={}",
                display_value(&verdict.disease),
                display_value(&verdict.probability)
            );
        }

        update
    }

    /// copy of the current reading
    pub async fn snapshot(&self) -> CurrentReading {
        self.inner.read().await.clone()
    }
}
