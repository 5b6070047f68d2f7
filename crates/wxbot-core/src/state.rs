//! The selected report location, shared by the command handler and the
//! scheduled reporter.

use tokio::sync::RwLock;
use tracing::info;

use crate::types::{Coordinates, Location};

/// Snapshot of the active location: a free-text label plus coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentLocation {
    pub label: String,
    pub coords: Coordinates,
}

/// Process-wide location record. Reverts to the configured default on restart.
///
/// Callers take one [`CurrentLocation`] snapshot per handler invocation and
/// use it for both the fetch and the report title, so a concurrent `set`
/// can never split a report across two locations.
#[derive(Debug)]
pub struct LocationState {
    inner: RwLock<CurrentLocation>,
}

impl LocationState {
    pub fn new(initial: CurrentLocation) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub async fn current(&self) -> CurrentLocation {
        self.inner.read().await.clone()
    }

    /// Replace the active location with a geocoded one. Returns the new label.
    pub async fn set(&self, location: &Location) -> String {
        let label = location.label();
        let mut guard = self.inner.write().await;
        *guard = CurrentLocation {
            label: label.clone(),
            coords: location.coords,
        };
        info!(label = %label, coords = %location.coords, "report location changed");
        label
    }
}
