//! Application state for the web layer.

use std::sync::Arc;

use crate::fare::FareTable;
use crate::network::Network;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station, line and section registry with its graph
    pub network: Arc<Network>,

    /// Fare schedule applied to path distances
    pub fares: Arc<FareTable>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, fares: FareTable) -> Self {
        Self {
            network: Arc::new(network),
            fares: Arc::new(fares),
        }
    }
}
