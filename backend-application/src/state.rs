use std::sync::Arc;

use backend_domain::RuntimeConfig;

use crate::{EventStores, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub stores: Arc<EventStores>,
    pub metrics: Arc<Metrics>,
}
