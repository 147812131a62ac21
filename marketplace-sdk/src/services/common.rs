//! State shared by the domain services

use std::sync::Arc;

use crate::core::RequestExecutor;
use crate::dataset::LocalDataset;
use crate::endpoints::Endpoints;

/// Searches shorter than this many characters never reach the network
pub const MIN_QUERY_CHARS: usize = 2;

/// Executor, endpoint resolver and local dataset, shared by every service
pub struct ServiceContext<E> {
    pub executor: Arc<E>,
    pub endpoints: Arc<Endpoints>,
    pub dataset: Arc<LocalDataset>,
}

impl<E: RequestExecutor> ServiceContext<E> {
    pub fn new(executor: Arc<E>, endpoints: Arc<Endpoints>, dataset: Arc<LocalDataset>) -> Self {
        Self {
            executor,
            endpoints,
            dataset,
        }
    }
}

impl<E> Clone for ServiceContext<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            endpoints: Arc::clone(&self.endpoints),
            dataset: Arc::clone(&self.dataset),
        }
    }
}

/// True when a search input is too short to be worth a round trip
pub(crate) fn is_too_short(query: &str) -> bool {
    query.chars().count() < MIN_QUERY_CHARS
}
