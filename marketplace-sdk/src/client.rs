//! Client facade
//!
//! [`DataClient`] owns one instance of every domain service. All services
//! share the same executor, endpoint resolver and dataset, so cloning the
//! client is cheap and clones may be used from many tasks at once.

use std::sync::Arc;

use crate::config::DataClientConfig;
use crate::core::{ClientBuilder, HttpExecutor, RequestExecutor};
use crate::dataset::LocalDataset;
use crate::endpoints::Endpoints;
use crate::services::{
    CompaniesService, CriteriaService, LeadsService, LocationsService, QuestionsService, ServiceContext,
    SuppliersService,
};

/// Entry point to the marketplace data
pub struct DataClient<E = HttpExecutor> {
    config: Arc<DataClientConfig>,
    context: ServiceContext<E>,
    companies: CompaniesService<E>,
    locations: LocationsService<E>,
    questions: QuestionsService<E>,
    suppliers: SuppliersService<E>,
    leads: LeadsService<E>,
    criteria: CriteriaService<E>,
}

impl DataClient {
    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<E: RequestExecutor> DataClient<E> {
    pub fn new(config: DataClientConfig, executor: Arc<E>, dataset: Arc<LocalDataset>) -> Self {
        let endpoints = Arc::new(Endpoints::new(config.base_url.clone()));
        let context = ServiceContext::new(executor, endpoints, dataset);

        Self {
            config: Arc::new(config),
            companies: CompaniesService::new(context.clone()),
            locations: LocationsService::new(context.clone()),
            questions: QuestionsService::new(context.clone()),
            suppliers: SuppliersService::new(context.clone()),
            leads: LeadsService::new(context.clone()),
            criteria: CriteriaService::new(context.clone()),
            context,
        }
    }

    pub fn companies(&self) -> &CompaniesService<E> {
        &self.companies
    }

    pub fn locations(&self) -> &LocationsService<E> {
        &self.locations
    }

    pub fn questions(&self) -> &QuestionsService<E> {
        &self.questions
    }

    pub fn suppliers(&self) -> &SuppliersService<E> {
        &self.suppliers
    }

    pub fn leads(&self) -> &LeadsService<E> {
        &self.leads
    }

    pub fn criteria(&self) -> &CriteriaService<E> {
        &self.criteria
    }

    pub fn config(&self) -> &DataClientConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.context.endpoints
    }

    pub fn dataset(&self) -> &LocalDataset {
        &self.context.dataset
    }

    pub fn executor(&self) -> &E {
        &self.context.executor
    }
}

impl<E> Clone for DataClient<E> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            context: self.context.clone(),
            companies: self.companies.clone(),
            locations: self.locations.clone(),
            questions: self.questions.clone(),
            suppliers: self.suppliers.clone(),
            leads: self.leads.clone(),
            criteria: self.criteria.clone(),
        }
    }
}
