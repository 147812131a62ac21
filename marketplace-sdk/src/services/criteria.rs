//! Search criteria used by the supplier filters

use crate::core::RequestExecutor;
use crate::endpoints::CriteriaKind;
use crate::envelope::{status, ApiResponse};
use crate::fallback::{with_local_fallback, Operation};
use crate::models::CriteriaOption;

use super::common::ServiceContext;

const CAPACITIES: Operation = Operation::substitute("criteria", "capacities");
const ZONES: Operation = Operation::substitute("criteria", "zones");
const VOLTAGES: Operation = Operation::substitute("criteria", "voltages");
const OPTIONS: Operation = Operation::substitute("criteria", "options");

/// Criteria lists
pub struct CriteriaService<E> {
    context: ServiceContext<E>,
}

impl<E> Clone for CriteriaService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<E: RequestExecutor> CriteriaService<E> {
    pub fn new(context: ServiceContext<E>) -> Self {
        Self { context }
    }

    pub async fn capacities(&self) -> ApiResponse<Vec<CriteriaOption>> {
        self.fetch(&CAPACITIES, CriteriaKind::Capacities).await
    }

    pub async fn zones(&self) -> ApiResponse<Vec<CriteriaOption>> {
        self.fetch(&ZONES, CriteriaKind::Zones).await
    }

    pub async fn voltages(&self) -> ApiResponse<Vec<CriteriaOption>> {
        self.fetch(&VOLTAGES, CriteriaKind::Voltages).await
    }

    /// Additional equipment options
    pub async fn options(&self) -> ApiResponse<Vec<CriteriaOption>> {
        self.fetch(&OPTIONS, CriteriaKind::Options).await
    }

    /// Lift types offered by the search filters; there is no remote list
    pub fn lift_types(&self) -> ApiResponse<Vec<CriteriaOption>> {
        ApiResponse::ok(self.context.dataset.criteria().lift_types.clone(), status::OK)
    }

    /// Criteria tags preselected before the buyer refines the search
    pub fn default_criteria(&self) -> ApiResponse<Vec<String>> {
        ApiResponse::ok(self.context.dataset.criteria().defaults.clone(), status::OK)
    }

    async fn fetch(&self, operation: &Operation, kind: CriteriaKind) -> ApiResponse<Vec<CriteriaOption>> {
        let url = self.context.endpoints.criteria(kind);
        with_local_fallback(operation, self.context.executor.get(&url), || {
            let criteria = self.context.dataset.criteria();
            let local = match kind {
                CriteriaKind::Capacities => &criteria.capacities,
                CriteriaKind::Zones => &criteria.zones,
                CriteriaKind::Voltages => &criteria.voltages,
                CriteriaKind::Options => &criteria.options,
            };
            Some(local.clone())
        })
        .await
    }
}
