//! Company lookup by name or SIREN

use crate::core::RequestExecutor;
use crate::envelope::ApiResponse;
use crate::fallback::{with_local_fallback, Operation};
use crate::models::Company;

use super::common::{is_too_short, ServiceContext};

/// Maximum number of companies a local search returns
pub const MAX_LOCAL_RESULTS: usize = 10;

const SEARCH: Operation = Operation::substitute("companies", "search");
const GET: Operation = Operation::substitute("companies", "get").not_found_message("Company not found");

/// Company search and lookup
pub struct CompaniesService<E> {
    context: ServiceContext<E>,
}

impl<E> Clone for CompaniesService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<E: RequestExecutor> CompaniesService<E> {
    pub fn new(context: ServiceContext<E>) -> Self {
        Self { context }
    }

    /// Search companies by name or SIREN
    pub async fn search(&self, query: &str) -> ApiResponse<Vec<Company>> {
        if is_too_short(query) {
            return ApiResponse::empty();
        }

        let url = self.context.endpoints.company_search(query);
        with_local_fallback(&SEARCH, self.context.executor.get(&url), || {
            Some(search_local(self.context.dataset.companies(), query))
        })
        .await
    }

    /// Fetch one company by its SIREN
    pub async fn get_by_siren(&self, siren: &str) -> ApiResponse<Company> {
        let url = self.context.endpoints.company(siren);
        with_local_fallback(&GET, self.context.executor.get(&url), || {
            self.context
                .dataset
                .companies()
                .iter()
                .find(|company| company.siren == siren)
                .cloned()
        })
        .await
    }
}

/// Name matches case-insensitively, SIREN matches as typed
fn search_local(companies: &[Company], query: &str) -> Vec<Company> {
    let needle = query.to_lowercase();
    companies
        .iter()
        .filter(|company| company.name.to_lowercase().contains(&needle) || company.siren.contains(query))
        .take(MAX_LOCAL_RESULTS)
        .cloned()
        .collect()
}
