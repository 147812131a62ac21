//! Supplier listing, matching and search

use crate::core::RequestExecutor;
use crate::envelope::ApiResponse;
use crate::fallback::{with_local_fallback, Operation};
use crate::models::{RecommendedSuppliers, Supplier, SupplierSearchParams, UserAnswers};

use super::common::ServiceContext;

const LIST: Operation = Operation::substitute("suppliers", "list");
const GET: Operation = Operation::substitute("suppliers", "get").not_found_message("Supplier not found");
const RECOMMENDED: Operation = Operation::substitute("suppliers", "recommended");
const SEARCH: Operation = Operation::substitute("suppliers", "search");

/// Supplier queries used on the matching step
pub struct SuppliersService<E> {
    context: ServiceContext<E>,
}

impl<E> Clone for SuppliersService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<E: RequestExecutor> SuppliersService<E> {
    pub fn new(context: ServiceContext<E>) -> Self {
        Self { context }
    }

    /// Every supplier, recommended ones first
    pub async fn list(&self) -> ApiResponse<Vec<Supplier>> {
        let url = self.context.endpoints.suppliers();
        with_local_fallback(&LIST, self.context.executor.get(&url), || {
            Some(self.context.dataset.all_suppliers().cloned().collect())
        })
        .await
    }

    pub async fn get(&self, id: &str) -> ApiResponse<Supplier> {
        let url = self.context.endpoints.supplier(id);
        with_local_fallback(&GET, self.context.executor.get(&url), || {
            self.context
                .dataset
                .all_suppliers()
                .find(|supplier| supplier.id == id)
                .cloned()
        })
        .await
    }

    /// Suppliers matched to the wizard answers.
    ///
    /// Locally there is no scoring: the stored split is returned as is.
    pub async fn recommended(&self, answers: &UserAnswers) -> ApiResponse<RecommendedSuppliers> {
        let url = self.context.endpoints.recommended_suppliers(answers);
        with_local_fallback(&RECOMMENDED, self.context.executor.get(&url), || {
            Some(self.context.dataset.supplier_split().clone())
        })
        .await
    }

    /// Filtered search; locally only the free-text filter is applied
    pub async fn search(&self, params: &SupplierSearchParams) -> ApiResponse<Vec<Supplier>> {
        let url = self.context.endpoints.supplier_search(params);
        with_local_fallback(&SEARCH, self.context.executor.get(&url), || {
            Some(search_local(self.context.dataset.all_suppliers(), params.text_query()))
        })
        .await
    }
}

fn search_local<'a>(suppliers: impl Iterator<Item = &'a Supplier>, text: Option<&str>) -> Vec<Supplier> {
    let needle = match text {
        Some(text) => text.to_lowercase(),
        None => return suppliers.cloned().collect(),
    };

    suppliers
        .filter(|supplier| {
            supplier.product_name.to_lowercase().contains(&needle)
                || supplier.supplier_name.to_lowercase().contains(&needle)
                || supplier.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
