//! Postal code, city and country lookups

use crate::core::RequestExecutor;
use crate::envelope::ApiResponse;
use crate::fallback::{with_local_fallback, Operation};
use crate::models::PostalCodeCity;

use super::common::{is_too_short, ServiceContext};

/// Maximum number of postal codes a local search returns
pub const MAX_LOCAL_POSTAL_CODES: usize = 8;

const POSTAL_CODES: Operation = Operation::substitute("locations", "postal_codes");
const CITIES: Operation = Operation::substitute("locations", "cities");
const COUNTRIES: Operation = Operation::substitute("locations", "countries");

/// Location lookups used on the profile step
pub struct LocationsService<E> {
    context: ServiceContext<E>,
}

impl<E> Clone for LocationsService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<E: RequestExecutor> LocationsService<E> {
    pub fn new(context: ServiceContext<E>) -> Self {
        Self { context }
    }

    /// Postal codes starting with `prefix`
    pub async fn search_postal_codes(&self, prefix: &str) -> ApiResponse<Vec<PostalCodeCity>> {
        if is_too_short(prefix) {
            return ApiResponse::empty();
        }

        let url = self.context.endpoints.postal_codes(prefix);
        with_local_fallback(&POSTAL_CODES, self.context.executor.get(&url), || {
            Some(
                self.context
                    .dataset
                    .postal_codes()
                    .iter()
                    .filter(|entry| entry.postal_code.starts_with(prefix))
                    .take(MAX_LOCAL_POSTAL_CODES)
                    .cloned()
                    .collect(),
            )
        })
        .await
    }

    /// City names served by one postal code
    pub async fn cities(&self, postal_code: &str) -> ApiResponse<Vec<String>> {
        let url = self.context.endpoints.cities(postal_code);
        with_local_fallback(&CITIES, self.context.executor.get(&url), || {
            Some(
                self.context
                    .dataset
                    .postal_codes()
                    .iter()
                    .filter(|entry| entry.postal_code == postal_code)
                    .map(|entry| entry.city.clone())
                    .collect(),
            )
        })
        .await
    }

    pub async fn countries(&self) -> ApiResponse<Vec<String>> {
        let url = self.context.endpoints.countries();
        with_local_fallback(&COUNTRIES, self.context.executor.get(&url), || {
            Some(self.context.dataset.countries().to_vec())
        })
        .await
    }
}
