//! Lead submission and confirmation lookup

use chrono::Utc;
use tracing::info;

use crate::core::RequestExecutor;
use crate::envelope::{status, ApiResponse};
use crate::error::Result;
use crate::fallback::{resolve, Operation, ResultSource};
use crate::models::{LeadRecord, LeadResponse, LeadSubmission};
use crate::util::sanitize_for_logging;

use super::common::ServiceContext;

/// Confirmation shown when the lead could not be confirmed remotely
pub const LOCAL_CONFIRMATION_MESSAGE: &str = "Votre demande a bien été envoyée aux fournisseurs sélectionnés.";

/// Page the wizard moves to after submission
pub const CONFIRMATION_REDIRECT: &str = "/confirmation";

const SUBMIT: Operation = Operation::fail_open("leads", "submit", status::CREATED);
const GET: Operation = Operation::fail_closed("leads", "get", "Lead not found");

/// Lead submission; the final step of the wizard
pub struct LeadsService<E> {
    context: ServiceContext<E>,
}

impl<E> Clone for LeadsService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<E: RequestExecutor> LeadsService<E> {
    pub fn new(context: ServiceContext<E>) -> Self {
        Self { context }
    }

    /// Submit a lead. Never reports failure to the caller.
    pub async fn submit(&self, lead: &LeadSubmission) -> ApiResponse<LeadResponse> {
        let url = self.context.endpoints.leads();
        let remote: Result<ApiResponse<LeadResponse>> = self.context.executor.post(&url, lead).await;

        let (response, source) = resolve(&SUBMIT, remote, || Some(local_confirmation()));

        if source == ResultSource::Local {
            let payload = serde_json::to_string(lead).unwrap_or_default();
            info!(
                service = SUBMIT.service,
                operation = SUBMIT.name,
                lead_id = response.data.as_ref().map(|d| d.lead_id.as_str()).unwrap_or_default(),
                suppliers = lead.supplier_ids.len(),
                payload = %sanitize_for_logging(&payload),
                "lead accepted locally"
            );
        }

        response
    }

    /// Fetch a submitted lead for the confirmation page
    pub async fn get(&self, id: &str) -> ApiResponse<LeadRecord> {
        let url = self.context.endpoints.lead(id);
        let remote: Result<ApiResponse<LeadRecord>> = self.context.executor.get(&url).await;
        resolve(&GET, remote, || None).0
    }
}

/// Synthetic acknowledgement with a time-based identifier
fn local_confirmation() -> LeadResponse {
    LeadResponse {
        success: true,
        lead_id: format!("LEAD-{}", Utc::now().timestamp_millis()),
        message: LOCAL_CONFIRMATION_MESSAGE.to_string(),
        redirect_url: Some(CONFIRMATION_REDIRECT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_confirmation_shape() {
        let confirmation = local_confirmation();

        assert!(confirmation.success);
        assert!(confirmation.lead_id.starts_with("LEAD-"));
        assert!(confirmation.lead_id["LEAD-".len()..].parse::<i64>().is_ok());
        assert_eq!(confirmation.redirect_url.as_deref(), Some("/confirmation"));
    }
}
