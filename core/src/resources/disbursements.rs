use crate::api::{
    ApiClient, ApiResponse, Disbursement, ListFilter, Page, SendMoneyRequest, Service,
};
use crate::error::Result;

use super::{check_id, prepare_transfer};

/// Sending money to mobile-money recipients.
#[derive(Debug, Clone, Copy)]
pub struct Disbursements<'a> {
    api: &'a ApiClient,
}

impl<'a> Disbursements<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Send money to a recipient.
    ///
    /// Only a zero amount is rejected locally; limits are enforced by the API.
    /// Retrying with the same `reference` is safe; the API rejects duplicates.
    pub async fn send_money(
        &self,
        request: &SendMoneyRequest,
    ) -> Result<ApiResponse<Disbursement>> {
        let request = prepare_transfer(request, None)?;

        log::info!(
            "Sending {} UGX (reference {})",
            request.amount,
            request.reference
        );
        self.api.post_json("/disbursements", &request).await
    }

    pub async fn get_disbursement(
        &self,
        disbursement_id: &str,
    ) -> Result<ApiResponse<Disbursement>> {
        let id = check_id("Disbursement ID", disbursement_id)?;
        self.api.get_json(&format!("/disbursements/{}", id)).await
    }

    pub async fn get_disbursements(
        &self,
        filter: &ListFilter,
    ) -> Result<ApiResponse<Page<Disbursement>>> {
        self.api
            .get_json_with_query("/disbursements", filter.to_query()?)
            .await
    }

    /// Get available disbursement services.
    pub async fn get_services(&self) -> Result<ApiResponse<Page<Service>>> {
        self.api.get_json("/disbursements/services").await
    }

    pub fn generate_reference(&self) -> String {
        crate::types::generate_reference()
    }
}
