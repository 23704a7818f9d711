use crate::api::{
    ApiClient, ApiResponse, CollectMoneyRequest, Collection, ListFilter, Page, Service,
};
use crate::error::Result;

use super::{AmountLimits, check_id, prepare_transfer};

/// Collections accept 500 to 10,000,000 UGX.
pub const COLLECTION_LIMITS: (u64, u64) = (500, 10_000_000);

/// Money collection from customers via mobile money.
#[derive(Debug, Clone, Copy)]
pub struct Collections<'a> {
    api: &'a ApiClient,
}

impl<'a> Collections<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Collect money from a customer.
    ///
    /// The request is validated and the phone number normalised before
    /// anything is sent. Retrying with the same `reference` is safe; the API
    /// rejects duplicates.
    pub async fn collect_money(
        &self,
        request: &CollectMoneyRequest,
    ) -> Result<ApiResponse<Collection>> {
        let (min, max) = COLLECTION_LIMITS;
        let request = prepare_transfer(request, Some(AmountLimits { min, max }))?;

        log::info!(
            "Collecting {} UGX (reference {})",
            request.amount,
            request.reference
        );
        self.api.post_json("/collections", &request).await
    }

    /// Get collection details by ID.
    pub async fn get_collection(&self, collection_id: &str) -> Result<ApiResponse<Collection>> {
        let id = check_id("Collection ID", collection_id)?;
        self.api.get_json(&format!("/collections/{}", id)).await
    }

    /// List collections, optionally filtered.
    pub async fn get_collections(
        &self,
        filter: &ListFilter,
    ) -> Result<ApiResponse<Page<Collection>>> {
        self.api
            .get_json_with_query("/collections", filter.to_query()?)
            .await
    }

    /// Get available collection services.
    pub async fn get_services(&self) -> Result<ApiResponse<Page<Service>>> {
        self.api.get_json("/collections/services").await
    }

    /// Generate a unique reference for a collection.
    pub fn generate_reference(&self) -> String {
        crate::types::generate_reference()
    }
}
