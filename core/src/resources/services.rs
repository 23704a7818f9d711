use crate::api::{ApiClient, ApiResponse, Page, Service, ServiceFilter};
use crate::error::Result;

use super::check_id;

/// Payment services (providers and networks) available to the account.
#[derive(Debug, Clone, Copy)]
pub struct Services<'a> {
    api: &'a ApiClient,
}

impl<'a> Services<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_services(&self, filter: &ServiceFilter) -> Result<ApiResponse<Page<Service>>> {
        self.api
            .get_json_with_query("/services", filter.to_query())
            .await
    }

    pub async fn get_service(&self, uuid: &str) -> Result<ApiResponse<Service>> {
        let uuid = check_id("Service UUID", uuid)?;
        self.api.get_json(&format!("/services/{}", uuid)).await
    }
}
