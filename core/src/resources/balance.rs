use crate::api::{AccountBalance, ApiClient, ApiResponse, BalanceEntry, ListFilter, Page};
use crate::error::Result;

/// Account balance queries.
#[derive(Debug, Clone, Copy)]
pub struct Balance<'a> {
    api: &'a ApiClient,
}

impl<'a> Balance<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_balance(&self) -> Result<ApiResponse<AccountBalance>> {
        self.api.get_json("/balance").await
    }

    /// Balance movements, newest first.
    pub async fn get_balance_history(
        &self,
        filter: &ListFilter,
    ) -> Result<ApiResponse<Page<BalanceEntry>>> {
        self.api
            .get_json_with_query("/balance/history", filter.to_query()?)
            .await
    }
}
