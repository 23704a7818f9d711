use crate::api::{ApiClient, ApiResponse, Page, Transaction, TransactionFilter};
use crate::error::Result;

use super::check_id;

/// Read access to all transactions on the account.
#[derive(Debug, Clone, Copy)]
pub struct Transactions<'a> {
    api: &'a ApiClient,
}

impl<'a> Transactions<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<ApiResponse<Page<Transaction>>> {
        self.api
            .get_json_with_query("/transactions", filter.to_query()?)
            .await
    }

    pub async fn get_transaction(&self, uuid: &str) -> Result<ApiResponse<Transaction>> {
        let uuid = check_id("Transaction UUID", uuid)?;
        self.api.get_json(&format!("/transactions/{}", uuid)).await
    }
}
