use crate::api::{Account, AccountUpdate, ApiClient, ApiResponse};
use crate::error::{Error, Result};
use crate::phone;

/// Merchant account details and settings.
#[derive(Debug, Clone, Copy)]
pub struct Accounts<'a> {
    api: &'a ApiClient,
}

impl<'a> Accounts<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_account(&self) -> Result<ApiResponse<Account>> {
        self.api.get_json("/account").await
    }

    /// Update account settings. Only the fields that are set are sent.
    pub async fn update_account(&self, update: &AccountUpdate) -> Result<ApiResponse<Account>> {
        if update.is_empty() {
            return Err(Error::validation("Nothing to update"));
        }

        let mut update = update.clone();
        if let Some(number) = &update.phone_number {
            update.phone_number = Some(phone::format_phone_number(number)?);
        }

        self.api.put_json("/account", &update).await
    }
}
