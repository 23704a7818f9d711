use crate::api::{ApiClient, ApiResponse, Page, WebhookEndpoint, WebhookRequest};
use crate::error::{Error, Result};

use super::check_id;

/// Management of the webhook endpoints registered for the account.
///
/// Validating inbound webhook calls is done by [`crate::webhook::WebhookHandler`].
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    api: &'a ApiClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<ApiResponse<Page<WebhookEndpoint>>> {
        self.api.get_json("/webhooks").await
    }

    /// Register a new endpoint. `url` and `event_type` are required.
    pub async fn create(&self, request: &WebhookRequest) -> Result<ApiResponse<WebhookEndpoint>> {
        let mut errors = Vec::new();
        match request.url.as_deref() {
            None | Some("") => errors.push("Webhook URL is required".to_string()),
            Some(url) if !url.starts_with("https://") && !url.starts_with("http://") => {
                errors.push(format!("Webhook URL must be http(s): {}", url))
            }
            Some(_) => {}
        }
        if request.event_type.as_deref().is_none_or(str::is_empty) {
            errors.push("Event type is required".to_string());
        }
        if !errors.is_empty() {
            return Err(Error::Validation {
                message: "Validation failed".to_string(),
                errors,
            });
        }

        self.api.post_json("/webhooks", request).await
    }

    pub async fn get(&self, webhook_id: &str) -> Result<ApiResponse<WebhookEndpoint>> {
        let id = check_id("Webhook ID", webhook_id)?;
        self.api.get_json(&format!("/webhooks/{}", id)).await
    }

    pub async fn update(
        &self,
        webhook_id: &str,
        request: &WebhookRequest,
    ) -> Result<ApiResponse<WebhookEndpoint>> {
        let id = check_id("Webhook ID", webhook_id)?;
        self.api.put_json(&format!("/webhooks/{}", id), request).await
    }

    pub async fn delete(&self, webhook_id: &str) -> Result<()> {
        let id = check_id("Webhook ID", webhook_id)?;
        let _: serde::de::IgnoredAny = self.api.delete(&format!("/webhooks/{}", id)).await?;
        Ok(())
    }
}
