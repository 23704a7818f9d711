use crate::WebhookEvent;
use crate::map_err_to_js;
use crate::to_js_value;
use marzpay_core::api as core_api;
use marzpay_core::{Config, TransactionStatus};
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

fn parse_amount(amount: f64) -> Result<u64, JsValue> {
    if !amount.is_finite() || amount < 0.0 || amount.fract() != 0.0 || amount > u64::MAX as f64 {
        return Err(JsValue::from_str(&format!(
            "Amount must be a whole number of UGX, got {}",
            amount
        )));
    }
    Ok(amount as u64)
}

fn parse_date(value: Option<String>) -> Result<Option<time::Date>, JsValue> {
    let Some(value) = value else {
        return Ok(None);
    };
    let format = time::format_description::parse("[year]-[month]-[day]")
        .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
    time::Date::parse(&value, &format)
        .map(Some)
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", value, e)))
}

fn list_filter(
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
) -> Result<core_api::ListFilter, JsValue> {
    Ok(core_api::ListFilter {
        page,
        limit,
        status: status.map(|s| s.parse::<TransactionStatus>().unwrap_or_else(|e| match e {})),
        from_date: parse_date(from_date)?,
        to_date: parse_date(to_date)?,
    })
}

fn transfer_request(
    amount: f64,
    phone_number: String,
    reference: String,
    description: Option<String>,
    callback_url: Option<String>,
) -> Result<core_api::TransferRequest, JsValue> {
    let mut request = core_api::TransferRequest::new(parse_amount(amount)?, phone_number, reference);
    request.description = description;
    request.callback_url = callback_url;
    Ok(request)
}

fn webhook_request(
    url: Option<String>,
    event_type: Option<String>,
    environment: Option<String>,
    is_active: Option<bool>,
) -> core_api::WebhookRequest {
    core_api::WebhookRequest {
        url,
        event_type,
        environment,
        is_active,
    }
}

/// MarzPay client.
#[wasm_bindgen]
pub struct Client {
    inner: marzpay_core::Client,
}

#[wasm_bindgen]
impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` - MarzPay API key
    /// * `api_secret` - MarzPay API secret
    /// * `base_url` - API URL, defaults to production
    /// * `timeout_ms` - Request timeout in milliseconds, defaults to 30s
    #[wasm_bindgen(constructor)]
    pub fn new(
        api_key: String,
        api_secret: String,
        base_url: Option<String>,
        timeout_ms: Option<u32>,
    ) -> Result<Client, JsValue> {
        let mut config = Config::new(api_key, api_secret);
        if let Some(base_url) = base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(timeout_ms) = timeout_ms {
            config = config.with_timeout(Duration::from_millis(u64::from(timeout_ms)));
        }

        Ok(Client {
            inner: map_err_to_js!(marzpay_core::Client::new(config))?,
        })
    }

    /// Generate a unique transaction reference.
    #[wasm_bindgen(js_name = "generateReference")]
    pub fn generate_reference(&self) -> String {
        marzpay_core::generate_reference()
    }

    /// Collect money from a customer.
    #[wasm_bindgen(js_name = "collectMoney")]
    pub async fn collect_money(
        &self,
        amount: f64,
        phone_number: String,
        reference: String,
        description: Option<String>,
        callback_url: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let request = transfer_request(amount, phone_number, reference, description, callback_url)?;
        let result = map_err_to_js!(self.inner.collections().collect_money(&request).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getCollection")]
    pub async fn get_collection(&self, collection_id: String) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.collections().get_collection(&collection_id).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getCollections")]
    pub async fn get_collections(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        status: Option<String>,
        from_date: Option<String>,
        to_date: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let filter = list_filter(page, limit, status, from_date, to_date)?;
        let result = map_err_to_js!(self.inner.collections().get_collections(&filter).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getCollectionServices")]
    pub async fn get_collection_services(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.collections().get_services().await)?;
        to_js_value(&result)
    }

    /// Send money to a recipient.
    #[wasm_bindgen(js_name = "sendMoney")]
    pub async fn send_money(
        &self,
        amount: f64,
        phone_number: String,
        reference: String,
        description: Option<String>,
        callback_url: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let request = transfer_request(amount, phone_number, reference, description, callback_url)?;
        let result = map_err_to_js!(self.inner.disbursements().send_money(&request).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getDisbursement")]
    pub async fn get_disbursement(&self, disbursement_id: String) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(
            self.inner
                .disbursements()
                .get_disbursement(&disbursement_id)
                .await
        )?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getDisbursements")]
    pub async fn get_disbursements(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        status: Option<String>,
        from_date: Option<String>,
        to_date: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let filter = list_filter(page, limit, status, from_date, to_date)?;
        let result = map_err_to_js!(self.inner.disbursements().get_disbursements(&filter).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getDisbursementServices")]
    pub async fn get_disbursement_services(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.disbursements().get_services().await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getAccount")]
    pub async fn get_account(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.accounts().get_account().await)?;
        to_js_value(&result)
    }

    /// Update account settings. Only the fields that are given are sent.
    #[wasm_bindgen(js_name = "updateAccount")]
    pub async fn update_account(
        &self,
        business_name: Option<String>,
        email: Option<String>,
        phone_number: Option<String>,
        callback_url: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let update = core_api::AccountUpdate {
            business_name,
            email,
            phone_number,
            callback_url,
        };
        let result = map_err_to_js!(self.inner.accounts().update_account(&update).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getBalance")]
    pub async fn get_balance(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.balance().get_balance().await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getBalanceHistory")]
    pub async fn get_balance_history(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        from_date: Option<String>,
        to_date: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let filter = list_filter(page, limit, None, from_date, to_date)?;
        let result = map_err_to_js!(self.inner.balance().get_balance_history(&filter).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getTransactions")]
    pub async fn get_transactions(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        status: Option<String>,
        transaction_type: Option<String>,
        provider: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let filter = core_api::TransactionFilter {
            list: list_filter(page, limit, status, None, None)?,
            transaction_type,
            provider,
        };
        let result = map_err_to_js!(self.inner.transactions().get_transactions(&filter).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getTransaction")]
    pub async fn get_transaction(&self, uuid: String) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.transactions().get_transaction(&uuid).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getServices")]
    pub async fn get_services(
        &self,
        service_type: Option<String>,
        provider: Option<String>,
        status: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let filter = core_api::ServiceFilter {
            service_type,
            provider,
            status,
        };
        let result = map_err_to_js!(self.inner.services().get_services(&filter).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getService")]
    pub async fn get_service(&self, uuid: String) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.services().get_service(&uuid).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "listWebhooks")]
    pub async fn list_webhooks(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.webhooks().list().await)?;
        to_js_value(&result)
    }

    /// Register a webhook endpoint. `url` and `event_type` are required.
    #[wasm_bindgen(js_name = "createWebhook")]
    pub async fn create_webhook(
        &self,
        url: Option<String>,
        event_type: Option<String>,
        environment: Option<String>,
        is_active: Option<bool>,
    ) -> Result<JsValue, JsValue> {
        let request = webhook_request(url, event_type, environment, is_active);
        let result = map_err_to_js!(self.inner.webhooks().create(&request).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getWebhook")]
    pub async fn get_webhook(&self, webhook_id: String) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.webhooks().get(&webhook_id).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "updateWebhook")]
    pub async fn update_webhook(
        &self,
        webhook_id: String,
        url: Option<String>,
        event_type: Option<String>,
        environment: Option<String>,
        is_active: Option<bool>,
    ) -> Result<JsValue, JsValue> {
        let request = webhook_request(url, event_type, environment, is_active);
        let result = map_err_to_js!(self.inner.webhooks().update(&webhook_id, &request).await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "deleteWebhook")]
    pub async fn delete_webhook(&self, webhook_id: String) -> Result<(), JsValue> {
        map_err_to_js!(self.inner.webhooks().delete(&webhook_id).await)
    }

    #[wasm_bindgen(js_name = "verifyPhoneNumber")]
    pub async fn verify_phone_number(&self, phone_number: String) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(
            self.inner
                .phone_verification()
                .verify_phone_number(&phone_number)
                .await
        )?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getPhoneVerificationServiceInfo")]
    pub async fn get_phone_verification_service_info(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(self.inner.phone_verification().get_service_info().await)?;
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "getPhoneVerificationSubscriptionStatus")]
    pub async fn get_phone_verification_subscription_status(&self) -> Result<JsValue, JsValue> {
        let result = map_err_to_js!(
            self.inner
                .phone_verification()
                .get_subscription_status()
                .await
        )?;
        to_js_value(&result)
    }
}

/// Validates inbound webhook calls.
#[wasm_bindgen]
pub struct WebhookHandler {
    inner: marzpay_core::WebhookHandler,
}

#[wasm_bindgen]
impl WebhookHandler {
    #[wasm_bindgen(constructor)]
    pub fn new(secret: String) -> WebhookHandler {
        WebhookHandler {
            inner: marzpay_core::WebhookHandler::new(secret),
        }
    }

    /// Check the signature of a raw body and parse it.
    ///
    /// Throws when the signature does not match.
    pub fn verify(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent, JsValue> {
        let event = map_err_to_js!(self.inner.verify(payload, signature))?;
        Ok(event.into())
    }

    #[wasm_bindgen(js_name = "isValid")]
    pub fn is_valid(&self, payload: &[u8], signature: &str) -> bool {
        self.inner.is_valid(payload, signature)
    }

    /// Compute the signature for a payload, e.g. to forward a webhook.
    pub fn sign(&self, payload: &[u8]) -> String {
        self.inner.verifier().sign(payload)
    }
}
