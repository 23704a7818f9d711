use crate::api::ApiClient;
use crate::config::Config;
use crate::resources::{
    Accounts, Balance, Collections, Disbursements, PhoneVerification, Services, Transactions,
    Webhooks,
};
use crate::transport::Transport;
use crate::webhook::WebhookHandler;

/// The main client for interacting with MarzPay.
///
/// Holds the configuration and the transport; everything else is handed out
/// per call as a short-lived resource client:
///
/// ```rust,ignore
/// let client = Client::new(Config::new(api_key, api_secret))?;
/// let balance = client.balance().get_balance().await?;
/// ```
///
/// Calls are independent of each other. The client is cheap to clone and can
/// be shared between tasks.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: ApiClient,
}

impl Client {
    /// Create a new client talking to the API over HTTPS.
    ///
    /// # Arguments
    /// * `config` - API credentials, base URL and timeout
    pub fn new(config: Config) -> crate::Result<Self> {
        Ok(Self {
            api_client: ApiClient::new(config)?,
        })
    }

    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> crate::Result<Self> {
        Ok(Self {
            api_client: ApiClient::with_transport(config, transport)?,
        })
    }

    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    pub fn config(&self) -> &Config {
        self.api_client.config()
    }

    pub fn collections(&self) -> Collections<'_> {
        Collections::new(&self.api_client)
    }

    pub fn disbursements(&self) -> Disbursements<'_> {
        Disbursements::new(&self.api_client)
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(&self.api_client)
    }

    pub fn balance(&self) -> Balance<'_> {
        Balance::new(&self.api_client)
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(&self.api_client)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(&self.api_client)
    }

    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(&self.api_client)
    }

    pub fn phone_verification(&self) -> PhoneVerification<'_> {
        PhoneVerification::new(&self.api_client)
    }

    /// Handler for validating inbound webhooks signed with `secret`.
    pub fn webhook_handler(&self, secret: impl AsRef<[u8]>) -> WebhookHandler {
        WebhookHandler::new(secret)
    }
}
