use crate::api::{
    ApiClient, ApiResponse, PhoneVerificationResult, PhoneVerificationServiceInfo,
    SubscriptionStatus, VerifyPhoneRequest,
};
use crate::error::Result;
use crate::phone;

/// Lookup of the registered owner of a mobile-money number.
#[derive(Debug, Clone, Copy)]
pub struct PhoneVerification<'a> {
    api: &'a ApiClient,
}

impl<'a> PhoneVerification<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Verify a phone number and fetch the account holder's name.
    ///
    /// Malformed numbers are rejected locally.
    pub async fn verify_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<ApiResponse<PhoneVerificationResult>> {
        let request = VerifyPhoneRequest {
            phone_number: phone::format_phone_number(phone_number)?,
        };
        self.api
            .post_json("/phone-verification/verify", &request)
            .await
    }

    pub async fn get_service_info(&self) -> Result<ApiResponse<PhoneVerificationServiceInfo>> {
        self.api.get_json("/phone-verification/service-info").await
    }

    pub async fn get_subscription_status(&self) -> Result<ApiResponse<SubscriptionStatus>> {
        self.api
            .get_json("/phone-verification/subscription-status")
            .await
    }
}
