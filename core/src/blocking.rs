//! Blocking facade over [`crate::Client`].
//!
//! Drives the async client on a private current-thread Tokio runtime, for
//! programs without an async runtime of their own. Must not be used from
//! inside an async context.
//!
//! ```rust,ignore
//! let client = marzpay_core::blocking::Client::new(Config::new(api_key, api_secret))?;
//! let request = CollectMoneyRequest::new(5000, "0759983853", client.collections().generate_reference());
//! let result = client.block_on(client.collections().collect_money(&request))?;
//! ```

use std::future::Future;
use std::ops::Deref;

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::transport::Transport;

/// Blocking MarzPay client.
///
/// Dereferences to the async [`crate::Client`], so every resource is
/// reachable; wrap the returned futures in [`Client::block_on`].
#[derive(Debug)]
pub struct Client {
    inner: crate::Client,
    runtime: tokio::runtime::Runtime,
}

impl Client {
    pub fn new(config: Config) -> Result<Self> {
        Self::from_async(crate::Client::new(config)?)
    }

    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Result<Self> {
        Self::from_async(crate::Client::with_transport(config, transport)?)
    }

    fn from_async(inner: crate::Client) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start blocking runtime")?;
        Ok(Self { inner, runtime })
    }

    /// Run a request to completion on the calling thread.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn inner(&self) -> &crate::Client {
        &self.inner
    }
}

impl Deref for Client {
    type Target = crate::Client;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
