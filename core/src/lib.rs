//! MarzPay Client SDK - Core Library
//!
//! Typed client for the MarzPay mobile-money API: collections, disbursements,
//! account and balance queries, transactions, services, webhook management and
//! phone verification, plus validation of inbound webhook calls.
//!
//! This crate is platform-agnostic and can be used in both native Rust
//! applications and WebAssembly environments. HTTP is abstracted through the
//! [`Transport`] trait; [`ReqwestTransport`] is used unless another
//! implementation is supplied.
//!
//! # Example
//!
//! ```rust,ignore
//! use marzpay_core::{Client, Config};
//! use marzpay_core::api::CollectMoneyRequest;
//!
//! let client = Client::new(Config::new(api_key, api_secret))?;
//!
//! let request = CollectMoneyRequest::new(
//!     5000,
//!     "0759983853",
//!     client.collections().generate_reference(),
//! )
//! .with_description("Payment for services");
//!
//! let result = client.collections().collect_money(&request).await?;
//! println!("Collection ID: {}", result.data.collection_id);
//! ```

pub mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod phone;
pub mod resources;
pub mod transport;
pub mod types;
pub mod webhook;

pub use api::ApiClient;
pub use client::Client;
pub use config::Config;
pub use error::{ApiError, Error, ErrorKind, Result, map_error_response};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportFuture};
pub use types::{Country, TransactionStatus, generate_reference};
pub use webhook::{HmacSha256Verifier, SignatureVerifier, WebhookEvent, WebhookHandler};
