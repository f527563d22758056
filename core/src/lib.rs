//! Client for the product catalog REST API.
//!
//! # Overview
//! `ProductClient` lists, fetches, creates, updates, deletes and toggles the
//! availability of products on a backend reachable over HTTP. Write input is
//! coerced and validated before anything is sent; read responses are checked
//! against the product schemas before they are returned.
//!
//! # Design
//! - One operation, one request. No caching, retries or background work.
//! - Request building and response parsing are pure (`build_*` / `parse_*`);
//!   the network sits behind the `Transport` trait.
//! - Schema checks never fail loudly: they return `SafeParse` and the client
//!   decides which `ProductError` to raise.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod schema;
pub mod transport;
pub mod types;

pub use client::ProductClient;
pub use config::ClientConfig;
pub use error::{ConfigError, Operation, ProductError, ValidationFailure};
pub use form::{CreateProductForm, PriceInput, UpdateProductForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use schema::{Issue, SafeParse, Schema};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{DraftProduct, Product, ProductId};
