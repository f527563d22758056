//! HTTP client for the products API.
//!
//! # Design
//! `ProductClient` holds only its base URL and a transport. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`; the public operation
//! validates its input, runs exactly one round-trip through the transport
//! and parses the result. Every failure is normalized into a `ProductError`.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ConfigError, Operation, ProductError, ValidationFailure};
use crate::form::{coerce_price, parse_price, to_boolean, CreateProductForm, UpdateProductForm};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::schema::{DraftProductSchema, Issue, ProductSchema, ProductsSchema, SafeParse, Schema};
use crate::transport::{Transport, UreqTransport};
use crate::types::{DraftProduct, Product, ProductId};

const PRODUCTS_PATH: &str = "/api/products";

/// Client for the products API.
///
/// Stateless between calls: concurrent operations are independent and any
/// ordering between them is up to the server.
#[derive(Debug, Clone)]
pub struct ProductClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl ProductClient {
    /// Client over the default blocking transport. `base_url` must be an
    /// `http://` or `https://` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        ClientConfig::new(base_url).map(|config| Self::from_config(&config))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new())
    }

    /// Client configured from the `API_URL` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        ClientConfig::from_env().map(|config| Self::from_config(&config))
    }
}

impl<T> ProductClient<T> {
    /// `base_url` is used as given apart from trailing slashes; validate it
    /// with `ClientConfig::new` first when it comes from user input.
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{PRODUCTS_PATH}", self.base_url)
    }

    fn item_url(&self, id: ProductId) -> String {
        format!("{}{PRODUCTS_PATH}/{id}", self.base_url)
    }

    pub fn build_create_product(&self, draft: &DraftProduct) -> Result<HttpRequest, ProductError> {
        let body = to_json(Operation::Create, draft)?;
        Ok(json_request(HttpMethod::Post, self.collection_url(), body))
    }

    pub fn build_list_products(&self) -> HttpRequest {
        bodiless_request(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_product(&self, id: ProductId) -> HttpRequest {
        bodiless_request(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_update_product(&self, product: &Product) -> Result<HttpRequest, ProductError> {
        let body = to_json(Operation::Update, product)?;
        Ok(json_request(HttpMethod::Put, self.item_url(product.id), body))
    }

    pub fn build_delete_product(&self, id: ProductId) -> HttpRequest {
        bodiless_request(HttpMethod::Delete, self.item_url(id))
    }

    /// The server flips availability itself; the request carries no body.
    pub fn build_toggle_availability(&self, id: ProductId) -> HttpRequest {
        bodiless_request(HttpMethod::Patch, self.item_url(id))
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<(), ProductError> {
        check_status(Operation::Create, &response)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ProductError> {
        check_status(Operation::List, &response)?;
        match ProductsSchema.safe_parse(&response_data(&response)) {
            SafeParse::Success(products) => Ok(products),
            SafeParse::Failure(issues) => Err(rejected(
                Operation::List,
                ValidationFailure::MalformedProducts,
                &issues,
            )),
        }
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ProductError> {
        check_status(Operation::Get, &response)?;
        match ProductSchema.safe_parse(&response_data(&response)) {
            SafeParse::Success(product) => Ok(product),
            SafeParse::Failure(issues) => Err(rejected(
                Operation::Get,
                ValidationFailure::ProductNotFound,
                &issues,
            )),
        }
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<(), ProductError> {
        check_status(Operation::Update, &response)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ProductError> {
        check_status(Operation::Delete, &response)
    }

    pub fn parse_toggle_availability(&self, response: HttpResponse) -> Result<(), ProductError> {
        check_status(Operation::ToggleAvailability, &response)
    }
}

impl<T: Transport> ProductClient<T> {
    /// Validate `form` and create a product. The created entity is not
    /// returned.
    pub fn create_product(&self, form: &CreateProductForm) -> Result<(), ProductError> {
        let candidate = json!({
            "name": form.name,
            "price": coerce_price(&form.price),
        });
        let draft = match DraftProductSchema.safe_parse(&candidate) {
            SafeParse::Success(draft) => draft,
            SafeParse::Failure(issues) => {
                return Err(rejected(Operation::Create, ValidationFailure::InvalidData, &issues))
            }
        };

        let request = self.build_create_product(&draft)?;
        let response = self.send(Operation::Create, request)?;
        self.parse_create_product(response)
    }

    pub fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        let response = self.send(Operation::List, self.build_list_products())?;
        self.parse_list_products(response)
    }

    pub fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        let response = self.send(Operation::Get, self.build_get_product(id))?;
        self.parse_get_product(response)
    }

    /// Replace the product `id` with the values in `form`.
    ///
    /// A non-numeric price fails with `InvalidPrice`. If the assembled product
    /// still fails the product schema, no request is sent and `Ok(())` is
    /// returned; the rejection is only logged.
    pub fn update_product(&self, id: ProductId, form: &UpdateProductForm) -> Result<(), ProductError> {
        let Some(price) = parse_price(&form.price) else {
            return Err(rejected(Operation::Update, ValidationFailure::InvalidPrice, &[]));
        };
        let candidate = json!({
            "id": id,
            "name": form.name,
            "price": price,
            "availability": to_boolean(&form.availability),
        });
        self.update_with(id, &candidate)
    }

    fn update_with(&self, id: ProductId, candidate: &Value) -> Result<(), ProductError> {
        match ProductSchema.safe_parse(candidate) {
            SafeParse::Success(product) => {
                let request = self.build_update_product(&product)?;
                let response = self.send(Operation::Update, request)?;
                self.parse_update_product(response)
            }
            SafeParse::Failure(issues) => {
                warn!(
                    operation = %Operation::Update,
                    %id,
                    ?issues,
                    "update payload failed validation; request skipped without error"
                );
                Ok(())
            }
        }
    }

    pub fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        let response = self.send(Operation::Delete, self.build_delete_product(id))?;
        self.parse_delete_product(response)
    }

    pub fn toggle_availability(&self, id: ProductId) -> Result<(), ProductError> {
        let response = self.send(
            Operation::ToggleAvailability,
            self.build_toggle_availability(id),
        )?;
        self.parse_toggle_availability(response)
    }

    fn send(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ProductError> {
        debug!(%operation, method = %request.method, url = %request.url, "sending request");
        self.transport.execute(request).map_err(|e| {
            warn!(%operation, error = %e, "transport failure");
            ProductError::request(operation, e.message)
        })
    }
}

fn bodiless_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request(method: HttpMethod, url: String, body: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    }
}

fn to_json<V: serde::Serialize>(operation: Operation, value: &V) -> Result<String, ProductError> {
    serde_json::to_string(value)
        .map_err(|e| ProductError::request(operation, format!("serialization failed: {e}")))
}

/// Any 2xx is success; everything else is a request failure.
fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), ProductError> {
    if response.is_success() {
        return Ok(());
    }
    let body = response.body.trim();
    let detail = if body.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        format!("HTTP {}: {body}", response.status)
    };
    warn!(%operation, status = response.status, "server rejected request");
    Err(ProductError::request(operation, detail))
}

/// The `data` member of a JSON envelope, or `null` when the body is not JSON
/// or has no `data`.
fn response_data(response: &HttpResponse) -> Value {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|mut envelope| envelope.get_mut("data").map(Value::take))
        .unwrap_or(Value::Null)
}

fn rejected(operation: Operation, failure: ValidationFailure, issues: &[Issue]) -> ProductError {
    warn!(%operation, ?issues, "{failure}");
    ProductError::Validation(failure)
}
