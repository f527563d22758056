//! Raw user input for write operations and its coercion helpers.

use serde::{Deserialize, Serialize};

/// A price as typed by a user: either text from a form field or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl From<&str> for PriceInput {
    fn from(text: &str) -> Self {
        PriceInput::Text(text.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(text: String) -> Self {
        PriceInput::Text(text)
    }
}

impl From<f64> for PriceInput {
    fn from(number: f64) -> Self {
        PriceInput::Number(number)
    }
}

/// Input for `ProductClient::create_product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductForm {
    #[serde(default)]
    pub name: Option<String>,
    pub price: PriceInput,
}

impl CreateProductForm {
    pub fn new(name: impl Into<String>, price: impl Into<PriceInput>) -> Self {
        Self {
            name: Some(name.into()),
            price: price.into(),
        }
    }
}

/// Input for `ProductClient::update_product`. Every field is the raw text of
/// a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductForm {
    pub name: String,
    pub price: String,
    pub availability: String,
}

impl UpdateProductForm {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        availability: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            availability: availability.into(),
        }
    }
}

/// Convert a raw price to a finite number.
///
/// Text is trimmed before parsing. Empty text, non-numeric text and
/// non-finite values (`NaN`, `inf`) yield `None`.
pub fn coerce_price(input: &PriceInput) -> Option<f64> {
    match input {
        PriceInput::Number(number) => number.is_finite().then_some(*number),
        PriceInput::Text(text) => parse_price(text),
    }
}

/// Text-only variant of [`coerce_price`].
pub fn parse_price(text: &str) -> Option<f64> {
    let price = text.trim().parse::<f64>().ok()?;
    price.is_finite().then_some(price)
}

/// `"true"` in any case, ignoring surrounding whitespace, is `true`.
/// Everything else is `false`.
pub fn to_boolean(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}
