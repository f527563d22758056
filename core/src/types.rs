//! Domain DTOs for the products API.
//!
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use std::fmt;

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Server-assigned product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A product as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Product {
    #[garde(skip)]
    pub id: ProductId,
    #[garde(skip)]
    pub name: String,
    #[garde(custom(finite))]
    pub price: f64,
    #[garde(skip)]
    pub availability: bool,
}

/// Creation payload: a product without server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct DraftProduct {
    #[garde(skip)]
    pub name: String,
    #[garde(custom(finite))]
    pub price: f64,
}

fn finite(value: &f64, _: &()) -> garde::Result {
    if value.is_finite() {
        Ok(())
    } else {
        Err(garde::Error::new("must be a finite number"))
    }
}
