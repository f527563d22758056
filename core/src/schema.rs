//! Non-raising runtime checks of untyped JSON against product shapes.
//!
//! # Design
//! A [`Schema`] inspects a `serde_json::Value` and returns a
//! [`SafeParse`]: either the typed value or every [`Issue`] found. Shape is
//! checked by deserializing into the derived DTO; field rules are `garde`
//! constraints on the same DTO. Nothing here panics or returns `Err`, so
//! callers branch on the outcome instead of propagating. Unknown keys are
//! ignored.

use garde::Validate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{DraftProduct, Product};

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Path to the offending value; empty when the whole value is rejected.
    pub field: String,
    pub message: String,
}

impl Issue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of [`Schema::safe_parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse<T> {
    Success(T),
    Failure(Vec<Issue>),
}

impl<T> SafeParse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SafeParse::Success(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            SafeParse::Success(value) => Some(value),
            SafeParse::Failure(_) => None,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            SafeParse::Success(_) => &[],
            SafeParse::Failure(issues) => issues,
        }
    }
}

/// A declared shape that untyped data can be checked against.
pub trait Schema {
    type Output;

    fn safe_parse(&self, input: &Value) -> SafeParse<Self::Output>;
}

/// `{ name: string, price: finite number }`
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftProductSchema;

/// `{ id: integer, name: string, price: finite number, availability: boolean }`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductSchema;

/// An array of [`ProductSchema`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductsSchema;

impl Schema for DraftProductSchema {
    type Output = DraftProduct;

    fn safe_parse(&self, input: &Value) -> SafeParse<DraftProduct> {
        parse_validated(input)
    }
}

impl Schema for ProductSchema {
    type Output = Product;

    fn safe_parse(&self, input: &Value) -> SafeParse<Product> {
        parse_validated(input)
    }
}

impl Schema for ProductsSchema {
    type Output = Vec<Product>;

    fn safe_parse(&self, input: &Value) -> SafeParse<Vec<Product>> {
        let products: Vec<Product> = match deserialize(input) {
            Ok(products) => products,
            Err(issue) => return SafeParse::Failure(vec![issue]),
        };

        let issues: Vec<Issue> = products
            .iter()
            .enumerate()
            .filter_map(|(index, product)| product.validate().err().map(|report| (index, report)))
            .flat_map(|(index, report)| report_issues(&report, &format!("[{index}]")))
            .collect();

        if issues.is_empty() {
            SafeParse::Success(products)
        } else {
            SafeParse::Failure(issues)
        }
    }
}

fn parse_validated<T>(input: &Value) -> SafeParse<T>
where
    T: DeserializeOwned + Validate<Context = ()>,
{
    let value: T = match deserialize(input) {
        Ok(value) => value,
        Err(issue) => return SafeParse::Failure(vec![issue]),
    };
    match value.validate() {
        Ok(()) => SafeParse::Success(value),
        Err(report) => SafeParse::Failure(report_issues(&report, "")),
    }
}

fn deserialize<T: DeserializeOwned>(input: &Value) -> Result<T, Issue> {
    serde_json::from_value(input.clone()).map_err(|e| Issue::new("", e.to_string()))
}

fn report_issues(report: &garde::Report, prefix: &str) -> Vec<Issue> {
    report
        .iter()
        .map(|(path, error)| {
            let path = path.to_string();
            let field = match (prefix.is_empty(), path.is_empty()) {
                (_, true) => prefix.to_string(),
                (true, false) => path,
                (false, false) => format!("{prefix}.{path}"),
            };
            Issue::new(field, error.message().to_string())
        })
        .collect()
}
