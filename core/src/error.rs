//! Error types for the product catalog client.
//!
//! # Design
//! Every operation reports exactly one of two kinds of failure. `Validation`
//! is raised locally before (or instead of) trusting data and never reaches
//! the network. `Request` covers transport failures and non-2xx statuses.
//! Both render user-facing Spanish messages; `Request` keeps the underlying
//! detail when there was one.

use std::fmt;

use thiserror::Error;

/// The client operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
    ToggleAvailability,
}

impl Operation {
    /// Generic user-facing message used when the operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Ocurrió un error al agregar el producto",
            Operation::List => "Ocurrió un error al obtener los productos",
            Operation::Get => "Ocurrió un error al obtener el producto",
            Operation::Update => "Ocurrió un error al actualizar el producto",
            Operation::Delete => "Ocurrió un error al eliminar el producto",
            Operation::ToggleAvailability => {
                "Ocurrió un error al actualizar la disponibilidad del producto"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::ToggleAvailability => "toggle_availability",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local schema or coercion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// Creation input has no usable name or price.
    #[error("Datos no válidos")]
    InvalidData,

    /// The list response does not match the products collection shape.
    #[error("Error al obtener los productos")]
    MalformedProducts,

    /// The single-product response does not match the product shape.
    #[error("Producto no encontrado")]
    ProductNotFound,

    /// The update price is not numeric.
    #[error("El precio no es válido")]
    InvalidPrice,
}

/// Errors returned by `ProductClient` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    #[error("{0}")]
    Validation(ValidationFailure),

    /// Transport failure or non-2xx response.
    #[error("{}", request_message(.operation, .detail))]
    Request {
        operation: Operation,
        detail: Option<String>,
    },
}

impl ProductError {
    pub fn request(operation: Operation, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        ProductError::Request {
            operation,
            detail: (!detail.trim().is_empty()).then_some(detail),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ProductError::Validation(_))
    }
}

impl From<ValidationFailure> for ProductError {
    fn from(failure: ValidationFailure) -> Self {
        ProductError::Validation(failure)
    }
}

fn request_message(operation: &Operation, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("{}: {detail}", operation.failure_message()),
        None => operation.failure_message().to_string(),
    }
}

/// Configuration could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    Missing(&'static str),

    #[error("invalid base url `{0}`: expected an http:// or https:// url")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_display_their_message() {
        let err = ProductError::from(ValidationFailure::ProductNotFound);
        assert_eq!(err.to_string(), "Producto no encontrado");
        assert!(err.is_validation());
    }

    #[test]
    fn request_error_keeps_detail() {
        let err = ProductError::request(Operation::Delete, "HTTP 500: boom");
        assert_eq!(
            err.to_string(),
            "Ocurrió un error al eliminar el producto: HTTP 500: boom"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn request_error_without_detail_falls_back_to_generic_message() {
        let err = ProductError::request(Operation::ToggleAvailability, "  ");
        assert_eq!(
            err,
            ProductError::Request {
                operation: Operation::ToggleAvailability,
                detail: None,
            }
        );
        assert_eq!(
            err.to_string(),
            "Ocurrió un error al actualizar la disponibilidad del producto"
        );
    }
}
