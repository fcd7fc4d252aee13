//! Inbound product payloads and their field constraints.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::product::NewProduct;
use crate::errors::ServiceError;

pub const NAME_REQUIRED: &str = "Product name is required";
pub const NAME_TOO_LONG: &str = "Product name must not exceed 50 characters";
pub const DESCRIPTION_TOO_LONG: &str = "Description must not exceed 200 characters";
pub const QUANTITY_REQUIRED: &str = "Quantity is required";
pub const QUANTITY_NEGATIVE: &str = "Quantity must be zero or positive";

/// Fields in declaration order; the first failing field wins.
const FIELD_ORDER: [&str; 3] = ["name", "description", "quantity"];

/// Body of `POST /products`. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        required,
        custom = "validate_not_blank",
        length(max = 50, message = "Product name must not exceed 50 characters")
    )]
    #[schema(example = "Notebook")]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "Description must not exceed 200 characters"))]
    #[schema(example = "A5 ruled")]
    pub description: Option<String>,

    #[validate(
        required,
        range(min = 0, message = "Quantity must be zero or positive")
    )]
    #[schema(example = 100)]
    pub quantity: Option<i32>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some(NAME_REQUIRED.into());
        return Err(err);
    }
    Ok(())
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub code: String,
    pub message: String,
}

/// Message for a missing field; `required` carries no message of its own.
fn required_message(field: &str) -> Option<&'static str> {
    match field {
        "name" => Some(NAME_REQUIRED),
        "quantity" => Some(QUANTITY_REQUIRED),
        _ => None,
    }
}

/// Presence checks outrank format checks within one field.
fn precedence(code: &str) -> u8 {
    match code {
        "required" => 0,
        "not_blank" => 1,
        "length" => 2,
        "range" => 3,
        _ => 4,
    }
}

/// Flattens `errors` into violations ordered by field declaration, then precedence.
pub fn ordered_violations(errors: &ValidationErrors) -> Vec<Violation> {
    let field_errors = errors.field_errors();
    let mut violations = Vec::new();

    for field in FIELD_ORDER {
        let Some(errs) = field_errors.get(field) else {
            continue;
        };
        let mut errs: Vec<&ValidationError> = errs.iter().collect();
        errs.sort_by_key(|e| precedence(&e.code));
        violations.extend(errs.into_iter().map(|e| Violation {
            field,
            code: e.code.to_string(),
            message: e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .or_else(|| {
                    (e.code == "required")
                        .then(|| required_message(field))
                        .flatten()
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("Invalid value for {}", field)),
        }));
    }

    violations
}

impl CreateProductRequest {
    /// Every violated constraint, in reporting order.
    pub fn violations(&self) -> Vec<Violation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_violations(&errors),
        }
    }

    /// Validates the payload and converts it into a storable product.
    ///
    /// Only the first violation is reported.
    pub fn into_new_product(self) -> Result<NewProduct, ServiceError> {
        let violations = self.violations();
        if let Some(first) = violations.first() {
            tracing::debug!(
                violations = ?violations,
                "Rejecting product payload"
            );
            return Err(ServiceError::ValidationError(first.message.clone()));
        }

        match (self.name, self.quantity) {
            (Some(name), Some(quantity)) => Ok(NewProduct {
                name,
                description: self.description,
                quantity,
            }),
            // unreachable once `required` passed
            (None, _) => Err(ServiceError::ValidationError(NAME_REQUIRED.to_string())),
            (_, None) => Err(ServiceError::ValidationError(QUANTITY_REQUIRED.to_string())),
        }
    }
}

/// Body of `PUT /products/{id}/quantity`.
///
/// `quantity` is `None` when the key is absent and `Some(None)` when it is
/// present but `null`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>, example = 120)]
    pub quantity: Option<Option<i32>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

impl UpdateQuantityRequest {
    /// Fails when the `quantity` key is missing altogether.
    pub fn require_quantity(self) -> Result<Option<i32>, ServiceError> {
        self.quantity
            .ok_or_else(|| ServiceError::MissingField(QUANTITY_REQUIRED.to_string()))
    }
}
