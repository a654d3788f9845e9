use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(
        "Insufficient stock: requested {requested} of product {product_id} at '{depot}', available {available}"
    )]
    InsufficientStock {
        depot: String,
        product_id: Uuid,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    PersistenceError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Short machine-readable label, used as the `error_type` metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "validation_error",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::NotFound(_) => "not_found",
            Self::PersistenceError(_) => "persistence_error",
            Self::SerializationError(_) => "serialization_error",
            Self::InternalError(_) => "internal_error",
        }
    }

    /// True for errors caused by the caller's input. The state is unchanged
    /// after any of these and the operation can simply be retried with
    /// different input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InsufficientStock { .. } | Self::NotFound(_)
        )
    }

    /// Available quantity carried by an insufficient-stock rejection.
    pub fn available_quantity(&self) -> Option<Decimal> {
        match self {
            Self::InsufficientStock { available, .. } => Some(*available),
            _ => None,
        }
    }
}
