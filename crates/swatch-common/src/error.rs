use crate::protocol::VariantId;

/// Errors raised while loading a product's variant payload.
///
/// A widget instance that hits one of these cannot resolve anything and should
/// surface the failure at initialization instead of running over an empty table.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Failed to parse variant payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Variant payload must be an array of variants or a product object, got {0}")]
    UnexpectedShape(&'static str),

    #[error("Variant payload contains no variants")]
    Empty,

    #[error("Variant {id} has no option values")]
    NoOptions { id: VariantId },

    #[error("Variant {id} has {found} option values, expected {expected}")]
    InconsistentOptions {
        id: VariantId,
        expected: usize,
        found: usize,
    },

    #[error("Product declares {declared} option axes but variants carry {found}")]
    AxisCountMismatch { declared: usize, found: usize },
}
