use serde_json::{json, Value};
use thiserror::Error;

use crate::assembly::partition::RoleCounts;

/// Engine-level error type.
///
/// An exhausted attempt cap is not an error: `assemble` returns an empty list.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Insufficient catalog: top={}, bottom={}, footwear={}",
        .counts.top,
        .counts.bottom,
        .counts.footwear
    )]
    InsufficientCatalog { counts: RoleCounts },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InsufficientCatalog { .. } => "INSUFFICIENT_CATALOG",
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::MalformedRequest(_) => "MALFORMED_REQUEST",
            EngineError::Io(_) => "IO_ERROR",
        }
    }

    /// JSON error envelope handed back to callers.
    pub fn to_body(&self) -> Value {
        let mut error = json!({
            "code": self.code(),
            "message": self.to_string(),
        });

        if let EngineError::InsufficientCatalog { counts } = self {
            error["details"] = json!({
                "counts": counts,
                "missingRoles": counts.missing_required(),
            });
        }

        json!({ "error": error })
    }
}
