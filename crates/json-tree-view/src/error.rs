use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    /// Input text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `$ref` pointer has an unsupported shape, or its target does not
    /// exist in the document.
    #[error("unresolved reference: {pointer}")]
    UnresolvedReference { pointer: String },
}
