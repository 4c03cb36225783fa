use thiserror::Error;

mod css;
mod dtcg;
mod object;
mod tailwind;
mod variables;

pub use css::extract_css;
pub use dtcg::extract_dtcg;
pub use tailwind::extract_tailwind;
pub use variables::extract_variables;

pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Extraction failures, split so callers can tell "wrong format" from
/// "right format, nothing usable".
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unparseable input: {reason}")]
    Unparseable { reason: String },
    #[error("no tokens extracted: {reason}")]
    NoTokens { reason: String },
}

impl ExtractionError {
    pub(crate) fn unparseable(reason: impl Into<String>) -> Self {
        Self::Unparseable {
            reason: reason.into(),
        }
    }

    pub(crate) fn no_tokens(reason: impl Into<String>) -> Self {
        Self::NoTokens {
            reason: reason.into(),
        }
    }
}
