//! The operation surface: string in, string out. Extractors take source
//! text and return canonical token JSON; generators and the contrast
//! checker take token JSON values and return platform source or a report.

use serde_json::Value;
use thiserror::Error;

use crate::contrast::{check_contrast, ComplianceLevel};
use crate::extract::{
    extract_css, extract_dtcg, extract_tailwind, extract_variables, ExtractionError,
};
use crate::generate::{
    generate_compose_theme, generate_css_variables, generate_swiftui_theme,
    generate_tailwind_config, SwiftUiOptions, TailwindOptions,
};
use crate::schema::{sanitize, validate, TokenSet};

pub type OpResult<T> = std::result::Result<T, OpError>;

#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub fn css_to_tokens(source: &str) -> OpResult<String> {
    tokens_json(&extract_css(source)?)
}

pub fn dtcg_to_tokens(source: &str) -> OpResult<String> {
    tokens_json(&extract_dtcg(source)?)
}

pub fn tailwind_to_tokens(source: &str) -> OpResult<String> {
    tokens_json(&extract_tailwind(source)?)
}

pub fn variables_to_tokens(source: &str) -> OpResult<String> {
    tokens_json(&extract_variables(source)?)
}

pub fn tokens_to_css(tokens: &Value, dark: Option<&Value>) -> OpResult<String> {
    let light = match checked(tokens)? {
        Ok(light) => light,
        Err(payload) => return Ok(payload),
    };
    let dark = match dark {
        Some(value) => match checked(value)? {
            Ok(dark) => Some(dark),
            Err(payload) => return Ok(payload),
        },
        None => None,
    };
    Ok(generate_css_variables(&light, dark.as_ref()))
}

pub fn tokens_to_tailwind(tokens: &Value, options: &TailwindOptions) -> OpResult<String> {
    match checked(tokens)? {
        Ok(tokens) => Ok(generate_tailwind_config(&tokens, options)),
        Err(payload) => Ok(payload),
    }
}

pub fn tokens_to_compose(tokens: &Value) -> OpResult<String> {
    match checked(tokens)? {
        Ok(tokens) => Ok(generate_compose_theme(&tokens)),
        Err(payload) => Ok(payload),
    }
}

pub fn tokens_to_swiftui(tokens: &Value, options: &SwiftUiOptions) -> OpResult<String> {
    match checked(tokens)? {
        Ok(tokens) => Ok(generate_swiftui_theme(&tokens, options)),
        Err(payload) => Ok(payload),
    }
}

pub fn tokens_to_contrast_report(tokens: &Value, level: ComplianceLevel) -> OpResult<String> {
    match checked(tokens)? {
        Ok(tokens) => Ok(serde_json::to_string_pretty(&check_contrast(
            &tokens, level,
        ))?),
        Err(payload) => Ok(payload),
    }
}

fn tokens_json(tokens: &TokenSet) -> OpResult<String> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

/// Validate and sanitize an incoming token value. A validation failure is
/// not an operation error; it becomes a structured payload the caller can
/// forward as-is.
fn checked(value: &Value) -> OpResult<std::result::Result<TokenSet, String>> {
    match validate(value) {
        Ok(tokens) => Ok(Ok(sanitize(&tokens))),
        Err(err) => {
            let payload = serde_json::json!({
                "error": err.to_string(),
                "details": err.violations,
            });
            Ok(Err(serde_json::to_string_pretty(&payload)?))
        }
    }
}
