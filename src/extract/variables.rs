//! Variable-graph extraction: a Figma-style "variables" JSON export with
//! typed variables, per-mode values, collections with a default mode, and
//! alias indirection between variables.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::{ExtractionError, ExtractionResult};
use crate::color::{float_rgb_to_hex, infer_category};
use crate::schema::{ColorToken, TokenSet};

#[derive(Debug, Deserialize)]
struct Variable {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, rename = "resolvedType", alias = "type")]
    resolved_type: Option<String>,
    #[serde(default, rename = "valuesByMode")]
    values_by_mode: IndexMap<String, Value>,
    #[serde(default, rename = "variableCollectionId")]
    collection_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "defaultModeId")]
    default_mode_id: Option<String>,
}

/// Extract canonical colors, spacing and radii from a variables export.
///
/// The export is accepted at the top level or under a `meta` wrapper.
/// Aliases are followed with a visited-set walk; a cycle or missing target
/// degrades to the last value seen rather than failing the extraction.
pub fn extract_variables(source: &str) -> ExtractionResult<TokenSet> {
    let root: Value = serde_json::from_str(source)
        .map_err(|err| ExtractionError::unparseable(format!("invalid JSON: {err}")))?;
    let root = root.get("meta").unwrap_or(&root);

    let variables = collect_entries::<Variable>(root, "variables");
    if variables.is_empty() {
        return Err(ExtractionError::no_tokens("export contains no variables"));
    }

    let defaults: HashMap<String, String> = collect_entries::<Collection>(root, "variableCollections")
        .into_iter()
        .chain(collect_entries::<Collection>(root, "collections"))
        .filter_map(|c| Some((c.id?, c.default_mode_id?)))
        .collect();

    let index: HashMap<&str, &Variable> = variables
        .iter()
        .filter_map(|v| Some((v.id.as_deref()?, v)))
        .collect();

    let mut tokens = TokenSet::default();
    for variable in &variables {
        let mode = variable
            .collection_id
            .as_deref()
            .and_then(|id| defaults.get(id))
            .map(String::as_str);
        let Some((value, fully_resolved)) = resolve_value(variable, mode, &index) else {
            continue;
        };
        if !fully_resolved {
            tracing::warn!(
                name = %variable.name,
                "variable alias chain did not resolve; keeping last-seen value"
            );
        }
        map_variable(variable, value, &mut tokens);
    }

    if tokens.is_empty() {
        return Err(ExtractionError::no_tokens(
            "no variables mapped to canonical tokens",
        ));
    }
    Ok(tokens)
}

/// Accept either an array of entries or an id-keyed object of entries.
fn collect_entries<T: serde::de::DeserializeOwned>(root: &Value, key: &str) -> Vec<T> {
    match root.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
        Some(Value::Object(entries)) => entries
            .values()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Walk the alias graph from `start`. Returns the final value and whether
/// it fully resolved; a cycle or missing alias target returns the last
/// value seen with `false`.
fn resolve_value<'a>(
    start: &'a Variable,
    mode: Option<&str>,
    index: &HashMap<&str, &'a Variable>,
) -> Option<(&'a Value, bool)> {
    let mut current = start;
    let mut visited: HashSet<&str> = HashSet::new();
    if let Some(id) = current.id.as_deref() {
        visited.insert(id);
    }

    loop {
        let value = mode
            .and_then(|m| current.values_by_mode.get(m))
            .or_else(|| current.values_by_mode.values().next())?;

        let Some(target) = alias_target(value) else {
            return Some((value, true));
        };
        if !visited.insert(target) {
            return Some((value, false));
        }
        match index.get(target) {
            Some(next) => current = next,
            None => return Some((value, false)),
        }
    }
}

fn alias_target(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    if obj.get("type").and_then(Value::as_str) == Some("VARIABLE_ALIAS") {
        obj.get("id").and_then(Value::as_str)
    } else {
        None
    }
}

fn map_variable(variable: &Variable, value: &Value, tokens: &mut TokenSet) {
    let kind = variable
        .resolved_type
        .as_deref()
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| infer_type(value));
    let name = normalize_name(&variable.name);

    match kind.as_str() {
        "COLOR" => {
            let Some(obj) = value.as_object() else { return };
            let channel = |key: &str| obj.get(key).and_then(Value::as_f64);
            let (Some(r), Some(g), Some(b)) = (channel("r"), channel("g"), channel("b")) else {
                return;
            };
            tokens.colors.insert(
                name,
                ColorToken {
                    value: float_rgb_to_hex(r, g, b),
                    description: None,
                    category: infer_category(&variable.name),
                },
            );
        }
        "FLOAT" => {
            let Some(number) = value.as_f64().filter(|n| *n >= 0.0) else {
                return;
            };
            let lower = variable.name.to_ascii_lowercase();
            if lower.contains("radius") || lower.contains("corner") {
                tokens.radii.insert(name, number);
            } else {
                tokens.spacing.insert(name, number);
            }
        }
        _ => {}
    }
}

fn infer_type(value: &Value) -> String {
    match value {
        Value::Object(obj) if obj.contains_key("r") => "COLOR".to_string(),
        Value::Number(_) => "FLOAT".to_string(),
        _ => String::new(),
    }
}

/// Last `/`-delimited path segment, camelCase boundaries hyphenated,
/// whitespace replaced, lowercased.
fn normalize_name(name: &str) -> String {
    let segment = name.rsplit('/').next().unwrap_or(name).trim();
    let mut out = String::with_capacity(segment.len());
    let mut prev_lower = false;
    for c in segment.chars() {
        if c.is_whitespace() {
            if !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out.trim_matches('-').to_string()
}
