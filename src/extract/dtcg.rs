//! DTCG extraction: the nested-group JSON token format where a leaf node
//! owns a `$value` and groups may declare a `$type` that descendants
//! inherit.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::{ExtractionError, ExtractionResult};
use crate::color::{css_color_to_hex, infer_category, split_hex_alpha};
use crate::schema::{
    ColorToken, ElevationToken, MotionToken, ShadowOffset, TokenSet, TypographyToken,
};
use crate::units::{parse_dimension, parse_duration};

/// Default duration attached to an easing-only motion token.
const DEFAULT_DURATION_MS: f64 = 300.0;

#[derive(Debug, Clone)]
struct FlatToken {
    value: Value,
    token_type: Option<String>,
    description: Option<String>,
}

/// Extract canonical tokens from DTCG JSON text.
///
/// The tree flattens to dot-joined paths; `{path.to.token}` aliases are
/// resolved with a visited-set walk and degrade to the last-seen value on
/// a cycle or missing target.
pub fn extract_dtcg(source: &str) -> ExtractionResult<TokenSet> {
    let root: Value = serde_json::from_str(source)
        .map_err(|err| ExtractionError::unparseable(format!("invalid JSON: {err}")))?;

    let mut flat: IndexMap<String, FlatToken> = IndexMap::new();
    if let Value::Object(_) = root {
        flatten(&root, &mut Vec::new(), None, &mut flat);
    }
    if flat.is_empty() {
        return Err(ExtractionError::no_tokens(
            "no $value token nodes found in document",
        ));
    }

    let mut tokens = TokenSet::default();
    for (path, token) in &flat {
        let (value, token_type, fully_resolved) = resolve_alias(token, &flat);
        if !fully_resolved {
            tracing::warn!(%path, "token alias did not resolve; keeping last-seen value");
        }
        let effective_type = token
            .token_type
            .clone()
            .or(token_type)
            .unwrap_or_else(|| infer_type(&value));
        map_token(path, &value, &effective_type, token.description.as_deref(), &mut tokens);
    }

    if tokens.is_empty() {
        return Err(ExtractionError::no_tokens(
            "tokens found but none mapped to a canonical collection",
        ));
    }
    Ok(tokens)
}

fn flatten(
    node: &Value,
    path: &mut Vec<String>,
    inherited_type: Option<&str>,
    out: &mut IndexMap<String, FlatToken>,
) {
    let Some(obj) = node.as_object() else { return };
    let own_type = obj.get("$type").and_then(Value::as_str).or(inherited_type);

    if let Some(value) = obj.get("$value") {
        out.insert(
            path.join("."),
            FlatToken {
                value: value.clone(),
                token_type: own_type.map(str::to_string),
                description: obj
                    .get("$description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
        );
        return;
    }

    for (key, child) in obj {
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        flatten(child, path, own_type, out);
        path.pop();
    }
}

/// Follow `{path.to.token}` references. Returns the final value, the type
/// found at the end of the chain, and whether resolution completed.
fn resolve_alias(
    token: &FlatToken,
    flat: &IndexMap<String, FlatToken>,
) -> (Value, Option<String>, bool) {
    let mut value = token.value.clone();
    let mut chain_type = None;
    let mut visited: HashSet<String> = HashSet::new();

    loop {
        let Some(target) = alias_path(&value) else {
            return (value, chain_type, true);
        };
        if !visited.insert(target.clone()) {
            return (value, chain_type, false);
        }
        match flat.get(&target) {
            Some(next) => {
                chain_type = next.token_type.clone().or(chain_type);
                value = next.value.clone();
            }
            None => return (value, chain_type, false),
        }
    }
}

fn alias_path(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains('{') {
        return None;
    }
    Some(inner.to_string())
}

/// Shape inference for tokens with no `$type` anywhere in their chain.
fn infer_type(value: &Value) -> String {
    match value {
        Value::String(text) => {
            if css_color_to_hex(text).is_some() {
                "color".to_string()
            } else if parse_duration(text).is_some() && text.trim().ends_with("ms") {
                "duration".to_string()
            } else if parse_dimension(text).is_some() {
                "dimension".to_string()
            } else {
                String::new()
            }
        }
        Value::Number(_) => "dimension".to_string(),
        _ => String::new(),
    }
}

/// Token names drop a leading collection-ish group segment and join the
/// remaining path with hyphens.
fn token_name(path: &str) -> String {
    const GROUP_SEGMENTS: [&str; 14] = [
        "color",
        "colors",
        "typography",
        "font",
        "spacing",
        "space",
        "radius",
        "radii",
        "shadow",
        "shadows",
        "elevation",
        "motion",
        "duration",
        "easing",
    ];
    let segments: Vec<&str> = path.split('.').collect();
    let start = usize::from(
        segments.len() > 1 && GROUP_SEGMENTS.contains(&segments[0].to_ascii_lowercase().as_str()),
    );
    segments[start..].join("-")
}

fn map_token(
    path: &str,
    value: &Value,
    token_type: &str,
    description: Option<&str>,
    tokens: &mut TokenSet,
) {
    let name = token_name(path);
    match token_type.to_ascii_lowercase().as_str() {
        "color" => {
            let Some(hex) = value.as_str().and_then(css_color_to_hex) else {
                return;
            };
            tokens.colors.insert(
                name.clone(),
                ColorToken {
                    value: hex,
                    description: description.map(str::to_string),
                    category: infer_category(&name),
                },
            );
        }
        "dimension" | "number" => {
            let Some(px) = value_to_px(value).filter(|px| *px >= 0.0) else {
                return;
            };
            let lower = path.to_ascii_lowercase();
            if lower.contains("radius") || lower.contains("corner") {
                tokens.radii.insert(name, px);
            } else {
                tokens.spacing.insert(name, px);
            }
        }
        "typography" => {
            let Some(obj) = value.as_object() else { return };
            let Some(font_size) = obj.get("fontSize").and_then(value_to_px) else {
                return;
            };
            tokens.typography.insert(
                name,
                TypographyToken {
                    font_size,
                    font_family: obj
                        .get("fontFamily")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    line_height: obj.get("lineHeight").and_then(value_to_px),
                    font_weight: match obj.get("fontWeight") {
                        Some(Value::Number(n)) => n.as_f64().map(|v| v as i64),
                        Some(Value::String(s)) => s.parse().ok(),
                        _ => None,
                    },
                    letter_spacing: obj.get("letterSpacing").and_then(value_to_px),
                },
            );
        }
        "shadow" => {
            let Some(obj) = value.as_object() else { return };
            let Some(raw_color) = obj.get("color").and_then(Value::as_str) else {
                return;
            };
            let Some(hex) = css_color_to_hex(raw_color) else { return };
            // Opacity is not modeled in this format; 8-digit hex is the
            // only carrier, otherwise fully opaque.
            let Some((color, opacity)) = split_hex_alpha(&hex) else { return };
            let axis = |key: &str| obj.get(key).and_then(value_to_px).unwrap_or(0.0);
            tokens.elevation.insert(
                name,
                ElevationToken {
                    shadow_color: color,
                    shadow_offset: ShadowOffset {
                        x: axis("offsetX"),
                        y: axis("offsetY"),
                    },
                    shadow_radius: axis("blur").max(0.0),
                    shadow_opacity: opacity,
                },
            );
        }
        "duration" => {
            let duration = match value {
                Value::String(text) => parse_duration(text),
                Value::Number(n) => n.as_f64(),
                _ => None,
            };
            let Some(duration) = duration.filter(|ms| *ms > 0.0) else {
                return;
            };
            let easing = tokens
                .motion
                .get(&name)
                .map(|m| m.easing.clone())
                .unwrap_or_else(|| "ease".to_string());
            tokens.motion.insert(name, MotionToken { duration, easing });
        }
        "cubicbezier" => {
            let Some(points) = value.as_array() else { return };
            let numbers: Vec<f64> = points.iter().filter_map(Value::as_f64).collect();
            if numbers.len() != 4 {
                return;
            }
            let easing = format!(
                "cubic-bezier({}, {}, {}, {})",
                format_number(numbers[0]),
                format_number(numbers[1]),
                format_number(numbers[2]),
                format_number(numbers[3])
            );
            match tokens.motion.get_mut(&name) {
                Some(motion) => motion.easing = easing,
                None => {
                    tokens.motion.insert(
                        name,
                        MotionToken {
                            duration: DEFAULT_DURATION_MS,
                            easing,
                        },
                    );
                }
            }
        }
        _ => {}
    }
}

fn value_to_px(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => parse_dimension(text),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
