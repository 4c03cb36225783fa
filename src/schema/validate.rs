use serde_json::Value;
use thiserror::Error;

use super::TokenSet;
use crate::color::normalize_hex;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Every violation found in a single pass, as `path: message` strings.
#[derive(Debug, Clone, Error)]
#[error("token set failed validation with {} violation(s)", violations.len())]
pub struct ValidationError {
    pub violations: Vec<String>,
}

const COLOR_CATEGORIES: [&str; 8] = [
    "primary",
    "secondary",
    "tertiary",
    "neutral",
    "error",
    "surface",
    "background",
    "custom",
];

/// Validate an arbitrary structured value against the canonical schema.
///
/// Collects every violation instead of stopping at the first, so a caller
/// sees all problems in one round trip.
pub fn validate(value: &Value) -> ValidationResult<TokenSet> {
    let mut violations = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(ValidationError {
            violations: vec!["root: expected a token set object".into()],
        });
    };

    let mut populated = 0usize;
    for key in ["colors", "typography", "spacing", "radii", "elevation", "motion"] {
        let Some(collection) = root.get(key) else {
            continue;
        };
        match collection.as_object() {
            Some(entries) => {
                if !entries.is_empty() {
                    populated += 1;
                }
                for (name, entry) in entries {
                    let path = format!("{key}.{name}");
                    match key {
                        "colors" => check_color(&path, entry, &mut violations),
                        "typography" => check_typography(&path, entry, &mut violations),
                        "spacing" | "radii" => {
                            check_non_negative_number(&path, entry, &mut violations);
                        }
                        "elevation" => check_elevation(&path, entry, &mut violations),
                        "motion" => check_motion(&path, entry, &mut violations),
                        _ => unreachable!(),
                    }
                }
            }
            None => violations.push(format!("{key}: expected an object of named tokens")),
        }
    }

    if populated == 0 {
        violations.push("root: token set must contain at least one non-empty collection".into());
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    serde_json::from_value(value.clone()).map_err(|err| ValidationError {
        violations: vec![format!("root: {err}")],
    })
}

/// Normalize an already-valid token set: canonical hex casing/width and
/// `shadowOpacity` clamped into [0, 1]. Returns a new copy.
pub fn sanitize(tokens: &TokenSet) -> TokenSet {
    let mut out = tokens.clone();
    for token in out.colors.values_mut() {
        if let Some(normalized) = normalize_hex(&token.value) {
            token.value = normalized;
        }
    }
    for token in out.elevation.values_mut() {
        if let Some(normalized) = normalize_hex(&token.shadow_color) {
            token.shadow_color = normalized;
        }
        token.shadow_opacity = token.shadow_opacity.clamp(0.0, 1.0);
    }
    out
}

fn is_valid_hex(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn check_color(path: &str, entry: &Value, violations: &mut Vec<String>) {
    let Some(obj) = entry.as_object() else {
        violations.push(format!("{path}: expected a color token object"));
        return;
    };
    match obj.get("value").and_then(Value::as_str) {
        Some(hex) if is_valid_hex(hex) => {}
        Some(_) => violations.push(format!(
            "{path}.value: must be a hex color (#RGB, #RRGGBB or #RRGGBBAA)"
        )),
        None => violations.push(format!("{path}.value: missing hex color string")),
    }
    if let Some(description) = obj.get("description") {
        if !description.is_string() {
            violations.push(format!("{path}.description: must be a string"));
        }
    }
    if let Some(category) = obj.get("category") {
        match category.as_str() {
            Some(name) if COLOR_CATEGORIES.contains(&name) => {}
            _ => violations.push(format!(
                "{path}.category: must be one of {}",
                COLOR_CATEGORIES.join(", ")
            )),
        }
    }
}

fn check_typography(path: &str, entry: &Value, violations: &mut Vec<String>) {
    let Some(obj) = entry.as_object() else {
        violations.push(format!("{path}: expected a typography token object"));
        return;
    };
    match obj.get("fontSize").and_then(Value::as_f64) {
        Some(size) if size > 0.0 => {}
        Some(_) => violations.push(format!("{path}.fontSize: must be a positive number")),
        None => violations.push(format!("{path}.fontSize: missing positive number")),
    }
    if let Some(family) = obj.get("fontFamily") {
        if !family.is_string() {
            violations.push(format!("{path}.fontFamily: must be a string"));
        }
    }
    if let Some(line_height) = obj.get("lineHeight") {
        match line_height.as_f64() {
            Some(v) if v > 0.0 => {}
            _ => violations.push(format!("{path}.lineHeight: must be a positive number")),
        }
    }
    if let Some(weight) = obj.get("fontWeight") {
        // CSS Fonts Level 4 range; variable-font weights like 450 are fine.
        match weight.as_i64() {
            Some(v) if (1..=1000).contains(&v) => {}
            _ => violations.push(format!(
                "{path}.fontWeight: must be an integer between 1 and 1000"
            )),
        }
    }
    if let Some(spacing) = obj.get("letterSpacing") {
        if spacing.as_f64().is_none() {
            violations.push(format!("{path}.letterSpacing: must be a number"));
        }
    }
}

fn check_non_negative_number(path: &str, entry: &Value, violations: &mut Vec<String>) {
    match entry.as_f64() {
        Some(v) if v >= 0.0 => {}
        _ => violations.push(format!("{path}: must be a non-negative number")),
    }
}

fn check_elevation(path: &str, entry: &Value, violations: &mut Vec<String>) {
    let Some(obj) = entry.as_object() else {
        violations.push(format!("{path}: expected an elevation token object"));
        return;
    };
    match obj.get("shadowColor").and_then(Value::as_str) {
        Some(hex) if is_valid_hex(hex) => {}
        _ => violations.push(format!("{path}.shadowColor: must be a hex color string")),
    }
    match obj.get("shadowOffset").and_then(Value::as_object) {
        Some(offset) => {
            for axis in ["x", "y"] {
                if offset.get(axis).and_then(Value::as_f64).is_none() {
                    violations.push(format!("{path}.shadowOffset.{axis}: must be a number"));
                }
            }
        }
        None => violations.push(format!("{path}.shadowOffset: missing {{x, y}} object")),
    }
    match obj.get("shadowRadius").and_then(Value::as_f64) {
        Some(v) if v >= 0.0 => {}
        _ => violations.push(format!("{path}.shadowRadius: must be a non-negative number")),
    }
    match obj.get("shadowOpacity").and_then(Value::as_f64) {
        Some(v) if (0.0..=1.0).contains(&v) => {}
        _ => violations.push(format!(
            "{path}.shadowOpacity: must be a number between 0 and 1"
        )),
    }
}

fn check_motion(path: &str, entry: &Value, violations: &mut Vec<String>) {
    let Some(obj) = entry.as_object() else {
        violations.push(format!("{path}: expected a motion token object"));
        return;
    };
    match obj.get("duration").and_then(Value::as_f64) {
        Some(v) if v > 0.0 => {}
        _ => violations.push(format!(
            "{path}.duration: must be a positive number of milliseconds"
        )),
    }
    match obj.get("easing").and_then(Value::as_str) {
        Some(easing) if !easing.trim().is_empty() => {}
        _ => violations.push(format!("{path}.easing: must be a non-empty string")),
    }
}
