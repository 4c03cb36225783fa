//! Tailwind-style config extraction: recover canonical tokens from the
//! text of a JavaScript config module without executing it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::object::parse_object_at;
use super::{ExtractionError, ExtractionResult};
use crate::color::{is_hex_color, normalize_hex};
use crate::schema::{ColorToken, ElevationToken, ShadowOffset, TokenSet, TypographyToken};
use crate::units::{parse_dimension, parse_shadow};

static THEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btheme\s*:\s*\{").unwrap());

static CONFIG_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(module\.exports\s*=|export\s+default|defineConfig\s*\()").unwrap()
});

static IMPORT_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(import\b.*|(const|let|var)\s+\w+\s*=\s*require\(.*)$").unwrap());

static TS_ASSERTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+(as\s+const\b|satisfies\s+[A-Za-z_$][A-Za-z0-9_$.]*(<[^>;{]*>)?)").unwrap()
});

/// Extract canonical tokens from Tailwind config source text.
///
/// Strips import/require lines and TypeScript `as const`/`satisfies`
/// assertions, locates the `theme: { ... }` block with a restricted
/// object-literal parser (never evaluating the input), merges `extend`
/// over the top level at the leaf, and maps the known theme fields.
pub fn extract_tailwind(source: &str) -> ExtractionResult<TokenSet> {
    let stripped = IMPORT_LINE_RE.replace_all(source, "");
    let stripped = TS_ASSERTION_RE.replace_all(&stripped, "");

    let theme = locate_theme(&stripped).ok_or_else(|| {
        ExtractionError::unparseable("no parseable theme or config object found in source")
    })?;

    let tokens = map_theme(&theme);
    if tokens.is_empty() {
        return Err(ExtractionError::no_tokens(
            "theme object contained no colors, fontSize, fontFamily, spacing, borderRadius or boxShadow entries",
        ));
    }
    Ok(tokens)
}

/// Find a `theme` object: first any `theme: {` block that parses, then the
/// whole exported config object with its `theme` field.
fn locate_theme(source: &str) -> Option<Map<String, Value>> {
    for found in THEME_RE.find_iter(source) {
        let brace = source[found.start()..found.end()].rfind('{')? + found.start();
        if let Ok((Value::Object(theme), _)) = parse_object_at(source, brace) {
            return Some(theme);
        }
    }

    let anchor = CONFIG_ANCHOR_RE.find(source)?;
    let brace = anchor.end() + source[anchor.end()..].find('{')?;
    let config = match parse_object_at(source, brace) {
        Ok((Value::Object(map), _)) => map,
        _ => return None,
    };
    if let Some(Value::Object(theme)) = config.get("theme") {
        return Some(theme.clone());
    }
    Some(config)
}

fn map_theme(theme: &Map<String, Value>) -> TokenSet {
    let extend = theme
        .get("extend")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let field = |name: &str| -> Value {
        let base = theme.get(name).cloned().unwrap_or(Value::Null);
        let overlay = extend.get(name).cloned().unwrap_or(Value::Null);
        deep_merge(base, overlay)
    };

    let mut tokens = TokenSet::default();

    if let Value::Object(colors) = field("colors") {
        for (key, value) in &colors {
            flatten_colors(key, value, &mut tokens);
        }
    }
    if let Value::Object(sizes) = field("fontSize") {
        for (key, value) in &sizes {
            if let Some(token) = map_font_size(value) {
                tokens.typography.insert(key.clone(), token);
            }
        }
    }
    if let Value::Object(families) = field("fontFamily") {
        for (key, value) in &families {
            map_font_family(key, value, &mut tokens);
        }
    }
    if let Value::Object(spacing) = field("spacing") {
        for (key, value) in &spacing {
            if let Some(px) = value_to_px(value).filter(|px| *px >= 0.0) {
                tokens.spacing.insert(key.clone(), px);
            }
        }
    }
    if let Value::Object(radii) = field("borderRadius") {
        for (key, value) in &radii {
            if let Some(px) = value_to_px(value).filter(|px| *px >= 0.0) {
                tokens.radii.insert(key.clone(), px);
            }
        }
    }
    if let Value::Object(shadows) = field("boxShadow") {
        for (key, value) in &shadows {
            let Some(parts) = value.as_str().and_then(parse_shadow) else {
                continue;
            };
            tokens.elevation.insert(
                key.clone(),
                ElevationToken {
                    shadow_color: parts.color,
                    shadow_offset: ShadowOffset {
                        x: parts.offset_x,
                        y: parts.offset_y,
                    },
                    shadow_radius: parts.blur,
                    shadow_opacity: parts.opacity,
                },
            );
        }
    }

    tokens
}

/// `extend.X` wins over top-level `X`, merged per leaf rather than
/// replacing whole sub-objects.
fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.shift_remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Nested palettes flatten to hyphen-joined names (`gray-50`); only
/// hex-looking values are kept.
fn flatten_colors(name: &str, value: &Value, tokens: &mut TokenSet) {
    match value {
        Value::String(text) if is_hex_color(text) => {
            if let Some(hex) = normalize_hex(text) {
                tokens.colors.insert(
                    name.to_string(),
                    ColorToken {
                        value: hex,
                        description: None,
                        category: None,
                    },
                );
            }
        }
        Value::Object(group) => {
            for (key, nested) in group {
                flatten_colors(&format!("{name}-{key}"), nested, tokens);
            }
        }
        _ => {}
    }
}

fn map_font_size(value: &Value) -> Option<TypographyToken> {
    let mut token = TypographyToken {
        font_size: 0.0,
        font_family: None,
        line_height: None,
        font_weight: None,
        letter_spacing: None,
    };
    match value {
        Value::String(_) | Value::Number(_) => {
            token.font_size = value_to_px(value)?;
        }
        Value::Array(parts) => {
            token.font_size = value_to_px(parts.first()?)?;
            match parts.get(1) {
                Some(Value::String(line_height)) => {
                    token.line_height = parse_dimension(line_height);
                }
                Some(Value::Object(options)) => {
                    token.line_height = options.get("lineHeight").and_then(value_to_px);
                    token.letter_spacing = options
                        .get("letterSpacing")
                        .and_then(|v| v.as_str())
                        .and_then(parse_dimension)
                        .or_else(|| options.get("letterSpacing").and_then(Value::as_f64));
                    token.font_weight = match options.get("fontWeight") {
                        Some(Value::Number(n)) => n.as_f64().map(|v| v as i64),
                        Some(Value::String(s)) => s.parse().ok(),
                        _ => None,
                    };
                }
                _ => {}
            }
        }
        _ => return None,
    }
    if token.font_size > 0.0 {
        Some(token)
    } else {
        None
    }
}

/// Font stacks become synthetic `font-<key>` typography tokens at the
/// default 16px size unless a size token of that name already exists.
fn map_font_family(key: &str, value: &Value, tokens: &mut TokenSet) {
    let family = match value {
        Value::String(name) => Some(name.clone()),
        Value::Array(names) => names.first().and_then(|v| v.as_str()).map(String::from),
        _ => None,
    };
    let Some(family) = family else { return };

    let name = format!("font-{key}");
    match tokens.typography.get_mut(&name) {
        Some(existing) => existing.font_family = Some(family),
        None => {
            tokens.typography.insert(
                name,
                TypographyToken {
                    font_size: 16.0,
                    font_family: Some(family),
                    line_height: None,
                    font_weight: None,
                    letter_spacing: None,
                },
            );
        }
    }
}

fn value_to_px(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => parse_dimension(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_colors_and_radii_from_common_js_config() {
        let source = r"module.exports = { theme: { colors: { primary: '#6750A4' }, borderRadius: { sm: '4px' } } }";
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.colors["primary"].value, "#6750A4");
        assert_eq!(tokens.radii["sm"], 4.0);
    }

    #[test]
    fn extracts_from_es_module_with_define_config() {
        let source = r"
import { defineConfig } from 'tailwindcss';
export default defineConfig({
  theme: {
    spacing: { sm: '0.5rem', md: '1rem' },
  },
});
";
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.spacing["sm"], 8.0);
        assert_eq!(tokens.spacing["md"], 16.0);
    }

    #[test]
    fn typescript_assertions_are_stripped_before_parsing() {
        let source = r"
import type { Config } from 'tailwindcss';
export default {
  theme: {
    colors: { primary: '#6750A4' } as const,
    spacing: { md: '1rem' },
  },
} satisfies Config;
";
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.colors["primary"].value, "#6750A4");
        assert_eq!(tokens.spacing["md"], 16.0);
    }

    #[test]
    fn nested_palettes_flatten_with_hyphens() {
        let source = r"module.exports = { theme: { colors: { gray: { 50: '#FAFAFA', 900: '#212121' } } } }";
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.colors["gray-50"].value, "#FAFAFA");
        assert_eq!(tokens.colors["gray-900"].value, "#212121");
    }

    #[test]
    fn non_hex_color_values_are_skipped() {
        let source = r"module.exports = { theme: { colors: { primary: '#123456', current: 'currentColor' } } }";
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.colors.len(), 1);
    }

    #[test]
    fn extend_merges_over_top_level_at_the_leaf() {
        let source = r"module.exports = {
  theme: {
    colors: { gray: { 50: '#FAFAFA' }, primary: '#111111' },
    extend: {
      colors: { gray: { 100: '#F5F5F5' }, primary: '#6750A4' },
    },
  },
}";
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.colors["gray-50"].value, "#FAFAFA");
        assert_eq!(tokens.colors["gray-100"].value, "#F5F5F5");
        assert_eq!(tokens.colors["primary"].value, "#6750A4");
    }

    #[test]
    fn font_size_supports_all_three_forms() {
        let source = r#"module.exports = { theme: { fontSize: {
            sm: '0.875rem',
            base: ['1rem', '1.5rem'],
            lg: ['1.125rem', { lineHeight: '1.75rem', letterSpacing: '-0.01em', fontWeight: 600 }],
        } } }"#;
        let tokens = extract_tailwind(source).unwrap();
        assert_eq!(tokens.typography["sm"].font_size, 14.0);
        assert_eq!(tokens.typography["base"].font_size, 16.0);
        assert_eq!(tokens.typography["base"].line_height, Some(24.0));
        let lg = &tokens.typography["lg"];
        assert_eq!(lg.font_size, 18.0);
        assert_eq!(lg.line_height, Some(28.0));
        assert_eq!(lg.letter_spacing, Some(-0.16));
        assert_eq!(lg.font_weight, Some(600));
    }

    #[test]
    fn font_family_produces_synthetic_tokens() {
        let source = r"module.exports = { theme: { fontFamily: { sans: ['Inter', 'sans-serif'] } } }";
        let tokens = extract_tailwind(source).unwrap();
        let token = &tokens.typography["font-sans"];
        assert_eq!(token.font_size, 16.0);
        assert_eq!(token.font_family.as_deref(), Some("Inter"));
    }

    #[test]
    fn box_shadow_strings_become_elevation_tokens() {
        let source = r"module.exports = { theme: { boxShadow: { md: '0 4px 6px -1px rgba(0, 0, 0, 0.1)' } } }";
        let tokens = extract_tailwind(source).unwrap();
        let md = &tokens.elevation["md"];
        assert_eq!(md.shadow_color, "#000000");
        assert_eq!(md.shadow_offset.y, 4.0);
        assert_eq!(md.shadow_radius, 6.0);
        assert_eq!(md.shadow_opacity, 0.1);
    }

    #[test]
    fn unrecognized_units_are_silently_omitted() {
        let source = r"module.exports = { theme: { spacing: { half: '50%', md: '1rem' } } }";
        let tokens = extract_tailwind(source).unwrap();
        assert!(tokens.spacing.get("half").is_none());
        assert_eq!(tokens.spacing["md"], 16.0);
    }

    #[test]
    fn fails_without_any_config_object() {
        let err = extract_tailwind("const nothing = 42;").unwrap_err();
        assert!(matches!(err, ExtractionError::Unparseable { .. }));
    }

    #[test]
    fn fails_when_theme_maps_to_nothing() {
        let err = extract_tailwind(r"module.exports = { theme: { screens: { sm: '640px' } } }")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoTokens { .. }));
    }
}
