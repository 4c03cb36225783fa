//! CSS custom-property extraction: `--name: value;` declarations anywhere
//! in the text, classified by name prefix with value-shape fallback.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{ExtractionError, ExtractionResult};
use crate::color::{css_color_to_hex, infer_category};
use crate::schema::{
    ColorToken, ElevationToken, MotionToken, ShadowOffset, TokenSet, TypographyToken,
};
use crate::units::{parse_dimension, parse_duration, parse_shadow};

static BLOCK_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--([A-Za-z0-9][A-Za-z0-9_-]*)\s*:\s*([^;{}]+)").unwrap());

const DEFAULT_EASING: &str = "ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Color,
    FontSize,
    LineHeight,
    Spacing,
    Radius,
    Shadow,
    Duration,
    Easing,
}

/// Ordered prefix families; longer prefixes come before their shorter
/// conflicts (`text-color` before any bare `text` family).
const PREFIXES: [(&str, Kind); 20] = [
    ("text-color", Kind::Color),
    ("border-color", Kind::Color),
    ("color", Kind::Color),
    ("clr", Kind::Color),
    ("bg", Kind::Color),
    ("fg", Kind::Color),
    ("font-size", Kind::FontSize),
    ("line-height", Kind::LineHeight),
    ("border-radius", Kind::Radius),
    ("radius", Kind::Radius),
    ("rounded", Kind::Radius),
    ("spacing", Kind::Spacing),
    ("space", Kind::Spacing),
    ("gap", Kind::Spacing),
    ("shadow", Kind::Shadow),
    ("elevation", Kind::Shadow),
    ("duration", Kind::Duration),
    ("transition", Kind::Duration),
    ("easing", Kind::Easing),
    ("ease", Kind::Easing),
];

/// Extract canonical tokens from CSS source text.
///
/// The first declaration of a property wins; later redeclarations (dark
/// variants in other rule blocks) are ignored. `rgb()`/`hsl()` notations
/// convert to hex, dropping any alpha channel.
pub fn extract_css(source: &str) -> ExtractionResult<TokenSet> {
    let stripped = BLOCK_COMMENT_RE.replace_all(source, "");

    let mut seen = HashSet::new();
    let mut declarations = Vec::new();
    for caps in DECLARATION_RE.captures_iter(&stripped) {
        let name = caps[1].to_string();
        if seen.insert(name.clone()) {
            declarations.push((name, caps[2].trim().to_string()));
        }
    }

    if declarations.is_empty() {
        return Err(ExtractionError::unparseable(
            "no CSS custom properties found in source",
        ));
    }

    let mut tokens = TokenSet::default();
    let mut font_sizes: IndexMap<String, f64> = IndexMap::new();
    let mut line_heights: IndexMap<String, f64> = IndexMap::new();
    let mut durations: IndexMap<String, f64> = IndexMap::new();
    let mut easings: IndexMap<String, String> = IndexMap::new();

    for (name, value) in &declarations {
        let (kind, token_name) = classify(name, value);
        let Some(kind) = kind else { continue };
        match kind {
            Kind::Color => {
                if let Some(hex) = css_color_to_hex(value) {
                    tokens.colors.insert(
                        token_name,
                        ColorToken {
                            value: hex,
                            description: None,
                            category: infer_category(name),
                        },
                    );
                }
            }
            Kind::FontSize => {
                if let Some(px) = parse_dimension(value).filter(|px| *px > 0.0) {
                    font_sizes.insert(token_name, px);
                }
            }
            Kind::LineHeight => {
                if let Some(px) = parse_dimension(value).filter(|px| *px > 0.0) {
                    line_heights.insert(token_name, px);
                }
            }
            Kind::Spacing => {
                if let Some(px) = parse_dimension(value).filter(|px| *px >= 0.0) {
                    tokens.spacing.insert(token_name, px);
                }
            }
            Kind::Radius => {
                if let Some(px) = parse_dimension(value).filter(|px| *px >= 0.0) {
                    tokens.radii.insert(token_name, px);
                }
            }
            Kind::Shadow => {
                if let Some(parts) = parse_shadow(value) {
                    tokens.elevation.insert(
                        token_name,
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
            Kind::Duration => {
                if let Some(ms) = parse_duration(value).filter(|ms| *ms > 0.0) {
                    durations.insert(token_name, ms);
                }
            }
            Kind::Easing => {
                if !value.is_empty() {
                    easings.insert(token_name, value.clone());
                }
            }
        }
    }

    for (name, size) in font_sizes {
        let line_height = line_heights.get(&name).copied();
        tokens.typography.insert(
            name,
            TypographyToken {
                font_size: size,
                font_family: None,
                line_height,
                font_weight: None,
                letter_spacing: None,
            },
        );
    }
    for (name, duration) in durations {
        let easing = easings
            .get(&name)
            .cloned()
            .unwrap_or_else(|| DEFAULT_EASING.to_string());
        tokens.motion.insert(name, MotionToken { duration, easing });
    }

    if tokens.is_empty() {
        return Err(ExtractionError::no_tokens(
            "custom properties found but none mapped to a known collection",
        ));
    }
    Ok(tokens)
}

/// Classify a property name by prefix family, falling back to sniffing the
/// value's shape when no family matches.
fn classify(name: &str, value: &str) -> (Option<Kind>, String) {
    for (prefix, kind) in PREFIXES {
        if name == prefix {
            return (Some(kind), name.to_string());
        }
        if let Some(rest) = name.strip_prefix(prefix).and_then(|r| r.strip_prefix('-')) {
            if !rest.is_empty() {
                return (Some(kind), rest.to_string());
            }
        }
    }
    if css_color_to_hex(value).is_some() {
        return (Some(Kind::Color), name.to_string());
    }
    if parse_dimension(value).is_some() {
        return (Some(Kind::Spacing), name.to_string());
    }
    (None, name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColorCategory;

    #[test]
    fn rgb_values_convert_to_hex() {
        let tokens = extract_css(":root { --color-accent: rgb(255, 107, 53); }").unwrap();
        assert_eq!(tokens.colors["accent"].value, "#FF6B35");
    }

    #[test]
    fn hsl_values_convert_to_hex() {
        let tokens = extract_css(":root { --color-brand: hsl(0, 100%, 50%); }").unwrap();
        assert_eq!(tokens.colors["brand"].value, "#FF0000");
    }

    #[test]
    fn first_declaration_wins_across_rule_blocks() {
        let source = r"
:root { --color-surface: #FFFFFF; }
@media (prefers-color-scheme: dark) {
  :root { --color-surface: #121212; }
}";
        let tokens = extract_css(source).unwrap();
        assert_eq!(tokens.colors["surface"].value, "#FFFFFF");
    }

    #[test]
    fn declarations_outside_root_are_included() {
        let tokens = extract_css(".card { --radius-card: 12px; }").unwrap();
        assert_eq!(tokens.radii["card"], 12.0);
    }

    #[test]
    fn prefix_families_route_to_collections() {
        let source = r"
:root {
  --bg-canvas: #FAFAFA;
  --space-md: 1rem;
  --font-size-body: 16px;
  --line-height-body: 1.5rem;
  --shadow-card: 0 1px 3px rgba(0, 0, 0, 0.2);
}";
        let tokens = extract_css(source).unwrap();
        assert_eq!(tokens.colors["canvas"].value, "#FAFAFA");
        assert_eq!(tokens.spacing["md"], 16.0);
        assert_eq!(tokens.typography["body"].font_size, 16.0);
        assert_eq!(tokens.typography["body"].line_height, Some(24.0));
        assert_eq!(tokens.elevation["card"].shadow_opacity, 0.2);
    }

    #[test]
    fn unknown_prefixes_fall_back_to_value_sniffing() {
        let source = ":root { --accent: #FF6B35; --sidebar-width: 240px; }";
        let tokens = extract_css(source).unwrap();
        assert_eq!(tokens.colors["accent"].value, "#FF6B35");
        assert_eq!(tokens.spacing["sidebar-width"], 240.0);
    }

    #[test]
    fn categories_infer_from_property_names() {
        let tokens = extract_css(":root { --color-primary: #6750A4; }").unwrap();
        assert_eq!(
            tokens.colors["primary"].category,
            Some(ColorCategory::Primary)
        );
    }

    #[test]
    fn durations_pair_with_easings_by_name() {
        let source = r"
:root {
  --duration-standard: 200ms;
  --easing-standard: cubic-bezier(0.4, 0, 0.2, 1);
  --duration-fast: 0.1s;
}";
        let tokens = extract_css(source).unwrap();
        assert_eq!(tokens.motion["standard"].duration, 200.0);
        assert_eq!(
            tokens.motion["standard"].easing,
            "cubic-bezier(0.4, 0, 0.2, 1)"
        );
        assert_eq!(tokens.motion["fast"].duration, 100.0);
        assert_eq!(tokens.motion["fast"].easing, "ease");
    }

    #[test]
    fn transition_and_ease_prefixes_feed_motion_tokens() {
        let source = r"
:root {
  --transition-fast: 200ms;
  --ease-fast: ease-out;
}";
        let tokens = extract_css(source).unwrap();
        assert_eq!(tokens.motion["fast"].duration, 200.0);
        assert_eq!(tokens.motion["fast"].easing, "ease-out");
    }

    #[test]
    fn block_comments_are_ignored() {
        let source = "/* --color-ghost: #000000; */ :root { --color-real: #FFFFFF; }";
        let tokens = extract_css(source).unwrap();
        assert_eq!(tokens.colors.len(), 1);
        assert!(tokens.colors.get("real").is_some());
    }

    #[test]
    fn fails_without_custom_properties() {
        let err = extract_css("body { color: red; }").unwrap_err();
        assert!(matches!(err, ExtractionError::Unparseable { .. }));
    }

    #[test]
    fn fails_when_nothing_maps() {
        let err = extract_css(":root { --layout-grid: repeat(12, 1fr); }").unwrap_err();
        assert!(matches!(err, ExtractionError::NoTokens { .. }));
    }
}
