//! Dimension, duration and shadow-string parsing shared by the extractors.
//!
//! All dimensional quantities normalize to pixels (base 16px per rem/em);
//! all durations normalize to milliseconds.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::{css_color_to_hex, split_hex_alpha};

static DIMENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[0-9]*\.?[0-9]+)(px|rem|em)?$").unwrap());

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]*\.?[0-9]+)(ms|s)?$").unwrap());

static SHADOW_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(#[0-9a-fA-F]{3,8}|rgba?\([^)]*\))\s*$").unwrap());

static RGBA_ALPHA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rgba?\(\s*\d+\s*[,\s]\s*\d+\s*[,\s]\s*\d+\s*[,/]\s*([0-9.]+)\s*\)$").unwrap()
});

/// Normalize a CSS dimension string to pixels.
///
/// `px` and bare numbers pass through, `rem`/`em` scale by 16. Unrecognized
/// units return `None` so callers can skip the field rather than fail.
pub fn parse_dimension(value: &str) -> Option<f64> {
    let caps = DIMENSION_RE.captures(value.trim())?;
    let number: f64 = caps[1].parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        None | Some("px") => Some(number),
        Some("rem") | Some("em") => Some(number * 16.0),
        Some(_) => None,
    }
}

/// Normalize a CSS duration string to milliseconds. Bare numbers are
/// already milliseconds.
pub fn parse_duration(value: &str) -> Option<f64> {
    let caps = DURATION_RE.captures(value.trim())?;
    let number: f64 = caps[1].parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        None | Some("ms") => Some(number),
        Some("s") => Some(number * 1000.0),
        Some(_) => None,
    }
}

/// Components recovered from a CSS box-shadow string.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowParts {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: String,
    pub opacity: f64,
}

/// Parse a shadow string of the form `<x> <y> <blur> [<spread>] <color>`.
///
/// Lengths may carry a `px` suffix or none; spread is recognized but
/// dropped. An 8-digit hex color splits into color + alpha; `rgba()` alpha
/// defaults to 1 when omitted.
pub fn parse_shadow(value: &str) -> Option<ShadowParts> {
    let value = value.trim();
    let color_match = SHADOW_COLOR_RE.find(value)?;
    let raw_color = color_match.as_str().trim();
    let lengths: Vec<f64> = value[..color_match.start()]
        .split_whitespace()
        .map(parse_dimension)
        .collect::<Option<Vec<_>>>()?;
    if !matches!(lengths.len(), 3 | 4) {
        return None;
    }

    let hex = css_color_to_hex(raw_color)?;
    let (color, mut opacity) = split_hex_alpha(&hex)?;
    if let Some(caps) = RGBA_ALPHA_RE.captures(raw_color) {
        opacity = caps[1].parse().ok()?;
    }

    Some(ShadowParts {
        offset_x: lengths[0],
        offset_y: lengths[1],
        blur: lengths[2],
        color,
        opacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_dimensions_pass_through() {
        assert_eq!(parse_dimension("4px"), Some(4.0));
        assert_eq!(parse_dimension("0"), Some(0.0));
        assert_eq!(parse_dimension("-2.5px"), Some(-2.5));
    }

    #[test]
    fn rem_and_em_scale_by_sixteen() {
        assert_eq!(parse_dimension("1rem"), Some(16.0));
        assert_eq!(parse_dimension("0.25rem"), Some(4.0));
        assert_eq!(parse_dimension("1.5em"), Some(24.0));
    }

    #[test]
    fn unknown_units_are_skipped() {
        assert_eq!(parse_dimension("50%"), None);
        assert_eq!(parse_dimension("2vh"), None);
        assert_eq!(parse_dimension("auto"), None);
    }

    #[test]
    fn durations_normalize_to_milliseconds() {
        assert_eq!(parse_duration("200ms"), Some(200.0));
        assert_eq!(parse_duration("0.3s"), Some(300.0));
        assert_eq!(parse_duration("150"), Some(150.0));
    }

    #[test]
    fn shadow_with_hex_color() {
        let parts = parse_shadow("0 1px 3px #000000").unwrap();
        assert_eq!(parts.offset_x, 0.0);
        assert_eq!(parts.offset_y, 1.0);
        assert_eq!(parts.blur, 3.0);
        assert_eq!(parts.color, "#000000");
        assert_eq!(parts.opacity, 1.0);
    }

    #[test]
    fn shadow_spread_is_dropped() {
        let parts = parse_shadow("0 4px 6px -1px rgba(0, 0, 0, 0.1)").unwrap();
        assert_eq!(parts.blur, 6.0);
        assert_eq!(parts.color, "#000000");
        assert_eq!(parts.opacity, 0.1);
    }

    #[test]
    fn shadow_eight_digit_hex_splits_alpha() {
        let parts = parse_shadow("0 2px 4px #FF00AA80").unwrap();
        assert_eq!(parts.color, "#FF00AA");
        assert_eq!(parts.opacity, 0.5);
    }

    #[test]
    fn shadow_rgba_without_alpha_is_opaque() {
        let parts = parse_shadow("1px 2px 3px rgb(10, 20, 30)").unwrap();
        assert_eq!(parts.color, "#0A141E");
        assert_eq!(parts.opacity, 1.0);
    }

    #[test]
    fn shadow_rejects_missing_components() {
        assert!(parse_shadow("1px 2px #000").is_none());
        assert!(parse_shadow("none").is_none());
    }
}
