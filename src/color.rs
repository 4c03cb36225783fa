//! Shared color primitives used across extractors, generators and the
//! contrast checker.
//!
//! Canonical hex form everywhere in the crate: uppercase, `#` prefix,
//! 6 or 8 hex digits. Shorthand 3/4-digit forms are expanded on
//! normalization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::ColorCategory;

static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?[0-9a-fA-F]{3,8}$").unwrap());

static RGB_FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})\s*(?:[,/]\s*([0-9.]+%?)\s*)?\)$",
    )
    .unwrap()
});

static HSL_FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^hsla?\(\s*([0-9.]+)(?:deg)?\s*[,\s]\s*([0-9.]+)%\s*[,\s]\s*([0-9.]+)%\s*(?:[,/]\s*([0-9.]+%?)\s*)?\)$",
    )
    .unwrap()
});

/// Does the string look like a hex color (with or without `#`, 3-8 digits)?
pub fn is_hex_color(value: &str) -> bool {
    let len = value.trim_start_matches('#').len();
    HEX_RE.is_match(value) && matches!(len, 3 | 4 | 6 | 8)
}

/// Normalize a hex color to canonical form: `#` prefix, uppercase,
/// 3/4-digit shorthands expanded by doubling each digit.
///
/// Returns `None` when the input is not a recognizable hex color.
pub fn normalize_hex(value: &str) -> Option<String> {
    let digits = value.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_uppercase()))
}

/// Parse the RGB channels of a normalized or raw hex color. Alpha digits,
/// when present, are ignored.
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let normalized = normalize_hex(value)?;
    let digits = &normalized[1..];
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Split an 8-digit hex color into its 6-digit color part and an alpha in
/// [0, 1] rounded to 2 decimal places. 6-digit input yields alpha 1.0.
pub fn split_hex_alpha(value: &str) -> Option<(String, f64)> {
    let normalized = normalize_hex(value)?;
    if normalized.len() == 9 {
        let alpha = u8::from_str_radix(&normalized[7..9], 16).ok()?;
        let rounded = (f64::from(alpha) / 255.0 * 100.0).round() / 100.0;
        Some((normalized[..7].to_string(), rounded))
    } else {
        Some((normalized, 1.0))
    }
}

/// Convert 0-1 floating RGB channels (a Figma-style color value) to
/// canonical hex by scaling to 0-255 and rounding.
pub fn float_rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", scale(r), scale(g), scale(b))
}

/// Convert any CSS color notation this crate understands to canonical hex:
/// hex literals, `rgb()`/`rgba()`, `hsl()`/`hsla()`.
///
/// Lossy by contract: `rgba()`/`hsla()` alpha channels are dropped; the
/// canonical color field holds an opaque 6-digit value for functional
/// notations. 8-digit hex literals keep their alpha digits.
pub fn css_color_to_hex(value: &str) -> Option<String> {
    let value = value.trim();
    if is_hex_color(value) {
        return normalize_hex(value);
    }
    if let Some(caps) = RGB_FN_RE.captures(value) {
        let r: u16 = caps[1].parse().ok()?;
        let g: u16 = caps[2].parse().ok()?;
        let b: u16 = caps[3].parse().ok()?;
        if r > 255 || g > 255 || b > 255 {
            return None;
        }
        return Some(format!("#{r:02X}{g:02X}{b:02X}"));
    }
    if let Some(caps) = HSL_FN_RE.captures(value) {
        let h: f64 = caps[1].parse().ok()?;
        let s: f64 = caps[2].parse::<f64>().ok()? / 100.0;
        let l: f64 = caps[3].parse::<f64>().ok()? / 100.0;
        let (r, g, b) = hsl_to_rgb(h, s, l);
        return Some(format!("#{r:02X}{g:02X}{b:02X}"));
    }
    None
}

/// Standard chroma/hue-function HSL to RGB conversion.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r1, g1, b1) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let scale = |v: f64| ((v + m) * 255.0).round() as u8;
    (scale(r1), scale(g1), scale(b1))
}

/// Infer a color category from substring matches against the original
/// (pre-normalization) token name.
pub fn infer_category(name: &str) -> Option<ColorCategory> {
    let lower = name.to_ascii_lowercase();
    if lower.contains("primary") {
        Some(ColorCategory::Primary)
    } else if lower.contains("secondary") {
        Some(ColorCategory::Secondary)
    } else if lower.contains("tertiary") {
        Some(ColorCategory::Tertiary)
    } else if lower.contains("neutral") || lower.contains("gray") || lower.contains("grey") {
        Some(ColorCategory::Neutral)
    } else if lower.contains("error") || lower.contains("danger") || lower.contains("destructive")
    {
        Some(ColorCategory::Error)
    } else if lower.contains("surface") {
        Some(ColorCategory::Surface)
    } else if lower.contains("background") {
        Some(ColorCategory::Background)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_expands_three_digit_shorthand() {
        assert_eq!(normalize_hex("#F0A").as_deref(), Some("#FF00AA"));
        assert_eq!(normalize_hex("abc").as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn normalize_is_idempotent_on_canonical_input() {
        assert_eq!(normalize_hex("#FF00AA").as_deref(), Some("#FF00AA"));
        assert_eq!(normalize_hex("#FF00AA80").as_deref(), Some("#FF00AA80"));
    }

    #[test]
    fn normalize_uppercases_and_prefixes() {
        assert_eq!(normalize_hex("6750a4").as_deref(), Some("#6750A4"));
    }

    #[test]
    fn normalize_rejects_bad_lengths_and_digits() {
        assert!(normalize_hex("#12345").is_none());
        assert!(normalize_hex("#GGHHII").is_none());
        assert!(normalize_hex("red").is_none());
    }

    #[test]
    fn rgb_function_converts_to_hex() {
        assert_eq!(
            css_color_to_hex("rgb(255, 107, 53)").as_deref(),
            Some("#FF6B35")
        );
    }

    #[test]
    fn rgba_alpha_is_dropped() {
        assert_eq!(
            css_color_to_hex("rgba(0, 0, 0, 0.5)").as_deref(),
            Some("#000000")
        );
    }

    #[test]
    fn hsl_function_converts_to_hex() {
        assert_eq!(css_color_to_hex("hsl(0, 100%, 50%)").as_deref(), Some("#FF0000"));
        assert_eq!(
            css_color_to_hex("hsl(120, 100%, 25%)").as_deref(),
            Some("#008000")
        );
    }

    #[test]
    fn rgb_rejects_out_of_range_channels() {
        assert!(css_color_to_hex("rgb(300, 0, 0)").is_none());
    }

    #[test]
    fn float_channels_scale_and_round() {
        assert_eq!(float_rgb_to_hex(1.0, 0.0, 0.5), "#FF0080");
        assert_eq!(float_rgb_to_hex(0.403, 0.314, 0.643), "#6750A4");
    }

    #[test]
    fn eight_digit_hex_splits_color_and_alpha() {
        let (color, alpha) = split_hex_alpha("#FF00AA80").unwrap();
        assert_eq!(color, "#FF00AA");
        assert_eq!(alpha, 0.5);
    }

    #[test]
    fn six_digit_hex_splits_with_full_alpha() {
        let (color, alpha) = split_hex_alpha("#FF00AA").unwrap();
        assert_eq!(color, "#FF00AA");
        assert_eq!(alpha, 1.0);
    }

    #[test]
    fn category_inference_matches_keywords() {
        assert_eq!(infer_category("brand/Primary"), Some(ColorCategory::Primary));
        assert_eq!(infer_category("Gray 50"), Some(ColorCategory::Neutral));
        assert_eq!(infer_category("danger-fill"), Some(ColorCategory::Error));
        assert_eq!(infer_category("onSurface"), Some(ColorCategory::Surface));
        assert_eq!(infer_category("accent"), None);
    }
}
