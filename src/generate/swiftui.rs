//! SwiftUI theme generation: color and font constants, spacing values,
//! and per-token shadow view modifiers.

use std::fmt::Write;

use super::{camel_case, format_number};
use crate::color::hex_to_rgb;
use crate::schema::TokenSet;

/// Explicit generator configuration; `glass_effects` adds the translucent
/// material helpers and their availability guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftUiOptions {
    pub glass_effects: bool,
}

pub fn generate_swiftui_theme(tokens: &TokenSet, options: &SwiftUiOptions) -> String {
    let mut out = String::from("import SwiftUI\n\n");

    if !tokens.colors.is_empty() {
        out.push_str("extension Color {\n");
        for (name, token) in &tokens.colors {
            let _ = writeln!(
                out,
                "    static let {} = {}",
                camel_case(name),
                color_value(&token.value)
            );
        }
        out.push_str("}\n\n");
    }

    if !tokens.typography.is_empty() {
        out.push_str("enum AppFont {\n");
        for (name, token) in &tokens.typography {
            let descriptor = match &token.font_family {
                Some(family) => format!(
                    "Font.custom(\"{family}\", size: {})",
                    format_number(token.font_size)
                ),
                None => {
                    let weight = token.font_weight.map(weight_name);
                    match weight {
                        Some(weight) => format!(
                            "Font.system(size: {}, weight: .{weight})",
                            format_number(token.font_size)
                        ),
                        None => format!("Font.system(size: {})", format_number(token.font_size)),
                    }
                }
            };
            let _ = writeln!(out, "    static let {} = {descriptor}", camel_case(name));
        }
        out.push_str("}\n\n");
    }

    if !tokens.spacing.is_empty() {
        out.push_str("enum AppSpacing {\n");
        for (name, value) in &tokens.spacing {
            let _ = writeln!(
                out,
                "    static let {}: CGFloat = {}",
                camel_case(name),
                format_number(*value)
            );
        }
        out.push_str("}\n\n");
    }

    if !tokens.elevation.is_empty() {
        out.push_str("extension View {\n");
        let mut first = true;
        for (name, token) in &tokens.elevation {
            if !first {
                out.push('\n');
            }
            first = false;
            let _ = writeln!(out, "    func {}Shadow() -> some View {{", camel_case(name));
            let _ = writeln!(
                out,
                "        shadow(color: {}.opacity({}), radius: {}, x: {}, y: {})",
                color_value(&token.shadow_color),
                format_number(token.shadow_opacity),
                format_number(token.shadow_radius),
                format_number(token.shadow_offset.x),
                format_number(token.shadow_offset.y)
            );
            out.push_str("    }\n");
        }
        out.push_str("}\n\n");
    }

    if options.glass_effects {
        out.push_str(GLASS_HELPERS);
    }

    out.trim_end().to_string() + "\n"
}

const GLASS_HELPERS: &str = r#"@available(iOS 15.0, macOS 12.0, *)
extension View {
    func glassBackground(cornerRadius: CGFloat = 12) -> some View {
        background(.ultraThinMaterial, in: RoundedRectangle(cornerRadius: cornerRadius))
    }

    func glassOverlay(cornerRadius: CGFloat = 12) -> some View {
        overlay(
            RoundedRectangle(cornerRadius: cornerRadius)
                .strokeBorder(.white.opacity(0.2), lineWidth: 1)
        )
    }
}
"#;

fn color_value(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex).unwrap_or((0, 0, 0));
    format!(
        "Color(red: {}, green: {}, blue: {})",
        channel(r),
        channel(g),
        channel(b)
    )
}

fn channel(value: u8) -> String {
    let text = format!("{:.3}", f64::from(value) / 255.0);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn weight_name(weight: i64) -> &'static str {
    match weight {
        ..=149 => "ultraLight",
        150..=249 => "thin",
        250..=349 => "light",
        350..=449 => "regular",
        450..=549 => "medium",
        550..=649 => "semibold",
        650..=749 => "bold",
        750..=849 => "heavy",
        _ => "black",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColorToken, ElevationToken, ShadowOffset, TypographyToken};

    fn base_tokens() -> TokenSet {
        let mut tokens = TokenSet::default();
        tokens.colors.insert(
            "on-primary".into(),
            ColorToken {
                value: "#FFFFFF".into(),
                description: None,
                category: None,
            },
        );
        tokens
    }

    #[test]
    fn color_constants_use_camel_case_names() {
        let source = generate_swiftui_theme(&base_tokens(), &SwiftUiOptions::default());
        assert!(source.contains("static let onPrimary = Color(red: 1, green: 1, blue: 1)"));
    }

    #[test]
    fn fonts_render_with_family_or_system_descriptor() {
        let mut tokens = TokenSet::default();
        tokens.typography.insert(
            "body".into(),
            TypographyToken {
                font_size: 16.0,
                font_family: Some("Inter".into()),
                line_height: None,
                font_weight: None,
                letter_spacing: None,
            },
        );
        tokens.typography.insert(
            "label".into(),
            TypographyToken {
                font_size: 12.0,
                font_family: None,
                line_height: None,
                font_weight: Some(600),
                letter_spacing: None,
            },
        );
        let source = generate_swiftui_theme(&tokens, &SwiftUiOptions::default());
        assert!(source.contains("static let body = Font.custom(\"Inter\", size: 16)"));
        assert!(source.contains("static let label = Font.system(size: 12, weight: .semibold)"));
    }

    #[test]
    fn elevation_renders_callable_shadow_modifiers() {
        let mut tokens = TokenSet::default();
        tokens.elevation.insert(
            "card".into(),
            ElevationToken {
                shadow_color: "#000000".into(),
                shadow_offset: ShadowOffset { x: 0.0, y: 1.0 },
                shadow_radius: 3.0,
                shadow_opacity: 0.1,
            },
        );
        let source = generate_swiftui_theme(&tokens, &SwiftUiOptions::default());
        assert!(source.contains("func cardShadow() -> some View {"));
        assert!(source.contains(
            "shadow(color: Color(red: 0, green: 0, blue: 0).opacity(0.1), radius: 3, x: 0, y: 1)"
        ));
    }

    #[test]
    fn glass_helpers_appear_only_when_enabled() {
        let plain = generate_swiftui_theme(&base_tokens(), &SwiftUiOptions::default());
        assert!(!plain.contains("glassBackground"));
        assert!(!plain.contains("@available"));

        let glassy = generate_swiftui_theme(
            &base_tokens(),
            &SwiftUiOptions {
                glass_effects: true,
            },
        );
        assert!(glassy.contains("@available(iOS 15.0, macOS 12.0, *)"));
        assert!(glassy.contains("func glassBackground(cornerRadius: CGFloat = 12)"));
        assert!(glassy.contains("func glassOverlay(cornerRadius: CGFloat = 12)"));
    }

    #[test]
    fn spacing_renders_numeric_constants() {
        let mut tokens = TokenSet::default();
        tokens.spacing.insert("md".into(), 16.0);
        let source = generate_swiftui_theme(&tokens, &SwiftUiOptions::default());
        assert!(source.contains("static let md: CGFloat = 16"));
    }
}
