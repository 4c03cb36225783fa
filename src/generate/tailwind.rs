//! Tailwind config generation: a `theme.extend` object in either ESM or
//! CommonJS dialect.

use std::fmt::Write;

use serde::Deserialize;

use super::format_number;
use crate::color::hex_to_rgb;
use crate::schema::{ElevationToken, TokenSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `export default { ... }`
    #[default]
    Esm,
    /// `module.exports = { ... }`
    Cjs,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TailwindOptions {
    pub dialect: Dialect,
}

/// Line-height falls back to 1.5x the font size when a token does not
/// carry one, matching Tailwind's default leading.
const LINE_HEIGHT_FACTOR: f64 = 1.5;

pub fn generate_tailwind_config(tokens: &TokenSet, options: &TailwindOptions) -> String {
    let mut out = String::from("/** @type {import('tailwindcss').Config} */\n");
    out.push_str(match options.dialect {
        Dialect::Esm => "export default {\n",
        Dialect::Cjs => "module.exports = {\n",
    });
    out.push_str("  theme: {\n    extend: {\n");

    if !tokens.colors.is_empty() {
        out.push_str("      colors: {\n");
        for (name, token) in &tokens.colors {
            let _ = writeln!(
                out,
                "        '{name}': '{}',",
                token.value.to_ascii_lowercase()
            );
        }
        out.push_str("      },\n");
    }

    if !tokens.typography.is_empty() {
        out.push_str("      fontSize: {\n");
        for (name, token) in &tokens.typography {
            let line_height = token
                .line_height
                .unwrap_or(token.font_size * LINE_HEIGHT_FACTOR);
            let _ = writeln!(
                out,
                "        '{name}': ['{}', '{}'],",
                rem(token.font_size),
                rem(line_height)
            );
        }
        out.push_str("      },\n");
    }

    if !tokens.spacing.is_empty() {
        out.push_str("      spacing: {\n");
        for (name, value) in &tokens.spacing {
            let _ = writeln!(out, "        '{name}': '{}px',", format_number(*value));
        }
        out.push_str("      },\n");
    }

    if !tokens.radii.is_empty() {
        out.push_str("      borderRadius: {\n");
        for (name, value) in &tokens.radii {
            let _ = writeln!(out, "        '{name}': '{}px',", format_number(*value));
        }
        out.push_str("      },\n");
    }

    if !tokens.elevation.is_empty() {
        out.push_str("      boxShadow: {\n");
        for (name, token) in &tokens.elevation {
            let _ = writeln!(out, "        '{name}': '{}',", shadow_string(token));
        }
        out.push_str("      },\n");
    }

    out.push_str("    },\n  },\n};\n");
    out
}

fn rem(px: f64) -> String {
    format!("{}rem", format_number(px / 16.0))
}

fn length(px: f64) -> String {
    if px == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", format_number(px))
    }
}

/// Reconstruct a CSS shadow string from an elevation token.
pub(super) fn shadow_string(token: &ElevationToken) -> String {
    let color = if token.shadow_opacity < 1.0 {
        let (r, g, b) = hex_to_rgb(&token.shadow_color).unwrap_or((0, 0, 0));
        format!("rgba({r}, {g}, {b}, {})", format_number(token.shadow_opacity))
    } else {
        token.shadow_color.to_ascii_lowercase()
    };
    format!(
        "{} {} {} {color}",
        length(token.shadow_offset.x),
        length(token.shadow_offset.y),
        length(token.shadow_radius)
    )
}
