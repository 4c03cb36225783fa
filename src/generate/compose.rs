//! Jetpack Compose theme generation: a light color scheme with semantic
//! slots, a text-style table in `.sp`, and a shape table in `.dp`.

use std::fmt::Write;

use super::{format_number, pascal_case};
use crate::schema::TokenSet;

const SCHEME_SLOTS: [&str; 6] = [
    "primary",
    "secondary",
    "tertiary",
    "error",
    "surface",
    "background",
];

/// Render a Kotlin source file from a valid token set. Collections that
/// are absent simply produce no section.
pub fn generate_compose_theme(tokens: &TokenSet) -> String {
    let mut out = String::from("package app.theme\n\n");

    let mut imports = vec!["androidx.compose.ui.graphics.Color"];
    if !tokens.colors.is_empty() {
        imports.push("androidx.compose.material3.lightColorScheme");
    }
    if !tokens.typography.is_empty() {
        imports.push("androidx.compose.ui.text.TextStyle");
        imports.push("androidx.compose.ui.text.font.FontWeight");
        imports.push("androidx.compose.ui.unit.sp");
    }
    if !tokens.radii.is_empty() {
        imports.push("androidx.compose.foundation.shape.RoundedCornerShape");
        imports.push("androidx.compose.ui.unit.dp");
    }
    for import in imports {
        let _ = writeln!(out, "import {import}");
    }
    out.push('\n');

    if !tokens.colors.is_empty() {
        out.push_str("object AppColors {\n");
        for (name, token) in &tokens.colors {
            let _ = writeln!(
                out,
                "    val {} = Color({})",
                pascal_case(name),
                color_literal(&token.value)
            );
        }
        out.push_str("}\n\n");

        let scheme = scheme_entries(tokens);
        if !scheme.is_empty() {
            out.push_str("val LightColorScheme = lightColorScheme(\n");
            for (slot, token_name) in scheme {
                let _ = writeln!(out, "    {slot} = AppColors.{},", pascal_case(&token_name));
            }
            out.push_str(")\n\n");
        }
    }

    if !tokens.typography.is_empty() {
        out.push_str("object AppTypography {\n");
        for (name, token) in &tokens.typography {
            let mut fields = vec![format!("fontSize = {}.sp", format_number(token.font_size))];
            if let Some(line_height) = token.line_height {
                fields.push(format!("lineHeight = {}.sp", format_number(line_height)));
            }
            if let Some(weight) = token.font_weight {
                fields.push(format!("fontWeight = FontWeight({weight})"));
            }
            if let Some(spacing) = token.letter_spacing {
                fields.push(format!("letterSpacing = {}.sp", format_number(spacing)));
            }
            let _ = writeln!(
                out,
                "    val {} = TextStyle({})",
                pascal_case(name),
                fields.join(", ")
            );
        }
        out.push_str("}\n\n");
    }

    if !tokens.radii.is_empty() {
        out.push_str("object AppShapes {\n");
        for (name, radius) in &tokens.radii {
            let _ = writeln!(
                out,
                "    val {} = RoundedCornerShape({}.dp)",
                pascal_case(name),
                format_number(*radius)
            );
        }
        out.push_str("}\n");
    }

    out.trim_end().to_string() + "\n"
}

/// `#RRGGBB` -> `0xFFRRGGBB`; `#RRGGBBAA` -> `0xAARRGGBB`.
fn color_literal(hex: &str) -> String {
    let digits = hex.trim_start_matches('#');
    if digits.len() == 8 {
        format!("0x{}{}", &digits[6..8], &digits[0..6])
    } else {
        format!("0xFF{digits}")
    }
}

/// Map scheme slots from categories and `on-` companion names. A token
/// named `on-<other>` (or `on<Other>`) is the foreground partner of
/// `<other>`.
fn scheme_entries(tokens: &TokenSet) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for slot in SCHEME_SLOTS {
        let base = tokens
            .colors
            .iter()
            .find(|(name, token)| {
                token.category.map(|c| c.as_str() == slot).unwrap_or(false)
                    || name.as_str() == slot
            })
            .map(|(name, _)| name.clone());
        let Some(base) = base else { continue };

        entries.push((slot.to_string(), base.clone()));

        let hyphenated = format!("on-{base}");
        let camel = format!("on{}", pascal_case(&base));
        if let Some(on_name) = [hyphenated, camel]
            .into_iter()
            .find(|candidate| tokens.colors.contains_key(candidate))
        {
            entries.push((format!("on{}", pascal_case(slot)), on_name));
        }
    }
    entries
}
