//! CSS custom-property generation: one `:root` block, plus dark-mode
//! media-query and attribute-selector blocks when a dark set is supplied.

use std::fmt::Write;

use super::format_number;
use super::tailwind::shadow_string;
use crate::schema::TokenSet;

pub fn generate_css_variables(tokens: &TokenSet, dark: Option<&TokenSet>) -> String {
    let mut out = String::from(":root {\n");
    write_declarations(&mut out, tokens, "  ");
    out.push_str("}\n");

    if let Some(dark) = dark {
        out.push_str("\n@media (prefers-color-scheme: dark) {\n  :root {\n");
        write_declarations(&mut out, dark, "    ");
        out.push_str("  }\n}\n");

        out.push_str("\n[data-theme=\"dark\"] {\n");
        write_declarations(&mut out, dark, "  ");
        out.push_str("}\n");
    }

    out
}

fn write_declarations(out: &mut String, tokens: &TokenSet, indent: &str) {
    for (name, token) in &tokens.colors {
        let _ = writeln!(
            out,
            "{indent}--color-{name}: {};",
            token.value.to_ascii_lowercase()
        );
    }
    for (name, token) in &tokens.typography {
        let _ = writeln!(
            out,
            "{indent}--font-size-{name}: {}px;",
            format_number(token.font_size)
        );
        if let Some(line_height) = token.line_height {
            let _ = writeln!(
                out,
                "{indent}--line-height-{name}: {}px;",
                format_number(line_height)
            );
        }
    }
    for (name, value) in &tokens.spacing {
        let _ = writeln!(out, "{indent}--space-{name}: {}px;", format_number(*value));
    }
    for (name, value) in &tokens.radii {
        let _ = writeln!(out, "{indent}--radius-{name}: {}px;", format_number(*value));
    }
    for (name, token) in &tokens.elevation {
        let _ = writeln!(out, "{indent}--shadow-{name}: {};", shadow_string(token));
    }
    for (name, token) in &tokens.motion {
        let _ = writeln!(
            out,
            "{indent}--duration-{name}: {}ms;",
            format_number(token.duration)
        );
        let _ = writeln!(out, "{indent}--easing-{name}: {};", token.easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColorToken, ElevationToken, MotionToken, ShadowOffset, TypographyToken};

    fn color(value: &str) -> ColorToken {
        ColorToken {
            value: value.into(),
            description: None,
            category: None,
        }
    }

    fn sample() -> TokenSet {
        let mut tokens = TokenSet::default();
        tokens.colors.insert("primary".into(), color("#6750A4"));
        tokens.typography.insert(
            "body".into(),
            TypographyToken {
                font_size: 16.0,
                font_family: None,
                line_height: Some(24.0),
                font_weight: None,
                letter_spacing: None,
            },
        );
        tokens.spacing.insert("md".into(), 16.0);
        tokens.radii.insert("sm".into(), 4.0);
        tokens.elevation.insert(
            "card".into(),
            ElevationToken {
                shadow_color: "#000000".into(),
                shadow_offset: ShadowOffset { x: 0.0, y: 1.0 },
                shadow_radius: 3.0,
                shadow_opacity: 0.1,
            },
        );
        tokens.motion.insert(
            "standard".into(),
            MotionToken {
                duration: 200.0,
                easing: "ease-in-out".into(),
            },
        );
        tokens
    }

    #[test]
    fn root_block_covers_all_collections_with_fixed_prefixes() {
        let css = generate_css_variables(&sample(), None);
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-primary: #6750a4;"));
        assert!(css.contains("  --font-size-body: 16px;"));
        assert!(css.contains("  --line-height-body: 24px;"));
        assert!(css.contains("  --space-md: 16px;"));
        assert!(css.contains("  --radius-sm: 4px;"));
        assert!(css.contains("  --shadow-card: 0 1px 3px rgba(0, 0, 0, 0.1);"));
        assert!(css.contains("  --duration-standard: 200ms;"));
        assert!(css.contains("  --easing-standard: ease-in-out;"));
    }

    #[test]
    fn no_dark_set_means_no_dark_blocks() {
        let css = generate_css_variables(&sample(), None);
        assert!(!css.contains("prefers-color-scheme"));
        assert!(!css.contains("data-theme"));
    }

    #[test]
    fn dark_set_emits_both_dark_blocks_with_only_its_entries() {
        let mut dark = TokenSet::default();
        dark.colors.insert("primary".into(), color("#D0BCFF"));

        let css = generate_css_variables(&sample(), Some(&dark));
        assert!(css.contains("@media (prefers-color-scheme: dark) {"));
        assert!(css.contains("[data-theme=\"dark\"] {"));

        // Dark blocks restate only the overridden color, not the light
        // set's other entries.
        let dark_attr = css.split("[data-theme=\"dark\"]").nth(1).unwrap();
        assert!(dark_attr.contains("--color-primary: #d0bcff;"));
        assert!(!dark_attr.contains("--space-md"));
        assert!(!dark_attr.contains("--radius-sm"));
    }
}
