mod compose;
mod css;
mod swiftui;
mod tailwind;

pub use compose::generate_compose_theme;
pub use css::generate_css_variables;
pub use swiftui::{generate_swiftui_theme, SwiftUiOptions};
pub use tailwind::{generate_tailwind_config, Dialect, TailwindOptions};

/// Render a numeric token value without a trailing `.0` on whole numbers.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// `gray-50` -> `Gray50`, `on-primary` -> `OnPrimary`.
pub(crate) fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '-' || c == '_' || c == '.' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `on-primary` -> `onPrimary`, `gray-50` -> `gray50`.
pub(crate) fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => pascal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-2.0), "-2");
    }

    #[test]
    fn name_casing_helpers() {
        assert_eq!(pascal_case("gray-50"), "Gray50");
        assert_eq!(pascal_case("on-primary"), "OnPrimary");
        assert_eq!(camel_case("on-primary"), "onPrimary");
        assert_eq!(camel_case("surface"), "surface");
    }
}
