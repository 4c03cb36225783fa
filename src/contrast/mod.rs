//! WCAG 2.1 contrast checking over the color collection: name-driven
//! pairing plus the standard relative-luminance ratio.

use serde::{Deserialize, Serialize};

use crate::color::hex_to_rgb;
use crate::schema::TokenSet;

/// Requested compliance level; both levels are always computed per pair,
/// this only selects which one drives the pass/fail counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceLevel {
    #[default]
    Aa,
    Aaa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    pub normal_text: bool,
    pub large_text: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairReport {
    pub foreground: String,
    pub background: String,
    pub foreground_value: String,
    pub background_value: String,
    pub ratio: f64,
    pub aa: LevelResult,
    pub aaa: LevelResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    pub level: ComplianceLevel,
    pub total_pairs: usize,
    pub passing: usize,
    pub failing: usize,
    pub pairs: Vec<PairReport>,
}

const FOREGROUND_NAMES: [&str; 5] = ["text", "foreground", "fg", "on-surface", "on-background"];
const BACKGROUND_NAMES: [&str; 4] = ["surface", "background", "bg", "canvas"];

/// Check every heuristically paired color combination. Fewer than two
/// colors yields an empty report rather than an error.
pub fn check_contrast(tokens: &TokenSet, level: ComplianceLevel) -> ContrastReport {
    let pairs = if tokens.colors.len() < 2 {
        Vec::new()
    } else {
        pair_names(tokens)
    };

    let mut reports = Vec::with_capacity(pairs.len());
    for (fg, bg) in pairs {
        let (Some(fg_token), Some(bg_token)) = (tokens.colors.get(&fg), tokens.colors.get(&bg))
        else {
            continue;
        };
        let Some(ratio) = contrast_ratio(&fg_token.value, &bg_token.value) else {
            continue;
        };
        reports.push(PairReport {
            foreground: fg,
            background: bg,
            foreground_value: fg_token.value.clone(),
            background_value: bg_token.value.clone(),
            ratio: (ratio * 100.0).round() / 100.0,
            aa: LevelResult {
                normal_text: ratio >= 4.5,
                large_text: ratio >= 3.0,
            },
            aaa: LevelResult {
                normal_text: ratio >= 7.0,
                large_text: ratio >= 4.5,
            },
        });
    }

    let passing = reports
        .iter()
        .filter(|pair| match level {
            ComplianceLevel::Aa => pair.aa.normal_text,
            ComplianceLevel::Aaa => pair.aaa.normal_text,
        })
        .count();

    ContrastReport {
        level,
        total_pairs: reports.len(),
        passing,
        failing: reports.len() - passing,
        pairs: reports,
    }
}

/// Name-driven pairing: `on-X`/`onX` companions first, then the fixed
/// foreground-name x background-name sets, then every unordered pair.
fn pair_names(tokens: &TokenSet) -> Vec<(String, String)> {
    let names: Vec<&String> = tokens.colors.keys().collect();

    let mut pairs = Vec::new();
    for base in &names {
        let hyphenated = format!("on-{base}");
        let camel = format!("on{}", capitalize_first(base));
        for candidate in [hyphenated, camel] {
            if tokens.colors.contains_key(&candidate) {
                pairs.push((candidate, (*base).clone()));
                break;
            }
        }
    }
    if !pairs.is_empty() {
        return pairs;
    }

    for fg in &names {
        if !FOREGROUND_NAMES.contains(&fg.as_str()) {
            continue;
        }
        for bg in &names {
            if BACKGROUND_NAMES.contains(&bg.as_str()) {
                pairs.push(((*fg).clone(), (*bg).clone()));
            }
        }
    }
    if !pairs.is_empty() {
        return pairs;
    }

    for (i, fg) in names.iter().enumerate() {
        for bg in names.iter().skip(i + 1) {
            pairs.push(((*fg).clone(), (*bg).clone()));
        }
    }
    pairs
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// WCAG 2.1 relative luminance of a hex color.
fn relative_luminance(hex: &str) -> Option<f64> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Some(0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b))
}

/// Contrast ratio in [1, 21]; symmetric in its arguments.
pub fn contrast_ratio(a: &str, b: &str) -> Option<f64> {
    let la = relative_luminance(a)?;
    let lb = relative_luminance(b)?;
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Some((lighter + 0.05) / (darker + 0.05))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColorToken;

    fn tokens_from(entries: &[(&str, &str)]) -> TokenSet {
        let mut tokens = TokenSet::default();
        for (name, value) in entries {
            tokens.colors.insert(
                (*name).to_string(),
                ColorToken {
                    value: (*value).to_string(),
                    description: None,
                    category: None,
                },
            );
        }
        tokens
    }

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn black_on_white_is_twenty_one() {
        let ratio = contrast_ratio("#000000", "#FFFFFF").unwrap();
        assert!(approx(ratio, 21.0, 0.01), "ratio: {ratio}");
    }

    #[test]
    fn same_color_is_one() {
        let ratio = contrast_ratio("#6750A4", "#6750A4").unwrap();
        assert!(approx(ratio, 1.0, 0.001), "ratio: {ratio}");
    }

    #[test]
    fn ratio_is_symmetric() {
        let ab = contrast_ratio("#6750A4", "#FF6B35").unwrap();
        let ba = contrast_ratio("#FF6B35", "#6750A4").unwrap();
        assert!(approx(ab, ba, 1e-9));
    }

    #[test]
    fn on_pair_scenario_reports_single_passing_pair() {
        let tokens = tokens_from(&[("primary", "#000000"), ("on-primary", "#FFFFFF")]);
        let report = check_contrast(&tokens, ComplianceLevel::Aa);
        assert_eq!(report.total_pairs, 1);
        assert_eq!(report.passing, 1);
        assert_eq!(report.failing, 0);
        let pair = &report.pairs[0];
        assert_eq!(pair.foreground, "on-primary");
        assert_eq!(pair.background, "primary");
        assert!(approx(pair.ratio, 21.0, 0.01));
        assert!(pair.aa.normal_text);
        assert!(pair.aaa.normal_text);
    }

    #[test]
    fn camel_case_companions_are_found() {
        let tokens = tokens_from(&[("surface", "#FFFFFF"), ("onSurface", "#1C1B1F")]);
        let report = check_contrast(&tokens, ComplianceLevel::Aa);
        assert_eq!(report.total_pairs, 1);
        assert_eq!(report.pairs[0].foreground, "onSurface");
    }

    #[test]
    fn foreground_background_names_pair_when_no_companions() {
        let tokens = tokens_from(&[
            ("text", "#1C1B1F"),
            ("background", "#FFFFFF"),
            ("canvas", "#FAFAFA"),
        ]);
        let report = check_contrast(&tokens, ComplianceLevel::Aa);
        assert_eq!(report.total_pairs, 2);
        assert!(report
            .pairs
            .iter()
            .all(|pair| pair.foreground == "text"));
    }

    #[test]
    fn exhaustive_pairing_covers_unordered_combinations() {
        let tokens = tokens_from(&[
            ("alpha", "#111111"),
            ("beta", "#222222"),
            ("gamma", "#333333"),
        ]);
        let report = check_contrast(&tokens, ComplianceLevel::Aa);
        assert_eq!(report.total_pairs, 3);
    }

    #[test]
    fn fewer_than_two_colors_is_an_empty_report() {
        let report = check_contrast(&tokens_from(&[("only", "#000000")]), ComplianceLevel::Aa);
        assert_eq!(report.total_pairs, 0);
        assert_eq!(report.passing, 0);
        assert!(report.pairs.is_empty());
    }

    #[test]
    fn both_levels_computed_regardless_of_request() {
        // 4.54:1 passes AA normal text but fails AAA normal text.
        let tokens = tokens_from(&[("gray", "#767676"), ("on-gray", "#FFFFFF")]);
        let report = check_contrast(&tokens, ComplianceLevel::Aaa);
        let pair = &report.pairs[0];
        assert!(pair.aa.normal_text);
        assert!(!pair.aaa.normal_text);
        assert!(pair.aaa.large_text);
        assert_eq!(report.passing, 0);
        assert_eq!(report.failing, 1);
    }

    #[test]
    fn level_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(ComplianceLevel::Aaa).unwrap(),
            serde_json::json!("AAA")
        );
    }
}
