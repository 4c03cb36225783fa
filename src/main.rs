use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::{json, Value};

use tokenbridge::generate::{SwiftUiOptions, TailwindOptions};
use tokenbridge::{logging, ops, ComplianceLevel, Dialect};

/// One request per line: `{"op": "...", "params": {...}}`. Responses are
/// `{"ok": <text>}` or `{"error": <message>}`, one per line. A failing
/// request never takes the process down.
#[derive(Debug, Deserialize)]
struct Request {
    op: String,
    #[serde(default)]
    params: Params,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Params {
    source: Option<String>,
    tokens: Option<Value>,
    dark_tokens: Option<Value>,
    level: Option<ComplianceLevel>,
    dialect: Option<Dialect>,
    glass_effects: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    tracing::info!("tokenbridge ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match handle(&line) {
            Ok(out) => json!({ "ok": out }),
            Err(err) => {
                tracing::warn!("request failed: {err:#}");
                json!({ "error": format!("{err:#}") })
            }
        };
        serde_json::to_writer(&mut stdout, &response)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle(line: &str) -> anyhow::Result<String> {
    let request: Request = serde_json::from_str(line).context("malformed request line")?;
    tracing::debug!(op = %request.op, "handling request");
    let params = request.params;
    let out = match request.op.as_str() {
        "extract-tailwind" => ops::tailwind_to_tokens(source(&params)?)?,
        "extract-css" => ops::css_to_tokens(source(&params)?)?,
        "extract-variables" => ops::variables_to_tokens(source(&params)?)?,
        "extract-dtcg" => ops::dtcg_to_tokens(source(&params)?)?,
        "generate-compose" => ops::tokens_to_compose(&tokens(&params)?)?,
        "generate-swiftui" => {
            let options = SwiftUiOptions {
                glass_effects: params.glass_effects.unwrap_or(false),
            };
            ops::tokens_to_swiftui(&tokens(&params)?, &options)?
        }
        "generate-tailwind" => {
            let options = TailwindOptions {
                dialect: params.dialect.unwrap_or_default(),
            };
            ops::tokens_to_tailwind(&tokens(&params)?, &options)?
        }
        "generate-css" => {
            let dark = params
                .dark_tokens
                .as_ref()
                .map(token_value)
                .transpose()
                .context("darkTokens")?;
            ops::tokens_to_css(&tokens(&params)?, dark.as_ref())?
        }
        "check-contrast" => {
            ops::tokens_to_contrast_report(&tokens(&params)?, params.level.unwrap_or_default())?
        }
        other => bail!("unknown operation: {other}"),
    };
    Ok(out)
}

fn source(params: &Params) -> anyhow::Result<&str> {
    params
        .source
        .as_deref()
        .context("missing required param: source")
}

fn tokens(params: &Params) -> anyhow::Result<Value> {
    let value = params
        .tokens
        .as_ref()
        .context("missing required param: tokens")?;
    token_value(value).context("tokens")
}

/// Token params arrive either as embedded JSON or as a JSON string.
fn token_value(value: &Value) -> anyhow::Result<Value> {
    match value {
        Value::String(text) => serde_json::from_str(text).context("param is not valid JSON"),
        other => Ok(other.clone()),
    }
}
