//! Rendering of command results as JSON, YAML or tables

use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::cli;

static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// JMESPath runtime with the extended function set
pub fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Quote bare backtick literals so `` `Healthy` `` compiles like `` `"Healthy"` ``
///
/// JMESPath allows eliding the quotes of string literals; the runtime wants
/// valid JSON between the backticks. Literals that already are JSON (numbers,
/// booleans, null, quoted strings, arrays, objects) are left alone.
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = BACKTICK_RE
        .get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok())
        .as_ref()
    else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

pub fn compile_jmespath(
    query: &str,
) -> Result<jpx_core::Expression<'static>, jpx_core::JmespathError> {
    get_jmespath_runtime().compile(&normalize_backtick_literals(query))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Concrete format for a `--output` flag, with `auto` mapped to `auto_default`
    pub fn resolve(flag: cli::OutputFormat, auto_default: OutputFormat) -> Self {
        match flag {
            cli::OutputFormat::Auto => auto_default,
            cli::OutputFormat::Json => OutputFormat::Json,
            cli::OutputFormat::Yaml => OutputFormat::Yaml,
            cli::OutputFormat::Table => OutputFormat::Table,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table)
    }
}

/// Apply `query` to `data`, if given
pub fn apply_query<T: Serialize>(data: T, query: Option<&str>) -> Result<Value> {
    let value = serde_json::to_value(data)?;

    let Some(query_str) = query else {
        return Ok(value);
    };

    let expr = compile_jmespath(query_str)
        .with_context(|| format!("Invalid JMESPath expression: {}", query_str))?;
    let result = expr.search(&value).context("JMESPath query failed")?;
    Ok(result)
}

pub fn print_output<T: Serialize>(data: T, format: OutputFormat, query: Option<&str>) -> Result<()> {
    let value = apply_query(data, query)?;
    println!("{}", render(&value, format)?);
    Ok(())
}

fn render(value: &Value, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
        OutputFormat::Table => render_table(value),
    })
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let mut table = Table::new();

            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            table.to_string()
        }
        Value::Array(_) => "(none)".to_string(),
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);

            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }

            table.to_string()
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
