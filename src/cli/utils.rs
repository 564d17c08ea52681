use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::FileUpload;
use crate::cli::OutputFormat;
use crate::list::Pagination;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a single record: pretty JSON, or `key: value` lines for text
pub fn output_record<T: Serialize>(output_format: &OutputFormat, record: &T) -> anyhow::Result<()> {
    let value = serde_json::to_value(record)?;
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => match &value {
            Value::Object(map) => {
                for (key, field) in map {
                    match field {
                        Value::Null => {}
                        Value::String(s) => println!("{}: {}", key, s),
                        other => println!("{}: {}", key, other),
                    }
                }
            }
            other => println!("{}", other),
        },
    }
    Ok(())
}

/// Output one page of a list. Text mode prints an aligned table and a
/// pagination footer.
pub fn output_page<T: Serialize>(
    output_format: &OutputFormat,
    collection_name: &str,
    records: &[T],
    pagination: &Pagination,
    headers: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: records,
                    "meta": {
                        "total": pagination.total,
                        "page": pagination.page_index,
                        "limit": pagination.page_size,
                        "totalPages": pagination.total_pages(),
                    }
                }))?
            );
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No {} found", collection_name);
            } else {
                let rows: Vec<Vec<String>> = records.iter().map(&row).collect();
                print!("{}", render_table(headers, &rows));
            }
            println!(
                "Page {} of {} ({} total)",
                pagination.page_index,
                pagination.total_pages().max(1),
                pagination.total
            );
        }
    }
    Ok(())
}

/// Left-aligned columns separated by two spaces
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = format_line(headers.iter().copied(), &widths);
    for row in rows {
        out.push_str(&format_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("{}\n", line.join("  ").trim_end())
}

pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

/// Read a file given on the command line into an upload
pub async fn load_upload(path: Option<String>) -> anyhow::Result<Option<FileUpload>> {
    match path {
        Some(path) => {
            let upload = FileUpload::from_path(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path, e))?;
            Ok(Some(upload))
        }
        None => Ok(None),
    }
}

/// Password from the flag, then `CONSOLE_PASSWORD`, then one line of stdin
pub fn resolve_password(provided: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }
    if let Ok(password) = std::env::var("CONSOLE_PASSWORD") {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns() {
        let table = render_table(
            &["ID", "NAME"],
            &[vec!["c1".into(), "Acme".into()], vec!["c22".into(), "Globex Corp".into()]],
        );
        assert_eq!(table, "ID   NAME\nc1   Acme\nc22  Globex Corp\n");
    }

    #[test]
    fn dash_for_missing_values() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
