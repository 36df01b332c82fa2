//! Render query results as text, CSV or JSON.

use anyhow::Result;
use salescope_query::QueryResult;
use std::io::Write;

/// Write a result as aligned plain text.
pub fn write_text<W: Write>(result: &QueryResult, writer: &mut W) -> Result<()> {
    match result {
        QueryResult::Scalar { label, value } => {
            writeln!(writer, "{label}: {value}")?;
        }
        QueryResult::Series { label, pairs } => {
            writeln!(writer, "{label}")?;
            write_table(
                writer,
                &["key".to_string(), "value".to_string()],
                pairs
                    .iter()
                    .map(|(k, v)| vec![k.clone(), v.to_string()])
                    .collect(),
            )?;
        }
        QueryResult::Table {
            label,
            columns,
            rows,
        } => {
            writeln!(writer, "{label}")?;
            write_table(
                writer,
                columns,
                rows.iter()
                    .map(|row| row.iter().map(ToString::to_string).collect())
                    .collect(),
            )?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(writer: &mut W, columns: &[String], rows: Vec<Vec<String>>) -> Result<()> {
    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(String::len).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            write!(writer, "  ")?;
        }
        write!(writer, "{:width$}", col, width = widths[i])?;
    }
    writeln!(writer)?;

    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            write!(writer, "  ")?;
        }
        write!(writer, "{}", "-".repeat(*width))?;
    }
    writeln!(writer)?;

    let count = rows.len();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                write!(writer, "  ")?;
            }
            if i < widths.len() {
                write!(writer, "{:width$}", cell, width = widths[i])?;
            } else {
                write!(writer, "{cell}")?;
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer)?;
    writeln!(writer, "{count} row(s)")?;
    Ok(())
}

/// Write a result as CSV.
pub fn write_csv<W: Write>(result: &QueryResult, writer: &mut W) -> Result<()> {
    match result {
        QueryResult::Scalar { label, value } => {
            writeln!(writer, "label,value")?;
            writeln!(writer, "{},{}", escape_csv(label), escape_csv(&value.to_string()))?;
        }
        QueryResult::Series { pairs, .. } => {
            writeln!(writer, "key,value")?;
            for (key, value) in pairs {
                writeln!(writer, "{},{}", escape_csv(key), escape_csv(&value.to_string()))?;
            }
        }
        QueryResult::Table { columns, rows, .. } => {
            writeln!(writer, "{}", columns.join(","))?;
            for row in rows {
                let cells: Vec<String> = row.iter().map(|v| escape_csv(&v.to_string())).collect();
                writeln!(writer, "{}", cells.join(","))?;
            }
        }
    }
    Ok(())
}

/// Write a result as pretty-printed JSON.
pub fn write_json<W: Write>(result: &QueryResult, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(result)?)?;
    Ok(())
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
