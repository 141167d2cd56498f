//! Structural sniffing for untyped (JSON) section input.
//!
//! A section is rich as soon as any object carrying a `text` key appears in
//! it, at any depth below the row level. Everything else is legacy input,
//! where single cells may still bring runs under `customContentSyntax`.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{Line, StyledRun};

use super::{CellValue, InputFormat, RichCell, RichPart, SectionInput};

fn mentions_text(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("text"),
        Value::Array(items) => items.iter().any(mentions_text),
        _ => false,
    }
}

pub fn classify(section: &Value) -> InputFormat {
    let custom = section
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .flatten()
        .any(mentions_text);
    if custom {
        InputFormat::Custom
    } else {
        InputFormat::Normal
    }
}

fn rows(section: &Value) -> Result<&[Value]> {
    match section {
        Value::Null => Ok(&[]),
        Value::Array(rows) => Ok(rows),
        other => Err(Error::InvalidInput(format!(
            "section must be an array of rows, got {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn plain_cell(value: &Value) -> std::result::Result<CellValue, String> {
    match value {
        Value::Null => Ok(CellValue::Empty),
        Value::String(s) => Ok(CellValue::Text(s.clone())),
        Value::Number(n) => Ok(n.as_f64().map_or(CellValue::Empty, CellValue::Number)),
        Value::Bool(b) => Ok(CellValue::Bool(*b)),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                scalar_text(item).ok_or_else(|| format!("line entries must be text, got {}", kind(item)))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(CellValue::Lines),
        Value::Object(map) => match map.get("content") {
            Some(content) => plain_cell(content),
            None => Err("cell object needs a `content` or `customContentSyntax` key".to_string()),
        },
    }
}

fn decode_run(map: &Map<String, Value>) -> std::result::Result<StyledRun, String> {
    match map.get("text") {
        None => return Err("run object is missing `text`".to_string()),
        Some(Value::String(_)) => {}
        Some(other) => return Err(format!("`text` must be a string, got {}", kind(other))),
    }
    serde_json::from_value(Value::Object(map.clone())).map_err(|e| e.to_string())
}

fn rich_part(value: &Value) -> std::result::Result<RichPart, String> {
    match value {
        Value::Object(map) => decode_run(map).map(RichPart::Run),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => decode_run(map),
                other => scalar_text(other)
                    .map(StyledRun::plain)
                    .ok_or_else(|| format!("line entries must be runs, got {}", kind(other))),
            })
            .collect::<std::result::Result<Line, _>>()
            .map(RichPart::Line),
        other => scalar_text(other)
            .map(RichPart::Text)
            .ok_or_else(|| format!("unexpected {} in rich cell", kind(other))),
    }
}

fn rich_cell(value: &Value) -> std::result::Result<RichCell, String> {
    match value {
        Value::Null => Ok(RichCell::default()),
        Value::Array(parts) => parts
            .iter()
            .map(rich_part)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(RichCell),
        single => rich_part(single).map(|part| RichCell(vec![part])),
    }
}

/// Styled runs attached to a plain cell object; they replace its `content`.
fn custom_syntax(cell: &Value) -> Option<&Value> {
    cell.as_object()?.get("customContentSyntax")
}

impl SectionInput {
    /// Decode untyped section input, deciding plain vs rich for the whole section.
    pub fn from_json(section: &Value) -> Result<Self> {
        let rows = rows(section)?;
        match classify(section) {
            InputFormat::Normal => rows
                .iter()
                .enumerate()
                .map(|(r, row)| {
                    let cells = row.as_array().ok_or_else(|| {
                        Error::InvalidInput(format!("row {r} must be an array, got {}", kind(row)))
                    })?;
                    cells
                        .iter()
                        .enumerate()
                        .map(|(c, cell)| match custom_syntax(cell) {
                            Some(syntax) => rich_cell(syntax).map(CellValue::Rich).map_err(|reason| {
                                Error::MalformedRichInput {
                                    row: r,
                                    column: c,
                                    reason,
                                }
                            }),
                            None => plain_cell(cell).map_err(|reason| {
                                Error::InvalidInput(format!("row {r}, column {c}: {reason}"))
                            }),
                        })
                        .collect::<Result<Vec<_>>>()
                })
                .collect::<Result<Vec<_>>>()
                .map(SectionInput::Plain),
            InputFormat::Custom => rows
                .iter()
                .enumerate()
                .map(|(r, row)| {
                    let cells = row.as_array().ok_or_else(|| Error::MalformedRichInput {
                        row: r,
                        column: 0,
                        reason: format!("row must be an array, got {}", kind(row)),
                    })?;
                    cells
                        .iter()
                        .enumerate()
                        .map(|(c, cell)| {
                            rich_cell(cell).map_err(|reason| Error::MalformedRichInput {
                                row: r,
                                column: c,
                                reason,
                            })
                        })
                        .collect::<Result<Vec<_>>>()
                })
                .collect::<Result<Vec<_>>>()
                .map(SectionInput::Rich),
        }
    }
}
