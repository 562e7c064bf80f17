//! Cell updates: client text coerced to a column's declared type.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use editdata_core::{CellValue, SqlType, Value};
use editdata_metadata::ColumnMetadata;
use uuid::Uuid;

use crate::error::{EditError, EditResult};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// A new value for one column of a pending row.
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    ordinal: usize,
    value: Value,
    display: String,
}

impl CellUpdate {
    /// Coerce `text` to the column's type. `null_text` is the literal that means NULL.
    pub fn new(column: &ColumnMetadata, text: &str, null_text: &str) -> EditResult<Self> {
        if text == null_text {
            if !column.nullable {
                return Err(EditError::invalid_cell_value(
                    &column.name,
                    "column does not allow NULL",
                ));
            }
            return Ok(Self {
                ordinal: column.ordinal,
                value: Value::Null,
                display: null_text.to_string(),
            });
        }

        let value = coerce(&column.sql_type, text)
            .map_err(|message| EditError::invalid_cell_value(&column.name, message))?;
        let display = match &value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Ok(Self {
            ordinal: column.ordinal,
            value,
            display,
        })
    }

    /// Ordinal of the column this update targets.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The coerced value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Display text of the coerced value.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The update as a result-set cell.
    pub fn to_cell_value(&self) -> CellValue {
        CellValue::with_display(self.value.clone(), self.display.clone())
    }
}

fn coerce(sql_type: &SqlType, text: &str) -> Result<Value, String> {
    match sql_type {
        SqlType::Bit => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            _ => Err(format!("'{}' is not a bit value", text)),
        },
        SqlType::TinyInt => parse_int(text, 0, u8::MAX as i64),
        SqlType::SmallInt => parse_int(text, i16::MIN as i64, i16::MAX as i64),
        SqlType::Int => parse_int(text, i32::MIN as i64, i32::MAX as i64),
        SqlType::BigInt => parse_int(text, i64::MIN, i64::MAX),
        SqlType::Decimal { precision, scale } => parse_decimal(text, *precision, *scale),
        SqlType::Money => parse_decimal(text, 19, 4),
        SqlType::Real | SqlType::Float => match text.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(format!("'{}' is not a number", text)),
        },
        SqlType::Binary { .. } | SqlType::VarBinary { .. } | SqlType::Image => {
            let bytes = parse_hex(text)?;
            check_length(sql_type, bytes.len(), "bytes")?;
            Ok(Value::Bytes(bytes))
        }
        SqlType::Date => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|e| format!("'{}' is not a date: {}", text, e)),
        SqlType::DateTime => parse_datetime(text.trim()).map(Value::DateTime),
        SqlType::Time => TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(text.trim(), format).ok())
            .map(Value::Time)
            .ok_or_else(|| format!("'{}' is not a time", text)),
        SqlType::UniqueIdentifier => Uuid::parse_str(text.trim())
            .map(Value::Uuid)
            .map_err(|e| format!("'{}' is not a GUID: {}", text, e)),
        SqlType::Char { .. }
        | SqlType::VarChar { .. }
        | SqlType::Text { .. }
        | SqlType::Xml
        | SqlType::Other(_) => {
            check_length(sql_type, text.chars().count(), "characters")?;
            Ok(Value::String(text.to_string()))
        }
    }
}

fn parse_int(text: &str, min: i64, max: i64) -> Result<Value, String> {
    let parsed: i64 = text
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an integer", text))?;
    if parsed < min || parsed > max {
        return Err(format!("{} is outside the range {}..={}", parsed, min, max));
    }
    Ok(Value::Int(parsed))
}

fn parse_decimal(text: &str, precision: u8, scale: u8) -> Result<Value, String> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !all_digits(integer) || !all_digits(fraction) {
        return Err(format!("'{}' is not a decimal number", text));
    }
    if fraction.len() > scale as usize {
        return Err(format!("'{}' has more than {} decimal places", text, scale));
    }
    let integer = integer.trim_start_matches('0');
    if integer.len() > (precision.saturating_sub(scale)) as usize {
        return Err(format!(
            "'{}' does not fit decimal({}, {})",
            text, precision, scale
        ));
    }

    let mut canonical = String::new();
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        canonical.push('.');
        canonical.push_str(fraction);
    }
    Ok(Value::Decimal(canonical))
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() % 2 != 0 {
        return Err(format!("'{}' has an odd number of hex digits", text));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("'{}' is not hexadecimal", text))
        })
        .collect()
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("'{}' is not a date and time", text))
}

fn check_length(sql_type: &SqlType, length: usize, unit: &str) -> Result<(), String> {
    match sql_type.max_length() {
        Some(max) if length > max as usize => Err(format!(
            "{} {} exceeds the maximum of {} for {}",
            length, unit, max, sql_type
        )),
        _ => Ok(()),
    }
}
