//! Declared column types.
//!
//! A `SqlType` is parsed from the type name a result column reports
//! (`int`, `nvarchar(50)`, `varbinary(max)`, `decimal(10, 2)`). It decides how
//! cell text is coerced and how a column may be compared in a WHERE clause.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;

static DECLARED_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_ ]*?)\s*(?:\(\s*([A-Za-z]+|\d+)\s*(?:,\s*(\d+)\s*)?\))?\s*$")
        .expect("declared type pattern")
});

/// A declared SQL column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    Bit,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Decimal { precision: u8, scale: u8 },
    Money,
    Real,
    Float,
    /// Fixed-length character data.
    Char { unicode: bool, length: u32 },
    /// Variable-length character data; `None` is `max`.
    VarChar { unicode: bool, max_length: Option<u32> },
    /// Legacy unbounded character data (`text`, `ntext`).
    Text { unicode: bool },
    Binary { length: u32 },
    /// Variable-length binary; `None` is `max`.
    VarBinary { max_length: Option<u32> },
    Image,
    Date,
    DateTime,
    Time,
    UniqueIdentifier,
    Xml,
    /// Any type this crate has no special handling for. Treated as text.
    Other(String),
}

impl SqlType {
    /// Parse a declared type name. Unknown names become [`SqlType::Other`].
    pub fn parse(declared: &str) -> Self {
        let Some(caps) = DECLARED_TYPE.captures(declared) else {
            return SqlType::Other(declared.trim().to_string());
        };
        let name = caps
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let arg = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
        let second = caps.get(3).and_then(|m| m.as_str().parse::<u8>().ok());

        // `None` for max, `Some(n)` for an explicit length; default length is 1.
        let length = || -> Option<u32> {
            match arg.as_deref() {
                Some("max") => None,
                Some(n) => n.parse().ok().or(Some(1)),
                None => Some(1),
            }
        };

        match name.as_str() {
            "bit" => SqlType::Bit,
            "tinyint" => SqlType::TinyInt,
            "smallint" => SqlType::SmallInt,
            "int" | "integer" => SqlType::Int,
            "bigint" => SqlType::BigInt,
            "decimal" | "numeric" => SqlType::Decimal {
                precision: arg.as_deref().and_then(|p| p.parse().ok()).unwrap_or(18),
                scale: second.unwrap_or(0),
            },
            "money" | "smallmoney" => SqlType::Money,
            "real" => SqlType::Real,
            "float" | "double precision" => SqlType::Float,
            "char" | "nchar" => SqlType::Char {
                unicode: name.starts_with('n'),
                length: length().unwrap_or(1),
            },
            "varchar" | "nvarchar" => SqlType::VarChar {
                unicode: name.starts_with('n'),
                max_length: length(),
            },
            "text" | "ntext" => SqlType::Text {
                unicode: name.starts_with('n'),
            },
            "binary" => SqlType::Binary {
                length: length().unwrap_or(1),
            },
            "varbinary" => SqlType::VarBinary {
                max_length: length(),
            },
            "image" => SqlType::Image,
            "date" => SqlType::Date,
            "datetime" | "datetime2" | "smalldatetime" => SqlType::DateTime,
            "time" => SqlType::Time,
            "uniqueidentifier" => SqlType::UniqueIdentifier,
            "xml" => SqlType::Xml,
            _ => SqlType::Other(declared.trim().to_string()),
        }
    }

    /// Large-object types cannot be compared reliably with `=`.
    pub fn is_large_object(&self) -> bool {
        matches!(
            self,
            SqlType::Text { .. }
                | SqlType::Image
                | SqlType::Xml
                | SqlType::VarChar {
                    max_length: None,
                    ..
                }
                | SqlType::VarBinary { max_length: None }
        )
    }

    /// Returns true for binary types.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            SqlType::Binary { .. } | SqlType::VarBinary { .. } | SqlType::Image
        )
    }

    /// Returns true for integer types.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Int | SqlType::BigInt
        )
    }

    /// Upper bound on character or byte length, if the type has one.
    pub fn max_length(&self) -> Option<u32> {
        match self {
            SqlType::Char { length, .. } | SqlType::Binary { length } => Some(*length),
            SqlType::VarChar { max_length, .. } | SqlType::VarBinary { max_length } => *max_length,
            _ => None,
        }
    }
}

fn length_suffix(max_length: &Option<u32>) -> String {
    match max_length {
        Some(n) => n.to_string(),
        None => "max".to_string(),
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = |unicode: &bool| if *unicode { "n" } else { "" };
        match self {
            SqlType::Bit => write!(f, "bit"),
            SqlType::TinyInt => write!(f, "tinyint"),
            SqlType::SmallInt => write!(f, "smallint"),
            SqlType::Int => write!(f, "int"),
            SqlType::BigInt => write!(f, "bigint"),
            SqlType::Decimal { precision, scale } => write!(f, "decimal({}, {})", precision, scale),
            SqlType::Money => write!(f, "money"),
            SqlType::Real => write!(f, "real"),
            SqlType::Float => write!(f, "float"),
            SqlType::Char { unicode, length } => write!(f, "{}char({})", prefix(unicode), length),
            SqlType::VarChar {
                unicode,
                max_length,
            } => write!(f, "{}varchar({})", prefix(unicode), length_suffix(max_length)),
            SqlType::Text { unicode } => write!(f, "{}text", prefix(unicode)),
            SqlType::Binary { length } => write!(f, "binary({})", length),
            SqlType::VarBinary { max_length } => {
                write!(f, "varbinary({})", length_suffix(max_length))
            }
            SqlType::Image => write!(f, "image"),
            SqlType::Date => write!(f, "date"),
            SqlType::DateTime => write!(f, "datetime"),
            SqlType::Time => write!(f, "time"),
            SqlType::UniqueIdentifier => write!(f, "uniqueidentifier"),
            SqlType::Xml => write!(f, "xml"),
            SqlType::Other(name) => write!(f, "{}", name),
        }
    }
}
