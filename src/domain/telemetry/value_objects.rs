//! Telemetry Context - Value Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// KQL 查询文本
///
/// 对系统而言是不透明文本：只做过滤，不做语法校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KqlQuery(String);

impl KqlQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KqlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 单元格标量值
///
/// 由 Kusto 返回的列类型决定解码方式，null 由调用方以 `None` 表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Long(i64),
    Real(f64),
    DateTime(DateTime<Utc>),
    Text(String),
}

impl ScalarValue {
    /// 按 Kusto 列类型解码单元格
    ///
    /// - `bool`/`boolean` -> Bool
    /// - `int`/`long` -> Long
    /// - `real`/`double`/`decimal` -> Real
    /// - `datetime`/`date` -> DateTime（RFC 3339）
    /// - 其它 -> Text
    ///
    /// 类型与值不匹配时按 JSON 值本身推断，返回 `None` 仅当值为 null
    pub fn from_cell(column_type: &str, cell: &Value) -> Option<Self> {
        if cell.is_null() {
            return None;
        }

        let decoded = match column_type.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => cell.as_bool().map(Self::Bool),
            "int" | "long" => cell.as_i64().map(Self::Long),
            "real" | "double" | "decimal" => match cell {
                Value::Number(n) => n.as_f64().map(Self::Real),
                // decimal 列可能以字符串返回
                Value::String(s) => s.parse::<f64>().ok().map(Self::Real),
                _ => None,
            },
            "datetime" | "date" => cell
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| Self::DateTime(dt.with_timezone(&Utc))),
            _ => None,
        };

        Some(decoded.unwrap_or_else(|| Self::infer(cell)))
    }

    /// 无列类型信息时按 JSON 值推断
    fn infer(cell: &Value) -> Self {
        match cell {
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Long(i),
                None => Self::Real(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Long(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Text(s) => f.write_str(s),
        }
    }
}
