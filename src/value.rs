//! SQL 标量值类型。

use std::borrow::Cow;
use time::PrimitiveDateTime;
use time::macros::format_description;

/// 绑定到语句中的原始值（尚未转义）。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    DateTime(PrimitiveDateTime),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// `Null` 或字符串 `"NULL"`；数值 0 永远不算。
    pub fn is_null_literal(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s == "NULL",
            _ => false,
        }
    }

    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }

    /// 数值，或形如数值的字符串（如 `"42"`、`"-1.5e3"`）。
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::I64(_) | Self::U64(_) | Self::F64(_) => true,
            Self::String(s) => looks_numeric(s),
            _ => false,
        }
    }

    /// 替换阶段使用的原始文本。
    pub fn to_raw_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Self::I64(n) => n.to_string(),
            Self::U64(n) => n.to_string(),
            Self::F64(n) => n.to_string(),
            Self::String(s) => s.to_string(),
            Self::DateTime(dt) => dt
                .format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second]"
                ))
                .unwrap_or_else(|_| dt.to_string()),
        }
    }
}

/// 判断字符串是否是十进制数值（允许前导空白、符号、小数与指数）。
pub(crate) fn looks_numeric(s: &str) -> bool {
    let s = s.trim_start();
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let mut digits = 0usize;
    let mut seen_dot = false;
    let mut chars = body.char_indices().peekable();
    while let Some(&(_, c)) = chars.peek() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        chars.next();
    }
    if digits == 0 {
        return false;
    }
    match chars.next() {
        None => true,
        Some((i, 'e' | 'E')) => {
            let exp = &body[i + 1..];
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.bytes().all(|b| b.is_ascii_digit())
        }
        Some(_) => false,
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for SqlValue {
    fn from(v: i8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<PrimitiveDateTime> for SqlValue {
    fn from(v: PrimitiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(PrimitiveDateTime::new(v.date(), v.time()))
    }
}
