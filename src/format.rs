//! 值格式化：决定一个值在 SQL 文本中写成字面量还是占位符，
//! 以及对 `NOW()`、`DATE_FORMAT(created, '%Y')` 这类函数调用做参数转义。

use crate::compiler::Compiler;
use crate::value::{SqlValue, looks_numeric};
use regex::Regex;
use std::sync::OnceLock;

fn function_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[_A-Z0-9]+\((.*)\)").expect("invalid function call regex"))
}

fn qualified_ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[_a-zA-Z0-9]+\.[_a-zA-Z0-9]+$").expect("invalid qualified identifier regex")
    })
}

/// 形如 `NAME(args)` 的 SQL 函数调用（函数名须为大写）。
pub fn is_function_call(s: &str) -> bool {
    function_call_re().is_match(s)
}

/// 形如 `table.column` 的限定列名。
pub fn is_qualified_ident(s: &str) -> bool {
    qualified_ident_re().is_match(s)
}

impl Compiler {
    /// 格式化一个值，返回写入 SQL 的片段。
    ///
    /// 判断顺序：`NULL` → 空串 → 函数调用 → 布尔 → 数值占位符 → 带引号的字符串占位符。
    /// 占位符名为 `prefix + column`。
    pub fn format_value(&self, value: &SqlValue, column: &str, prefix: &str) -> String {
        if value.is_null_literal() {
            return "NULL".to_string();
        }
        if value.is_empty_string() {
            return "''".to_string();
        }
        if let Some(s) = value.as_str()
            && is_function_call(s)
        {
            return self.encode_function_call(s);
        }
        match value {
            SqlValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            v if v.is_numeric() => format!(":{prefix}{column}:"),
            _ => format!("':{prefix}{column}:'"),
        }
    }

    /// 重新转义函数调用的参数：字符串字面量转义后重新加引号，
    /// 数值截断为整数，其余按标识符加引号。
    pub fn encode_function_call(&self, value: &str) -> String {
        if value.to_uppercase() == value && value.ends_with("()") {
            return value.to_string();
        }

        let name = value.find('(').map_or(value, |i| &value[..i]);
        let Some(caps) = function_call_re().captures(value) else {
            return format!("{name}()");
        };

        let args: Vec<String> = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(|arg| self.encode_function_arg(arg))
            .collect();

        format!("{name}({})", args.join(", "))
    }

    fn encode_function_arg(&self, arg: &str) -> String {
        if arg.len() >= 2 && arg.starts_with('\'') && arg.ends_with('\'') {
            let inner = arg.trim_matches('\'');
            if inner.is_empty() {
                return "''".to_string();
            }
            return format!("'{}'", self.escape(inner));
        }

        if looks_numeric(arg) {
            return truncate_to_int(&self.escape(arg)).to_string();
        }

        self.quote_ident(arg)
    }
}

fn truncate_to_int(s: &str) -> i64 {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    // `as` 对越界值做饱和转换
    s.parse::<f64>().map_or(0, |f| f.trunc() as i64)
}
