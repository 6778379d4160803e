//! Escaper：把原始值转义成可直接拼入 SQL 字符串字面量的文本。
//!
//! 安全警告：文本替换永远不如真正的参数绑定安全；这里只是替代方案。

use crate::flavor::Flavor;

/// 连接层提供的转义能力（例如驱动的 `real_escape_string`）。
///
/// 返回值不含外层引号，引号由格式化阶段负责。
pub trait Escaper: dyn_clone::DynClone + std::fmt::Debug + Send + Sync {
    fn escape(&self, raw: &str) -> String;
}

dyn_clone::clone_trait_object!(Escaper);

impl Escaper for Flavor {
    fn escape(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 8);
        match self {
            Flavor::MySQL => {
                // 与 mysql_real_escape_string 转义的字符集合一致
                for ch in raw.chars() {
                    match ch {
                        '\u{0000}' => out.push_str("\\0"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\u{001a}' => out.push_str("\\Z"),
                        '\'' => out.push_str("\\'"),
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        _ => out.push(ch),
                    }
                }
            }
            Flavor::PostgreSQL | Flavor::SQLite => {
                for ch in raw.chars() {
                    match ch {
                        '\u{0000}' => {}
                        '\'' => out.push_str("''"),
                        _ => out.push(ch),
                    }
                }
            }
        }
        out
    }
}

/// 不做任何转义，原样返回（对应关闭 `clean_binds` 的场景）。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscape;

impl Escaper for NoEscape {
    fn escape(&self, raw: &str) -> String {
        raw.to_string()
    }
}
