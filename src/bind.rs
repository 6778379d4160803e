//! BindTable：占位符名到原始值的映射，以及把 `:name:` 文本替换成转义后值的过程。
//!
//! 这里没有真正的参数绑定：替换是整串、按插入顺序的文本替换。
//! 如果某个值本身包含另一个占位符的文本，后续替换会把它一并替换掉。

use crate::escaper::Escaper;
use crate::format::is_function_call;
use crate::value::SqlValue;
use std::collections::HashMap;

/// 单个绑定项。
#[derive(Debug, Clone, PartialEq)]
pub struct BindEntry {
    pub key: String,
    pub value: SqlValue,
}

impl BindEntry {
    /// 纯数字的 key 视为位置参数，不参与命名替换。
    pub fn is_positional(&self) -> bool {
        !self.key.is_empty() && self.key.bytes().all(|b| b.is_ascii_digit())
    }

    /// 在 SQL 文本中出现的形式：`:key:`。
    pub fn token(&self) -> String {
        format!(":{}:", self.key)
    }
}

/// 一条语句的绑定表，保持插入顺序。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindTable {
    entries: Vec<BindEntry>,
    index: HashMap<String, usize>,
}

impl BindTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个绑定，返回最终使用的 key。
    ///
    /// 去掉首尾的 `:`；若同名 key 已存在，则在末尾追加当前绑定数量作为后缀，
    /// 之前的绑定保持不变。调用方必须使用返回值来引用占位符。
    pub fn add(&mut self, key: &str, value: impl Into<SqlValue>) -> String {
        let base = key.trim_matches(':');
        let mut key = base.to_string();
        let mut suffix = self.entries.len();
        while self.index.contains_key(&key) {
            key = format!("{base}{suffix}");
            suffix += 1;
        }
        if key != base {
            tracing::trace!(requested = base, renamed = %key, "bind key collision");
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(BindEntry {
            key: key.clone(),
            value: value.into(),
        });
        key
    }

    pub fn get(&self, key: &str) -> Option<&SqlValue> {
        self.index.get(key).map(|&i| &self.entries[i].value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindEntry> {
        self.entries.iter()
    }

    /// 把 `sql` 里的 `:key:` 依次替换成转义后的值。
    ///
    /// 形如函数调用（`NOW()` 等）的值不转义；`escaper` 为 `None` 时所有值原样写入。
    pub fn substitute(&self, sql: &str, escaper: Option<&dyn Escaper>) -> String {
        let mut out = sql.to_string();
        for entry in self.entries.iter().filter(|e| !e.is_positional()) {
            let raw = entry.value.to_raw_string();
            let value = match escaper {
                Some(e) if !is_function_call(&raw) => e.escape(&raw),
                _ => raw,
            };
            out = out.replace(&entry.token(), trim_value(&value));
        }
        out
    }
}

impl<'a> IntoIterator for &'a BindTable {
    type Item = &'a BindEntry;
    type IntoIter = std::slice::Iter<'a, BindEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn trim_value(s: &str) -> &str {
    s.trim_matches([' ', '\t', '\n', '\r', '\0', '\u{000b}'])
}
