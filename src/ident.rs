//! 标识符转义：表名、列名、`table.column` 以及 `table.*`。
//!
//! 只负责加引号，不校验字符集；不能依赖它防注入。

use crate::flavor::Flavor;

impl Flavor {
    /// 等价于 `quote_ident_with(ident, true)`。
    pub fn quote_ident(self, ident: &str) -> String {
        self.quote_ident_with(ident, true)
    }

    /// 为标识符加引号。
    ///
    /// - 含 `.` 时按第一个 `.` 拆成限定名与成员，分别加引号；成员为 `*` 时保持原样。
    /// - 不含 `.` 时，仅在 `tick` 为 true 时加引号。
    pub fn quote_ident_with(self, ident: &str, tick: bool) -> String {
        let ident = ident.trim();
        match ident.split_once('.') {
            Some((qualifier, "*")) => format!("{}.*", self.quote(qualifier)),
            Some((qualifier, member)) => format!("{}.{}", self.quote(qualifier), self.quote(member)),
            None if tick => self.quote(ident),
            None => ident.to_string(),
        }
    }
}

/// MySQL 反引号转义的便捷函数。
pub fn backtick(ident: &str) -> String {
    Flavor::MySQL.quote_ident(ident)
}
