//! SQL Flavor（方言）：控制标识符引号、字符串转义与少量方言函数。

use std::fmt;
use std::str::FromStr;

/// 支持的 SQL 方言；建表语句始终按 MySQL 语法输出。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
}

impl Flavor {
    /// 标识符引号字符。
    pub fn quote_char(self) -> char {
        match self {
            Self::MySQL => '`',
            Self::PostgreSQL | Self::SQLite => '"',
        }
    }

    /// 为单个标识符加引号（不处理 `.`，见 [`Flavor::quote_ident`]）。
    pub fn quote(self, name: &str) -> String {
        let q = self.quote_char();
        format!("{q}{name}{q}")
    }

    /// `ORDER BY` 随机排序使用的函数。
    pub fn random_function(self) -> &'static str {
        match self {
            Self::MySQL => "RAND()",
            Self::PostgreSQL | Self::SQLite => "RANDOM()",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown sql flavor `{0}`")]
pub struct UnknownFlavor(pub String);

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySQL),
            "postgres" | "postgresql" | "pg" => Ok(Self::PostgreSQL),
            "sqlite" | "sqlite3" => Ok(Self::SQLite),
            _ => Err(UnknownFlavor(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Flavor, UnknownFlavor};
    use pretty_assertions::assert_eq;

    #[test]
    fn quote_per_flavor() {
        assert_eq!(Flavor::MySQL.quote("users"), "`users`");
        assert_eq!(Flavor::PostgreSQL.quote("users"), "\"users\"");
        assert_eq!(Flavor::SQLite.quote("users"), "\"users\"");
    }

    #[test]
    fn parse_flavor_names() {
        assert_eq!("MySQL".parse::<Flavor>(), Ok(Flavor::MySQL));
        assert_eq!("pg".parse::<Flavor>(), Ok(Flavor::PostgreSQL));
        assert_eq!(
            "oracle".parse::<Flavor>(),
            Err(UnknownFlavor("oracle".to_string()))
        );
    }

    #[test]
    fn display_and_default() {
        assert_eq!(Flavor::default(), Flavor::MySQL);
        assert_eq!(Flavor::SQLite.to_string(), "SQLite");
        assert_eq!(Flavor::PostgreSQL.random_function(), "RANDOM()");
    }
}
