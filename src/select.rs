//! SELECT 语句：finder、表描述、排序与分页选项。

use crate::compiler::{Compiler, Statement};
use crate::condition::Conditions;
use crate::error::CompileError;
use crate::fields::Fields;
use crate::string_builder::StringBuilder;
use std::convert::Infallible;
use std::str::FromStr;

/// 查询方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Finder {
    /// 返回所有行。
    #[default]
    All,
    /// 只取第一行：强制 `LIMIT 1`，忽略 offset。
    First,
    /// ``SELECT COUNT(*) AS `count` ``。
    Count,
}

impl FromStr for Finder {
    type Err = Infallible;

    /// 未知的名字按 `all` 处理。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "first" => Self::First,
            "count" => Self::Count,
            _ => Self::All,
        })
    }
}

/// FROM 子句中的表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tables {
    Single(String),
    /// `(alias, table)`；alias 为空时使用表名。别名首字母总是大写。
    Multi(Vec<(Option<String>, String)>),
}

impl Tables {
    /// 显式指定别名的多表查询。
    pub fn aliased<I, A, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        Self::Multi(
            pairs
                .into_iter()
                .map(|(a, t)| (Some(a.into()), t.into()))
                .collect(),
        )
    }
}

impl From<&str> for Tables {
    fn from(table: &str) -> Self {
        Self::Single(table.to_string())
    }
}

impl From<String> for Tables {
    fn from(table: String) -> Self {
        Self::Single(table)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Tables {
    fn from(tables: [S; N]) -> Self {
        Self::Multi(tables.into_iter().map(|t| (None, t.into())).collect())
    }
}

impl<S: Into<String>> From<Vec<S>> for Tables {
    fn from(tables: Vec<S>) -> Self {
        Self::Multi(tables.into_iter().map(|t| (None, t.into())).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    Columns(Vec<(String, Direction)>),
    /// 随机排序（MySQL 的 `RAND()`）。
    Random,
}

/// SELECT 可识别的全部选项。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectOptions {
    pub fields: Fields,
    pub conditions: Conditions,
    pub order: Option<Order>,
    pub group: Vec<String>,
    pub limit: Option<u64>,
    /// 仅在设置了 `limit` 时生效。
    pub offset: Option<u64>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// 追加一个排序列。
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        match &mut self.order {
            Some(Order::Columns(cols)) => cols.push((column.into(), direction)),
            _ => self.order = Some(Order::Columns(vec![(column.into(), direction)])),
        }
        self
    }

    pub fn order_random(mut self) -> Self {
        self.order = Some(Order::Random);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group.push(column.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl Compiler {
    /// 编译 SELECT。子句顺序固定为 WHERE → ORDER BY → GROUP BY → LIMIT。
    pub fn compile_select(
        &self,
        finder: Finder,
        tables: impl Into<Tables>,
        options: &SelectOptions,
    ) -> Result<Statement, CompileError> {
        let (from, aliases) = self.from_clause(&tables.into())?;
        let mut ctx = self.open_context();

        let fields = match finder {
            Finder::Count => format!("COUNT(*) AS {}", self.quote_ident("count")),
            _ if !options.fields.is_empty() => self
                .build_select_fields(&mut ctx, &options.fields)
                .join(", "),
            _ if aliases.len() > 1 => aliases
                .iter()
                .map(|a| format!("{a}.*"))
                .collect::<Vec<_>>()
                .join(", "),
            _ => "*".to_string(),
        };

        let mut buf = StringBuilder::new();
        buf.write_leading("SELECT");
        buf.write_leading(&fields);
        buf.write_leading("FROM");
        buf.write_leading(&from);

        let where_sql = self.build_conditions(&mut ctx, &options.conditions)?;
        if !where_sql.is_empty() {
            buf.write_leading("WHERE");
            buf.write_leading(&where_sql);
        }

        match &options.order {
            Some(Order::Columns(cols)) if !cols.is_empty() => {
                let order: Vec<String> = cols
                    .iter()
                    .map(|(c, d)| format!("{} {}", self.quote_ident(c), d.as_str()))
                    .collect();
                buf.write_leading("ORDER BY");
                buf.write_leading(&order.join(", "));
            }
            Some(Order::Random) => {
                buf.write_leading("ORDER BY");
                buf.write_leading(self.flavor().random_function());
            }
            _ => {}
        }

        if !options.group.is_empty() {
            let group: Vec<String> = options.group.iter().map(|g| self.quote_ident(g)).collect();
            buf.write_leading("GROUP BY");
            buf.write_leading(&group.join(", "));
        }

        let (limit, offset) = match finder {
            Finder::First => (Some(1), None),
            _ => (options.limit, options.offset),
        };
        if let Some(limit) = limit {
            buf.write_leading("LIMIT ");
            if let Some(offset) = offset {
                let key = ctx.add_bind("offset", offset);
                buf.write_str(&format!(":{key}:,"));
            }
            let key = ctx.add_bind("limit", limit);
            buf.write_str(&format!(":{key}:"));
        }

        Ok(self.finish(ctx, &buf.into_string()))
    }

    /// 返回 FROM 子句以及（多表时）加引号后的别名。
    ///
    /// 没有表或任一表名为空时报 [`CompileError::NoTable`]。
    fn from_clause(&self, tables: &Tables) -> Result<(String, Vec<String>), CompileError> {
        match tables {
            Tables::Single(t) => {
                let quoted = self.table_ident(t)?;
                Ok((quoted.clone(), vec![quoted]))
            }
            Tables::Multi(pairs) if pairs.is_empty() => Err(CompileError::NoTable),
            Tables::Multi(pairs) => {
                let mut from = Vec::with_capacity(pairs.len());
                let mut aliases = Vec::with_capacity(pairs.len());
                for (alias, table) in pairs {
                    let quoted = self.table_ident(table)?;
                    let alias = alias
                        .as_deref()
                        .filter(|a| !a.trim().is_empty())
                        .unwrap_or(table.as_str());
                    let alias = self.quote_ident(&ucfirst(alias.trim()));
                    from.push(format!("{quoted} AS {alias}"));
                    aliases.push(alias);
                }
                Ok((from.join(", "), aliases))
            }
        }
    }
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
