//! 字段构建：SELECT 列表、INSERT 列/值列表与 UPDATE 的 `SET` 片段。

use crate::compiler::Compiler;
use crate::context::StatementContext;
use crate::value::SqlValue;

/// SELECT 列表中的一项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEntry {
    /// 列名或 `column AS alias` 形式的表达式。
    Column(String),
    /// 以表别名限定的一组列：`alias.column`。
    Table { alias: String, columns: Vec<String> },
}

/// SELECT 列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<FieldEntry>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.entries.push(FieldEntry::Column(column.into()));
        self
    }

    pub fn table<I, S>(mut self, alias: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(FieldEntry::Table {
            alias: alias.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Fields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|c| FieldEntry::Column(c.into())).collect(),
        }
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Fields {
    fn from(columns: [S; N]) -> Self {
        columns.into_iter().collect()
    }
}

impl<S: Into<String>> From<Vec<S>> for Fields {
    fn from(columns: Vec<S>) -> Self {
        columns.into_iter().collect()
    }
}

/// 有序的 `column → value` 列表，用于 INSERT 与 UPDATE。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    pairs: Vec<(String, SqlValue)>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.pairs.push((column.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.pairs.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl<C: Into<String>, V: Into<SqlValue>> FromIterator<(C, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
        }
    }
}

impl Compiler {
    /// 构建 SELECT 列表，返回的片段同时记录在上下文中。
    pub fn build_select_fields(&self, ctx: &mut StatementContext, fields: &Fields) -> Vec<String> {
        let mut out = Vec::new();
        for entry in fields.entries() {
            match entry {
                FieldEntry::Column(column) => out.push(self.select_field(column)),
                FieldEntry::Table { alias, columns } => {
                    for column in columns {
                        out.push(self.select_field(&format!("{alias}.{column}")));
                    }
                }
            }
        }
        ctx.fields.extend(out.iter().cloned());
        out
    }

    /// `expr AS alias`（大小写不敏感）在第一次出现处拆开，两边分别加引号。
    fn select_field(&self, column: &str) -> String {
        match column.to_ascii_uppercase().find(" AS ") {
            Some(at) => {
                let (expr, alias) = (&column[..at], &column[at + 4..]);
                format!(
                    "{} AS {}",
                    self.quote_ident(expr.trim()),
                    self.quote_ident(alias.trim())
                )
            }
            None => self.quote_ident(column),
        }
    }

    /// 构建 INSERT 的列列表与值列表，每个值登记一个绑定。
    pub fn build_insert_fields(
        &self,
        ctx: &mut StatementContext,
        values: &Values,
    ) -> (Vec<String>, Vec<String>) {
        let mut columns = Vec::with_capacity(values.len());
        let mut formatted = Vec::with_capacity(values.len());
        for (column, value) in values.iter() {
            let bind = ctx.add_bind(column, value.clone());
            columns.push(self.quote_ident(column));
            formatted.push(self.format_value(value, &bind, ""));
        }
        ctx.fields.extend(columns.iter().cloned());
        ctx.values.extend(formatted.iter().cloned());
        (columns, formatted)
    }

    /// 构建 UPDATE 的 `column = value` 片段，每个值登记一个绑定。
    pub fn build_update_fields(&self, ctx: &mut StatementContext, values: &Values) -> Vec<String> {
        let mut out = Vec::with_capacity(values.len());
        for (column, value) in values.iter() {
            let bind = ctx.add_bind(column, value.clone());
            out.push(format!(
                "{} = {}",
                self.quote_ident(column),
                self.format_value(value, &bind, "")
            ));
        }
        ctx.fields.extend(out.iter().cloned());
        out
    }
}
