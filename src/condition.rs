//! 条件树：把 `"age >="`、`"id"` 这类复合 key 与值编译成 WHERE 表达式。
//!
//! 叶子节点的 key 由列名和可选的比较运算符组成，运算符无法识别时按 `=` 处理。
//! `AND`/`OR` 分组的子节点保持有序，同一列可以出现多次。

use crate::compiler::Compiler;
use crate::context::StatementContext;
use crate::error::CompileError;
use crate::format::is_qualified_ident;
use crate::value::SqlValue;
use std::fmt;

/// 比较运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Ge,
    Le,
    Lt,
    LtGt,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
    In,
    NotIn,
}

impl Operator {
    /// 长的在前，保证 `NOT LIKE` 先于 `LIKE`、`>=` 先于 `=` 被匹配。
    const BY_LENGTH: [Operator; 13] = [
        Operator::IsNotNull,
        Operator::NotLike,
        Operator::IsNull,
        Operator::NotIn,
        Operator::Like,
        Operator::NotEq,
        Operator::Ge,
        Operator::Le,
        Operator::LtGt,
        Operator::In,
        Operator::Eq,
        Operator::Gt,
        Operator::Lt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Lt => "<",
            Self::LtGt => "<>",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    /// 从 `"column op"` 中拆出列名与运算符。
    ///
    /// 运算符需与列名以空白分隔，大小写不敏感；找不到时返回 `(key, Eq)`。
    pub fn split_key(key: &str) -> (&str, Operator) {
        let key = key.trim();
        for op in Self::BY_LENGTH {
            let token = op.as_str();
            if key.len() <= token.len() {
                continue;
            }
            let at = key.len() - token.len();
            let Some(tail) = key.get(at..) else {
                continue;
            };
            if !tail.eq_ignore_ascii_case(token) {
                continue;
            }
            let head = &key[..at];
            if head.ends_with(char::is_whitespace) {
                let column = head.trim_end();
                if !column.is_empty() {
                    return (column, op);
                }
            }
        }
        (key, Operator::Eq)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分组的连接运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Join {
    #[default]
    And,
    Or,
}

impl Join {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// 叶子节点的值：单个值或值列表。
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Value(SqlValue),
    List(Vec<SqlValue>),
}

impl From<SqlValue> for Clause {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for Clause {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for Clause {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

macro_rules! clause_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Clause {
                fn from(v: $t) -> Self {
                    Self::Value(v.into())
                }
            }
        )*
    };
}

clause_from_scalar!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    time::PrimitiveDateTime,
    time::OffsetDateTime,
);

/// 条件树节点。
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    Leaf { key: String, clause: Clause },
    Group { join: Join, children: Conditions },
}

/// 有序的条件列表，顶层以 `AND` 连接。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    nodes: Vec<ConditionNode>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个叶子条件；`key` 可以是 `"column"` 或 `"column op"`。
    pub fn add(mut self, key: impl Into<String>, clause: impl Into<Clause>) -> Self {
        self.nodes.push(ConditionNode::Leaf {
            key: key.into(),
            clause: clause.into(),
        });
        self
    }

    pub fn and(self, group: Conditions) -> Self {
        self.group(Join::And, group)
    }

    pub fn or(self, group: Conditions) -> Self {
        self.group(Join::Or, group)
    }

    pub fn group(mut self, join: Join, children: Conditions) -> Self {
        self.nodes.push(ConditionNode::Group { join, children });
        self
    }

    pub fn push(&mut self, node: ConditionNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(&self) -> &[ConditionNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Compiler {
    /// 编译条件树，返回以 `AND` 连接的表达式，并把顶层片段记录到上下文中。
    pub fn build_conditions(
        &self,
        ctx: &mut StatementContext,
        conditions: &Conditions,
    ) -> Result<String, CompileError> {
        let parts = self.build_condition_parts(ctx, conditions)?;
        let sql = parts.join(Join::And.separator());
        ctx.conditions = parts;
        Ok(sql)
    }

    fn build_condition_parts(
        &self,
        ctx: &mut StatementContext,
        conditions: &Conditions,
    ) -> Result<Vec<String>, CompileError> {
        let mut parts = Vec::with_capacity(conditions.len());
        for node in conditions.nodes() {
            match node {
                ConditionNode::Leaf { key, clause } => {
                    parts.push(self.build_condition_leaf(ctx, key, clause)?);
                }
                ConditionNode::Group { join, children } => {
                    let inner = self.build_condition_parts(ctx, children)?;
                    if !inner.is_empty() {
                        parts.push(format!("({})", inner.join(join.separator())));
                    }
                }
            }
        }
        Ok(parts)
    }

    fn build_condition_leaf(
        &self,
        ctx: &mut StatementContext,
        key: &str,
        clause: &Clause,
    ) -> Result<String, CompileError> {
        let (column, mut op) = Operator::split_key(key);
        if column == Join::And.as_str() || column == Join::Or.as_str() {
            return Err(CompileError::JoinKeyAsColumn(column.to_string()));
        }
        let quoted = self.quote_ident(column);

        let value = match clause {
            Clause::Value(SqlValue::String(s)) if is_qualified_ident(s) => self.quote_ident(s),
            Clause::List(values) => {
                if values.is_empty() {
                    // 否定运算符对空集恒为真
                    return Ok(match op {
                        Operator::NotIn
                        | Operator::NotEq
                        | Operator::LtGt
                        | Operator::NotLike => "0 = 0",
                        _ => "0 = 1",
                    }
                    .to_string());
                }
                let mut formatted = Vec::with_capacity(values.len());
                for (i, v) in values.iter().enumerate() {
                    let bind = ctx.add_bind(&format!("where_{i}{column}"), v.clone());
                    formatted.push(self.format_value(v, &bind, ""));
                }
                if op == Operator::Eq {
                    op = Operator::In;
                }
                format!("({})", formatted.join(", "))
            }
            Clause::Value(_) if matches!(op, Operator::IsNull | Operator::IsNotNull) => {
                return Ok(format!("{quoted} {op}"));
            }
            Clause::Value(v) => {
                let bind = ctx.add_bind(&format!("where_{column}"), v.clone());
                self.format_value(v, &bind, "")
            }
        };

        Ok(format!("{quoted} {op} {value}"))
    }
}
