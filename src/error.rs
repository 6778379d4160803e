//! 编译错误。

/// 建表 schema 无效；出错时不会产出任何 SQL。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema is required to create tables")]
    Empty,
    #[error("enum column `{0}` has no options")]
    EmptyEnum(String),
    #[error("column `{second}` is marked primary but `{first}` already is")]
    DuplicatePrimaryKey { first: String, second: String },
    #[error("unknown column type `{0}`")]
    UnknownType(String),
    #[error("cannot parse column type `{0}`")]
    MalformedType(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("condition key `{0}` is a join operator, not a column")]
    JoinKeyAsColumn(String),
    #[error("{0} requires at least one column")]
    NoColumns(&'static str),
    #[error("{0} requires at least one condition")]
    NoConditions(&'static str),
    #[error("table name is required")]
    NoTable,
}
