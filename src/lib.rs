//! halo-compiler：把结构化的查询描述编译成可直接执行的 SQL 文本。
//!
//! 编译分三步：标识符加引号、值格式化为占位符、最后整串替换成转义后的值。

pub mod bind;
#[cfg(test)]
mod bind_tests;
pub mod compiler;
pub mod condition;
pub mod context;
pub mod create_table;
#[cfg(test)]
mod create_table_tests;
pub mod database;
pub mod delete;
pub mod error;
pub mod escaper;
pub mod fields;
pub mod flavor;
pub mod format;
pub mod ident;
pub mod insert;
pub mod select;
#[cfg(test)]
mod select_tests;
mod string_builder;
pub mod update;
pub mod value;

pub use crate::bind::{BindEntry, BindTable};
pub use crate::compiler::{Compiler, CompilerConfig, Statement};
pub use crate::condition::{Clause, ConditionNode, Conditions, Join, Operator};
pub use crate::context::{ContextKey, StatementContext};
pub use crate::create_table::{
    ColumnOptions, ColumnRow, ColumnSchema, ColumnType, KeyRole, Schema, TableSettings,
};
pub use crate::database::{Database, DatabaseError, Executor};
pub use crate::error::{CompileError, SchemaError};
pub use crate::escaper::{Escaper, NoEscape};
pub use crate::fields::{FieldEntry, Fields, Values};
pub use crate::flavor::{Flavor, UnknownFlavor};
pub use crate::format::{is_function_call, is_qualified_ident};
pub use crate::ident::backtick;
pub use crate::select::{Direction, Finder, Order, SelectOptions, Tables};
pub use crate::value::SqlValue;
