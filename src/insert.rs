//! INSERT 语句。

use crate::compiler::{Compiler, Statement};
use crate::error::CompileError;
use crate::fields::Values;

impl Compiler {
    /// `INSERT INTO t (cols) VALUES (vals)`。
    pub fn compile_insert(&self, table: &str, values: &Values) -> Result<Statement, CompileError> {
        let table = self.table_ident(table)?;
        if values.is_empty() {
            return Err(CompileError::NoColumns("INSERT"));
        }

        let mut ctx = self.open_context();
        let (columns, formatted) = self.build_insert_fields(&mut ctx, values);
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            formatted.join(", ")
        );
        Ok(self.finish(ctx, &sql))
    }
}
