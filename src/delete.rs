//! DELETE 语句。

use crate::compiler::{Compiler, Statement};
use crate::condition::Conditions;
use crate::error::CompileError;
use crate::string_builder::StringBuilder;

impl Compiler {
    /// `DELETE FROM t WHERE ... [LIMIT n]`。条件不能为空。
    pub fn compile_delete(
        &self,
        table: &str,
        conditions: &Conditions,
        limit: Option<u64>,
    ) -> Result<Statement, CompileError> {
        let table = self.table_ident(table)?;
        let mut ctx = self.open_context();
        let where_sql = self.build_conditions(&mut ctx, conditions)?;
        if where_sql.is_empty() {
            return Err(CompileError::NoConditions("DELETE"));
        }

        let mut buf = StringBuilder::new();
        buf.write_leading("DELETE FROM");
        buf.write_leading(&table);
        buf.write_leading("WHERE");
        buf.write_leading(&where_sql);
        self.write_limit(&mut ctx, &mut buf, limit);

        Ok(self.finish(ctx, &buf.into_string()))
    }
}
