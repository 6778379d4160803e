//! UPDATE 语句。

use crate::compiler::{Compiler, Statement};
use crate::condition::Conditions;
use crate::context::StatementContext;
use crate::error::CompileError;
use crate::fields::Values;
use crate::string_builder::StringBuilder;

impl Compiler {
    /// `UPDATE t SET ... WHERE ... [LIMIT n]`。
    ///
    /// 条件编译后不能为空；需要清空整表时请使用 [`Compiler::compile_truncate`]。
    pub fn compile_update(
        &self,
        table: &str,
        values: &Values,
        conditions: &Conditions,
        limit: Option<u64>,
    ) -> Result<Statement, CompileError> {
        let table = self.table_ident(table)?;
        if values.is_empty() {
            return Err(CompileError::NoColumns("UPDATE"));
        }

        let mut ctx = self.open_context();
        let sets = self.build_update_fields(&mut ctx, values);
        // 只含空分组的条件同样视为没有条件
        let where_sql = self.build_conditions(&mut ctx, conditions)?;
        if where_sql.is_empty() {
            return Err(CompileError::NoConditions("UPDATE"));
        }

        let mut buf = StringBuilder::new();
        buf.write_leading("UPDATE");
        buf.write_leading(&table);
        buf.write_leading("SET");
        buf.write_leading(&sets.join(", "));
        buf.write_leading("WHERE");
        buf.write_leading(&where_sql);
        self.write_limit(&mut ctx, &mut buf, limit);

        Ok(self.finish(ctx, &buf.into_string()))
    }

    pub(crate) fn write_limit(
        &self,
        ctx: &mut StatementContext,
        buf: &mut StringBuilder,
        limit: Option<u64>,
    ) {
        if let Some(limit) = limit {
            let key = ctx.add_bind("limit", limit);
            buf.write_leading("LIMIT");
            buf.write_leading(&format!(":{key}:"));
        }
    }
}
