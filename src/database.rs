//! Database：把编译器和一个执行器组合起来，编译后立即执行。
//!
//! 编译器本身不接触连接；执行器只需接收最终的 SQL 文本。

use crate::compiler::{Compiler, Statement};
use crate::condition::Conditions;
use crate::create_table::{Schema, TableSettings};
use crate::error::CompileError;
use crate::fields::Values;
use crate::select::{Finder, SelectOptions, Tables};
use std::time::Instant;

const SQL_TARGET: &str = "halo_compiler.sql";

/// 执行最终 SQL 的协作者，通常由连接层实现。
pub trait Executor {
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    fn run(&mut self, sql: &str) -> Result<Self::Output, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Execute(E),
}

/// 编译并执行语句的门面。
///
/// 运行语句需要 `&mut self`；多个线程共享同一连接时由调用方自行同步。
#[derive(Debug)]
pub struct Database<X> {
    compiler: Compiler,
    executor: X,
    executed: u64,
}

impl<X: Executor> Database<X> {
    pub fn new(compiler: Compiler, executor: X) -> Self {
        Self {
            compiler,
            executor,
            executed: 0,
        }
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut X {
        &mut self.executor
    }

    pub fn into_executor(self) -> X {
        self.executor
    }

    /// 已成功执行的语句数。
    pub fn executed(&self) -> u64 {
        self.executed
    }

    pub fn select(
        &mut self,
        finder: Finder,
        tables: impl Into<Tables>,
        options: &SelectOptions,
    ) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_select(finder, tables, options)?;
        self.run(&stmt)
    }

    pub fn insert(&mut self, table: &str, values: &Values) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_insert(table, values)?;
        self.run(&stmt)
    }

    pub fn update(
        &mut self,
        table: &str,
        values: &Values,
        conditions: &Conditions,
        limit: Option<u64>,
    ) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_update(table, values, conditions, limit)?;
        self.run(&stmt)
    }

    pub fn delete(
        &mut self,
        table: &str,
        conditions: &Conditions,
        limit: Option<u64>,
    ) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_delete(table, conditions, limit)?;
        self.run(&stmt)
    }

    pub fn create(
        &mut self,
        table: &str,
        schema: &Schema,
        settings: &TableSettings,
    ) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_create(table, schema, settings)?;
        self.run(&stmt)
    }

    pub fn drop(&mut self, table: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_drop(table)?;
        self.run(&stmt)
    }

    pub fn truncate(&mut self, table: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_truncate(table)?;
        self.run(&stmt)
    }

    pub fn describe(&mut self, table: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_describe(table)?;
        self.run(&stmt)
    }

    pub fn optimize(&mut self, table: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_optimize(table)?;
        self.run(&stmt)
    }

    pub fn tables(&mut self) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_show_tables();
        self.run(&stmt)
    }

    /// `SHOW FULL COLUMNS`；结果行可以交给 [`crate::ColumnSchema::from_row`]。
    pub fn columns(&mut self, table: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        let stmt = self.compiler.compile_show_columns(table)?;
        self.run(&stmt)
    }

    /// 原样执行一段 SQL，不做任何替换。
    pub fn execute(&mut self, sql: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        tracing::debug!(target: SQL_TARGET, sql, "executing raw sql");
        self.dispatch(sql)
    }

    fn run(&mut self, stmt: &Statement) -> Result<X::Output, DatabaseError<X::Error>> {
        tracing::debug!(
            target: SQL_TARGET,
            key = %stmt.key(),
            binds = stmt.binds().len(),
            sql = stmt.sql(),
            "executing statement"
        );
        self.dispatch(stmt.sql())
    }

    fn dispatch(&mut self, sql: &str) -> Result<X::Output, DatabaseError<X::Error>> {
        let start = Instant::now();
        match self.executor.run(sql) {
            Ok(out) => {
                self.executed += 1;
                tracing::debug!(target: SQL_TARGET, elapsed = ?start.elapsed(), "statement done");
                Ok(out)
            }
            Err(err) => {
                tracing::warn!(target: SQL_TARGET, error = %err, sql, "statement failed");
                Err(DatabaseError::Execute(err))
            }
        }
    }
}
