//! Compiler：语句编译器句柄，持有方言配置与转义器。
//!
//! 各类语句的编译分布在 `select`/`insert`/`update`/`delete`/`create_table` 模块中。

use crate::bind::BindTable;
use crate::context::{ContextKey, KeySequence, StatementContext};
use crate::error::CompileError;
use crate::escaper::Escaper;
use crate::flavor::Flavor;
use std::fmt;

/// 编译器配置，由调用方构造并持有。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerConfig {
    /// 标识符引号、默认转义规则与方言函数。
    pub flavor: Flavor,
    /// 替换占位符时是否先转义值。
    pub clean_binds: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            flavor: Flavor::MySQL,
            clean_binds: true,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn clean_binds(mut self, clean: bool) -> Self {
        self.clean_binds = clean;
        self
    }
}

/// 编译完成的语句：最终 SQL 文本，以及用于替换的绑定表。
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    key: ContextKey,
    sql: String,
    binds: BindTable,
}

impl Statement {
    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &BindTable {
        &self.binds
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// SQL 语句编译器。
///
/// 每次编译都会打开一个新的 [`StatementContext`]，因此共享的 `&Compiler`
/// 可以在多个线程中同时使用。
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    escaper: Box<dyn Escaper>,
    keys: KeySequence,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    /// 使用 `config.flavor` 自带的转义规则。
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            escaper: Box::new(config.flavor),
            keys: KeySequence::default(),
        }
    }

    /// 替换为连接层提供的转义器。
    pub fn with_escaper(mut self, escaper: impl Escaper + 'static) -> Self {
        self.escaper = Box::new(escaper);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn flavor(&self) -> Flavor {
        self.config.flavor
    }

    pub fn escaper(&self) -> &dyn Escaper {
        self.escaper.as_ref()
    }

    pub fn escape(&self, raw: &str) -> String {
        self.escaper.escape(raw)
    }

    pub fn quote_ident(&self, ident: &str) -> String {
        self.config.flavor.quote_ident(ident)
    }

    /// 打开一个新的语句上下文。
    pub fn open_context(&self) -> StatementContext {
        StatementContext::new(self.keys.next())
    }

    /// 对整条语句执行一次占位符替换，并结束上下文。
    pub fn finish(&self, ctx: StatementContext, sql: &str) -> Statement {
        let escaper = self.config.clean_binds.then_some(self.escaper.as_ref());
        let key = ctx.key();
        let binds = ctx.into_binds();
        let sql = binds.substitute(sql, escaper);
        Statement { key, sql, binds }
    }

    /// 加引号后的表名；空白表名报 [`CompileError::NoTable`]。
    pub fn table_ident(&self, table: &str) -> Result<String, CompileError> {
        if table.trim().is_empty() {
            return Err(CompileError::NoTable);
        }
        Ok(self.quote_ident(table))
    }

    fn simple(&self, sql: String) -> Statement {
        let ctx = self.open_context();
        self.finish(ctx, &sql)
    }

    pub fn compile_drop(&self, table: &str) -> Result<Statement, CompileError> {
        Ok(self.simple(format!("DROP TABLE {}", self.table_ident(table)?)))
    }

    pub fn compile_truncate(&self, table: &str) -> Result<Statement, CompileError> {
        Ok(self.simple(format!("TRUNCATE TABLE {}", self.table_ident(table)?)))
    }

    pub fn compile_describe(&self, table: &str) -> Result<Statement, CompileError> {
        Ok(self.simple(format!("DESCRIBE {}", self.table_ident(table)?)))
    }

    pub fn compile_optimize(&self, table: &str) -> Result<Statement, CompileError> {
        Ok(self.simple(format!("OPTIMIZE TABLE {}", self.table_ident(table)?)))
    }

    pub fn compile_show_tables(&self) -> Statement {
        self.simple("SHOW TABLES".to_string())
    }

    pub fn compile_show_columns(&self, table: &str) -> Result<Statement, CompileError> {
        Ok(self.simple(format!(
            "SHOW FULL COLUMNS FROM {}",
            self.table_ident(table)?
        )))
    }
}
