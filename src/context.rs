//! StatementContext：单条语句编译期间的临时数据。

use crate::bind::BindTable;
use crate::value::SqlValue;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 语句上下文的唯一标识，由单调递增的计数器分配，不会复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(u64);

impl ContextKey {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stmt-{}", self.0)
    }
}

/// ContextKey 分配器；clone 后共享同一个计数器。
#[derive(Debug, Clone, Default)]
pub(crate) struct KeySequence {
    next: Arc<AtomicU64>,
}

impl KeySequence {
    pub(crate) fn next(&self) -> ContextKey {
        ContextKey(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// 一条语句的绑定表与已编译片段。
///
/// 每个公开的编译操作开始时创建，由该调用独占，编译完成后即被丢弃。
#[derive(Debug, Clone)]
pub struct StatementContext {
    key: ContextKey,
    started_at: Instant,
    pub(crate) binds: BindTable,
    pub(crate) fields: Vec<String>,
    pub(crate) values: Vec<String>,
    pub(crate) conditions: Vec<String>,
}

impl StatementContext {
    pub(crate) fn new(key: ContextKey) -> Self {
        Self {
            key,
            started_at: Instant::now(),
            binds: BindTable::new(),
            fields: Vec::new(),
            values: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 见 [`BindTable::add`]。
    pub fn add_bind(&mut self, key: &str, value: impl Into<SqlValue>) -> String {
        self.binds.add(key, value)
    }

    pub fn binds(&self) -> &BindTable {
        &self.binds
    }

    /// 字段构建器产出的片段（SELECT 列、INSERT 列或 UPDATE 的 `col = v`）。
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// INSERT 的值片段。
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// 顶层条件片段。
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub(crate) fn into_binds(self) -> BindTable {
        self.binds
    }
}
