//! 建表语句：把列的抽象描述编译成 MySQL 的列定义、索引与表选项。

use crate::compiler::{Compiler, Statement};
use crate::error::{CompileError, SchemaError};
use std::str::FromStr;

/// 列类型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    /// `VARCHAR(n)`，长度超过 255 时为 `TEXT`。
    Text,
    Enum(Vec<String>),
    DateTime,
    Timestamp,
    Date,
    Time,
    Float,
    Blob,
    Year,
}

impl ColumnType {
    fn default_length(&self) -> u32 {
        match self {
            Self::Text => 255,
            _ => 10,
        }
    }
}

impl FromStr for ColumnType {
    type Err = SchemaError;

    /// 解析 schema 中的类型标签；`enum` 解析后选项为空，需要另行填充。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Self::Integer,
            "string" | "text" | "char" | "varchar" => Self::Text,
            "enum" => Self::Enum(Vec::new()),
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "date" => Self::Date,
            "time" => Self::Time,
            "float" => Self::Float,
            "blob" => Self::Blob,
            "year" => Self::Year,
            _ => return Err(SchemaError::UnknownType(s.to_string())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Primary,
    Unique,
    Index,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    pub nullable: bool,
    pub unsigned: bool,
    /// 只在 `unsigned` 同时开启时输出。
    pub zerofill: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub auto_increment: bool,
}

/// 单列的定义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub column_type: ColumnType,
    /// 为空时文本类型取 255，其余取 10。
    pub length: Option<u32>,
    pub options: ColumnOptions,
    pub key: Option<KeyRole>,
}

impl ColumnSchema {
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            length: None,
            options: ColumnOptions::default(),
            key: None,
        }
    }

    pub fn integer() -> Self {
        Self::new(ColumnType::Integer)
    }

    pub fn text() -> Self {
        Self::new(ColumnType::Text)
    }

    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ColumnType::Enum(options.into_iter().map(Into::into).collect()))
    }

    pub fn datetime() -> Self {
        Self::new(ColumnType::DateTime)
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.options.nullable = true;
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.options.unsigned = true;
        self
    }

    pub fn zerofill(mut self) -> Self {
        self.options.zerofill = true;
        self
    }

    pub fn default_value(mut self, value: impl ToString) -> Self {
        self.options.default = Some(value.to_string());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.options.comment = Some(comment.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.options.auto_increment = true;
        self
    }

    pub fn key(mut self, role: KeyRole) -> Self {
        self.key = Some(role);
        self
    }

    pub fn primary(self) -> Self {
        self.key(KeyRole::Primary)
    }

    pub fn unique(self) -> Self {
        self.key(KeyRole::Unique)
    }

    pub fn index(self) -> Self {
        self.key(KeyRole::Index)
    }

    /// 从 `SHOW FULL COLUMNS` 的一行还原列定义。
    pub fn from_row(row: &ColumnRow) -> Result<(String, ColumnSchema), SchemaError> {
        let raw = row.column_type.trim();
        let (base, params, rest) = match raw.find('(') {
            Some(open) => {
                let close = raw[open..]
                    .find(')')
                    .map(|i| open + i)
                    .ok_or_else(|| SchemaError::MalformedType(raw.to_string()))?;
                (&raw[..open], Some(&raw[open + 1..close]), &raw[close + 1..])
            }
            None => raw.split_once(' ').map_or((raw, None, ""), |(b, r)| (b, None, r)),
        };
        let rest = rest.to_ascii_lowercase();

        let mut length = params.and_then(|p| p.trim().parse::<u32>().ok());
        let column_type = match base.to_ascii_lowercase().as_str() {
            "tinyint" | "smallint" | "mediumint" | "bigint" => ColumnType::Integer,
            "text" | "tinytext" | "mediumtext" | "longtext" => {
                length = length.or(Some(65_535));
                ColumnType::Text
            }
            "decimal" | "numeric" | "double" | "real" => {
                length = None;
                ColumnType::Float
            }
            "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
                length = None;
                ColumnType::Blob
            }
            "enum" => {
                let options = params
                    .unwrap_or_default()
                    .split(',')
                    .map(|o| o.trim().trim_matches('\'').to_string())
                    .filter(|o| !o.is_empty())
                    .collect();
                length = None;
                ColumnType::Enum(options)
            }
            other => other.parse()?,
        };

        let key = match row.key.as_str() {
            "PRI" => Some(KeyRole::Primary),
            "UNI" => Some(KeyRole::Unique),
            "MUL" => Some(KeyRole::Index),
            _ => None,
        };

        let schema = ColumnSchema {
            column_type,
            length,
            options: ColumnOptions {
                nullable: row.null.eq_ignore_ascii_case("yes"),
                unsigned: rest.contains("unsigned"),
                zerofill: rest.contains("zerofill"),
                default: row.default.clone(),
                comment: Some(row.comment.clone()).filter(|c| !c.is_empty()),
                auto_increment: row.extra.contains("auto_increment"),
            },
            key,
        };
        Ok((row.field.clone(), schema))
    }
}

/// `SHOW FULL COLUMNS FROM t` 返回的一行中用到的字段。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    pub field: String,
    pub column_type: String,
    pub null: String,
    pub key: String,
    pub default: Option<String>,
    pub extra: String,
    pub comment: String,
}

/// 有序的 `column → ColumnSchema` 列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<(String, ColumnSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, name: impl Into<String>, column: ColumnSchema) -> Self {
        self.columns.push((name.into(), column));
        self
    }

    pub fn columns(&self) -> &[(String, ColumnSchema)] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, ColumnSchema)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, ColumnSchema)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// 表级选项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    pub engine: String,
    pub charset: String,
    pub collate: String,
    pub comment: String,
    pub auto_increment: u64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            engine: "InnoDB".to_string(),
            charset: "utf8".to_string(),
            collate: "utf8_general_ci".to_string(),
            comment: String::new(),
            auto_increment: 1,
        }
    }
}

impl TableSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.collate = collate.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn auto_increment(mut self, start: u64) -> Self {
        self.auto_increment = start;
        self
    }
}

#[derive(Debug, Default)]
struct Keys {
    primary: Option<String>,
    unique: Vec<String>,
    index: Vec<String>,
}

impl Keys {
    fn add(&mut self, column: &str, role: KeyRole) -> Result<(), SchemaError> {
        match role {
            KeyRole::Primary => {
                if let Some(first) = &self.primary {
                    return Err(SchemaError::DuplicatePrimaryKey {
                        first: first.clone(),
                        second: column.to_string(),
                    });
                }
                self.primary = Some(column.to_string());
            }
            KeyRole::Unique => self.unique.push(column.to_string()),
            KeyRole::Index => self.index.push(column.to_string()),
        }
        Ok(())
    }
}

impl Compiler {
    /// `CREATE TABLE IF NOT EXISTS`；schema 为空时报错，不产出任何 SQL。
    pub fn compile_create(
        &self,
        table: &str,
        schema: &Schema,
        settings: &TableSettings,
    ) -> Result<Statement, CompileError> {
        let table = self.table_ident(table)?;
        if schema.is_empty() {
            return Err(SchemaError::Empty.into());
        }

        let mut lines = Vec::with_capacity(schema.columns().len() + 1);
        let mut keys = Keys::default();
        for (name, column) in schema.columns() {
            lines.push(format!("\t{}", self.column_definition(name, column)?));
            if let Some(role) = column.key {
                keys.add(name, role)?;
            }
        }

        if let Some(primary) = &keys.primary {
            lines.push(format!("\tPRIMARY KEY ({})", self.quote_ident(primary)));
        }
        for column in &keys.unique {
            let quoted = self.quote_ident(column);
            lines.push(format!("\tUNIQUE KEY {quoted} ({quoted})"));
        }
        for column in &keys.index {
            let quoted = self.quote_ident(column);
            lines.push(format!("\tKEY {quoted} ({quoted})"));
        }

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n) ENGINE={} DEFAULT CHARSET={} COLLATE={} COMMENT='{}' AUTO_INCREMENT={};",
            table,
            lines.join(",\n"),
            settings.engine,
            settings.charset,
            settings.collate,
            self.escape(&settings.comment),
            settings.auto_increment,
        );

        let ctx = self.open_context();
        Ok(self.finish(ctx, &sql))
    }

    /// 单列定义（不含前导缩进与结尾逗号）。
    pub fn column_definition(&self, name: &str, column: &ColumnSchema) -> Result<String, SchemaError> {
        let opts = &column.options;
        let length = column
            .length
            .filter(|&l| l > 0)
            .unwrap_or_else(|| column.column_type.default_length());

        let mut def = self.quote_ident(name);
        match &column.column_type {
            ColumnType::Integer => {
                def.push_str(match length {
                    0..=3 => " TINYINT(3)",
                    4..=5 => " SMALLINT(5)",
                    6..=7 => " MEDIUMINT(7)",
                    8..=10 => " INT(10)",
                    _ => " BIGINT(25)",
                });
                if opts.unsigned {
                    def.push_str(" UNSIGNED");
                    if opts.zerofill {
                        def.push_str(" ZEROFILL");
                    }
                }
                if opts.auto_increment {
                    def.push_str(" AUTO_INCREMENT");
                }
            }
            ColumnType::Text if length <= 255 => def.push_str(&format!(" VARCHAR({length})")),
            ColumnType::Text => def.push_str(" TEXT"),
            ColumnType::Enum(options) => {
                if options.is_empty() {
                    return Err(SchemaError::EmptyEnum(name.to_string()));
                }
                let quoted: Vec<String> = options
                    .iter()
                    .map(|o| format!("'{}'", self.escape(o)))
                    .collect();
                def.push_str(&format!(" ENUM({})", quoted.join(", ")));
            }
            ColumnType::DateTime => def.push_str(" DATETIME"),
            ColumnType::Timestamp => def.push_str(" TIMESTAMP"),
            ColumnType::Date => def.push_str(" DATE"),
            ColumnType::Time => def.push_str(" TIME"),
            ColumnType::Float => def.push_str(" FLOAT"),
            ColumnType::Blob => def.push_str(" BLOB"),
            ColumnType::Year => def.push_str(" YEAR(4)"),
        }

        if opts.nullable && !opts.auto_increment {
            def.push_str(" NULL");
        } else {
            def.push_str(" NOT NULL");
        }

        let default = opts.default.as_deref().filter(|d| !d.is_empty());
        match &column.column_type {
            ColumnType::Enum(options) => {
                let chosen = default
                    .filter(|d| options.iter().any(|o| o == d))
                    .unwrap_or(options[0].as_str());
                def.push_str(&format!(" DEFAULT '{}'", self.escape(chosen)));
            }
            _ => {
                if let Some(d) = default
                    && !opts.auto_increment
                {
                    def.push_str(&format!(" DEFAULT '{}'", self.escape(d)));
                }
            }
        }

        if let Some(comment) = opts.comment.as_deref().filter(|c| !c.is_empty()) {
            def.push_str(&format!(" COMMENT '{}'", self.escape(comment)));
        }

        Ok(def)
    }
}
