#[cfg(test)]
mod tests {
    use crate::{
        ColumnRow, ColumnSchema, ColumnType, CompileError, Compiler, KeyRole, Schema, SchemaError,
        TableSettings,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn create_users_table() {
        let c = Compiler::default();
        let schema = Schema::new()
            .column(
                "id",
                ColumnSchema::integer()
                    .length(10)
                    .unsigned()
                    .auto_increment()
                    .primary(),
            )
            .column("name", ColumnSchema::text().length(30))
            .column("gender", ColumnSchema::enumeration(["male", "female"]))
            .column("email", ColumnSchema::text().length(100).unique())
            .column(
                "created",
                ColumnSchema::datetime().nullable().comment("creation time"),
            );

        let stmt = c
            .compile_create("users", &schema, &TableSettings::default())
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "CREATE TABLE IF NOT EXISTS `users` (\n\
             \t`id` INT(10) UNSIGNED AUTO_INCREMENT NOT NULL,\n\
             \t`name` VARCHAR(30) NOT NULL,\n\
             \t`gender` ENUM('male', 'female') NOT NULL DEFAULT 'male',\n\
             \t`email` VARCHAR(100) NOT NULL,\n\
             \t`created` DATETIME NULL COMMENT 'creation time',\n\
             \tPRIMARY KEY (`id`),\n\
             \tUNIQUE KEY `email` (`email`)\n\
             ) ENGINE=InnoDB DEFAULT CHARSET=utf8 COLLATE=utf8_general_ci COMMENT='' AUTO_INCREMENT=1;"
        );
    }

    #[test]
    fn table_settings_and_index_keys() {
        let c = Compiler::default();
        let schema = Schema::new()
            .column("a", ColumnSchema::integer().unique())
            .column("b", ColumnSchema::integer().unique())
            .column("c", ColumnSchema::integer().index());
        let settings = TableSettings::new()
            .engine("MyISAM")
            .charset("utf8mb4")
            .collate("utf8mb4_unicode_ci")
            .comment("user's table")
            .auto_increment(100);

        let sql = c.compile_create("t", &schema, &settings).unwrap().into_sql();
        assert!(sql.contains(
            "\tUNIQUE KEY `a` (`a`),\n\tUNIQUE KEY `b` (`b`),\n\tKEY `c` (`c`)\n)"
        ));
        assert!(sql.ends_with(
            ") ENGINE=MyISAM DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci COMMENT='user\\'s table' AUTO_INCREMENT=100;"
        ));
    }

    #[test]
    fn integer_length_buckets() {
        let c = Compiler::default();
        let cases = [
            (Some(1), "`n` TINYINT(3) NOT NULL"),
            (Some(3), "`n` TINYINT(3) NOT NULL"),
            (Some(5), "`n` SMALLINT(5) NOT NULL"),
            (Some(7), "`n` MEDIUMINT(7) NOT NULL"),
            (None, "`n` INT(10) NOT NULL"),
            (Some(11), "`n` BIGINT(25) NOT NULL"),
        ];
        for (length, expected) in cases {
            let mut column = ColumnSchema::integer();
            column.length = length;
            assert_eq!(c.column_definition("n", &column).unwrap(), expected);
        }
    }

    #[test]
    fn zerofill_needs_unsigned() {
        let c = Compiler::default();
        assert_eq!(
            c.column_definition("n", &ColumnSchema::integer().zerofill())
                .unwrap(),
            "`n` INT(10) NOT NULL"
        );
        assert_eq!(
            c.column_definition("n", &ColumnSchema::integer().unsigned().zerofill())
                .unwrap(),
            "`n` INT(10) UNSIGNED ZEROFILL NOT NULL"
        );
    }

    #[test]
    fn text_lengths_and_defaults() {
        let c = Compiler::default();
        assert_eq!(
            c.column_definition("s", &ColumnSchema::text()).unwrap(),
            "`s` VARCHAR(255) NOT NULL"
        );
        assert_eq!(
            c.column_definition("s", &ColumnSchema::text().length(1000))
                .unwrap(),
            "`s` TEXT NOT NULL"
        );
        assert_eq!(
            c.column_definition("s", &ColumnSchema::text().default_value("it's"))
                .unwrap(),
            "`s` VARCHAR(255) NOT NULL DEFAULT 'it\\'s'"
        );
    }

    #[test]
    fn auto_increment_drops_default_and_null() {
        let c = Compiler::default();
        let column = ColumnSchema::integer()
            .auto_increment()
            .nullable()
            .default_value(5);
        assert_eq!(
            c.column_definition("id", &column).unwrap(),
            "`id` INT(10) AUTO_INCREMENT NOT NULL"
        );
    }

    #[test]
    fn enum_default_must_be_an_option() {
        let c = Compiler::default();
        assert_eq!(
            c.column_definition("e", &ColumnSchema::enumeration(["a", "b"]).default_value("b"))
                .unwrap(),
            "`e` ENUM('a', 'b') NOT NULL DEFAULT 'b'"
        );
        assert_eq!(
            c.column_definition("e", &ColumnSchema::enumeration(["a", "b"]).default_value("z"))
                .unwrap(),
            "`e` ENUM('a', 'b') NOT NULL DEFAULT 'a'"
        );
    }

    #[test]
    fn keyword_types() {
        let c = Compiler::default();
        let cases = [
            (ColumnType::Timestamp, "`x` TIMESTAMP NOT NULL"),
            (ColumnType::Date, "`x` DATE NOT NULL"),
            (ColumnType::Time, "`x` TIME NOT NULL"),
            (ColumnType::Float, "`x` FLOAT NOT NULL"),
            (ColumnType::Blob, "`x` BLOB NOT NULL"),
            (ColumnType::Year, "`x` YEAR(4) NOT NULL"),
        ];
        for (ty, expected) in cases {
            assert_eq!(
                c.column_definition("x", &ColumnSchema::new(ty)).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn schema_errors() {
        let c = Compiler::default();
        let settings = TableSettings::default();

        assert_eq!(
            c.compile_create("t", &Schema::new(), &settings),
            Err(CompileError::Schema(SchemaError::Empty))
        );

        let empty_enum = Schema::new().column("g", ColumnSchema::enumeration(Vec::<String>::new()));
        assert_eq!(
            c.compile_create("t", &empty_enum, &settings),
            Err(CompileError::Schema(SchemaError::EmptyEnum("g".to_string())))
        );

        let two_primaries = Schema::new()
            .column("a", ColumnSchema::integer().primary())
            .column("b", ColumnSchema::integer().primary());
        assert_eq!(
            c.compile_create("t", &two_primaries, &settings),
            Err(CompileError::Schema(SchemaError::DuplicatePrimaryKey {
                first: "a".to_string(),
                second: "b".to_string(),
            }))
        );
    }

    #[test]
    fn column_type_tags() {
        assert_eq!("string".parse::<ColumnType>(), Ok(ColumnType::Text));
        assert_eq!("INT".parse::<ColumnType>(), Ok(ColumnType::Integer));
        assert_eq!("enum".parse::<ColumnType>(), Ok(ColumnType::Enum(Vec::new())));
        assert_eq!(
            "money".parse::<ColumnType>(),
            Err(SchemaError::UnknownType("money".to_string()))
        );
    }

    fn row(field: &str, column_type: &str) -> ColumnRow {
        ColumnRow {
            field: field.to_string(),
            column_type: column_type.to_string(),
            null: "NO".to_string(),
            ..ColumnRow::default()
        }
    }

    #[test]
    fn column_from_integer_row() {
        let c = Compiler::default();
        let mut r = row("id", "int(10) unsigned zerofill");
        r.key = "PRI".to_string();
        r.extra = "auto_increment".to_string();

        let (name, column) = ColumnSchema::from_row(&r).unwrap();
        assert_eq!(name, "id");
        assert_eq!(column.column_type, ColumnType::Integer);
        assert_eq!(column.length, Some(10));
        assert_eq!(column.key, Some(KeyRole::Primary));
        assert_eq!(
            c.column_definition(&name, &column).unwrap(),
            "`id` INT(10) UNSIGNED ZEROFILL AUTO_INCREMENT NOT NULL"
        );
    }

    #[test]
    fn column_from_enum_row() {
        let c = Compiler::default();
        let mut r = row("gender", "enum('male','female')");
        r.null = "YES".to_string();
        r.default = Some("female".to_string());

        let (name, column) = ColumnSchema::from_row(&r).unwrap();
        assert_eq!(
            column.column_type,
            ColumnType::Enum(vec!["male".to_string(), "female".to_string()])
        );
        assert_eq!(
            c.column_definition(&name, &column).unwrap(),
            "`gender` ENUM('male', 'female') NULL DEFAULT 'female'"
        );
    }

    #[test]
    fn column_from_text_rows() {
        let mut r = row("login", "varchar(30)");
        r.key = "UNI".to_string();
        r.comment = "login name".to_string();
        let (_, column) = ColumnSchema::from_row(&r).unwrap();
        assert_eq!(column.column_type, ColumnType::Text);
        assert_eq!(column.length, Some(30));
        assert_eq!(column.key, Some(KeyRole::Unique));
        assert_eq!(column.options.comment.as_deref(), Some("login name"));

        let (_, column) = ColumnSchema::from_row(&row("body", "longtext")).unwrap();
        assert_eq!(
            Compiler::default().column_definition("body", &column).unwrap(),
            "`body` TEXT NOT NULL"
        );
    }

    #[test]
    fn column_from_numeric_and_binary_rows() {
        let c = Compiler::default();
        let cases = [
            ("decimal(10,2) unsigned", "`x` FLOAT NOT NULL"),
            ("double", "`x` FLOAT NOT NULL"),
            ("mediumblob", "`x` BLOB NOT NULL"),
            ("longblob", "`x` BLOB NOT NULL"),
            ("varbinary(16)", "`x` BLOB NOT NULL"),
        ];
        for (ty, expected) in cases {
            let (name, column) = ColumnSchema::from_row(&row("x", ty)).unwrap();
            assert_eq!(c.column_definition(&name, &column).unwrap(), expected, "type: {ty}");
        }
    }

    #[test]
    fn create_requires_table() {
        let c = Compiler::default();
        let schema = Schema::new().column("id", ColumnSchema::integer());
        assert_eq!(
            c.compile_create("", &schema, &TableSettings::default()),
            Err(CompileError::NoTable)
        );
    }

    #[test]
    fn column_from_bad_rows() {
        assert_eq!(
            ColumnSchema::from_row(&row("g", "geometry")),
            Err(SchemaError::UnknownType("geometry".to_string()))
        );
        assert_eq!(
            ColumnSchema::from_row(&row("n", "int(10")),
            Err(SchemaError::MalformedType("int(10".to_string()))
        );
    }
}
