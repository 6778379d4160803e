#[cfg(test)]
mod tests {
    use crate::{BindTable, Compiler, Flavor, SqlValue, Values};
    use pretty_assertions::assert_eq;

    #[test]
    fn colliding_keys_get_count_suffix() {
        let mut binds = BindTable::new();
        assert_eq!(binds.add("id", 1_i64), "id");
        assert_eq!(binds.add("id", 2_i64), "id1");
        assert_eq!(binds.add(":id:", 3_i64), "id2");
        // `id1` 已被占用，后缀从当前数量 3 开始
        assert_eq!(binds.add("id1", 4_i64), "id13");

        assert_eq!(binds.len(), 4);
        assert_eq!(binds.get("id"), Some(&SqlValue::I64(1)));
        assert_eq!(binds.get("id1"), Some(&SqlValue::I64(2)));
        assert_eq!(binds.get("id13"), Some(&SqlValue::I64(4)));
    }

    #[test]
    fn substitute_escapes_unless_disabled() {
        let mut binds = BindTable::new();
        binds.add("name", "O'Brien");

        assert_eq!(
            binds.substitute("name = ':name:'", Some(&Flavor::MySQL)),
            "name = 'O\\'Brien'"
        );
        assert_eq!(binds.substitute("name = ':name:'", None), "name = 'O'Brien'");
    }

    #[test]
    fn substitute_replaces_every_occurrence() {
        let mut binds = BindTable::new();
        binds.add("n", 7_i64);
        assert_eq!(binds.substitute(":n: + :n:", Some(&Flavor::MySQL)), "7 + 7");
    }

    #[test]
    fn function_call_values_are_not_escaped() {
        let mut binds = BindTable::new();
        binds.add("at", "DATE_FORMAT('2024', '%Y')");
        assert_eq!(
            binds.substitute(":at:", Some(&Flavor::MySQL)),
            "DATE_FORMAT('2024', '%Y')"
        );
    }

    #[test]
    fn positional_keys_are_skipped() {
        let mut binds = BindTable::new();
        binds.add("0", "zero");
        assert!(binds.iter().all(|e| e.is_positional()));
        assert_eq!(binds.substitute("a = :0:", Some(&Flavor::MySQL)), "a = :0:");
    }

    #[test]
    fn substituted_values_are_trimmed() {
        let mut binds = BindTable::new();
        binds.add("bio", "  padded\n\t");
        assert_eq!(binds.substitute("':bio:'", None), "'padded'");
    }

    #[test]
    fn value_containing_later_token_is_replaced_again() {
        let compiler = Compiler::default();
        let values = Values::new().set("a", ":b:").set("b", "x");
        let stmt = compiler.compile_insert("t", &values).unwrap();
        assert_eq!(stmt.sql(), "INSERT INTO `t` (`a`, `b`) VALUES ('x', 'x')");
    }
}
