#[cfg(test)]
mod tests {
    use crate::{
        CompileError, Compiler, CompilerConfig, Conditions, Direction, Fields, Finder, Flavor,
        SelectOptions, Tables,
    };
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn select_all_defaults_to_star() {
        let c = Compiler::default();
        let stmt = c
            .compile_select(Finder::All, "users", &SelectOptions::new())
            .unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM `users`");
        assert!(stmt.binds().is_empty());
    }

    #[test]
    fn select_fields_where_order_limit_offset() {
        let c = Compiler::default();
        let opts = SelectOptions::new()
            .fields(["id", "name AS username"])
            .conditions(Conditions::new().add("status", "active").add("age >", 18_i64))
            .order_by("created", Direction::Desc)
            .order_by("id", Direction::Asc)
            .limit(10)
            .offset(20);
        let stmt = c.compile_select(Finder::All, "users", &opts).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT `id`, `name` AS `username` FROM `users` WHERE `status` = 'active' AND `age` > 18 ORDER BY `created` DESC, `id` ASC LIMIT 20,10"
        );
        assert!(!stmt.sql().contains(':'));
    }

    #[test]
    fn first_forces_single_row() {
        let c = Compiler::default();
        let opts = SelectOptions::new()
            .conditions(Conditions::new().add("email", "a@b.c"))
            .limit(50)
            .offset(10);
        let stmt = c.compile_select(Finder::First, "users", &opts).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM `users` WHERE `email` = 'a@b.c' LIMIT 1"
        );
    }

    #[test]
    fn count_ignores_fields() {
        let c = Compiler::default();
        let opts = SelectOptions::new()
            .fields(["id"])
            .conditions(Conditions::new().add("age >=", 21_i64));
        let stmt = c.compile_select(Finder::Count, "users", &opts).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT COUNT(*) AS `count` FROM `users` WHERE `age` >= 21"
        );
    }

    #[test]
    fn multi_table_uses_capitalised_aliases() {
        let c = Compiler::default();
        let opts =
            SelectOptions::new().conditions(Conditions::new().add("Posts.user_id", "Users.id"));
        let stmt = c
            .compile_select(Finder::All, ["users", "posts"], &opts)
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT `Users`.*, `Posts`.* FROM `users` AS `Users`, `posts` AS `Posts` WHERE `Posts`.`user_id` = `Users`.`id`"
        );
    }

    #[test]
    fn explicit_aliases_and_table_fields() {
        let c = Compiler::default();
        let opts = SelectOptions::new().fields(
            Fields::new()
                .table("User", ["id", "name"])
                .column("Profile.bio"),
        );
        let stmt = c
            .compile_select(
                Finder::All,
                Tables::aliased([("user", "users"), ("profile", "profiles")]),
                &opts,
            )
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT `User`.`id`, `User`.`name`, `Profile`.`bio` FROM `users` AS `User`, `profiles` AS `Profile`"
        );
    }

    #[test]
    fn order_then_group() {
        let c = Compiler::default();
        let opts = SelectOptions::new()
            .order_by("status", Direction::Asc)
            .group_by("status");
        let stmt = c.compile_select(Finder::All, "users", &opts).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM `users` ORDER BY `status` ASC GROUP BY `status`"
        );
    }

    #[test]
    fn random_order_follows_flavor() {
        let opts = SelectOptions::new().order_random();

        let mysql = Compiler::default();
        assert_eq!(
            mysql.compile_select(Finder::All, "t", &opts).unwrap().sql(),
            "SELECT * FROM `t` ORDER BY RAND()"
        );

        let pg = Compiler::new(CompilerConfig::new().flavor(Flavor::PostgreSQL));
        assert_eq!(
            pg.compile_select(Finder::All, "t", &opts).unwrap().sql(),
            "SELECT * FROM \"t\" ORDER BY RANDOM()"
        );
    }

    #[test]
    fn offset_without_limit_is_ignored() {
        let c = Compiler::default();
        let opts = SelectOptions::new().offset(5);
        let stmt = c.compile_select(Finder::All, "users", &opts).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM `users`");
    }

    #[test]
    fn empty_group_omits_where() {
        let c = Compiler::default();
        let opts = SelectOptions::new().conditions(Conditions::new().or(Conditions::new()));
        let stmt = c.compile_select(Finder::All, "users", &opts).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM `users`");
    }

    #[test]
    fn missing_tables_are_rejected() {
        let c = Compiler::default();
        let opts = SelectOptions::new();
        assert_eq!(
            c.compile_select(Finder::All, Vec::<String>::new(), &opts),
            Err(CompileError::NoTable)
        );
        assert_eq!(
            c.compile_select(Finder::Count, "  ", &opts),
            Err(CompileError::NoTable)
        );
        assert_eq!(
            c.compile_select(Finder::All, ["users", ""], &opts),
            Err(CompileError::NoTable)
        );
    }

    #[test]
    fn blank_alias_falls_back_to_table() {
        let c = Compiler::default();
        let stmt = c
            .compile_select(
                Finder::All,
                Tables::aliased([("", "users"), ("p", "posts")]),
                &SelectOptions::new(),
            )
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT `Users`.*, `P`.* FROM `users` AS `Users`, `posts` AS `P`"
        );
    }

    #[test]
    fn finder_from_name() {
        assert_eq!("first".parse::<Finder>().unwrap(), Finder::First);
        assert_eq!("count".parse::<Finder>().unwrap(), Finder::Count);
        assert_eq!("list".parse::<Finder>().unwrap(), Finder::All);
    }

    #[test]
    fn context_keys_unique_across_threads() {
        let c = Compiler::default();
        let opts = SelectOptions::new().conditions(Conditions::new().add("id", 1_i64));

        let keys: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        (0..50)
                            .map(|_| {
                                let stmt = c.compile_select(Finder::All, "users", &opts).unwrap();
                                assert_eq!(stmt.sql(), "SELECT * FROM `users` WHERE `id` = 1");
                                stmt.key().get()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<u64> = keys.iter().copied().collect();
        assert_eq!(unique.len(), 200);
    }
}
