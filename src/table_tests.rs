#[cfg(test)]
mod tests {
    use crate::test_support::MockConnection;
    use crate::{
        ConnectionError, Error, Flavor, QueryOutcome, Record, ResultSet, SqlValue, Table,
        set_default_flavor_scoped,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn execute_runs_compiled_statement() {
        let conn = MockConnection::new();
        conn.push_affected(1);
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        let outcome = users.update().set("a", 1_i64).where_("id", 2_i64).execute();
        assert_eq!(outcome.map(|o| o.affected()), Ok(Some(1)));
        assert_eq!(conn.executed(), vec!["UPDATE users SET `a`=1 WHERE `id`=2;"]);
    }

    #[test]
    fn execute_returns_rows() {
        let conn = MockConnection::new();
        conn.push_rows([
            Record::from([("id", 1_i64)]),
            Record::from([("id", 2_i64)]),
        ]);
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        let mut rows = users
            .select()
            .order_by_desc("id")
            .limit(2)
            .execute()
            .ok()
            .and_then(QueryOutcome::rows)
            .unwrap_or_default();
        assert_eq!(rows.fetch_assoc(), Some(Record::from([("id", 1_i64)])));
        assert_eq!(rows.fetch_assoc(), Some(Record::from([("id", 2_i64)])));
        assert_eq!(rows.fetch_assoc(), None);
        assert_eq!(
            conn.executed(),
            vec!["SELECT * FROM users ORDER BY `id` DESC LIMIT 0,2;"]
        );
    }

    #[test]
    fn execute_refuses_empty_statement() {
        let conn = MockConnection::new();
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        assert_eq!(users.update().where_("id", 1_i64).execute(), Err(Error::EmptyStatement));
        assert_eq!(users.insert().execute(), Err(Error::EmptyStatement));
        assert!(conn.executed().is_empty());
    }

    #[test]
    fn execute_propagates_connection_failure() {
        let conn = MockConnection::new();
        conn.push_error("table is locked");
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        let err = users.delete().where_("id", 1_i64).execute();
        assert_eq!(
            err,
            Err(Error::Connection(ConnectionError::new("table is locked")))
        );
        assert_eq!(
            Error::Connection(ConnectionError::new("x")).to_string(),
            "connection query error: x"
        );
    }

    #[test]
    fn execute_count_reads_column_c() {
        let conn = MockConnection::new();
        conn.push_rows([Record::from([("c", "42")])]);
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        assert_eq!(users.count().where_("active", true).execute_count(), 42);
        assert_eq!(
            conn.executed(),
            vec!["SELECT COUNT(*) AS c FROM users WHERE `active`=1;"]
        );
    }

    #[test]
    fn execute_count_downgrades_failures_to_zero() {
        let conn = MockConnection::new();
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        conn.push_error("gone away");
        assert_eq!(users.count().execute_count(), 0);

        conn.push_affected(5);
        assert_eq!(users.count().execute_count(), 0);

        conn.push_rows(Vec::<Record>::new());
        assert_eq!(users.count().execute_count(), 0);

        conn.push_rows([Record::from([("total", 3_i64)])]);
        assert_eq!(users.count().execute_count(), 0);

        assert_eq!(users.update().execute_count(), 0);
        assert_eq!(conn.executed().len(), 4);
    }

    #[test]
    fn count_by_and_exists_by() {
        let conn = MockConnection::new();
        conn.push_rows([Record::from([("c", SqlValue::I64(1))])]);
        conn.push_rows([Record::from([("c", SqlValue::I64(0))])]);
        let users = Table::with_flavor(&conn, "users", Flavor::MySQL);

        assert!(users.exists_by([("email", "a@b.c")]));
        assert_eq!(users.count_by([("email", "x'@y"), ("org", "n")]), 0);
        assert_eq!(
            conn.executed(),
            vec![
                "SELECT COUNT(*) AS c FROM users WHERE `email`='a@b.c';",
                "SELECT COUNT(*) AS c FROM users WHERE `email`='x\\'@y' AND `org`='n';",
            ]
        );
    }

    #[test]
    fn find_by_key_uses_configured_key_column() {
        let conn = MockConnection::new();
        let mut users = Table::with_flavor(&conn, "users", Flavor::MySQL);
        assert_eq!(users.key_column(), "id");
        assert_eq!(
            users.find_by_key(3_i64).compile(),
            "SELECT * FROM users WHERE `id`=3 LIMIT 0,1;"
        );

        users.set_key_column("user_id");
        assert_eq!(
            users.find_by_key(3_i64).compile(),
            "SELECT * FROM users WHERE `user_id`=3 LIMIT 0,1;"
        );
    }

    #[test]
    fn new_table_uses_default_flavor() {
        let _g = set_default_flavor_scoped(Flavor::PostgreSQL);
        let conn = MockConnection::new();
        let users = Table::new(&conn, "users");
        assert_eq!(users.dialect().flavor(), Flavor::PostgreSQL);
        assert_eq!(
            users.select().where_("id", 1_i64).limit(10).compile(),
            "SELECT * FROM users WHERE \"id\"=1 LIMIT 10 OFFSET 0;"
        );
    }

    #[test]
    fn compile_escapes_through_the_connection() {
        let conn = MockConnection::new();
        let t = Table::with_flavor(&conn, "t", Flavor::PostgreSQL);
        assert_eq!(
            t.select().where_("name", "a'b").compile(),
            "SELECT * FROM t WHERE \"name\"=E'a\\'b';"
        );
    }

    #[test]
    fn postgres_literal_keeps_quote_and_backslash_inside_the_string() {
        let conn = MockConnection::new();
        let users = Table::with_flavor(&conn, "users", Flavor::PostgreSQL);
        // E'x\\\' OR 1=1 --' 解析回 x\' OR 1=1 --，整段仍在字符串内。
        assert_eq!(
            users.select().where_("name", "x\\' OR 1=1 --").compile(),
            "SELECT * FROM users WHERE \"name\"=E'x\\\\\\' OR 1=1 --';"
        );
    }

    #[test]
    fn new_table_follows_the_connection_flavor() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        let conn = MockConnection::for_flavor(Flavor::SQLite);
        let t = Table::new(&conn, "t");
        assert_eq!(t.dialect().flavor(), Flavor::SQLite);
        assert_eq!(
            t.select().where_("name", "it's").limit(1).compile(),
            "SELECT * FROM t WHERE \"name\"='it''s' LIMIT 1 OFFSET 0;"
        );
    }

    #[test]
    fn each_start_call_produces_a_fresh_query() {
        let conn = MockConnection::new();
        let t = Table::with_flavor(&conn, "t", Flavor::MySQL);
        let mut first = t.select();
        first.where_("id", 1_i64).limit(3);
        let second = t.select();
        assert_eq!(second.statement(), t.select().statement());
        assert!(second.predicates().is_empty());
        assert_eq!(first.into_statement().predicates().len(), 1);
    }

    #[test]
    fn query_columns_and_assoc_forwarding() {
        let conn = MockConnection::new();
        let t = Table::with_flavor(&conn, "t", Flavor::MySQL);
        assert_eq!(
            t.select()
                .columns(["id", "COUNT(*) AS n"])
                .where_assoc([("a", 1_i64)])
                .group_by("id")
                .compile(),
            "SELECT id,COUNT(*) AS n FROM t WHERE `a`=1 GROUP BY `id`;"
        );
        assert_eq!(
            t.update().set_assoc([("a", 1_i64), ("b", 2_i64)]).compile(),
            "UPDATE t SET `a`=1, `b`=2;"
        );
        assert_eq!(
            t.insert().values(Record::from([("a", 1_i64)])).compile(),
            "INSERT INTO t (a) VALUES (1);"
        );
    }
}
