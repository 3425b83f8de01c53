#[cfg(test)]
mod tests {
    use crate::conn::Escape;
    use crate::flavor::{Flavor, default_flavor, set_default_flavor_scoped};
    use pretty_assertions::assert_eq;

    #[test]
    fn flavor_display() {
        let cases = vec![
            (Flavor::MySQL, "MySQL"),
            (Flavor::PostgreSQL, "PostgreSQL"),
            (Flavor::SQLite, "SQLite"),
        ];

        for (f, expected) in cases {
            assert_eq!(f.to_string(), expected);
        }
    }

    #[test]
    fn flavor_quote() {
        assert_eq!(Flavor::MySQL.quote("id"), "`id`");
        assert_eq!(Flavor::PostgreSQL.quote("id"), "\"id\"");
        assert_eq!(Flavor::SQLite.quote("id"), "\"id\"");
    }

    #[test]
    fn quote_doubles_embedded_quote_chars() {
        assert_eq!(Flavor::MySQL.quote("a`b"), "`a``b`");
        assert_eq!(Flavor::PostgreSQL.quote("a\"b"), "\"a\"\"b\"");
        assert_eq!(Flavor::SQLite.quote("a`b"), "\"a`b\"");
    }

    #[test]
    fn flavor_maps_to_matching_dialect() {
        for f in [Flavor::MySQL, Flavor::PostgreSQL, Flavor::SQLite] {
            assert_eq!(f.dialect().flavor(), f);
        }
    }

    #[test]
    fn scoped_default_flavor_restores() {
        {
            let _g = set_default_flavor_scoped(Flavor::SQLite);
            assert_eq!(default_flavor(), Flavor::SQLite);
        }
        let _g = set_default_flavor_scoped(Flavor::MySQL);
        assert_eq!(default_flavor(), Flavor::MySQL);
    }

    #[test]
    fn builtin_escaping_per_flavor() {
        assert_eq!(Flavor::MySQL.escape_string("a'b\\c"), "a\\'b\\\\c");
        assert_eq!(Flavor::PostgreSQL.escape_string("a'b\\c"), "a\\'b\\\\c");
        assert_eq!(Flavor::SQLite.escape_string("it's"), "it''s");
    }
}
