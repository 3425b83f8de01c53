//! SQLite 方言。

use crate::dialect::Dialect;
use crate::flavor::Flavor;

#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn flavor(&self) -> Flavor {
        Flavor::SQLite
    }

    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!(" LIMIT {count} OFFSET {offset}")
    }
}
