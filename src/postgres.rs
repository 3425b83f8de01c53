//! PostgreSQL 方言：双引号标识符，`LIMIT count OFFSET offset`，布尔值写作 `TRUE`/`FALSE`。
//!
//! 字符串写成 `E'...'`，因此连接必须按反斜杠规则转义（见 [`crate::backslash_escape`]）。

use crate::dialect::Dialect;
use crate::flavor::Flavor;

#[derive(Debug, Default, Clone, Copy)]
pub struct Postgres;

impl Dialect for Postgres {
    fn flavor(&self) -> Flavor {
        Flavor::PostgreSQL
    }

    fn bool_literal(&self, b: bool) -> &'static str {
        if b { "TRUE" } else { "FALSE" }
    }

    fn string_prefix(&self) -> &'static str {
        "E"
    }

    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!(" LIMIT {count} OFFSET {offset}")
    }
}
