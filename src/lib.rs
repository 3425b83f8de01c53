//! nin-query：面向单表的链式 SQL 语句构建器。
//!
//! [`Statement`] 记录一条语句的意图，[`Dialect`] 把它编译为内联字面量的 SQL 文本，
//! [`Table`] 把两者与一个 [`Connection`] 绑定起来执行。

pub mod conn;
pub mod dialect;
pub mod encode;
pub mod error;
pub mod flavor;
#[cfg(test)]
mod flavor_tests;
pub mod mysql;
pub mod postgres;
pub mod record;
pub mod sqlite;
pub mod statement;
mod string_builder;
pub mod table;
#[cfg(test)]
mod table_tests;
#[cfg(test)]
mod test_support;
pub mod value;

pub use crate::conn::{Connection, ConnectionError, Escape, QueryOutcome, ResultSet, VecRows};
pub use crate::dialect::Dialect;
pub use crate::encode::{backslash_escape, double_quote_escape};
pub use crate::error::{Error, IntentError};
pub use crate::flavor::{
    DefaultFlavorGuard, Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped,
};
pub use crate::mysql::MySql;
pub use crate::postgres::Postgres;
pub use crate::record::Record;
pub use crate::sqlite::Sqlite;
pub use crate::statement::{Connective, Direction, LimitWindow, Method, Predicate, Statement};
pub use crate::table::{Query, Table};
pub use crate::value::{SqlValue, raw};
