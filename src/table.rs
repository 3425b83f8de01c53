//! Table：绑定连接、表名与方言的入口，负责产生语句并执行。

use crate::conn::{Connection, QueryOutcome, ResultSet};
use crate::dialect::Dialect;
use crate::error::Error;
use crate::flavor::{Flavor, default_flavor};
use crate::record::Record;
use crate::statement::{Direction, Predicate, Statement};
use crate::value::SqlValue;
use std::fmt;
use std::ops::Deref;

const DEFAULT_KEY_COLUMN: &str = "id";

pub struct Table<'c, C: Connection> {
    conn: &'c C,
    name: String,
    key_column: String,
    dialect: Box<dyn Dialect>,
}

impl<'c, C: Connection> Table<'c, C> {
    /// 使用连接声明的 Flavor；连接未声明时使用全局默认 Flavor。
    pub fn new(conn: &'c C, name: impl Into<String>) -> Self {
        let flavor = conn.flavor().unwrap_or_else(default_flavor);
        Self::with_dialect(conn, name, flavor.dialect())
    }

    pub fn with_flavor(conn: &'c C, name: impl Into<String>, flavor: Flavor) -> Self {
        Self::with_dialect(conn, name, flavor.dialect())
    }

    pub fn with_dialect(conn: &'c C, name: impl Into<String>, dialect: Box<dyn Dialect>) -> Self {
        if let Some(conn_flavor) = conn.flavor()
            && conn_flavor != dialect.flavor()
        {
            tracing::warn!(
                connection = %conn_flavor,
                dialect = %dialect.flavor(),
                "dialect does not match the connection's escaping rules"
            );
        }
        Self {
            conn,
            name: name.into(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            dialect,
        }
    }

    /// 设置 `find_by_key` 使用的主键列（默认 `id`）。
    pub fn set_key_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.key_column = column.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn query(&self, statement: Statement) -> Query<'c, C> {
        Query {
            conn: self.conn,
            dialect: self.dialect.clone(),
            statement,
        }
    }

    pub fn select(&self) -> Query<'c, C> {
        self.query(Statement::select(self.name.as_str()))
    }

    pub fn update(&self) -> Query<'c, C> {
        self.query(Statement::update(self.name.as_str()))
    }

    pub fn insert(&self) -> Query<'c, C> {
        self.query(Statement::insert(self.name.as_str()))
    }

    pub fn delete(&self) -> Query<'c, C> {
        self.query(Statement::delete(self.name.as_str()))
    }

    pub fn count(&self) -> Query<'c, C> {
        self.query(Statement::count(self.name.as_str()))
    }

    pub fn find_by_key(&self, value: impl Into<SqlValue>) -> Query<'c, C> {
        self.query(Statement::find_by_key(
            self.name.as_str(),
            self.key_column.as_str(),
            value,
        ))
    }

    /// 统计满足全部 `列 = 值` 条件的行数；失败时返回 0。
    pub fn count_by<I, K, V>(&self, attrs: I) -> i64
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.count().where_assoc(attrs).execute_count()
    }

    /// 是否存在满足条件的行，常用于唯一性校验。
    pub fn exists_by<I, K, V>(&self, attrs: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.count_by(attrs) > 0
    }
}

impl<C: Connection> Clone for Table<'_, C> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn,
            name: self.name.clone(),
            key_column: self.key_column.clone(),
            dialect: self.dialect.clone(),
        }
    }
}

impl<C: Connection> fmt::Debug for Table<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("key_column", &self.key_column)
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

/// 绑定了连接的语句：链式构建后直接编译或执行。
pub struct Query<'c, C: Connection> {
    conn: &'c C,
    dialect: Box<dyn Dialect>,
    statement: Statement,
}

impl<C: Connection> Deref for Query<'_, C> {
    type Target = Statement;
    fn deref(&self) -> &Self::Target {
        &self.statement
    }
}

macro_rules! forward_to_statement {
    ($($name:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            pub fn $name(&mut self, $($arg: $ty),*) -> &mut Self {
                self.statement.$name($($arg),*);
                self
            }
        )*
    };
}

impl<'c, C: Connection> Query<'c, C> {
    forward_to_statement! {
        where_(column: impl Into<String>, value: impl Into<SqlValue>);
        where_op(column: impl Into<String>, operator: impl Into<String>, value: impl Into<SqlValue>);
        or_where(column: impl Into<String>, value: impl Into<SqlValue>);
        or_where_op(column: impl Into<String>, operator: impl Into<String>, value: impl Into<SqlValue>);
        add_predicate(predicate: Predicate);
        group_by(column: impl Into<String>);
        order_by(column: impl Into<String>, direction: impl Into<Direction>);
        order_by_asc(column: impl Into<String>);
        order_by_desc(column: impl Into<String>);
        limit(n: i64);
        limit_range(offset: i64, end: i64);
        set(column: impl Into<String>, value: impl Into<SqlValue>);
        values(row: impl Into<Record>);
    }

    pub fn columns<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statement.columns(cols);
        self
    }

    pub fn where_assoc<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.statement.where_assoc(entries);
        self
    }

    pub fn set_assoc<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.statement.set_assoc(entries);
        self
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn into_statement(self) -> Statement {
        self.statement
    }

    /// 使用连接的转义能力编译语句。
    pub fn compile(&self) -> String {
        self.dialect.compile(&self.statement, self.conn)
    }

    /// 编译并执行；连接返回的错误原样向上传递。
    pub fn execute(&self) -> Result<QueryOutcome<C::Rows>, Error> {
        let sql = self.compile();
        if sql.is_empty() {
            tracing::warn!(
                table = self.statement.table(),
                method = ?self.statement.method(),
                "refusing to execute an empty statement"
            );
            return Err(Error::EmptyStatement);
        }

        tracing::debug!(flavor = %self.dialect.flavor(), sql = %sql, "executing statement");
        Ok(self.conn.query(&sql)?)
    }

    /// 执行并读取首行 `c` 列的整数值。任何失败都记为 0，因此 0 只代表「未知或为零」。
    pub fn execute_count(&self) -> i64 {
        let outcome = match self.execute() {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(table = self.statement.table(), error = %err, "count query failed, reporting 0");
                return 0;
            }
        };

        let Some(mut rows) = outcome.rows() else {
            tracing::warn!(
                table = self.statement.table(),
                "count query returned no result set, reporting 0"
            );
            return 0;
        };

        rows.fetch_assoc()
            .and_then(|row| row.get("c").map(SqlValue::to_i64_lossy))
            .unwrap_or(0)
    }
}

impl<C: Connection> fmt::Debug for Query<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("dialect", &self.dialect)
            .field("statement", &self.statement)
            .finish_non_exhaustive()
    }
}
