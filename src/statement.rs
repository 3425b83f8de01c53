//! Statement：与方言无关的单条语句意图。
//!
//! 每种语句都通过工厂函数（`Statement::select` 等）得到一个全新的意图，
//! 之后的链式调用只追加内容；同一个意图不会在不同语句之间复用。
//! 渲染交给 [`Dialect`](crate::dialect::Dialect)。

use crate::conn::Escape;
use crate::error::IntentError;
use crate::flavor::Flavor;
use crate::record::Record;
use crate::value::SqlValue;
use std::fmt;

/// 语句种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Select,
    Update,
    Insert,
    Delete,
    Count,
    /// 按主键查找单行；需要在构造时给出主键列。
    FindByKey,
}

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// 只有不区分大小写的 `DESC` 解析为降序，其余一律视为升序。
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("DESC") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl From<&str> for Direction {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// 连接当前条件与前一个条件的逻辑词。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Connective {
    #[default]
    And,
    Or,
    Other(String),
}

impl Connective {
    pub fn as_str(&self) -> &str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for Connective {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("AND") {
            Self::And
        } else if s.eq_ignore_ascii_case("OR") {
            Self::Or
        } else {
            Self::Other(s.to_string())
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WHERE 子句中的一个条件。
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub value: SqlValue,
    pub operator: String,
    pub connective: Connective,
}

impl Predicate {
    pub fn new(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            operator: "=".to_string(),
            connective: Connective::And,
        }
    }

    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    pub fn connective(mut self, connective: impl Into<Connective>) -> Self {
        self.connective = connective.into();
        self
    }

    /// 列名与运算符都非空时才会被渲染。
    pub fn qualifies(&self) -> bool {
        !self.column.is_empty() && !self.operator.is_empty()
    }
}

/// 分页窗口：`end` 是开区间上界下标，行数为 `end - offset`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimitWindow {
    pub offset: i64,
    pub end: i64,
}

impl LimitWindow {
    /// 不限制行数。
    pub const NONE: Self = Self {
        offset: -1,
        end: -1,
    };

    /// 两端都非负时才渲染 LIMIT。
    pub fn is_set(&self) -> bool {
        self.offset >= 0 && self.end >= 0
    }

    pub fn row_count(&self) -> i64 {
        (self.end - self.offset).max(0)
    }
}

impl Default for LimitWindow {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    table: String,
    method: Option<Method>,
    columns: Vec<String>,
    predicates: Vec<Predicate>,
    group_key: Option<String>,
    orderings: Vec<(String, Direction)>,
    limit: LimitWindow,
    assignments: Vec<(String, SqlValue)>,
    rows: Vec<Record>,
    key_column: Option<String>,
}

impl Statement {
    /// 尚未选择语句种类的空意图，编译结果为空字符串。
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            method: None,
            columns: Vec::new(),
            predicates: Vec::new(),
            group_key: None,
            orderings: Vec::new(),
            limit: LimitWindow::NONE,
            assignments: Vec::new(),
            rows: Vec::new(),
            key_column: None,
        }
    }

    fn with_method(table: impl Into<String>, method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::new(table)
        }
    }

    pub fn select(table: impl Into<String>) -> Self {
        Self::with_method(table, Method::Select)
    }

    pub fn update(table: impl Into<String>) -> Self {
        Self::with_method(table, Method::Update)
    }

    pub fn insert(table: impl Into<String>) -> Self {
        Self::with_method(table, Method::Insert)
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Self::with_method(table, Method::Delete)
    }

    pub fn count(table: impl Into<String>) -> Self {
        Self::with_method(table, Method::Count)
    }

    /// `SELECT ... WHERE key=value LIMIT 1`；主键列随意图一起保存。
    pub fn find_by_key(
        table: impl Into<String>,
        key_column: impl Into<String>,
        key_value: impl Into<SqlValue>,
    ) -> Self {
        let key_column = key_column.into();
        let mut st = Self::with_method(table, Method::FindByKey);
        st.predicates
            .push(Predicate::new(key_column.clone(), key_value));
        st.key_column = Some(key_column);
        st.limit = LimitWindow { offset: 0, end: 1 };
        st
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn selected_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn group_key(&self) -> Option<&str> {
        self.group_key.as_deref()
    }

    pub fn orderings(&self) -> &[(String, Direction)] {
        &self.orderings
    }

    pub fn limit_window(&self) -> LimitWindow {
        self.limit
    }

    pub fn assignments(&self) -> &[(String, SqlValue)] {
        &self.assignments
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn key_column(&self) -> Option<&str> {
        self.key_column.as_deref()
    }

    /// 指定 SELECT 的列；为空时渲染为 `*`。列表达式原样输出。
    pub fn columns<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn where_(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.add_predicate(Predicate::new(column, value))
    }

    pub fn where_op(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<SqlValue>,
    ) -> &mut Self {
        self.add_predicate(Predicate::new(column, value).operator(operator))
    }

    pub fn or_where(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.add_predicate(Predicate::new(column, value).connective(Connective::Or))
    }

    pub fn or_where_op(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<SqlValue>,
    ) -> &mut Self {
        self.add_predicate(
            Predicate::new(column, value)
                .operator(operator)
                .connective(Connective::Or),
        )
    }

    pub fn add_predicate(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    /// 映射形式：每个条目追加一个 `=` 条件。
    pub fn where_assoc<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        for (k, v) in entries {
            self.where_(k, v);
        }
        self
    }

    pub fn group_by(&mut self, column: impl Into<String>) -> &mut Self {
        self.group_key = Some(column.into());
        self
    }

    pub fn order_by(&mut self, column: impl Into<String>, direction: impl Into<Direction>) -> &mut Self {
        self.orderings.push((column.into(), direction.into()));
        self
    }

    pub fn order_by_asc(&mut self, column: impl Into<String>) -> &mut Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn order_by_desc(&mut self, column: impl Into<String>) -> &mut Self {
        self.order_by(column, Direction::Desc)
    }

    /// 只取前 `n` 行，等价于 `limit_range(0, n)`。
    pub fn limit(&mut self, n: i64) -> &mut Self {
        self.limit = LimitWindow { offset: 0, end: n };
        self
    }

    /// 取下标区间 `[offset, end)` 的行。
    pub fn limit_range(&mut self, offset: i64, end: i64) -> &mut Self {
        self.limit = LimitWindow { offset, end };
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn set_assoc<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        for (k, v) in entries {
            self.set(k, v);
        }
        self
    }

    /// 追加一行待插入的数据；列集合以第一行为准。
    pub fn values(&mut self, row: impl Into<Record>) -> &mut Self {
        self.rows.push(row.into());
        self
    }

    /// 检查编译时会被宽松处理的缺陷。编译本身不调用它。
    pub fn validate(&self) -> Result<(), IntentError> {
        if self.method == Some(Method::FindByKey)
            && self.key_column.as_deref().is_none_or(str::is_empty)
        {
            return Err(IntentError::MissingKeyColumn);
        }

        for (index, p) in self.predicates.iter().enumerate() {
            if p.column.is_empty() {
                return Err(IntentError::EmptyColumn { index });
            }
            if p.operator.is_empty() {
                return Err(IntentError::EmptyOperator {
                    index,
                    column: p.column.clone(),
                });
            }
            if matches!(&p.connective, Connective::Other(c) if c.trim().is_empty()) {
                return Err(IntentError::EmptyConnective {
                    index,
                    column: p.column.clone(),
                });
            }
            if matches!(&p.value, SqlValue::List(items) if items.is_empty()) {
                return Err(IntentError::EmptyValueSet {
                    index,
                    column: p.column.clone(),
                });
            }
        }

        if let Some(first) = self.rows.first() {
            let expected: Vec<String> = first.keys().map(str::to_string).collect();
            for (row, r) in self.rows.iter().enumerate().skip(1) {
                let found: Vec<String> = r.keys().map(str::to_string).collect();
                if found != expected {
                    return Err(IntentError::RowColumnsMismatch {
                        row,
                        expected,
                        found,
                    });
                }
            }
        }

        if self.limit.is_set() && self.limit.end < self.limit.offset {
            return Err(IntentError::InvalidLimit {
                offset: self.limit.offset,
                end: self.limit.end,
            });
        }

        Ok(())
    }

    /// 用方言内置的转义规则离线编译（不需要数据库连接）。
    pub fn to_sql(&self, flavor: Flavor) -> String {
        flavor.dialect().compile(self, &flavor)
    }

    /// 用给定的转义能力编译，例如一个真实连接。
    pub fn to_sql_with(&self, flavor: Flavor, escaper: &dyn Escape) -> String {
        flavor.dialect().compile(self, escaper)
    }
}
