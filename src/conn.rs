//! 执行上下文：builder 只依赖「转义字符串」与「执行语句」两个能力。
//!
//! 真实的数据库连接、连接池、重试与超时策略都由实现方负责。

use crate::flavor::Flavor;
use crate::record::Record;

/// 执行失败时由连接返回的错误（通常携带驱动给出的错误信息）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("connection query error: {0}")]
pub struct ConnectionError(pub String);

impl ConnectionError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// 原始字符串转义能力：只转义，不加引号。
pub trait Escape {
    fn escape_string(&self, raw: &str) -> String;

    /// 转义规则所对应的方言；`Table::new` 优先使用它而不是全局默认值。
    fn flavor(&self) -> Option<Flavor> {
        None
    }
}

impl<E: Escape + ?Sized> Escape for &E {
    fn escape_string(&self, raw: &str) -> String {
        (**self).escape_string(raw)
    }

    fn flavor(&self) -> Option<Flavor> {
        (**self).flavor()
    }
}

/// 结果集：逐行以「列名 → 值」的形式读取。
pub trait ResultSet {
    fn fetch_assoc(&mut self) -> Option<Record>;
}

/// 一次执行的结果：查询类语句返回结果集，写入类语句返回影响行数。
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<R> {
    Rows(R),
    Affected(u64),
}

impl<R> QueryOutcome<R> {
    pub fn rows(self) -> Option<R> {
        match self {
            Self::Rows(r) => Some(r),
            Self::Affected(_) => None,
        }
    }

    pub fn affected(&self) -> Option<u64> {
        match self {
            Self::Rows(_) => None,
            Self::Affected(n) => Some(*n),
        }
    }
}

/// 数据库连接。
pub trait Connection: Escape {
    type Rows: ResultSet;

    fn query(&self, sql: &str) -> Result<QueryOutcome<Self::Rows>, ConnectionError>;
}

/// 内存中的结果集，便于连接实现直接返回已取回的行。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecRows {
    rows: std::collections::VecDeque<Record>,
}

impl VecRows {
    pub fn new(rows: impl IntoIterator<Item = Record>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ResultSet for VecRows {
    fn fetch_assoc(&mut self) -> Option<Record> {
        self.rows.pop_front()
    }
}
