//! 错误类型。编译语句本身从不失败，这里只覆盖可选校验与执行阶段。

use crate::conn::ConnectionError;

/// `Statement::validate` 发现的意图缺陷。编译时这些缺陷会被宽松地跳过。
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("predicate #{index} has an empty column")]
    EmptyColumn { index: usize },
    #[error("predicate #{index} on `{column}` has an empty operator")]
    EmptyOperator { index: usize, column: String },
    #[error("predicate #{index} on `{column}` has an empty connective")]
    EmptyConnective { index: usize, column: String },
    #[error("predicate #{index} on `{column}` has an empty value set")]
    EmptyValueSet { index: usize, column: String },
    #[error("insert row #{row} columns {found:?} do not match first row columns {expected:?}")]
    RowColumnsMismatch {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("limit window end {end} is before offset {offset}")]
    InvalidLimit { offset: i64, end: i64 },
    #[error("find-by-key statement has no key column")]
    MissingKeyColumn,
}

/// 执行语句时的错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Connection(#[from] ConnectionError),
    #[error("statement compiled to an empty string")]
    EmptyStatement,
}
