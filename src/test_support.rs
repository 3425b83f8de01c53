//! 测试用的内存连接：记录执行过的语句，并按顺序返回预设结果。

use crate::conn::{Connection, ConnectionError, Escape, QueryOutcome, VecRows};
use crate::encode::backslash_escape;
use crate::flavor::Flavor;
use crate::record::Record;
use std::cell::RefCell;
use std::collections::VecDeque;

type Response = Result<QueryOutcome<VecRows>, ConnectionError>;

#[derive(Debug, Default)]
pub(crate) struct MockConnection {
    flavor: Option<Flavor>,
    executed: RefCell<Vec<String>>,
    responses: RefCell<VecDeque<Response>>,
}

impl MockConnection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 声明自己按 `flavor` 的规则转义的连接。
    pub(crate) fn for_flavor(flavor: Flavor) -> Self {
        Self {
            flavor: Some(flavor),
            ..Self::default()
        }
    }

    pub(crate) fn push_rows(&self, rows: impl IntoIterator<Item = Record>) {
        self.responses
            .borrow_mut()
            .push_back(Ok(QueryOutcome::Rows(VecRows::new(rows))));
    }

    pub(crate) fn push_affected(&self, n: u64) {
        self.responses
            .borrow_mut()
            .push_back(Ok(QueryOutcome::Affected(n)));
    }

    pub(crate) fn push_error(&self, msg: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ConnectionError::new(msg)));
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl Escape for MockConnection {
    fn escape_string(&self, raw: &str) -> String {
        match self.flavor {
            Some(flavor) => flavor.escape_string(raw),
            None => backslash_escape(raw),
        }
    }

    fn flavor(&self) -> Option<Flavor> {
        self.flavor
    }
}

impl Connection for MockConnection {
    type Rows = VecRows;

    fn query(&self, sql: &str) -> Response {
        self.executed.borrow_mut().push(sql.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(QueryOutcome::Affected(0)))
    }
}

/// 把所有字符串转成大写的「转义」，用来确认编码确实经过了执行上下文。
#[derive(Debug, Default)]
pub(crate) struct ShoutingEscaper;

impl Escape for ShoutingEscaper {
    fn escape_string(&self, raw: &str) -> String {
        raw.to_uppercase()
    }
}
