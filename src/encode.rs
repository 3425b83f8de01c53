//! 值编码：把 `SqlValue` 渲染为可直接拼入语句的字面量。
//!
//! 安全警告：内联字面量永远不如预编译参数安全；字符串必须经过执行上下文的转义，
//! `SqlValue::Raw` 则完全不做处理。

use crate::conn::Escape;
use crate::dialect::Dialect;
use crate::value::SqlValue;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATETIME_MICROS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// MySQL 风格的反斜杠转义（与 `mysql_real_escape_string` 转义的字符集一致）。
pub fn backslash_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '\u{0000}' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{001a}' => out.push_str("\\Z"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

/// 标准 SQL 转义：单引号写两次，其余字符原样保留。
pub fn double_quote_escape(raw: &str) -> String {
    raw.replace('\'', "''")
}

pub(crate) fn encode_value<D: Dialect + ?Sized>(
    out: &mut String,
    dialect: &D,
    value: &SqlValue,
    escaper: &dyn Escape,
) {
    match value {
        SqlValue::String(s) => quote_string(out, dialect.string_prefix(), s, escaper),
        SqlValue::F64(f) if f.is_finite() => out.push_str(&f.to_string()),
        SqlValue::F64(_) => out.push_str("null"),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::Null => out.push_str("null"),
        SqlValue::Bool(b) => out.push_str(dialect.bool_literal(*b)),
        SqlValue::DateTime(dt) => encode_datetime(out, dt),
        SqlValue::List(items) => {
            out.push('(');
            encode_list(out, dialect, items, escaper);
            out.push(')');
        }
        SqlValue::Raw(expr) => out.push_str(expr),
    }
}

/// 逗号分隔地编码一组值（不含括号），IN 列表与 VALUES 行共用。
pub(crate) fn encode_list<D: Dialect + ?Sized>(
    out: &mut String,
    dialect: &D,
    items: &[SqlValue],
    escaper: &dyn Escape,
) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        encode_value(out, dialect, item, escaper);
    }
}

fn quote_string(out: &mut String, prefix: &str, s: &str, escaper: &dyn Escape) {
    out.push_str(prefix);
    out.push('\'');
    out.push_str(&escaper.escape_string(s));
    out.push('\'');
}

fn encode_datetime(out: &mut String, dt: &time::PrimitiveDateTime) {
    let format = if dt.nanosecond() == 0 {
        DATETIME_FORMAT
    } else {
        DATETIME_MICROS_FORMAT
    };
    match dt.format(format) {
        Ok(s) => {
            out.push('\'');
            out.push_str(&s);
            out.push('\'');
        }
        Err(_) => out.push_str("null"),
    }
}
