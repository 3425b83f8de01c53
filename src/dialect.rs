//! Dialect：把 [`Statement`] 渲染为某种 SQL 方言的字面量语句。
//!
//! 子句顺序在所有方言间共享，方言只决定标识符引号、布尔字面量与 LIMIT 写法。

use crate::conn::Escape;
use crate::encode::{encode_list, encode_value};
use crate::flavor::Flavor;
use crate::statement::{Direction, Method, Predicate, Statement};
use crate::string_builder::StringBuilder;
use crate::value::SqlValue;
use dyn_clone::DynClone;
use std::fmt;

pub trait Dialect: DynClone + fmt::Debug {
    fn flavor(&self) -> Flavor;

    fn quote_identifier(&self, name: &str) -> String {
        self.flavor().quote(name)
    }

    fn bool_literal(&self, b: bool) -> &'static str {
        if b { "1" } else { "0" }
    }

    /// 字符串字面量的前缀，写在左引号之前。
    fn string_prefix(&self) -> &'static str {
        ""
    }

    /// 渲染分页子句（含前导空格）。
    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!(" LIMIT {offset},{count}")
    }

    /// 把单个值编码为字面量；字符串经 `escaper` 转义后加单引号。
    fn encode(&self, value: &SqlValue, escaper: &dyn Escape) -> String {
        let mut out = String::new();
        encode_value(&mut out, self, value, escaper);
        out
    }

    /// 编译整条语句；未选择语句种类或命中空操作保护时返回空字符串。
    fn compile(&self, statement: &Statement, escaper: &dyn Escape) -> String {
        compile_statement(self, statement, escaper)
    }
}

dyn_clone::clone_trait_object!(Dialect);

pub(crate) fn compile_statement<D: Dialect + ?Sized>(
    d: &D,
    st: &Statement,
    esc: &dyn Escape,
) -> String {
    let Some(method) = st.method() else {
        return String::new();
    };

    match method {
        Method::Select => build_select(d, st, esc),
        Method::Update => build_update(d, st, esc),
        Method::Insert => build_insert(d, st, esc),
        Method::Delete => build_delete(d, st, esc),
        Method::Count => build_count(d, st, esc),
        Method::FindByKey => {
            if st.key_column().is_none_or(str::is_empty) {
                return String::new();
            }
            build_select(d, st, esc)
        }
    }
}

/// 只有列名与运算符都非空的条件会被输出；连接词的位置按已输出的条件计数。
fn write_where<D: Dialect + ?Sized>(
    buf: &mut StringBuilder,
    d: &D,
    predicates: &[Predicate],
    esc: &dyn Escape,
) {
    let mut emitted = 0usize;
    for (index, p) in predicates.iter().enumerate() {
        if !p.qualifies() {
            tracing::trace!(
                index,
                column = %p.column,
                operator = %p.operator,
                "skipping predicate with empty column or operator"
            );
            continue;
        }

        if emitted == 0 {
            buf.write_str(" WHERE");
        } else {
            buf.write_char(' ');
            buf.write_str(p.connective.as_str());
        }
        buf.write_char(' ');
        buf.write_str(&d.quote_identifier(&p.column));

        match &p.value {
            SqlValue::List(items) => {
                let mut encoded = String::new();
                encode_list(&mut encoded, d, items, esc);
                buf.write_str(" IN (");
                buf.write_str(&encoded);
                buf.write_char(')');
            }
            v => {
                buf.write_str(&p.operator);
                buf.write_str(&d.encode(v, esc));
            }
        }
        emitted += 1;
    }
}

fn build_select<D: Dialect + ?Sized>(d: &D, st: &Statement, esc: &dyn Escape) -> String {
    let mut buf = StringBuilder::new();
    buf.write_str("SELECT ");
    if st.selected_columns().is_empty() {
        buf.write_char('*');
    } else {
        buf.write_joined(st.selected_columns(), ",");
    }
    buf.write_str(" FROM ");
    buf.write_str(st.table());
    write_where(&mut buf, d, st.predicates(), esc);

    if let Some(g) = st.group_key().filter(|g| !g.is_empty()) {
        buf.write_str(" GROUP BY ");
        buf.write_str(&d.quote_identifier(g));
    }

    for (i, (col, dir)) in st.orderings().iter().enumerate() {
        if i == 0 {
            buf.write_str(" ORDER BY ");
        } else {
            buf.write_char(',');
        }
        buf.write_str(&d.quote_identifier(col));
        if *dir == Direction::Desc {
            buf.write_str(" DESC");
        }
    }

    let window = st.limit_window();
    if window.is_set() {
        buf.write_str(&d.limit_clause(window.offset, window.row_count()));
    }
    buf.finish()
}

fn build_update<D: Dialect + ?Sized>(d: &D, st: &Statement, esc: &dyn Escape) -> String {
    if st.assignments().is_empty() {
        return String::new();
    }
    let mut buf = StringBuilder::new();
    buf.write_str("UPDATE ");
    buf.write_str(st.table());
    buf.write_str(" SET");
    for (i, (col, value)) in st.assignments().iter().enumerate() {
        if i > 0 {
            buf.write_char(',');
        }
        buf.write_char(' ');
        buf.write_str(&d.quote_identifier(col));
        buf.write_char('=');
        buf.write_str(&d.encode(value, esc));
    }
    write_where(&mut buf, d, st.predicates(), esc);
    buf.finish()
}

/// 列名取自第一行；后续行按位置读取值，缺失的位置写 `null`，多余的值被忽略。
fn build_insert<D: Dialect + ?Sized>(d: &D, st: &Statement, esc: &dyn Escape) -> String {
    let Some(first) = st.rows().first() else {
        return String::new();
    };
    let num_cols = first.len();

    let mut buf = StringBuilder::new();
    buf.write_str("INSERT INTO ");
    buf.write_str(st.table());
    buf.write_str(" (");
    buf.write_joined(first.keys(), ",");
    buf.write_str(") VALUES ");

    for (i, row) in st.rows().iter().enumerate() {
        if i > 0 {
            buf.write_char(',');
        }
        let mut values = row.values();
        let encoded = (0..num_cols).map(|_| match values.next() {
            Some(v) => d.encode(v, esc),
            None => d.encode(&SqlValue::Null, esc),
        });
        buf.write_char('(');
        buf.write_joined(encoded, ",");
        buf.write_char(')');
    }
    buf.finish()
}

fn build_delete<D: Dialect + ?Sized>(d: &D, st: &Statement, esc: &dyn Escape) -> String {
    let mut buf = StringBuilder::new();
    buf.write_str("DELETE FROM ");
    buf.write_str(st.table());
    write_where(&mut buf, d, st.predicates(), esc);
    buf.finish()
}

fn build_count<D: Dialect + ?Sized>(d: &D, st: &Statement, esc: &dyn Escape) -> String {
    let mut buf = StringBuilder::new();
    buf.write_str("SELECT COUNT(*) AS c FROM ");
    buf.write_str(st.table());
    write_where(&mut buf, d, st.predicates(), esc);
    buf.finish()
}
