//! SQL Flavor（方言）：全局默认方言配置与方言实例的选择。

use crate::conn::Escape;
use crate::dialect::Dialect;
use crate::encode::{backslash_escape, double_quote_escape};
use crate::mysql::MySql;
use crate::postgres::Postgres;
use crate::sqlite::Sqlite;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
}

static DEFAULT_FLAVOR: AtomicU8 = AtomicU8::new(Flavor::MySQL as u8);
static DEFAULT_FLAVOR_LOCK: Mutex<()> = Mutex::new(());

impl Flavor {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::PostgreSQL,
            2 => Self::SQLite,
            _ => Self::MySQL,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    /// 该方言对应的编译器实例。
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::MySQL => Box::new(MySql),
            Self::PostgreSQL => Box::new(Postgres),
            Self::SQLite => Box::new(Sqlite),
        }
    }

    /// 为标识符加引号，名字里出现的引号字符写两次。
    pub fn quote(self, name: &str) -> String {
        let q = match self {
            Self::MySQL => '`',
            Self::PostgreSQL | Self::SQLite => '"',
        };
        let mut out = String::with_capacity(name.len() + 2);
        out.push(q);
        for ch in name.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
        out
    }
}

/// 获取当前全局默认 Flavor。
pub fn default_flavor() -> Flavor {
    Flavor::from_u8(DEFAULT_FLAVOR.load(Ordering::Relaxed))
}

/// 设置全局默认 Flavor，返回旧值。
pub fn set_default_flavor(flavor: Flavor) -> Flavor {
    let old = DEFAULT_FLAVOR.swap(flavor.to_u8(), Ordering::Relaxed);
    Flavor::from_u8(old)
}

/// 修改全局默认 Flavor 的 RAII guard（会持有一个全局锁，避免并行测试互相干扰）。
pub struct DefaultFlavorGuard {
    _lock: MutexGuard<'static, ()>,
    old: Flavor,
}

impl Drop for DefaultFlavorGuard {
    fn drop(&mut self) {
        set_default_flavor(self.old);
    }
}

/// 在一个作用域内临时设置 DefaultFlavor，并保证退出作用域后自动恢复。
pub fn set_default_flavor_scoped(flavor: Flavor) -> DefaultFlavorGuard {
    let lock = DEFAULT_FLAVOR_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_flavor(flavor);
    DefaultFlavorGuard { _lock: lock, old }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        };
        f.write_str(s)
    }
}

/// 无连接时使用方言内置的转义规则，便于离线编译语句。
impl Escape for Flavor {
    fn escape_string(&self, raw: &str) -> String {
        match self {
            Self::MySQL | Self::PostgreSQL => backslash_escape(raw),
            Self::SQLite => double_quote_escape(raw),
        }
    }

    fn flavor(&self) -> Option<Flavor> {
        Some(*self)
    }
}
