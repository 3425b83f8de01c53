//! MySQL 方言：反引号标识符，`LIMIT offset,count`，布尔值写作 `1`/`0`。

use crate::dialect::Dialect;
use crate::flavor::Flavor;

#[derive(Debug, Default, Clone, Copy)]
pub struct MySql;

impl Dialect for MySql {
    fn flavor(&self) -> Flavor {
        Flavor::MySQL
    }
}
