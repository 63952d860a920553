//! Stock database load/dump port trait.

use crate::domain::error::StocksError;
use crate::domain::stock::{Database, Stock};
use std::path::Path;

pub trait DatabasePort {
    fn load(&self, path: &Path) -> Result<Database, StocksError>;

    fn dump_database(&self, database: &Database) -> Result<String, StocksError>;

    fn dump_stock(&self, stock: &Stock) -> Result<String, StocksError>;
}
