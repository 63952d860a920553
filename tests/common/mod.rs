#![allow(dead_code)]

use std::io::{Cursor, Write};
use stockscli::adapters::yaml_adapter::YamlAdapter;
use stockscli::domain::stock::{Database, Stock};
use stockscli::domain::trade::{Side, Trade};
use stockscli::domain::trade_window::DEFAULT_WINDOW_SECONDS;
use stockscli::ports::clock_port::FixedClock;
use stockscli::shell::Shell;

/// Frozen "now" used across the shell tests.
pub const NOW: f64 = 1_526_575_117.03416;

pub const SAMPLE_YAML: &str = r#"
TEA:
  type: common
  last_dividend: 0
  fixed_dividend: null
  par_value: 100
POP:
  type: common
  last_dividend: 8
  fixed_dividend: null
  par_value: 100
ALE:
  type: common
  last_dividend: 23
  fixed_dividend: null
  par_value: 60
GIN:
  type: preferred
  last_dividend: 8
  fixed_dividend: 0.02
  par_value: 100
JOE:
  type: common
  last_dividend: 13
  fixed_dividend: null
  par_value: 250
"#;

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn sample_database() -> Database {
    YamlAdapter::new().parse(SAMPLE_YAML, "sample").unwrap()
}

pub fn trade(timestamp: f64, quantity: u64, side: Side, price: f64) -> Trade {
    Trade::new(timestamp, quantity, side, price)
}

/// ALE and GIN each carry three trades inside the window ending at [`NOW`].
pub fn database_with_trades() -> Database {
    let mut db = sample_database();
    let ale: &mut Stock = db.get_mut("ALE").unwrap();
    ale.record(trade(1_526_575_101.733513, 2, Side::Buy, 200.0));
    ale.record(trade(1_526_575_109.240374, 1, Side::Buy, 300.0));
    ale.record(trade(1_526_575_117.03415, 5, Side::Sell, 100.0));
    let gin = db.get_mut("GIN").unwrap();
    gin.record(trade(1_526_575_101.733513, 2, Side::Buy, 200.0));
    gin.record(trade(1_526_575_109.240374, 3, Side::Sell, 300.0));
    gin.record(trade(1_526_575_117.03415, 4, Side::Buy, 100.0));
    db
}

pub fn shell_at(now: f64) -> Shell {
    Shell::new(
        Box::new(FixedClock(now)),
        Box::new(YamlAdapter::new()),
        DEFAULT_WINDOW_SECONDS,
    )
}

/// Feed `script` to a shell and return everything it printed.
pub fn run_script(shell: &mut Shell, script: &str) -> String {
    let mut out = Vec::new();
    shell
        .run(Cursor::new(script.as_bytes()), &mut out, "> ")
        .unwrap();
    String::from_utf8(out).unwrap()
}
