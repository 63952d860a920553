//! Interactive command shell.
//!
//! Parses one line at a time into a [`Command`] and applies it to the
//! session: the loaded [`Database`], the selected symbol, the injected
//! [`Clock`] and the trade window used by windowed formulas.

use crate::adapters::csv_adapter::{self, SymbolTrade};
use crate::domain::error::StocksError;
use crate::domain::formulas::FormulaResult;
use crate::domain::registry::{self, Evaluator, FormulaSpec, FORMULAS};
use crate::domain::stock::{Database, Stock};
use crate::domain::trade::{Side, Trade};
use crate::ports::clock_port::Clock;
use crate::ports::database_port::DatabasePort;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "(stockscli) ";
pub const DEFAULT_INTRO: &str = "Welcome to StocksCLI. Type help or ? to list available operations.";
pub const FAREWELL: &str = "Thank you for using StocksCLI. Exiting...";

struct CommandHelp {
    name: &'static str,
    usage: &'static str,
    summary: &'static str,
}

const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "load",
        usage: "load <path.yml>",
        summary: "replace the in-memory database with the contents of a YAML file",
    },
    CommandHelp {
        name: "import",
        usage: "import <path.csv>",
        summary: "append trades from a CSV file (symbol,timestamp,quantity,side,price)",
    },
    CommandHelp {
        name: "selectsym",
        usage: "selectsym <SYMBOL>",
        summary: "select the stock symbol formulas and records apply to",
    },
    CommandHelp {
        name: "showsym",
        usage: "showsym",
        summary: "show available stock symbols and the current selection",
    },
    CommandHelp {
        name: "calculate",
        usage: "calculate show | calculate <formula> [price]",
        summary: "list formulas, or evaluate one",
    },
    CommandHelp {
        name: "record",
        usage: "record <quantity> <buy|sell> <price>",
        summary: "record a trade for the selected stock, stamped with the current time",
    },
    CommandHelp {
        name: "showdb",
        usage: "showdb [SYMBOL]",
        summary: "dump the database, or a single stock, as YAML",
    },
    CommandHelp {
        name: "help",
        usage: "help [command]",
        summary: "list commands, or describe one",
    },
    CommandHelp {
        name: "exit",
        usage: "exit",
        summary: "leave the shell; all recorded data is discarded",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(PathBuf),
    Import(PathBuf),
    SelectSym(String),
    ShowSym,
    CalculateShow,
    Calculate {
        formula: &'static FormulaSpec,
        price: Option<f64>,
    },
    Record {
        quantity: u64,
        side: Side,
        price: f64,
    },
    ShowDb(Option<String>),
    Help(Option<String>),
    Exit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, StocksError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head {
        "load" => Command::Load(single_arg(&args, "load <path.yml>")?.into()),
        "import" => Command::Import(single_arg(&args, "import <path.csv>")?.into()),
        "selectsym" => Command::SelectSym(single_arg(&args, "selectsym <SYMBOL>")?.to_string()),
        "showsym" => {
            no_args(&args, "showsym")?;
            Command::ShowSym
        }
        "calculate" => parse_calculate(&args)?,
        "record" => parse_record(&args)?,
        "showdb" => match args.as_slice() {
            [] => Command::ShowDb(None),
            [symbol] => Command::ShowDb(Some(symbol.to_string())),
            _ => return Err(StocksError::usage("showdb [SYMBOL]")),
        },
        "help" | "?" => match args.as_slice() {
            [] => Command::Help(None),
            [topic] => Command::Help(Some(topic.to_string())),
            _ => return Err(StocksError::usage("help [command]")),
        },
        "exit" | "quit" => Command::Exit,
        other => return Err(StocksError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, StocksError> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(StocksError::usage(usage)),
    }
}

fn no_args(args: &[&str], usage: &str) -> Result<(), StocksError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(StocksError::usage(usage))
    }
}

fn parse_calculate(args: &[&str]) -> Result<Command, StocksError> {
    const USAGE: &str = "calculate show | calculate <formula> [price]";
    let (name, price) = match args {
        ["show"] => return Ok(Command::CalculateShow),
        [name] => (*name, None),
        [name, price] => (*name, Some(*price)),
        _ => return Err(StocksError::usage(USAGE)),
    };

    let spec = registry::lookup(name).ok_or_else(|| StocksError::UnknownFormula(name.into()))?;
    let price = match (spec.evaluator.needs_price(), price) {
        (true, Some(raw)) => Some(parse_price(raw)?),
        (false, None) => None,
        _ => return Err(StocksError::usage(spec.usage)),
    };
    Ok(Command::Calculate {
        formula: spec,
        price,
    })
}

fn parse_record(args: &[&str]) -> Result<Command, StocksError> {
    let [quantity, side, price] = args else {
        return Err(StocksError::usage("record <quantity> <buy|sell> <price>"));
    };
    let quantity = match quantity.parse::<u64>() {
        Ok(q) if q > 0 => q,
        _ => {
            return Err(StocksError::invalid(
                "quantity",
                format!("expected a positive integer, got '{quantity}'"),
            ));
        }
    };
    let side = side
        .parse::<Side>()
        .map_err(|reason| StocksError::invalid("side", reason))?;
    let price = parse_price(price)?;
    if price < 0.0 {
        return Err(StocksError::invalid(
            "price",
            format!("expected a non-negative number, got '{price}'"),
        ));
    }
    Ok(Command::Record {
        quantity,
        side,
        price,
    })
}

fn parse_price(raw: &str) -> Result<f64, StocksError> {
    match raw.parse::<f64>() {
        Ok(p) if p.is_finite() => Ok(p),
        _ => Err(StocksError::invalid(
            "price",
            format!("expected a number, got '{raw}'"),
        )),
    }
}

/// Render a formula outcome the way it is printed to the user.
pub fn format_result(result: FormulaResult) -> String {
    match result {
        Ok(value) => format!("{value:?}"),
        Err(e) => e.to_string(),
    }
}

/// Outcome of a single command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Output(String),
    Silent,
    Exit,
}

pub struct Shell {
    database: Database,
    selected: Option<String>,
    window_seconds: f64,
    clock: Box<dyn Clock>,
    store: Box<dyn DatabasePort>,
}

impl Shell {
    pub fn new(clock: Box<dyn Clock>, store: Box<dyn DatabasePort>, window_seconds: f64) -> Self {
        Self {
            database: Database::new(),
            selected: None,
            window_seconds,
            clock,
            store,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = database;
        self.selected = None;
        self
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Reply, StocksError> {
        match parse_command(line)? {
            Some(command) => self.dispatch(command),
            None => Ok(Reply::Silent),
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Reply, StocksError> {
        match command {
            Command::Load(path) => self.load(path),
            Command::Import(path) => self.import(path),
            Command::SelectSym(symbol) => self.select(symbol),
            Command::ShowSym => Ok(Reply::Output(self.show_symbols())),
            Command::CalculateShow => Ok(Reply::Output(show_formulas())),
            Command::Calculate { formula, price } => self.calculate(formula, price),
            Command::Record {
                quantity,
                side,
                price,
            } => self.record(quantity, side, price),
            Command::ShowDb(symbol) => self.show_db(symbol.as_deref()),
            Command::Help(topic) => help(topic.as_deref()).map(Reply::Output),
            Command::Exit => Ok(Reply::Exit),
        }
    }

    /// Read-eval-print loop. Returns on `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut out: W,
        prompt: &str,
    ) -> io::Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{prompt}")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                writeln!(out, "{FAREWELL}")?;
                return Ok(());
            }

            match self.execute_line(&line) {
                Ok(Reply::Output(text)) => writeln!(out, "{}", text.trim_end())?,
                Ok(Reply::Silent) => {}
                Ok(Reply::Exit) => {
                    writeln!(out, "{FAREWELL}")?;
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(input = line.trim(), error = %e, "command rejected");
                    writeln!(out, "error: {e}")?;
                }
            }
        }
    }

    fn load(&mut self, path: PathBuf) -> Result<Reply, StocksError> {
        let database = self.store.load(&path)?;
        tracing::info!(
            path = %path.display(),
            stocks = database.len(),
            trades = database.trade_count(),
            "loaded stock database"
        );
        let message = format!(
            "Loaded {} stocks ({} trades) from {}",
            database.len(),
            database.trade_count(),
            path.display()
        );
        self.database = database;
        self.selected = None;
        Ok(Reply::Output(message))
    }

    fn import(&mut self, path: PathBuf) -> Result<Reply, StocksError> {
        if self.database.is_empty() {
            return Err(StocksError::NoData);
        }
        let trades = csv_adapter::read_trades(&path)?;
        check_import(&self.database, &trades, &path.display().to_string())?;
        let count = trades.len();
        for item in trades {
            if let Some(stock) = self.database.get_mut(&item.symbol) {
                stock.record(item.trade);
            }
        }
        tracing::info!(path = %path.display(), trades = count, "imported trades");
        Ok(Reply::Output(format!(
            "Imported {count} trades from {}",
            path.display()
        )))
    }

    fn select(&mut self, symbol: String) -> Result<Reply, StocksError> {
        if !self.database.contains(&symbol) {
            return Err(StocksError::UnknownSymbol(symbol));
        }
        tracing::debug!(symbol = %symbol, "selected stock");
        self.selected = Some(symbol);
        Ok(Reply::Silent)
    }

    fn show_symbols(&self) -> String {
        let symbols: Vec<&str> = self.database.symbols().collect();
        format!(
            "Available stock symbols: {}\nCurrently selected stock symbol: {}",
            if symbols.is_empty() {
                "(none)".to_string()
            } else {
                symbols.join(", ")
            },
            self.selected.as_deref().unwrap_or("(none)")
        )
    }

    fn selected_stock(&self) -> Result<&Stock, StocksError> {
        if self.database.is_empty() {
            return Err(StocksError::NoData);
        }
        let symbol = self
            .selected
            .as_deref()
            .ok_or(StocksError::NoSymbolSelected)?;
        self.database
            .get(symbol)
            .ok_or_else(|| StocksError::UnknownSymbol(symbol.to_string()))
    }

    fn calculate(&self, spec: &FormulaSpec, price: Option<f64>) -> Result<Reply, StocksError> {
        let result = match spec.evaluator {
            Evaluator::Priced(f) => {
                let price = price.ok_or_else(|| StocksError::usage(spec.usage))?;
                f(self.selected_stock()?, price)
            }
            Evaluator::Windowed(f) => {
                let stock = self.selected_stock()?;
                f(&stock.records, self.clock.now(), self.window_seconds)
            }
            Evaluator::Market(f) => {
                if self.database.is_empty() {
                    return Err(StocksError::NoData);
                }
                f(&self.database)
            }
        };

        tracing::debug!(formula = spec.name, ?price, ?result, "evaluated formula");
        Ok(Reply::Output(format_result(result)))
    }

    fn record(&mut self, quantity: u64, side: Side, price: f64) -> Result<Reply, StocksError> {
        let now = self.clock.now();
        let symbol = self
            .selected
            .clone()
            .ok_or(StocksError::NoSymbolSelected)?;
        let stock = self
            .database
            .get_mut(&symbol)
            .ok_or_else(|| StocksError::UnknownSymbol(symbol.clone()))?;

        // Keep timestamps non-decreasing even if the clock steps back.
        let timestamp = stock
            .records
            .last()
            .map_or(now, |last| now.max(last.timestamp));
        let trade = Trade::new(timestamp, quantity, side, price);
        stock.record(trade);

        tracing::debug!(symbol = %symbol, ?trade, "recorded trade");
        Ok(Reply::Output(format!(
            "Recorded {side} {quantity} {symbol} @ {price:?}"
        )))
    }

    fn show_db(&self, symbol: Option<&str>) -> Result<Reply, StocksError> {
        let text = match symbol {
            None => self.store.dump_database(&self.database)?,
            Some(symbol) => {
                let stock = self
                    .database
                    .get(symbol)
                    .ok_or_else(|| StocksError::UnknownSymbol(symbol.to_string()))?;
                self.store.dump_stock(stock)?
            }
        };
        Ok(Reply::Output(text))
    }
}

/// Every imported row must name a known stock and must not be older than
/// the trade before it in that stock's records, existing or imported.
fn check_import(
    database: &Database,
    trades: &[SymbolTrade],
    origin: &str,
) -> Result<(), StocksError> {
    let mut latest: HashMap<&str, f64> = HashMap::new();
    for (row, item) in trades.iter().enumerate() {
        let stock = database
            .get(&item.symbol)
            .ok_or_else(|| StocksError::UnknownSymbol(item.symbol.clone()))?;
        let previous = latest
            .get(item.symbol.as_str())
            .copied()
            .or_else(|| stock.records.last().map(|t| t.timestamp));
        let timestamp = item.trade.timestamp;
        if previous.is_some_and(|prev| timestamp < prev) {
            return Err(StocksError::DataParse {
                path: origin.to_string(),
                reason: format!(
                    "row {}: timestamp {timestamp:?} is older than the previous {} trade",
                    row + 1,
                    item.symbol
                ),
            });
        }
        latest.insert(&item.symbol, timestamp);
    }
    Ok(())
}

fn show_formulas() -> String {
    let mut lines = vec!["Available formulas:".to_string()];
    for spec in FORMULAS {
        lines.push(format!("  {:<28} {}", spec.name, spec.summary));
        lines.push(format!("  {:<28} usage: {}", "", spec.usage));
    }
    lines.join("\n")
}

fn help(topic: Option<&str>) -> Result<String, StocksError> {
    match topic {
        None => {
            let mut lines = vec!["Commands:".to_string()];
            lines.extend(
                COMMANDS
                    .iter()
                    .map(|c| format!("  {:<10} {}", c.name, c.summary)),
            );
            lines.push("Type help <command> for usage.".to_string());
            Ok(lines.join("\n"))
        }
        Some(name) => COMMANDS
            .iter()
            .find(|c| c.name == name || (name == "quit" && c.name == "exit"))
            .map(|c| format!("{}\n  {}", c.usage, c.summary))
            .ok_or_else(|| StocksError::UnknownCommand(name.to_string())),
    }
}
