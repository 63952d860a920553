//! Shell, data and configuration error types.
//!
//! Formula failures live in [`crate::domain::formulas::FormulaError`]; they
//! are results, not faults, and never reach this type.

/// Top-level error type for stockscli.
#[derive(Debug, thiserror::Error)]
pub enum StocksError {
    #[error("cannot read {path}: {reason}")]
    DataFile { path: String, reason: String },

    #[error("malformed data in {path}: {reason}")]
    DataParse { path: String, reason: String },

    #[error("cannot serialize data: {reason}")]
    DataDump { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown stock symbol: {0}")]
    UnknownSymbol(String),

    #[error("no stock symbol selected (use selectsym)")]
    NoSymbolSelected,

    #[error("no data loaded (use load)")]
    NoData,

    #[error("unknown command: {0} (type help for a list)")]
    UnknownCommand(String),

    #[error("unknown formula: {0} (type calculate show for a list)")]
    UnknownFormula(String),

    #[error("usage: {usage}")]
    Usage { usage: String },

    #[error("invalid {what}: {reason}")]
    InvalidArgument { what: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StocksError {
    pub fn usage(usage: impl Into<String>) -> Self {
        StocksError::Usage {
            usage: usage.into(),
        }
    }

    pub fn invalid(what: impl Into<String>, reason: impl Into<String>) -> Self {
        StocksError::InvalidArgument {
            what: what.into(),
            reason: reason.into(),
        }
    }
}

impl From<&StocksError> for std::process::ExitCode {
    fn from(err: &StocksError) -> Self {
        let code: u8 = match err {
            StocksError::Io(_) => 1,
            StocksError::ConfigParse { .. } | StocksError::ConfigInvalid { .. } => 2,
            StocksError::DataFile { .. }
            | StocksError::DataParse { .. }
            | StocksError::DataDump { .. } => 3,
            StocksError::UnknownSymbol(_)
            | StocksError::NoSymbolSelected
            | StocksError::NoData
            | StocksError::UnknownCommand(_)
            | StocksError::UnknownFormula(_)
            | StocksError::Usage { .. }
            | StocksError::InvalidArgument { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
