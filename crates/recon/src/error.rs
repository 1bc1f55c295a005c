use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (missing table, bad layout, wrong job kind).
    ConfigValidation(String),
    /// A column reference that does not name a spreadsheet column.
    InvalidColumn(String),
    /// Row window where start < 1 or start > end.
    InvalidWindow { start: u32, end: u32 },
    /// Row window extending past the sheet's populated extent.
    WindowOutOfBounds { start: u32, end: u32, rows: u32 },
    /// IO error (file read/write at the adapter edge).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidColumn(col) => write!(f, "invalid column reference '{col}'"),
            Self::InvalidWindow { start, end } => {
                write!(f, "invalid row window [{start}, {end}]")
            }
            Self::WindowOutOfBounds { start, end, rows } => {
                write!(
                    f,
                    "row window [{start}, {end}] is out of bounds (sheet has {rows} row(s))"
                )
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
