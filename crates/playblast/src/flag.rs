//! Boolean command-line values

/// Outcome of reading a boolean flag value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolArg {
    /// `yes`, `true`, `t`, `y`, `1`
    True,
    /// `no`, `false`, `f`, `n`, `0`
    False,
    /// Anything else
    Invalid(String),
}

impl BoolArg {
    /// Classify a flag value, ignoring case
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "yes" | "true" | "t" | "y" | "1" => Self::True,
            "no" | "false" | "f" | "n" | "0" => Self::False,
            _ => Self::Invalid(format!("Boolean value expected, got '{value}'")),
        }
    }

    /// Convert into a plain `bool`, or the reason the value was rejected
    pub fn into_result(self) -> Result<bool, String> {
        match self {
            Self::True => Ok(true),
            Self::False => Ok(false),
            Self::Invalid(reason) => Err(reason),
        }
    }
}

/// Parse a boolean flag value; suitable as a clap value parser
pub fn parse_bool(value: &str) -> Result<bool, String> {
    BoolArg::parse(value).into_result()
}
