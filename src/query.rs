use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::catalogue;
use crate::error::{OmniError, Result};
use crate::settings::DEFAULT_SPACECRAFT;

/// Output layout of the list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Keep the column-name header row.
    #[default]
    Pandas,
    /// Drop the header row so the file loads as a bare numeric table.
    Numpy,
}

impl Style {
    pub fn suppresses_header(self) -> bool {
        matches!(self, Style::Numpy)
    }

    /// Parse `s`, falling back to the default style on an unknown value.
    pub fn resolve(s: &str) -> Style {
        s.parse().unwrap_or_else(|e: OmniError| {
            warn!("{}. Taking default style: {}", e, Style::default());
            Style::default()
        })
    }
}

impl FromStr for Style {
    type Err = OmniError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pandas" => Ok(Style::Pandas),
            "numpy" => Ok(Style::Numpy),
            other => Err(OmniError::UnknownStyle(other.to_string())),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Pandas => f.write_str("pandas"),
            Style::Numpy => f.write_str("numpy"),
        }
    }
}

/// A validated request for one time window.
///
/// `start` and `stop` are date markers in `YYYYMMDD` or `YYYYDDD` form and
/// are passed through to the server untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub start: u32,
    pub stop: u32,
    pub variables: Vec<i32>,
    pub spacecraft: String,
}

impl QueryParams {
    pub fn new(start: u32, stop: u32, variables: Vec<i32>) -> Result<Self> {
        Self::with_spacecraft(start, stop, variables, DEFAULT_SPACECRAFT)
    }

    pub fn with_spacecraft(
        start: u32,
        stop: u32,
        variables: Vec<i32>,
        spacecraft: &str,
    ) -> Result<Self> {
        catalogue::validate(&variables)?;
        if start > stop {
            return Err(OmniError::InvalidParameters(format!(
                "start date {} must be before end date {}",
                start, stop
            )));
        }
        Ok(QueryParams {
            start,
            stop,
            variables,
            spacecraft: spacecraft.to_string(),
        })
    }

    /// Build the hourly retrieve URL, one `vars` parameter per variable in
    /// the order given.
    pub fn url(&self, base_url: &str) -> String {
        let vars: String = self
            .variables
            .iter()
            .map(|v| format!("&vars={}", v))
            .collect();
        format!(
            "{}?activity=retrieve&res=hour&spacecraft={}&start_date={}&end_date={}{}",
            base_url, self.spacecraft, self.start, self.stop, vars
        )
    }
}
