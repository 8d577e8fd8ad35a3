use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::{OmniError, Result};
use crate::parser::{self, segments, segments::SplitSummary};
use crate::query::{QueryParams, Style};
use crate::settings::Settings;
use crate::transport::Transport;

/// Outcome of a complete download.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub url: String,
    pub attempts: u32,
    pub format_lines: usize,
    pub data_lines: usize,
    pub column_names: BTreeMap<String, String>,
    pub format_path: PathBuf,
    pub list_path: PathBuf,
}

/// The `.fmt` / `.lst` pair derived from an output name without extension.
#[derive(Debug, Clone)]
struct OutputPaths {
    format: PathBuf,
    list: PathBuf,
}

impl OutputPaths {
    fn new(output: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut name = OsString::from(output.as_os_str());
            name.push(suffix);
            PathBuf::from(name)
        };
        OutputPaths {
            format: with_suffix(".fmt"),
            list: with_suffix(".lst"),
        }
    }

    /// Truncate both files and stream `payload` into them.
    fn write(&self, payload: &str, style: Style) -> Result<SplitSummary> {
        let mut fmt = BufWriter::new(File::create(&self.format)?);
        let mut lst = BufWriter::new(File::create(&self.list)?);
        let summary = segments::split_payload(payload, style, &mut fmt, &mut lst)?;
        fmt.flush()?;
        lst.flush()?;
        Ok(summary)
    }

    fn discard(&self) {
        for path in [&self.format, &self.list] {
            if let Err(e) = fs::remove_file(path) {
                warn!("Could not remove partial output {}: {}", path.display(), e);
            }
        }
    }
}

/// Downloads OMNIWeb listings and splits them into a format and a list file.
///
/// The list file loads directly with whitespace-delimited readers; its first
/// three columns are always year, day of year and hour.
pub struct Reader<T> {
    transport: T,
    settings: Settings,
}

impl<T: Transport> Reader<T> {
    pub fn new(transport: T, settings: Settings) -> Self {
        Reader {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch `variables` between `start` and `stop` and write
    /// `<output>.fmt` and `<output>.lst`.
    ///
    /// `style` is `"pandas"` (keep the column header) or `"numpy"` (drop it);
    /// anything else falls back to `"pandas"` with a warning.
    pub fn fetch_to_file(
        &self,
        start: u32,
        stop: u32,
        variables: &[i32],
        output: impl AsRef<Path>,
        style: &str,
    ) -> Result<FetchReport> {
        let query = QueryParams::with_spacecraft(
            start,
            stop,
            variables.to_vec(),
            &self.settings.spacecraft,
        )?;
        let style = Style::resolve(style);
        self.fetch_query(&query, output.as_ref(), style)
    }

    pub fn fetch_query(&self, query: &QueryParams, output: &Path, style: Style) -> Result<FetchReport> {
        let url = query.url(&self.settings.base_url);
        let paths = OutputPaths::new(output);
        let max_attempts = self.settings.max_attempts.max(1);
        let mut files_written = false;
        let mut data_lines = 0;

        for attempt in 1..=max_attempts {
            let payload = match self.transport.fetch(&url).map(|raw| parser::extract(&raw)) {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    error!("Something went wrong with the request. No data found. Terminating.");
                    if files_written {
                        paths.discard();
                    }
                    return Err(OmniError::EmptyResponse { attempt });
                }
                Err(e) => {
                    if files_written {
                        paths.discard();
                    }
                    return Err(e);
                }
            };

            files_written = true;
            let summary = paths.write(&payload, style)?;
            data_lines = summary.data_lines;

            if data_lines >= self.settings.min_data_lines {
                info!(
                    "Wrote {} format line(s) to {} and {} data line(s) to {}",
                    summary.format_lines,
                    paths.format.display(),
                    data_lines,
                    paths.list.display()
                );
                return Ok(FetchReport {
                    url,
                    attempts: attempt,
                    format_lines: summary.format_lines,
                    data_lines,
                    column_names: summary.column_names,
                    format_path: paths.format,
                    list_path: paths.list,
                });
            }

            if attempt < max_attempts {
                warn!(
                    "Error when downloading the data ({} data line(s)), trying again...",
                    data_lines
                );
            }
        }

        Err(OmniError::IncompleteData {
            attempts: max_attempts,
            data_lines,
        })
    }
}
