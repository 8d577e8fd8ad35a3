use std::collections::BTreeMap;
use std::io::{self, Write};

use tracing::debug;

use crate::query::Style;

/// Which half of the payload the splitter is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Format,
    Data,
}

/// One reformatted line of the format segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRecord {
    /// Leading token of the line, normally the variable's column number.
    pub index: String,
    /// The rest of the line, tokens rejoined with single spaces.
    pub description: String,
}

impl FormatRecord {
    /// Description text up to the first comma.
    pub fn short_name(&self) -> &str {
        self.description.split(',').next().unwrap_or_default()
    }
}

/// Drop the leading index token of a format line.
///
/// Splitting is on single spaces, so runs of spaces inside the description
/// survive the rejoin. A blank line yields an empty description.
pub fn reformat_line(line: &str) -> FormatRecord {
    let mut tokens = line.trim().split(' ');
    let index = tokens.next().unwrap_or_default().to_string();
    let description = tokens.collect::<Vec<_>>().join(" ");
    FormatRecord { index, description }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub format_lines: usize,
    pub data_lines: usize,
    /// Column number to short variable name, as announced by the format block.
    pub column_names: BTreeMap<String, String>,
}

/// Two-state line router; see [`split_payload`].
struct Splitter {
    segment: Segment,
    skip_header: bool,
    style: Style,
    summary: SplitSummary,
}

impl Splitter {
    fn new(style: Style) -> Self {
        Splitter {
            segment: Segment::Format,
            skip_header: true,
            style,
            summary: SplitSummary::default(),
        }
    }

    fn feed<F: Write, L: Write>(&mut self, line: &str, fmt: &mut F, lst: &mut L) -> io::Result<()> {
        match self.segment {
            Segment::Format if line.is_empty() => {
                self.segment = Segment::Data;
                self.skip_header = true;
            }
            Segment::Format if self.skip_header => {
                debug!("Skipping format preamble: {:?}", line);
                self.skip_header = false;
            }
            Segment::Format => {
                let record = reformat_line(line);
                writeln!(fmt, "{}", record.description)?;
                self.summary
                    .column_names
                    .insert(record.index.clone(), record.short_name().to_string());
                self.summary.format_lines += 1;
            }
            Segment::Data if line.is_empty() => {}
            Segment::Data if self.skip_header && self.style.suppresses_header() => {
                debug!("Skipping column header: {:?}", line);
                self.skip_header = false;
            }
            Segment::Data => {
                writeln!(lst, "{}", line)?;
                self.summary.data_lines += 1;
            }
        }
        Ok(())
    }
}

/// Route each line of `payload` to the format or the list sink.
///
/// The first empty line separates the format block from the data block and
/// is written nowhere. The first format line is a preamble and is dropped;
/// the remaining ones lose their leading index token. Non-empty data lines are
/// copied verbatim, except the column-name row when `style` suppresses it.
pub fn split_payload<F: Write, L: Write>(
    payload: &str,
    style: Style,
    fmt: &mut F,
    lst: &mut L,
) -> io::Result<SplitSummary> {
    let mut splitter = Splitter::new(style);
    for line in payload.split('\n') {
        splitter.feed(line, fmt, lst)?;
    }
    Ok(splitter.summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(payload: &str, style: Style) -> (String, String, SplitSummary) {
        let mut fmt = Vec::new();
        let mut lst = Vec::new();
        let summary = split_payload(payload, style, &mut fmt, &mut lst).unwrap();
        (
            String::from_utf8(fmt).unwrap(),
            String::from_utf8(lst).unwrap(),
            summary,
        )
    }

    #[test]
    fn reformat_strips_index() {
        let rec = reformat_line("12 description, with, commas");
        assert_eq!(rec.index, "12");
        assert_eq!(rec.description, "description, with, commas");
        assert_eq!(rec.short_name(), "description");
    }

    #[test]
    fn reformat_trims_and_keeps_inner_spacing() {
        let rec = reformat_line("  4  Bartels  rotation number  ");
        assert_eq!(rec.index, "4");
        assert_eq!(rec.description, " Bartels  rotation number");
    }

    #[test]
    fn reformat_blank_line_is_empty() {
        let rec = reformat_line("   ");
        assert_eq!(rec.index, "");
        assert_eq!(rec.description, "");
        let rec = reformat_line("7");
        assert_eq!(rec.index, "7");
        assert_eq!(rec.description, "");
    }

    #[test]
    fn pandas_keeps_column_header() {
        let (fmt, lst, summary) = run("H\n1 L1\n2 L2\n\nC\nD1\nD2", Style::Pandas);
        assert_eq!(fmt, "L1\nL2\n");
        assert_eq!(lst, "C\nD1\nD2\n");
        assert_eq!(summary.format_lines, 2);
        assert_eq!(summary.data_lines, 3);
    }

    #[test]
    fn numpy_drops_column_header() {
        let (fmt, lst, summary) = run("H\n1 L1\n2 L2\n\nC\nD1\nD2", Style::Numpy);
        assert_eq!(fmt, "L1\nL2\n");
        assert_eq!(lst, "D1\nD2\n");
        assert_eq!(summary.data_lines, 2);
    }

    #[test]
    fn column_names_use_text_before_comma() {
        let (_, _, summary) = run(
            "Selected parameters:\n 4 Bartels rotation number\n 5 Scalar B, nT\n\nYEAR",
            Style::Pandas,
        );
        assert_eq!(summary.column_names.len(), 2);
        assert_eq!(summary.column_names["4"], "Bartels rotation number");
        assert_eq!(summary.column_names["5"], "Scalar B");
    }

    #[test]
    fn whitespace_only_format_line_is_kept() {
        let (fmt, _, summary) = run("H\n1 A\n   \n2 B\n\nC", Style::Pandas);
        assert_eq!(fmt, "A\n\nB\n");
        assert_eq!(summary.format_lines, 3);
    }

    #[test]
    fn blank_lines_in_data_are_dropped() {
        let (fmt, lst, summary) = run("H\n1 A\n\nC\nD1\n\nD2\n", Style::Numpy);
        assert_eq!(fmt, "A\n");
        assert_eq!(lst, "D1\nD2\n");
        assert_eq!(summary.data_lines, 2);
    }

    #[test]
    fn trailing_newline_is_not_a_row() {
        let (_, lst, summary) = run(
            "Selected parameters:\n 4 Bartels rotation number\n\nYEAR DOY HR 1\n2017 1 0 2503\n",
            Style::Numpy,
        );
        assert_eq!(lst, "2017 1 0 2503\n");
        assert_eq!(summary.data_lines, 1);
    }

    #[test]
    fn no_separator_means_no_data() {
        let (fmt, lst, summary) = run("H\n1 A\n2 B", Style::Pandas);
        assert_eq!(fmt, "A\nB\n");
        assert!(lst.is_empty());
        assert_eq!(summary.data_lines, 0);
    }

    #[test]
    fn rows_round_trip_through_whitespace_split() {
        let rows = ["2017   1  0 2503   4.6", "2017   1  1 2503   4.9"];
        let payload = format!("H\n1 A\n\nYEAR DOY HR 1 2\n{}\n{}", rows[0], rows[1]);
        let (_, lst, _) = run(&payload, Style::Numpy);
        let parsed: Vec<Vec<&str>> = lst.lines().map(|l| l.split_whitespace().collect()).collect();
        let expected: Vec<Vec<&str>> = rows.iter().map(|l| l.split_whitespace().collect()).collect();
        assert_eq!(parsed, expected);
    }
}
