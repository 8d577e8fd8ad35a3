use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use omnireader::{catalogue, HttpTransport, Reader, Settings, Transport};

#[derive(Parser)]
#[command(name = "omnireader", about = "Download hourly OMNIWeb data into .fmt/.lst files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the variables and their corresponding number
    Vars {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch a time window and write <output>.fmt and <output>.lst
    Fetch {
        /// Start date, YYYYMMDD or YYYYDDD
        #[arg(long)]
        start: u32,
        /// End date, YYYYMMDD or YYYYDDD
        #[arg(long)]
        stop: u32,
        /// Variable numbers, e.g. 3,8 (see `vars`)
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        vars: Vec<i32>,
        /// Output name without extension
        #[arg(short, long)]
        output: PathBuf,
        /// "pandas" keeps the column header, "numpy" drops it
        #[arg(long, default_value = "pandas")]
        style: String,
        /// Override the configured spacecraft
        #[arg(long)]
        spacecraft: Option<String>,
    },
}

/// Shows a spinner while the wrapped transport blocks.
struct SpinnerTransport<T> {
    inner: T,
}

impl<T: Transport> Transport for SpinnerTransport<T> {
    fn fetch(&self, url: &str) -> omnireader::Result<String> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Downloading database...");
        pb.enable_steady_tick(Duration::from_millis(100));
        let result = self.inner.fetch(url);
        pb.finish_and_clear();
        result
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Vars { json } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                let entries: Vec<_> = catalogue::entries().collect();
                serde_json::to_writer_pretty(&mut out, &entries)?;
                writeln!(out)?;
            } else {
                catalogue::variables_info(&mut out)?;
            }
        }
        Commands::Fetch {
            start,
            stop,
            vars,
            output,
            style,
            spacecraft,
        } => {
            let mut settings = Settings::load()?;
            if let Some(sc) = spacecraft {
                settings.spacecraft = sc;
            }
            let transport = SpinnerTransport {
                inner: HttpTransport::new(&settings)?,
            };
            let reader = Reader::new(transport, settings);

            let t0 = Instant::now();
            let report = reader.fetch_to_file(start, stop, &vars, &output, &style)?;
            println!(
                "Wrote {} ({} lines) and {} ({} lines) in {:.1}s after {} attempt(s)",
                report.format_path.display(),
                report.format_lines,
                report.list_path.display(),
                report.data_lines,
                t0.elapsed().as_secs_f64(),
                report.attempts
            );
            for (index, name) in &report.column_names {
                println!("  {:>3} | {}", index, name);
            }
        }
    }

    Ok(())
}
