use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use company_search::excel::Workbook;
use company_search::export;
use company_search::search::{self, ResultSet, SearchOptions};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Excel file path, or '-' to read the workbook from stdin
    #[arg(required = true)]
    file_path: PathBuf,

    /// Text to look for (case-insensitive); an empty string lists every row
    query: String,

    /// Name of the column to search, matched exactly
    #[arg(long, short = 'c', default_value = search::DEFAULT_COLUMN)]
    column: String,

    /// Print the matches as JSON instead of tables
    #[arg(long, short = 'j')]
    json: bool,

    /// Also write the matches to a new .xlsx file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Give up if the search takes longer than this many seconds
    #[arg(long, short = 't')]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let bytes = read_input(&cli.file_path)?;
    let options = SearchOptions::with_column(cli.column.clone());
    let timeout = cli.timeout.map(Duration::from_secs);

    let results = run_search(bytes, cli.query.clone(), options, timeout)
        .with_context(|| format!("Search failed for {}", cli.file_path.display()))?;

    info!(
        sheets = results.len(),
        matches = results.total_matches(),
        "search finished"
    );

    if cli.json {
        let json_string = export::serialize_to_json(&export::results_to_json(&results))?;
        println!("{}", json_string);
    } else {
        print!("{}", export::render_text(&results));
    }

    if let Some(output) = &cli.output {
        export::export_xlsx(&results, output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!(path = %output.display(), "matches exported");
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    read_input_from(path, std::io::stdin().lock())
}

// '-' reads the workbook from `stdin` instead of the filesystem
fn read_input_from<R: Read>(path: &Path, mut stdin: R) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        stdin
            .read_to_end(&mut bytes)
            .context("Failed to read workbook from stdin")?;
        return Ok(bytes);
    }

    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn search_bytes(bytes: &[u8], query: &str, options: &SearchOptions) -> Result<ResultSet> {
    let workbook = Workbook::from_bytes(bytes)?;
    Ok(search::search_workbook(&workbook, query, options))
}

fn run_search(
    bytes: Vec<u8>,
    query: String,
    options: SearchOptions,
    timeout: Option<Duration>,
) -> Result<ResultSet> {
    run_with_timeout(timeout, move || search_bytes(&bytes, &query, &options))
}

// The job cannot be interrupted, so the cut-off waits on a worker thread and
// abandons it on timeout.
fn run_with_timeout<T, F>(timeout: Option<Duration>, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let Some(timeout) = timeout else {
        return job();
    };

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // the receiver is gone once the wait has timed out
        let _ = tx.send(job());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            anyhow::bail!("Search timed out after {:?}", timeout)
        }
        Err(RecvTimeoutError::Disconnected) => anyhow::bail!("Search worker stopped unexpectedly"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn clients_xlsx() -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet().set_name("Q1").unwrap();
        worksheet.write_string(0, 0, "Company").unwrap();
        worksheet.write_string(1, 0, "Acme Corp").unwrap();
        worksheet.write_string(2, 0, "Globex").unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_run_search_without_timeout() {
        let results = run_search(clients_xlsx(), "acme".to_string(), SearchOptions::default(), None)
            .unwrap();

        assert_eq!(results.total_matches(), 1);
    }

    #[test]
    fn test_run_search_within_timeout() {
        let results = run_search(
            clients_xlsx(),
            "GLOBEX".to_string(),
            SearchOptions::default(),
            Some(Duration::from_secs(30)),
        )
        .unwrap();

        assert_eq!(results.sheet_names(), vec!["Q1"]);
        assert_eq!(results.get("Q1").unwrap().rows[0].index, 1);
    }

    #[test]
    fn test_slow_search_times_out() {
        let err = run_with_timeout(Some(Duration::from_millis(10)), || {
            thread::sleep(Duration::from_secs(2));
            Ok(())
        })
        .unwrap_err();

        assert!(err.to_string().starts_with("Search timed out after"));
    }

    #[test]
    fn test_zero_timeout_with_stalled_worker() {
        let err = run_with_timeout(Some(Duration::ZERO), || {
            thread::sleep(Duration::from_millis(500));
            Ok(0)
        })
        .unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let err = run_with_timeout::<(), _>(Some(Duration::from_secs(30)), || {
            panic!("worker failed")
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "Search worker stopped unexpectedly");
    }

    #[test]
    fn test_format_error_passes_through() {
        let err = run_search(
            b"not a workbook".to_vec(),
            "acme".to_string(),
            SearchOptions::default(),
            Some(Duration::from_secs(30)),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<company_search::Error>(),
            Some(company_search::Error::Format(_))
        ));
    }

    #[test]
    fn test_read_input_from_stdin() {
        let bytes = clients_xlsx();
        let read = read_input_from(Path::new("-"), Cursor::new(bytes.clone())).unwrap();

        assert_eq!(read, bytes);
        assert_eq!(search_bytes(&read, "acme", &SearchOptions::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.xlsx");
        let bytes = clients_xlsx();
        std::fs::write(&path, &bytes).unwrap();

        let read = read_input_from(&path, std::io::empty()).unwrap();
        assert_eq!(read, bytes);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input_from(Path::new("no/such/file.xlsx"), std::io::empty()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file: "));
    }
}
