pub mod bands;
pub mod batch;
pub mod corporate;
pub mod personal;
pub mod schema;

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Read a whole input file (or stdin with "-")
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    log::info!("read {} bytes from {}", buffer.len(), path.display());
    Ok(buffer)
}

fn read_from_stdin() -> anyhow::Result<Vec<u8>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }
    log::info!("read {} bytes from stdin", buffer.len());
    Ok(buffer)
}

/// Rounded table with right-aligned figures
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

/// Rate as a percentage, e.g. 0.02234 -> "2.23%"
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
