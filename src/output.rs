//! Result formatting and terminal output

use crate::dataset::{Dataset, Record, ResolvedSchema};
use crate::index::types::RecordId;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Render one record for display.
///
/// Output columns are concatenated in order with absent values skipped. The
/// separator follows the `separator_after` column whether or not it had a value.
pub fn format_record(record: &Record, schema: &ResolvedSchema) -> String {
    let mut out = String::new();
    for &column in &schema.output_columns {
        if let Some(value) = record.get(column) {
            out.push_str(value);
        }
        if column == schema.separator_after {
            out.push(schema.separator);
        }
    }
    out
}

/// Render the records at `positions`, in that order
pub fn format_results(dataset: &Dataset, positions: &[RecordId], schema: &ResolvedSchema) -> Vec<String> {
    positions
        .iter()
        .filter_map(|&id| dataset.record(id as usize))
        .map(|record| format_record(record, schema))
        .collect()
}

/// Print a result heading followed by one line per result.
///
/// The first literal occurrence of `query` in a line is highlighted.
pub fn print_results(lines: &[String], query: &str, color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);

    print_count(&mut stdout, lines.len())?;

    for line in lines {
        print_result_line(&mut stdout, line, query)?;
    }

    Ok(())
}

/// Print only the number of results (for --count)
pub fn print_result_count(count: usize, color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);
    print_count(&mut stdout, count)
}

fn print_count(stdout: &mut StandardStream, count: usize) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(stdout, "{}", count)?;
    stdout.reset()?;
    writeln!(stdout, " {}", if count == 1 { "result" } else { "results" })
}

fn print_result_line(stdout: &mut StandardStream, line: &str, query: &str) -> io::Result<()> {
    let Some(start) = line.find(query).filter(|_| !query.is_empty()) else {
        return writeln!(stdout, "{}", line);
    };
    let end = start + query.len();

    write!(stdout, "{}", &line[..start])?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(stdout, "{}", &line[start..end])?;
    stdout.reset()?;
    writeln!(stdout, "{}", &line[end..])
}
