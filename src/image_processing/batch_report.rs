//! Batch result table printed with `--report`

use prettytable::{format, Cell, Row, Table};

use super::batch::BatchSummary;
use super::ProcessingResult;
use crate::utils::{display_name, format_duration};

pub struct BatchReport<'a> {
    results: &'a [ProcessingResult],
    summary: &'a BatchSummary,
}

impl<'a> BatchReport<'a> {
    pub fn new(results: &'a [ProcessingResult], summary: &'a BatchSummary) -> Self {
        Self { results, summary }
    }

    pub fn build_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.set_titles(Row::new(vec![
            Cell::new("#"),
            Cell::new("Input"),
            Cell::new("Output"),
            Cell::new("Source"),
            Cell::new("Size"),
            Cell::new("Status"),
        ]));

        for (i, result) in self.results.iter().enumerate() {
            let size = result
                .output_size
                .map(|(w, h)| format!("{}x{}", w, h))
                .unwrap_or_else(|| "-".to_string());
            let status = if result.success {
                Cell::new("OK").style_spec("Fg")
            } else {
                Cell::new(&format!("FAILED: {}", result.error.as_deref().unwrap_or("unknown")))
                    .style_spec("Fr")
            };

            table.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(&display_name(&result.input_path)),
                Cell::new(&display_name(&result.output_path)),
                Cell::new(&result.source_kind.to_string()),
                Cell::new(&size),
                status,
            ]));
        }

        table
    }

    pub fn print(&self) {
        println!();
        self.build_table().printstd();
        println!(
            "{} files, {} converted, {} failed ({:.1}% success) in {}",
            self.summary.total_files,
            self.summary.successful,
            self.summary.failed,
            self.summary.success_rate(),
            format_duration(self.summary.total_duration)
        );
    }
}
