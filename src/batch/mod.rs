use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CurrentStockSnapshot, OrderBreakdown, OrderRequest};
use crate::planner::explain_recommendation;

/// One input line of a batch file. Blank stock cells mean "not counted".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BatchRow {
    pub daily_usage: f64,
    pub days_until_next_delivery: f64,
    pub backup_multiplier: f64,
    #[serde(default)]
    pub weight_in_pounds: Option<f64>,
    #[serde(default)]
    pub trays: Option<f64>,
    #[serde(default)]
    pub tray_weight: Option<f64>,
    #[serde(default)]
    pub boxes: Option<f64>,
    #[serde(default)]
    pub box_weight: Option<f64>,
    #[serde(default)]
    pub pieces: Option<f64>,
    #[serde(default)]
    pub pieces_per_box: Option<f64>,
}

impl BatchRow {
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest::new(
            self.daily_usage,
            self.days_until_next_delivery,
            self.backup_multiplier,
            CurrentStockSnapshot {
                weight_in_pounds: self.weight_in_pounds,
                trays: self.trays,
                tray_weight: self.tray_weight,
                boxes: self.boxes,
                box_weight: self.box_weight,
                pieces: self.pieces,
                pieces_per_box: self.pieces_per_box,
            },
        )
    }
}

/// A batch row together with its computed breakdown.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub row: BatchRow,
    pub breakdown: OrderBreakdown,
}

/// Totals across a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub total_exact: f64,
    pub total_rounded: f64,
}

/// Round a float to n decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse batch rows from CSV text with a header line.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BatchRow>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Parse batch rows from a CSV file.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<BatchRow>> {
    read_rows(File::open(path)?)
}

/// Compute a recommendation for every row.
pub fn process_rows(rows: Vec<BatchRow>) -> Vec<BatchResult> {
    rows.into_iter()
        .map(|row| {
            let breakdown = explain_recommendation(&row.to_request());
            BatchResult { row, breakdown }
        })
        .collect()
}

pub fn summarize(results: &[BatchResult]) -> BatchSummary {
    BatchSummary {
        rows: results.len(),
        total_exact: results
            .iter()
            .map(|r| r.breakdown.recommendation.exact_order)
            .sum(),
        total_rounded: results
            .iter()
            .map(|r| r.breakdown.recommendation.rounded_order)
            .sum(),
    }
}

/// Write inputs and results as CSV.
pub fn write_results<W: Write>(writer: W, results: &[BatchResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "daily_usage",
        "days_until_next_delivery",
        "backup_multiplier",
        "weight_in_pounds",
        "trays",
        "tray_weight",
        "boxes",
        "box_weight",
        "pieces",
        "pieces_per_box",
        "total_stock",
        "backup_stock",
        "exact_order",
        "rounded_order",
    ])?;

    for result in results {
        let row = &result.row;
        let b = &result.breakdown;
        wtr.write_record([
            row.daily_usage.to_string(),
            row.days_until_next_delivery.to_string(),
            row.backup_multiplier.to_string(),
            fmt_optional(row.weight_in_pounds),
            fmt_optional(row.trays),
            fmt_optional(row.tray_weight),
            fmt_optional(row.boxes),
            fmt_optional(row.box_weight),
            fmt_optional(row.pieces),
            fmt_optional(row.pieces_per_box),
            format!("{:.2}", b.total_stock),
            format!("{:.2}", b.backup_stock),
            format!("{:.2}", b.recommendation.exact_order),
            format!("{:.0}", b.recommendation.rounded_order),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write results to a CSV file.
pub fn write_results_to_path(path: &Path, results: &[BatchResult]) -> Result<()> {
    write_results(File::create(path)?, results)
}

/// Write batch totals to a JSON file.
pub fn write_summary_json(path: &Path, summary: &BatchSummary) -> Result<()> {
    let json = serde_json::json!({
        "rows": summary.rows,
        "total_exact": round_to(summary.total_exact, 2),
        "total_rounded": summary.total_rounded,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
daily_usage,days_until_next_delivery,backup_multiplier,weight_in_pounds,trays,tray_weight,boxes,box_weight,pieces,pieces_per_box
42,2,0.2,10,3,14,,,,
10,1,0,100,,,,,,
20,3,0.1,,,,,,,
";

    #[test]
    fn test_blank_cells_are_absent() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].trays, Some(3.0));
        assert_eq!(rows[0].boxes, None);
        assert!(rows[2].to_request().current_stock.is_empty());
    }

    #[test]
    fn test_process_and_summarize() {
        let results = process_rows(read_rows(SAMPLE.as_bytes()).unwrap());
        let rounded: Vec<f64> = results
            .iter()
            .map(|r| r.breakdown.recommendation.rounded_order)
            .collect();
        assert_eq!(rounded, vec![40.0, 0.0, 60.0]);

        let summary = summarize(&results);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.total_rounded, 100.0);
        assert!((summary.total_exact - 102.4).abs() < 1e-9);
    }

    #[test]
    fn test_write_results_csv() {
        let results = process_rows(read_rows(SAMPLE.as_bytes()).unwrap());

        let mut out = Vec::new();
        write_results(&mut out, &results).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("exact_order,rounded_order"));
        assert!(lines[1].ends_with("52.00,8.40,40.40,40"));
        assert!(lines[3].ends_with("0.00,2.00,62.00,60"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(102.4000000001, 2), 102.4);
        // Rounds rather than truncates
        assert_eq!(round_to(1.006, 2), 1.01);
        assert_eq!(round_to(-1.006, 2), -1.01);
    }
}
