use crate::domain::model::{PlateRow, WeightRecord};
use crate::utils::error::{Result, TrackerError};

pub const EMPTY_HISTORY: &str = "No records to show";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

const HISTORY_HEADERS: [&str; 6] = ["Date", "Time", "Plates (lb)", "Reps", "RM (lb)", "RM (kg)"];
const PLATE_HEADERS: [&str; 5] = [
    "Lb per side",
    "Men total (lb)",
    "Men total (kg)",
    "Women total (lb)",
    "Women total (kg)",
];

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_else(|| "-".to_string())
}

fn optional_text(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

fn history_cells(record: &WeightRecord) -> Vec<String> {
    vec![
        optional_text(record.fecha.as_deref()),
        optional_text(record.hora.as_deref()),
        optional_number(record.peso_discos_lb),
        optional_number(record.nrepeticiones),
        optional_number(record.rm_lb),
        optional_number(record.rm_kg),
    ]
}

fn plate_cells(row: &PlateRow) -> Vec<String> {
    vec![
        number(row.pounds_per_side),
        number(row.men_total_lb),
        number(row.men_total_kg),
        number(row.women_total_lb),
        number(row.women_total_kg),
    ]
}

/// 對齊欄寬的純文字表格
fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(headers.iter().map(|h| h.to_string()).collect())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().cloned().map(format_row));
    lines.join("\n")
}

fn csv_table(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| TrackerError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| TrackerError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn history_table(records: &[WeightRecord]) -> String {
    if records.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    let rows: Vec<Vec<String>> = records.iter().map(history_cells).collect();
    text_table(&HISTORY_HEADERS, &rows)
}

pub fn history_csv(records: &[WeightRecord]) -> Result<String> {
    let rows: Vec<Vec<String>> = records.iter().map(history_cells).collect();
    csv_table(&HISTORY_HEADERS, &rows)
}

pub fn history_json(records: &[WeightRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn history(records: &[WeightRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(history_table(records)),
        OutputFormat::Csv => history_csv(records),
        OutputFormat::Json => history_json(records),
    }
}

pub fn plates(rows: &[PlateRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(plates_table(rows)),
        OutputFormat::Csv => plates_csv(rows),
        OutputFormat::Json => plates_json(rows),
    }
}

pub fn plates_table(rows: &[PlateRow]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(plate_cells).collect();
    text_table(&PLATE_HEADERS, &cells)
}

pub fn plates_csv(rows: &[PlateRow]) -> Result<String> {
    let cells: Vec<Vec<String>> = rows.iter().map(plate_cells).collect();
    csv_table(&PLATE_HEADERS, &cells)
}

pub fn plates_json(rows: &[PlateRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plates::plate_row;

    fn record() -> WeightRecord {
        serde_json::from_value(serde_json::json!({
            "usuario": "a@b.com",
            "ejercicio": "Deadlift",
            "peso_discos_lb": 225,
            "nrepeticiones": 5,
            "fecha": "2024-01-02",
            "hora": "10:00",
            "rm_lb": 253.1,
        }))
        .unwrap()
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(225.0), "225");
        assert_eq!(number(102.5), "102.5");
        assert_eq!(number(61.25), "61.25");
        assert_eq!(number(100.001), "100");
    }

    #[test]
    fn test_history_table() {
        let output = history_table(&[record()]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[0].contains("RM (kg)"));
        assert!(lines[2].contains("2024-01-02"));
        assert!(lines[2].contains("253.1"));
        assert!(lines[2].ends_with('-'));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(history_table(&[]), EMPTY_HISTORY);
    }

    #[test]
    fn test_history_csv() {
        let output = history_csv(&[record()]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Date,Time,Plates (lb),Reps,RM (lb),RM (kg)");
        assert_eq!(lines[1], "2024-01-02,10:00,225,5,253.1,-");
    }

    #[test]
    fn test_plates_csv() {
        let output = plates_csv(&[plate_row(45.0)]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "45,135,61.2,125,56.7");
    }

    #[test]
    fn test_history_json_keeps_wire_names() {
        let output = history_json(&[record()]).unwrap();
        assert!(output.contains("\"peso_discos_lb\""));
        assert!(output.contains("\"nrepeticiones\": 5.0"));
    }
}
