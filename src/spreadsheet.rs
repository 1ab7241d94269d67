use std::path::Path;
use log::info;
use rust_xlsxwriter::{Format, Workbook};
use crate::error::Result;
use crate::record::Record;

pub const SHEET_NAME: &str = "Results";
// Longest text an xlsx cell accepts.
const MAX_CELL_CHARS: usize = 32_767;

/// Writes every record as one row under a fixed header. Called once per run.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in Record::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, record.index as f64)?;
        for (offset, cell) in record.text_cells().iter().enumerate() {
            worksheet.write_string(row, (offset + 1) as u16, clamp_cell(cell))?;
        }
    }

    worksheet.set_column_width(1, 50)?;
    worksheet.set_column_width(5, 80)?;

    workbook.save(path)?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

fn clamp_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DownloadStatus, Publication};
    use calamine::{open_workbook, Reader, Xlsx};
    use tempfile::tempdir;

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut excel: Xlsx<_> = open_workbook(path).unwrap();
        let worksheets = excel.worksheets();
        let (name, range) = &worksheets[0];
        assert_eq!(name, SHEET_NAME);
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn record(index: usize, title: &str, status: DownloadStatus, keyword: &str) -> Record {
        let publication = Publication {
            title: Some(title.to_string()),
            pub_url: Some(format!("https://example.org/{}.pdf", index)),
            ..Default::default()
        };
        Record::from_publication(index, &publication, status, "2024-05-01 10:00:00".into(), keyword)
    }

    #[test]
    fn test_header_and_rows_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.xlsx");
        let records = vec![
            record(1, "First", DownloadStatus::Success, "alpha"),
            record(2, "Second", DownloadStatus::Failed("timed out".into()), "alpha"),
            record(1, "Third", DownloadStatus::NotAttempted, "beta"),
        ];

        write_records(&path, &records).unwrap();
        let rows = read_rows(&path);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], Record::COLUMNS.map(String::from).to_vec());
        assert_eq!(
            rows[1],
            vec![
                "1", "First", "No authors", "No year", "No journal", "No abstract",
                "https://example.org/1.pdf", "success", "2024-05-01 10:00:00", "alpha",
            ]
        );
        assert_eq!(rows[2][7], "failed: timed out");
        assert_eq!(rows[3][0], "1");
        assert_eq!(rows[3][9], "beta");
    }

    #[test]
    fn test_empty_run_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        write_records(&path, &[]).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Index");
    }

    #[test]
    fn test_oversized_text_is_clamped() {
        let long = "é".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(clamp_cell(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(clamp_cell("short"), "short");
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");
        assert!(write_records(&path, &[]).is_err());
    }
}
