use sheetform_core::reader::{CellValue, WorkbookAdapter, XlsAdapter, open_workbook};
use sheetform_core::{FormAnalyzer, SpreadsheetFormat};
use std::path::PathBuf;

// BIFF8 workbook: "Hoja1" holds the inspection form, "Vacía" is empty
fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/form.xls")
}

#[test]
fn test_xls_adapter_reads_cells() -> anyhow::Result<()> {
    let mut adapter = XlsAdapter::open(fixture())?;
    assert_eq!(adapter.format(), SpreadsheetFormat::Xls);
    assert_eq!(adapter.sheet_names(), vec!["Hoja1", "Vacía"]);

    let dims = adapter.dimensions("Hoja1")?;
    assert_eq!((dims.rows, dims.cols), (4, 27));
    assert_eq!(dims.range_string().as_deref(), Some("A1:AA4"));

    assert_eq!(
        adapter.cell_at("Hoja1", 2, 2)?.value,
        CellValue::Text("Nombre del responsable".to_string())
    );
    assert_eq!(adapter.cell_at("Hoja1", 3, 2)?.value, CellValue::Number(1234.0));
    let aa4 = adapter.cell_at("Hoja1", 4, 27)?;
    assert_eq!(aa4.position.to_string(), "AA4");
    assert_eq!(aa4.value, CellValue::Number(7.5));
    assert_eq!(adapter.cell_at("Hoja1", 3, 3)?.value, CellValue::Empty);

    Ok(())
}

#[test]
fn test_xls_merges_are_one_based() -> anyhow::Result<()> {
    let mut adapter = XlsAdapter::open(fixture())?;

    let merged: Vec<String> = adapter
        .merged_ranges("Hoja1")?
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(merged, vec!["A1:C1", "B5:D6"]);
    assert!(adapter.merged_ranges("Vacía")?.is_empty());

    Ok(())
}

#[test]
fn test_xls_empty_sheet() -> anyhow::Result<()> {
    let mut adapter = open_workbook(fixture())?;
    let dims = adapter.dimensions("Vacía")?;
    assert!(dims.is_empty());
    assert_eq!(dims.range_string(), None);

    Ok(())
}

#[test]
fn test_analyze_xls_form() -> anyhow::Result<()> {
    let report = FormAnalyzer::new().analyze_file(fixture())?;
    assert_eq!(report.filename, "form.xls");
    assert_eq!(report.format, SpreadsheetFormat::Xls);

    let sheet = &report.sheets[0];
    let headers: Vec<_> = sheet.headers.iter().map(|h| h.cell.reference.as_str()).collect();
    assert_eq!(headers, vec!["B2"]);
    assert_eq!(
        sheet.headers[0].matched_keywords,
        vec!["nombre", "responsable", "no"]
    );
    assert!(sheet.empty_cells.cells.iter().any(|c| c.reference == "C3"));

    let empty = &report.sheets[1];
    assert_eq!(empty.name, "Vacía");
    assert_eq!(empty.dimensions, None);

    Ok(())
}
