//! Excel workbook export: a summary sheet plus one detail sheet per year

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::tables::{detail_sheet_name, summary_rows, CLASS_HEADERS, SUMMARY_HEADERS, SUMMARY_SHEET};
use super::ReportExporter;
use crate::error::ExportError;
use crate::inputs::ProjectionInputs;
use crate::projection::YearProjection;

/// Writes `Ringkasan` and `Detail <year>` sheets
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookExporter;

struct Formats {
    header: Format,
    money: Format,
    decimal: Format,
    total: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            money: Format::new().set_num_format("#,##0"),
            decimal: Format::new().set_num_format("#,##0.00"),
            total: Format::new().set_bold().set_num_format("#,##0"),
        }
    }
}

/// Write a number, or a dash for NaN/infinite values
fn write_figure(sheet: &mut Worksheet, row: u32, col: u16, value: f64, format: &Format) -> Result<(), XlsxError> {
    if value.is_finite() {
        sheet.write_number_with_format(row, col, value, format)?;
    } else {
        sheet.write_string(row, col, "-")?;
    }
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, row: u32, headers: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *header, format)?;
    }
    Ok(())
}

fn write_summary(sheet: &mut Worksheet, years: &[YearProjection], formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name(SUMMARY_SHEET)?;
    write_headers(sheet, 0, &SUMMARY_HEADERS, &formats.header)?;

    for (i, row) in summary_rows(years).iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, row.year.as_str())?;
        write_figure(sheet, r, 1, row.inpatient_revenue, &formats.money)?;
        write_figure(sheet, r, 2, row.ancillary_revenue, &formats.money)?;
        write_figure(sheet, r, 3, row.total_revenue, &formats.total)?;
        write_figure(sheet, r, 4, row.growth_pct, &formats.decimal)?;
        write_figure(sheet, r, 5, row.occupancy_rate, &formats.decimal)?;
        write_figure(sheet, r, 6, row.average_length_of_stay, &formats.decimal)?;
        write_figure(sheet, r, 7, row.total_patients, &formats.money)?;
    }

    sheet.set_column_width(0, 16)?;
    for col in 1..SUMMARY_HEADERS.len() as u16 {
        sheet.set_column_width(col, 22)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_detail(sheet: &mut Worksheet, year: &YearProjection, formats: &Formats) -> Result<(), XlsxError> {
    sheet.set_name(detail_sheet_name(year))?;
    sheet.write_string_with_format(0, 0, format!("Proyeksi {}", year.year_label), &formats.header)?;

    write_headers(sheet, 2, &CLASS_HEADERS, &formats.header)?;
    let mut r = 3;
    for detail in &year.class_details {
        sheet.write_string(r, 0, detail.class_name.as_str())?;
        sheet.write_number(r, 1, detail.beds)?;
        write_figure(sheet, r, 2, detail.target_occupancy_pct, &formats.decimal)?;
        write_figure(sheet, r, 3, detail.display_patient_days, &formats.money)?;
        write_figure(sheet, r, 4, detail.display_patient_count, &formats.money)?;
        write_figure(sheet, r, 5, detail.revenue, &formats.money)?;
        r += 1;
    }
    sheet.write_string_with_format(r, 0, "Total Rawat Inap", &formats.header)?;
    write_figure(sheet, r, 5, year.inpatient_revenue, &formats.total)?;

    r += 2;
    write_headers(sheet, r, &["Penunjang", "Pendapatan"], &formats.header)?;
    r += 1;
    for (label, value) in year.ancillary.components() {
        sheet.write_string(r, 0, label)?;
        write_figure(sheet, r, 1, value, &formats.money)?;
        r += 1;
    }
    sheet.write_string_with_format(r, 0, "Total Penunjang", &formats.header)?;
    write_figure(sheet, r, 1, year.ancillary.total, &formats.total)?;

    r += 2;
    sheet.write_string_with_format(r, 0, "TOTAL PENDAPATAN", &formats.header)?;
    write_figure(sheet, r, 1, year.total_revenue, &formats.total)?;

    sheet.set_column_width(0, 20)?;
    for col in 1..CLASS_HEADERS.len() as u16 {
        sheet.set_column_width(col, 18)?;
    }
    Ok(())
}

/// Build the workbook in memory
pub fn build_workbook(years: &[YearProjection]) -> Result<Workbook, ExportError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    write_summary(workbook.add_worksheet(), years, &formats)?;
    for year in years {
        write_detail(workbook.add_worksheet(), year, &formats)?;
    }

    Ok(workbook)
}

impl ReportExporter for WorkbookExporter {
    fn format_name(&self) -> &'static str {
        "Excel"
    }

    fn default_file_name(&self) -> &'static str {
        "ABK_Proyeksi_Keuangan.xlsx"
    }

    fn render(&self, years: &[YearProjection], _inputs: &ProjectionInputs) -> Result<Vec<u8>, ExportError> {
        let mut workbook = build_workbook(years)?;
        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tables::sheet_names;
    use crate::projection::project;

    #[test]
    fn test_workbook_has_expected_sheets() {
        let inputs = ProjectionInputs::with_base_year(2025);
        let years = project(&inputs);
        let mut workbook = build_workbook(&years).unwrap();

        for name in sheet_names(&years) {
            assert!(workbook.worksheet_from_name(&name).is_ok(), "missing sheet {}", name);
        }
        assert!(workbook.worksheet_from_name("Detail 2029").is_err());
    }

    #[test]
    fn test_render_produces_xlsx_archive() {
        let inputs = ProjectionInputs::with_base_year(2025);
        let years = project(&inputs);
        let bytes = WorkbookExporter.render(&years, &inputs).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_non_finite_figures_do_not_fail_export() {
        let mut inputs = ProjectionInputs::with_base_year(2025);
        inputs.bed_classes = crate::inputs::BedClassTable {
            vip: crate::inputs::BedClassParams::new(0, 60.0, 4.0, 1.0),
            kelas1: crate::inputs::BedClassParams::new(0, 60.0, 4.0, 1.0),
            kelas2: crate::inputs::BedClassParams::new(0, 60.0, 4.0, 1.0),
            kelas3: crate::inputs::BedClassParams::new(0, 60.0, 4.0, 1.0),
        };
        let years = project(&inputs);
        assert!(WorkbookExporter.render(&years, &inputs).is_ok());
    }
}
