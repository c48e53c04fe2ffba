//! Paginated PDF report: summary table, then one section per projected year
//!
//! Content is first laid out as blocks of text lines. A block is never split
//! across pages; when it does not fit in the remaining space a new page starts.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};

use super::tables::{ancillary_rows_display, class_rows_display, indicator_rows_display, CLASS_HEADERS, INDICATOR_HEADERS};
use super::ReportExporter;
use crate::error::ExportError;
use crate::format::{format_growth, format_num, format_rupiah};
use crate::inputs::ProjectionInputs;
use crate::projection::YearProjection;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 14.0;
const LEFT_MM: f32 = MARGIN_MM;

pub const REPORT_TITLE: &str = "Laporan Proyeksi Keuangan RS - ABK Financial";

/// Writes the multi-page PDF report
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReportExporter;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tone {
    Normal,
    Muted,
    Emphasis,
}

/// One printed line: text cells at fixed x offsets
#[derive(Debug, Clone, PartialEq)]
struct Line {
    cells: Vec<(f32, String)>,
    size: f32,
    bold: bool,
    tone: Tone,
}

impl Line {
    fn text(text: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            cells: vec![(0.0, text.into())],
            size,
            bold,
            tone: Tone::Normal,
        }
    }

    fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    fn row(columns: &[f32], cells: Vec<String>, bold: bool) -> Self {
        Self {
            cells: columns.iter().copied().zip(cells).collect(),
            size: 9.0,
            bold,
            tone: Tone::Normal,
        }
    }

    /// Vertical space taken by the line, in mm
    fn height(&self) -> f32 {
        self.size * 0.3528 * 1.6
    }
}

/// Lines that stay together on one page
#[derive(Debug, Clone, Default, PartialEq)]
struct Block {
    lines: Vec<Line>,
    gap_after: f32,
}

impl Block {
    fn height(&self) -> f32 {
        self.lines.iter().map(Line::height).sum::<f32>() + self.gap_after
    }
}

/// Column x offsets from their widths
fn column_offsets(widths: &[f32]) -> Vec<f32> {
    widths
        .iter()
        .scan(0.0_f32, |x, &w| {
            let at = *x;
            *x += w;
            Some(at)
        })
        .collect()
}

fn table_block(title: Option<&str>, headers: &[&str], widths: &[f32], rows: Vec<Vec<String>>) -> Block {
    let columns = column_offsets(widths);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    if let Some(title) = title {
        lines.push(Line::text(title, 11.0, true));
    }
    lines.push(Line::row(&columns, headers.iter().map(|h| h.to_string()).collect(), true));
    lines.extend(rows.into_iter().map(|cells| Line::row(&columns, cells, false)));
    Block { lines, gap_after: 5.0 }
}

fn header_block(generated_on: &str) -> Block {
    Block {
        lines: vec![
            Line::text(REPORT_TITLE, 16.0, true),
            Line::text(format!("Dibuat pada: {}", generated_on), 10.0, false).with_tone(Tone::Muted),
        ],
        gap_after: 6.0,
    }
}

fn summary_block(years: &[YearProjection]) -> Block {
    let rows = years
        .iter()
        .map(|y| {
            vec![
                y.year_label.clone(),
                format_rupiah(y.inpatient_revenue),
                format_rupiah(y.ancillary.total),
                format_rupiah(y.total_revenue),
                format_growth(y.revenue_growth_pct),
                format!("{}%", format_num(y.indicators.occupancy_rate)),
            ]
        })
        .collect();

    table_block(
        Some("Ringkasan Proyeksi"),
        &["Tahun", "Rawat Inap", "Penunjang", "Total", "Growth", "BOR"],
        &[28.0, 36.0, 36.0, 38.0, 22.0, 22.0],
        rows,
    )
}

fn year_blocks(year: &YearProjection) -> Vec<Block> {
    let heading = Block {
        lines: vec![Line::text(format!("Proyeksi Tahun {}", year.year_label), 13.0, true)],
        gap_after: 2.0,
    };
    let classes = table_block(
        Some("Rincian Per Kelas"),
        &CLASS_HEADERS,
        &[24.0, 26.0, 24.0, 26.0, 28.0, 54.0],
        class_rows_display(year),
    );
    let ancillary = table_block(
        Some("Pendapatan Penunjang"),
        &["Layanan", "Pendapatan"],
        &[50.0, 60.0],
        ancillary_rows_display(year),
    );
    let banner = Block {
        lines: vec![
            Line::text(format!("TOTAL PENDAPATAN {}", year.year_label), 10.0, true).with_tone(Tone::Muted),
            Line::text(format_rupiah(year.total_revenue), 15.0, true).with_tone(Tone::Emphasis),
        ],
        gap_after: 5.0,
    };
    let indicators = table_block(
        Some("Indikator Kinerja"),
        &INDICATOR_HEADERS,
        &[50.0, 46.0, 36.0, 40.0],
        indicator_rows_display(year),
    );

    vec![heading, classes, ancillary, banner, indicators]
}

/// Lay out the whole report as blocks, in print order
fn layout(years: &[YearProjection], generated_on: &str) -> Vec<Block> {
    let mut blocks = vec![header_block(generated_on), summary_block(years)];
    for year in years {
        blocks.extend(year_blocks(year));
    }
    blocks
}

/// Group blocks into pages of at most `usable_height` mm.
/// A block taller than a page gets a page of its own.
fn paginate(blocks: Vec<Block>, usable_height: f32) -> Vec<Vec<Block>> {
    let mut pages: Vec<Vec<Block>> = Vec::new();
    let mut current: Vec<Block> = Vec::new();
    let mut used = 0.0_f32;

    for block in blocks {
        let h = block.height();
        if !current.is_empty() && used + h > usable_height {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }
        used += h;
        current.push(block);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => Color::Rgb(Rgb::new(0.06, 0.09, 0.16, None)),
        Tone::Muted => Color::Rgb(Rgb::new(0.39, 0.45, 0.55, None)),
        Tone::Emphasis => Color::Rgb(Rgb::new(0.15, 0.39, 0.92, None)),
    }
}

fn draw_page(layer: &PdfLayerReference, blocks: &[Block], regular: &IndirectFontRef, bold: &IndirectFontRef) {
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
    for block in blocks {
        for line in &block.lines {
            y -= line.height();
            let font = if line.bold { bold } else { regular };
            layer.set_fill_color(tone_color(line.tone));
            for (x, text) in &line.cells {
                layer.use_text(text.as_str(), line.size, Mm(LEFT_MM + x), Mm(y), font);
            }
        }
        y -= block.gap_after;
    }
}

fn page_footer(layer: &PdfLayerReference, page: usize, total: usize, font: &IndirectFontRef) {
    layer.set_fill_color(tone_color(Tone::Muted));
    layer.use_text(
        format!("Halaman {} dari {}", page, total),
        8.0,
        Mm(PAGE_WIDTH_MM - MARGIN_MM - 30.0),
        Mm(MARGIN_MM / 2.0),
        font,
    );
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> ExportError {
    ExportError::Pdf(format!("{:?}", e))
}

/// Render the report with an explicit date stamp
pub fn render_report(years: &[YearProjection], generated_on: &str) -> Result<Vec<u8>, ExportError> {
    let pages = paginate(layout(years, generated_on), PAGE_HEIGHT_MM - 2.0 * MARGIN_MM);

    let (doc, first_page, first_layer) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Halaman 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    let total = pages.len();
    for (i, blocks) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Halaman {}", i + 1));
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, blocks, &regular, &bold);
        page_footer(&layer, i + 1, total, &regular);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

impl ReportExporter for PdfReportExporter {
    fn format_name(&self) -> &'static str {
        "PDF"
    }

    fn default_file_name(&self) -> &'static str {
        "ABK_Laporan_Lengkap.pdf"
    }

    fn render(&self, years: &[YearProjection], _inputs: &ProjectionInputs) -> Result<Vec<u8>, ExportError> {
        let today = chrono::Local::now().format("%d/%m/%Y").to_string();
        render_report(years, &today)
    }
}
