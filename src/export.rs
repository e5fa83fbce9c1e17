// 📤 Export Adapter
// Totals + manual records → report lines → A4 pages → PDF bytes
//
// The layout is computed without touching the PDF encoder so page breaks
// and line contents can be checked directly.

use crate::error::ExportError;
use crate::record::Record;
use crate::totals::Totals;
use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DETAIL_HEADER: &str = "--- Movimientos desde el formulario ---";

/// Millimetres per typographic point
const MM_PER_PT: f32 = 0.3528;
/// Helvetica averages about half an em per glyph
const AVG_GLYPH_EM: f32 = 0.5;

// ============================================================================
// PAGE GEOMETRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub font_size_pt: f32,
}

impl Default for PageLayout {
    /// A4 portrait, 10 mm side/top margins, 20 mm bottom margin, 12 pt text
    fn default() -> Self {
        PageLayout {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 20.0,
            font_size_pt: 12.0,
        }
    }
}

impl PageLayout {
    fn printable_bottom(&self) -> f32 {
        self.height_mm - self.margin_bottom_mm
    }

    fn estimated_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size_pt * AVG_GLYPH_EM * MM_PER_PT
    }
}

// ============================================================================
// REPORT LINES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One row of the report. An empty `text` is vertical spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub text: String,
    pub height_mm: f32,
    pub align: Align,
}

impl ReportLine {
    fn text(text: impl Into<String>, height_mm: f32) -> Self {
        ReportLine {
            text: text.into(),
            height_mm,
            align: Align::Left,
        }
    }

    fn gap(height_mm: f32) -> Self {
        ReportLine::text("", height_mm)
    }

    pub fn is_gap(&self) -> bool {
        self.text.is_empty()
    }
}

/// A line positioned on a page. `baseline_mm` is measured from the bottom
/// edge, as PDF coordinates are.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub baseline_mm: f32,
}

/// Report - the printable cash cut for one date
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    lines: Vec<ReportLine>,
}

impl Report {
    /// Title, totals summary, then one detail line per manual record.
    /// Imported rows only show up through the income total.
    pub fn new(date: NaiveDate, totals: &Totals, manual_records: &[Record]) -> Self {
        let title = format!("Corte de Caja - {}", date.format("%Y-%m-%d"));

        let mut lines = Vec::with_capacity(manual_records.len() + 8);
        lines.push(ReportLine {
            text: title.clone(),
            height_mm: 10.0,
            align: Align::Center,
        });
        lines.push(ReportLine::gap(10.0));

        for summary in totals.summary_lines() {
            lines.push(ReportLine::text(summary, 10.0));
        }
        lines.push(ReportLine::gap(10.0));

        lines.push(ReportLine::text(DETAIL_HEADER, 10.0));
        for record in manual_records {
            lines.push(ReportLine::text(record.report_line(), 8.0));
        }

        Report { title, lines }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Non-empty lines in print order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter(|l| !l.is_gap()).map(|l| l.text.as_str())
    }

    /// Flow the lines onto pages. A line that would cross the bottom margin
    /// starts a new page; spacing never does.
    pub fn paginate(&self, layout: &PageLayout) -> Vec<Vec<PlacedLine>> {
        let mut pages = vec![Vec::new()];
        let mut cursor = layout.margin_top_mm;

        for line in &self.lines {
            if line.is_gap() {
                cursor += line.height_mm;
                continue;
            }

            let page_is_blank = pages.last().map(Vec::is_empty).unwrap_or(true);
            if cursor + line.height_mm > layout.printable_bottom() && !page_is_blank {
                pages.push(Vec::new());
                cursor = layout.margin_top_mm;
            }

            let x_mm = match line.align {
                Align::Left => layout.margin_left_mm,
                Align::Center => ((layout.width_mm - layout.estimated_width(&line.text)) / 2.0)
                    .max(layout.margin_left_mm),
            };
            // Baseline sits roughly two thirds down the cell
            let baseline_from_top = cursor + line.height_mm * 0.65;

            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: line.text.clone(),
                    x_mm,
                    baseline_mm: layout.height_mm - baseline_from_top,
                });
            }
            cursor += line.height_mm;
        }

        pages
    }
}

// ============================================================================
// PDF RENDERING
// ============================================================================

/// Encode a report as a PDF document
pub fn render_pdf(report: &Report, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let pages = report.paginate(layout);

    let (doc, first_page, first_layer) = PdfDocument::new(
        report.title(),
        Mm(layout.width_mm),
        Mm(layout.height_mm),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    let mut pages = pages.into_iter();
    if let Some(lines) = pages.next() {
        let layer = doc.get_page(first_page).get_layer(first_layer);
        draw_lines(&layer, &lines, &font, layout);
    }
    for (i, lines) in pages.enumerate() {
        let layer = add_page(&doc, layout, i + 2);
        draw_lines(&layer, &lines, &font, layout);
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Render(e.to_string()))
}

fn add_page(doc: &PdfDocumentReference, layout: &PageLayout, number: usize) -> PdfLayerReference {
    let (page, layer) = doc.add_page(
        Mm(layout.width_mm),
        Mm(layout.height_mm),
        format!("Layer {}", number),
    );
    doc.get_page(page).get_layer(layer)
}

fn draw_lines(layer: &PdfLayerReference, lines: &[PlacedLine], font: &IndirectFontRef, layout: &PageLayout) {
    for line in lines {
        layer.use_text(
            line.text.clone(),
            layout.font_size_pt,
            Mm(line.x_mm),
            Mm(line.baseline_mm),
            font,
        );
    }
}

// ============================================================================
// PUBLIC ENTRY POINTS
// ============================================================================

/// Build and encode the cash-cut report for `date`
pub fn export_report(
    date: NaiveDate,
    totals: &Totals,
    manual_records: &[Record],
) -> Result<Vec<u8>, ExportError> {
    let report = Report::new(date, totals, manual_records);
    render_pdf(&report, &PageLayout::default())
}

/// `corte_caja_20240101.pdf`
pub fn report_filename(date: NaiveDate) -> String {
    format!("corte_caja_{}.pdf", date.format("%Y%m%d"))
}

/// Encode the report and write it into `dir`. Returns the written path.
pub fn write_report(
    dir: &Path,
    date: NaiveDate,
    totals: &Totals,
    manual_records: &[Record],
) -> Result<PathBuf, ExportError> {
    let bytes = export_report(date, totals, manual_records)?;
    let path = dir.join(report_filename(date));
    std::fs::write(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MovementKind;
    use crate::totals::compute_totals;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn record(kind: MovementKind, label: &str, amount: &str) -> Record {
        Record::new(kind, label, Decimal::from_str(amount).unwrap(), day()).unwrap()
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record(MovementKind::Income, "Proveedor A", "100.00"),
            record(MovementKind::Expense, "Proveedor B", "40.00"),
        ]
    }

    #[test]
    fn test_report_lines() {
        let records = sample_records();
        let totals = compute_totals(&records, &[]);
        let report = Report::new(day(), &totals, &records);

        let texts: Vec<&str> = report.texts().collect();
        assert_eq!(
            texts,
            vec![
                "Corte de Caja - 2024-01-01",
                "Total Ingresos: $100.00",
                "Total Egresos: $40.00",
                "Total Final: $60.00",
                DETAIL_HEADER,
                "2024-01-01 | Ingreso | Proveedor A | $100.00",
                "2024-01-01 | Egreso | Proveedor B | $40.00",
            ]
        );
        assert_eq!(report.lines()[0].align, Align::Center);
    }

    #[test]
    fn test_imported_rows_not_listed() {
        let records = sample_records();
        let imported = vec![record(MovementKind::Income, "Widget", "10")];
        let totals = compute_totals(&records, &imported);
        let report = Report::new(day(), &totals, &records);

        assert!(report.texts().all(|t| !t.contains("Widget")));
        assert!(report.texts().any(|t| t == "Total Ingresos: $110.00"));
    }

    #[test]
    fn test_single_page_layout() {
        let records = sample_records();
        let totals = compute_totals(&records, &[]);
        let layout = PageLayout::default();
        let pages = Report::new(day(), &totals, &records).paginate(&layout);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 7);
        // Lines go down the page
        for pair in pages[0].windows(2) {
            assert!(pair[0].baseline_mm > pair[1].baseline_mm);
        }
        // Title is centered, the rest starts at the left margin
        assert!(pages[0][0].x_mm > layout.margin_left_mm);
        assert_eq!(pages[0][1].x_mm, layout.margin_left_mm);
    }

    #[test]
    fn test_long_report_paginates() {
        let records: Vec<Record> = (1..=80)
            .map(|i| record(MovementKind::Income, &format!("Venta {}", i), "1.00"))
            .collect();
        let totals = compute_totals(&records, &[]);
        let layout = PageLayout::default();
        let pages = Report::new(day(), &totals, &records).paginate(&layout);

        assert!(pages.len() >= 3);
        let placed: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(placed, 80 + 5);

        for page in &pages {
            assert!(!page.is_empty());
            for line in page {
                assert!(line.baseline_mm >= layout.margin_bottom_mm);
                assert!(line.baseline_mm <= layout.height_mm - layout.margin_top_mm);
            }
        }
        // Continuation pages start at the top margin again
        assert_eq!(pages[1][0].baseline_mm, pages[2][0].baseline_mm);
    }

    #[test]
    fn test_render_pdf_bytes() {
        let records = sample_records();
        let totals = compute_totals(&records, &[]);
        let bytes = export_report(day(), &totals, &records).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 100);
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename(day()), "corte_caja_20240101.pdf");
        let date = NaiveDate::from_ymd_opt(2025, 12, 9).unwrap();
        assert_eq!(report_filename(date), "corte_caja_20251209.pdf");
    }

    #[test]
    fn test_write_report_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let records = sample_records();
        let totals = compute_totals(&records, &[]);

        let path = write_report(dir.path(), day(), &totals, &records).unwrap();
        assert_eq!(path, dir.path().join("corte_caja_20240101.pdf"));
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_report_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no").join("such").join("dir");
        let records = sample_records();
        let totals = compute_totals(&records, &[]);

        let result = write_report(&missing, day(), &totals, &records);
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
