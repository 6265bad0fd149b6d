use anyhow::{Context, Result};
use contracts::dashboards::d401_reports::Report;

/// Render a report as CSV: per table a title line, the header, the rows,
/// and a blank line between tables
pub fn render_csv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for (idx, table) in report.tables.iter().enumerate() {
        if idx > 0 {
            writer.write_record([""])?;
        }
        writer.write_record([table.title.as_str()])?;
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e.error()))
        .context("CSV export failed")
}

/// `Content-Disposition` value for a download
pub fn attachment_header(file_stem: &str) -> String {
    format!("attachment; filename=\"{}.csv\"", file_stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d401_reports::{ReportKind, ReportTable};

    #[test]
    fn test_render_csv() {
        let mut first = ReportTable::new("Ana", &["Design", "Quantity"]);
        first.push_row(["Logo, front", "2"]);
        let mut second = ReportTable::new("Ben", &["Design", "Quantity"]);
        second.push_row(["Seal", "1"]);
        let report = Report {
            kind: ReportKind::Invoices,
            title: "Invoices".into(),
            tables: vec![first, second],
        };

        let text = String::from_utf8(render_csv(&report).unwrap()).unwrap();
        assert!(text.starts_with("Ana\nDesign,Quantity\n\"Logo, front\",2\n"));
        assert!(text.ends_with("\nBen\nDesign,Quantity\nSeal,1\n"));
    }

    #[test]
    fn test_attachment_header() {
        assert_eq!(
            attachment_header("shipping-list"),
            "attachment; filename=\"shipping-list.csv\""
        );
    }
}
