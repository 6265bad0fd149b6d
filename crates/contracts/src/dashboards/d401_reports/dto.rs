use serde::{Deserialize, Serialize};

/// Exportable summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// "Total Ordered Tshirts": color → size counts
    Total,
    /// Per-design color → size breakdown
    Designs,
    /// One invoice per customer
    Invoices,
    /// Shipping list per customer
    Shipping,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Total => "Total Ordered Tshirts",
            ReportKind::Designs => "Design Breakdown",
            ReportKind::Invoices => "Invoices",
            ReportKind::Shipping => "Shipping List",
        }
    }

    /// Base file name for downloads
    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::Total => "total-ordered-tshirts",
            ReportKind::Designs => "design-breakdown",
            ReportKind::Invoices => "invoices",
            ReportKind::Shipping => "shipping-list",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "total" => Some(ReportKind::Total),
            "designs" => Some(ReportKind::Designs),
            "invoices" => Some(ReportKind::Invoices),
            "shipping" => Some(ReportKind::Shipping),
            _ => None,
        }
    }
}

/// A titled table of already formatted cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }
}

/// A complete report: one or more tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub tables: Vec<ReportTable>,
}
