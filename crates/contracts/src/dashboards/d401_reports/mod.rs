pub mod dto;

pub use dto::{Report, ReportKind, ReportTable};
