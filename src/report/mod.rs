//! ROI report generation

pub mod breakdown;
pub mod render;

pub use breakdown::{breakdown_lines, BreakdownLine, LineKind};
pub use render::{
    write_report, ReportContext, ReportData, ReportError, ReportFormat, ReportOptions,
    ReportRenderer, HIDDEN_COSTS,
};
