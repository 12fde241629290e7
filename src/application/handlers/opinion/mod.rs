//! Opinion command handlers.

mod report_opinion;
mod solve_report;
mod submit_opinion;

pub use report_opinion::{ReportOpinionCommand, ReportOpinionHandler};
pub use solve_report::{SolveReportCommand, SolveReportHandler};
pub use submit_opinion::{SubmitOpinionCommand, SubmitOpinionHandler};
