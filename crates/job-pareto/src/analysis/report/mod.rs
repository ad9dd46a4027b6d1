mod insights;
mod summary;
pub mod views;

pub use summary::ReportParameters;
pub use views::ConcentrationReport;

pub(crate) use insights::generate_insights;
pub(crate) use summary::build_report;
