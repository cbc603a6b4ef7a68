pub mod dashboard;
pub mod errors;

pub use dashboard::{DashboardReport, DashboardService};
pub use errors::ServiceError;
