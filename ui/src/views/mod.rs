mod dashboard;
pub use dashboard::{Dashboard, DashboardData, DashboardState};
