//! Dashboard page as an explicit request/response handler.

pub mod handler;
pub mod params;
pub mod state;
pub mod view;

pub use handler::{ConfigArtifact, Dashboard};
pub use params::DashboardParams;
pub use state::{DashboardState, Notice, NoticeLevel};
pub use view::{ChartView, DashboardView, SignalSummary};
