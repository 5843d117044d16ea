pub mod dashboard;
pub mod journal;
pub mod pnl;
pub mod statistics;

pub use dashboard::{build_dashboard, DashboardSummary};
pub use journal::TradeJournal;
pub use statistics::{compute_statistics, StatisticsSummary};
