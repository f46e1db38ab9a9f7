pub mod activity;
pub mod card;
pub mod column_chart;
pub mod data_table;
pub mod distribution;
pub mod half_donut;
pub mod overview;
pub mod sign_in;
pub mod sign_up;
pub mod statuses;
pub mod team_footprint;
pub mod teams;
pub mod time_series_chart;
pub mod user_panel;
pub mod user_report;

pub use activity::RecentActivity;
pub use card::{Card, Pending, Stat, WidgetError};
pub use column_chart::{AxisLabels, ColumnChart, ColumnValue};
pub use data_table::DataTable;
pub use distribution::{CpuDistribution, MemoryDistribution, Runtimes};
pub use half_donut::HalfDonut;
pub use overview::MonthlyOverview;
pub use sign_in::SignInForm;
pub use sign_up::SignUpModal;
pub use statuses::JobStatuses;
pub use team_footprint::TeamFootprints;
pub use teams::TeamsFootprint;
pub use time_series_chart::{use_sync_group, TimeSeriesChart, ValueFormat};
pub use user_panel::UserPanel;
pub use user_report::UserReport;
