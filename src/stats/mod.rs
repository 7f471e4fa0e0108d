//! Dashboard statistics and analytics aggregation.
//!
//! Pure functions over in-memory trade snapshots: no I/O, no ordering
//! requirement on input, plain serializable data out. Malformed per-trade
//! data is excluded from the affected metric rather than failing the
//! whole computation.

pub mod calendar;
pub mod dashboard;
pub mod series;

pub use calendar::{calendar_days, CalendarDay};
pub use dashboard::{compute_dashboard_stats, DashboardStats};
pub use series::{
    daily_performance, day_of_week_performance, equity_curve, market_distribution,
    monthly_performance, type_distribution, DailyPerformance, DayOfWeekPerformance, EquityPoint,
    MarketDistribution, MonthlyPerformance, TypeDistribution,
};

use crate::models::Trade;
use chrono::{DateTime, NaiveDate};

/// Calendar day (UTC) a trade was closed on, or `None` for a timestamp
/// outside the representable range.
pub(crate) fn exit_day(trade: &Trade) -> Option<NaiveDate> {
    DateTime::from_timestamp(trade.exit_date, 0).map(|dt| dt.date_naive())
}
