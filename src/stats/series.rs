//! Time-bucketed views derived from a trade snapshot, each keyed by a
//! different grouping of the trade's exit date.

use crate::models::{Market, Trade, TradeStatus, TradeType};
use crate::stats::exit_day;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    /// Display label, e.g. "Mar 2025".
    pub month: String,
    pub wins: u32,
    pub losses: u32,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub day: u32,
    pub trades: u32,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDistribution {
    pub market: Market,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub trade_type: TradeType,
    pub count: u32,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekPerformance {
    pub day: String,
    pub count: u32,
    pub pnl: f64,
    pub avg_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Exit date of the trade that produced this point, "YYYY-MM-DD".
    pub date: String,
    pub equity: f64,
}

/// Win/loss counts and summed P&L per calendar month, in chronological
/// order of the underlying (year, month) rather than label order.
pub fn monthly_performance(trades: &[Trade]) -> Vec<MonthlyPerformance> {
    #[derive(Default)]
    struct Bucket {
        wins: u32,
        losses: u32,
        pnl: f64,
    }

    let mut buckets: BTreeMap<(i32, u32), (NaiveDate, Bucket)> = BTreeMap::new();

    for trade in trades {
        let Some(day) = exit_day(trade) else { continue };
        let (_, bucket) = buckets
            .entry((day.year(), day.month()))
            .or_insert_with(|| (day, Bucket::default()));
        match trade.status {
            TradeStatus::Win => bucket.wins += 1,
            TradeStatus::Loss => bucket.losses += 1,
            TradeStatus::Breakeven => {}
        }
        bucket.pnl += trade.profit_loss;
    }

    buckets
        .into_values()
        .map(|(anchor, bucket)| MonthlyPerformance {
            month: anchor.format("%b %Y").to_string(),
            wins: bucket.wins,
            losses: bucket.losses,
            pnl: bucket.pnl,
        })
        .collect()
}

/// Trade count and summed P&L for every calendar day of the given month,
/// zero-activity days included. The reference month is passed in rather
/// than read from a clock so callers (and tests) control "now".
pub fn daily_performance(trades: &[Trade], month: NaiveDate) -> Vec<DailyPerformance> {
    let Some(first) = month.with_day(1) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut current = first;
    loop {
        let day_trades: Vec<&Trade> = trades
            .iter()
            .filter(|t| exit_day(t) == Some(current))
            .collect();

        days.push(DailyPerformance {
            day: current.day(),
            trades: day_trades.len() as u32,
            pnl: day_trades.iter().map(|t| t.profit_loss).sum(),
        });

        match current.succ_opt() {
            Some(next) if next.month() == first.month() => current = next,
            _ => break,
        }
    }

    days
}

/// Trade counts per market, in first-seen order.
pub fn market_distribution(trades: &[Trade]) -> Vec<MarketDistribution> {
    let mut counts: Vec<MarketDistribution> = Vec::new();

    for trade in trades {
        match counts.iter_mut().find(|e| e.market == trade.market) {
            Some(entry) => entry.count += 1,
            None => counts.push(MarketDistribution {
                market: trade.market,
                count: 1,
            }),
        }
    }

    counts
}

/// Long/Short split with count and summed P&L. Both entries are always
/// present.
pub fn type_distribution(trades: &[Trade]) -> Vec<TypeDistribution> {
    let mut long = TypeDistribution {
        trade_type: TradeType::Long,
        count: 0,
        pnl: 0.0,
    };
    let mut short = TypeDistribution {
        trade_type: TradeType::Short,
        count: 0,
        pnl: 0.0,
    };

    for trade in trades {
        let entry = match trade.trade_type {
            TradeType::Long => &mut long,
            TradeType::Short => &mut short,
        };
        entry.count += 1;
        entry.pnl += trade.profit_loss;
    }

    vec![long, short]
}

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Count, summed P&L, and average P&L per weekday. All seven weekdays are
/// always present, Sunday first.
pub fn day_of_week_performance(trades: &[Trade]) -> Vec<DayOfWeekPerformance> {
    let mut buckets = [(0u32, 0.0f64); 7];

    for trade in trades {
        let Some(day) = exit_day(trade) else { continue };
        let index = day.weekday().num_days_from_sunday() as usize;
        buckets[index].0 += 1;
        buckets[index].1 += trade.profit_loss;
    }

    WEEKDAYS
        .iter()
        .zip(buckets)
        .map(|(day, (count, pnl))| DayOfWeekPerformance {
            day: day.to_string(),
            count,
            pnl,
            avg_pnl: if count > 0 { pnl / count as f64 } else { 0.0 },
        })
        .collect()
}

/// Running balance after each trade, seeded from the account's initial
/// balance and ordered by exit date. Every trade produces its own point;
/// same-day trades are not compacted.
pub fn equity_curve(trades: &[Trade], initial_balance: f64) -> Vec<EquityPoint> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.exit_date);

    let mut equity = initial_balance;
    let mut points = Vec::with_capacity(sorted.len());

    for trade in sorted {
        let Some(day) = exit_day(trade) else { continue };
        equity += trade.profit_loss;
        points.push(EquityPoint {
            date: day.format("%Y-%m-%d").to_string(),
            equity,
        });
    }

    points
}
