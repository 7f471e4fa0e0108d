//! Month grid for the trade calendar: day cells with per-day trade
//! aggregates, padded with adjacent-month days to full weeks.

use crate::models::Trade;
use crate::stats::exit_day;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub trades: Vec<Trade>,
    pub total_profit_loss: f64,
    pub trade_count: usize,
    /// False for the leading/trailing padding days of adjacent months.
    pub is_current_month: bool,
}

/// Builds the inclusive display grid for the month containing `month`:
/// from the Sunday on or before the 1st through the Saturday on or after
/// the month's last day. Each cell aggregates the trades exited on that
/// exact calendar day, time-of-day ignored.
pub fn calendar_days(trades: &[Trade], month: NaiveDate) -> Vec<CalendarDay> {
    let Some(first) = month.with_day(1) else {
        return Vec::new();
    };
    let last = last_day_of_month(first);

    let start = first
        .checked_sub_days(Days::new(u64::from(first.weekday().num_days_from_sunday())))
        .unwrap_or(first);
    let end = last
        .checked_add_days(Days::new(u64::from(6 - last.weekday().num_days_from_sunday())))
        .unwrap_or(last);

    let mut days = Vec::new();
    let mut current = start;
    loop {
        let day_trades: Vec<Trade> = trades
            .iter()
            .filter(|t| exit_day(t) == Some(current))
            .cloned()
            .collect();

        days.push(CalendarDay {
            date: current,
            total_profit_loss: day_trades.iter().map(|t| t.profit_loss).sum(),
            trade_count: day_trades.len(),
            trades: day_trades,
            is_current_month: current.month() == first.month(),
        });

        if current >= end {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_month.and_then(|d| d.pred_opt()).unwrap_or(first)
}
