//! CSV trade report, matching the columns of the journal's export dialog.

use crate::error::StoreError;
use crate::models::Trade;
use chrono::DateTime;

const HEADER: [&str; 14] = [
    "Symbol",
    "Market",
    "Type",
    "Entry Price",
    "Exit Price",
    "Stop Loss",
    "Take Profit",
    "Size",
    "Risk/Reward",
    "Profit/Loss",
    "Status",
    "Entry Date",
    "Exit Date",
    "Notes",
];

pub fn trades_to_csv(trades: &[Trade]) -> Result<String, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for trade in trades {
        writer.write_record([
            trade.symbol.clone(),
            trade.market.to_string(),
            trade.trade_type.to_string(),
            trade.entry_price.to_string(),
            trade.exit_price.to_string(),
            trade.stop_loss.map(|v| v.to_string()).unwrap_or_default(),
            trade.take_profit.map(|v| v.to_string()).unwrap_or_default(),
            trade.size.to_string(),
            trade.risk_reward.clone().unwrap_or_default(),
            trade.profit_loss.to_string(),
            trade.status.to_string(),
            format_date(trade.entry_date),
            format_date(trade.exit_date),
            trade.notes.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::from(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeStatus::{Loss, Win};
    use crate::stats::fixtures::{trade, ts};

    #[test]
    fn csv_has_header_and_one_row_per_trade() {
        let mut a = trade(Win, 120.0, ts(2025, 3, 10));
        a.symbol = "GBPJPY".to_string();
        a.risk_reward = Some("1:3".to_string());
        let b = trade(Loss, -45.0, ts(2025, 3, 11));

        let csv = trades_to_csv(&[a, b]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Symbol,Market,Type"));
        assert!(lines[1].contains("GBPJPY"));
        assert!(lines[1].contains("1:3"));
        assert!(lines[2].contains("-45"));
    }

    #[test]
    fn optional_fields_export_as_empty_cells() {
        let mut a = trade(Win, 10.0, ts(2025, 3, 10));
        a.stop_loss = None;
        a.take_profit = None;
        a.risk_reward = None;
        a.notes = None;

        let csv = trades_to_csv(&[a]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].contains(",,"));
    }

    #[test]
    fn dates_use_report_format() {
        let a = trade(Win, 10.0, ts(2025, 3, 5));
        let csv = trades_to_csv(&[a]).unwrap();
        assert!(csv.contains("Mar 5, 2025 12:00"));
    }

    #[test]
    fn empty_input_is_header_only() {
        let csv = trades_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
