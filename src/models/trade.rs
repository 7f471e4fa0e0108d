use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    Forex,
    Stocks,
    Crypto,
    Futures,
    Options,
    Other,
}

text_enum!(Market {
    Forex => "Forex",
    Stocks => "Stocks",
    Crypto => "Crypto",
    Futures => "Futures",
    Options => "Options",
    Other => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Long,
    Short,
}

text_enum!(TradeType {
    Long => "Long",
    Short => "Short",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Win,
    Loss,
    Breakeven,
}

text_enum!(TradeStatus {
    Win => "Win",
    Loss => "Loss",
    Breakeven => "Breakeven",
});

/// A completed position record. `status` is operator-entered and may
/// disagree with the sign of `profit_loss`; the aggregation engine must
/// tolerate that. Dates are UNIX seconds (UTC).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub market: Market,
    pub symbol: String,
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub size: f64,
    pub risk_reward: Option<String>, // "risk:reward"
    pub profit_loss: f64,
    pub status: TradeStatus,
    pub entry_date: i64,
    pub exit_date: i64,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTradeInput {
    pub account_id: String,
    pub market: Market,
    pub symbol: String,
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub size: f64,
    pub risk_reward: Option<String>,
    pub profit_loss: f64,
    pub status: TradeStatus,
    pub entry_date: i64,
    pub exit_date: i64,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

/// Partial edit. Absent fields keep their stored values; an absent
/// `profit_loss` also leaves the account balance untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTradeInput {
    pub market: Option<Market>,
    pub symbol: Option<String>,
    pub trade_type: Option<TradeType>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub size: Option<f64>,
    pub risk_reward: Option<String>,
    pub profit_loss: Option<f64>,
    pub status: Option<TradeStatus>,
    pub entry_date: Option<i64>,
    pub exit_date: Option<i64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilters {
    /// Substring match against symbol or notes.
    pub query: Option<String>,
    pub market: Option<Market>,
    pub trade_type: Option<TradeType>,
    pub status: Option<TradeStatus>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [TradeStatus::Win, TradeStatus::Loss, TradeStatus::Breakeven] {
            let parsed: TradeStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_market_is_rejected() {
        let result: Result<Market, _> = "Commodities".parse();
        assert!(result.is_err());
    }

    #[test]
    fn market_serializes_as_plain_string() {
        let json = serde_json::to_string(&Market::Crypto).unwrap();
        assert_eq!(json, "\"Crypto\"");
    }
}
