use crate::models::{Trade, TradeStatus};
use serde::{Deserialize, Serialize};

/// Summary statistics for a set of trades, as consumed by the dashboard
/// and analytics cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    /// Percentage of winning trades over all trades, in [0, 100].
    pub win_rate: f64,
    /// Gross profit: summed profit_loss over winning trades.
    pub total_profit: f64,
    /// Gross loss as a magnitude: |summed profit_loss over losing trades|.
    pub total_loss: f64,
    pub net_profit_loss: f64,
    pub average_profit: f64,
    pub average_loss: f64,
    pub profit_factor: f64,
    pub best_trade: Option<Trade>,
    pub worst_trade: Option<Trade>,
    /// Mean risk and mean reward to one decimal, e.g. "1.5:3.0".
    pub average_risk_reward: String,
}

/// Computes the dashboard summary over an unordered trade snapshot.
///
/// Breakeven trades count toward `total_trades` and `net_profit_loss` but
/// belong to neither the winning nor the losing set. Best/worst selection
/// keeps the first trade encountered on exact profit_loss ties.
pub fn compute_dashboard_stats(trades: &[Trade]) -> DashboardStats {
    if trades.is_empty() {
        return DashboardStats {
            total_trades: 0,
            win_rate: 0.0,
            total_profit: 0.0,
            total_loss: 0.0,
            net_profit_loss: 0.0,
            average_profit: 0.0,
            average_loss: 0.0,
            profit_factor: 0.0,
            best_trade: None,
            worst_trade: None,
            average_risk_reward: "0:0".to_string(),
        };
    }

    let total_trades = trades.len();
    let winning: Vec<&Trade> = trades
        .iter()
        .filter(|t| t.status == TradeStatus::Win)
        .collect();
    let losing: Vec<&Trade> = trades
        .iter()
        .filter(|t| t.status == TradeStatus::Loss)
        .collect();

    let win_rate = winning.len() as f64 / total_trades as f64 * 100.0;

    // Raw signed sums: a "losing" trade entered with a positive amount
    // still contributes its entered value.
    let total_profit: f64 = winning.iter().map(|t| t.profit_loss).sum();
    let total_loss: f64 = losing.iter().map(|t| t.profit_loss).sum::<f64>().abs();

    let net_profit_loss: f64 = trades.iter().map(|t| t.profit_loss).sum();

    let average_profit = if winning.is_empty() {
        0.0
    } else {
        total_profit / winning.len() as f64
    };
    let average_loss = if losing.is_empty() {
        0.0
    } else {
        total_loss / losing.len() as f64
    };

    // All profit and no loss reports the gross profit itself rather than
    // an infinity the caller would have to special-case.
    let profit_factor = if total_loss == 0.0 {
        if total_profit > 0.0 { total_profit } else { 0.0 }
    } else {
        total_profit / total_loss
    };

    let (best_trade, worst_trade) = select_best_worst(trades, &winning, &losing);

    DashboardStats {
        total_trades,
        win_rate,
        total_profit,
        total_loss,
        net_profit_loss,
        average_profit,
        average_loss,
        profit_factor,
        best_trade,
        worst_trade,
        average_risk_reward: average_risk_reward(trades),
    }
}

fn select_best_worst(
    trades: &[Trade],
    winning: &[&Trade],
    losing: &[&Trade],
) -> (Option<Trade>, Option<Trade>) {
    // A lone trade is classified by sign, not status.
    if let [only] = trades {
        return if only.profit_loss > 0.0 {
            (Some(only.clone()), None)
        } else if only.profit_loss < 0.0 {
            (None, Some(only.clone()))
        } else {
            (None, None)
        };
    }

    // Strict comparisons keep the first encountered on ties.
    let best = winning
        .iter()
        .copied()
        .reduce(|best, t| if t.profit_loss > best.profit_loss { t } else { best })
        .cloned();
    let worst = losing
        .iter()
        .copied()
        .reduce(|worst, t| if t.profit_loss < worst.profit_loss { t } else { worst })
        .cloned();

    (best, worst)
}

fn average_risk_reward(trades: &[Trade]) -> String {
    let mut risk_sum = 0.0;
    let mut reward_sum = 0.0;
    let mut count = 0usize;

    for trade in trades {
        if let Some((risk, reward)) = trade.risk_reward.as_deref().and_then(parse_risk_reward) {
            risk_sum += risk;
            reward_sum += reward;
            count += 1;
        }
    }

    if count == 0 {
        return "0:0".to_string();
    }

    format!(
        "{:.1}:{:.1}",
        risk_sum / count as f64,
        reward_sum / count as f64
    )
}

/// Splits a "risk:reward" string into its numeric sides. Entries missing
/// the separator or with a non-numeric side are dropped from the average
/// entirely.
fn parse_risk_reward(raw: &str) -> Option<(f64, f64)> {
    let mut parts = raw.split(':');
    let risk = parts.next()?.trim().parse().ok()?;
    let reward = parts.next()?.trim().parse().ok()?;
    Some((risk, reward))
}
