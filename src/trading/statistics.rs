use serde::{Deserialize, Serialize};

use crate::models::TradeRecord;

/// Assumed per-trade risk-free rate for the simplified Sharpe ratio.
const RISK_FREE_RATE: f64 = 0.02;
/// Reported profit factor when there are profits but no losses.
const NO_LOSS_PROFIT_FACTOR: f64 = 999.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub win_rate: f64,
    pub total_trades: usize,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

/// Performance summary over one owner's complete trade set.
///
/// `total_trades` counts every input record, open or closed. All other
/// fields consider only closed trades carrying a pnl.
pub fn compute_statistics(trades: &[TradeRecord]) -> StatisticsSummary {
    summarize(trades.iter())
}

pub(crate) fn summarize<'a, I>(trades: I) -> StatisticsSummary
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let mut total_trades = 0;
    let mut closed: Vec<(&TradeRecord, f64)> = Vec::new();
    for t in trades {
        total_trades += 1;
        if let Some(pnl) = t.realized_pnl() {
            closed.push((t, pnl));
        }
    }

    // Chronological order drives the drawdown walk. Fixing the order also
    // makes the float sums independent of input order.
    closed.sort_by(|(a, _), (b, _)| a.trade_date.cmp(&b.trade_date).then(a.id.cmp(&b.id)));

    let wins: Vec<f64> = closed.iter().map(|&(_, p)| p).filter(|p| *p > 0.0).collect();
    let losses: Vec<f64> = closed.iter().map(|&(_, p)| p).filter(|p| *p < 0.0).collect();

    let total_pnl: f64 = closed.iter().map(|&(_, p)| p).sum();
    let win_rate = if closed.is_empty() {
        0.0
    } else {
        wins.len() as f64 / closed.len() as f64 * 100.0
    };

    let gross_profit: f64 = wins.iter().sum();
    let gross_loss = losses.iter().sum::<f64>().abs();

    let avg_win = if wins.is_empty() {
        0.0
    } else {
        gross_profit / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        losses.iter().sum::<f64>() / losses.len() as f64
    };

    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        NO_LOSS_PROFIT_FACTOR
    } else {
        0.0
    };

    let max_drawdown = max_drawdown(closed.iter().map(|&(_, p)| p));

    // Notional ignores leverage and contract size.
    let returns: Vec<f64> = closed
        .iter()
        .map(|&(t, p)| p / (t.entry_price * t.quantity))
        .collect();
    let sharpe_ratio = sharpe(&returns);

    StatisticsSummary {
        total_pnl: round2(total_pnl),
        win_rate: round1(win_rate),
        total_trades,
        avg_win: round2(avg_win),
        avg_loss: round2(avg_loss),
        profit_factor: round2(profit_factor),
        max_drawdown: positive_zero(-round2(max_drawdown)),
        sharpe_ratio: round2(sharpe_ratio),
    }
}

/// Largest peak-to-trough decline of cumulative pnl, as a magnitude.
/// The peak starts at zero.
fn max_drawdown(pnls: impl IntoIterator<Item = f64>) -> f64 {
    let mut running = 0.0;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;
    for pnl in pnls {
        running += pnl;
        peak = peak.max(running);
        max_dd = max_dd.max(peak - running);
    }
    max_dd
}

fn sharpe(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let std_dev = if returns.len() < 2 {
        0.0
    } else {
        (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };

    if std_dev > 0.0 {
        (mean - RISK_FREE_RATE) / std_dev
    } else {
        0.0
    }
}

fn positive_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

pub(crate) fn round1(x: f64) -> f64 {
    positive_zero((x * 10.0).round() / 10.0)
}

pub(crate) fn round2(x: f64) -> f64 {
    positive_zero((x * 100.0).round() / 100.0)
}
