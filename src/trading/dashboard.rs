use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::TradeRecord;
use crate::trading::statistics::{round1, round2, summarize, StatisticsSummary};

const TOP_PERFORMERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerEntry {
    pub trader: String,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub win_rate: f64,
    pub total_trades: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolStats {
    pub symbol: String,
    pub trades: usize,
    pub closed_trades: usize,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub win_rate: f64,
}

/// Cross-account aggregate. Carries no owner identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: usize,
    pub active_users: usize,
    pub total_trades: usize,
    pub open_trades: usize,
    pub closed_trades: usize,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub avg_win_rate: f64,
    pub profitable_users: usize,
    pub top_performers: Vec<PerformerEntry>,
    pub symbols: Vec<SymbolStats>,
}

#[derive(Default)]
struct SymbolAccumulator {
    trades: usize,
    closed: usize,
    realized: usize,
    wins: usize,
    pnl: f64,
}

pub fn build_dashboard(trades: &[TradeRecord]) -> DashboardSummary {
    let mut by_owner: BTreeMap<&str, Vec<&TradeRecord>> = BTreeMap::new();
    let mut by_symbol: BTreeMap<&str, SymbolAccumulator> = BTreeMap::new();

    for t in trades {
        by_owner.entry(t.owner_id.as_str()).or_default().push(t);

        let entry = by_symbol.entry(t.symbol.as_str()).or_default();
        entry.trades += 1;
        if t.is_closed() {
            entry.closed += 1;
        }
        if let Some(pnl) = t.realized_pnl() {
            entry.realized += 1;
            entry.pnl += pnl;
            if pnl > 0.0 {
                entry.wins += 1;
            }
        }
    }

    let closed_trades = trades.iter().filter(|t| t.is_closed()).count();
    let open_trades = trades.len() - closed_trades;

    let mut active: Vec<(&str, StatisticsSummary)> = by_owner
        .iter()
        .filter(|(_, owned)| owned.iter().any(|t| t.realized_pnl().is_some()))
        .map(|(owner, owned)| (*owner, summarize(owned.iter().copied())))
        .collect();

    let avg_win_rate = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|(_, s)| s.win_rate).sum::<f64>() / active.len() as f64
    };
    let profitable_users = active.iter().filter(|(_, s)| s.total_pnl > 0.0).count();

    active.sort_by(|(a_owner, a), (b_owner, b)| {
        b.total_pnl
            .total_cmp(&a.total_pnl)
            .then_with(|| a_owner.cmp(b_owner))
    });
    let top_performers = active
        .iter()
        .take(TOP_PERFORMERS)
        .enumerate()
        .map(|(rank, (_, s))| PerformerEntry {
            trader: format!("Trader #{}", rank + 1),
            total_pnl: s.total_pnl,
            win_rate: s.win_rate,
            total_trades: s.total_trades,
        })
        .collect();

    let mut symbols: Vec<SymbolStats> = by_symbol
        .into_iter()
        .map(|(symbol, acc)| SymbolStats {
            symbol: symbol.to_string(),
            trades: acc.trades,
            closed_trades: acc.closed,
            total_pnl: round2(acc.pnl),
            win_rate: if acc.realized > 0 {
                round1(acc.wins as f64 / acc.realized as f64 * 100.0)
            } else {
                0.0
            },
        })
        .collect();
    symbols.sort_by(|a, b| b.trades.cmp(&a.trades).then_with(|| a.symbol.cmp(&b.symbol)));

    DashboardSummary {
        total_users: by_owner.len(),
        active_users: active.len(),
        total_trades: trades.len(),
        open_trades,
        closed_trades,
        total_pnl: round2(
            trades
                .iter()
                .filter_map(TradeRecord::realized_pnl)
                .sum::<f64>(),
        ),
        avg_win_rate: round1(avg_win_rate),
        profitable_users,
        top_performers,
        symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use crate::test_helpers::{open_trade, owned_closed};

    fn sample() -> Vec<TradeRecord> {
        vec![
            owned_closed("alice@example.com", "ES", 1, 100.0, 0),
            owned_closed("alice@example.com", "ES", 2, -50.0, 1),
            owned_closed("bob@example.com", "NQ", 3, 300.0, 0),
            owned_closed("carol@example.com", "ES", 4, -80.0, 0),
            open_trade("dave@example.com", "CL", Side::Long, 1.0, 80.0, 0),
        ]
    }

    #[test]
    fn empty_dashboard() {
        assert_eq!(build_dashboard(&[]), DashboardSummary::default());
    }

    #[test]
    fn aggregates_across_owners() {
        let d = build_dashboard(&sample());
        assert_eq!(d.total_users, 4);
        assert_eq!(d.active_users, 3);
        assert_eq!(d.total_trades, 5);
        assert_eq!(d.open_trades, 1);
        assert_eq!(d.closed_trades, 4);
        assert_eq!(d.total_pnl, 270.0);
        // alice 50%, bob 100%, carol 0%
        assert_eq!(d.avg_win_rate, 50.0);
        assert_eq!(d.profitable_users, 2);
    }

    #[test]
    fn top_performers_are_ranked_and_anonymized() {
        let d = build_dashboard(&sample());
        let labels: Vec<&str> = d.top_performers.iter().map(|p| p.trader.as_str()).collect();
        assert_eq!(labels, vec!["Trader #1", "Trader #2", "Trader #3"]);
        let pnls: Vec<f64> = d.top_performers.iter().map(|p| p.total_pnl).collect();
        assert_eq!(pnls, vec![300.0, 50.0, -80.0]);

        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("@example.com"));
    }

    #[test]
    fn top_performers_capped() {
        let trades: Vec<TradeRecord> = (0..8)
            .map(|i| owned_closed(&format!("user{}", i), "ES", i + 1, i as f64 * 10.0 + 1.0, 0))
            .collect();
        let d = build_dashboard(&trades);
        assert_eq!(d.top_performers.len(), 5);
        assert_eq!(d.top_performers[0].total_pnl, 71.0);
    }

    #[test]
    fn tied_pnl_ranks_by_owner_id() {
        // All three end at +100; win rates 50, 100 and 100.
        let trades = vec![
            owned_closed("zed", "ES", 1, 100.0, 0),
            owned_closed("mia", "ES", 2, 40.0, 0),
            owned_closed("mia", "ES", 3, 60.0, 1),
            owned_closed("amy", "ES", 4, 150.0, 0),
            owned_closed("amy", "ES", 5, -50.0, 1),
        ];
        let d = build_dashboard(&trades);
        let ranked: Vec<(&str, f64, f64, usize)> = d
            .top_performers
            .iter()
            .map(|p| (p.trader.as_str(), p.total_pnl, p.win_rate, p.total_trades))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Trader #1", 100.0, 50.0, 2),
                ("Trader #2", 100.0, 100.0, 2),
                ("Trader #3", 100.0, 100.0, 1),
            ]
        );

        let mut reversed = trades.clone();
        reversed.reverse();
        assert_eq!(build_dashboard(&reversed), d);
    }

    #[test]
    fn closed_without_pnl_counts_as_closed() {
        let mut unpriced = owned_closed("erin", "GC", 9, 10.0, 0);
        unpriced.pnl = None;
        let mut trades = sample();
        trades.push(unpriced);

        let d = build_dashboard(&trades);
        assert_eq!(d.total_trades, 6);
        assert_eq!(d.closed_trades, 5);
        assert_eq!(d.open_trades, 1);
        assert_eq!(d.open_trades + d.closed_trades, d.total_trades);
        assert_eq!(d.total_users, 5);
        assert_eq!(d.active_users, 3);
        assert_eq!(d.total_pnl, 270.0);

        let gc = d.symbols.iter().find(|s| s.symbol == "GC").unwrap();
        assert_eq!(gc.closed_trades, 1);
        assert_eq!(gc.total_pnl, 0.0);
        assert_eq!(gc.win_rate, 0.0);
    }

    #[test]
    fn symbols_ordered_by_activity() {
        let d = build_dashboard(&sample());
        let names: Vec<&str> = d.symbols.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(names, vec!["ES", "CL", "NQ"]);

        let es = &d.symbols[0];
        assert_eq!(es.trades, 3);
        assert_eq!(es.closed_trades, 3);
        assert_eq!(es.total_pnl, -30.0);
        assert_eq!(es.win_rate, 33.3);

        let cl = &d.symbols[1];
        assert_eq!(cl.closed_trades, 0);
        assert_eq!(cl.win_rate, 0.0);
    }
}
