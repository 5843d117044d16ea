use crate::models::Side;
use crate::trading::statistics::round2;

/// Realized P&L of a closed trade, rounded to cents.
///
/// Leverage and contract size scale the raw price move. The statistics
/// engine's per-trade return does not apply them.
pub fn calculate_pnl(
    side: Side,
    quantity: f64,
    entry_price: f64,
    exit_price: f64,
    leverage: f64,
    contract_size: f64,
) -> f64 {
    let price_move = (exit_price - entry_price) * side.sign();
    round2(price_move * quantity * contract_size * leverage)
}
