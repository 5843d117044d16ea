pub mod side;
pub mod trade;

pub use side::*;
pub use trade::{NewTrade, TradeRecord, TradeUpdate};
