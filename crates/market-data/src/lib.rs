//! Market Data Module
//!
//! Everything around the analysis core that deals with quote rows: decoding the
//! exchange's all-symbols feed, the board of loaded rows and favorites,
//! dashboard-style filtering and sorting, and clearly labeled synthetic data.

pub mod board;
pub mod bourse;
pub mod filter;
pub mod session;
pub mod synthetic;

pub use board::{Favorites, MarketBoard};
pub use bourse::{parse_bourse_rows, RawSymbolRow};
pub use filter::{filter_market_data, ChangeFilter, MarketFilter, SortKey};
pub use session::{market_session, MarketSession};
pub use synthetic::{sample_bourse_board, sample_chart_series, sample_crypto_board};
