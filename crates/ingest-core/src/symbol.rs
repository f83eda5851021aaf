//! Ticker symbol normalization.
//!
//! Feed entries carry symbols such as `AAPL`, `CRYPTO:BTC` or `FOREX:EUR`.
//! Only stock and crypto symbols are ever persisted.

use crate::types::TickerType;

pub const MAX_SYMBOL_LEN: usize = 32;

/// Single-letter symbols that belong to real issuers
pub const SINGLE_LETTER_WHITELIST: &[char] = &['K', 'F', 'C'];

const CRYPTO_PREFIX: &str = "CRYPTO:";
const FOREX_PREFIX: &str = "FOREX:";

/// Shape check; letter case does not matter.
pub fn is_valid_ticker_symbol(symbol: &str) -> bool {
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
        return false;
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return false;
    }

    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(only), None) => SINGLE_LETTER_WHITELIST.contains(&only.to_ascii_uppercase()),
        _ => true,
    }
}

/// Map a raw feed symbol to its canonical `(symbol, type)`, or `None` if it must not be stored.
pub fn normalize_symbol(raw: &str) -> Option<(String, TickerType)> {
    let symbol = raw.trim().to_ascii_uppercase();

    if let Some(rest) = symbol.strip_prefix(CRYPTO_PREFIX) {
        return is_valid_ticker_symbol(rest).then(|| (rest.to_string(), TickerType::Crypto));
    }
    if symbol.starts_with(FOREX_PREFIX) {
        return None;
    }

    is_valid_ticker_symbol(&symbol).then(|| (symbol, TickerType::Stock))
}
