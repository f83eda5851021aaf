/// Hard limit of the feed provider on symbols per request
pub const MAX_FEED_BATCH: usize = 10;

/// Split symbols into consecutive batches of at most `size`, preserving order.
pub fn chunk_symbols(symbols: &[String], size: usize) -> Vec<Vec<String>> {
    let size = size.clamp(1, MAX_FEED_BATCH);
    symbols.chunks(size).map(|c| c.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    #[test]
    fn test_chunk_counts_and_order() {
        for n in [0usize, 1, 9, 10, 11, 20, 25, 101] {
            let input = symbols(n);
            let batches = chunk_symbols(&input, MAX_FEED_BATCH);

            assert_eq!(batches.len(), n.div_ceil(MAX_FEED_BATCH));
            assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= MAX_FEED_BATCH));
            assert_eq!(batches.concat(), input);
        }
    }

    #[test]
    fn test_last_batch_is_remainder() {
        let batches = chunk_symbols(&symbols(23), MAX_FEED_BATCH);
        assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![10, 10, 3]);
    }

    #[test]
    fn test_oversized_batch_is_capped() {
        let batches = chunk_symbols(&symbols(30), 50);
        assert_eq!(batches.len(), 3);
    }
}
