//! Receipt reference generation.

use rand::Rng;
use std::sync::Arc;

/// Produces candidate receipt references. Uniqueness is settled by the store, not here.
pub type ReceiptGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Numeric references in the range printed on the paper receipt books.
pub const RECEIPT_RANGE: std::ops::RangeInclusive<u32> = 10908..=500876;

/// The default generator: a uniformly random number from [`RECEIPT_RANGE`].
pub fn random_receipts() -> ReceiptGenerator {
    Arc::new(|| rand::thread_rng().gen_range(RECEIPT_RANGE).to_string())
}

/// Replays `refs` in order, then repeats the last one. Handy for forcing collisions.
pub fn scripted_receipts<I>(refs: I) -> ReceiptGenerator
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let refs: Vec<String> = refs.into_iter().map(Into::into).collect();
    let next = std::sync::atomic::AtomicUsize::new(0);
    Arc::new(move || {
        let i = next.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        refs.get(i)
            .or_else(|| refs.last())
            .cloned()
            .unwrap_or_default()
    })
}
