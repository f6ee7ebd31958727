//! Pull-based interface between the line source and a listing consumer.

use crate::error::{CoreError, CoreResult};

/// Consumer of complete listing lines delivered in ordered batches.
pub trait LineReceiver {
    /// Handles one batch. Lines carry no terminators and are never split
    /// across batches.
    fn consume(&mut self, lines: &[String]);

    /// Returns `true` once the consumer wants no further batches.
    fn is_cancelled(&self) -> bool;
}

/// Feeds `batches` to `receiver` in order, checking for cancellation after
/// each batch.
///
/// # Errors
///
/// Returns [`CoreError::Cancelled`] if the receiver reports cancellation;
/// remaining batches are not delivered.
pub fn deliver<R, I>(receiver: &mut R, batches: I) -> CoreResult<()>
where
    R: LineReceiver + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<[String]>,
{
    for (index, batch) in batches.into_iter().enumerate() {
        receiver.consume(batch.as_ref());
        if receiver.is_cancelled() {
            tracing::debug!("line delivery cancelled after batch {index}");
            return Err(CoreError::Cancelled);
        }
    }
    Ok(())
}
