//! Fallible growth helpers for the engines' working buffers.
//!
//! Every buffer whose size depends on the input goes through these helpers so
//! an allocation failure surfaces as [`DbscanError::AllocationFailed`] instead
//! of aborting or truncating a neighbour list.

use crate::error::{DbscanError, Result};

/// Appends `value`, reserving space fallibly when the buffer is full.
pub(crate) fn push_checked<T>(
    buffer: &mut Vec<T>,
    value: T,
    context: &'static str,
) -> Result<()> {
    if buffer.len() == buffer.capacity() {
        let requested = buffer.len().saturating_add(1);
        buffer
            .try_reserve(1)
            .map_err(DbscanError::allocation(context, requested))?;
    }
    buffer.push(value);
    Ok(())
}

/// Allocates a buffer holding `len` copies of `value`.
pub(crate) fn filled_checked<T: Clone>(
    len: usize,
    value: T,
    context: &'static str,
) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(DbscanError::allocation(context, len))?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Allocates an empty buffer able to hold `capacity` elements.
pub(crate) fn with_capacity_checked<T>(
    capacity: usize,
    context: &'static str,
) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(DbscanError::allocation(context, capacity))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_checked_grows_past_capacity() {
        let mut buffer = Vec::with_capacity(1);
        for value in 0..17 {
            push_checked(&mut buffer, value, "test buffer").expect("push must succeed");
        }
        assert_eq!(buffer.len(), 17);
        assert_eq!(buffer.last(), Some(&16));
    }

    #[test]
    fn filled_checked_reports_impossible_requests() {
        let err = filled_checked(usize::MAX, 0_u64, "oversized buffer")
            .expect_err("usize::MAX u64 slots cannot be reserved");
        assert_eq!(
            err,
            DbscanError::AllocationFailed {
                context: "oversized buffer",
                requested: usize::MAX,
            }
        );
    }

    #[test]
    fn with_capacity_checked_reserves_exactly() {
        let buffer: Vec<u8> = with_capacity_checked(32, "bytes").expect("small reservation");
        assert!(buffer.capacity() >= 32);
        assert!(buffer.is_empty());
    }
}
