//! Growable buffers with amortized doubling and fallible allocation.
//!
//! [`GrowBuf`] is the single append primitive used by the inflate pipeline:
//! the decoded byte history is a `GrowBuf<u8>` and the per-stream block list
//! is a `GrowBuf` of block records. Capacity grows geometrically, so the
//! number of reallocations is logarithmic in the final size, and every
//! allocation goes through `try_reserve` so exhaustion surfaces as
//! [`InflateError::OutOfMemory`] instead of an abort.

use crate::error::{InflateError, Result};

/// Smallest capacity allocated on first growth.
const MIN_CAPACITY: usize = 64;

/// An append-only buffer with geometric growth and an optional length ceiling.
#[derive(Debug, Clone)]
pub struct GrowBuf<T> {
    /// Stored elements.
    items: Vec<T>,
    /// Maximum number of elements, if bounded.
    limit: Option<usize>,
}

impl<T> GrowBuf<T> {
    /// Create an empty, unbounded buffer. Does not allocate.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty buffer that refuses to grow past `limit` elements.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Pre-reserve room for `capacity` elements.
    ///
    /// The request is clamped to the ceiling, if any, so a size hint can
    /// never allocate past it.
    pub fn reserve_hint(&mut self, capacity: usize) -> Result<()> {
        let capacity = self.limit.map_or(capacity, |limit| capacity.min(limit));
        let additional = capacity.saturating_sub(self.items.len());
        if additional > 0 {
            self.items
                .try_reserve_exact(additional)
                .map_err(|e| InflateError::from((e, additional)))?;
        }
        Ok(())
    }

    /// Make room for `additional` more elements.
    ///
    /// Grows to at least double the current capacity so repeated appends
    /// reallocate O(log n) times.
    pub fn grow_for(&mut self, additional: usize) -> Result<()> {
        let needed = self
            .items
            .len()
            .checked_add(additional)
            .ok_or(InflateError::out_of_memory(additional))?;

        if let Some(limit) = self.limit {
            if needed > limit {
                return Err(InflateError::limit_exceeded(limit));
            }
        }

        if needed <= self.items.capacity() {
            return Ok(());
        }

        let mut target = needed
            .max(self.items.capacity().saturating_mul(2))
            .max(MIN_CAPACITY);
        if let Some(limit) = self.limit {
            target = target.min(limit);
        }

        let extra = target - self.items.len();
        self.items
            .try_reserve_exact(extra)
            .map_err(|e| InflateError::from((e, extra)))?;
        Ok(())
    }

    /// Append one element.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            self.grow_for(1)?;
        } else if let Some(limit) = self.limit {
            if self.items.len() >= limit {
                return Err(InflateError::limit_exceeded(limit));
            }
        }
        self.items.push(item);
        Ok(())
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currently allocated capacity.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// The configured ceiling, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// View the stored elements.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the buffer, returning the stored elements without copying.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Copy> GrowBuf<T> {
    /// Append a slice of elements.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<()> {
        self.grow_for(items.len())?;
        self.items.extend_from_slice(items);
        Ok(())
    }
}

impl GrowBuf<u8> {
    /// Copy `length` bytes starting `distance` bytes back from the end.
    ///
    /// Bytes are copied one at a time, so when `distance < length` the copy
    /// reads bytes it has just written and replicates the repeating pattern.
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<()> {
        if distance == 0 || distance > self.items.len() {
            return Err(InflateError::corrupt(
                self.items.len() as u64,
                format!(
                    "Back-reference distance {} exceeds history of {} bytes",
                    distance,
                    self.items.len()
                ),
            ));
        }

        self.grow_for(length)?;

        let mut src = self.items.len() - distance;
        for _ in 0..length {
            let byte = self.items[src];
            self.items.push(byte);
            src += 1;
        }

        Ok(())
    }
}

impl<T> Default for GrowBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}
