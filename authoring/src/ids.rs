//! Injected id generation.
//!
//! The engine never reads clocks or global randomness. Every fresh entity or
//! file-read request id comes from an [`IdProvider`] handed in at
//! construction, so hosts choose the id scheme and tests stay deterministic.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use uuid::Uuid;

/// Unique identifier for a course, chapter, or attachment.
pub type EntityId = Uuid;

/// Unique identifier for an in-flight file-read request.
pub type RequestId = Uuid;

/// Source of fresh ids for the engine.
pub trait IdProvider {
    /// A fresh id for a newly created entity.
    fn next_entity_id(&mut self) -> EntityId;

    /// A fresh id for a newly issued file-read request.
    fn next_request_id(&mut self) -> RequestId;
}

/// Production provider backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdProvider for UuidIds {
    fn next_entity_id(&mut self) -> EntityId {
        Uuid::new_v4()
    }

    fn next_request_id(&mut self) -> RequestId {
        Uuid::new_v4()
    }
}

/// Deterministic provider backed by a monotonic counter.
///
/// Entity and request ids draw from the same sequence, so every id a single
/// provider hands out is distinct.
#[derive(Debug, Clone, Default)]
pub struct SequenceIds {
    next: u128,
}

impl SequenceIds {
    /// Create a provider whose first id encodes `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}

impl IdProvider for SequenceIds {
    fn next_entity_id(&mut self) -> EntityId {
        self.bump()
    }

    fn next_request_id(&mut self) -> RequestId {
        self.bump()
    }
}
