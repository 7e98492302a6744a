//! The two pieces of run-scoped state: the record budget and the zone-id
//! allocator.
//!
//! Both are owned by the driver thread.  Every emitted record goes through
//! [`RecordBudget::try_consume`], which makes overshooting the target
//! impossible regardless of chain length or batch shape.

use std::ops::Range;

use swarm_core::ZoneId;

// ── RecordBudget ──────────────────────────────────────────────────────────────

/// Strictly bounded record counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordBudget {
    target:  u64,
    emitted: u64,
}

impl RecordBudget {
    pub fn new(target: u64) -> Self {
        Self { target, emitted: 0 }
    }

    #[inline]
    pub fn target(&self) -> u64 {
        self.target
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.emitted >= self.target
    }

    /// Claim one slot.  Returns `false`, leaving the counter untouched, once
    /// the target has been reached.
    #[inline]
    pub fn try_consume(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.emitted += 1;
        true
    }
}

// ── ZoneIdAllocator ───────────────────────────────────────────────────────────

/// Hands out zone IDs in strictly increasing order, starting at 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneIdAllocator {
    next: ZoneId,
}

impl ZoneIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ID the next allocation will start at (= IDs handed out so far).
    #[inline]
    pub fn peek(&self) -> ZoneId {
        self.next
    }

    /// Allocate `count` consecutive IDs.
    pub fn allocate(&mut self, count: u64) -> ZoneBlock {
        let start = self.next.0;
        self.next = ZoneId(start + count);
        ZoneBlock { ids: start..start + count }
    }
}

/// A contiguous run of freshly allocated zone IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneBlock {
    ids: Range<u64>,
}

impl ZoneBlock {
    /// IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ZoneId> + use<> {
        self.ids.clone().map(ZoneId)
    }

    /// The raw integer range (for Rayon's indexed range iterators).
    #[inline]
    pub fn raw(&self) -> Range<u64> {
        self.ids.clone()
    }
}
