//! Exact Least Recently Used (LRU) Replacement Policy.
//!
//! This policy tracks the full recency order of every way in a cache set and
//! evicts the way that has gone longest without an access. The recency order
//! is a doubly-linked list held in an arena of nodes addressed by stable slot
//! indices, paired with a way-to-slot map for random access; splicing a way to
//! either end of the list never moves or reallocates nodes, so no handle is
//! ever invalidated.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `set_to_erase()` / `allocate()` / `update()`: O(1) amortized
//! - **Space Complexity:** O(W) where W is the number of ways (associativity)
//! - **Hardware Cost:** High - real caches approximate this with PLRU instead
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than the set capacity (thrashing)

use std::collections::HashMap;

use tracing::trace;

use crate::error::ReplacementError;

/// One recency-list node in the arena.
#[derive(Debug, Clone)]
struct Node {
    /// Way index this node tracks.
    way: usize,
    /// Arena slot of the next-more-recently-used node.
    prev: Option<usize>,
    /// Arena slot of the next-less-recently-used node.
    next: Option<usize>,
}

/// Exact-LRU policy state for one cache set.
///
/// Starts fully populated with way `i` at recency position `i`: way 0 is the
/// initial MRU and way `ways - 1` the initial LRU victim.
///
/// Invariant: the way-to-slot map and the recency list are always mutually
/// consistent. Every mapped way appears exactly once in the list at the
/// recorded slot, the list holds no duplicates, and its length never exceeds
/// `ways`.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Node arena; slot indices stay stable across splices.
    nodes: Vec<Node>,
    /// Recycled arena slots of evicted nodes.
    free: Vec<usize>,
    /// MRU end of the recency list.
    head: Option<usize>,
    /// LRU end of the recency list.
    tail: Option<usize>,
    /// Way index to arena slot.
    index: HashMap<usize, usize>,
    /// Fixed way count.
    ways: usize,
}

impl LruPolicy {
    /// Creates an exact-LRU policy tracking `ways` ways, all initially
    /// resident in index order.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::ZeroWays`] when `ways == 0`.
    pub fn new(ways: usize) -> Result<Self, ReplacementError> {
        if ways == 0 {
            return Err(ReplacementError::ZeroWays);
        }
        let mut policy = Self {
            nodes: Vec::with_capacity(ways),
            free: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::with_capacity(ways),
            ways,
        };
        for way in 0..ways {
            policy.nodes.push(Node {
                way,
                prev: None,
                next: None,
            });
            let _ = policy.index.insert(way, way);
            policy.link_back(way);
        }
        Ok(policy)
    }

    /// Promotes `way` to the MRU position.
    ///
    /// A no-op when `way` is already the MRU.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::UntrackedWay`] if `way` is not currently
    /// tracked.
    pub fn touch(&mut self, way: usize) -> Result<(), ReplacementError> {
        let slot = self.slot_of(way)?;
        if self.head != Some(slot) {
            self.unlink(slot);
            self.link_front(slot);
        }
        Ok(())
    }

    /// Demotes `way` to the LRU position, forcing it to be the next victim
    /// without removing it from tracking.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::UntrackedWay`] if `way` is not currently
    /// tracked.
    pub fn set_to_erase(&mut self, way: usize) -> Result<(), ReplacementError> {
        let slot = self.slot_of(way)?;
        if self.tail != Some(slot) {
            self.unlink(slot);
            self.link_back(slot);
        }
        Ok(())
    }

    /// Inserts or re-inserts `way` as freshly used.
    ///
    /// If the tracked set is already full, the current LRU way is evicted
    /// first (removed from both the list and the map). `way` may coincide with
    /// the way just evicted, re-inserting the same index, or be a new index
    /// entirely. Re-allocating a way that is still tracked after the eviction
    /// promotes it to MRU instead of duplicating it.
    pub fn allocate(&mut self, way: usize) {
        if self.index.len() == self.ways {
            self.erase_lru_element();
        }
        if let Some(&slot) = self.index.get(&way) {
            self.unlink(slot);
            self.link_front(slot);
        } else {
            let slot = match self.free.pop() {
                Some(slot) => {
                    self.nodes[slot].way = way;
                    slot
                }
                None => {
                    self.nodes.push(Node {
                        way,
                        prev: None,
                        next: None,
                    });
                    self.nodes.len() - 1
                }
            };
            let _ = self.index.insert(way, slot);
            self.link_front(slot);
        }
    }

    /// Selects and commits the next victim.
    ///
    /// Removes the LRU way from the tail and immediately re-inserts the same
    /// way at the MRU end, treating "choosing a victim" as "now reusing it".
    /// Consecutive calls therefore cycle through all tracked ways in strict
    /// LRU order.
    pub fn update(&mut self) -> usize {
        // The list is never empty: construction populates every way and no
        // operation removes a node without reinserting one.
        let slot = self.tail.expect("recency list is never empty");
        let way = self.nodes[slot].way;
        self.unlink(slot);
        self.link_front(slot);
        trace!(policy = "LRU", victim = way, "committed victim way");
        way
    }

    /// Returns the fixed way count.
    #[must_use]
    pub const fn get_ways(&self) -> usize {
        self.ways
    }

    /// Looks up the arena slot tracking `way`.
    fn slot_of(&self, way: usize) -> Result<usize, ReplacementError> {
        self.index
            .get(&way)
            .copied()
            .ok_or(ReplacementError::UntrackedWay {
                way,
                ways: self.ways,
            })
    }

    /// Removes the LRU way from both the list and the map, recycling its slot.
    fn erase_lru_element(&mut self) {
        let slot = self.tail.expect("recency list is never empty");
        self.unlink(slot);
        let _ = self.index.remove(&self.nodes[slot].way);
        self.free.push(slot);
    }

    /// Detaches `slot` from the recency list, patching its neighbors.
    fn unlink(&mut self, slot: usize) {
        let prev = self.nodes[slot].prev;
        let next = self.nodes[slot].next;
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[slot].prev = None;
        self.nodes[slot].next = None;
    }

    /// Attaches a detached `slot` at the MRU end.
    fn link_front(&mut self, slot: usize) {
        self.nodes[slot].prev = None;
        self.nodes[slot].next = self.head;
        match self.head {
            Some(h) => self.nodes[h].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    /// Attaches a detached `slot` at the LRU end.
    fn link_back(&mut self, slot: usize) {
        self.nodes[slot].next = None;
        self.nodes[slot].prev = self.tail;
        match self.tail {
            Some(t) => self.nodes[t].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }
}
