//! Pseudo-LRU (Tree-based) Replacement Policy.
//!
//! PLRU approximates Least Recently Used with a perfect binary tree of
//! direction bits over the ways of a cache set. Each internal node holds one
//! flag naming the subtree that currently contains the eviction candidate;
//! the unique root-to-leaf path reachable by following the flags ends at the
//! victim. Accessing a way flips every flag on its leaf-to-root path that
//! still points toward the accessed side, steering future victims away from
//! recently used ways.
//!
//! The tree lives in an arena of parent-linked nodes. "Which side of my
//! parent am I" is answered by comparing a child's arena index against the
//! parent's stored left child, so the upward walk needs no extra bookkeeping.
//!
//! This policy models only the victim-selection decision (performance
//! estimation); functional allocation bookkeeping (`allocate`,
//! `set_to_erase`) is rejected at the [`CachePolicy`](super::CachePolicy)
//! level.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `update()`: O(log W) where W is the number of ways
//! - **Space Complexity:** O(W) nodes, one direction bit per internal node
//! - **Hardware Cost:** Low - W-1 bits of state per set
//! - **Best Case:** Tracks LRU closely for most access patterns
//! - **Worst Case:** Pathological patterns can evict recently useful lines

use tracing::trace;

use crate::error::ReplacementError;

/// Which child of an internal node the direction flag selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// The first (leftmost) child.
    Left,
    /// The second child.
    Right,
}

impl Side {
    /// Returns the opposite side.
    const fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Payload of one tree node.
#[derive(Debug, Clone, Copy)]
enum NodeKind {
    /// Internal node: both children plus the direction flag naming the
    /// subtree that holds the current eviction candidate.
    Internal {
        /// Arena index of the left child.
        left: usize,
        /// Arena index of the right child.
        right: usize,
        /// Side whose subtree holds the current eviction candidate.
        flag: Side,
    },
    /// Leaf node labeled with a way index.
    Leaf {
        /// The way this leaf represents.
        way: usize,
    },
}

/// One node of the decision tree.
#[derive(Debug, Clone, Copy)]
struct TreeNode {
    /// Arena index of the parent; `None` only for the root.
    parent: Option<usize>,
    /// Node payload.
    kind: NodeKind,
}

/// Pseudo-LRU policy state for one cache set.
///
/// All flags start `Left`, so way 0 (the leftmost leaf) is the initial
/// victim. `ways == 1` degenerates to a single leaf acting as root, with no
/// flags to maintain.
#[derive(Debug, Clone)]
pub struct PlruPolicy {
    /// Node arena; children are pushed before their parent.
    nodes: Vec<TreeNode>,
    /// Arena index of the root node.
    root: usize,
    /// Way index to leaf arena index.
    leaves: Vec<usize>,
    /// Fixed way count.
    ways: usize,
}

impl PlruPolicy {
    /// Creates a Pseudo-LRU policy over `ways` ways.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::ZeroWays`] when `ways == 0` and
    /// [`ReplacementError::NotPowerOfTwo`] when `ways` is not a power of two;
    /// a perfect binary tree requires a power-of-two leaf count.
    pub fn new(ways: usize) -> Result<Self, ReplacementError> {
        let depth = tree_depth(ways)?;
        let mut nodes = Vec::with_capacity(2 * ways - 1);
        let mut leaves = Vec::with_capacity(ways);
        let mut next_way = 0;
        let root = build_subtree(&mut nodes, &mut leaves, depth, &mut next_way);
        Ok(Self {
            nodes,
            root,
            leaves,
            ways,
        })
    }

    /// Records an access to `way`, flipping every flag on its leaf-to-root
    /// path that points toward the accessed side.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::UntrackedWay`] if `way` is outside
    /// `[0, ways)`.
    pub fn touch(&mut self, way: usize) -> Result<(), ReplacementError> {
        if way >= self.ways {
            return Err(ReplacementError::UntrackedWay {
                way,
                ways: self.ways,
            });
        }
        self.mark_used(self.leaves[way]);
        Ok(())
    }

    /// Selects and commits the next victim.
    ///
    /// Follows the direction flags from the root to a leaf, then marks that
    /// leaf's way as just used (mirroring exact LRU's decide-and-commit
    /// `update` semantics) and returns its label.
    pub fn update(&mut self) -> usize {
        let mut id = self.root;
        while let NodeKind::Internal { left, right, flag } = self.nodes[id].kind {
            id = match flag {
                Side::Left => left,
                Side::Right => right,
            };
        }
        let way = match self.nodes[id].kind {
            NodeKind::Leaf { way } => way,
            NodeKind::Internal { .. } => unreachable!("descent always ends at a leaf"),
        };
        self.mark_used(id);
        trace!(policy = "Pseudo-LRU", victim = way, "committed victim way");
        way
    }

    /// Returns the fixed way count.
    #[must_use]
    pub const fn get_ways(&self) -> usize {
        self.ways
    }

    /// Walks from `leaf` up to the root, turning each flag that points toward
    /// the side just ascended from away from it.
    fn mark_used(&mut self, leaf: usize) {
        let mut child = leaf;
        while let Some(parent) = self.nodes[child].parent {
            if let NodeKind::Internal { left, flag, .. } = &mut self.nodes[parent].kind {
                let side = if *left == child { Side::Left } else { Side::Right };
                if *flag == side {
                    *flag = side.flip();
                }
            }
            child = parent;
        }
    }
}

/// Validates `ways` and returns the tree depth (`log2(ways)`).
fn tree_depth(ways: usize) -> Result<u32, ReplacementError> {
    if ways == 0 {
        return Err(ReplacementError::ZeroWays);
    }
    if !ways.is_power_of_two() {
        return Err(ReplacementError::NotPowerOfTwo(ways));
    }
    Ok(ways.trailing_zeros())
}

/// Builds a perfect subtree of the given `depth`, returning its arena index.
///
/// The way counter is threaded through the recursion explicitly; the left
/// subtree is completed before its sibling, so leaf labels come out
/// monotonically left-to-right and `leaves[way]` lands at the right arena
/// index as a side effect of push order.
fn build_subtree(
    nodes: &mut Vec<TreeNode>,
    leaves: &mut Vec<usize>,
    depth: u32,
    next_way: &mut usize,
) -> usize {
    if depth == 0 {
        let way = *next_way;
        *next_way += 1;
        let id = nodes.len();
        nodes.push(TreeNode {
            parent: None,
            kind: NodeKind::Leaf { way },
        });
        leaves.push(id);
        id
    } else {
        let left = build_subtree(nodes, leaves, depth - 1, next_way);
        let right = build_subtree(nodes, leaves, depth - 1, next_way);
        let id = nodes.len();
        nodes.push(TreeNode {
            parent: None,
            kind: NodeKind::Internal {
                left,
                right,
                flag: Side::Left,
            },
        });
        nodes[left].parent = Some(id);
        nodes[right].parent = Some(id);
        id
    }
}
