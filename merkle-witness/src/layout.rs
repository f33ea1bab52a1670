//! Position arithmetic over the flattened level array.
//!
//! Levels are stored low-to-high in one `Vec`. Every level with more than
//! one node has even length (odd levels are padded by repeating their last
//! node), so for a leaf count `n`:
//!
//! ```text
//! n = 5:   [ l0 l1 l2 l3 l4 l4 | p0 p1 p2 p2 | q0 q1 | root ]
//! offset     0                   6             10      12
//! ```
//!
//! Both the builder and the proof generator go through these functions, so
//! the flattened positions cannot drift between them.

use crate::proof::WitnessSide;

/// Length of a level after padding: odd lengths above one gain a node.
#[inline]
pub fn padded_len(len: usize) -> usize {
    if len > 1 && len % 2 == 1 { len + 1 } else { len }
}

/// Iterator over the padded length of every level, leaves first, root last.
#[derive(Debug, Clone)]
pub struct LevelLens {
    next: usize,
}

impl Iterator for LevelLens {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let len = self.next;
        if len == 0 {
            return None;
        }
        self.next = if len == 1 { 0 } else { padded_len(len / 2) };
        Some(len)
    }
}

/// Padded level lengths of a tree with `leaf_count` leaves. Empty for zero.
pub fn level_lens(leaf_count: usize) -> LevelLens {
    LevelLens {
        next: padded_len(leaf_count),
    }
}

/// Total number of nodes in the flattened tree.
pub fn tree_len(leaf_count: usize) -> usize {
    level_lens(leaf_count).sum()
}

/// Number of levels below the root; equals the length of every witness path.
pub fn height(leaf_count: usize) -> usize {
    level_lens(leaf_count).count().saturating_sub(1)
}

/// A node on the path from a leaf to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCursor {
    /// Flattened position where the current level starts.
    pub level_offset: usize,
    /// Padded length of the current level.
    pub level_len: usize,
    /// Index of the node within the current level.
    pub index: usize,
}

/// Where the sibling of a path node lives and which side it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingRef {
    /// Flattened position of the sibling.
    pub position: usize,
    /// Side of the sibling relative to the path node.
    pub side: WitnessSide,
}

impl PathCursor {
    /// Cursor at leaf `leaf_index` of a tree with `leaf_count` leaves.
    pub fn at_leaf(leaf_index: usize, leaf_count: usize) -> Self {
        PathCursor {
            level_offset: 0,
            level_len: padded_len(leaf_count),
            index: leaf_index,
        }
    }

    /// Flattened position of the node under the cursor.
    pub fn position(&self) -> usize {
        self.level_offset + self.index
    }

    /// True once the cursor sits on the single-node root level.
    pub fn is_root(&self) -> bool {
        self.level_len <= 1
    }

    /// Sibling of the current node and the cursor one level up, or `None` at
    /// the root.
    pub fn step(self) -> Option<(SiblingRef, PathCursor)> {
        if self.is_root() {
            return None;
        }

        let sibling_index = self.index ^ 1;
        let side = if sibling_index % 2 == 0 {
            WitnessSide::Left
        } else {
            WitnessSide::Right
        };
        let sibling = SiblingRef {
            position: self.level_offset + sibling_index,
            side,
        };
        let parent = PathCursor {
            level_offset: self.level_offset + self.level_len,
            level_len: padded_len(self.level_len / 2),
            index: self.index / 2,
        };
        Some((sibling, parent))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::proof::WitnessSide::{Left, Right};

    fn walk(leaf_index: usize, leaf_count: usize) -> (Vec<(usize, WitnessSide)>, usize) {
        let mut cursor = PathCursor::at_leaf(leaf_index, leaf_count);
        let mut siblings = Vec::new();
        while let Some((sibling, parent)) = cursor.step() {
            siblings.push((sibling.position, sibling.side));
            cursor = parent;
        }
        (siblings, cursor.position())
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 1);
        assert_eq!(padded_len(2), 2);
        assert_eq!(padded_len(3), 4);
        assert_eq!(padded_len(5), 6);
    }

    #[test]
    fn test_level_lens() {
        assert_eq!(level_lens(0).collect::<Vec<_>>(), Vec::<usize>::new());
        assert_eq!(level_lens(1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(level_lens(2).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(level_lens(3).collect::<Vec<_>>(), vec![4, 2, 1]);
        assert_eq!(level_lens(5).collect::<Vec<_>>(), vec![6, 4, 2, 1]);
        assert_eq!(level_lens(9).collect::<Vec<_>>(), vec![10, 6, 4, 2, 1]);
        assert_eq!(level_lens(21).collect::<Vec<_>>(), vec![22, 12, 6, 4, 2, 1]);
    }

    #[test]
    fn test_tree_len_and_height() {
        assert_eq!(tree_len(1), 1);
        assert_eq!(tree_len(2), 3);
        assert_eq!(tree_len(3), 7);
        assert_eq!(tree_len(4), 7);
        assert_eq!(tree_len(5), 13);
        assert_eq!(tree_len(17), 41);
        assert_eq!(height(1), 0);
        assert_eq!(height(2), 1);
        assert_eq!(height(4), 2);
        assert_eq!(height(5), 3);
        assert_eq!(height(16), 4);
        assert_eq!(height(17), 5);
    }

    #[test]
    fn test_single_leaf_cursor_is_root() {
        assert_eq!(walk(0, 1), (vec![], 0));
    }

    #[test]
    fn test_depth_one() {
        assert_eq!(walk(0, 2), (vec![(1, Right)], 2));
        assert_eq!(walk(1, 2), (vec![(0, Left)], 2));
    }

    #[test]
    fn test_depth_two() {
        // [l0 l1 l2 l2 | p0 p1 | r]
        assert_eq!(walk(2, 3), (vec![(3, Right), (4, Left)], 6));
        assert_eq!(walk(1, 4), (vec![(0, Left), (5, Right)], 6));
    }

    #[test]
    fn test_depth_three() {
        assert_eq!(walk(2, 5), (vec![(3, Right), (6, Left), (11, Right)], 12));
        // The padded copy of l4 sits at 5; the padded copy of p2 at 9.
        assert_eq!(walk(4, 5), (vec![(5, Right), (9, Right), (10, Left)], 12));
        assert_eq!(walk(7, 8), (vec![(6, Left), (10, Left), (12, Left)], 14));
    }

    #[test]
    fn test_depth_four() {
        assert_eq!(
            walk(8, 9),
            (vec![(9, Right), (15, Right), (19, Right), (20, Left)], 22)
        );
        assert_eq!(
            walk(5, 12),
            (vec![(4, Left), (15, Right), (18, Left), (23, Right)], 24)
        );
        assert_eq!(
            walk(0, 16),
            (vec![(1, Right), (17, Right), (25, Right), (29, Right)], 30)
        );
    }

    #[test]
    fn test_depth_five() {
        assert_eq!(
            walk(16, 17),
            (
                vec![(17, Right), (27, Right), (33, Right), (37, Right), (38, Left)],
                40
            )
        );
        assert_eq!(
            walk(10, 21),
            (
                vec![(11, Right), (26, Left), (37, Right), (40, Left), (45, Right)],
                46
            )
        );
        assert_eq!(
            walk(31, 32),
            (
                vec![(30, Left), (46, Left), (54, Left), (58, Left), (60, Left)],
                62
            )
        );
    }

    /// Every walk ends on the last flattened position, one sibling per level,
    /// each sibling inside its own level.
    #[test]
    fn test_walks_stay_inside_their_levels() {
        for leaf_count in 1..=64 {
            let lens: Vec<usize> = level_lens(leaf_count).collect();
            let offsets: Vec<usize> = lens
                .iter()
                .scan(0, |acc, len| {
                    let start = *acc;
                    *acc += len;
                    Some(start)
                })
                .collect();
            for leaf_index in 0..leaf_count {
                let (siblings, root) = walk(leaf_index, leaf_count);
                assert_eq!(root, tree_len(leaf_count) - 1);
                assert_eq!(siblings.len(), height(leaf_count));
                for (level, (position, _)) in siblings.iter().enumerate() {
                    assert!(*position >= offsets[level]);
                    assert!(*position < offsets[level] + lens[level]);
                }
            }
        }
    }
}
