use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::error::BuildError;
use crate::frequency::FrequencyTable;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {

    Parent { count: usize, left: Box<Node<T>>, right: Box<Node<T>> },
    Leaf { count: usize, value: T },
    /// Root of a tree built from a single distinct value.
    /// Its only child sits on the left so that the value gets a one-bit code.
    Wrapper { count: usize, child: Box<Node<T>> },

}

impl<T> Node<T> {

    pub const fn count(&self) -> usize {
        match self {
            Node::Parent { count, .. } |
            Node::Leaf { count, .. } |
            Node::Wrapper { count, .. }
                => *count
        }
    }


    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }


    pub fn value(&self) -> Option<&T> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Parent { .. } | Node::Wrapper { .. } => None,
        }
    }


    pub fn left(&self) -> Option<&Node<T>> {
        match self {
            Node::Parent { left, .. } => Some(left),
            Node::Wrapper { child, .. } => Some(child),
            Node::Leaf { .. } => None,
        }
    }


    pub fn right(&self) -> Option<&Node<T>> {
        match self {
            Node::Parent { right, .. } => Some(right),
            Node::Wrapper { .. } | Node::Leaf { .. } => None,
        }
    }


    /// The child reached by following `bit`: `false` is left, `true` is right.
    pub fn child(&self, bit: bool) -> Option<&Node<T>> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }


    fn merge(left: Self, right: Self) -> Self {
        Node::Parent {
            count: left.count() + right.count(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

}

impl<T> fmt::Display for Node<T>
where
    T: fmt::Display
{

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {

        f.write_str("([")?;
        if let Some(value) = self.value() {
            write!(f, "{value}")?;
        }
        write!(f, " {}] ", self.count())?;

        if let Some(left) = self.left() {
            write!(f, "{left}")?;
        }
        f.write_str(" ")?;
        if let Some(right) = self.right() {
            write!(f, "{right}")?;
        }

        f.write_str(")")
    }
}


/// Pending subtree in the merge queue.
struct QueueEntry<T> {

    count: usize,
    /// Insertion order, used to break ties between equal counts
    sequence: usize,
    node: Node<T>,

}

impl<T> PartialEq for QueueEntry<T> {

    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueueEntry<T> {}

impl<T> PartialOrd for QueueEntry<T> {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueEntry<T> {

    // Reversed: `BinaryHeap` is a max-heap and the smallest entry must come out first
    fn cmp(&self, other: &Self) -> Ordering {
        other.count.cmp(&self.count)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}


/// An immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<T> {

    root: Node<T>

}

impl<T> Tree<T>
where
    T: Clone
{

    /// Build an optimal prefix code tree from value frequencies.
    ///
    /// The two least frequent subtrees are merged until one remains; the first one taken
    /// becomes the left child. Equal counts are taken in insertion order: leaves in order of
    /// first occurrence of their value, then merged subtrees in the order they were created.
    pub fn build(frequencies: &FrequencyTable<T>) -> Result<Self, BuildError> {

        let mut leaves = frequencies.iter()
            .map(|(value, count)| Node::Leaf { count, value: value.clone() });

        let first = leaves.next().ok_or(BuildError::EmptyFrequencyTable)?;

        if frequencies.len() == 1 {
            log::debug!("single distinct value, wrapping leaf of count {}", first.count());
            return Ok(Self {
                root: Node::Wrapper {
                    count: first.count(),
                    child: Box::new(first)
                }
            });
        }

        let mut queue: BinaryHeap<QueueEntry<T>> = std::iter::once(first)
            .chain(leaves)
            .enumerate()
            .map(|(sequence, node)| QueueEntry { count: node.count(), sequence, node })
            .collect();

        let mut next_sequence = queue.len();

        while queue.len() > 1 {

            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                unreachable!()
            };

            let node = Node::merge(left.node, right.node);
            queue.push(QueueEntry { count: node.count(), sequence: next_sequence, node });
            next_sequence += 1;
        }

        // At least two leaves went in and every merge removes one entry
        let Some(root) = queue.pop() else {
            unreachable!()
        };

        let tree = Self { root: root.node };

        log::debug!("built tree with {} leaves, root count {}", tree.leaf_count(), tree.count());

        Ok(tree)
    }

}

impl<T> Tree<T> {

    pub const fn root(&self) -> &Node<T> {
        &self.root
    }


    /// Sum of the counts of all leaves.
    pub const fn count(&self) -> usize {
        self.root.count()
    }


    pub const fn is_degenerate(&self) -> bool {
        matches!(self.root, Node::Wrapper { .. })
    }


    /// Every leaf value paired with its count and its depth below the root.
    pub fn leaves(&self) -> Vec<(&T, usize, usize)> {

        let mut leaves = Vec::new();
        let mut stack = vec![(&self.root, 0_usize)];

        while let Some((node, depth)) = stack.pop() {

            if let Node::Leaf { count, value } = node {
                leaves.push((value, *count, depth));
                continue;
            }

            stack.extend(node.right().map(|right| (right, depth + 1)));
            stack.extend(node.left().map(|left| (left, depth + 1)));
        }

        leaves
    }


    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }


    /// Sum over all leaves of count times depth.
    /// This is the length in bits of the data the tree was built from once encoded.
    pub fn weighted_path_length(&self) -> usize {
        self.leaves()
            .into_iter()
            .map(|(_, count, depth)| count * depth)
            .sum()
    }

}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display
{

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}


#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;


    fn check_structure<T>(node: &Node<T>) {

        match node {

            Node::Parent { count, left, right } => {
                assert_eq!(*count, left.count() + right.count());
                check_structure(left);
                check_structure(right);
            },

            Node::Wrapper { .. } => panic!("wrapper below the root"),

            Node::Leaf { .. } => {},
        }
    }


    /// Smallest weighted length of any prefix code for `counts`.
    /// Tries every assignment of code lengths satisfying the Kraft inequality.
    fn brute_force_optimum(counts: &[usize]) -> usize {

        let n = counts.len();
        let max_len = n - 1;
        let mut lengths = vec![1_usize; n];
        let mut best = usize::MAX;

        loop {

            let kraft: u64 = lengths.iter()
                .map(|&l| 1_u64 << (max_len - l))
                .sum();

            if kraft <= 1_u64 << max_len {
                let cost = counts.iter().zip(&lengths).map(|(c, l)| c * l).sum();
                best = best.min(cost);
            }

            let mut i = 0;
            loop {
                if i == n {
                    return best;
                }
                if lengths[i] < max_len {
                    lengths[i] += 1;
                    break;
                }
                lengths[i] = 1;
                i += 1;
            }
        }
    }


    #[test]
    fn empty_table() {

        let table = FrequencyTable::count(String::new().chars());

        assert_eq!(Tree::build(&table), Err(BuildError::EmptyFrequencyTable));
    }


    #[test]
    fn degenerate_alphabet() {

        let tree = Tree::build(&FrequencyTable::count("aaaaaaaaa".chars())).unwrap();

        assert!(tree.is_degenerate());
        assert_eq!(tree.count(), 9);
        assert_eq!(tree.leaves(), [(&'a', 9, 1)]);
        assert!(!tree.root().is_leaf());
        assert!(tree.root().right().is_none());
        assert_eq!(tree.root().left().and_then(Node::value), Some(&'a'));
    }


    #[test]
    fn two_values_merge_once() {

        let tree = Tree::build(&FrequencyTable::count("abb".chars())).unwrap();

        assert_eq!(tree.to_string(), "([ 3] ([a 1]  ) ([b 2]  ))");
        assert_eq!(tree.leaves().len(), 2);
        assert_eq!(tree.weighted_path_length(), 3);
    }


    #[test]
    fn abracadabra_shape() {

        let tree = Tree::build(&FrequencyTable::count("abracadabra".chars())).unwrap();

        assert!(!tree.is_degenerate());
        assert_eq!(tree.count(), 11);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.weighted_path_length(), 23);
        check_structure(tree.root());
    }


    #[test]
    fn build_is_deterministic() {

        let text = "the quick brown fox jumps over the lazy dog";

        let a = Tree::build(&FrequencyTable::count(text.chars())).unwrap();
        let b = Tree::build(&FrequencyTable::count(text.chars())).unwrap();

        assert_eq!(a, b);
    }


    #[test]
    fn ties_follow_first_occurrence() {

        // All counts equal: the first two values seen are merged first
        let tree = Tree::build(&FrequencyTable::count("abcd".chars())).unwrap();

        assert_eq!(tree.to_string(), "([ 4] ([ 2] ([a 1]  ) ([b 1]  )) ([ 2] ([c 1]  ) ([d 1]  )))");
    }


    #[test]
    fn display_degenerate() {

        let tree = Tree::build(&FrequencyTable::count("xx".chars())).unwrap();

        assert_eq!(tree.to_string(), "([ 2] ([x 2]  ) )");
    }


    #[test]
    fn random_structure_and_optimality() {

        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..200 {

            let symbols = rng.gen_range(2..=6_u8);
            let data: Vec<u8> = (0..symbols)
                .flat_map(|s| std::iter::repeat(s).take(rng.gen_range(1..=20)))
                .collect();

            let table = FrequencyTable::count(data.iter().copied());
            let tree = Tree::build(&table).unwrap();

            check_structure(tree.root());
            assert_eq!(tree.leaf_count(), table.len());
            assert_eq!(tree.count(), table.total());

            let counts: Vec<usize> = table.iter().map(|(_, count)| count).collect();
            assert_eq!(tree.weighted_path_length(), brute_force_optimum(&counts));
        }
    }

}
