use std::collections::HashMap;
use std::hash::Hash;

use crate::bitvec::BitVec;
use crate::frequency::FrequencyTable;
use crate::tree::{Node, Tree};


/// Maps every value of a tree to the path from the root to its leaf.
#[derive(Debug, Clone)]
pub struct CodeTable<T> {

    codes: HashMap<T, BitVec>

}

impl<T> CodeTable<T>
where
    T: Eq + Hash + Clone
{

    /// Walk the tree depth first. Every pending node carries its own copy of the path that
    /// leads to it, so siblings never see each other's bits.
    pub fn derive(tree: &Tree<T>) -> Self {

        let mut codes = HashMap::new();
        let mut stack: Vec<(&Node<T>, BitVec)> = vec![(tree.root(), BitVec::new())];

        while let Some((node, path)) = stack.pop() {

            if let Node::Leaf { value, .. } = node {
                codes.insert(value.clone(), path);
                continue;
            }

            if let Some(right) = node.right() {
                let mut right_path = path.clone();
                right_path.push(true);
                stack.push((right, right_path));
            }

            if let Some(left) = node.left() {
                let mut left_path = path;
                left_path.push(false);
                stack.push((left, left_path));
            }
        }

        log::debug!("derived {} codes", codes.len());

        Self { codes }
    }


    pub fn get(&self, value: &T) -> Option<&BitVec> {
        self.codes.get(value)
    }


    pub fn contains(&self, value: &T) -> bool {
        self.codes.contains_key(value)
    }


    /// Total encoded length in bits of data with the given frequencies.
    /// Values without a code are ignored.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<T>) -> usize {
        frequencies.iter()
            .filter_map(|(value, count)| self.get(value).map(|code| code.len() * count))
            .sum()
    }

}

impl<T> CodeTable<T> {

    pub fn len(&self) -> usize {
        self.codes.len()
    }


    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }


    pub fn iter(&self) -> impl Iterator<Item = (&T, &BitVec)> + '_ {
        self.codes.iter()
    }


    /// Whether no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {

        let codes: Vec<&BitVec> = self.codes.values().collect();

        codes.iter().enumerate().all(|(i, a)| {
            codes[i + 1..].iter()
                .all(|b| !a.starts_with(b) && !b.starts_with(a))
        })
    }

}
