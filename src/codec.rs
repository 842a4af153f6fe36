use std::fmt;
use std::hash::Hash;

use crate::bitvec::{BitVec, BitView};
use crate::code_table::CodeTable;
use crate::error::{BuildError, EncodeError};
use crate::frequency::FrequencyTable;
use crate::tree::Tree;


/// Concatenate the codes of all values in `data`.
pub fn encode<T>(data: impl IntoIterator<Item = T>, codes: &CodeTable<T>) -> Result<BitVec, EncodeError>
where
    T: Eq + Hash + Clone + fmt::Debug
{

    let mut encoded = BitVec::new();

    for (position, value) in data.into_iter().enumerate() {

        let code = codes.get(&value)
            .ok_or_else(|| EncodeError::UnknownSymbol { position, symbol: format!("{value:?}") })?;

        encoded.extend_from_bits(&code.as_bit_view());
    }

    Ok(encoded)
}


/// Walk the tree bit by bit, emitting a value and restarting from the root every time a leaf
/// is reached.
///
/// Bits left over at the end that do not lead to a leaf are dropped.
pub fn decode<T>(bits: &BitView, tree: &Tree<T>) -> Box<[T]>
where
    T: Clone
{

    let root = tree.root();

    let mut decoded = Vec::new();
    let mut node = root;
    let mut pending_bits = 0_usize;

    for bit in bits.iter() {

        match node.child(bit) {

            Some(next) => {
                if let Some(value) = next.value() {
                    decoded.push(value.clone());
                    node = root;
                    pending_bits = 0;
                } else {
                    node = next;
                    pending_bits += 1;
                }
            },

            None => {
                // Only the right side of a single-value tree is missing
                log::warn!("bit leads nowhere after {} bits of a code, restarting from the root", pending_bits);
                node = root;
                pending_bits = 0;
            }
        }
    }

    if pending_bits != 0 {
        log::warn!("discarding {} trailing bits that do not complete a code", pending_bits);
    }

    decoded.into_boxed_slice()
}


/// Holds the tree and the code table derived from it.
///
/// A `Codec` starts empty. The first non-empty [`Codec::encode`] builds the tree from the data
/// being encoded; later calls reuse it until [`Codec::rebuild`] or [`Codec::reset`].
#[derive(Debug, Clone)]
pub struct Codec<T> {

    state: Option<(Tree<T>, CodeTable<T>)>

}

impl<T> Codec<T>
where
    T: Eq + Hash + Clone + fmt::Debug
{

    pub const fn new() -> Self {
        Self {
            state: None
        }
    }


    pub fn with_tree(tree: Tree<T>) -> Self {
        let codes = CodeTable::derive(&tree);
        Self {
            state: Some((tree, codes))
        }
    }


    /// Build a codec whose tree fits `data`.
    pub fn from_data(data: impl IntoIterator<Item = T>) -> Result<Self, BuildError> {
        let tree = Tree::build(&FrequencyTable::count(data))?;
        Ok(Self::with_tree(tree))
    }


    /// Replace the current tree and codes with ones built from `data`.
    /// On error the codec is left empty.
    pub fn rebuild(&mut self, data: impl IntoIterator<Item = T>) -> Result<(), BuildError> {
        self.state = None;
        *self = Self::from_data(data)?;
        Ok(())
    }


    pub fn reset(&mut self) {
        self.state = None;
    }


    pub fn tree(&self) -> Option<&Tree<T>> {
        self.state.as_ref().map(|(tree, _)| tree)
    }


    pub fn codes(&self) -> Option<&CodeTable<T>> {
        self.state.as_ref().map(|(_, codes)| codes)
    }


    pub fn encode(&mut self, data: impl IntoIterator<Item = T> + Clone) -> Result<BitVec, EncodeError> {

        if self.state.is_none() {
            // Building only fails on empty data, which encodes to nothing
            if let Ok(tree) = Tree::build(&FrequencyTable::count(data.clone())) {
                log::debug!("no tree yet, built one from the data being encoded");
                *self = Self::with_tree(tree);
            }
        }

        match self.codes() {
            Some(codes) => encode(data, codes),
            None => Ok(BitVec::new()),
        }
    }


    /// Decode with the current tree. Without a tree the result is empty.
    pub fn decode(&self, bits: &BitView) -> Box<[T]> {
        match self.tree() {
            Some(tree) => decode(bits, tree),
            None => Box::new([]),
        }
    }

}

impl<T> Default for Codec<T>
where
    T: Eq + Hash + Clone + fmt::Debug
{

    fn default() -> Self {
        Self::new()
    }
}
