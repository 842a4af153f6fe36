//! Huffman coding over any hashable value type.
//!
//! ```
//! use huffman_tree_codec::{CodeTable, FrequencyTable, Tree, decode, encode};
//!
//! let text = "abracadabra";
//!
//! let tree = Tree::build(&FrequencyTable::count(text.chars()))?;
//! let codes = CodeTable::derive(&tree);
//!
//! let encoded = encode(text.chars(), &codes)?;
//! let decoded: String = decode(&encoded.as_bit_view(), &tree).iter().collect();
//!
//! assert_eq!(decoded, text);
//! assert_eq!(encoded.len(), 23);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bitvec;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod io;
pub mod tree;

pub use bitvec::{BitVec, BitView};
pub use code_table::CodeTable;
pub use codec::{decode, encode, Codec};
pub use error::{BuildError, DeserializeError, EncodeError};
pub use frequency::FrequencyTable;
pub use tree::{Node, Tree};
