use std::env;
use std::fs;

use huffman_tree_codec::{CodeTable, FrequencyTable, Tree};


fn main() {

    let path = env::args().nth(1)
        .unwrap_or_else(|| panic!("Usage: compression_rates <text file>"));

    let text = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("Could not open file {path}: {err}"));

    let frequencies = FrequencyTable::count(text.chars());

    let tree = Tree::build(&frequencies)
        .unwrap_or_else(|err| panic!("Could not build tree: {err}"));

    let codes = CodeTable::derive(&tree);

    let encoded_bits = codes.weighted_length(&frequencies);
    let fixed_width_bits = frequencies.total() * (usize::BITS - (frequencies.len() - 1).leading_zeros()).max(1) as usize;

    println!("{path}\nDistinct symbols: {}\nOriginal size: {} KiB\nCompressed size: {} KiB\nFixed width size: {} KiB\nCompression rate: {:.2}",
        frequencies.len(), text.len() / 1024, encoded_bits / 8 / 1024, fixed_width_bits / 8 / 1024, (text.len() * 8) as f64 / encoded_bits as f64);

}
