use std::fmt;

use crate::error::DeserializeError;


/// An owned, growable sequence of bits.
/// Bits are packed most significant first; only the last byte may be partially used.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitVec {

    /// The packed bits
    raw_data: Vec<u8>,
    /// How many low bits of the last byte are unused.
    /// Padding bits are always zero
    last_byte_padding: u8

}

impl BitVec {

    pub const fn new() -> Self {
        Self {
            raw_data: Vec::new(),
            last_byte_padding: 0
        }
    }


    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self {
            raw_data: Vec::with_capacity(least_bytes_repr_for_bits(bit_capacity)),
            last_byte_padding: 0
        }
    }


    pub fn len(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    pub fn least_len_bytes(&self) -> usize {
        self.raw_data.len()
    }


    pub fn get(&self, i: usize) -> Option<bool> {
        self.as_bit_view().get(i)
    }


    pub fn push(&mut self, bit: bool) {

        match self.raw_data.last_mut() {

            Some(last_byte) if self.last_byte_padding != 0 => {
                *last_byte |= (bit as u8) << (self.last_byte_padding - 1);
                self.last_byte_padding -= 1;
            },

            _ => {
                self.raw_data.push((bit as u8) << 7);
                self.last_byte_padding = 7;
            }
        }
    }


    /// Append all the bits of `bit_view` at the end of this sequence.
    pub fn extend_from_bits(&mut self, bit_view: &BitView) {

        if self.last_byte_padding == 0 {
            // Byte-aligned: the packed representation can be copied as is
            self.raw_data.extend_from_slice(bit_view.raw_data);
            self.last_byte_padding = bit_view.last_byte_padding;
        } else {
            for bit in bit_view.iter() {
                self.push(bit);
            }
        }
    }


    pub fn as_bit_view(&self) -> BitView<'_> {
        BitView {
            raw_data: &self.raw_data,
            last_byte_padding: self.last_byte_padding
        }
    }


    pub fn iter(&self) -> BitIterator<'_> {
        BitIterator {
            bits: self.as_bit_view(),
            i: 0,
        }
    }


    /// Return the packed bytes and the number of unused bits in the last byte.
    pub fn as_padded_bytes(&self) -> (&[u8], u8) {
        (
            &self.raw_data,
            self.last_byte_padding
        )
    }


    pub fn from_bool_slice(bools: &[bool]) -> Self {
        bools.iter().copied().collect()
    }


    pub fn to_bool_slice(&self) -> Box<[bool]> {
        self.iter().collect()
    }


    pub fn starts_with(&self, prefix: &BitVec) -> bool {
        prefix.len() <= self.len()
            && self.iter().zip(prefix.iter()).all(|(a, b)| a == b)
    }


    /// Layout: one byte holding the padding of the last data byte, followed by the data bytes.
    pub fn serialize(&self) -> Box<[u8]> {

        let mut buf = Vec::with_capacity(1 + self.least_len_bytes());

        buf.push(self.last_byte_padding);
        buf.extend_from_slice(&self.raw_data);

        buf.into_boxed_slice()
    }


    pub fn deserialize(input: &[u8]) -> Result<Self, DeserializeError> {

        let (&last_byte_padding, raw_data) = input.split_first()
            .ok_or(DeserializeError::MissingPaddingByte)?;

        if last_byte_padding > 7 || (raw_data.is_empty() && last_byte_padding != 0) {
            return Err(DeserializeError::InvalidPadding(last_byte_padding));
        }

        let mut raw_data = raw_data.to_vec();
        if let Some(last_byte) = raw_data.last_mut() {
            // Keep the padding bits zeroed so that equality stays structural
            *last_byte &= 0xFF_u8 << last_byte_padding;
        }

        Ok(Self {
            raw_data,
            last_byte_padding
        })
    }

}

impl FromIterator<bool> for BitVec {

    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {

        let iter = iter.into_iter();
        let mut res = Self::with_capacity(iter.size_hint().0);

        for bit in iter {
            res.push(bit);
        }

        res
    }
}

impl Extend<bool> for BitVec {

    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl fmt::Debug for BitVec {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_bit_view(), f)
    }
}


pub const fn least_bytes_repr_for_bits(bit_count: usize) -> usize {
    bit_count / 8 + (bit_count % 8 != 0) as usize
}


/// A borrowed sequence of bits.
#[derive(Clone, Copy)]
pub struct BitView<'a> {

    raw_data: &'a [u8],
    last_byte_padding: u8

}

impl<'a> BitView<'a> {

    pub fn iter(&self) -> BitIterator<'a> {
        BitIterator {
            bits: *self,
            i: 0
        }
    }


    pub fn len(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    pub fn get(&self, i: usize) -> Option<bool> {

        if i >= self.len() {
            return None;
        }

        let byte = self.raw_data[i / 8];

        Some(
            (byte & (1_u8 << (7 - i % 8))) != 0
        )
    }


    pub fn to_bit_vec(&self) -> BitVec {
        self.iter().collect()
    }

}

impl fmt::Debug for BitView<'_> {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BitView(")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}


pub struct BitIterator<'a> {

    bits: BitView<'a>,
    i: usize

}

impl Iterator for BitIterator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {

        let bit = self.bits.get(self.i)?;
        self.i += 1;
        Some(bit)
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len() - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}
