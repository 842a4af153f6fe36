//! File-backed sources of text and sinks/sources of bits.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::bitvec::{BitVec, BitView};


/// Produces the whole text to be encoded.
pub trait TextSource {

    fn load_text(&self) -> io::Result<String>;

}


/// A text file read line by line.
///
/// A `'\n'` is put in front of every line, the first one included, so the loaded text starts
/// with a newline and has none at the end.
#[derive(Debug, Clone)]
pub struct LineFile {

    path: PathBuf

}

impl LineFile {

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }


    pub fn path(&self) -> &Path {
        &self.path
    }

}

impl TextSource for LineFile {

    fn load_text(&self) -> io::Result<String> {

        let reader = BufReader::new(File::open(&self.path)?);
        let mut text = String::new();

        for line in reader.lines() {
            text.push('\n');
            text.push_str(&line?);
        }

        log::debug!("loaded {} bytes from {}", text.len(), self.path.display());

        Ok(text)
    }
}


/// Accepts bits one at a time.
pub trait BitSink {

    fn write_bit(&mut self, bit: bool) -> io::Result<()>;

    /// Persist everything written so far and release the underlying storage.
    fn finish(self) -> io::Result<()>;

}


/// Reads bits one at a time, in the order they were written.
pub trait BitSource {

    fn has_next(&self) -> bool;

    /// Fails with [`io::ErrorKind::UnexpectedEof`] once all bits have been read.
    fn read_bit(&mut self) -> io::Result<bool>;

}


/// Collects bits and writes them out in the [`BitVec::serialize`] layout.
///
/// The bits are written by [`BitSink::finish`], or when the writer is dropped if `finish` was
/// never called. Only `finish` reports write errors.
pub struct BitWriter<W: Write> {

    /// `None` once the bits have been written
    inner: Option<W>,
    bits: BitVec

}

impl<W: Write> BitWriter<W> {

    pub fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            bits: BitVec::new()
        }
    }


    fn write_out(&mut self) -> io::Result<()> {

        let Some(mut inner) = self.inner.take() else {
            return Ok(());
        };

        inner.write_all(&self.bits.serialize())?;
        inner.flush()
    }

}

impl BitWriter<BufWriter<File>> {

    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }

}

impl<W: Write> BitSink for BitWriter<W> {

    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.bits.push(bit);
        Ok(())
    }


    fn finish(mut self) -> io::Result<()> {
        self.write_out()
    }
}

impl<W: Write> Drop for BitWriter<W> {

    fn drop(&mut self) {
        if let Err(e) = self.write_out() {
            log::error!("failed to write {} bits on drop: {}", self.bits.len(), e);
        }
    }
}


/// Reads back bits written by a [`BitWriter`].
#[derive(Debug)]
pub struct BitReader {

    bits: BitVec,
    position: usize

}

impl BitReader {

    pub fn new(mut inner: impl Read) -> io::Result<Self> {

        let mut buf = Vec::new();
        inner.read_to_end(&mut buf)?;

        let bits = BitVec::deserialize(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(Self {
            bits,
            position: 0
        })
    }


    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(BufReader::new(File::open(path)?))
    }

}

impl BitSource for BitReader {

    fn has_next(&self) -> bool {
        self.position < self.bits.len()
    }


    fn read_bit(&mut self) -> io::Result<bool> {

        let bit = self.bits.get(self.position)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more bits to read"))?;

        self.position += 1;

        Ok(bit)
    }
}


pub fn write_bits_to_file(bits: &BitView, path: impl AsRef<Path>) -> io::Result<()> {

    let mut writer = BitWriter::create(path)?;

    for bit in bits.iter() {
        writer.write_bit(bit)?;
    }

    writer.finish()
}


pub fn read_bits_from_file(path: impl AsRef<Path>) -> io::Result<BitVec> {

    let mut reader = BitReader::open(path)?;
    let mut bits = BitVec::new();

    while reader.has_next() {
        bits.push(reader.read_bit()?);
    }

    Ok(bits)
}


#[cfg(test)]
mod tests {

    use std::fs;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use tempfile::tempdir;

    use super::*;


    #[test]
    fn line_file_prepends_newlines() {

        let dir = tempdir().unwrap();
        let path = dir.path().join("text.txt");
        fs::write(&path, "first\nsecond\r\nthird\n").unwrap();

        let text = LineFile::new(&path).load_text().unwrap();

        assert_eq!(text, "\nfirst\nsecond\nthird");
    }


    #[test]
    fn line_file_missing() {

        let dir = tempdir().unwrap();

        let err = LineFile::new(dir.path().join("missing.txt")).load_text().unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }


    #[test]
    fn bits_survive_file() {

        let dir = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        for (i, len) in [0_usize, 1, 7, 8, 9, 1000].into_iter().enumerate() {

            let bits: BitVec = (0..len).map(|_| rng.gen_bool(0.5)).collect();
            let path = dir.path().join(format!("bits{i}.enc"));

            write_bits_to_file(&bits.as_bit_view(), &path).unwrap();

            assert_eq!(fs::metadata(&path).unwrap().len() as usize, 1 + bits.least_len_bytes());
            assert_eq!(read_bits_from_file(&path).unwrap(), bits);
        }
    }


    #[test]
    fn reader_stops_at_end() {

        let mut buf = Vec::new();

        let mut writer = BitWriter::new(&mut buf);
        writer.write_bit(true).unwrap();
        writer.write_bit(false).unwrap();
        writer.finish().unwrap();

        let mut reader = BitReader::new(buf.as_slice()).unwrap();

        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(!reader.has_next());
        assert_eq!(reader.read_bit().unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }


    #[test]
    fn finish_writes_once() {

        let mut buf = Vec::new();

        let mut writer = BitWriter::new(&mut buf);
        writer.write_bit(true).unwrap();
        writer.finish().unwrap();

        assert_eq!(buf, [7, 0b1000_0000]);
    }


    #[test]
    fn dropped_writer_keeps_bits() {

        let dir = tempdir().unwrap();
        let path = dir.path().join("dropped.enc");

        {
            let mut writer = BitWriter::create(&path).unwrap();
            for bit in [true, false, true] {
                writer.write_bit(bit).unwrap();
            }
        }

        assert_eq!(read_bits_from_file(&path).unwrap(), BitVec::from_bool_slice(&[true, false, true]));
    }


    #[test]
    fn reader_rejects_empty_file() {

        let err = BitReader::new(io::empty()).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

}
