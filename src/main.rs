use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use huffman_tree_codec::io::{read_bits_from_file, write_bits_to_file, LineFile, TextSource};
use huffman_tree_codec::{BitVec, Codec, EncodeError};


/// How much of a decoded text to show
const PREVIEW_CHARS: usize = 200;


#[derive(Parser)]
#[command(author, version, about = "Huffman encode text files into bit files and back", long_about = None)]
struct Args {

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,

}

#[derive(Subcommand)]
enum Mode {

    /// Encode a text file into a bit file.
    ///
    /// The bit file does not store the tree, so it cannot be decoded later on its own.
    /// Use `roundtrip` or `demo` to encode and decode within one run.
    Encode {
        input: PathBuf,
        output: PathBuf,
        /// Print the tree used for encoding
        #[arg(long)]
        print_tree: bool,
    },

    /// Encode a text file, write the bits next to it, read them back and decode them
    Roundtrip {
        input: PathBuf,
    },

    /// Run the round trip over the given files, then over a single repeated character and over empty text
    Demo {
        files: Vec<PathBuf>,
    },

}


#[derive(Debug, Error)]
enum CliError {

    #[error(transparent)]
    Io (#[from] io::Error),

    #[error(transparent)]
    Encode (#[from] EncodeError),

    #[error("decoded text of {path} differs from the original")]
    Mismatch { path: PathBuf },

}


fn init_logging(verbose: u8) {

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .init();
}


fn encoded_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(".enc");
    PathBuf::from(path)
}


fn encode_file(input: &Path, output: &Path, print_tree: bool) -> Result<(), CliError> {

    let text = LineFile::new(input).load_text()?;

    let mut codec = Codec::new();
    let encoded = codec.encode(text.chars())?;

    if print_tree {
        if let Some(tree) = codec.tree() {
            println!("{tree}");
        }
    }

    write_bits_to_file(&encoded.as_bit_view(), output)?;

    println!("Encoding done, {} bits", encoded.len());

    Ok(())
}


fn round_trip_file(input: &Path) -> Result<(), CliError> {

    let text = LineFile::new(input).load_text()?;

    let mut codec = Codec::new();
    let encoded = codec.encode(text.chars())?;

    if let Some(tree) = codec.tree() {
        println!("{tree}");
    }

    let output = encoded_path(input);
    write_bits_to_file(&encoded.as_bit_view(), &output)?;

    println!("Encoding done, {} bits (text is {} bytes)", encoded.len(), text.len());

    let read_back = read_bits_from_file(&output)?;
    let decoded: String = codec.decode(&read_back.as_bit_view()).iter().collect();

    println!("{}", decoded.chars().take(PREVIEW_CHARS).collect::<String>());

    if decoded != text {
        return Err(CliError::Mismatch { path: input.to_owned() });
    }

    Ok(())
}


fn round_trip_text(text: &str) -> Result<String, CliError> {

    let mut codec = Codec::new();
    let encoded: BitVec = codec.encode(text.chars())?;

    Ok(codec.decode(&encoded.as_bit_view()).iter().collect())
}


fn demo(files: &[PathBuf]) -> Result<(), CliError> {

    for file in files {
        round_trip_file(file)?;
        println!("\n---");
    }

    println!("{}", round_trip_text("aaaaaaaaa")?);
    println!("\n---");

    println!("text: {}", round_trip_text("")?);

    Ok(())
}


fn main() -> Result<(), CliError> {

    let args = Args::parse();

    init_logging(args.verbose);

    match args.mode {
        Mode::Encode { input, output, print_tree } => encode_file(&input, &output, print_tree),
        Mode::Roundtrip { input } => round_trip_file(&input),
        Mode::Demo { files } => demo(&files),
    }
}
