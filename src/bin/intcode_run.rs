// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Run an arbitrary Intcode program, either with inputs given on the command line, or
//! interactively in Aft Scaffolding Control and Information Interface mode, using stdin and
//! stdout for I/O

use intcode::ascii::{self, AsciiError};
use intcode::prelude::*;
use intcode::solution::init_logging;
use intcode::{InterpreterError, ParseError};
use std::error::Error;
use std::fmt::{self, Display};
use std::fs::{self, read_to_string};
use std::io::{self, stdin};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use itertools::Itertools;

#[derive(PartialEq, Clone, Copy, ValueEnum)]
enum CodeFormat {
    /// comma-separated ASCII-encoded decimal numbers
    #[value(alias("text"))]
    #[value(alias("aoc"))]
    Ascii,
    /// little-endian 64-bit integers
    #[cfg_attr(target_endian = "little", value(alias("binary-native")))]
    #[value(name("binary-little-endian"), alias("binle"))]
    LittleEndian,
    #[cfg_attr(target_endian = "big", value(alias("binary-native")))]
    #[value(name("binary-big-endian"), alias("binbe"))]
    /// big-endian 64-bit integers
    BigEndian,
}

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Intcode interpreter", long_about = None)]
struct Args {
    #[arg(help = "The program to run")]
    source: PathBuf,
    #[arg(help = "Input format for the intcode")]
    #[arg(short, long)]
    #[arg(default_value = "ascii")]
    format: CodeFormat,
    #[arg(help = "Comma-separated integers to queue as input")]
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    input: Vec<i64>,
    #[arg(help = "Read further input from stdin as ASCII text, and print output as ASCII")]
    #[arg(long)]
    ascii: bool,
    #[arg(short, long, action = ArgAction::Count)]
    #[arg(help = "Log more details to stderr (repeatable)")]
    verbose: u8,
}

fn get_line() -> Result<Vec<i64>, RunError> {
    let mut buf = String::new();
    if stdin().read_line(&mut buf).map_err(RunError::Io)? == 0 {
        return Err(RunError::EndOfInput);
    }
    Ok(ascii::encode(&buf)?)
}

fn print_ascii(intcode_output: &[i64]) -> Result<(), RunError> {
    print!("{}", ascii::decode(intcode_output)?);
    Ok(())
}

fn interactive_run(mut interp: Interpreter, inputs: Vec<i64>) -> Result<(), RunError> {
    let (output, mut state) = interp.run_through_inputs(inputs)?;
    print_ascii(&output)?;
    while state != State::Halted {
        let (output, new_state) = interp.run_through_inputs(get_line()?)?;
        print_ascii(&output)?;
        state = new_state;
    }
    Ok(())
}

fn batch_run(mut interp: Interpreter, inputs: Vec<i64>) -> Result<(), RunError> {
    let (output, state) = interp.run_through_inputs(inputs)?;
    if !output.is_empty() {
        println!("{}", output.iter().join("\n"));
    }
    match state {
        State::Halted => Ok(()),
        State::Awaiting => Err(RunError::EndOfInput),
    }
}

/// Split `bytes` into 8-byte integers, decoded with `func`
fn decode_bin<F: Fn([u8; 8]) -> i64>(bytes: &[u8], func: F) -> Result<Vec<i64>, RunError> {
    let (chunks, remainder) = bytes.as_chunks::<8>();
    if !remainder.is_empty() {
        return Err(RunError::IncompleteI64(Box::from(remainder)));
    }
    Ok(chunks.iter().map(|c| func(*c)).collect())
}

fn read_bin_file<F: Fn([u8; 8]) -> i64>(file: &Path, func: F) -> Result<Vec<i64>, RunError> {
    decode_bin(&fs::read(file).map_err(RunError::Io)?, func)
}

fn load(args: &Args) -> Result<Vec<i64>, RunError> {
    match args.format {
        CodeFormat::Ascii => Ok(parse_program(
            &read_to_string(&args.source).map_err(RunError::Io)?,
        )?),
        CodeFormat::LittleEndian => read_bin_file(&args.source, i64::from_le_bytes),
        CodeFormat::BigEndian => read_bin_file(&args.source, i64::from_be_bytes),
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.verbose);

    let result = load(&args).and_then(|prog| {
        log::debug!("loaded {} integers from {}", prog.len(), args.source.display());
        let interp = Interpreter::new(prog);
        if args.ascii {
            interactive_run(interp, args.input)
        } else {
            batch_run(interp, args.input)
        }
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug)]
enum RunError {
    Io(io::Error),
    Parse(ParseError),
    IncompleteI64(Box<[u8]>),
    Ascii(AsciiError),
    EndOfInput,
    Interpreter(InterpreterError),
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Interpreter(e) => Some(e),
            Self::Ascii(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "an I/O error occured: {e}"),
            Self::Parse(e) => Display::fmt(e, f),
            Self::IncompleteI64(rem) => {
                write!(f, "expected 8 bytes, got {}: {:02x?}", rem.len(), rem)
            }
            Self::Ascii(e) => Display::fmt(e, f),
            Self::EndOfInput => write!(f, "intcode program is waiting for more input"),
            Self::Interpreter(e) => Display::fmt(e, f),
        }
    }
}

impl From<InterpreterError> for RunError {
    fn from(e: InterpreterError) -> Self {
        Self::Interpreter(e)
    }
}

impl From<ParseError> for RunError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<AsciiError> for RunError {
    fn from(e: AsciiError) -> Self {
        Self::Ascii(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_byte_orders() {
        let mut bytes = Vec::new();
        bytes.extend(1105_i64.to_le_bytes());
        bytes.extend((-1_i64).to_le_bytes());
        assert_eq!(
            decode_bin(&bytes, i64::from_le_bytes).unwrap(),
            vec![1105, -1]
        );
        let be: Vec<u8> = [99_i64, i64::MIN]
            .iter()
            .flat_map(|i| i.to_be_bytes())
            .collect();
        assert_eq!(
            decode_bin(&be, i64::from_be_bytes).unwrap(),
            vec![99, i64::MIN]
        );
        // reading big-endian bytes as little-endian gives a different program
        assert_eq!(
            decode_bin(&be[..8], i64::from_le_bytes).unwrap(),
            vec![99 << 56]
        );
        assert!(decode_bin(&[], i64::from_le_bytes).unwrap().is_empty());
    }

    #[test]
    fn trailing_bytes() {
        let mut bytes = 99_i64.to_le_bytes().to_vec();
        bytes.extend([0xab, 0x01, 0x00]);
        let err = decode_bin(&bytes, i64::from_le_bytes).unwrap_err();
        assert!(matches!(&err, RunError::IncompleteI64(rem) if **rem == [0xab, 0x01, 0x00]));
        assert_eq!(err.to_string(), "expected 8 bytes, got 3: [ab, 01, 00]");
    }

    #[test]
    fn non_ascii_output() {
        let err = print_ascii(&[72, 300]).unwrap_err();
        assert!(matches!(err, RunError::Ascii(AsciiError::InvalidInt(300))));
        assert_eq!(err.to_string(), "300 is not a valid ASCII character");
        assert!(err.source().is_some());
    }

    #[test]
    fn negative_inputs() {
        let args = Args::try_parse_from(["intcode-run", "-i", "1,-2,3", "prog.txt"]).unwrap();
        assert_eq!(args.input, vec![1, -2, 3]);
        assert_eq!(args.source, PathBuf::from("prog.txt"));
        assert!(args.format == CodeFormat::Ascii);
        assert!(!args.ascii);

        let args = Args::try_parse_from(["intcode-run", "--input=-7", "-vv", "prog.txt"]).unwrap();
        assert_eq!(args.input, vec![-7]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn format_aliases() {
        for (name, format) in [
            ("text", CodeFormat::Ascii),
            ("aoc", CodeFormat::Ascii),
            ("binle", CodeFormat::LittleEndian),
            ("binary-little-endian", CodeFormat::LittleEndian),
            ("binbe", CodeFormat::BigEndian),
            ("binary-big-endian", CodeFormat::BigEndian),
        ] {
            let args = Args::try_parse_from(["intcode-run", "-f", name, "prog"]).unwrap();
            assert!(args.format == format, "{name}");
        }
        assert!(Args::try_parse_from(["intcode-run", "-f", "octal", "prog"]).is_err());
    }

    #[test]
    fn batch_runs_need_enough_input() {
        let echo = || Interpreter::new([3, 0, 4, 0, 99]);
        assert!(batch_run(echo(), vec![5]).is_ok());
        assert!(matches!(batch_run(echo(), vec![]), Err(RunError::EndOfInput)));
        assert!(matches!(
            batch_run(Interpreter::new([1101, i64::MAX, 1, 0, 99]), vec![]),
            Err(RunError::Interpreter(_))
        ));
    }
}
