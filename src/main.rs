//! Writes a Trivium64 keystream to stdout, for feeding statistical test suites.
//! Generation is infinite unless `--bytes` is given.
use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io::{stdout, StdoutLock, Write};
use trivium64::{RngCore, TailMode, Trivium64};

fn parse_word(s: &str) -> Result<u64, String> {
    let digits = s.trim_start_matches("0x");
    if digits.len() != 16 {
        return Err(format!("expected 16 hex digits, got {}", digits.len()));
    }
    u64::from_str_radix(digits, 16).map_err(|e| e.to_string())
}

fn bytes_generation(
    bytes_total: usize,
    tail: TailMode,
    buffer: &mut [u8],
    generator: &mut Trivium64,
    stdout: &mut StdoutLock<'_>,
) -> std::io::Result<()> {
    let quotient = bytes_total / buffer.len();
    let remaining = bytes_total % buffer.len();

    for _ in 0..quotient {
        generator.fill_bytes(buffer);
        stdout.write_all(buffer)?;
    }

    // The buffer is a whole number of words, so only the last write can end mid-word.
    generator.fill_bytes_with(&mut buffer[..remaining], tail);
    stdout.write_all(&buffer[..remaining])?;
    stdout.flush()
}

fn infinite_bytes_generation(
    buffer: &mut [u8],
    generator: &mut Trivium64,
    stdout: &mut StdoutLock<'_>,
) -> std::io::Result<()> {
    loop {
        generator.fill_bytes(buffer);
        stdout.write_all(buffer)?;
    }
}

fn main() -> std::io::Result<()> {
    let matches = Command::new("trivium64")
        .about("Writes a Trivium64 keystream to stdout")
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .value_parser(parse_word)
                .default_value("1112131415161718")
                .help("64-bit key as 16 hex digits"),
        )
        .arg(
            Arg::new("seq")
                .short('s')
                .long("seq")
                .value_parser(parse_word)
                .default_value("AAABACADADAFFFCC")
                .help("64-bit sequence number as 16 hex digits"),
        )
        .arg(
            Arg::new("bytes")
                .short('b')
                .long("bytes")
                .value_parser(value_parser!(usize))
                .help("Total number of bytes to generate"),
        )
        .arg(
            Arg::new("reference-tail")
                .long("reference-tail")
                .action(ArgAction::SetTrue)
                .help("Cut a partial final word the way the C reference harness does"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Prints trace messages on stderr"),
        )
        .get_matches();

    let verb = if matches.get_flag("verbose") {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    // stdout carries the keystream, so all log output goes to stderr.
    TermLogger::init(verb, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let key = *matches.get_one::<u64>("key").expect("key has a default");
    let seq = *matches.get_one::<u64>("seq").expect("seq has a default");
    let tail = if matches.get_flag("reference-tail") {
        TailMode::Reference
    } else {
        TailMode::Truncate
    };

    let mut generator = Trivium64::from_words(key, seq);
    let mut buffer = [0u8; 0x10000];
    let stdout = stdout();
    let mut stdout = stdout.lock();

    match matches.get_one::<usize>("bytes") {
        Some(&total) => {
            log::info!("generating {} bytes, sequence {:016x}", total, seq);
            bytes_generation(total, tail, &mut buffer, &mut generator, &mut stdout)
        }
        None => {
            log::info!("generating until stdout closes, sequence {:016x}", seq);
            match infinite_bytes_generation(&mut buffer, &mut generator, &mut stdout) {
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                result => result,
            }
        }
    }
}
