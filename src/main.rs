//! CLI entry point for the `bsvparse` tool.
//!
//! Parses each file named on the command line and reports diagnostics as
//! `file:line:col: error: message` on stderr. With `--dump` the AST of every
//! file is written to stdout.

use std::io::{self, Write};
use std::process::ExitCode;
use std::{env, fs};

use bsvparse::{LineIndex, ParseOptions, parse_with_options};

const USAGE: &str = "usage: bsvparse [--first-error] [--dump] FILE...";

#[derive(Debug, Default)]
struct Args {
    options: ParseOptions,
    dump: bool,
    files: Vec<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut out = Args::default();
    for arg in args {
        match arg.as_str() {
            "--first-error" => out.options = ParseOptions::first_error(),
            "--dump" => out.dump = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            _ => out.files.push(arg),
        }
    }
    if out.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(out)
}

/// Parse one file and report on it. Returns `true` when the file read and
/// parsed without diagnostics.
fn check_file(path: &str, args: &Args, out: &mut impl Write, err: &mut impl Write) -> bool {
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            let _ = writeln!(err, "{path}: {e}");
            return false;
        }
    };
    let parsed = parse_with_options(&src, args.options);
    let lines = LineIndex::new(&src);
    for diag in parsed.diagnostics() {
        let pos = diag.position(&lines);
        let _ = writeln!(
            err,
            "{path}:{}:{}: {}: {}",
            pos.line,
            pos.column,
            diag.severity(),
            diag.message
        );
    }
    if args.dump {
        let _ = writeln!(out, "{:#?}", parsed.root());
    }
    parsed.is_ok()
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            let _ = writeln!(io::stderr(), "bsvparse: {msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let mut ok = true;
    for path in &args.files {
        ok &= check_file(path, &args, &mut out, &mut err);
    }
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(ToString::to_string))
    }

    #[test]
    fn flags_and_files() {
        let parsed = args(&["--first-error", "a.bsv", "--dump", "b.bsv"]);
        let parsed = parsed.unwrap_or_default();
        assert!(parsed.dump);
        assert_eq!(parsed.options, ParseOptions::first_error());
        assert_eq!(parsed.files, ["a.bsv", "b.bsv"]);
    }

    #[rstest]
    #[case(&[], "no input files")]
    #[case(&["--verbose", "a.bsv"], "unknown option `--verbose`")]
    fn rejects_bad_arguments(#[case] list: &[&str], #[case] expected: &str) {
        assert_eq!(args(list).err().as_deref(), Some(expected));
    }
}
