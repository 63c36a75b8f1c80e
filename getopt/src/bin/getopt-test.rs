// Test runner: scans ARG... against OPTSTRING and prints one line per result,
// then the final cursor and the (possibly reordered) vector.

use std::cell::Cell;
use std::error::Error;
use std::fs::File;
use std::process;

use getopt::{
    Config, Getopt, HasArg, LongOption, TracingReporter, WriterReporter, MISSING_ARGUMENT,
    OPERAND, UNKNOWN,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: getopt-test [-pqt] [-e FILE] [-l NAME[:|::][=C]]... [-f NAME]... \
                     OPTSTRING [ARG]...";

enum Sink {
    Stderr,
    File(String),
    Tracing,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GETOPT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

fn usage() -> ! {
    eprintln!("{}", USAGE);
    process::exit(2);
}

/// `name`, `name:` or `name::`, optionally followed by `=C` to return `C`
/// instead of the first letter of the name.
fn parse_long_spec(spec: &str) -> (String, HasArg, i32) {
    let (spec, val) = match spec.split_once('=') {
        Some((spec, code)) => (spec, code.chars().next()),
        None => (spec, spec.chars().next()),
    };
    let val = val.map_or(0, |c| c as i32);
    if let Some(name) = spec.strip_suffix("::") {
        (name.to_string(), HasArg::Optional, val)
    } else if let Some(name) = spec.strip_suffix(':') {
        (name.to_string(), HasArg::Required, val)
    } else {
        (spec.to_string(), HasArg::No, val)
    }
}

fn show_code(code: i32) -> String {
    match u8::try_from(code) {
        Ok(b) if b.is_ascii_graphic() => char::from(b).to_string(),
        _ => code.to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut args: Vec<String> = std::env::args().collect();
    let mut runner = Getopt::new();
    runner.set_reporter(WriterReporter::stderr().with_prefix("getopt-test"));

    let mut config = Config::from_env();
    let mut sink = Sink::Stderr;
    let mut longs: Vec<(String, HasArg, i32)> = Vec::new();
    let mut flag_names: Vec<String> = Vec::new();

    while let Some(code) = runner.getopt(&mut args, "+pqte:l:f:") {
        let arg = runner.optarg(&args).unwrap_or_default().to_string();
        match u8::try_from(code).map(char::from) {
            Ok('p') => config.posixly_correct = true,
            Ok('q') => config.opterr = false,
            Ok('t') => sink = Sink::Tracing,
            Ok('e') => sink = Sink::File(arg),
            Ok('l') => longs.push(parse_long_spec(&arg)),
            Ok('f') => flag_names.push(arg),
            _ => usage(),
        }
    }

    let Some((optstring, operands)) = args[runner.optind()..].split_first() else {
        usage();
    };
    let mut argv: Vec<String> = std::iter::once("prog".to_string())
        .chain(operands.iter().cloned())
        .collect();

    let flags: Vec<Cell<i32>> = flag_names.iter().map(|_| Cell::new(0)).collect();
    let longopts: Vec<LongOption<'_>> = longs
        .iter()
        .map(|(name, has_arg, val)| match flag_names.iter().position(|f| f == name) {
            Some(i) => LongOption::with_flag(name, *has_arg, &flags[i], *val),
            None => LongOption::new(name, *has_arg, *val),
        })
        .collect();

    let mut g = Getopt::with_config(config);
    match sink {
        Sink::Stderr => {}
        Sink::File(path) => g.set_reporter(WriterReporter::new(File::create(path)?)),
        Sink::Tracing => g.set_reporter(TracingReporter),
    }

    while let Some(code) = g.getopt_long(&mut argv, optstring, &longopts) {
        let mut line = match code {
            OPERAND => "operand".to_string(),
            UNKNOWN | MISSING_ARGUMENT => {
                format!("{} optopt={}", show_code(code), show_code(g.optopt()))
            }
            0 => "stored".to_string(),
            _ => format!("option {}", show_code(code)),
        };
        if let Some(index) = g.longindex() {
            line.push_str(&format!(" index={}", index));
        }
        if let Some(arg) = g.optarg(&argv) {
            line.push_str(&format!(" arg={}", arg));
        }
        println!("{}", line);
    }

    for (name, flag) in flag_names.iter().zip(&flags) {
        println!("flag {}={}", name, flag.get());
    }
    println!("optind {}", g.optind());
    println!("argv {}", argv[1..].join(" "));
    Ok(())
}
