//! POSIX `getopt` and `getopt_long` option scanning.
//!
//! A [`Getopt`] session walks an argument vector one option per call:
//!
//! ```
//! use getopt::{Getopt, HasArg, LongOption};
//!
//! let longopts = [LongOption::new("output", HasArg::Required, 'o' as i32)];
//! let mut argv = vec!["prog", "in.txt", "-v", "--output", "out.txt"];
//! let mut g = Getopt::default();
//! let mut verbose = false;
//! let mut output = None;
//! while let Some(code) = g.getopt_long(&mut argv, "vo:", &longopts) {
//!     match u8::try_from(code).map(char::from) {
//!         Ok('v') => verbose = true,
//!         Ok('o') => output = g.optarg(&argv).map(str::to_string),
//!         _ => {}
//!     }
//! }
//! assert!(verbose);
//! assert_eq!(output.as_deref(), Some("out.txt"));
//! // Operands were moved behind the options.
//! assert_eq!(&argv[g.optind()..], ["in.txt"]);
//! ```
//!
//! The option string follows the usual conventions: a letter per option,
//! `:` after a letter for a required argument, `::` for an optional
//! (attached only) argument, and `W;` to read `-W name` as `--name`.
//! A leading `+` stops at the first operand, a leading `-` returns operands
//! in place as code [`OPERAND`], and a leading `:` (also after `+`/`-`)
//! silences diagnostics and makes a missing argument return
//! [`MISSING_ARGUMENT`].

mod config;
mod error;
mod long;
mod optstring;
mod permute;
mod report;
mod scan;

pub use config::{Config, POSIXLY_CORRECT};
pub use error::GetoptError;
pub use long::{resolve_long, HasArg, LongMatch, LongOption};
pub use permute::permute;
pub use report::{Reporter, TracingReporter, WriterReporter};
pub use scan::{Getopt, Options, Parsed};

/// Returned for an unknown option, an ambiguous long option, and (outside
/// silent mode) argument errors.
pub const UNKNOWN: i32 = '?' as i32;

/// Returned in silent mode for a missing or unwanted argument.
pub const MISSING_ARGUMENT: i32 = ':' as i32;

/// Returned for an operand when the option string starts with `-`.
pub const OPERAND: i32 = 1;
