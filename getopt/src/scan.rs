//! The scanning session.

use std::fmt;

use crate::config::Config;
use crate::error::GetoptError;
use crate::long::{resolve_long, HasArg, LongOption};
use crate::optstring::{OptString, ShortArg};
use crate::permute::permute;
use crate::report::{Reporter, WriterReporter};
use crate::{OPERAND, UNKNOWN};

/// Location of an option argument inside the caller's vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    index: usize,
    offset: usize,
}

/// What the short-option scanner found.
enum Step {
    Code(i32),
    End,
    /// `--...` or `-W...`: the long option text starts at `place`.
    Long,
}

/// State of one option scan over one argument vector.
///
/// The vector is borrowed on every call and reordered in place: options and
/// their arguments are moved in front of operands, unless permutation is
/// turned off by the option string or by [`Config::posixly_correct`].
/// Element 0 is the program name and is never looked at.
pub struct Getopt {
    config: Config,
    optind: usize,
    optopt: i32,
    optarg: Option<Span>,
    longindex: Option<usize>,
    optreset: bool,
    /// Byte offset of the next character to scan in `argv[optind]`.
    place: Option<usize>,
    /// First operand of the block waiting to be moved.
    nonopt_start: Option<usize>,
    /// First option after that block.
    nonopt_end: Option<usize>,
    last_error: Option<GetoptError>,
    reporter: Box<dyn Reporter>,
}

impl fmt::Debug for Getopt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Getopt")
            .field("config", &self.config)
            .field("optind", &self.optind)
            .field("optopt", &self.optopt)
            .field("place", &self.place)
            .field("nonopt_start", &self.nonopt_start)
            .field("nonopt_end", &self.nonopt_end)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl Default for Getopt {
    fn default() -> Self {
        Getopt::with_config(Config::default())
    }
}

impl Getopt {
    /// A session configured from the environment, reporting to stderr.
    pub fn new() -> Self {
        Getopt::with_config(Config::from_env())
    }

    pub fn with_config(config: Config) -> Self {
        Getopt {
            config,
            optind: 1,
            optopt: UNKNOWN,
            optarg: None,
            longindex: None,
            optreset: false,
            place: None,
            nonopt_start: None,
            nonopt_end: None,
            last_error: None,
            reporter: Box::new(WriterReporter::stderr()),
        }
    }

    pub fn set_reporter<R: Reporter + 'static>(&mut self, reporter: R) {
        self.reporter = Box::new(reporter);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_opterr(&mut self, on: bool) {
        self.config.opterr = on;
    }

    /// Index of the next element to scan. After the end of options it is the
    /// index of the first operand.
    pub fn optind(&self) -> usize {
        self.optind
    }

    /// Move the cursor. Any partly scanned short option cluster and any
    /// operand block still waiting to be moved are dropped; elements already
    /// permuted stay where they are.
    pub fn set_optind(&mut self, optind: usize) {
        self.optind = optind;
        self.place = None;
        self.nonopt_start = None;
        self.nonopt_end = None;
    }

    /// The offending option character (or long option value) of the last
    /// error.
    pub fn optopt(&self) -> i32 {
        self.optopt
    }

    /// Argument of the option returned by the last call, read from the
    /// vector that call scanned.
    pub fn optarg<'a, S: AsRef<str>>(&self, argv: &'a [S]) -> Option<&'a str> {
        let span = self.optarg?;
        argv.get(span.index)?.as_ref().get(span.offset..)
    }

    /// Table index of the long option matched by the last call.
    pub fn longindex(&self) -> Option<usize> {
        self.longindex
    }

    pub fn last_error(&self) -> Option<&GetoptError> {
        self.last_error.as_ref()
    }

    /// Forget the pending operand block and any partly scanned cluster on the
    /// next call, e.g. to scan a new vector. The cursor is left alone; see
    /// [`Getopt::set_optind`].
    pub fn reset(&mut self) {
        self.optreset = true;
    }

    /// Scan for the next short option. Returns `None` at the end of options.
    ///
    /// This is [`Getopt::getopt_long`] with an empty table: `--` still ends
    /// the scan, but `--name`, and `-W name` under `W;`, are reported as
    /// unknown long options rather than ending the scan.
    pub fn getopt<S: AsRef<str>>(&mut self, argv: &mut [S], optstring: &str) -> Option<i32> {
        self.getopt_long(argv, optstring, &[])
    }

    /// Scan for the next short or long option. Returns `None` at the end of
    /// options.
    pub fn getopt_long<S: AsRef<str>>(
        &mut self,
        argv: &mut [S],
        optstring: &str,
        longopts: &[LongOption<'_>],
    ) -> Option<i32> {
        let opts = OptString::new(optstring);
        self.longindex = None;
        self.last_error = None;
        match self.scan(argv, &opts) {
            Step::Code(code) => Some(code),
            Step::End => None,
            Step::Long => self.long_option(argv, &opts, longopts),
        }
    }

    /// Iterate over the remaining options.
    pub fn options<'s, 'v, 'l, S: AsRef<str>>(
        &'s mut self,
        argv: &'v mut [S],
        optstring: &'l str,
        longopts: &'l [LongOption<'l>],
    ) -> Options<'s, 'v, 'l, S> {
        Options {
            getopt: self,
            argv,
            optstring,
            longopts,
        }
    }

    fn permute_enabled(&self, opts: &OptString<'_>) -> bool {
        !self.config.posixly_correct && !opts.no_permute()
    }

    fn in_order(&self, opts: &OptString<'_>) -> bool {
        !self.config.posixly_correct && opts.in_order()
    }

    fn fail(&mut self, error: GetoptError, opts: &OptString<'_>) {
        tracing::debug!(%error, optind = self.optind, "option error");
        if self.config.opterr && !opts.silent() {
            self.reporter.report(&error);
        }
        self.last_error = Some(error);
    }

    /// Move a closed operand block behind the options that followed it, or
    /// point the cursor at an open one. Either way the block is done.
    fn flush_block<S>(&mut self, argv: &mut [S]) {
        match (self.nonopt_start, self.nonopt_end) {
            (Some(start), Some(end)) => {
                permute(argv, start, end, self.optind);
                self.optind -= end - start;
            }
            (Some(start), None) => self.optind = start,
            _ => {}
        }
        self.nonopt_start = None;
        self.nonopt_end = None;
    }

    fn scan<S: AsRef<str>>(&mut self, argv: &mut [S], opts: &OptString<'_>) -> Step {
        self.optarg = None;
        if self.optind == 0 {
            self.optind = 1;
        }
        if self.optreset {
            self.nonopt_start = None;
            self.nonopt_end = None;
            self.place = None;
            self.optreset = false;
        }
        if self.optind >= argv.len() {
            self.place = None;
        }

        if self.place.is_none() {
            loop {
                if self.optind >= argv.len() {
                    self.flush_block(argv);
                    return Step::End;
                }

                let arg = argv[self.optind].as_ref();
                let is_operand = !arg.starts_with('-') || arg.len() == 1;
                let is_long = arg.starts_with("--");

                if !is_operand {
                    if self.nonopt_start.is_some() && self.nonopt_end.is_none() {
                        self.nonopt_end = Some(self.optind);
                    }
                    if is_long {
                        self.place = Some(2);
                        return Step::Long;
                    }
                    self.place = Some(1);
                    break;
                }

                if self.in_order(opts) {
                    self.optarg = Some(Span {
                        index: self.optind,
                        offset: 0,
                    });
                    self.optind += 1;
                    return Step::Code(OPERAND);
                }
                if !self.permute_enabled(opts) {
                    return Step::End;
                }

                match (self.nonopt_start, self.nonopt_end) {
                    (None, _) => self.nonopt_start = Some(self.optind),
                    (Some(start), Some(end)) => {
                        permute(argv, start, end, self.optind);
                        self.nonopt_start = Some(self.optind - (end - start));
                        self.nonopt_end = None;
                    }
                    (Some(_), None) => {}
                }
                tracing::trace!(
                    optind = self.optind,
                    nonopt_start = ?self.nonopt_start,
                    "skipping operand"
                );
                self.optind += 1;
            }
        }

        let token = argv[self.optind].as_ref();
        let offset = self.place.unwrap_or(1);
        let Some(optchar) = token.get(offset..).and_then(|rest| rest.chars().next()) else {
            // The vector changed under a half-scanned cluster.
            self.place = None;
            self.optind += 1;
            return self.scan(argv, opts);
        };
        let next = offset + optchar.len_utf8();
        let exhausted = next >= token.len();

        let Some(kind) = opts.lookup(optchar) else {
            self.advance_cluster(next, exhausted);
            self.optopt = optchar as i32;
            self.fail(GetoptError::UnknownOption(optchar), opts);
            return Step::Code(UNKNOWN);
        };

        match kind {
            ShortArg::Flag => {
                self.advance_cluster(next, exhausted);
            }
            ShortArg::LongIntro => {
                if !exhausted {
                    self.place = Some(next);
                    return Step::Long;
                }
                self.optind += 1;
                if self.optind >= argv.len() {
                    self.place = None;
                    self.optopt = optchar as i32;
                    self.fail(GetoptError::MissingArgument(optchar), opts);
                    return Step::Code(opts.bad_argument());
                }
                self.place = Some(0);
                return Step::Long;
            }
            ShortArg::Required | ShortArg::Optional => {
                if !exhausted {
                    self.optarg = Some(Span {
                        index: self.optind,
                        offset: next,
                    });
                } else if kind == ShortArg::Required {
                    self.optind += 1;
                    if self.optind >= argv.len() {
                        self.place = None;
                        self.optopt = optchar as i32;
                        self.fail(GetoptError::MissingArgument(optchar), opts);
                        return Step::Code(opts.bad_argument());
                    }
                    self.optarg = Some(Span {
                        index: self.optind,
                        offset: 0,
                    });
                }
                self.place = None;
                self.optind += 1;
            }
        }
        Step::Code(optchar as i32)
    }

    fn advance_cluster(&mut self, next: usize, exhausted: bool) {
        if exhausted {
            self.place = None;
            self.optind += 1;
        } else {
            self.place = Some(next);
        }
    }

    fn long_option<S: AsRef<str>>(
        &mut self,
        argv: &mut [S],
        opts: &OptString<'_>,
        longopts: &[LongOption<'_>],
    ) -> Option<i32> {
        let index = self.optind;
        let offset = self.place.take().unwrap_or(0);
        self.optind += 1;

        let at_marker = argv[index].as_ref().len() <= offset;
        if at_marker {
            // "--": stop here, after putting skipped operands behind it.
            self.flush_block(argv);
            return None;
        }

        let token = &argv[index].as_ref()[offset..];
        let found = match resolve_long(token, longopts) {
            Ok(found) => found,
            Err(error) => {
                self.optopt = 0;
                self.fail(error, opts);
                return Some(UNKNOWN);
            }
        };
        let opt = &longopts[found.index];

        match (opt.has_arg, found.value) {
            (HasArg::No, Some(_)) => {
                self.optopt = opt.error_code();
                self.fail(GetoptError::UnexpectedArgument(found.name.to_string()), opts);
                return Some(opts.bad_argument());
            }
            (HasArg::Required | HasArg::Optional, Some(value)) => {
                self.optarg = Some(Span {
                    index,
                    offset: offset + token.len() - value.len(),
                });
            }
            (HasArg::Required, None) => {
                if self.optind < argv.len() {
                    self.optarg = Some(Span {
                        index: self.optind,
                        offset: 0,
                    });
                    self.optind += 1;
                } else {
                    self.optopt = opt.error_code();
                    self.fail(GetoptError::MissingLongArgument(token.to_string()), opts);
                    return Some(opts.bad_argument());
                }
            }
            (HasArg::No | HasArg::Optional, None) => {}
        }

        self.longindex = Some(found.index);
        Some(opt.apply())
    }
}

/// One result of [`Options`], with its argument copied out of the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub code: i32,
    pub optarg: Option<String>,
    pub longindex: Option<usize>,
    pub error: Option<GetoptError>,
}

impl Parsed {
    /// The code as a character, when it is one.
    pub fn option(&self) -> Option<char> {
        u32::try_from(self.code).ok().and_then(char::from_u32)
    }
}

/// Iterator returned by [`Getopt::options`].
pub struct Options<'s, 'v, 'l, S> {
    getopt: &'s mut Getopt,
    argv: &'v mut [S],
    optstring: &'l str,
    longopts: &'l [LongOption<'l>],
}

impl<S: AsRef<str>> Iterator for Options<'_, '_, '_, S> {
    type Item = Parsed;

    fn next(&mut self) -> Option<Parsed> {
        let code = self
            .getopt
            .getopt_long(&mut *self.argv, self.optstring, self.longopts)?;
        Some(Parsed {
            code,
            optarg: self.getopt.optarg(&*self.argv).map(str::to_string),
            longindex: self.getopt.longindex(),
            error: self.getopt.last_error().cloned(),
        })
    }
}
