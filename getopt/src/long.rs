//! Long option table and name resolution.

use std::cell::Cell;
use std::ptr;

use crate::error::GetoptError;

/// Whether a long option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasArg {
    No,
    /// `--name=value` or `--name value`
    Required,
    /// `--name=value` only
    Optional,
}

/// One entry of a long option table.
///
/// When `flag` is set, a match stores `val` into it and the scan returns 0;
/// otherwise the scan returns `val`.
#[derive(Debug, Clone, Copy)]
pub struct LongOption<'a> {
    pub name: &'a str,
    pub has_arg: HasArg,
    pub flag: Option<&'a Cell<i32>>,
    pub val: i32,
}

impl<'a> LongOption<'a> {
    pub const fn new(name: &'a str, has_arg: HasArg, val: i32) -> Self {
        LongOption {
            name,
            has_arg,
            flag: None,
            val,
        }
    }

    pub const fn with_flag(name: &'a str, has_arg: HasArg, flag: &'a Cell<i32>, val: i32) -> Self {
        LongOption {
            name,
            has_arg,
            flag: Some(flag),
            val,
        }
    }

    /// Two entries that would have the same effect when matched.
    fn same_effect(&self, other: &LongOption<'_>) -> bool {
        let same_flag = match (self.flag, other.flag) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.has_arg == other.has_arg && same_flag && self.val == other.val
    }

    /// Record a match and return the scan result code.
    pub(crate) fn apply(&self) -> i32 {
        match self.flag {
            Some(flag) => {
                flag.set(self.val);
                0
            }
            None => self.val,
        }
    }

    /// `optopt` value after an argument error on this entry.
    pub(crate) fn error_code(&self) -> i32 {
        if self.flag.is_none() {
            self.val
        } else {
            0
        }
    }
}

/// A long option token resolved against a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongMatch<'t> {
    /// Index of the matched table entry.
    pub index: usize,
    /// The name as written, possibly abbreviated.
    pub name: &'t str,
    /// Text after the first `=`, if any.
    pub value: Option<&'t str>,
}

/// Resolve `token` (a long option without its leading dashes) against
/// `longopts`.
///
/// An exact name wins. Otherwise `token` may abbreviate a name; several
/// abbreviated matches are only accepted when every one of them has the same
/// effect, in which case the first is taken.
pub fn resolve_long<'t>(
    token: &'t str,
    longopts: &[LongOption<'_>],
) -> Result<LongMatch<'t>, GetoptError> {
    let (name, value) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    };

    let mut found: Option<usize> = None;
    let mut ambiguous = false;
    for (i, opt) in longopts.iter().enumerate() {
        if !opt.name.starts_with(name) {
            continue;
        }
        if opt.name.len() == name.len() {
            found = Some(i);
            ambiguous = false;
            break;
        }
        match found {
            None => found = Some(i),
            Some(first) if !opt.same_effect(&longopts[first]) => ambiguous = true,
            Some(_) => {}
        }
    }

    if ambiguous {
        return Err(GetoptError::AmbiguousLongOption(name.to_string()));
    }
    match found {
        Some(index) => Ok(LongMatch { index, name, value }),
        None => Err(GetoptError::UnknownLongOption(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOO: [LongOption<'static>; 2] = [
        LongOption::new("foo", HasArg::No, 'f' as i32),
        LongOption::new("foobar", HasArg::No, 'F' as i32),
    ];

    #[test]
    fn exact_match_beats_longer_names() {
        let m = resolve_long("foo", &FOO).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.value, None);
    }

    #[test]
    fn exact_match_later_in_table() {
        let table = [
            LongOption::new("foobar", HasArg::No, 1),
            LongOption::new("foo", HasArg::No, 2),
        ];
        assert_eq!(resolve_long("foo", &table).unwrap().index, 1);
    }

    #[test]
    fn abbreviation_of_two_names_is_ambiguous() {
        assert_eq!(
            resolve_long("fo", &FOO),
            Err(GetoptError::AmbiguousLongOption("fo".into()))
        );
    }

    #[test]
    fn unique_abbreviation() {
        let m = resolve_long("foob", &FOO).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.name, "foob");
    }

    #[test]
    fn value_is_split_at_first_equals() {
        let m = resolve_long("foobar=x=y", &FOO).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.name, "foobar");
        assert_eq!(m.value, Some("x=y"));

        let m = resolve_long("foo=", &FOO).unwrap();
        assert_eq!(m.value, Some(""));
    }

    #[test]
    fn same_effect_abbreviations_take_the_first() {
        let table = [
            LongOption::new("color", HasArg::Optional, 'c' as i32),
            LongOption::new("colour", HasArg::Optional, 'c' as i32),
        ];
        assert_eq!(resolve_long("col", &table).unwrap().index, 0);
    }

    #[test]
    fn shared_flag_counts_as_same_effect() {
        let flag = Cell::new(0);
        let other = Cell::new(0);
        let table = [
            LongOption::with_flag("verbose", HasArg::No, &flag, 1),
            LongOption::with_flag("verbosity", HasArg::No, &flag, 1),
        ];
        assert_eq!(resolve_long("verb", &table).unwrap().index, 0);

        let table = [
            LongOption::with_flag("verbose", HasArg::No, &flag, 1),
            LongOption::with_flag("verbosity", HasArg::No, &other, 1),
        ];
        assert!(matches!(
            resolve_long("verb", &table),
            Err(GetoptError::AmbiguousLongOption(_))
        ));
    }

    #[test]
    fn unknown_keeps_whole_token() {
        assert_eq!(
            resolve_long("nope=1", &FOO),
            Err(GetoptError::UnknownLongOption("nope=1".into()))
        );
        assert!(resolve_long("foo", &[]).is_err());
    }

    #[test]
    fn apply_writes_flag() {
        let flag = Cell::new(0);
        let opt = LongOption::with_flag("quiet", HasArg::No, &flag, 7);
        assert_eq!(opt.apply(), 0);
        assert_eq!(flag.get(), 7);
        assert_eq!(opt.error_code(), 0);

        let opt = LongOption::new("quiet", HasArg::No, 'q' as i32);
        assert_eq!(opt.apply(), 'q' as i32);
        assert_eq!(opt.error_code(), 'q' as i32);
    }
}
