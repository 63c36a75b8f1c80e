//! The short-option specification string, e.g. `"+:ab:c::W;"`.

/// How a short option letter takes its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortArg {
    /// `a`
    Flag,
    /// `a:`
    Required,
    /// `a::`, attached form only
    Optional,
    /// `W;`: `-W name` is read as `--name`
    LongIntro,
}

#[derive(Debug, Clone, Copy)]
pub struct OptString<'a> {
    raw: &'a str,
}

impl<'a> OptString<'a> {
    pub fn new(raw: &'a str) -> Self {
        OptString { raw }
    }

    fn first(&self) -> Option<char> {
        self.raw.chars().next()
    }

    /// Leading `-` or `+`.
    fn has_mode_prefix(&self) -> bool {
        matches!(self.first(), Some('-' | '+'))
    }

    /// Leading `-`: operands are handed back one by one as code 1.
    pub fn in_order(&self) -> bool {
        self.first() == Some('-')
    }

    /// Leading `-` or `+`: operands are never moved.
    pub fn no_permute(&self) -> bool {
        self.has_mode_prefix()
    }

    /// Leading `:`, possibly after the mode prefix: no diagnostics, and a
    /// missing argument is returned as `':'` instead of `'?'`.
    pub fn silent(&self) -> bool {
        let mut chars = self.raw.chars();
        match chars.next() {
            Some(':') => true,
            Some('-' | '+') => chars.next() == Some(':'),
            _ => false,
        }
    }

    /// Return code for a missing or unwanted argument.
    pub fn bad_argument(&self) -> i32 {
        if self.silent() {
            crate::MISSING_ARGUMENT
        } else {
            crate::UNKNOWN
        }
    }

    fn letters(&self) -> &'a str {
        if self.has_mode_prefix() {
            &self.raw[1..]
        } else {
            self.raw
        }
    }

    pub fn lookup(&self, c: char) -> Option<ShortArg> {
        if c == ':' {
            return None;
        }
        let letters = self.letters();
        let pos = letters.find(c)?;
        let mut rest = letters[pos + c.len_utf8()..].chars();
        let arg = match (rest.next(), rest.next()) {
            (Some(';'), _) if c == 'W' => ShortArg::LongIntro,
            (Some(':'), Some(':')) => ShortArg::Optional,
            (Some(':'), _) => ShortArg::Required,
            _ => ShortArg::Flag,
        };
        Some(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_kinds() {
        let o = OptString::new("ab:c::W;");
        assert_eq!(o.lookup('a'), Some(ShortArg::Flag));
        assert_eq!(o.lookup('b'), Some(ShortArg::Required));
        assert_eq!(o.lookup('c'), Some(ShortArg::Optional));
        assert_eq!(o.lookup('W'), Some(ShortArg::LongIntro));
        assert_eq!(o.lookup('x'), None);
        assert_eq!(o.lookup(':'), None);
    }

    #[test]
    fn mode_prefix_is_not_a_letter() {
        let o = OptString::new("-ab");
        assert!(o.in_order());
        assert!(o.no_permute());
        assert_eq!(o.lookup('-'), None);
        assert_eq!(o.lookup('a'), Some(ShortArg::Flag));

        let o = OptString::new("+a");
        assert!(!o.in_order());
        assert!(o.no_permute());
        assert_eq!(o.lookup('+'), None);
    }

    #[test]
    fn silent_mode() {
        assert!(OptString::new(":a:").silent());
        assert!(OptString::new("+:a:").silent());
        assert!(OptString::new("-:a").silent());
        assert!(!OptString::new("a:").silent());
        assert!(!OptString::new("").silent());
        assert_eq!(OptString::new(":a:").bad_argument(), ':' as i32);
        assert_eq!(OptString::new("a:").bad_argument(), '?' as i32);
    }

    #[test]
    fn w_without_semicolon_is_plain() {
        let o = OptString::new("W");
        assert_eq!(o.lookup('W'), Some(ShortArg::Flag));
        let o = OptString::new("W:");
        assert_eq!(o.lookup('W'), Some(ShortArg::Required));
    }
}
