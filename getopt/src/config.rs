/// Environment variable that asks for POSIX behavior: scanning stops at the
/// first operand and nothing is permuted.
pub const POSIXLY_CORRECT: &str = "POSIXLY_CORRECT";

/// Settings fixed for the lifetime of a [`Getopt`](crate::Getopt) session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Stop at the first operand, as with a leading `+`.
    pub posixly_correct: bool,
    /// Send diagnostics to the reporter.
    pub opterr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            posixly_correct: false,
            opterr: true,
        }
    }
}

impl Config {
    /// Defaults, with `posixly_correct` taken from the environment.
    pub fn from_env() -> Self {
        Config {
            posixly_correct: std::env::var_os(POSIXLY_CORRECT).is_some(),
            ..Config::default()
        }
    }
}
