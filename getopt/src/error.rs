/// A problem found while scanning one option.
///
/// None of these stop a scan: the cursor is already past the offending
/// token when the error is reported, so calling again makes progress.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetoptError {
    #[error("unknown option -- {0}")]
    UnknownOption(char),

    #[error("unknown option -- {0}")]
    UnknownLongOption(String),

    #[error("ambiguous option -- {0}")]
    AmbiguousLongOption(String),

    #[error("option requires an argument -- {0}")]
    MissingArgument(char),

    #[error("option requires an argument -- {0}")]
    MissingLongArgument(String),

    #[error("option doesn't take an argument -- {0}")]
    UnexpectedArgument(String),
}

impl GetoptError {
    /// The option text the error is about, without leading dashes.
    pub fn option(&self) -> String {
        match self {
            GetoptError::UnknownOption(c) | GetoptError::MissingArgument(c) => c.to_string(),
            GetoptError::UnknownLongOption(s)
            | GetoptError::AmbiguousLongOption(s)
            | GetoptError::MissingLongArgument(s)
            | GetoptError::UnexpectedArgument(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GetoptError::UnknownOption('x').to_string(),
            "unknown option -- x"
        );
        assert_eq!(
            GetoptError::AmbiguousLongOption("fo".into()).to_string(),
            "ambiguous option -- fo"
        );
        assert_eq!(
            GetoptError::MissingLongArgument("output".into()).to_string(),
            "option requires an argument -- output"
        );
        assert_eq!(
            GetoptError::UnexpectedArgument("foobar".into()).to_string(),
            "option doesn't take an argument -- foobar"
        );
    }

    #[test]
    fn option_text() {
        assert_eq!(GetoptError::MissingArgument('a').option(), "a");
        assert_eq!(GetoptError::UnknownLongOption("nope=1".into()).option(), "nope=1");
    }
}
