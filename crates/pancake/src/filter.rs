//! Name filter - glob-lite matching on `suite.name`

use std::fmt;

/// Which cases a run selects
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// `*`
    #[default]
    All,
    /// No trailing `*`: the full name must be equal
    Exact(String),
    /// Trailing `*`: the full name must start with the rest, taken literally
    Prefix(String),
}

impl Filter {
    pub fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            Filter::All
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            Filter::Prefix(prefix.to_string())
        } else {
            Filter::Exact(pattern.to_string())
        }
    }

    pub fn matches(&self, full_name: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Exact(name) => full_name == name,
            Filter::Prefix(prefix) => full_name.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("*"),
            Filter::Exact(name) => f.write_str(name),
            Filter::Prefix(prefix) => write!(f, "{}*", prefix),
        }
    }
}
