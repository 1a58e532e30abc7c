//! Deployment environments

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named deployment environment
///
/// Two environments are the same environment when their names match;
/// descriptions and aliases do not take part in comparisons.
#[derive(Debug, Clone)]
pub struct Environment {
    name: String,
    description: String,
    aliases: Vec<String>,
}

impl Environment {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Environment {
            name: name.into(),
            description: description.into(),
            aliases: Vec::new(),
        }
    }

    /// Add short names this environment can be referred to by
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Check if `name` is this environment's name or one of its aliases
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Environment {}

impl Hash for Environment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Environment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Environment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
