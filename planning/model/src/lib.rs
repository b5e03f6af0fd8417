mod actions;
mod formula;
mod objects;
pub mod pddl;
mod predicates;
mod types;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

pub use actions::*;
pub use formula::*;
pub use objects::*;
pub use predicates::*;
pub use types::*;

pub type Res<T> = anyhow::Result<T>;

/// An interned-by-value symbol: the name of a type, predicate, action, object or variable.
#[derive(Clone)]
pub struct Sym {
    pub symbol: String,
}

impl Sym {
    pub fn as_str(&self) -> &str {
        self.symbol.as_str()
    }
}

impl From<&str> for Sym {
    fn from(value: &str) -> Self {
        Sym {
            symbol: value.to_string(),
        }
    }
}

impl From<String> for Sym {
    fn from(value: String) -> Self {
        Sym { symbol: value }
    }
}

impl From<&Sym> for Sym {
    fn from(value: &Sym) -> Self {
        value.clone()
    }
}

impl Debug for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
impl Display for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl PartialEq for Sym {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Sym {}

impl PartialOrd for Sym {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Sym {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

impl Hash for Sym {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state)
    }
}
