use std::fmt::Debug;

use derive_more::derive::Display;
use itertools::Itertools;
use thiserror::Error;

use crate::{Sym, TypeError, Types};

/// A typed formal parameter of a predicate or action.
/// It is never bound to a concrete value; grounding substitutes objects for it.
#[derive(Clone, PartialEq, Eq, Display)]
#[display("?{name}")]
pub struct Param {
    pub name: Sym,
    pub tpe: Sym,
}

impl Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{} - {}", self.name, self.tpe)
    }
}

impl Param {
    pub fn new(name: impl Into<Sym>, tpe: impl Into<Sym>) -> Self {
        Self {
            name: name.into(),
            tpe: tpe.into(),
        }
    }

    pub fn name(&self) -> &Sym {
        &self.name
    }
    pub fn tpe(&self) -> &Sym {
        &self.tpe
    }
}

#[derive(Error, Debug)]
pub enum PredicateError {
    #[error("duplicate predicate declaration: {0}")]
    DuplicatePredicate(Sym),
    #[error("unknown predicate: {0}")]
    UnknownPredicate(Sym),
    #[error("invalid parameter type in predicate {0}: {1}")]
    InvalidParameterType(Sym, TypeError),
}

/// A typed relation. Identity is the name; arity and parameter types are
/// fixed at registration and never change once the registry is frozen.
#[derive(Clone, Display)]
#[display("({} {})", name, params.iter().map(|p| format!("{p:?}")).format(" "))]
pub struct Predicate {
    pub name: Sym,
    pub params: Vec<Param>,
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Predicate {
    pub fn name(&self) -> &Sym {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Registry of predicates, frozen once compilation starts generating actions.
#[derive(Clone, Default)]
pub struct Predicates {
    predicates: Vec<Predicate>,
    index: hashbrown::HashMap<Sym, usize>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new predicate, checking its parameter types against the
    /// taxonomy. A second registration under the same name is an error, not
    /// a silent overwrite.
    pub fn add(
        &mut self,
        name: impl Into<Sym>,
        params: Vec<Param>,
        types: &Types,
    ) -> Result<&Predicate, PredicateError> {
        let name = name.into();
        for p in &params {
            if !types.contains(p.tpe()) {
                return Err(PredicateError::InvalidParameterType(
                    name.clone(),
                    TypeError::UnknownType(p.tpe.clone()),
                ));
            }
        }
        if self.index.contains_key(&name) {
            return Err(PredicateError::DuplicatePredicate(name));
        }
        self.index.insert(name.clone(), self.predicates.len());
        self.predicates.push(Predicate { name, params });
        Ok(self.predicates.last().unwrap())
    }

    pub fn get(&self, name: &Sym) -> Result<&Predicate, PredicateError> {
        self.index
            .get(name)
            .map(|&i| &self.predicates[i])
            .ok_or_else(|| PredicateError::UnknownPredicate(name.clone()))
    }

    pub fn contains(&self, name: &Sym) -> bool {
        self.index.contains_key(name)
    }

    /// Predicates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Debug for Predicates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Predicates:")?;
        for p in self.iter() {
            write!(f, "\n  {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn types() -> Types {
        let mut types = Types::new("object");
        types.add_type("room", "object").unwrap();
        types.add_type("floor", "object").unwrap();
        types
    }

    #[test]
    fn registration_and_lookup() {
        let types = types();
        let mut preds = Predicates::new();
        preds
            .add(
                "room_on_floor",
                vec![Param::new("r", "room"), Param::new("f", "floor")],
                &types,
            )
            .unwrap();
        let p = preds.get(&"room_on_floor".into()).unwrap();
        assert_eq!(p.arity(), 2);
        assert!(preds.get(&"no_such".into()).is_err());
    }

    #[test]
    fn duplicate_names_are_an_error() {
        let types = types();
        let mut preds = Predicates::new();
        preds.add("occupied", vec![Param::new("r", "room")], &types).unwrap();
        let second = preds.add("occupied", vec![Param::new("r", "room")], &types);
        assert!(matches!(second, Err(PredicateError::DuplicatePredicate(_))));
        // the first registration must survive untouched
        assert_eq!(preds.len(), 1);
    }

    #[test]
    fn unknown_parameter_types_are_rejected() {
        let types = types();
        let mut preds = Predicates::new();
        let res = preds.add("at", vec![Param::new("x", "robot")], &types);
        assert!(matches!(res, Err(PredicateError::InvalidParameterType(_, _))));
    }
}
