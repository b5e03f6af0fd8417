use crate::Sym;
use std::fmt::{Debug, Display};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypeError {
    #[error("duplicate type declaration: {0}")]
    DuplicateType(Sym),
    #[error("unknown type: {0}")]
    UnknownType(Sym),
}

/// A forest of named types rooted at a single universal type.
///
/// Types are declared once, before any predicate or action references them,
/// and are immutable afterward. Declaration order is preserved so that the
/// emitted domain text is deterministic.
#[derive(Clone)]
pub struct Types {
    top: Sym,
    parents: hashbrown::HashMap<Sym, Option<Sym>>,
    declaration_order: Vec<Sym>,
}

impl Types {
    pub fn new(top: impl Into<Sym>) -> Self {
        let top = top.into();
        let mut parents = hashbrown::HashMap::new();
        parents.insert(top.clone(), None);
        Self {
            top,
            parents,
            declaration_order: Vec::new(),
        }
    }

    pub fn top(&self) -> &Sym {
        &self.top
    }

    /// Records a new type below the given parent.
    /// The parent must already be declared and the name must be fresh.
    pub fn add_type(&mut self, name: impl Into<Sym>, parent: impl Into<Sym>) -> Result<(), TypeError> {
        let name = name.into();
        let parent = parent.into();
        if !self.parents.contains_key(&parent) {
            return Err(TypeError::UnknownType(parent));
        }
        if self.parents.contains_key(&name) {
            return Err(TypeError::DuplicateType(name));
        }
        self.parents.insert(name.clone(), Some(parent));
        self.declaration_order.push(name);
        Ok(())
    }

    pub fn contains(&self, name: &Sym) -> bool {
        self.parents.contains_key(name)
    }

    pub fn check(&self, name: &Sym) -> Result<(), TypeError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(TypeError::UnknownType(name.clone()))
        }
    }

    pub fn parent(&self, name: &Sym) -> Option<&Sym> {
        self.parents.get(name).and_then(|p| p.as_ref())
    }

    pub fn is_subtype_of(&self, a: &Sym, b: &Sym) -> bool {
        if a == b {
            true
        } else if let Some(parent) = self.parent(a) {
            self.is_subtype_of(parent, b)
        } else {
            false
        }
    }

    /// All declared types (excluding the top type), in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Sym> {
        self.declaration_order.iter()
    }
}

impl Debug for Types {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Types:")?;
        for t in self.iter() {
            match self.parent(t) {
                Some(p) => write!(f, "\n  {t} <: {p}")?,
                None => write!(f, "\n  {t}")?,
            }
        }
        Ok(())
    }
}

impl Display for Types {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Types {
        let mut types = Types::new("object");
        types.add_type("device", "object").unwrap();
        types.add_type("sensor", "device").unwrap();
        types.add_type("binary_sensor", "sensor").unwrap();
        types.add_type("room", "object").unwrap();
        types
    }

    #[test]
    fn subtyping_is_reflexive_and_transitive() {
        let types = sample();
        let bs = Sym::from("binary_sensor");
        assert!(types.is_subtype_of(&bs, &bs));
        assert!(types.is_subtype_of(&bs, &"sensor".into()));
        assert!(types.is_subtype_of(&bs, &"device".into()));
        assert!(types.is_subtype_of(&bs, &"object".into()));
        assert!(!types.is_subtype_of(&bs, &"room".into()));
        assert!(!types.is_subtype_of(&"sensor".into(), &bs));
    }

    #[test]
    fn duplicate_and_unknown_types_are_rejected() {
        let mut types = sample();
        assert!(matches!(
            types.add_type("sensor", "object"),
            Err(TypeError::DuplicateType(_))
        ));
        assert!(matches!(
            types.add_type("lamp", "actuator"),
            Err(TypeError::UnknownType(_))
        ));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let types = sample();
        let names: Vec<_> = types.iter().map(|s| s.as_str().to_string()).collect();
        assert_eq!(names, ["device", "sensor", "binary_sensor", "room"]);
    }
}
