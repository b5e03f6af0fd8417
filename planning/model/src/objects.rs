use std::fmt::{Debug, Display};

use derive_more::derive::Display;
use thiserror::Error;

use crate::Sym;

/// A concrete named constant of a given type.
///
/// Names are derived deterministically from a stable external identifier and
/// the concrete type used as prefix: `{type}_{uid}`. Since `_` never appears
/// at the end of a type name and uids are externally unique, the scheme is
/// injective within a type.
#[derive(Clone, Display, Debug)]
#[display("{}", name)]
pub struct Object {
    name: Sym,
    tpe: Sym,
}

impl Object {
    pub fn new(name: impl Into<Sym>, tpe: impl Into<Sym>) -> Self {
        Self {
            name: name.into(),
            tpe: tpe.into(),
        }
    }

    /// Builds the object for an external uid, named `{type}_{uid}`.
    pub fn scoped(tpe: impl Into<Sym>, uid: &str) -> Self {
        let tpe = tpe.into();
        let name = Sym::from(format!("{tpe}_{uid}"));
        Self { name, tpe }
    }

    pub fn name(&self) -> &Sym {
        &self.name
    }

    pub fn tpe(&self) -> &Sym {
        &self.tpe
    }
}

#[derive(Error, Debug)]
pub enum ObjectError {
    #[error("duplicate object: {0}")]
    DuplicateObjectDeclaration(Sym),
    #[error("unknown object: {0}")]
    UnknownObject(Sym),
}

/// Set of problem objects, iterated in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Objects {
    order: Vec<Object>,
    index: hashbrown::HashMap<Sym, usize>,
}

impl Display for Objects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objects:")?;
        for o in self.iter() {
            write!(f, "\n  {}: {}", o.name, o.tpe)?;
        }
        writeln!(f)
    }
}

impl Objects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Object) -> Result<(), ObjectError> {
        if let Some(&prev) = self.index.get(object.name()) {
            if self.order[prev].tpe() == object.tpe() {
                // exact same declaration, ignore
                return Ok(());
            }
            return Err(ObjectError::DuplicateObjectDeclaration(object.name.clone()));
        }
        self.index.insert(object.name.clone(), self.order.len());
        self.order.push(object);
        Ok(())
    }

    pub fn get(&self, name: &Sym) -> Result<&Object, ObjectError> {
        self.index
            .get(name)
            .map(|&i| &self.order[i])
            .ok_or_else(|| ObjectError::UnknownObject(name.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
