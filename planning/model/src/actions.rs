use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

use itertools::Itertools;
use thiserror::Error;

use crate::{Formula, Param, Sym};

#[derive(Error, Debug)]
pub enum ActionsError {
    #[error("duplicate action: {0}")]
    DuplicateAction(Sym),
    #[error("unknown action: {0}")]
    UnknownAction(Sym),
}

/// A parametrized action schema.
///
/// Effects are restricted to conjunctions of possibly-negated atoms, plus
/// `forall (x) atom(x)` bulk effects used by the assignment actions; the
/// generator upholds this, the type does not enforce it.
#[derive(Debug, Clone)]
pub struct ActionTemplate {
    pub name: Sym,
    pub parameters: Vec<Param>,
    pub precondition: Formula,
    pub effect: Formula,
}

impl ActionTemplate {
    pub fn new(name: impl Into<Sym>, parameters: Vec<Param>, precondition: Formula, effect: Formula) -> Self {
        Self {
            name: name.into(),
            parameters,
            precondition,
            effect,
        }
    }

    pub fn name(&self) -> &Sym {
        &self.name
    }
}

impl Display for ActionTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({})",
            self.name,
            self.parameters.iter().map(|p| format!("{p:?}")).format(", ")
        )?;
        write!(f, "\n    precondition: {}", self.precondition)?;
        write!(f, "\n    effect: {}", self.effect)?;
        Ok(())
    }
}

/// Registry of generated action templates, keyed and iterated by name so
/// that domain emission is deterministic.
#[derive(Default)]
pub struct Actions {
    actions: BTreeMap<Sym, ActionTemplate>,
}

impl Actions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: ActionTemplate) -> Result<(), ActionsError> {
        if self.actions.contains_key(&action.name) {
            return Err(ActionsError::DuplicateAction(action.name));
        }
        self.actions.insert(action.name.clone(), action);
        Ok(())
    }

    pub fn get(&self, name: &Sym) -> Result<&ActionTemplate, ActionsError> {
        self.actions.get(name).ok_or_else(|| ActionsError::UnknownAction(name.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionTemplate> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
