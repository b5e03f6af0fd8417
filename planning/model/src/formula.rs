use std::fmt::{Debug, Display};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::{Param, Sym};

/// An argument of an atom: either a formal variable or a concrete object.
#[derive(Clone, PartialEq, Eq)]
pub enum Term {
    Var(Sym),
    Obj(Sym),
}

impl Term {
    pub fn var(name: impl Into<Sym>) -> Term {
        Term::Var(name.into())
    }
    pub fn obj(name: impl Into<Sym>) -> Term {
        Term::Obj(name.into())
    }
}

impl From<&Param> for Term {
    fn from(p: &Param) -> Self {
        Term::Var(p.name.clone())
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name) => write!(f, "?{name}"),
            Term::Obj(name) => write!(f, "{name}"),
        }
    }
}
impl Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

pub type Args = SmallVec<[Term; 3]>;

/// A predicate applied to terms.
#[derive(Clone, PartialEq, Eq)]
pub struct Atom {
    pub pred: Sym,
    pub args: Args,
}

impl Atom {
    pub fn new(pred: impl Into<Sym>, args: impl IntoIterator<Item = Term>) -> Atom {
        Atom {
            pred: pred.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "({})", self.pred)
        } else {
            write!(f, "({} {})", self.pred, self.args.iter().format(" "))
        }
    }
}
impl Debug for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Boolean/quantified-logic expression tree used for every precondition,
/// effect and goal. Built bottom-up and never mutated after construction.
///
/// The empty conjunction is the always-true formula.
#[derive(Clone, PartialEq, Eq)]
pub enum Formula {
    Atom(Atom),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Forall(Vec<Param>, Box<Formula>),
    Exists(Vec<Param>, Box<Formula>),
    Equal(Term, Term),
}

impl Formula {
    pub const TRUE: Formula = Formula::And(Vec::new());

    pub fn atom(pred: impl Into<Sym>, args: impl IntoIterator<Item = Term>) -> Formula {
        Formula::Atom(Atom::new(pred, args))
    }

    pub fn negated(self) -> Formula {
        Formula::Not(Box::new(self))
    }

    /// Conjunction; nested conjunctions are flattened.
    pub fn and(items: impl IntoIterator<Item = Formula>) -> Formula {
        let mut flat = Vec::new();
        for item in items {
            match item {
                Formula::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Formula::And(flat)
    }

    pub fn or(items: impl IntoIterator<Item = Formula>) -> Formula {
        Formula::Or(items.into_iter().collect())
    }

    pub fn implies(self, conclusion: Formula) -> Formula {
        Formula::Implies(Box::new(self), Box::new(conclusion))
    }

    pub fn forall(vars: impl IntoIterator<Item = Param>, body: Formula) -> Formula {
        Formula::Forall(vars.into_iter().collect(), Box::new(body))
    }

    pub fn exists(vars: impl IntoIterator<Item = Param>, body: Formula) -> Formula {
        Formula::Exists(vars.into_iter().collect(), Box::new(body))
    }

    pub fn equal(a: Term, b: Term) -> Formula {
        Formula::Equal(a, b)
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Formula::And(items) if items.is_empty())
    }
}

fn disp_params(f: &mut std::fmt::Formatter<'_>, params: &[Param]) -> std::fmt::Result {
    write!(
        f,
        "({})",
        params.iter().map(|p| format!("?{} - {}", p.name, p.tpe)).format(" ")
    )
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Atom(atom) => write!(f, "{atom}"),
            Formula::Not(inner) => write!(f, "(not {inner})"),
            Formula::And(items) => {
                if items.is_empty() {
                    write!(f, "(and)")
                } else {
                    write!(f, "(and {})", items.iter().format(" "))
                }
            }
            Formula::Or(items) => write!(f, "(or {})", items.iter().format(" ")),
            Formula::Implies(cond, conclusion) => write!(f, "(imply {cond} {conclusion})"),
            Formula::Forall(params, body) => {
                write!(f, "(forall ")?;
                disp_params(f, params)?;
                write!(f, " {body})")
            }
            Formula::Exists(params, body) => {
                write!(f, "(exists ")?;
                disp_params(f, params)?;
                write!(f, " {body})")
            }
            Formula::Equal(a, b) => write!(f, "(= {a} {b})"),
        }
    }
}
impl Debug for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// A predicate applied to concrete objects: the unit of the initial-state
/// set and of plan-step arguments.
#[derive(Clone, PartialEq, Eq)]
pub struct GroundAtom {
    pub pred: Sym,
    pub args: SmallVec<[Sym; 3]>,
}

impl GroundAtom {
    pub fn new(pred: impl Into<Sym>, args: impl IntoIterator<Item = Sym>) -> GroundAtom {
        GroundAtom {
            pred: pred.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl Display for GroundAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "({})", self.pred)
        } else {
            write!(f, "({} {})", self.pred, self.args.iter().format(" "))
        }
    }
}
impl Debug for GroundAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_conjunction_is_true() {
        assert!(Formula::TRUE.is_true());
        assert!(Formula::and([]).is_true());
        assert!(!Formula::atom("occupied", [Term::var("r")]).is_true());
    }

    #[test]
    fn conjunctions_are_flattened() {
        let inner = Formula::and([
            Formula::atom("p", [Term::var("x")]),
            Formula::atom("q", [Term::var("x")]),
        ]);
        let outer = Formula::and([inner, Formula::atom("r", [Term::var("x")])]);
        match outer {
            Formula::And(items) => assert_eq!(items.len(), 3),
            other => panic!("expected a flattened conjunction, got {other}"),
        }
    }

    #[test]
    fn quantified_formulas_compare_structurally() {
        let body = || Formula::atom("sensor_locked", [Term::var("s")]);
        let forall = |tpe: &str| Formula::forall([Param::new("s", tpe)], body());
        assert_eq!(forall("sensor"), forall("sensor"));
        // the bound variable's type is part of the formula's identity
        assert_ne!(forall("sensor"), forall("actuator"));
        assert_ne!(forall("sensor"), Formula::exists([Param::new("s", "sensor")], body()));
    }

    #[test]
    fn display_renders_wire_syntax() {
        let f = Formula::forall(
            [Param::new("r2", "room")],
            Formula::equal(Term::var("r2"), Term::var("r"))
                .negated()
                .implies(Formula::atom("rooms_connected", [Term::var("r2"), Term::var("r")]).negated()),
        );
        assert_eq!(
            f.to_string(),
            "(forall (?r2 - room) (imply (not (= ?r2 ?r)) (not (rooms_connected ?r2 ?r))))"
        );
    }
}
