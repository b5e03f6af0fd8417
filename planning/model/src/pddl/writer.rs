//! Emission of the generated model as STRIPS/ADL-compatible text.
//!
//! This is the only place where formulas meet the wire syntax; everything
//! upstream manipulates the `Formula` tree.

use std::fmt::Write;

use itertools::Itertools;

use crate::{Actions, Formula, GroundAtom, Objects, Predicates, Sym, Types};

/// Features advertised by every generated domain.
pub const REQUIREMENTS: &[&str] = &[
    ":strips",
    ":typing",
    ":equality",
    ":negative-preconditions",
    ":universal-preconditions",
    ":existential-preconditions",
    ":conditional-effects",
    ":adl",
];

pub fn write_domain(name: &Sym, types: &Types, predicates: &Predicates, actions: &Actions) -> String {
    let mut out = String::new();
    let w = &mut out;
    wl(w, 0, &format!("(define (domain {name})"));
    wl(w, 1, &format!("(:requirements {})", REQUIREMENTS.iter().format(" ")));

    wl(w, 1, "(:types");
    for (parent, children) in types_by_parent(types) {
        wl(w, 2, &format!("{} - {parent}", children.iter().format(" ")));
    }
    wl(w, 1, ")");

    wl(w, 1, "(:predicates");
    for p in predicates.iter() {
        wl(w, 2, &p.to_string());
    }
    wl(w, 1, ")");

    for a in actions.iter() {
        wl(w, 1, &format!("(:action {}", a.name));
        let params = a
            .parameters
            .iter()
            .map(|p| format!("?{} - {}", p.name, p.tpe))
            .format(" ");
        wl(w, 2, &format!(":parameters ({params})"));
        wl(w, 2, ":precondition");
        write_formula(w, &a.precondition, 3);
        wl(w, 2, ":effect");
        write_formula(w, &a.effect, 3);
        wl(w, 1, ")");
    }
    wl(w, 0, ")");
    out
}

pub fn write_problem(
    name: &Sym,
    domain: &Sym,
    objects: &Objects,
    init: &[GroundAtom],
    goal: &Formula,
) -> String {
    let mut out = String::new();
    let w = &mut out;
    wl(w, 0, &format!("(define (problem {name})"));
    wl(w, 1, &format!("(:domain {domain})"));
    wl(w, 1, "(:objects");
    for o in objects.iter() {
        wl(w, 2, &format!("{} - {}", o.name(), o.tpe()));
    }
    wl(w, 1, ")");
    wl(w, 1, "(:init");
    for atom in init {
        wl(w, 2, &atom.to_string());
    }
    wl(w, 1, ")");
    wl(w, 1, "(:goal");
    write_formula(w, goal, 2);
    wl(w, 1, ")");
    wl(w, 0, ")");
    out
}

/// Children grouped under their parent, preserving declaration order of both.
fn types_by_parent(types: &Types) -> Vec<(&Sym, Vec<&Sym>)> {
    let mut parents: Vec<&Sym> = Vec::new();
    let mut children: hashbrown::HashMap<&Sym, Vec<&Sym>> = hashbrown::HashMap::new();
    for t in types.iter() {
        let parent = types.parent(t).unwrap_or_else(|| types.top());
        if !children.contains_key(parent) {
            parents.push(parent);
        }
        children.entry(parent).or_default().push(t);
    }
    parents
        .into_iter()
        .map(|p| (p, children.remove(p).unwrap_or_default()))
        .collect()
}

/// Conjunctions break one conjunct per line; everything else renders inline.
fn write_formula(out: &mut String, f: &Formula, indent: usize) {
    match f {
        Formula::And(items) if !items.is_empty() => {
            wl(out, indent, "(and");
            for item in items {
                wl(out, indent + 1, &item.to_string());
            }
            wl(out, indent, ")");
        }
        other => wl(out, indent, &other.to_string()),
    }
}

fn wl(out: &mut String, indent: usize, line: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    // infallible on String
    let _ = writeln!(out, "{line}");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ActionTemplate, Object, Param, Term};

    #[test]
    fn domain_text_contains_all_sections() {
        let mut types = Types::new("object");
        types.add_type("room", "object").unwrap();
        types.add_type("floor", "object").unwrap();

        let mut predicates = Predicates::new();
        predicates
            .add(
                "room_on_floor",
                vec![Param::new("r", "room"), Param::new("f", "floor")],
                &types,
            )
            .unwrap();

        let mut actions = Actions::new();
        actions
            .add(ActionTemplate::new(
                "assign_floor",
                vec![Param::new("r", "room"), Param::new("f", "floor")],
                Formula::exists(
                    [Param::new("f2", "floor")],
                    Formula::atom("room_on_floor", [Term::var("r"), Term::var("f2")]),
                )
                .negated(),
                Formula::atom("room_on_floor", [Term::var("r"), Term::var("f")]),
            ))
            .unwrap();

        let text = write_domain(&"building".into(), &types, &predicates, &actions);
        assert!(text.contains("(define (domain building)"));
        assert!(text.contains("room floor - object"));
        assert!(text.contains("(room_on_floor ?r - room ?f - floor)"));
        assert!(text.contains("(:action assign_floor"));
        assert!(text.contains("(not (exists (?f2 - floor) (room_on_floor ?r ?f2)))"));
    }

    #[test]
    fn problem_text_grounds_objects_and_goal() {
        let mut objects = Objects::new();
        objects.add(Object::scoped("room", "r0")).unwrap();
        objects.add(Object::scoped("floor", "f0")).unwrap();
        let init = vec![GroundAtom::new(
            "room_on_floor",
            ["room_r0".into(), "floor_f0".into()],
        )];
        let goal = Formula::atom("room_cleaned", [Term::obj("room_r0")]);
        let text = write_problem(&"building_pb".into(), &"building".into(), &objects, &init, &goal);
        assert!(text.contains("room_r0 - room"));
        assert!(text.contains("(room_on_floor room_r0 floor_f0)"));
        assert!(text.contains("(room_cleaned room_r0)"));
    }
}
