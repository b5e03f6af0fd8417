//! Parsing of the flat plan text returned by the external solver.
//!
//! Boundary format: one step per line, `ACTION_NAME ARG1 ARG2 ...`,
//! case-insensitive and whitespace-delimited, optionally wrapped in
//! parentheses. A sentinel "goal reached" line may terminate the plan and is
//! ignored, as are empty lines and `;` comment lines.

use std::fmt::{Debug, Display};

use itertools::Itertools;

use crate::Sym;

/// Sentinel emitted by the solver when the goal state is reached.
pub const REACH_GOAL: &str = "reach_goal";

/// One parsed line of solver output.
#[derive(Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub action: Sym,
    pub args: Vec<Sym>,
}

impl PlanStep {
    pub fn new(action: impl Into<Sym>, args: impl IntoIterator<Item = Sym>) -> Self {
        Self {
            action: action.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.action)
        } else {
            write!(f, "{} {}", self.action, self.args.iter().format(" "))
        }
    }
}
impl Debug for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Parses solver output into ordered plan steps, dropping sentinel and
/// comment lines. Action and argument tokens are case-folded so they match
/// the lowercased names recorded at generation time.
pub fn parse_plan(text: &str) -> Vec<PlanStep> {
    let mut steps = Vec::new();
    for line in text.lines() {
        let line = line.trim().trim_start_matches('(').trim_end_matches(')').trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let mut tokens = line.split_whitespace().map(|t| Sym::from(t.to_lowercase()));
        let action = match tokens.next() {
            Some(name) => name,
            None => continue,
        };
        if action.as_str() == REACH_GOAL {
            continue;
        }
        steps.push(PlanStep {
            action,
            args: tokens.collect(),
        });
    }
    steps
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_case_insensitive_lines() {
        let steps = parse_plan("MOVE_TO_ROOM Team_T1 Room_R0 Room_R1 Floor_F0\nteam_clean team_t1 room_r1\n");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].action.as_str(), "move_to_room");
        assert_eq!(steps[0].args[0].as_str(), "team_t1");
        assert_eq!(steps[1].action.as_str(), "team_clean");
    }

    #[test]
    fn skips_sentinel_comments_and_blank_lines() {
        let steps = parse_plan("; solver header\n\n(team_clean team_t1 room_r1)\nREACH_GOAL\n");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].action.as_str(), "team_clean");
    }
}
