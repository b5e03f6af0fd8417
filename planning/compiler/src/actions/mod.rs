//! The seven action-generator families. Each is a pure function of the
//! compilation context; generation and intent tagging are a single pass.

pub mod activity;
pub mod assign;
pub mod energy;
pub mod movement;
pub mod transitions;

use domos_model::{ActionTemplate, Actions, Param, Res, Term};
use tracing::debug;

use crate::config::ActivityConfig;
use crate::context::CompilationContext;
use crate::tags::{ExecutionMap, IntentTag};

/// Registers one template and its tags in the same breath.
pub(crate) fn emit(
    actions: &mut Actions,
    map: &mut ExecutionMap,
    template: ActionTemplate,
    tags: impl IntoIterator<Item = IntentTag>,
) -> Res<()> {
    map.record(&template, tags);
    actions.add(template)?;
    Ok(())
}

pub(crate) fn v(p: &Param) -> Term {
    p.into()
}

/// Runs every generator family over the context.
pub fn generate_all(ctx: &CompilationContext, activities: &[ActivityConfig]) -> Res<(Actions, ExecutionMap)> {
    let mut actions = Actions::new();
    let mut map = ExecutionMap::new();
    movement::generate(ctx, &mut actions, &mut map)?;
    assign::generate(ctx, &mut actions, &mut map)?;
    transitions::generate(ctx, &mut actions, &mut map)?;
    activity::generate(ctx, activities, &mut actions, &mut map)?;
    energy::generate(ctx, &mut actions, &mut map)?;
    debug!(actions = actions.len(), "generated action templates");
    Ok((actions, map))
}
