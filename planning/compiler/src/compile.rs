//! End-to-end pipeline: configuration -> PDDL text -> solver -> classified
//! plan. Each call builds its own context; concurrent compilations never
//! share state.

use domos_model::pddl::writer::{write_domain, write_problem};
use domos_model::{Res, Sym};
use tracing::{debug, info};

use crate::actions::generate_all;
use crate::classify::{ClassifiedPlan, classify};
use crate::config::BuildingConfig;
use crate::context::CompilationContext;
use crate::goal::compile_goal;
use crate::problem::compile_problem;
use crate::solver::{SolveOutcome, Solver};
use crate::tags::ExecutionMap;

pub const DOMAIN_NAME: &str = "building";
pub const PROBLEM_NAME: &str = "building_state";

/// PDDL text plus the metadata needed to interpret a plan solved against it.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub domain: String,
    pub problem: String,
    pub map: ExecutionMap,
}

pub fn compile(config: &BuildingConfig) -> Res<Compilation> {
    config.validate()?;

    let activity_names: Vec<Sym> = config.activities.iter().map(|a| a.name.as_str().into()).collect();
    let ctx = CompilationContext::new(&activity_names)?;

    let (actions, map) = generate_all(&ctx, &config.activities)?;
    let goal = compile_goal(&ctx, &config.sensor_goals, config.plan_cleaning);
    let (objects, init) = compile_problem(&ctx, config)?;

    let domain_name = Sym::from(DOMAIN_NAME);
    let domain = write_domain(&domain_name, &ctx.types, &ctx.predicates, &actions);
    let problem = write_problem(&Sym::from(PROBLEM_NAME), &domain_name, &objects, &init, &goal);
    debug!(
        actions = actions.len(),
        objects = objects.len(),
        atoms = init.len(),
        "compiled planning task"
    );

    Ok(Compilation { domain, problem, map })
}

/// Compiles, solves and classifies. `None` means the solver found no plan;
/// nothing is dispatched in that case.
pub fn compile_and_solve(config: &BuildingConfig, solver: &dyn Solver) -> Res<Option<ClassifiedPlan>> {
    let compilation = compile(config)?;
    match solver.solve(&compilation.domain, &compilation.problem)? {
        SolveOutcome::Plan(text) => {
            let plan = classify(&text, &compilation.map)?;
            info!(steps = plan.filtered.len(), "plan classified");
            Ok(Some(plan))
        }
        SolveOutcome::NoPlan => {
            info!("solver found no plan");
            Ok(None)
        }
    }
}
