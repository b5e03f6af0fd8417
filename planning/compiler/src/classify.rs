//! Plan classification: partitions a solved plan into the ordered lists the
//! device dispatchers consume, driven by the intent tags recorded at
//! generation time.

use domos_model::pddl::{PlanStep, parse_plan};
use thiserror::Error;

use crate::tags::{ExecutionMap, IntentTag};

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The plan names an action the generators never produced. The plan and
    /// the execution map come from the same compilation, so this is a
    /// contract violation and the whole plan is unusable.
    #[error("plan step references unknown action: {0}")]
    UnknownAction(String),
}

/// The seven ordered step lists downstream dispatchers expect. `filtered`
/// holds every user-visible command step; the command lists below it are
/// sub-partitions of `filtered`.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedPlan {
    pub filtered: Vec<PlanStep>,
    pub cleaning: Vec<PlanStep>,
    pub increase: Vec<PlanStep>,
    pub turn_off: Vec<PlanStep>,
    pub decrease: Vec<PlanStep>,
    pub cancel_out: Vec<PlanStep>,
    pub detected_activities: Vec<PlanStep>,
}

pub fn classify(plan: &str, map: &ExecutionMap) -> Result<ClassifiedPlan, ClassifyError> {
    let mut out = ClassifiedPlan::default();

    for step in parse_plan(plan) {
        let entry = map
            .get(&step.action)
            .ok_or_else(|| ClassifyError::UnknownAction(step.action.to_string()))?;

        if entry.has(IntentTag::DetectedActivity) {
            out.detected_activities.push(step);
            continue;
        }
        if entry.has(IntentTag::Helper) {
            continue;
        }

        out.filtered.push(step.clone());
        if entry.has(IntentTag::CleanIntent) {
            out.cleaning.push(step.clone());
        }
        if entry.has(IntentTag::ActuatorCancelOut) {
            out.cancel_out.push(step);
        } else if entry.has(IntentTag::ActuatorOff) {
            out.turn_off.push(step);
        } else if entry.has(IntentTag::ActuatorIncrease) {
            out.increase.push(step);
        } else if entry.has(IntentTag::ActuatorDecrease) {
            out.decrease.push(step);
        }
    }

    Ok(out)
}
