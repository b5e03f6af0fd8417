//! Intent tags and the execution map: per-action metadata recorded at
//! generation time and consumed by the plan classifier after solving.

use std::collections::BTreeSet;
use std::fmt::{Debug, Display};

use domos_model::{ActionTemplate, Sym};

/// Classification metadata attached to a generated action. Multiple tags
/// attach to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntentTag {
    /// Pure bookkeeping; filtered out of every user-visible list.
    Helper,
    CleanIntent,
    AssignIntent,
    ChangeSensorIntent,
    DetectActivityIntent,
    FulfillActivityIntent,
    SaveEnergyIntent,
    /// The step turns an actuator off.
    ActuatorOff,
    /// The step activates an actuator that raises its sensor.
    ActuatorIncrease,
    /// The step activates an actuator that lowers its sensor.
    ActuatorDecrease,
    /// Two opposing actuators whose net effect on the sensor is zero.
    ActuatorCancelOut,
    /// The step reports a recognized activity rather than a command.
    DetectedActivity,
}

pub type TagSet = BTreeSet<IntentTag>;

#[derive(Debug, Clone)]
pub struct ExecutionEntry {
    pub action: Sym,
    pub parameter_types: Vec<Sym>,
    pub tags: TagSet,
}

impl ExecutionEntry {
    pub fn has(&self, tag: IntentTag) -> bool {
        self.tags.contains(&tag)
    }
}

impl Display for ExecutionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} {:?}", self.action, self.parameter_types, self.tags)
    }
}

/// Action name (lowercased) -> intent metadata, built in the same pass that
/// generates the action templates.
///
/// Name collisions overwrite: the last registration wins. The generators
/// never collide (the `Actions` registry rejects duplicates first), but the
/// behavior is part of the contract and pinned by a test.
#[derive(Debug, Clone, Default)]
pub struct ExecutionMap {
    entries: hashbrown::HashMap<Sym, ExecutionEntry>,
}

impl ExecutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: &ActionTemplate, tags: impl IntoIterator<Item = IntentTag>) {
        let name = Sym::from(action.name.as_str().to_lowercase());
        let entry = ExecutionEntry {
            action: name.clone(),
            parameter_types: action.parameters.iter().map(|p| p.tpe.clone()).collect(),
            tags: tags.into_iter().collect(),
        };
        self.entries.insert(name, entry);
    }

    pub fn get(&self, action: &Sym) -> Option<&ExecutionEntry> {
        self.entries.get(action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionEntry> {
        self.entries.values()
    }

    /// Names of every Helper-tagged action, sorted for deterministic output.
    pub fn helper_action_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .iter()
            .filter(|e| e.has(IntentTag::Helper))
            .map(|e| e.action.as_str().to_string())
            .collect();
        names.sort();
        names
    }
}
