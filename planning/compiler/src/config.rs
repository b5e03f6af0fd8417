//! Building configuration as supplied by the persistence/device layer, and
//! its validation. Validation runs to completion before any generation: a
//! configuration that fails any check never reaches the generators.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::{ActuatorCategory, Bucket, ExpectedReading, SensorCategory, SensorKind};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate {kind} uid: {uid}")]
    DuplicateUid { kind: &'static str, uid: String },
    #[error("{context} references unknown room: {uid}")]
    UnknownRoom { context: &'static str, uid: String },
    #[error("{context} references unknown position: {uid}")]
    UnknownPosition { context: &'static str, uid: String },
    #[error("{context} references unknown sensor: {uid}")]
    UnknownSensor { context: &'static str, uid: String },
    #[error("{context} references unknown actuator: {uid}")]
    UnknownActuator { context: &'static str, uid: String },
    #[error("{matrix} influence matrix has {entries} entries for {actuators} declared actuators")]
    InfluenceCardinality {
        matrix: &'static str,
        entries: usize,
        actuators: usize,
    },
    #[error("duplicate activity name: {0}")]
    DuplicateActivity(String),
    #[error("activity {0}: empty detection signature")]
    EmptyDetectionSignature(String),
    #[error("activity {activity}: expectation {expected:?} does not apply to {category} sensors")]
    ReadingMismatch {
        activity: String,
        category: SensorCategory,
        expected: ExpectedReading,
    },
    #[error("{context}: bucket goal on non-numerical category {category}")]
    BucketOnNonNumerical {
        context: &'static str,
        category: SensorCategory,
    },
    #[error("position {position} belongs to room {owner}, not {room}")]
    PositionRoomMismatch {
        position: String,
        owner: String,
        room: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorConfig {
    pub uid: String,
    #[serde(default)]
    pub rooms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionConfig {
    pub uid: String,
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub uid: String,
    /// Room the cleaning crew currently occupies.
    pub room: String,
}

/// Tri-state initial value of a sensor relative to its nominal range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Below,
    #[default]
    Within,
    Above,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub uid: String,
    pub category: SensorCategory,
    pub room: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub reading: Reading,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActuatorConfig {
    pub uid: String,
    pub category: ActuatorCategory,
    pub room: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomStateConfig {
    pub room: String,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub expecting_guests: bool,
    #[serde(default)]
    pub cleaned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub name: String,
    /// Detection signature: sensor category -> state it must read for the
    /// activity to be recognized at a room position.
    #[serde(default)]
    pub detection: BTreeMap<SensorCategory, ExpectedReading>,
    /// Fulfillment signature: sensor category -> bucket it must reach for
    /// the detected activity to count as served.
    #[serde(default)]
    pub fulfillment: BTreeMap<SensorCategory, Bucket>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub floors: Vec<FloorConfig>,
    /// Rooms that host an elevator; crews change floors through them.
    #[serde(default)]
    pub elevators: Vec<String>,
    #[serde(default)]
    pub positions: Vec<PositionConfig>,
    #[serde(default)]
    pub teams: Vec<TeamConfig>,
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
    #[serde(default)]
    pub actuators: Vec<ActuatorConfig>,
    /// actuator uid -> sensors whose value it raises while active.
    #[serde(default)]
    pub increases: BTreeMap<String, Vec<String>>,
    /// actuator uid -> sensors whose value it lowers while active.
    #[serde(default)]
    pub decreases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub locked_sensors: Vec<String>,
    #[serde(default)]
    pub room_states: Vec<RoomStateConfig>,
    #[serde(default)]
    pub activities: Vec<ActivityConfig>,
    /// Default goal: sensor category -> bucket occupied rooms must reach.
    #[serde(default)]
    pub sensor_goals: BTreeMap<SensorCategory, Bucket>,
    #[serde(default)]
    pub plan_cleaning: bool,
}

impl BuildingConfig {
    pub fn room_uids(&self) -> impl Iterator<Item = &String> {
        self.floors.iter().flat_map(|f| f.rooms.iter())
    }

    /// Runs every check; the first violation aborts before any generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut floors = HashSet::new();
        for f in &self.floors {
            if !floors.insert(f.uid.as_str()) {
                return Err(ConfigError::DuplicateUid {
                    kind: "floor",
                    uid: f.uid.clone(),
                });
            }
        }
        let mut rooms = HashSet::new();
        for r in self.room_uids() {
            if !rooms.insert(r.as_str()) {
                return Err(ConfigError::DuplicateUid {
                    kind: "room",
                    uid: r.clone(),
                });
            }
        }
        let room_known = |context: &'static str, uid: &String| -> Result<(), ConfigError> {
            if rooms.contains(uid.as_str()) {
                Ok(())
            } else {
                Err(ConfigError::UnknownRoom {
                    context,
                    uid: uid.clone(),
                })
            }
        };

        for e in &self.elevators {
            room_known("elevator list", e)?;
        }

        let mut position_room: hashbrown::HashMap<&str, &str> = hashbrown::HashMap::new();
        for p in &self.positions {
            room_known("position", &p.room)?;
            if position_room.insert(p.uid.as_str(), p.room.as_str()).is_some() {
                return Err(ConfigError::DuplicateUid {
                    kind: "position",
                    uid: p.uid.clone(),
                });
            }
        }

        let mut teams = HashSet::new();
        for t in &self.teams {
            room_known("team", &t.room)?;
            if !teams.insert(t.uid.as_str()) {
                return Err(ConfigError::DuplicateUid {
                    kind: "team",
                    uid: t.uid.clone(),
                });
            }
        }

        let mut sensors = HashSet::new();
        for s in &self.sensors {
            room_known("sensor", &s.room)?;
            if !sensors.insert(s.uid.as_str()) {
                return Err(ConfigError::DuplicateUid {
                    kind: "sensor",
                    uid: s.uid.clone(),
                });
            }
            if let Some(position) = &s.position {
                match position_room.get(position.as_str()) {
                    None => {
                        return Err(ConfigError::UnknownPosition {
                            context: "sensor",
                            uid: position.clone(),
                        });
                    }
                    Some(owner) if *owner != s.room.as_str() => {
                        return Err(ConfigError::PositionRoomMismatch {
                            position: position.clone(),
                            owner: owner.to_string(),
                            room: s.room.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let mut actuators = HashSet::new();
        for a in &self.actuators {
            room_known("actuator", &a.room)?;
            if !actuators.insert(a.uid.as_str()) {
                return Err(ConfigError::DuplicateUid {
                    kind: "actuator",
                    uid: a.uid.clone(),
                });
            }
        }

        for (matrix, entries) in [("increases", &self.increases), ("decreases", &self.decreases)] {
            if entries.len() > self.actuators.len() {
                return Err(ConfigError::InfluenceCardinality {
                    matrix,
                    entries: entries.len(),
                    actuators: self.actuators.len(),
                });
            }
            for (actuator, influenced) in entries {
                if !actuators.contains(actuator.as_str()) {
                    return Err(ConfigError::UnknownActuator {
                        context: matrix,
                        uid: actuator.clone(),
                    });
                }
                for sensor in influenced {
                    if !sensors.contains(sensor.as_str()) {
                        return Err(ConfigError::UnknownSensor {
                            context: matrix,
                            uid: sensor.clone(),
                        });
                    }
                }
            }
        }

        for locked in &self.locked_sensors {
            if !sensors.contains(locked.as_str()) {
                return Err(ConfigError::UnknownSensor {
                    context: "locked list",
                    uid: locked.clone(),
                });
            }
        }

        for state in &self.room_states {
            room_known("room state", &state.room)?;
        }

        let mut activity_names = HashSet::new();
        for activity in &self.activities {
            if !activity_names.insert(activity.name.as_str()) {
                return Err(ConfigError::DuplicateActivity(activity.name.clone()));
            }
            // a detection without sensors would quantify over nothing
            if activity.detection.is_empty() {
                return Err(ConfigError::EmptyDetectionSignature(activity.name.clone()));
            }
            for (&category, &expected) in &activity.detection {
                if expected.kind() != category.kind() {
                    return Err(ConfigError::ReadingMismatch {
                        activity: activity.name.clone(),
                        category,
                        expected,
                    });
                }
            }
            for &category in activity.fulfillment.keys() {
                if category.kind() != SensorKind::Numerical {
                    return Err(ConfigError::BucketOnNonNumerical {
                        context: "activity fulfillment",
                        category,
                    });
                }
            }
        }

        for &category in self.sensor_goals.keys() {
            if category.kind() != SensorKind::Numerical {
                return Err(ConfigError::BucketOnNonNumerical {
                    context: "sensor goals",
                    category,
                });
            }
        }

        Ok(())
    }
}
