//! Per-compilation registries: the type taxonomy, the predicate vocabulary
//! and the closed enumeration of predicate kinds.
//!
//! A `CompilationContext` is built fresh for every compilation call and
//! threaded through the generators by argument. Nothing here is global:
//! concurrent compilations (activity-scoped predicates vary per call) each
//! own their context.

use domos_model::{Formula, GroundAtom, Param, Predicates, Res, Sym, Term, Types};

use crate::vocab::{ActuatorCategory, Bucket, SensorCategory, tpe};

/// Closed set of predicate kinds the generators may reference. The
/// activity-scoped variants carry the activity name they were minted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    // topology
    RoomOnFloor,
    RoomsConnected,
    RoomHasElevator,
    // meta-context
    RoomOccupied,
    RoomExpectingGuests,
    RoomCleaned,
    TeamInRoom,
    RoomHasPosition,
    PositionInRoom,
    // devices
    DeviceInRoom,
    SensorAtPosition,
    SensorLocked,
    // sensor state
    IsSensing,
    ValueLow,
    ValueOk,
    ValueHigh,
    // actuator state
    ActuatorActive,
    ActuatorChanged,
    IncreasesValue,
    DecreasesValue,
    // activity flags
    DoingActivityAt(Sym),
    ActivityChecked(Sym),
    ActivityFulfilled(Sym),
    AllActivitiesChecked,
    AllActivitiesFulfilled,
}

impl PredicateKind {
    pub fn name(&self) -> Sym {
        use PredicateKind::*;
        match self {
            RoomOnFloor => "room_on_floor".into(),
            RoomsConnected => "rooms_connected".into(),
            RoomHasElevator => "room_has_elevator".into(),
            RoomOccupied => "room_occupied".into(),
            RoomExpectingGuests => "room_expecting_guests".into(),
            RoomCleaned => "room_cleaned".into(),
            TeamInRoom => "team_in_room".into(),
            RoomHasPosition => "room_has_position".into(),
            PositionInRoom => "position_in_room".into(),
            DeviceInRoom => "device_in_room".into(),
            SensorAtPosition => "sensor_at_position".into(),
            SensorLocked => "sensor_locked".into(),
            IsSensing => "is_sensing".into(),
            ValueLow => "value_low".into(),
            ValueOk => "value_ok".into(),
            ValueHigh => "value_high".into(),
            ActuatorActive => "actuator_active".into(),
            ActuatorChanged => "actuator_changed".into(),
            IncreasesValue => "increases_value".into(),
            DecreasesValue => "decreases_value".into(),
            DoingActivityAt(a) => format!("is_doing_{a}_at").into(),
            ActivityChecked(a) => format!("checked_activity_{a}").into(),
            ActivityFulfilled(a) => format!("fulfilled_activity_{a}").into(),
            AllActivitiesChecked => "all_activities_checked".into(),
            AllActivitiesFulfilled => "all_activities_fulfilled".into(),
        }
    }

    pub fn params(&self) -> Vec<Param> {
        use PredicateKind::*;
        match self {
            RoomOnFloor => vec![Param::new("r", tpe::ROOM), Param::new("f", tpe::FLOOR)],
            RoomsConnected => vec![Param::new("r1", tpe::ROOM), Param::new("r2", tpe::ROOM)],
            RoomHasElevator | RoomOccupied | RoomExpectingGuests | RoomCleaned | RoomHasPosition => {
                vec![Param::new("r", tpe::ROOM)]
            }
            TeamInRoom => vec![Param::new("t", tpe::CLEANING_TEAM), Param::new("r", tpe::ROOM)],
            PositionInRoom => vec![Param::new("p", tpe::ROOM_POSITION), Param::new("r", tpe::ROOM)],
            DeviceInRoom => vec![Param::new("d", tpe::IOT_DEVICE), Param::new("r", tpe::ROOM)],
            SensorAtPosition => vec![Param::new("s", tpe::SENSOR), Param::new("p", tpe::ROOM_POSITION)],
            SensorLocked => vec![Param::new("s", tpe::SENSOR)],
            IsSensing => vec![Param::new("s", tpe::BINARY_SENSOR)],
            ValueLow | ValueOk | ValueHigh => vec![Param::new("s", tpe::NUMERICAL_SENSOR)],
            ActuatorActive | ActuatorChanged => vec![Param::new("a", tpe::ACTUATOR)],
            IncreasesValue | DecreasesValue => {
                vec![Param::new("a", tpe::ACTUATOR), Param::new("s", tpe::SENSOR)]
            }
            DoingActivityAt(_) | ActivityChecked(_) | ActivityFulfilled(_) | AllActivitiesChecked
            | AllActivitiesFulfilled => {
                vec![Param::new("r", tpe::ROOM), Param::new("p", tpe::ROOM_POSITION)]
            }
        }
    }

    /// The non-activity-scoped kinds, in registration order.
    fn fixed() -> Vec<PredicateKind> {
        use PredicateKind::*;
        vec![
            RoomOnFloor,
            RoomsConnected,
            RoomHasElevator,
            RoomOccupied,
            RoomExpectingGuests,
            RoomCleaned,
            TeamInRoom,
            RoomHasPosition,
            PositionInRoom,
            DeviceInRoom,
            SensorAtPosition,
            SensorLocked,
            IsSensing,
            ValueLow,
            ValueOk,
            ValueHigh,
            ActuatorActive,
            ActuatorChanged,
            IncreasesValue,
            DecreasesValue,
            AllActivitiesChecked,
            AllActivitiesFulfilled,
        ]
    }

    pub fn bucket(bucket: Bucket) -> PredicateKind {
        match bucket {
            Bucket::Low => PredicateKind::ValueLow,
            Bucket::Ok => PredicateKind::ValueOk,
            Bucket::High => PredicateKind::ValueHigh,
        }
    }
}

/// Registries for one compilation call.
pub struct CompilationContext {
    pub types: Types,
    pub predicates: Predicates,
    /// Distinct activity names supplied by configuration, in declaration order.
    pub activities: Vec<Sym>,
    kinds: hashbrown::HashMap<Sym, PredicateKind>,
}

impl CompilationContext {
    pub fn new(activities: &[Sym]) -> Res<Self> {
        let types = register_types()?;
        let mut predicates = Predicates::new();
        let mut kinds = hashbrown::HashMap::new();
        let mut declare = |kind: PredicateKind, predicates: &mut Predicates| -> Res<()> {
            let name = kind.name();
            predicates.add(name.clone(), kind.params(), &types)?;
            kinds.insert(name, kind);
            Ok(())
        };
        for kind in PredicateKind::fixed() {
            declare(kind, &mut predicates)?;
        }
        for activity in activities {
            declare(PredicateKind::DoingActivityAt(activity.clone()), &mut predicates)?;
            declare(PredicateKind::ActivityChecked(activity.clone()), &mut predicates)?;
            declare(PredicateKind::ActivityFulfilled(activity.clone()), &mut predicates)?;
        }
        Ok(Self {
            types,
            predicates,
            activities: activities.to_vec(),
            kinds,
        })
    }

    /// Atom over the given kind. The kind table guarantees the predicate is
    /// registered; arity is checked in debug builds.
    pub fn atom(&self, kind: &PredicateKind, args: impl IntoIterator<Item = Term>) -> Formula {
        let name = kind.name();
        debug_assert!(self.kinds.contains_key(&name), "unregistered predicate {name}");
        let atom = Formula::atom(name.clone(), args);
        if let Formula::Atom(a) = &atom {
            debug_assert_eq!(a.args.len(), kind.params().len(), "arity mismatch for {name}");
        }
        atom
    }

    /// Ground atom over concrete object names.
    pub fn ground(&self, kind: &PredicateKind, args: impl IntoIterator<Item = Sym>) -> GroundAtom {
        let name = kind.name();
        debug_assert!(self.kinds.contains_key(&name), "unregistered predicate {name}");
        GroundAtom::new(name, args)
    }

    pub fn kind_of(&self, predicate: &Sym) -> Option<&PredicateKind> {
        self.kinds.get(predicate)
    }
}

/// Builds the fixed type forest.
pub fn register_types() -> Res<Types> {
    let mut types = Types::new(tpe::OBJECT);
    types.add_type(tpe::FLOOR, tpe::OBJECT)?;
    types.add_type(tpe::ROOM, tpe::OBJECT)?;
    types.add_type(tpe::CLEANING_TEAM, tpe::OBJECT)?;
    types.add_type(tpe::ROOM_POSITION, tpe::OBJECT)?;
    types.add_type(tpe::IOT_DEVICE, tpe::OBJECT)?;
    types.add_type(tpe::SENSOR, tpe::IOT_DEVICE)?;
    types.add_type(tpe::BINARY_SENSOR, tpe::SENSOR)?;
    types.add_type(tpe::NUMERICAL_SENSOR, tpe::SENSOR)?;
    types.add_type(tpe::TEXTUAL_SENSOR, tpe::SENSOR)?;
    types.add_type(tpe::ACTUATOR, tpe::IOT_DEVICE)?;
    types.add_type(tpe::BINARY_ACTUATOR, tpe::ACTUATOR)?;
    types.add_type(tpe::NUMERICAL_ACTUATOR, tpe::ACTUATOR)?;
    types.add_type(tpe::TEXTUAL_ACTUATOR, tpe::ACTUATOR)?;
    for category in SensorCategory::ALL {
        types.add_type(category.name(), category.parent_type())?;
    }
    for category in ActuatorCategory::ALL {
        types.add_type(category.name(), category.parent_type())?;
    }
    Ok(types)
}
