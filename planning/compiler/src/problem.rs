//! Problem-side compilation: objects and the initial state, derived from a
//! validated building configuration.

use domos_model::{GroundAtom, Object, Objects, Res, Sym};
use hashbrown::HashSet;

use crate::config::{BuildingConfig, Reading};
use crate::context::{CompilationContext, PredicateKind::*};
use crate::vocab::{SensorKind, tpe};

fn room(uid: &str) -> Sym {
    Object::scoped(tpe::ROOM, uid).name().clone()
}

/// Compiles the object set and initial ground atoms. The configuration must
/// already have passed [`BuildingConfig::validate`].
pub fn compile_problem(ctx: &CompilationContext, config: &BuildingConfig) -> Res<(Objects, Vec<GroundAtom>)> {
    let mut objects = Objects::new();
    let mut init = Vec::new();

    for floor in &config.floors {
        let f = Object::scoped(tpe::FLOOR, &floor.uid);
        let floor_name = f.name().clone();
        objects.add(f)?;
        for r in &floor.rooms {
            let o = Object::scoped(tpe::ROOM, r);
            init.push(ctx.ground(&RoomOnFloor, [o.name().clone(), floor_name.clone()]));
            objects.add(o)?;
        }
        // rooms on a floor are pairwise reachable; a single direction per
        // pair is enough, movement checks both
        for (i, r1) in floor.rooms.iter().enumerate() {
            for r2 in &floor.rooms[i + 1..] {
                init.push(ctx.ground(&RoomsConnected, [room(r1), room(r2)]));
            }
        }
    }

    for elevator in &config.elevators {
        init.push(ctx.ground(&RoomHasElevator, [room(elevator)]));
    }

    let mut rooms_with_position: HashSet<&str> = HashSet::new();
    for position in &config.positions {
        let p = Object::scoped(tpe::ROOM_POSITION, &position.uid);
        init.push(ctx.ground(&PositionInRoom, [p.name().clone(), room(&position.room)]));
        init.push(ctx.ground(&RoomHasPosition, [room(&position.room)]));
        objects.add(p)?;
        rooms_with_position.insert(position.room.as_str());
    }
    // rooms without a declared position get a free-floating one that the
    // position-assignment action can claim
    for r in config.room_uids() {
        if !rooms_with_position.contains(r.as_str()) {
            objects.add(Object::scoped(tpe::ROOM_POSITION, &format!("default_{r}")))?;
        }
    }

    for team in &config.teams {
        let t = Object::scoped(tpe::CLEANING_TEAM, &team.uid);
        init.push(ctx.ground(&TeamInRoom, [t.name().clone(), room(&team.room)]));
        objects.add(t)?;
    }

    for sensor in &config.sensors {
        let s = Object::scoped(sensor.category.name(), &sensor.uid);
        let name = s.name().clone();
        objects.add(s)?;
        init.push(ctx.ground(&DeviceInRoom, [name.clone(), room(&sensor.room)]));
        if let Some(position) = &sensor.position {
            let p = Object::scoped(tpe::ROOM_POSITION, position).name().clone();
            init.push(ctx.ground(&SensorAtPosition, [name.clone(), p]));
        }
        match sensor.category.kind() {
            SensorKind::Binary => {
                // a binary sensor reads above its nominal range iff it senses
                if sensor.reading == Reading::Above {
                    init.push(ctx.ground(&IsSensing, [name.clone()]));
                }
            }
            SensorKind::Numerical => {
                let bucket = match sensor.reading {
                    Reading::Below => ValueLow,
                    Reading::Within => ValueOk,
                    Reading::Above => ValueHigh,
                };
                init.push(ctx.ground(&bucket, [name.clone()]));
            }
            SensorKind::Textual => {}
        }
    }

    for actuator in &config.actuators {
        let a = Object::scoped(actuator.category.name(), &actuator.uid);
        let name = a.name().clone();
        objects.add(a)?;
        init.push(ctx.ground(&DeviceInRoom, [name.clone(), room(&actuator.room)]));
        if actuator.active {
            init.push(ctx.ground(&ActuatorActive, [name]));
        }
    }

    // uids are resolved per device kind: a sensor and an actuator may share
    // a uid, but a matrix key is always an actuator and its values sensors
    let sensor_object = |uid: &str| -> Res<Sym> {
        let sensor = config
            .sensors
            .iter()
            .find(|s| s.uid == uid)
            .ok_or_else(|| anyhow::anyhow!("unknown sensor uid: {uid}"))?;
        Ok(Object::scoped(sensor.category.name(), uid).name().clone())
    };
    let actuator_object = |uid: &str| -> Res<Sym> {
        let actuator = config
            .actuators
            .iter()
            .find(|a| a.uid == uid)
            .ok_or_else(|| anyhow::anyhow!("unknown actuator uid: {uid}"))?;
        Ok(Object::scoped(actuator.category.name(), uid).name().clone())
    };

    for (kind, matrix) in [(IncreasesValue, &config.increases), (DecreasesValue, &config.decreases)] {
        for (actuator, influenced) in matrix {
            let a = actuator_object(actuator)?;
            for sensor in influenced {
                init.push(ctx.ground(&kind, [a.clone(), sensor_object(sensor)?]));
            }
        }
    }

    for locked in &config.locked_sensors {
        init.push(ctx.ground(&SensorLocked, [sensor_object(locked)?]));
    }

    for state in &config.room_states {
        let r = room(&state.room);
        if state.occupied {
            init.push(ctx.ground(&RoomOccupied, [r.clone()]));
        }
        if state.expecting_guests {
            init.push(ctx.ground(&RoomExpectingGuests, [r.clone()]));
        }
        if state.cleaned {
            init.push(ctx.ground(&RoomCleaned, [r]));
        }
    }

    Ok((objects, init))
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> BuildingConfig {
        serde_json::from_str(
            r#"{
            "floors": [{"uid": "f0", "rooms": ["r0", "r1"]}, {"uid": "f1", "rooms": ["r2"]}],
            "elevators": ["r0", "r2"],
            "positions": [{"uid": "p1", "room": "r0"}],
            "teams": [{"uid": "t1", "room": "r0"}],
            "sensors": [
                {"uid": "s1", "category": "light_s", "room": "r0", "position": "p1", "reading": "below"},
                {"uid": "m1", "category": "motion_s", "room": "r1", "reading": "above"}
            ],
            "actuators": [{"uid": "a1", "category": "dimmer_a", "room": "r0", "active": true}],
            "increases": {"a1": ["s1"]},
            "locked_sensors": ["m1"],
            "room_states": [{"room": "r1", "occupied": true}]
        }"#,
        )
        .unwrap()
    }

    fn compiled() -> (Objects, Vec<String>) {
        let config = config();
        config.validate().unwrap();
        let ctx = CompilationContext::new(&[]).unwrap();
        let (objects, init) = compile_problem(&ctx, &config).unwrap();
        let atoms = init.iter().map(|a| a.to_string()).collect();
        (objects, atoms)
    }

    #[test]
    fn same_floor_rooms_are_connected_once_per_pair() {
        let (_, atoms) = compiled();
        assert!(atoms.contains(&"(rooms_connected room_r0 room_r1)".to_string()));
        assert!(!atoms.contains(&"(rooms_connected room_r1 room_r0)".to_string()));
        // single-room floors stay isolated
        assert!(!atoms.iter().any(|a| a.starts_with("(rooms_connected room_r2")));
    }

    #[test]
    fn devices_are_typed_by_category_and_placed() {
        let (objects, atoms) = compiled();
        assert_eq!(objects.get(&"light_s_s1".into()).unwrap().tpe().as_str(), "light_s");
        assert!(atoms.contains(&"(device_in_room dimmer_a_a1 room_r0)".to_string()));
        assert!(atoms.contains(&"(sensor_at_position light_s_s1 room_position_p1)".to_string()));
        assert!(atoms.contains(&"(increases_value dimmer_a_a1 light_s_s1)".to_string()));
    }

    #[test]
    fn readings_and_flags_map_to_initial_atoms() {
        let (_, atoms) = compiled();
        assert!(atoms.contains(&"(value_low light_s_s1)".to_string()));
        assert!(atoms.contains(&"(is_sensing motion_s_m1)".to_string()));
        assert!(atoms.contains(&"(actuator_active dimmer_a_a1)".to_string()));
        assert!(atoms.contains(&"(sensor_locked motion_s_m1)".to_string()));
        assert!(atoms.contains(&"(room_occupied room_r1)".to_string()));
    }

    #[test]
    fn shared_sensor_actuator_uid_grounds_each_matrix_slot_by_kind() {
        let config: BuildingConfig = serde_json::from_str(
            r#"{
            "floors": [{"uid": "f0", "rooms": ["r0"]}],
            "sensors": [
                {"uid": "x", "category": "motion_s", "room": "r0"},
                {"uid": "s1", "category": "light_s", "room": "r0"}
            ],
            "actuators": [{"uid": "x", "category": "dimmer_a", "room": "r0"}],
            "increases": {"x": ["s1"]},
            "locked_sensors": ["x"]
        }"#,
        )
        .unwrap();
        config.validate().unwrap();
        let ctx = CompilationContext::new(&[]).unwrap();
        let (_, init) = compile_problem(&ctx, &config).unwrap();
        let atoms: Vec<String> = init.iter().map(|a| a.to_string()).collect();

        assert!(atoms.contains(&"(increases_value dimmer_a_x light_s_s1)".to_string()));
        assert!(!atoms.iter().any(|a| a.starts_with("(increases_value motion_s_x")));
        // the locked list names the sensor, not the actuator
        assert!(atoms.contains(&"(sensor_locked motion_s_x)".to_string()));
    }

    #[test]
    fn rooms_without_positions_get_a_default_object() {
        let (objects, atoms) = compiled();
        assert!(objects.get(&"room_position_default_r1".into()).is_ok());
        // free-floating until an assignment action claims it
        assert!(!atoms.iter().any(|a| a.contains("room_position_default_r1")));
    }
}
