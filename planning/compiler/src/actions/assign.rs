//! Assignment/bookkeeping actions that patch degenerate configurations
//! before the rest of the domain can operate on them.

use domos_model::{ActionTemplate, Actions, Formula, Param, Res};

use super::{emit, v};
use crate::context::{CompilationContext, PredicateKind::*};
use crate::tags::{ExecutionMap, IntentTag};
use crate::vocab::tpe;

pub fn generate(ctx: &CompilationContext, actions: &mut Actions, map: &mut ExecutionMap) -> Res<()> {
    let r = Param::new("r", tpe::ROOM);
    let f = Param::new("f", tpe::FLOOR);
    let f2 = Param::new("f2", tpe::FLOOR);
    let r2 = Param::new("r2", tpe::ROOM);

    // A room gets a floor iff it currently has none. The bulk effect makes
    // the adopted room reachable from everywhere on it.
    emit(
        actions,
        map,
        ActionTemplate::new(
            "assign_floor",
            vec![r.clone(), f.clone()],
            Formula::exists([f2.clone()], ctx.atom(&RoomOnFloor, [v(&r), v(&f2)])).negated(),
            Formula::and([
                ctx.atom(&RoomOnFloor, [v(&r), v(&f)]),
                Formula::forall([r2.clone()], ctx.atom(&RoomsConnected, [v(&r2), v(&r)])),
            ]),
        ),
        [IntentTag::Helper, IntentTag::AssignIntent],
    )?;

    // A room with no declared position claims a free-floating one; every
    // sensor counts as present at such a default position.
    let p = Param::new("p", tpe::ROOM_POSITION);
    let s = Param::new("s", tpe::SENSOR);
    emit(
        actions,
        map,
        ActionTemplate::new(
            "assign_room_position",
            vec![r.clone(), p.clone()],
            Formula::and([
                ctx.atom(&RoomHasPosition, [v(&r)]).negated(),
                Formula::exists([r2.clone()], ctx.atom(&PositionInRoom, [v(&p), v(&r2)])).negated(),
            ]),
            Formula::and([
                ctx.atom(&PositionInRoom, [v(&p), v(&r)]),
                ctx.atom(&RoomHasPosition, [v(&r)]),
                Formula::forall([s.clone()], ctx.atom(&SensorAtPosition, [v(&s), v(&p)])),
            ]),
        ),
        [IntentTag::Helper, IntentTag::AssignIntent],
    )?;

    // A sensor no actuator can influence in either direction is immutable.
    let a = Param::new("a", tpe::ACTUATOR);
    emit(
        actions,
        map,
        ActionTemplate::new(
            "assign_lock_for_sensor",
            vec![s.clone()],
            Formula::and([
                ctx.atom(&SensorLocked, [v(&s)]).negated(),
                Formula::exists(
                    [a.clone()],
                    Formula::or([
                        ctx.atom(&IncreasesValue, [v(&a), v(&s)]),
                        ctx.atom(&DecreasesValue, [v(&a), v(&s)]),
                    ]),
                )
                .negated(),
            ]),
            ctx.atom(&SensorLocked, [v(&s)]),
        ),
        [IntentTag::Helper, IntentTag::AssignIntent],
    )?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn assignment_actions_carry_bulk_effects() {
        let ctx = CompilationContext::new(&[]).unwrap();
        let mut actions = Actions::new();
        let mut map = ExecutionMap::new();
        generate(&ctx, &mut actions, &mut map).unwrap();

        let floor = actions.get(&"assign_floor".into()).unwrap();
        assert!(floor.effect.to_string().contains("(forall (?r2 - room) (rooms_connected ?r2 ?r))"));
        let position = actions.get(&"assign_room_position".into()).unwrap();
        assert!(
            position
                .effect
                .to_string()
                .contains("(forall (?s - sensor) (sensor_at_position ?s ?p))")
        );
    }

    #[test]
    fn lock_requires_no_influencing_actuator() {
        let ctx = CompilationContext::new(&[]).unwrap();
        let mut actions = Actions::new();
        let mut map = ExecutionMap::new();
        generate(&ctx, &mut actions, &mut map).unwrap();

        let lock = actions.get(&"assign_lock_for_sensor".into()).unwrap();
        let pre = lock.precondition.to_string();
        assert!(pre.contains("(not (exists (?a - actuator)"));
        assert!(pre.contains("(increases_value ?a ?s)"));
        assert!(pre.contains("(decreases_value ?a ?s)"));
        assert!(map.get(&"assign_lock_for_sensor".into()).unwrap().has(IntentTag::AssignIntent));
    }
}
