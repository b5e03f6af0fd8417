//! Crew movement and cleaning.

use domos_model::{ActionTemplate, Actions, Formula, Param, Res};

use super::{emit, v};
use crate::context::{CompilationContext, PredicateKind::*};
use crate::tags::{ExecutionMap, IntentTag};
use crate::vocab::tpe;

pub fn generate(ctx: &CompilationContext, actions: &mut Actions, map: &mut ExecutionMap) -> Res<()> {
    let t = Param::new("t", tpe::CLEANING_TEAM);
    let r1 = Param::new("r1", tpe::ROOM);
    let r2 = Param::new("r2", tpe::ROOM);
    let f = Param::new("f", tpe::FLOOR);
    let f1 = Param::new("f1", tpe::FLOOR);
    let f2 = Param::new("f2", tpe::FLOOR);

    let relocation = Formula::and([
        ctx.atom(&TeamInRoom, [v(&t), v(&r1)]).negated(),
        ctx.atom(&TeamInRoom, [v(&t), v(&r2)]),
    ]);

    // crossing floors goes through elevator rooms
    emit(
        actions,
        map,
        ActionTemplate::new(
            "move_to_floor",
            vec![t.clone(), r1.clone(), r2.clone(), f1.clone(), f2.clone()],
            Formula::and([
                ctx.atom(&TeamInRoom, [v(&t), v(&r1)]),
                ctx.atom(&RoomOnFloor, [v(&r1), v(&f1)]),
                ctx.atom(&RoomOnFloor, [v(&r2), v(&f2)]),
                ctx.atom(&RoomHasElevator, [v(&r1)]),
                ctx.atom(&RoomHasElevator, [v(&r2)]),
                Formula::equal(v(&f1), v(&f2)).negated(),
            ]),
            relocation.clone(),
        ),
        [IntentTag::Helper],
    )?;

    emit(
        actions,
        map,
        ActionTemplate::new(
            "move_to_room",
            vec![t.clone(), r1.clone(), r2.clone(), f.clone()],
            Formula::and([
                ctx.atom(&TeamInRoom, [v(&t), v(&r1)]),
                ctx.atom(&RoomOnFloor, [v(&r1), v(&f)]),
                ctx.atom(&RoomOnFloor, [v(&r2), v(&f)]),
                Formula::equal(v(&r1), v(&r2)).negated(),
                Formula::or([
                    ctx.atom(&RoomsConnected, [v(&r1), v(&r2)]),
                    ctx.atom(&RoomsConnected, [v(&r2), v(&r1)]),
                ]),
            ]),
            relocation.clone(),
        ),
        [IntentTag::Helper],
    )?;

    // Degenerate single-room floor: the target is adjacent to nothing, in
    // either direction, so the regular move never applies.
    let r3 = Param::new("r3", tpe::ROOM);
    emit(
        actions,
        map,
        ActionTemplate::new(
            "move_to_isolated_room",
            vec![t.clone(), r1.clone(), r2.clone(), f.clone()],
            Formula::and([
                ctx.atom(&TeamInRoom, [v(&t), v(&r1)]),
                ctx.atom(&RoomOnFloor, [v(&r1), v(&f)]),
                ctx.atom(&RoomOnFloor, [v(&r2), v(&f)]),
                Formula::equal(v(&r1), v(&r2)).negated(),
                Formula::forall(
                    [r3.clone()],
                    Formula::equal(v(&r3), v(&r2)).negated().implies(Formula::and([
                        ctx.atom(&RoomsConnected, [v(&r2), v(&r3)]).negated(),
                        ctx.atom(&RoomsConnected, [v(&r3), v(&r2)]).negated(),
                    ])),
                ),
            ]),
            relocation,
        ),
        [IntentTag::Helper],
    )?;

    let r = Param::new("r", tpe::ROOM);
    emit(
        actions,
        map,
        ActionTemplate::new(
            "team_clean",
            vec![t.clone(), r.clone()],
            Formula::and([
                ctx.atom(&TeamInRoom, [v(&t), v(&r)]),
                ctx.atom(&RoomOccupied, [v(&r)]).negated(),
                ctx.atom(&RoomCleaned, [v(&r)]).negated(),
            ]),
            ctx.atom(&RoomCleaned, [v(&r)]),
        ),
        [IntentTag::CleanIntent],
    )?;

    Ok(())
}
