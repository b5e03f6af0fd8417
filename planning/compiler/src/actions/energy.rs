//! Energy saving and actuator cancel-out.

use domos_model::{ActionTemplate, Actions, Formula, Param, Res};

use super::{emit, v};
use crate::context::{CompilationContext, PredicateKind::*};
use crate::tags::{ExecutionMap, IntentTag};
use crate::vocab::tpe;

pub fn generate(ctx: &CompilationContext, actions: &mut Actions, map: &mut ExecutionMap) -> Res<()> {
    save_energy(ctx, actions, map)?;
    cancel_out(ctx, actions, map)?;
    Ok(())
}

/// Shut down an active actuator in a room that is neither occupied nor
/// expecting guests.
fn save_energy(ctx: &CompilationContext, actions: &mut Actions, map: &mut ExecutionMap) -> Res<()> {
    let a = Param::new("a", tpe::ACTUATOR);
    let r = Param::new("r", tpe::ROOM);
    emit(
        actions,
        map,
        ActionTemplate::new(
            "save_energy",
            vec![a.clone(), r.clone()],
            Formula::and([
                ctx.atom(&DeviceInRoom, [v(&a), v(&r)]),
                ctx.atom(&RoomOccupied, [v(&r)]).negated(),
                ctx.atom(&RoomExpectingGuests, [v(&r)]).negated(),
                ctx.atom(&ActuatorActive, [v(&a)]),
            ]),
            Formula::and([
                ctx.atom(&ActuatorActive, [v(&a)]).negated(),
                ctx.atom(&ActuatorChanged, [v(&a)]),
            ]),
        ),
        [IntentTag::SaveEnergyIntent, IntentTag::ActuatorOff],
    )
}

/// Two opposing actuators driving the same sensor neutralize each other.
/// Unreachable under the solver's cost model in practice; kept so the
/// classifier's cancel_out list has a producer.
fn cancel_out(ctx: &CompilationContext, actions: &mut Actions, map: &mut ExecutionMap) -> Res<()> {
    let a1 = Param::new("a1", tpe::ACTUATOR);
    let a2 = Param::new("a2", tpe::ACTUATOR);
    let s = Param::new("s", tpe::SENSOR);

    let opposed = Formula::and([
        ctx.atom(&IncreasesValue, [v(&a1), v(&s)]),
        ctx.atom(&DecreasesValue, [v(&a2), v(&s)]),
        Formula::equal(v(&a1), v(&a2)).negated(),
    ]);

    emit(
        actions,
        map,
        ActionTemplate::new(
            "cancel_out_actuator_off",
            vec![a1.clone(), a2.clone(), s.clone()],
            Formula::and([
                opposed.clone(),
                ctx.atom(&ActuatorActive, [v(&a1)]),
                ctx.atom(&ActuatorActive, [v(&a2)]),
            ]),
            Formula::and([
                ctx.atom(&ActuatorActive, [v(&a1)]).negated(),
                ctx.atom(&ActuatorActive, [v(&a2)]).negated(),
                ctx.atom(&ActuatorChanged, [v(&a1)]),
                ctx.atom(&ActuatorChanged, [v(&a2)]),
            ]),
        ),
        [IntentTag::ActuatorCancelOut, IntentTag::ActuatorOff],
    )?;

    emit(
        actions,
        map,
        ActionTemplate::new(
            "cancel_out_actuator_flags",
            vec![a1.clone(), a2.clone(), s.clone()],
            Formula::and([
                opposed,
                ctx.atom(&ActuatorChanged, [v(&a1)]),
                ctx.atom(&ActuatorChanged, [v(&a2)]),
            ]),
            Formula::and([
                ctx.atom(&ActuatorChanged, [v(&a1)]).negated(),
                ctx.atom(&ActuatorChanged, [v(&a2)]).negated(),
            ]),
        ),
        [IntentTag::ActuatorCancelOut],
    )
}
