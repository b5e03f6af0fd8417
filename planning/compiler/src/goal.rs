//! Goal formula assembly.

use std::collections::BTreeMap;

use domos_model::{Formula, Param, Term};

use crate::context::{CompilationContext, PredicateKind, PredicateKind::*};
use crate::vocab::{Bucket, SensorCategory, tpe};

/// Conjoins the sensor-bucket targets, the vacancy shutdown rule, the
/// per-position activity obligations and (optionally) the cleaning target.
/// An empty mapping contributes nothing; the other conjuncts always apply.
pub fn compile_goal(
    ctx: &CompilationContext,
    sensor_goal_mapping: &BTreeMap<SensorCategory, Bucket>,
    plan_cleaning: bool,
) -> Formula {
    let mut conjuncts = Vec::new();

    let r = Param::new("r", tpe::ROOM);
    let rv: Term = (&r).into();

    for (category, bucket) in sensor_goal_mapping {
        let s = Param::new("s", category.name());
        let sv: Term = (&s).into();
        conjuncts.push(Formula::forall(
            [s.clone(), r.clone()],
            Formula::and([
                ctx.atom(&DeviceInRoom, [sv.clone(), rv.clone()]),
                ctx.atom(&RoomOccupied, [rv.clone()]),
                ctx.atom(&SensorLocked, [sv.clone()]).negated(),
            ])
            .implies(ctx.atom(&PredicateKind::bucket(*bucket), [sv])),
        ));
    }

    let a = Param::new("a", tpe::ACTUATOR);
    let av: Term = (&a).into();
    conjuncts.push(Formula::forall(
        [r.clone()],
        ctx.atom(&RoomOccupied, [rv.clone()]).negated().implies(Formula::forall(
            [a],
            ctx.atom(&DeviceInRoom, [av.clone(), rv.clone()])
                .implies(ctx.atom(&ActuatorActive, [av]).negated()),
        )),
    ));

    let p = Param::new("p", tpe::ROOM_POSITION);
    let pv: Term = (&p).into();
    conjuncts.push(Formula::forall(
        [r.clone(), p.clone()],
        ctx.atom(&PositionInRoom, [pv.clone(), rv.clone()]).implies(Formula::and([
            ctx.atom(&AllActivitiesChecked, [rv.clone(), pv.clone()]),
            ctx.atom(&AllActivitiesFulfilled, [rv.clone(), pv]),
        ])),
    ));

    if plan_cleaning {
        conjuncts.push(Formula::forall(
            [r],
            ctx.atom(&RoomOccupied, [rv.clone()])
                .negated()
                .implies(ctx.atom(&RoomCleaned, [rv])),
        ));
    }

    Formula::and(conjuncts)
}
