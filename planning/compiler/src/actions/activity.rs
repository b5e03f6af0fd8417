//! Activity detection and fulfillment.
//!
//! Detection fires per room/position: exactly one of the three detect
//! actions applies (recognized, not recognized, impossible) and all of them
//! set the per-activity checked flag. Fulfillment consumes the detection
//! flags and locks every sensor it relied upon so the planner cannot
//! exploit it afterwards.

use domos_model::{ActionTemplate, Actions, Formula, Param, Res, Term};

use super::{emit, v};
use crate::config::ActivityConfig;
use crate::context::{CompilationContext, PredicateKind::*};
use crate::tags::{ExecutionMap, IntentTag};
use crate::vocab::{ExpectedReading, SensorCategory, tpe};

pub fn generate(
    ctx: &CompilationContext,
    activities: &[ActivityConfig],
    actions: &mut Actions,
    map: &mut ExecutionMap,
) -> Res<()> {
    let r = Param::new("r", tpe::ROOM);
    let p = Param::new("p", tpe::ROOM_POSITION);

    for activity in activities {
        detection(ctx, activity, &r, &p, actions, map)?;
        fulfillment(ctx, activity, &r, &p, actions, map)?;
    }

    // aggregate over the full declared activity set
    let all_checked = ctx
        .activities
        .iter()
        .map(|a| ctx.atom(&ActivityChecked(a.clone()), [v(&r), v(&p)]))
        .collect::<Vec<_>>();
    emit(
        actions,
        map,
        ActionTemplate::new(
            "check_all_activities",
            vec![r.clone(), p.clone()],
            Formula::and(
                std::iter::once(ctx.atom(&PositionInRoom, [v(&p), v(&r)])).chain(all_checked),
            ),
            ctx.atom(&AllActivitiesChecked, [v(&r), v(&p)]),
        ),
        [IntentTag::Helper, IntentTag::DetectActivityIntent],
    )?;

    let all_fulfilled = ctx
        .activities
        .iter()
        .map(|a| ctx.atom(&ActivityFulfilled(a.clone()), [v(&r), v(&p)]))
        .collect::<Vec<_>>();
    emit(
        actions,
        map,
        ActionTemplate::new(
            "fulfill_all_activities",
            vec![r.clone(), p.clone()],
            Formula::and(
                std::iter::once(ctx.atom(&PositionInRoom, [v(&p), v(&r)])).chain(all_fulfilled),
            ),
            ctx.atom(&AllActivitiesFulfilled, [v(&r), v(&p)]),
        ),
        [IntentTag::Helper, IntentTag::FulfillActivityIntent],
    )?;

    Ok(())
}

/// Signature sensors as fresh existential parameters `s1..sn`.
fn signature_params(categories: impl Iterator<Item = SensorCategory>) -> Vec<(Param, SensorCategory)> {
    categories
        .enumerate()
        .map(|(i, category)| (Param::new(format!("s{}", i + 1), category.name()), category))
        .collect()
}

fn colocated(ctx: &CompilationContext, sensor: &Param, r: &Param, p: &Param) -> Formula {
    Formula::and([
        ctx.atom(&DeviceInRoom, [v(sensor), v(r)]),
        ctx.atom(&SensorAtPosition, [v(sensor), v(p)]),
    ])
}

fn reading(ctx: &CompilationContext, sensor: &Param, expected: ExpectedReading) -> Formula {
    let s: Term = v(sensor);
    match expected {
        ExpectedReading::Sensing => ctx.atom(&IsSensing, [s]),
        ExpectedReading::NotSensing => ctx.atom(&IsSensing, [s]).negated(),
        ExpectedReading::Low => ctx.atom(&ValueLow, [s]),
        ExpectedReading::Ok => ctx.atom(&ValueOk, [s]),
        ExpectedReading::High => ctx.atom(&ValueHigh, [s]),
    }
}

fn detection(
    ctx: &CompilationContext,
    activity: &ActivityConfig,
    r: &Param,
    p: &Param,
    actions: &mut Actions,
    map: &mut ExecutionMap,
) -> Res<()> {
    let activity_name = domos_model::Sym::from(activity.name.as_str());
    let checked = ctx.atom(&ActivityChecked(activity_name.clone()), [v(r), v(p)]);
    let doing = ctx.atom(&DoingActivityAt(activity_name.clone()), [v(r), v(p)]);

    let params = signature_params(activity.detection.keys().copied());
    let present = Formula::exists(
        params.iter().map(|(param, _)| param.clone()),
        Formula::and(params.iter().map(|(param, _)| colocated(ctx, param, r, p))),
    );
    let satisfied = Formula::exists(
        params.iter().map(|(param, _)| param.clone()),
        Formula::and(params.iter().map(|(param, category)| {
            Formula::and([colocated(ctx, param, r, p), reading(ctx, param, activity.detection[category])])
        })),
    );

    let base = [ctx.atom(&PositionInRoom, [v(p), v(r)]), checked.clone().negated()];

    emit(
        actions,
        map,
        ActionTemplate::new(
            format!("detect_activity_{activity_name}"),
            vec![r.clone(), p.clone()],
            Formula::and(base.clone().into_iter().chain([satisfied.clone()])),
            Formula::and([doing.clone(), checked.clone()]),
        ),
        [IntentTag::DetectActivityIntent, IntentTag::DetectedActivity],
    )?;

    emit(
        actions,
        map,
        ActionTemplate::new(
            format!("detect_no_activity_{activity_name}"),
            vec![r.clone(), p.clone()],
            Formula::and(base.clone().into_iter().chain([present.clone(), satisfied.negated()])),
            checked.clone(),
        ),
        [IntentTag::Helper, IntentTag::DetectActivityIntent],
    )?;

    emit(
        actions,
        map,
        ActionTemplate::new(
            format!("detect_activity_{activity_name}_impossible"),
            vec![r.clone(), p.clone()],
            Formula::and(base.into_iter().chain([present.negated()])),
            checked,
        ),
        [IntentTag::Helper, IntentTag::DetectActivityIntent],
    )?;

    Ok(())
}

fn fulfillment(
    ctx: &CompilationContext,
    activity: &ActivityConfig,
    r: &Param,
    p: &Param,
    actions: &mut Actions,
    map: &mut ExecutionMap,
) -> Res<()> {
    let activity_name = domos_model::Sym::from(activity.name.as_str());
    let checked = ctx.atom(&ActivityChecked(activity_name.clone()), [v(r), v(p)]);
    let doing = ctx.atom(&DoingActivityAt(activity_name.clone()), [v(r), v(p)]);
    let fulfilled = ctx.atom(&ActivityFulfilled(activity_name.clone()), [v(r), v(p)]);

    let params = signature_params(activity.fulfillment.keys().copied());
    let mut parameters = vec![r.clone(), p.clone()];
    parameters.extend(params.iter().map(|(param, _)| param.clone()));

    let mut pre = vec![doing.clone()];
    let mut eff = vec![fulfilled.clone()];
    for (param, category) in &params {
        pre.push(colocated(ctx, param, r, p));
        pre.push(ctx.atom(&SensorLocked, [v(param)]).negated());
        pre.push(reading(
            ctx,
            param,
            match activity.fulfillment[category] {
                crate::vocab::Bucket::Low => ExpectedReading::Low,
                crate::vocab::Bucket::Ok => ExpectedReading::Ok,
                crate::vocab::Bucket::High => ExpectedReading::High,
            },
        ));
        // lock what fulfillment relied on
        eff.push(ctx.atom(&SensorLocked, [v(param)]));
    }

    emit(
        actions,
        map,
        ActionTemplate::new(
            format!("fulfill_activity_{activity_name}"),
            parameters,
            Formula::and(pre),
            Formula::and(eff),
        ),
        [IntentTag::Helper, IntentTag::FulfillActivityIntent],
    )?;

    emit(
        actions,
        map,
        ActionTemplate::new(
            format!("fulfill_activity_{activity_name}_absent"),
            vec![r.clone(), p.clone()],
            Formula::and([checked, doing.negated()]),
            fulfilled,
        ),
        [IntentTag::Helper, IntentTag::FulfillActivityIntent],
    )?;

    Ok(())
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;
    use crate::vocab::Bucket;

    fn sleep() -> ActivityConfig {
        ActivityConfig {
            name: "sleep".to_string(),
            detection: BTreeMap::from([
                (SensorCategory::Motion, ExpectedReading::NotSensing),
                (SensorCategory::Pressure, ExpectedReading::Sensing),
            ]),
            fulfillment: BTreeMap::from([(SensorCategory::Light, Bucket::Low)]),
        }
    }

    fn read() -> ActivityConfig {
        ActivityConfig {
            name: "read".to_string(),
            detection: BTreeMap::from([(SensorCategory::Pressure, ExpectedReading::Sensing)]),
            fulfillment: BTreeMap::from([(SensorCategory::Light, Bucket::High)]),
        }
    }

    fn generated() -> (Actions, ExecutionMap) {
        let ctx = CompilationContext::new(&["sleep".into(), "read".into()]).unwrap();
        let mut actions = Actions::new();
        let mut map = ExecutionMap::new();
        generate(&ctx, &[sleep(), read()], &mut actions, &mut map).unwrap();
        (actions, map)
    }

    #[test]
    fn three_detect_actions_per_activity_set_the_checked_flag() {
        let (actions, _) = generated();
        for name in [
            "detect_activity_sleep",
            "detect_no_activity_sleep",
            "detect_activity_sleep_impossible",
        ] {
            let action = actions.get(&name.into()).unwrap();
            assert!(
                action.effect.to_string().contains("(checked_activity_sleep ?r ?p)"),
                "{name}"
            );
        }
    }

    #[test]
    fn positive_detection_is_existential_over_the_signature() {
        let (actions, map) = generated();
        let detect = actions.get(&"detect_activity_sleep".into()).unwrap();
        let pre = detect.precondition.to_string();
        assert!(pre.contains("(exists (?s1 - motion_s ?s2 - pressure_s)"));
        assert!(pre.contains("(not (is_sensing ?s1))"));
        assert!(pre.contains("(is_sensing ?s2)"));

        let entry = map.get(&"detect_activity_sleep".into()).unwrap();
        assert!(entry.has(IntentTag::DetectedActivity));
        assert!(!entry.has(IntentTag::Helper));
    }

    #[test]
    fn fulfillment_locks_its_sensors() {
        let (actions, _) = generated();
        let fulfill = actions.get(&"fulfill_activity_read".into()).unwrap();
        assert!(fulfill.precondition.to_string().contains("(value_high ?s1)"));
        assert!(fulfill.effect.to_string().contains("(sensor_locked ?s1)"));
    }

    #[test]
    fn aggregates_fold_over_every_declared_activity() {
        let (actions, _) = generated();
        let all = actions.get(&"fulfill_all_activities".into()).unwrap();
        let pre = all.precondition.to_string();
        assert!(pre.contains("(fulfilled_activity_sleep ?r ?p)"));
        assert!(pre.contains("(fulfilled_activity_read ?r ?p)"));
        let checked = actions.get(&"check_all_activities".into()).unwrap();
        assert!(checked.precondition.to_string().contains("(checked_activity_read ?r ?p)"));
    }
}
