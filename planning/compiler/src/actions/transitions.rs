//! Sensor-actuator transition families.
//!
//! For every sensor category the generator enumerates influence direction ×
//! activation transition × changed-flag pre-value. The sensor moves up iff
//! the influence relation matches the activation transition (turning an
//! increasing actuator on, or a decreasing one off); the required pre-state
//! is the opposite end of that move. Fresh variants require the actuator's
//! changed flag clear and raise it; flagged variants require it already set
//! and leave it set, so `remove_actuator_change_flag` is the only way to
//! re-enable a fresh toggle.

use domos_model::{ActionTemplate, Actions, Formula, Param, Res};

use super::{emit, v};
use crate::context::{CompilationContext, PredicateKind, PredicateKind::*};
use crate::tags::{ExecutionMap, IntentTag};
use crate::vocab::{Bucket, SensorCategory, SensorKind, tpe};

/// The parity rule: the sensor value rises iff `increases XOR not activating`.
pub fn raises_value(increases: bool, activating: bool) -> bool {
    increases ^ !activating
}

pub fn generate(ctx: &CompilationContext, actions: &mut Actions, map: &mut ExecutionMap) -> Res<()> {
    for category in SensorCategory::ALL {
        match category.kind() {
            SensorKind::Binary => binary_family(ctx, category, actions, map)?,
            SensorKind::Numerical => numerical_family(ctx, category, actions, map)?,
            // textual sensors have no ordered states to transition through
            SensorKind::Textual => {}
        }
    }

    let a = Param::new("a", tpe::ACTUATOR);
    emit(
        actions,
        map,
        ActionTemplate::new(
            "remove_actuator_change_flag",
            vec![a.clone()],
            ctx.atom(&ActuatorChanged, [v(&a)]),
            ctx.atom(&ActuatorChanged, [v(&a)]).negated(),
        ),
        [IntentTag::Helper],
    )?;

    Ok(())
}

struct Axes {
    increases: bool,
    activating: bool,
    flagged: bool,
}

fn axes() -> impl Iterator<Item = Axes> {
    [false, true].into_iter().flat_map(move |increases| {
        [false, true].into_iter().flat_map(move |activating| {
            [false, true].into_iter().map(move |flagged| Axes {
                increases,
                activating,
                flagged,
            })
        })
    })
}

fn action_name(kind: &str, category: SensorCategory, axes: &Axes, boundary: Option<(Bucket, Bucket)>) -> String {
    let up = raises_value(axes.increases, axes.activating);
    let direction = if up { "increase" } else { "decrease" };
    let motion = match boundary {
        Some((lo, hi)) if up => format!("_{lo}_{hi}"),
        Some((lo, hi)) => format!("_{hi}_{lo}"),
        None => String::new(),
    };
    let act = if axes.activating { "turn_on" } else { "turn_off" };
    let flag = if axes.flagged { "_flagged" } else { "" };
    format!("{direction}_s_{kind}_{category}{motion}_{act}{flag}")
}

/// Shared precondition/effect skeleton; the caller supplies the sensor-state
/// halves specific to its family.
fn transition(
    ctx: &CompilationContext,
    name: String,
    category: SensorCategory,
    axes: &Axes,
    sensor_pre: Formula,
    sensor_eff: Formula,
    actions: &mut Actions,
    map: &mut ExecutionMap,
) -> Res<()> {
    let s = Param::new("s", category.name());
    let a = Param::new("a", tpe::ACTUATOR);
    let r = Param::new("r", tpe::ROOM);

    let influence: &PredicateKind = if axes.increases { &IncreasesValue } else { &DecreasesValue };
    let activation_pre = if axes.activating {
        ctx.atom(&ActuatorActive, [v(&a)]).negated()
    } else {
        ctx.atom(&ActuatorActive, [v(&a)])
    };
    let flag_pre = if axes.flagged {
        ctx.atom(&ActuatorChanged, [v(&a)])
    } else {
        ctx.atom(&ActuatorChanged, [v(&a)]).negated()
    };

    let precondition = Formula::and([
        ctx.atom(&DeviceInRoom, [v(&s), v(&r)]),
        ctx.atom(&DeviceInRoom, [v(&a), v(&r)]),
        ctx.atom(&SensorLocked, [v(&s)]).negated(),
        ctx.atom(influence, [v(&a), v(&s)]),
        activation_pre,
        flag_pre,
        sensor_pre,
    ]);

    let mut effects = vec![
        sensor_eff,
        if axes.activating {
            ctx.atom(&ActuatorActive, [v(&a)])
        } else {
            ctx.atom(&ActuatorActive, [v(&a)]).negated()
        },
    ];
    if !axes.flagged {
        effects.push(ctx.atom(&ActuatorChanged, [v(&a)]));
    }

    let command = if axes.activating {
        if axes.increases {
            IntentTag::ActuatorIncrease
        } else {
            IntentTag::ActuatorDecrease
        }
    } else {
        IntentTag::ActuatorOff
    };

    emit(
        actions,
        map,
        ActionTemplate::new(
            name,
            vec![s, a, r],
            precondition,
            Formula::and(effects),
        ),
        [IntentTag::ChangeSensorIntent, command],
    )
}

fn binary_family(
    ctx: &CompilationContext,
    category: SensorCategory,
    actions: &mut Actions,
    map: &mut ExecutionMap,
) -> Res<()> {
    let s = Param::new("s", category.name());
    for ax in axes() {
        let up = raises_value(ax.increases, ax.activating);
        let sensing = ctx.atom(&IsSensing, [v(&s)]);
        let (sensor_pre, sensor_eff) = if up {
            (sensing.clone().negated(), sensing)
        } else {
            (sensing.clone(), sensing.negated())
        };
        let name = action_name("binary", category, &ax, None);
        transition(ctx, name, category, &ax, sensor_pre, sensor_eff, actions, map)?;
    }
    Ok(())
}

fn numerical_family(
    ctx: &CompilationContext,
    category: SensorCategory,
    actions: &mut Actions,
    map: &mut ExecutionMap,
) -> Res<()> {
    let s = Param::new("s", category.name());
    for (lo, hi) in Bucket::BOUNDARIES {
        for ax in axes() {
            let up = raises_value(ax.increases, ax.activating);
            let (from, to) = if up { (lo, hi) } else { (hi, lo) };
            let sensor_pre = ctx.atom(&PredicateKind::bucket(from), [v(&s)]);
            let sensor_eff = Formula::and([
                ctx.atom(&PredicateKind::bucket(from), [v(&s)]).negated(),
                ctx.atom(&PredicateKind::bucket(to), [v(&s)]),
            ]);
            let name = action_name("numerical", category, &ax, Some((lo, hi)));
            transition(ctx, name, category, &ax, sensor_pre, sensor_eff, actions, map)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parity_truth_table() {
        // the sensor rises iff the influence matches the activation transition
        assert!(raises_value(true, true)); // increasing actuator turned on
        assert!(!raises_value(true, false)); // increasing actuator turned off
        assert!(!raises_value(false, true)); // decreasing actuator turned on
        assert!(raises_value(false, false)); // decreasing actuator turned off
    }

    fn generated() -> (Actions, ExecutionMap) {
        let ctx = CompilationContext::new(&[]).unwrap();
        let mut actions = Actions::new();
        let mut map = ExecutionMap::new();
        generate(&ctx, &mut actions, &mut map).unwrap();
        (actions, map)
    }

    #[test]
    fn eight_actions_per_binary_category() {
        let (actions, _) = generated();
        for category in SensorCategory::ALL.iter().filter(|c| c.kind() == SensorKind::Binary) {
            let count = actions
                .iter()
                .filter(|a| a.name.as_str().contains(&format!("_s_binary_{category}")))
                .count();
            assert_eq!(count, 8, "{category}");
        }
    }

    #[test]
    fn sixteen_actions_per_numerical_category() {
        let (actions, _) = generated();
        for category in SensorCategory::ALL.iter().filter(|c| c.kind() == SensorKind::Numerical) {
            let count = actions
                .iter()
                .filter(|a| a.name.as_str().contains(&format!("_s_numerical_{category}")))
                .count();
            assert_eq!(count, 16, "{category}");
        }
    }

    #[test]
    fn one_up_and_one_down_per_boundary_and_axis_combination() {
        let (actions, _) = generated();
        for (lo, hi) in Bucket::BOUNDARIES {
            for act in ["turn_on", "turn_off"] {
                for flag in ["", "_flagged"] {
                    let up = format!("increase_s_numerical_light_s_{lo}_{hi}_{act}{flag}");
                    let down = format!("decrease_s_numerical_light_s_{hi}_{lo}_{act}{flag}");
                    assert!(actions.get(&up.as_str().into()).is_ok(), "missing {up}");
                    assert!(actions.get(&down.as_str().into()).is_ok(), "missing {down}");
                }
            }
        }
    }

    #[test]
    fn fresh_variants_raise_the_change_flag_and_flagged_ones_require_it() {
        let (actions, _) = generated();
        let fresh = actions
            .get(&"increase_s_numerical_light_s_low_ok_turn_on".into())
            .unwrap();
        assert!(fresh.precondition.to_string().contains("(not (actuator_changed ?a))"));
        assert!(fresh.effect.to_string().contains("(actuator_changed ?a)"));

        let flagged = actions
            .get(&"increase_s_numerical_light_s_low_ok_turn_on_flagged".into())
            .unwrap();
        assert!(flagged.precondition.to_string().contains("(actuator_changed ?a)"));
        assert!(!flagged.effect.to_string().contains("actuator_changed"));
    }

    #[test]
    fn commands_route_to_the_matching_device_bucket() {
        let (_, map) = generated();
        let on = map.get(&"increase_s_numerical_light_s_low_ok_turn_on".into()).unwrap();
        assert!(on.has(IntentTag::ActuatorIncrease));
        // decreasing influence turned on lowers the sensor
        let down = map.get(&"decrease_s_numerical_light_s_ok_low_turn_on".into()).unwrap();
        assert!(down.has(IntentTag::ActuatorDecrease));
        // any deactivation is an off-command whatever the direction
        let off = map.get(&"increase_s_numerical_light_s_low_ok_turn_off".into()).unwrap();
        assert!(off.has(IntentTag::ActuatorOff));
        assert!(map.get(&"remove_actuator_change_flag".into()).unwrap().has(IntentTag::Helper));
    }
}
