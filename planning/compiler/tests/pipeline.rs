//! End-to-end pipeline tests with a scripted solver.

use domos_compiler::{
    BuildingConfig, ClassifyError, IntentTag, SolveOutcome, Solver, SolverError, compile, compile_and_solve,
};

/// Returns a fixed solver answer regardless of the task.
struct ScriptedSolver(SolveOutcome);

impl Solver for ScriptedSolver {
    fn solve(&self, _domain: &str, _problem: &str) -> Result<SolveOutcome, SolverError> {
        Ok(self.0.clone())
    }
}

/// Two floors, three rooms, one low light sensor driven by one dimmer.
fn scenario() -> BuildingConfig {
    serde_json::from_str(
        r#"{
        "floors": [{"uid": "f0", "rooms": ["r0", "r1"]}, {"uid": "f1", "rooms": ["r2"]}],
        "elevators": ["r0", "r2"],
        "positions": [{"uid": "p1", "room": "r0"}],
        "teams": [{"uid": "t1", "room": "r2"}],
        "sensors": [{"uid": "s1", "category": "light_s", "room": "r0", "position": "p1", "reading": "below"}],
        "actuators": [{"uid": "a1", "category": "dimmer_a", "room": "r0"}],
        "increases": {"a1": ["s1"]},
        "sensor_goals": {"light_s": "high"}
    }"#,
    )
    .unwrap()
}

#[test]
fn compilation_produces_complete_pddl_text() {
    let compilation = compile(&scenario()).unwrap();

    assert!(compilation.domain.starts_with("(define (domain building)"));
    assert!(compilation.domain.contains(":negative-preconditions"));
    assert!(compilation.domain.contains("(:action increase_s_numerical_light_s_low_ok_turn_on"));
    assert!(compilation.domain.contains("(:action increase_s_numerical_light_s_ok_high_turn_on"));

    assert!(compilation.problem.contains("light_s_s1 - light_s"));
    assert!(compilation.problem.contains("(value_low light_s_s1)"));
    assert!(compilation.problem.contains("(rooms_connected room_r0 room_r1)"));
    // the bucket target only binds occupied rooms
    assert!(compilation.problem.contains("(imply (and (device_in_room ?s ?r) (room_occupied ?r) (not (sensor_locked ?s))) (value_high ?s))"));
}

#[test]
fn solved_plan_is_filtered_and_routed() {
    let plan = "\
(move_to_floor team_t1 room_r2 room_r0 floor_f1 floor_f0)
(increase_s_numerical_light_s_low_ok_turn_on light_s_s1 dimmer_a_a1 room_r0)
(remove_actuator_change_flag dimmer_a_a1)
(increase_s_numerical_light_s_ok_high_turn_on_flagged light_s_s1 dimmer_a_a1 room_r0)
(reach_goal)
";
    let solver = ScriptedSolver(SolveOutcome::Plan(plan.to_string()));
    let classified = compile_and_solve(&scenario(), &solver).unwrap().unwrap();

    // movement and flag bookkeeping are helpers
    assert_eq!(classified.filtered.len(), 2);
    assert_eq!(classified.increase.len(), 2);
    let step = &classified.increase[0];
    assert_eq!(step.action.as_str(), "increase_s_numerical_light_s_low_ok_turn_on");
    assert_eq!(step.args[0].as_str(), "light_s_s1");
    assert_eq!(step.args[1].as_str(), "dimmer_a_a1");
    assert!(classified.cleaning.is_empty());
    assert!(classified.detected_activities.is_empty());
}

#[test]
fn no_plan_short_circuits_dispatch() {
    let solver = ScriptedSolver(SolveOutcome::NoPlan);
    assert!(compile_and_solve(&scenario(), &solver).unwrap().is_none());
}

#[test]
fn unknown_plan_step_fails_the_whole_plan() {
    let solver = ScriptedSolver(SolveOutcome::Plan("(FOO X Y)\n".to_string()));
    let err = compile_and_solve(&scenario(), &solver).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ClassifyError>(),
        Some(ClassifyError::UnknownAction(name)) if name == "foo"
    ));
}

#[test]
fn cancel_out_actions_stay_registered() {
    let compilation = compile(&scenario()).unwrap();
    for name in ["cancel_out_actuator_off", "cancel_out_actuator_flags"] {
        let entry = compilation.map.get(&name.into()).unwrap();
        assert!(entry.has(IntentTag::ActuatorCancelOut), "{name}");
    }
}
