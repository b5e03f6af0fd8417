//! Hint file for the external plan viewer.

use domos_model::Res;
use serde::Serialize;

use crate::tags::ExecutionMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExcludeActions {
    exclude_actions: Vec<String>,
}

/// JSON object listing every bookkeeping action the viewer should hide,
/// sorted for stable output.
pub fn exclude_actions_json(map: &ExecutionMap) -> Res<String> {
    let hint = ExcludeActions {
        exclude_actions: map.helper_action_names(),
    };
    Ok(serde_json::to_string_pretty(&hint)?)
}
