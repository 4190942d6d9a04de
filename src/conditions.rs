use k8s_openapi::{
    api::core::v1::PodCondition,
    chrono::{DateTime, Utc},
};

/// The condition a pod most recently transitioned into, and why
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentCondition {
    pub type_: String,
    /// `reason-message` of the adopted condition
    pub reason: String,
}

/// Picks the current condition out of a pod's condition list.
///
/// The first condition adopted has to be `True`. Once something has been adopted, any condition
/// with a strictly newer `lastTransitionTime` replaces it, regardless of its status. A condition
/// without a transition time counts as the zero timestamp.
///
/// Returns empty strings if no condition is `True`.
pub fn current_condition(conditions: &[PodCondition]) -> CurrentCondition {
    let mut best: Option<(Option<DateTime<Utc>>, CurrentCondition)> = None;

    for c in conditions {
        let time = transition_time(c);
        let adopt = match &best {
            None => is_true(c),
            Some((best_time, _)) => (best_time.is_none() && is_true(c)) || *best_time < time,
        };
        if adopt {
            best = Some((
                time,
                CurrentCondition {
                    type_: c.type_.clone(),
                    reason: reason_of(c),
                },
            ));
        }
    }

    best.map(|(_, current)| current).unwrap_or_default()
}

/// Whether the pod has a `Ready` condition with status `True`
pub fn has_ready_condition(conditions: &[PodCondition]) -> bool {
    conditions.iter().any(|c| c.type_ == "Ready" && is_true(c))
}

fn is_true(c: &PodCondition) -> bool {
    c.status == "True"
}

fn transition_time(c: &PodCondition) -> Option<DateTime<Utc>> {
    c.last_transition_time.as_ref().map(|t| t.0)
}

fn reason_of(c: &PodCondition) -> String {
    format!(
        "{}-{}",
        c.reason.as_deref().unwrap_or_default(),
        c.message.as_deref().unwrap_or_default()
    )
}
