use std::fmt;

use k8s_openapi::{
    api::core::v1::{ContainerStatus, Pod, PodCondition},
    chrono::{DateTime, Utc},
};

use crate::conditions::{current_condition, has_ready_condition, CurrentCondition};

/// How an unset timestamp is rendered
pub const ZERO_TIME: &str = "0001-01-01 00:00:00 +0000 UTC";

/// Coarse lifecycle state of a `Pod`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl From<&str> for PodPhase {
    // anything we don't recognise is as good as Unknown
    fn from(s: &str) -> Self {
        match s {
            "Pending" => PodPhase::Pending,
            "Running" => PodPhase::Running,
            "Succeeded" => PodPhase::Succeeded,
            "Failed" => PodPhase::Failed,
            _ => PodPhase::Unknown,
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Public extension trait for `Pod`
pub trait PodStatusExt {
    /// The raw phase string, empty if the pod has no status yet
    fn raw_phase(&self) -> String;
    fn phase(&self) -> PodPhase;
    fn is_running(&self) -> bool;
    /// True if there's a `Ready` condition with status `True`
    fn is_ready(&self) -> bool;
    /// The condition the pod most recently transitioned into
    fn current_condition(&self) -> CurrentCondition;
    /// `reason-message` from the pod status itself, not from a condition
    fn pod_reason(&self) -> String;
    /// Start time, or `ZERO_TIME` if the pod hasn't started
    fn start_time(&self) -> String;
}

impl PodStatusExt for Pod {
    fn raw_phase(&self) -> String {
        StatusView::from(self).phase.to_string()
    }

    fn phase(&self) -> PodPhase {
        PodPhase::from(StatusView::from(self).phase)
    }

    fn is_running(&self) -> bool {
        self.phase() == PodPhase::Running
    }

    fn is_ready(&self) -> bool {
        has_ready_condition(StatusView::from(self).conditions)
    }

    fn current_condition(&self) -> CurrentCondition {
        current_condition(StatusView::from(self).conditions)
    }

    fn pod_reason(&self) -> String {
        let status = StatusView::from(self);
        format!("{}-{}", status.reason, status.message)
    }

    fn start_time(&self) -> String {
        match StatusView::from(self).start_time {
            Some(t) => format_time(t),
            None => ZERO_TIME.into(),
        }
    }
}

/// The parts of a `PodStatus` we care about, borrowed, with missing fields flattened out
#[derive(Default)]
pub(crate) struct StatusView<'a> {
    pub phase: &'a str,
    pub start_time: Option<&'a DateTime<Utc>>,
    pub reason: &'a str,
    pub message: &'a str,
    pub conditions: &'a [PodCondition],
    pub container_statuses: &'a [ContainerStatus],
}

impl<'a> From<&'a Pod> for StatusView<'a> {
    fn from(pod: &'a Pod) -> Self {
        // a pod without a status is probably still being scheduled, so everything is zero
        let status = match &pod.status {
            Some(status) => status,
            None => return StatusView::default(),
        };
        StatusView {
            phase: status.phase.as_deref().unwrap_or_default(),
            start_time: status.start_time.as_ref().map(|t| &t.0),
            reason: status.reason.as_deref().unwrap_or_default(),
            message: status.message.as_deref().unwrap_or_default(),
            conditions: status.conditions.as_deref().unwrap_or_default(),
            container_statuses: status.container_statuses.as_deref().unwrap_or_default(),
        }
    }
}

/// Renders a timestamp the way Go's `time.Time` prints itself: `2023-11-14 22:13:20.25 +0000 UTC`.
///
/// The fraction is left out when it's zero, and trailing zeros are trimmed.
pub fn format_time(t: &DateTime<Utc>) -> String {
    let mut out = t.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = t.timestamp_subsec_nanos();
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push_str(&t.format(" %z UTC").to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::{
        api::core::v1::PodStatus,
        apimachinery::pkg::apis::meta::v1::Time,
        chrono::TimeZone,
    };

    fn pod_with(status: PodStatus) -> Pod {
        Pod {
            status: Some(status),
            ..Default::default()
        }
    }

    #[test]
    fn phase_parses_known_values() {
        for phase in ["Pending", "Running", "Succeeded", "Failed", "Unknown"] {
            assert_eq!(PodPhase::from(phase).to_string(), phase);
        }
        assert_eq!(PodPhase::from("Evicted"), PodPhase::Unknown);
        assert_eq!(PodPhase::from(""), PodPhase::Unknown);
    }

    #[test]
    fn pod_without_status_is_all_zero() {
        let pod = Pod::default();
        assert_eq!(pod.raw_phase(), "");
        assert_eq!(pod.phase(), PodPhase::Unknown);
        assert!(!pod.is_running());
        assert!(!pod.is_ready());
        assert_eq!(pod.current_condition(), CurrentCondition::default());
        assert_eq!(pod.pod_reason(), "-");
        assert_eq!(pod.start_time(), ZERO_TIME);
    }

    #[test]
    fn running_phase_is_running() {
        let pod = pod_with(PodStatus {
            phase: Some("Running".into()),
            ..Default::default()
        });
        assert_eq!(pod.raw_phase(), "Running");
        assert!(pod.is_running());

        let pod = pod_with(PodStatus {
            phase: Some("Pending".into()),
            ..Default::default()
        });
        assert!(!pod.is_running());
    }

    #[test]
    fn pod_reason_joins_status_fields() {
        let pod = pod_with(PodStatus {
            reason: Some("Evicted".into()),
            message: Some("The node was low on resource: memory.".into()),
            ..Default::default()
        });
        assert_eq!(pod.pod_reason(), "Evicted-The node was low on resource: memory.");
    }

    #[test]
    fn start_time_is_formatted() {
        let pod = pod_with(PodStatus {
            start_time: Some(Time(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap())),
            ..Default::default()
        });
        assert_eq!(pod.start_time(), "2023-11-14 22:13:20 +0000 UTC");
    }

    #[test]
    fn zero_time_formats_as_zero_time() {
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_time(&zero), ZERO_TIME);

    }

    #[test]
    fn fractions_drop_trailing_zeros() {
        let t = Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap();
        assert_eq!(format_time(&t), "2023-11-14 22:13:20.25 +0000 UTC");

        let t = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(format_time(&t), "2023-11-14 22:13:20.123456789 +0000 UTC");

        let t = Utc.timestamp_opt(1_700_000_000, 1_000).unwrap();
        assert_eq!(format_time(&t), "2023-11-14 22:13:20.000001 +0000 UTC");
    }

    #[test]
    fn status_view_borrows_from_the_pod() {
        let pod = pod_with(PodStatus {
            phase: Some("Running".into()),
            conditions: Some(vec![PodCondition {
                type_: "Ready".into(),
                status: "True".into(),
                ..Default::default()
            }]),
            ..Default::default()
        });
        let status = pod.status.as_ref().unwrap();
        let view = StatusView::from(&pod);

        assert!(std::ptr::eq(view.phase, status.phase.as_deref().unwrap()));
        assert!(std::ptr::eq(view.conditions, status.conditions.as_deref().unwrap()));
        assert!(view.container_statuses.is_empty());
    }
}
