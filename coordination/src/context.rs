//! Context Gatherer: internal telemetry snapshot for an alert.
//!
//! There is no live data source behind this yet; the record is templated from
//! the alert so downstream prompts always see the same shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alert::AlertInfo;

/// Keywords carried into `similar_incidents`.
const SIMILAR_INCIDENT_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Operational,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operational => write!(f, "operational"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalContext {
    pub recent_logs: String,
    pub recent_metrics: String,
    pub similar_incidents: String,
    pub service_status: ServiceStatus,
}

pub fn gather_internal_context(alert: &AlertInfo) -> InternalContext {
    let service = alert.service();
    let related = alert
        .keywords()
        .iter()
        .take(SIMILAR_INCIDENT_KEYWORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    InternalContext {
        recent_logs: format!(
            "Recent logs for {service}: No critical errors in last 5 minutes before alert."
        ),
        recent_metrics: format!("Metrics for {service}: Normal baseline until alert trigger."),
        similar_incidents: format!(
            "Found 2 similar incidents in past 30 days related to: {related}"
        ),
        service_status: ServiceStatus::Operational,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::classify_alert;

    #[test]
    fn context_restates_service_and_first_three_keywords() {
        let alert = classify_alert("database timeout spike, replica failure and write error");
        let ctx = gather_internal_context(&alert);
        assert_eq!(
            ctx.recent_logs,
            "Recent logs for database: No critical errors in last 5 minutes before alert."
        );
        assert_eq!(
            ctx.recent_metrics,
            "Metrics for database: Normal baseline until alert trigger."
        );
        assert_eq!(
            ctx.similar_incidents,
            "Found 2 similar incidents in past 30 days related to: failure, error, timeout"
        );
        assert_eq!(ctx.service_status, ServiceStatus::Operational);
    }

    #[test]
    fn gathering_is_idempotent() {
        let alert = classify_alert("Checkout latency degradation, 502 from gateway");
        assert_eq!(gather_internal_context(&alert), gather_internal_context(&alert));
    }

    #[test]
    fn no_keywords_leaves_empty_related_list() {
        let alert = classify_alert("something odd");
        let ctx = gather_internal_context(&alert);
        assert!(ctx.recent_logs.contains("unknown-service"));
        assert!(ctx.similar_incidents.ends_with("related to: "));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ServiceStatus::Operational).unwrap();
        assert_eq!(json, "\"operational\"");
    }
}
