//! Local validation errors raised by the field mappers before any network call

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("alert_type must be CLASSIC or THRESHOLD")]
    InvalidAlertType(String),

    #[error("condition must be supplied for classic alerts")]
    MissingCondition,

    #[error("severity must be supplied for classic alerts")]
    MissingSeverity,

    #[error("target must be supplied for classic alerts")]
    MissingTarget,

    #[error("threshold_conditions must be supplied for threshold alerts")]
    MissingThresholdConditions,

    #[error("invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("dashboard_json is not a valid dashboard: {0}")]
    InvalidDashboardJson(String),

    #[error("dashboard_json must set a url")]
    MissingDashboardUrl,
}
