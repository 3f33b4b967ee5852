//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{TimerConfig, TimerSnapshot};

/// Duration as sent by a client
#[derive(Debug, Clone, PartialEq)]
pub enum DurationInput {
    Seconds(i64),
    Text(String),
    /// Anything that cannot name a duration; falls back to the default
    Unusable,
}

impl DurationInput {
    /// Interpret any JSON value; fractional numbers are truncated
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(number) => {
                if let Some(seconds) = number.as_i64() {
                    return DurationInput::Seconds(seconds);
                }
                match number.as_f64() {
                    Some(float) if float.is_finite() && float.abs() < i64::MAX as f64 => {
                        DurationInput::Seconds(float.trunc() as i64)
                    }
                    _ => DurationInput::Unusable,
                }
            }
            Value::String(text) => DurationInput::Text(text.clone()),
            _ => DurationInput::Unusable,
        }
    }

    pub fn to_config(&self) -> TimerConfig {
        match self {
            DurationInput::Seconds(seconds) => TimerConfig::from_seconds(*seconds),
            DurationInput::Text(text) => TimerConfig::from_text(text),
            DurationInput::Unusable => TimerConfig::default(),
        }
    }
}

/// Body of POST /configure
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureRequest {
    /// Kept raw so no value is rejected before reaching the fallback
    #[serde(default)]
    pub duration: Value,
}

impl ConfigureRequest {
    pub fn input(&self) -> DurationInput {
        DurationInput::from_value(&self.duration)
    }
}

/// Body of PUT /username
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameRequest {
    pub username: String,
}

/// Response to every command endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    pub fn new(action: &str, timer: TimerSnapshot) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
