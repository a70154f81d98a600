use std::{convert::Infallible, fmt, str::FromStr};

use serde::Serialize;

/// Incident priority as shown to users.
///
/// Serializes to the backend code (`BAIXA`, `MEDIA`, `ALTA`, `CRITICA`).
#[derive(Debug, Default, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// `low`, backend `BAIXA`.
    #[default]
    #[serde(rename = "BAIXA")]
    Low,
    /// `medium`, backend `MEDIA`.
    #[serde(rename = "MEDIA")]
    Medium,
    /// `high`, backend `ALTA`.
    #[serde(rename = "ALTA")]
    High,
    /// `critical`, backend `CRITICA`.
    #[serde(rename = "CRITICA")]
    Critical,
}

impl Priority {
    /// Parse a UI label. Anything other than the four known labels is `Low`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            // "low" and everything unrecognized
            _ => Self::Low,
        }
    }

    /// UI label for this priority.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Backend code for this priority.
    pub const fn backend_code(self) -> &'static str {
        match self {
            Self::Low => "BAIXA",
            Self::Medium => "MEDIA",
            Self::High => "ALTA",
            Self::Critical => "CRITICA",
        }
    }
}

impl FromStr for Priority {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Translate a UI priority label into the backend code, defaulting to `BAIXA`.
pub fn map_priority_to_backend(label: &str) -> &'static str {
    Priority::from_label(label).backend_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_labels() {
        assert_eq!(map_priority_to_backend("low"), "BAIXA");
        assert_eq!(map_priority_to_backend("medium"), "MEDIA");
        assert_eq!(map_priority_to_backend("high"), "ALTA");
        assert_eq!(map_priority_to_backend("critical"), "CRITICA");
    }

    #[test]
    fn unknown_labels_fall_back_to_lowest_tier() {
        for label in ["", "urgent", "HIGH", " high", "CRITICA", "baixa"] {
            assert_eq!(map_priority_to_backend(label), "BAIXA", "label {label:?}");
        }
    }

    #[test]
    fn parse_never_fails() {
        let p: Priority = "nonsense".parse().unwrap();
        assert_eq!(p, Priority::Low);
        let p: Priority = "critical".parse().unwrap();
        assert_eq!(p, Priority::Critical);
    }

    #[test]
    fn serializes_as_backend_code() {
        assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), "MEDIA");
        assert_eq!(serde_json::to_value(Priority::Critical).unwrap(), "CRITICA");
    }

    #[test]
    fn label_round_trips_through_from_label() {
        for p in [Priority::Low, Priority::Medium, Priority::High, Priority::Critical] {
            assert_eq!(Priority::from_label(p.label()), p);
        }
    }
}
