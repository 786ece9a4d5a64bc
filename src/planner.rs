use serde::{Deserialize, Serialize};
use std::fmt;

const MINIMAL_THRESHOLD: f64 = 7.0;
const TARGETED_THRESHOLD: f64 = 5.0;

/// Rewrite intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Minimal,
    Targeted,
    Full,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Minimal => write!(f, "Minimal"),
            Tier::Targeted => write!(f, "Targeted"),
            Tier::Full => write!(f, "Full"),
        }
    }
}

/// The single policy mapping composite strength to rewrite intensity.
pub fn plan_tier(score: f64) -> Tier {
    if score >= MINIMAL_THRESHOLD {
        Tier::Minimal
    } else if score >= TARGETED_THRESHOLD {
        Tier::Targeted
    } else {
        Tier::Full
    }
}

impl From<u8> for Tier {
    fn from(score: u8) -> Self {
        plan_tier(score as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Tier::from(10), Tier::Minimal);
        assert_eq!(Tier::from(7), Tier::Minimal);
        assert_eq!(Tier::from(6), Tier::Targeted);
        assert_eq!(Tier::from(5), Tier::Targeted);
        assert_eq!(Tier::from(4), Tier::Full);
        assert_eq!(Tier::from(1), Tier::Full);
        assert_eq!(plan_tier(6.99), Tier::Targeted);
        assert_eq!(plan_tier(7.0), Tier::Minimal);
    }
}
