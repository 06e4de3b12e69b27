use serde::{Deserialize, Serialize};

/// Privacy tier attached to a transaction or deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    #[default]
    Standard,
    Advanced,
    Maximum,
}

impl PrivacyLevel {
    pub const ALL: [PrivacyLevel; 3] = [
        PrivacyLevel::Standard,
        PrivacyLevel::Advanced,
        PrivacyLevel::Maximum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Standard => "standard",
            PrivacyLevel::Advanced => "advanced",
            PrivacyLevel::Maximum => "maximum",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == value)
    }

    /// Nominal number of participants a deposit is mixed among
    pub fn anonymity_set(&self) -> u64 {
        match self {
            PrivacyLevel::Standard => 100,
            PrivacyLevel::Advanced => 500,
            PrivacyLevel::Maximum => 1000,
        }
    }

    /// Human-readable processing estimate
    pub fn estimated_time(&self) -> &'static str {
        match self {
            PrivacyLevel::Standard => "2 minutes",
            PrivacyLevel::Advanced => "3 minutes",
            PrivacyLevel::Maximum => "5 minutes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymity_grows_with_tier() {
        assert_eq!(PrivacyLevel::Standard.anonymity_set(), 100);
        assert_eq!(PrivacyLevel::Advanced.anonymity_set(), 500);
        assert_eq!(PrivacyLevel::Maximum.anonymity_set(), 1000);
        assert_eq!(PrivacyLevel::Maximum.estimated_time(), "5 minutes");
    }

    #[test]
    fn test_parse() {
        assert_eq!(PrivacyLevel::parse("advanced"), Some(PrivacyLevel::Advanced));
        assert_eq!(PrivacyLevel::parse("Advanced"), None);
    }
}
