//! Canonical entity model produced by normalization.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Risk band derived from the upstream match score.
///
/// `Unknown` marks results where the upstream omitted the score; the
/// presentation layer labels it explicitly instead of a number being
/// invented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Low Risk")]
    Low,
    Unknown,
}

impl RiskLevel {
    /// Band thresholds: >=90 high, >=70 medium, otherwise low.
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            Some(score) if score >= 90 => RiskLevel::High,
            Some(score) if score >= 70 => RiskLevel::Medium,
            Some(_) => RiskLevel::Low,
            None => RiskLevel::Unknown,
        }
    }
}

/// One search hit, normalized. Identity is `entity_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultEntity {
    pub entity_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Upstream confidence, clamped to 0..=100. `None` when not provided.
    pub match_score: Option<u8>,
    pub risk_level: RiskLevel,
    pub country: Option<String>,
}

/// One sanctions-list membership on an entity record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanctionsListing {
    pub list: String,
    pub reason: String,
}

/// Full entity record, normalized from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDetail {
    pub entity_id: String,
    pub full_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub aliases: Vec<String>,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub match_score: Option<u8>,
    pub risk_level: RiskLevel,
    pub sanctions: Vec<SanctionsListing>,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands() {
        assert_eq!(RiskLevel::from_score(Some(95)), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(Some(90)), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(Some(89)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(Some(70)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(Some(69)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(Some(0)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(None), RiskLevel::Unknown);
    }
}
