//! Upstream response normalization.
//!
//! The screening service is inconsistent about field names (`name` vs
//! `full_name`, `type` vs `entity_type`, `country` vs `nationality`, ...).
//! The raw shapes here accept everything as optional; the normalizers
//! collapse each field through its documented fallback chain. Both mappings
//! are total: missing upstream data becomes a default, never an error.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::api::types::{EntityDetail, RiskLevel, SanctionsListing, SearchResultEntity};

/// Placeholder name when the upstream provides none.
pub const UNKNOWN_ENTITY: &str = "Unknown Entity";

/// Placeholder entity type when the upstream provides none.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Raw `/search` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub results: Vec<RawSearchHit>,
}

/// One raw search hit, field names as the upstream sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchHit {
    pub id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub entity_type: Option<String>,
    pub match_score: Option<Value>,
    pub country: Option<String>,
    pub nationality: Option<String>,
}

/// Raw `/entity/{id}` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetail {
    pub id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub aliases: Option<Vec<String>>,
    pub alternative_names: Option<Vec<String>>,
    pub date_of_birth: Option<String>,
    pub birth_date: Option<String>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub entity_type: Option<String>,
    pub match_score: Option<Value>,
    pub sanctions: Option<Vec<RawListing>>,
    pub listings: Option<Vec<RawListing>>,
    pub last_updated: Option<String>,
    pub updated_at: Option<String>,
}

/// One raw sanctions-list membership.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    pub list: Option<String>,
    pub reason: Option<String>,
}

/// Map one raw search hit to the canonical model.
///
/// `index` is the hit's position in the response, used only for the
/// fallback id of records the upstream sent without one.
pub fn normalize_search_hit(raw: &RawSearchHit, index: usize) -> SearchResultEntity {
    let match_score = clamp_score(&raw.match_score);
    SearchResultEntity {
        entity_id: raw
            .id
            .clone()
            .unwrap_or_else(|| format!("entity_{index}")),
        name: first_of(&[&raw.name, &raw.full_name]).unwrap_or_else(|| UNKNOWN_ENTITY.to_string()),
        entity_type: first_of(&[&raw.kind, &raw.entity_type])
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        match_score,
        risk_level: RiskLevel::from_score(match_score),
        country: first_of(&[&raw.country, &raw.nationality]),
    }
}

/// Map one raw detail document to the canonical model.
///
/// `requested_id` backs the record id when the upstream omits it, so the
/// caller can always correlate the result with its request.
pub fn normalize_detail(raw: &RawDetail, requested_id: &str) -> EntityDetail {
    let match_score = clamp_score(&raw.match_score);
    EntityDetail {
        entity_id: raw
            .id
            .clone()
            .unwrap_or_else(|| requested_id.to_string()),
        full_name: first_of(&[&raw.full_name, &raw.name])
            .unwrap_or_else(|| UNKNOWN_ENTITY.to_string()),
        name: first_of(&[&raw.name, &raw.full_name]).unwrap_or_else(|| UNKNOWN_ENTITY.to_string()),
        entity_type: first_of(&[&raw.kind, &raw.entity_type])
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        aliases: raw
            .aliases
            .clone()
            .or_else(|| raw.alternative_names.clone())
            .unwrap_or_default(),
        date_of_birth: first_of(&[&raw.date_of_birth, &raw.birth_date]),
        nationality: first_of(&[&raw.nationality, &raw.country]),
        country: first_of(&[&raw.country, &raw.nationality]),
        match_score,
        risk_level: RiskLevel::from_score(match_score),
        sanctions: raw
            .sanctions
            .as_ref()
            .or(raw.listings.as_ref())
            .map(|listings| listings.iter().map(normalize_listing).collect())
            .unwrap_or_default(),
        last_updated: parse_timestamp(&[&raw.last_updated, &raw.updated_at]),
    }
}

fn normalize_listing(raw: &RawListing) -> SanctionsListing {
    SanctionsListing {
        list: raw.list.clone().unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        reason: raw.reason.clone().unwrap_or_default(),
    }
}

/// First populated value of a fallback chain.
fn first_of(chain: &[&Option<String>]) -> Option<String> {
    chain.iter().find_map(|value| (*value).clone())
}

/// Clamp a raw score to 0..=100; non-numeric values count as absent.
fn clamp_score(raw: &Option<Value>) -> Option<u8> {
    let score = raw.as_ref()?.as_f64()?;
    Some(score.clamp(0.0, 100.0).round() as u8)
}

/// First parsable timestamp of a fallback chain, else the current time.
///
/// This is the normalizer's only current-time capture.
fn parse_timestamp(chain: &[&Option<String>]) -> DateTime<Utc> {
    chain
        .iter()
        .filter_map(|value| value.as_deref())
        .find_map(|value| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc))
        })
        .unwrap_or_else(Utc::now)
}
