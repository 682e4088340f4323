use super::{Crop, IssueSeverity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RiskLevel::Low => "→",
            RiskLevel::Medium => "⚠",
            RiskLevel::High => "!",
        }
    }

    /// Risk implied by an active issue of the given severity.
    pub fn for_active_issue(severity: IssueSeverity) -> Self {
        match severity {
            IssueSeverity::High => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }

    /// Never lowers the level.
    pub fn raise_to(self, floor: RiskLevel) -> Self {
        self.max(floor)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suitability of one crop for one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub crop: Crop,
    /// Always within 0..=100.
    pub score: u8,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
}

impl Recommendation {
    pub fn new(crop: Crop, score: i32) -> Self {
        Self {
            crop,
            score: clamp_score(score),
            reasons: Vec::new(),
            warnings: Vec::new(),
            benefits: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    pub fn with_benefit(mut self, benefit: impl Into<String>) -> Self {
        self.benefits.push(benefit.into());
        self
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A crop the field is currently a poor home for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropToAvoid {
    pub crop: Crop,
    pub reasons: Vec<String>,
    pub risk_level: RiskLevel,
}

impl CropToAvoid {
    pub fn new(crop: Crop) -> Self {
        Self {
            crop,
            reasons: Vec::new(),
            risk_level: RiskLevel::Low,
        }
    }

    pub fn add_reason(&mut self, reason: impl Into<String>, risk: RiskLevel) {
        self.reasons.push(reason.into());
        self.risk_level = self.risk_level.raise_to(risk);
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

pub fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}
