use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Pest,
    Disease,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Pest => "pest",
            IssueKind::Disease => "disease",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pest" | "insect" => Some(IssueKind::Pest),
            "disease" => Some(IssueKind::Disease),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Low => "low",
            IssueSeverity::Medium => "medium",
            IssueSeverity::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(IssueSeverity::Low),
            "medium" | "med" => Some(IssueSeverity::Medium),
            "high" => Some(IssueSeverity::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pest or disease observed on a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestDiseaseRecord {
    pub id: Option<i64>,
    pub kind: IssueKind,
    pub name: String,
    pub severity: IssueSeverity,
    pub observed_on: NaiveDate,
    #[serde(default)]
    pub resolved: bool,
}

impl PestDiseaseRecord {
    pub fn new(
        kind: IssueKind,
        name: impl Into<String>,
        severity: IssueSeverity,
        observed_on: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            kind,
            name: name.into(),
            severity,
            observed_on,
            resolved: false,
        }
    }

    pub fn resolved(mut self) -> Self {
        self.resolved = true;
        self
    }

    pub fn is_active(&self) -> bool {
        !self.resolved
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: Option<i64>,
    pub name: String,
    pub soil_ph: f64,
    pub soil_type: Option<String>,
    /// Oldest first.
    #[serde(default)]
    pub pest_disease_history: Vec<PestDiseaseRecord>,
    pub created_at: chrono::DateTime<Utc>,
}

impl Field {
    pub fn new(name: impl Into<String>, soil_ph: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            soil_ph,
            soil_type: None,
            pest_disease_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_soil_type(mut self, soil_type: &str) -> Self {
        self.soil_type = Some(soil_type.to_string());
        self
    }

    pub fn with_issue(mut self, record: PestDiseaseRecord) -> Self {
        self.pest_disease_history.push(record);
        self
    }

    /// Unresolved issues only.
    pub fn active_issues(&self) -> Vec<&PestDiseaseRecord> {
        self.pest_disease_history
            .iter()
            .filter(|r| r.is_active())
            .collect()
    }

    pub fn has_active_issues(&self) -> bool {
        self.pest_disease_history.iter().any(|r| r.is_active())
    }
}
