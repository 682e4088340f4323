use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One sowing event of a catalog crop on a field, past or planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planting {
    pub id: Option<i64>,
    pub field_id: i64,
    pub crop_id: String,
    pub plant_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

impl Planting {
    pub fn new(field_id: i64, crop_id: impl Into<String>, plant_date: NaiveDate) -> Self {
        Self {
            id: None,
            field_id,
            crop_id: crop_id.into(),
            plant_date,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Plantings on `field_id`, newest first, truncated to `limit`.
///
/// Ties on date keep their input order.
pub fn recent_for_field(plantings: &[Planting], field_id: i64, limit: usize) -> Vec<&Planting> {
    let mut on_field: Vec<&Planting> = plantings
        .iter()
        .filter(|p| p.field_id == field_id)
        .collect();
    on_field.sort_by(|a, b| b.plant_date.cmp(&a.plant_date));
    on_field.truncate(limit);
    on_field
}
