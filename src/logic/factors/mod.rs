pub mod cover_crop;
pub mod pest_disease;
pub mod ph;
pub mod rotation;
pub mod soil_type;

pub use cover_crop::CoverCropFactor;
pub use pest_disease::PestDiseaseFactor;
pub use ph::PhFactor;
pub use rotation::RotationFactor;
pub use soil_type::SoilTypeFactor;

use crate::logic::catalog::find_crop;
use crate::models::{recent_for_field, Crop, Field, PestDiseaseRecord, Planting};
use chrono::NaiveDate;
use std::collections::HashSet;

/// How many of a field's latest plantings count as "recent".
pub const RECENT_PLANTING_WINDOW: usize = 5;

/// Everything about a field that scoring needs, computed once per pass.
pub struct FieldContext<'a> {
    pub field: &'a Field,
    pub today: NaiveDate,
    /// Newest first, at most `RECENT_PLANTING_WINDOW`.
    pub recent_plantings: Vec<&'a Planting>,
    pub recently_planted: HashSet<&'a str>,
    /// Catalog entry of the newest planting, if the catalog knows it.
    pub previous_crop: Option<&'a Crop>,
    pub active_issues: Vec<&'a PestDiseaseRecord>,
}

impl<'a> FieldContext<'a> {
    pub fn new(
        field: &'a Field,
        plantings: &'a [Planting],
        catalog: &'a [Crop],
        today: NaiveDate,
    ) -> Self {
        let recent_plantings = match field.id {
            Some(id) => recent_for_field(plantings, id, RECENT_PLANTING_WINDOW),
            None => Vec::new(),
        };
        let recently_planted = recent_plantings
            .iter()
            .copied()
            .map(|p| p.crop_id.as_str())
            .collect();
        let previous_crop = recent_plantings
            .first()
            .and_then(|p| find_crop(catalog, &p.crop_id));

        Self {
            field,
            today,
            recent_plantings,
            recently_planted,
            previous_crop,
            active_issues: field.active_issues(),
        }
    }

    /// Newest recent planting of `crop_id` on this field.
    pub fn last_planting_of(&self, crop_id: &str) -> Option<&'a Planting> {
        self.recent_plantings
            .iter()
            .copied()
            .find(|p| p.crop_id == crop_id)
    }
}

/// Outcome of one factor for one crop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Assessment {
    pub delta: i32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
}

impl Assessment {
    pub fn adjust(&mut self, delta: i32) {
        self.delta += delta;
    }

    pub fn reason(&mut self, text: impl Into<String>) {
        self.reasons.push(text.into());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }

    pub fn benefit(&mut self, text: impl Into<String>) {
        self.benefits.push(text.into());
    }
}

/// One component of a crop's suitability score.
pub trait ScoreFactor: Send + Sync {
    /// Unique identifier for this factor
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Score contribution and explanatory notes for `crop` on this field
    fn assess(&self, ctx: &FieldContext<'_>, crop: &Crop) -> Assessment;
}
