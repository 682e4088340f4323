use crate::config::Config;
use crate::db::Database;
use crate::error::{CropOpsError, Result};
use crate::logic::catalog::find_crop;
use crate::logic::{dates, RecommendationEngine};
use crate::models::{
    Crop, CropToAvoid, Field, IssueKind, IssueSeverity, PestDiseaseRecord, Planting,
    Recommendation,
};
use chrono::NaiveDate;

/// Glue between the record store and the recommendation engine.
pub struct App {
    pub config: Config,
    pub db: Database,
    catalog: Vec<Crop>,
}

impl App {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let catalog = config.catalog()?;
        Ok(Self {
            config,
            db,
            catalog,
        })
    }

    pub fn catalog(&self) -> &[Crop] {
        &self.catalog
    }

    pub fn engine(&self, as_of: Option<NaiveDate>) -> RecommendationEngine {
        let engine = RecommendationEngine::new().with_catalog(self.catalog.clone());
        match as_of {
            Some(date) => engine.with_reference_date(date),
            None => engine,
        }
    }

    // Fields

    pub fn add_field(&self, name: &str, ph: f64, soil_type: Option<&str>) -> Result<i64> {
        validate_ph(ph)?;
        if name.trim().is_empty() {
            return Err(CropOpsError::InvalidData("Field name is required".into()));
        }
        let mut field = Field::new(name.trim(), ph);
        if let Some(soil) = soil_type {
            field = field.with_soil_type(soil);
        }
        self.db.create_field(&field)
    }

    pub fn update_field(&self, id: i64, ph: Option<f64>, soil_type: Option<&str>) -> Result<Field> {
        let mut field = self.db.get_field(id)?;
        if let Some(ph) = ph {
            validate_ph(ph)?;
            field.soil_ph = ph;
        }
        if let Some(soil) = soil_type {
            field.soil_type = if soil.trim().is_empty() {
                None
            } else {
                Some(soil.to_string())
            };
        }
        self.db.update_field(&field)?;
        Ok(field)
    }

    // Pest & disease history

    pub fn log_issue(
        &self,
        field_id: i64,
        kind: IssueKind,
        name: &str,
        severity: IssueSeverity,
        observed_on: Option<NaiveDate>,
    ) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(CropOpsError::InvalidData("Issue name is required".into()));
        }
        // Surface a NotFound rather than a foreign key failure
        self.db.get_field(field_id)?;

        let record = PestDiseaseRecord::new(
            kind,
            name.trim(),
            severity,
            observed_on.unwrap_or_else(dates::today),
        );
        let id = self.db.add_issue(field_id, &record)?;
        tracing::info!(issue_id = id, field_id, name = %record.name, "Logged issue");
        Ok(id)
    }

    // Plantings

    pub fn record_planting(
        &self,
        field_id: i64,
        crop_id: &str,
        plant_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<i64> {
        if find_crop(&self.catalog, crop_id).is_none() {
            return Err(CropOpsError::NotFound(format!(
                "Crop '{}' is not in the catalog",
                crop_id
            )));
        }
        self.db.get_field(field_id)?;

        let mut planting = Planting::new(
            field_id,
            crop_id,
            plant_date.unwrap_or_else(dates::today),
        );
        if let Some(notes) = notes {
            planting = planting.with_notes(notes);
        }
        self.db.create_planting(&planting)
    }

    // Engine

    pub fn recommendations(
        &self,
        field_id: i64,
        as_of: Option<NaiveDate>,
    ) -> Result<(Field, Vec<Recommendation>)> {
        let field = self.db.get_field(field_id)?;
        let plantings = self.db.get_all_plantings()?;
        let results = self.engine(as_of).recommendations(&field, &plantings);
        Ok((field, results))
    }

    pub fn crops_to_avoid(
        &self,
        field_id: i64,
        as_of: Option<NaiveDate>,
    ) -> Result<(Field, Vec<CropToAvoid>)> {
        let field = self.db.get_field(field_id)?;
        let results = self.engine(as_of).crops_to_avoid(&field);
        Ok((field, results))
    }

    pub fn resistant_alternatives(
        &self,
        field_id: i64,
        as_of: Option<NaiveDate>,
    ) -> Result<(Field, Vec<Recommendation>)> {
        let field = self.db.get_field(field_id)?;
        let results = self.engine(as_of).resistant_alternatives(&field);
        Ok((field, results))
    }
}

fn validate_ph(ph: f64) -> Result<()> {
    if !(0.0..=14.0).contains(&ph) {
        return Err(CropOpsError::InvalidData(format!(
            "Soil pH must be between 0 and 14, got {}",
            ph
        )));
    }
    Ok(())
}
