//! Plain-text rendering of fields and engine results for the terminal.

use crate::models::{Crop, CropToAvoid, Field, Planting, Recommendation};
use std::fmt::Write;

pub struct RecommendationsReport<'a> {
    pub field: &'a Field,
    pub recommendations: &'a [Recommendation],
    pub limit: usize,
    pub show_details: bool,
}

impl<'a> RecommendationsReport<'a> {
    pub fn new(field: &'a Field, recommendations: &'a [Recommendation]) -> Self {
        Self {
            field,
            recommendations,
            limit: usize::MAX,
            show_details: true,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }

    pub fn render(&self, title: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} for {}", title, field_label(self.field));

        if self.recommendations.is_empty() {
            let _ = writeln!(out, "  (none)");
            return out;
        }

        for (rank, rec) in self.recommendations.iter().take(self.limit).enumerate() {
            // Flag hidden warnings on the summary line
            let flag = if !self.show_details && rec.has_warnings() {
                "  ⚠"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "{:>3}. {:<18} {:>3}/100  [{}]{}",
                rank + 1,
                rec.crop.name,
                rec.score,
                rec.crop.category,
                flag
            );
            if self.show_details {
                for line in &rec.reasons {
                    let _ = writeln!(out, "       + {}", line);
                }
                for line in &rec.benefits {
                    let _ = writeln!(out, "       * {}", line);
                }
                for line in &rec.warnings {
                    let _ = writeln!(out, "       ⚠ {}", line);
                }
            }
        }

        let hidden = self.recommendations.len().saturating_sub(self.limit);
        if hidden > 0 {
            let _ = writeln!(out, "  ... {} more", hidden);
        }
        out
    }
}

pub fn render_crops_to_avoid(field: &Field, results: &[CropToAvoid]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Crops to avoid for {}", field_label(field));
    if results.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }

    for avoid in results {
        let _ = writeln!(
            out,
            "  {} {:<18} {} risk",
            avoid.risk_level.symbol(),
            avoid.crop.name,
            avoid.risk_level
        );
        for reason in &avoid.reasons {
            let _ = writeln!(out, "      - {}", reason);
        }
    }
    out
}

pub fn render_field(field: &Field) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", field_label(field));
    let _ = writeln!(out, "  Soil pH:   {:.1}", field.soil_ph);
    let _ = writeln!(
        out,
        "  Soil type: {}",
        field.soil_type.as_deref().unwrap_or("-")
    );

    if field.pest_disease_history.is_empty() {
        let _ = writeln!(out, "  No pest or disease history");
        return out;
    }

    let _ = writeln!(out, "  Pest & disease history:");
    for record in &field.pest_disease_history {
        let _ = writeln!(
            out,
            "    #{:<4} {} {:<8} {:<24} {:<6} {}",
            record.id.map(|id| id.to_string()).unwrap_or_default(),
            record.observed_on,
            record.kind,
            record.name,
            record.severity,
            if record.resolved { "resolved" } else { "ACTIVE" }
        );
    }
    out
}

pub fn render_field_list(fields: &[Field]) -> String {
    let mut out = String::new();
    if fields.is_empty() {
        let _ = writeln!(out, "No fields yet. Add one with `cropops field add`.");
        return out;
    }
    for field in fields {
        let _ = writeln!(
            out,
            "{:>4}  {:<20} pH {:.1}  {}",
            field.id.unwrap_or_default(),
            field.name,
            field.soil_ph,
            field.soil_type.as_deref().unwrap_or("")
        );
    }
    out
}

pub fn render_plantings(plantings: &[Planting], catalog: &[Crop]) -> String {
    let mut out = String::new();
    if plantings.is_empty() {
        let _ = writeln!(out, "No plantings recorded");
        return out;
    }
    for planting in plantings {
        let name = catalog
            .iter()
            .find(|c| c.id == planting.crop_id)
            .map(|c| c.name.as_str())
            .unwrap_or(planting.crop_id.as_str());
        let _ = writeln!(
            out,
            "{}  {:<18} {}",
            planting.plant_date,
            name,
            planting.notes.as_deref().unwrap_or("")
        );
    }
    out
}

pub fn render_catalog(catalog: &[Crop]) -> String {
    let mut out = String::new();
    for crop in catalog {
        let _ = writeln!(
            out,
            "{:<14} {:<18} {:<10} pH {:.1}-{:.1}",
            crop.id, crop.name, crop.category, crop.ph_min, crop.ph_max
        );
    }
    out
}

fn field_label(field: &Field) -> String {
    match field.id {
        Some(id) => format!("{} (#{})", field.name, id),
        None => field.name.clone(),
    }
}
