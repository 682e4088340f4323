use super::catalog::default_catalog;
use super::dates::{self, months_between};
use super::factors::{
    CoverCropFactor, FieldContext, PestDiseaseFactor, PhFactor, RotationFactor, ScoreFactor,
    SoilTypeFactor,
};
use super::matcher::find_match;
use crate::models::{
    Crop, CropToAvoid, Field, PestDiseaseRecord, Planting, Recommendation, RiskLevel,
};
use chrono::NaiveDate;

const BASE_SCORE: i32 = 50;

/// Resolved issues younger than this still count against susceptible crops.
const HISTORY_LOOKBACK_MONTHS: u32 = 24;

/// pH distance past a bound that makes a crop worth avoiding.
const PH_AVOID_MARGIN: f64 = 0.5;

const RESISTANT_BASE_SCORE: i32 = 85;
const RESISTANT_PER_ISSUE: i32 = 5;

/// Scores crops for a field from its soil, planting history and pest
/// and disease history.
///
/// Pure over its inputs: nothing is mutated or persisted. The only outside
/// input is today's date, which can be pinned with `with_reference_date`.
pub struct RecommendationEngine {
    factors: Vec<Box<dyn ScoreFactor>>,
    catalog: Vec<Crop>,
    reference_date: Option<NaiveDate>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        let factors: Vec<Box<dyn ScoreFactor>> = vec![
            Box::new(PhFactor),
            Box::new(RotationFactor),
            Box::new(PestDiseaseFactor),
            Box::new(SoilTypeFactor),
            Box::new(CoverCropFactor),
        ];

        Self {
            factors,
            catalog: default_catalog(),
            reference_date: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<Crop>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn catalog(&self) -> &[Crop] {
        &self.catalog
    }

    pub fn list_factors(&self) -> Vec<(&'static str, &'static str)> {
        self.factors.iter().map(|f| (f.id(), f.name())).collect()
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(dates::today)
    }

    /// Every catalog crop scored for `field`, best first.
    ///
    /// `plantings` may span all fields; only those on `field` are used.
    /// Equal scores keep catalog order.
    pub fn recommendations(&self, field: &Field, plantings: &[Planting]) -> Vec<Recommendation> {
        let ctx = FieldContext::new(field, plantings, &self.catalog, self.today());
        tracing::debug!(
            field_id = ?field.id,
            crops = self.catalog.len(),
            recent_plantings = ctx.recent_plantings.len(),
            active_issues = ctx.active_issues.len(),
            "Scoring crops"
        );

        let mut results: Vec<Recommendation> = self
            .catalog
            .iter()
            .map(|crop| self.score_crop(&ctx, crop))
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }

    fn score_crop(&self, ctx: &FieldContext<'_>, crop: &Crop) -> Recommendation {
        let mut score = BASE_SCORE;
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();
        let mut benefits = Vec::new();

        for factor in &self.factors {
            let assessment = factor.assess(ctx, crop);
            tracing::trace!(
                crop = %crop.id,
                factor = factor.id(),
                delta = assessment.delta,
                "Factor assessed"
            );
            score += assessment.delta;
            reasons.extend(assessment.reasons);
            warnings.extend(assessment.warnings);
            benefits.extend(assessment.benefits);
        }

        let mut rec = Recommendation::new(crop.clone(), score);
        rec.reasons = reasons;
        rec.warnings = warnings;
        rec.benefits = benefits;
        rec
    }

    /// Crops with at least one reason to stay out of `field`, riskiest first.
    ///
    /// Draws on active issues, issues resolved within the last 24 months,
    /// and pH more than 0.5 outside the crop's range. Planting history
    /// plays no part.
    pub fn crops_to_avoid(&self, field: &Field) -> Vec<CropToAvoid> {
        let today = self.today();
        let active = field.active_issues();
        let recent_history: Vec<(&PestDiseaseRecord, u32)> = field
            .pest_disease_history
            .iter()
            .filter(|r| !r.is_active())
            .map(|r| (r, months_between(r.observed_on, today)))
            .filter(|(_, months)| *months < HISTORY_LOOKBACK_MONTHS)
            .collect();

        let mut results: Vec<CropToAvoid> = self
            .catalog
            .iter()
            .map(|crop| {
                let mut avoid = CropToAvoid::new(crop.clone());

                for issue in &active {
                    if find_match(&issue.name, crop.known_problems()).is_some() {
                        avoid.add_reason(
                            format!(
                                "Active {}: {} ({} severity)",
                                issue.kind, issue.name, issue.severity
                            ),
                            RiskLevel::for_active_issue(issue.severity),
                        );
                    }
                }

                for (issue, months) in &recent_history {
                    if find_match(&issue.name, crop.known_problems()).is_some() {
                        avoid.add_reason(
                            format!(
                                "{} {} was recorded here {} months ago",
                                capitalize(issue.kind.as_str()),
                                issue.name,
                                months
                            ),
                            RiskLevel::Medium,
                        );
                    }
                }

                let ph = field.soil_ph;
                if ph < crop.ph_min - PH_AVOID_MARGIN {
                    avoid.add_reason(
                        format!(
                            "Soil pH {:.1} is far too acidic (minimum {:.1})",
                            ph, crop.ph_min
                        ),
                        RiskLevel::Medium,
                    );
                } else if ph > crop.ph_max + PH_AVOID_MARGIN {
                    avoid.add_reason(
                        format!(
                            "Soil pH {:.1} is far too alkaline (maximum {:.1})",
                            ph, crop.ph_max
                        ),
                        RiskLevel::Medium,
                    );
                }

                avoid
            })
            .filter(|avoid| !avoid.is_empty())
            .collect();

        results.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
        tracing::debug!(field_id = ?field.id, count = results.len(), "Crops to avoid");
        results
    }

    /// Crops immune to every active problem on `field`.
    ///
    /// Empty when the field has no active issues.
    pub fn resistant_alternatives(&self, field: &Field) -> Vec<Recommendation> {
        let active = field.active_issues();
        if active.is_empty() {
            return Vec::new();
        }

        let issue_count = i32::try_from(active.len()).unwrap_or(i32::MAX);
        let score =
            RESISTANT_BASE_SCORE.saturating_add(RESISTANT_PER_ISSUE.saturating_mul(issue_count));

        let mut results: Vec<Recommendation> = self
            .catalog
            .iter()
            .filter(|crop| {
                !active
                    .iter()
                    .any(|issue| find_match(&issue.name, crop.known_problems()).is_some())
            })
            .map(|crop| {
                let mut rec = Recommendation::new(crop.clone(), score);
                for issue in &active {
                    rec = rec.with_benefit(format!("Not susceptible to {}", issue.name));
                }
                rec = rec.with_reason("Resistant to the problems currently affecting this field");
                if crop.ph_in_range(field.soil_ph) {
                    rec = rec.with_reason(format!(
                        "Soil pH {:.1} suits this crop ({:.1}-{:.1})",
                        field.soil_ph, crop.ph_min, crop.ph_max
                    ));
                }
                rec
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCategory, IssueKind, IssueSeverity};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn engine(catalog: Vec<Crop>) -> RecommendationEngine {
        RecommendationEngine::new()
            .with_catalog(catalog)
            .with_reference_date(today())
    }

    fn field(ph: f64) -> Field {
        Field::new("North Field", ph).with_id(1)
    }

    fn pest(name: &str, severity: IssueSeverity, observed_on: NaiveDate) -> PestDiseaseRecord {
        PestDiseaseRecord::new(IssueKind::Pest, name, severity, observed_on)
    }

    fn plain(id: &str, name: &str) -> Crop {
        Crop::new(id, name, CropCategory::Vegetable, 6.0, 7.0)
    }

    fn score_of(results: &[Recommendation], id: &str) -> u8 {
        results
            .iter()
            .find(|r| r.crop.id == id)
            .map(|r| r.score)
            .unwrap()
    }

    #[test]
    fn ideal_crop_with_no_history_scores_90() {
        let engine = engine(vec![plain("lettuce", "Lettuce")]);
        let results = engine.recommendations(&field(6.5), &[]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 90);
        assert!(results[0].warnings.is_empty());
    }

    #[test]
    fn active_high_pest_reduces_score_to_75() {
        let crop = plain("lettuce", "Lettuce").with_pests(&["Aphids"]);
        let field = field(6.5).with_issue(pest("Aphids", IssueSeverity::High, date(2026, 9, 1)));

        let results = engine(vec![crop]).recommendations(&field, &[]);
        assert_eq!(results[0].score, 75);
        let warning = results[0]
            .warnings
            .iter()
            .find(|w| w.contains("Aphids"))
            .unwrap();
        assert!(warning.contains("high"));
    }

    #[test]
    fn soil_type_match_adds_10() {
        let crop = plain("lettuce", "Lettuce").with_soil_types(&["loam"]);
        let field = field(6.5).with_soil_type("Silt Loam");
        let results = engine(vec![crop]).recommendations(&field, &[]);
        assert_eq!(results[0].score, 100);
    }

    #[test]
    fn unaffected_crop_gets_bonus_and_is_clamped() {
        let crop = plain("lettuce", "Lettuce").with_soil_types(&["loam"]);
        let field = field(6.5)
            .with_soil_type("Loam")
            .with_issue(pest("Squash Bug", IssueSeverity::High, date(2026, 9, 1)));

        let results = engine(vec![crop]).recommendations(&field, &[]);
        // 50 + 25 + 15 + 20 + 10 = 120
        assert_eq!(results[0].score, 100);
        assert!(results[0]
            .benefits
            .iter()
            .any(|b| b.contains("Not affected")));
    }

    #[test]
    fn worst_case_is_clamped_at_zero_or_above() {
        let crop = Crop::new("blueberry", "Blueberry", CropCategory::Fruit, 4.5, 5.0)
            .with_pests(&["Aphids", "Mites"]);
        let field = field(8.5)
            .with_issue(pest("Aphids", IssueSeverity::High, date(2026, 9, 1)))
            .with_issue(pest("Mites", IssueSeverity::High, date(2026, 9, 1)));
        let plantings = vec![Planting::new(1, "blueberry", date(2026, 3, 1))];

        let results = engine(vec![crop]).recommendations(&field, &plantings);
        // 50 - 20 - 15 - 30 = -15
        assert_eq!(results[0].score, 0);
    }

    #[test]
    fn scores_stay_within_bounds_for_default_catalog() {
        let engine = RecommendationEngine::new().with_reference_date(today());
        let field = field(5.2)
            .with_soil_type("Sandy Loam")
            .with_issue(pest("Aphids", IssueSeverity::High, date(2026, 8, 1)))
            .with_issue(pest("Powdery Mildew", IssueSeverity::Medium, date(2026, 8, 1)));
        let plantings = vec![
            Planting::new(1, "tomato", date(2026, 4, 1)),
            Planting::new(1, "green-beans", date(2025, 4, 1)),
        ];

        let results = engine.recommendations(&field, &plantings);
        assert_eq!(results.len(), engine.catalog().len());
        for rec in &results {
            assert!(rec.score <= 100);
        }
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn replanted_crop_takes_the_rotation_penalty() {
        let catalog = vec![plain("okra-a", "Okra A"), plain("okra-b", "Okra B")];
        let plantings = vec![Planting::new(1, "okra-a", date(2020, 4, 1))];

        let results = engine(catalog).recommendations(&field(6.5), &plantings);
        let planted = score_of(&results, "okra-a");
        let unplanted = score_of(&results, "okra-b");
        // rotation component is -15 for the repeat and +15 for the twin
        assert_eq!(i32::from(planted), BASE_SCORE + 25 - 15);
        assert_eq!(i32::from(unplanted), BASE_SCORE + 25 + 15);
        assert_eq!(results[0].crop.id, "okra-b");
    }

    #[test]
    fn only_last_five_plantings_count_as_recent() {
        let catalog = vec![plain("old", "Okra")];
        let mut plantings = vec![Planting::new(1, "old", date(2019, 4, 1))];
        for year in 2020..2025 {
            plantings.push(Planting::new(1, format!("crop{}", year), date(year, 4, 1)));
        }

        let results = engine(catalog).recommendations(&field(6.5), &plantings);
        assert_eq!(results[0].score, 90);
    }

    #[test]
    fn plantings_on_other_fields_are_ignored() {
        let catalog = vec![plain("okra", "Okra")];
        let plantings = vec![Planting::new(7, "okra", date(2026, 5, 1))];
        let results = engine(catalog).recommendations(&field(6.5), &plantings);
        assert_eq!(results[0].score, 90);
        assert!(results[0].warnings.is_empty());
    }

    #[test]
    fn sort_is_descending_with_catalog_order_for_ties() {
        let catalog = vec![
            plain("a", "Okra"),
            Crop::new("b", "Blueberry", CropCategory::Fruit, 4.5, 5.0),
            plain("c", "Lettuce"),
        ];
        let results = engine(catalog).recommendations(&field(6.5), &[]);
        let ids: Vec<&str> = results.iter().map(|r| r.crop.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn recommendations_are_idempotent() {
        let engine = RecommendationEngine::new().with_reference_date(today());
        let field = field(6.2)
            .with_soil_type("Loam")
            .with_issue(pest("Aphids", IssueSeverity::Medium, date(2026, 6, 1)));
        let plantings = vec![Planting::new(1, "green-beans", date(2026, 3, 1))];

        let first = engine.recommendations(&field, &plantings);
        let second = engine.recommendations(&field, &plantings);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.crop.id, b.crop.id);
            assert_eq!(a.score, b.score);
            assert_eq!(a.reasons, b.reasons);
            assert_eq!(a.warnings, b.warnings);
            assert_eq!(a.benefits, b.benefits);
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let engine = RecommendationEngine::new().with_reference_date(today());
        let field = field(6.5).with_issue(pest("Aphids", IssueSeverity::High, date(2026, 6, 1)));
        let plantings = vec![
            Planting::new(1, "tomato", date(2024, 4, 1)),
            Planting::new(1, "peas", date(2026, 4, 1)),
        ];
        let field_before = field.clone();
        let plantings_before = plantings.clone();

        engine.recommendations(&field, &plantings);
        engine.crops_to_avoid(&field);
        engine.resistant_alternatives(&field);

        assert_eq!(field.pest_disease_history, field_before.pest_disease_history);
        assert_eq!(plantings, plantings_before);
    }

    #[test]
    fn messages_follow_factor_order() {
        let catalog = vec![
            plain("beans", "Green Beans"),
            plain("tomato", "Tomato")
                .with_soil_types(&["loam"])
                .with_cover_crops(&["Crimson Clover"]),
        ];
        let plantings = vec![Planting::new(1, "beans", date(2026, 5, 1))];
        let field = field(6.5).with_soil_type("Loam");

        let results = engine(catalog).recommendations(&field, &plantings);
        let tomato = results.iter().find(|r| r.crop.id == "tomato").unwrap();
        assert!(tomato.reasons[0].contains("pH"));
        assert!(tomato.reasons[1].contains("Green Beans"));
        assert!(tomato.reasons[2].contains("loam"));
        assert_eq!(tomato.benefits.len(), 3);
        assert!(tomato.benefits[1].contains("Nitrogen"));
        assert!(tomato.benefits[2].contains("Crimson Clover"));
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let engine = engine(Vec::new());
        assert!(engine.recommendations(&field(6.5), &[]).is_empty());
        assert!(engine.crops_to_avoid(&field(4.0)).is_empty());
    }

    #[test]
    fn avoid_includes_far_out_of_range_ph() {
        let engine = engine(vec![plain("lettuce", "Lettuce")]);
        let results = engine.crops_to_avoid(&field(4.0));
        assert_eq!(results.len(), 1);
        assert!(results[0].risk_level >= RiskLevel::Medium);
        assert!(results[0].reasons[0].contains("acidic"));
    }

    #[test]
    fn avoid_skips_crops_without_reasons() {
        let catalog = vec![
            plain("lettuce", "Lettuce"),
            plain("okra", "Okra").with_pests(&["Aphids"]),
        ];
        let field = field(6.6).with_issue(pest("Aphids", IssueSeverity::Low, date(2026, 9, 1)));

        let results = engine(catalog).crops_to_avoid(&field);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].crop.id, "okra");
        assert_eq!(results[0].risk_level, RiskLevel::Medium);
        assert!(results.iter().all(|r| !r.reasons.is_empty()));
    }

    #[test]
    fn avoid_near_range_ph_is_not_a_reason() {
        let engine = engine(vec![plain("lettuce", "Lettuce")]);
        assert!(engine.crops_to_avoid(&field(5.5)).is_empty());
        assert!(engine.crops_to_avoid(&field(7.5)).is_empty());
    }

    #[test]
    fn avoid_high_active_issue_is_high_risk_and_sorted_first() {
        let catalog = vec![
            plain("lettuce", "Lettuce"),
            plain("tomato", "Tomato").with_diseases(&["Late Blight"]),
        ];
        let field = field(4.0).with_issue(PestDiseaseRecord::new(
            IssueKind::Disease,
            "blight",
            IssueSeverity::High,
            date(2026, 8, 1),
        ));

        let results = engine(catalog).crops_to_avoid(&field);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].crop.id, "tomato");
        assert_eq!(results[0].risk_level, RiskLevel::High);
        assert_eq!(results[0].reasons.len(), 2);
        assert_eq!(results[1].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn avoid_counts_recently_resolved_issues_only() {
        let catalog = vec![plain("squash", "Squash").with_pests(&["Squash Bug"])];
        let recent = field(6.5)
            .with_issue(pest("Squash Bug", IssueSeverity::Low, date(2025, 7, 1)).resolved());
        let stale = field(6.5)
            .with_issue(pest("Squash Bug", IssueSeverity::High, date(2024, 7, 1)).resolved());

        let engine = engine(catalog);
        let results = engine.crops_to_avoid(&recent);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].risk_level, RiskLevel::Medium);
        assert!(results[0].reasons[0].contains("15 months ago"));
        assert!(results[0].reasons[0].starts_with("Pest"));

        assert!(engine.crops_to_avoid(&stale).is_empty());
    }

    #[test]
    fn avoid_history_stops_at_24_months() {
        let catalog = vec![plain("squash", "Squash").with_pests(&["Squash Bug"])];
        let engine = engine(catalog);

        let exactly_24 = field(6.5)
            .with_issue(pest("Squash Bug", IssueSeverity::Low, date(2024, 10, 19)).resolved());
        assert!(engine.crops_to_avoid(&exactly_24).is_empty());

        let day_younger = field(6.5)
            .with_issue(pest("Squash Bug", IssueSeverity::Low, date(2024, 10, 20)).resolved());
        let results = engine.crops_to_avoid(&day_younger);
        assert_eq!(results.len(), 1);
        assert!(results[0].reasons[0].contains("23 months ago"));
    }

    #[test]
    fn avoid_does_not_double_count_active_issues_as_history() {
        let catalog = vec![plain("squash", "Squash").with_pests(&["Squash Bug"])];
        let field = field(6.5).with_issue(pest("Squash Bug", IssueSeverity::Medium, date(2026, 9, 1)));
        let results = engine(catalog).crops_to_avoid(&field);
        assert_eq!(results[0].reasons.len(), 1);
    }

    #[test]
    fn alternatives_empty_without_active_issues() {
        let engine = RecommendationEngine::new().with_reference_date(today());
        assert!(engine.resistant_alternatives(&field(6.5)).is_empty());

        let resolved_only = field(6.5)
            .with_issue(pest("Aphids", IssueSeverity::High, date(2026, 1, 1)).resolved());
        assert!(engine.resistant_alternatives(&resolved_only).is_empty());
    }

    #[test]
    fn alternatives_exclude_susceptible_crops() {
        let catalog = vec![
            plain("tomato", "Tomato").with_pests(&["Hornworm"]),
            plain("okra", "Okra"),
            Crop::new("blueberry", "Blueberry", CropCategory::Fruit, 4.5, 5.0),
        ];
        let field = field(6.5)
            .with_issue(pest("Hornworm", IssueSeverity::High, date(2026, 9, 1)))
            .with_issue(pest("Cutworm", IssueSeverity::Low, date(2026, 9, 1)));

        let results = engine(catalog).resistant_alternatives(&field);
        let ids: Vec<&str> = results.iter().map(|r| r.crop.id.as_str()).collect();
        assert_eq!(ids, vec!["okra", "blueberry"]);

        let okra = &results[0];
        assert_eq!(okra.score, 95);
        assert_eq!(
            okra.benefits,
            vec![
                "Not susceptible to Hornworm".to_string(),
                "Not susceptible to Cutworm".to_string()
            ]
        );
        assert_eq!(okra.reasons.len(), 2);
        assert_eq!(results[1].reasons.len(), 1);
    }

    #[test]
    fn alternatives_score_is_capped() {
        let catalog = vec![plain("okra", "Okra")];
        let mut field = field(6.5);
        for name in ["Aphids", "Cutworm", "Slugs", "Thrips"] {
            field = field.with_issue(pest(name, IssueSeverity::Low, date(2026, 9, 1)));
        }
        let results = engine(catalog).resistant_alternatives(&field);
        assert_eq!(results[0].score, 100);
    }

    #[test]
    fn lists_all_factors() {
        let factors = RecommendationEngine::new().list_factors();
        let ids: Vec<&str> = factors.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec!["soil_ph", "crop_rotation", "pest_disease", "soil_type", "cover_crop"]
        );
    }

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("pest"), "Pest");
        assert_eq!(capitalize(""), "");
    }
}
