use super::{Assessment, FieldContext, ScoreFactor};
use crate::logic::matcher::find_match;
use crate::models::{Crop, IssueSeverity};

const HIGH_SEVERITY_PENALTY: i32 = 15;
const OTHER_SEVERITY_PENALTY: i32 = 10;
const MAX_PENALTY: i32 = 30;
const UNAFFECTED_BONUS: i32 = 20;

/// Active pest and disease pressure on the field.
///
/// Each active issue the crop is known to suffer from costs 15 (high
/// severity) or 10, capped at 30. When the field has active issues and
/// none of them touch the crop, it earns +20 instead.
pub struct PestDiseaseFactor;

impl ScoreFactor for PestDiseaseFactor {
    fn id(&self) -> &'static str {
        "pest_disease"
    }

    fn name(&self) -> &'static str {
        "Pest & Disease Pressure"
    }

    fn assess(&self, ctx: &FieldContext<'_>, crop: &Crop) -> Assessment {
        let mut out = Assessment::default();
        if ctx.active_issues.is_empty() {
            return out;
        }

        let mut penalty = 0;
        for issue in &ctx.active_issues {
            if find_match(&issue.name, crop.known_problems()).is_none() {
                continue;
            }
            penalty += match issue.severity {
                IssueSeverity::High => HIGH_SEVERITY_PENALTY,
                _ => OTHER_SEVERITY_PENALTY,
            };
            out.warning(format!(
                "Active {}: {} ({} severity) affects {}",
                issue.kind, issue.name, issue.severity, crop.name
            ));
        }

        if penalty == 0 {
            out.adjust(UNAFFECTED_BONUS);
            out.benefit("Not affected by the field's current pest and disease problems");
        } else {
            out.adjust(-penalty.min(MAX_PENALTY));
        }

        out
    }
}
