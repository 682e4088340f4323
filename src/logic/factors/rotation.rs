use super::{Assessment, FieldContext, ScoreFactor};
use crate::logic::dates::months_between;
use crate::logic::rotation::{is_good_rotation, is_nitrogen_handoff};
use crate::models::Crop;

/// Months a repeat planting must wait before it stops drawing a warning.
const REPLANT_WARNING_MONTHS: u32 = 12;

/// Crop rotation against the field's recent plantings.
///
/// +15 when the crop is absent from the recent window, -15 when present.
/// Rotation notes are informational and do not change the score.
pub struct RotationFactor;

impl ScoreFactor for RotationFactor {
    fn id(&self) -> &'static str {
        "crop_rotation"
    }

    fn name(&self) -> &'static str {
        "Crop Rotation"
    }

    fn assess(&self, ctx: &FieldContext<'_>, crop: &Crop) -> Assessment {
        let mut out = Assessment::default();

        if ctx.recently_planted.contains(crop.id.as_str()) {
            out.adjust(-15);
        } else {
            out.adjust(15);
        }

        if let Some(previous) = ctx.previous_crop {
            if is_good_rotation(previous, crop) {
                out.benefit(format!("Good rotation after {}", previous.name));
                out.reason(format!(
                    "Follows {} without sharing its family pests and diseases",
                    previous.name
                ));
            }
        }

        if let Some(last) = ctx.last_planting_of(&crop.id) {
            let months = months_between(last.plant_date, ctx.today);
            if months < REPLANT_WARNING_MONTHS {
                out.warning(format!(
                    "{} was planted here {} months ago; rotate to avoid pest and disease buildup",
                    crop.name, months
                ));
            }
        }

        if let Some(previous) = ctx.previous_crop {
            if is_nitrogen_handoff(previous, crop) {
                out.benefit(format!(
                    "Nitrogen fixed by {} will feed this heavy feeder",
                    previous.name
                ));
            }
        }

        out
    }
}
