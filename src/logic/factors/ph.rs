use super::{Assessment, FieldContext, ScoreFactor};
use crate::models::Crop;

/// Soil pH against the crop's acceptable range.
///
/// Inside the range: +25. Outside, by distance to the nearer bound:
/// within 0.5 is +15, within 1.0 is +5, anything further is -20.
pub struct PhFactor;

impl ScoreFactor for PhFactor {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn assess(&self, ctx: &FieldContext<'_>, crop: &Crop) -> Assessment {
        let ph = ctx.field.soil_ph;
        let mut out = Assessment::default();

        if crop.ph_in_range(ph) {
            out.adjust(25);
            out.reason(format!(
                "Soil pH {:.1} is within the ideal range ({:.1}-{:.1})",
                ph, crop.ph_min, crop.ph_max
            ));
            return out;
        }

        if ph < crop.ph_min {
            out.warning(format!(
                "Soil is too acidic (pH {:.1}, needs {:.1}-{:.1})",
                ph, crop.ph_min, crop.ph_max
            ));
        } else if ph > crop.ph_max {
            out.warning(format!(
                "Soil is too alkaline (pH {:.1}, needs {:.1}-{:.1})",
                ph, crop.ph_min, crop.ph_max
            ));
        }

        let diff = crop.ph_distance(ph);
        out.adjust(if diff <= 0.5 {
            15
        } else if diff <= 1.0 {
            5
        } else {
            -20
        });

        out
    }
}
