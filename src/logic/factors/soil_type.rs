use super::{Assessment, FieldContext, ScoreFactor};
use crate::logic::matcher::contains_ignore_case;
use crate::models::Crop;

/// +10 when the field's soil type mentions one of the crop's soil types.
pub struct SoilTypeFactor;

impl ScoreFactor for SoilTypeFactor {
    fn id(&self) -> &'static str {
        "soil_type"
    }

    fn name(&self) -> &'static str {
        "Soil Type"
    }

    fn assess(&self, ctx: &FieldContext<'_>, crop: &Crop) -> Assessment {
        let mut out = Assessment::default();
        let Some(soil) = ctx.field.soil_type.as_deref() else {
            return out;
        };

        if let Some(matched) = crop
            .soil_types
            .iter()
            .find(|s| contains_ignore_case(soil, s))
        {
            out.adjust(10);
            out.reason(format!("Grows well in {} soil", matched));
        }

        out
    }
}
