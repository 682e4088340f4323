use super::{Assessment, FieldContext, ScoreFactor};
use crate::models::Crop;

const COVER_CROPS_SHOWN: usize = 2;

/// Mentions the follow-on cover crops a crop pairs with. Never scores.
pub struct CoverCropFactor;

impl ScoreFactor for CoverCropFactor {
    fn id(&self) -> &'static str {
        "cover_crop"
    }

    fn name(&self) -> &'static str {
        "Cover Crop Follow-up"
    }

    fn assess(&self, _ctx: &FieldContext<'_>, crop: &Crop) -> Assessment {
        let mut out = Assessment::default();
        if crop.cover_crops.is_empty() {
            return out;
        }

        let shown: Vec<&str> = crop
            .cover_crops
            .iter()
            .take(COVER_CROPS_SHOWN)
            .map(String::as_str)
            .collect();
        out.benefit(format!(
            "Follow with a cover crop such as {}",
            shown.join(" or ")
        ));
        out
    }
}
