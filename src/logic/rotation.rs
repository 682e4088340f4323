use super::matcher::contains_any;
use crate::models::{Crop, CropCategory};

const LEGUME_KEYWORDS: &[&str] = &["bean", "pea"];
const HEAVY_FEEDER_KEYWORDS: &[&str] = &["tomato", "corn", "cabbage"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropFamily {
    Brassica,
    Nightshade,
    Cucurbit,
}

impl CropFamily {
    pub fn all() -> &'static [CropFamily] {
        &[
            CropFamily::Brassica,
            CropFamily::Nightshade,
            CropFamily::Cucurbit,
        ]
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            CropFamily::Brassica => &["cabbage", "broccoli", "cauliflower", "kale", "brussels"],
            CropFamily::Nightshade => &["tomato", "pepper", "eggplant", "potato"],
            CropFamily::Cucurbit => &["cucumber", "squash", "pumpkin", "melon"],
        }
    }

    pub fn includes(&self, crop_name: &str) -> bool {
        contains_any(crop_name, self.keywords())
    }
}

/// Nitrogen fixer, judged by name.
pub fn is_legume(crop: &Crop) -> bool {
    contains_any(&crop.name, LEGUME_KEYWORDS)
}

pub fn is_heavy_feeder(crop: &Crop) -> bool {
    crop.category == CropCategory::Vegetable && contains_any(&crop.name, HEAVY_FEEDER_KEYWORDS)
}

/// Legume followed by a heavy feeder that can use the fixed nitrogen.
pub fn is_nitrogen_handoff(previous: &Crop, next: &Crop) -> bool {
    is_legume(previous) && is_heavy_feeder(next)
}

/// The family both crops belong to, if any.
pub fn shared_family(a: &Crop, b: &Crop) -> Option<CropFamily> {
    CropFamily::all()
        .iter()
        .copied()
        .find(|family| family.includes(&a.name) && family.includes(&b.name))
}

/// A rotation is bad only when both crops share a category and a
/// botanical family; a legume handing off to a heavy feeder is always good.
pub fn is_good_rotation(previous: &Crop, next: &Crop) -> bool {
    if is_nitrogen_handoff(previous, next) {
        return true;
    }
    previous.category != next.category || shared_family(previous, next).is_none()
}
