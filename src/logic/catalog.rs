use crate::error::{CropOpsError, Result};
use crate::models::{Crop, CropCategory};
use std::path::Path;

/// Reference catalog used when no custom catalog is configured.
pub fn default_catalog() -> Vec<Crop> {
    vec![
        Crop::new("tomato", "Tomato", CropCategory::Vegetable, 6.0, 6.8)
            .with_soil_types(&["loam", "sandy loam"])
            .with_pests(&["Hornworm", "Aphids", "Whitefly"])
            .with_diseases(&["Early Blight", "Late Blight", "Fusarium Wilt"])
            .with_cover_crops(&["Crimson Clover", "Hairy Vetch"]),
        Crop::new("sweet-corn", "Sweet Corn", CropCategory::Vegetable, 5.8, 7.0)
            .with_soil_types(&["loam", "silt loam"])
            .with_pests(&["Corn Earworm", "Cutworm", "European Corn Borer"])
            .with_diseases(&["Common Rust", "Smut"])
            .with_cover_crops(&["Winter Rye", "Crimson Clover"]),
        Crop::new("cabbage", "Cabbage", CropCategory::Vegetable, 6.0, 7.5)
            .with_soil_types(&["clay loam", "loam"])
            .with_pests(&["Cabbage Looper", "Aphids", "Flea Beetle"])
            .with_diseases(&["Black Rot", "Clubroot"])
            .with_cover_crops(&["Oats", "Field Peas"]),
        Crop::new("broccoli", "Broccoli", CropCategory::Vegetable, 6.0, 7.0)
            .with_soil_types(&["loam", "clay loam"])
            .with_pests(&["Cabbage Looper", "Flea Beetle"])
            .with_diseases(&["Downy Mildew", "Clubroot"])
            .with_cover_crops(&["Oats", "Buckwheat"]),
        Crop::new("green-beans", "Green Beans", CropCategory::Vegetable, 6.0, 7.0)
            .with_soil_types(&["loam", "sandy loam"])
            .with_pests(&["Mexican Bean Beetle", "Aphids"])
            .with_diseases(&["Bean Rust", "Anthracnose"])
            .with_cover_crops(&["Winter Rye"]),
        Crop::new("peas", "Peas", CropCategory::Vegetable, 6.0, 7.5)
            .with_soil_types(&["loam", "sandy loam", "clay loam"])
            .with_pests(&["Pea Weevil", "Aphids"])
            .with_diseases(&["Powdery Mildew", "Root Rot"])
            .with_cover_crops(&["Buckwheat", "Oats"]),
        Crop::new("potato", "Potato", CropCategory::Vegetable, 5.0, 6.5)
            .with_soil_types(&["sandy loam", "loam"])
            .with_pests(&["Colorado Potato Beetle", "Wireworm"])
            .with_diseases(&["Late Blight", "Scab"])
            .with_cover_crops(&["Winter Rye", "Hairy Vetch"]),
        Crop::new("pepper", "Bell Pepper", CropCategory::Vegetable, 6.0, 7.0)
            .with_soil_types(&["loam", "sandy loam"])
            .with_pests(&["Aphids", "Pepper Weevil"])
            .with_diseases(&["Bacterial Spot", "Phytophthora Blight"])
            .with_cover_crops(&["Crimson Clover"]),
        Crop::new("cucumber", "Cucumber", CropCategory::Vegetable, 6.0, 7.0)
            .with_soil_types(&["sandy loam", "loam"])
            .with_pests(&["Cucumber Beetle", "Squash Bug"])
            .with_diseases(&["Powdery Mildew", "Bacterial Wilt"])
            .with_cover_crops(&["Winter Rye", "Oats"]),
        Crop::new("squash", "Summer Squash", CropCategory::Vegetable, 6.0, 7.5)
            .with_soil_types(&["loam", "sandy loam"])
            .with_pests(&["Squash Bug", "Squash Vine Borer", "Cucumber Beetle"])
            .with_diseases(&["Powdery Mildew"])
            .with_cover_crops(&["Hairy Vetch", "Winter Rye"]),
        Crop::new("carrot", "Carrot", CropCategory::Vegetable, 6.0, 6.8)
            .with_soil_types(&["sandy", "sandy loam"])
            .with_pests(&["Carrot Rust Fly", "Wireworm"])
            .with_diseases(&["Leaf Blight"])
            .with_cover_crops(&["Buckwheat"]),
        Crop::new("lettuce", "Lettuce", CropCategory::Vegetable, 6.0, 7.0)
            .with_soil_types(&["loam", "silt loam"])
            .with_pests(&["Aphids", "Slugs"])
            .with_diseases(&["Downy Mildew", "Bottom Rot"]),
        Crop::new("onion", "Onion", CropCategory::Vegetable, 6.0, 7.0)
            .with_soil_types(&["loam", "silt loam", "sandy loam"])
            .with_pests(&["Onion Thrips", "Onion Maggot"])
            .with_diseases(&["Downy Mildew", "Neck Rot"])
            .with_cover_crops(&["Oats"]),
        Crop::new("wheat", "Winter Wheat", CropCategory::Grain, 6.0, 7.0)
            .with_soil_types(&["loam", "clay loam", "silt loam"])
            .with_pests(&["Hessian Fly", "Aphids"])
            .with_diseases(&["Stripe Rust", "Fusarium Head Blight"])
            .with_cover_crops(&["Red Clover"]),
        Crop::new("soybean", "Soybean", CropCategory::Legume, 6.0, 7.0)
            .with_soil_types(&["loam", "silt loam", "clay loam"])
            .with_pests(&["Soybean Aphid", "Bean Leaf Beetle"])
            .with_diseases(&["Sudden Death Syndrome", "White Mold"])
            .with_cover_crops(&["Winter Rye", "Oats"]),
        Crop::new("strawberry", "Strawberry", CropCategory::Fruit, 5.5, 6.5)
            .with_soil_types(&["sandy loam", "loam"])
            .with_pests(&["Spider Mites", "Slugs", "Tarnished Plant Bug"])
            .with_diseases(&["Gray Mold", "Verticillium Wilt"])
            .with_cover_crops(&["Buckwheat", "Oats"]),
        Crop::new("basil", "Basil", CropCategory::Herb, 6.0, 7.5)
            .with_soil_types(&["loam", "sandy loam"])
            .with_pests(&["Japanese Beetle", "Aphids"])
            .with_diseases(&["Downy Mildew", "Fusarium Wilt"]),
    ]
}

/// Load a YAML list of crops, replacing the built-in catalog.
pub fn load_catalog(path: &Path) -> Result<Vec<Crop>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CropOpsError::Config(format!("Failed to read catalog {:?}: {}", path, e))
    })?;
    let crops: Vec<Crop> = serde_yaml::from_str(&content)?;

    if crops.is_empty() {
        return Err(CropOpsError::InvalidData(format!(
            "Catalog {:?} contains no crops",
            path
        )));
    }

    for crop in crops.iter().filter(|c| c.ph_min > c.ph_max) {
        tracing::warn!(
            crop = %crop.id,
            ph_min = crop.ph_min,
            ph_max = crop.ph_max,
            "Crop has inverted pH bounds; it will never score as ideal"
        );
    }

    tracing::info!(count = crops.len(), "Loaded crop catalog from {:?}", path);
    Ok(crops)
}

pub fn find_crop<'a>(catalog: &'a [Crop], id: &str) -> Option<&'a Crop> {
    catalog.iter().find(|c| c.id == id)
}
