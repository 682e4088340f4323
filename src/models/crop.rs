use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CropCategory {
    Vegetable,
    Fruit,
    Grain,
    Legume,
    Herb,
    Cover,
    Other,
}

impl CropCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Vegetable => "Vegetable",
            CropCategory::Fruit => "Fruit",
            CropCategory::Grain => "Grain",
            CropCategory::Legume => "Legume",
            CropCategory::Herb => "Herb",
            CropCategory::Cover => "Cover Crop",
            CropCategory::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "vegetable" | "vegetables" => Some(CropCategory::Vegetable),
            "fruit" | "fruits" => Some(CropCategory::Fruit),
            "grain" | "grains" | "cereal" => Some(CropCategory::Grain),
            "legume" | "legumes" => Some(CropCategory::Legume),
            "herb" | "herbs" => Some(CropCategory::Herb),
            "cover" | "covercrop" => Some(CropCategory::Cover),
            "other" => Some(CropCategory::Other),
            _ => None,
        }
    }
}

impl TryFrom<String> for CropCategory {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str(&value).ok_or_else(|| format!("unknown crop category '{}'", value))
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog entry describing what a crop tolerates and what tends to attack it.
///
/// `ph_min <= ph_max` is expected but not enforced; inverted bounds make the
/// pH check never report an ideal range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: String,
    pub name: String,
    pub category: CropCategory,
    pub ph_min: f64,
    pub ph_max: f64,
    #[serde(default)]
    pub soil_types: Vec<String>,
    #[serde(default)]
    pub common_pests: Vec<String>,
    #[serde(default)]
    pub common_diseases: Vec<String>,
    #[serde(default)]
    pub cover_crops: Vec<String>,
}

impl Crop {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: CropCategory,
        ph_min: f64,
        ph_max: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            ph_min,
            ph_max,
            soil_types: Vec::new(),
            common_pests: Vec::new(),
            common_diseases: Vec::new(),
            cover_crops: Vec::new(),
        }
    }

    pub fn with_soil_types(mut self, soil_types: &[&str]) -> Self {
        self.soil_types = soil_types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_pests(mut self, pests: &[&str]) -> Self {
        self.common_pests = pests.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_diseases(mut self, diseases: &[&str]) -> Self {
        self.common_diseases = diseases.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_cover_crops(mut self, cover_crops: &[&str]) -> Self {
        self.cover_crops = cover_crops.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn ph_in_range(&self, ph: f64) -> bool {
        ph >= self.ph_min && ph <= self.ph_max
    }

    /// Distance from `ph` to the nearer bound of the acceptable range.
    pub fn ph_distance(&self, ph: f64) -> f64 {
        (ph - self.ph_min).abs().min((ph - self.ph_max).abs())
    }

    /// Pests followed by diseases, in catalog order.
    pub fn known_problems(&self) -> impl Iterator<Item = &str> {
        self.common_pests
            .iter()
            .chain(self.common_diseases.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_category_from_str_valid() {
        assert_eq!(
            CropCategory::from_str("vegetable"),
            Some(CropCategory::Vegetable)
        );
        assert_eq!(CropCategory::from_str("Grain"), Some(CropCategory::Grain));
        assert_eq!(
            CropCategory::from_str("cover crop"),
            Some(CropCategory::Cover)
        );
        assert_eq!(
            CropCategory::from_str("Cover-Crop"),
            Some(CropCategory::Cover)
        );
    }

    #[test]
    fn crop_category_from_str_invalid() {
        assert_eq!(CropCategory::from_str("tree"), None);
        assert_eq!(CropCategory::from_str(""), None);
    }

    #[test]
    fn ph_range_checks() {
        let crop = Crop::new("tomato", "Tomato", CropCategory::Vegetable, 6.0, 6.8);
        assert!(crop.ph_in_range(6.0));
        assert!(crop.ph_in_range(6.8));
        assert!(!crop.ph_in_range(5.9));
        assert!((crop.ph_distance(5.5) - 0.5).abs() < 1e-9);
        assert!((crop.ph_distance(7.3) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn inverted_ph_bounds_are_never_in_range() {
        let crop = Crop::new("odd", "Odd", CropCategory::Other, 7.0, 6.0);
        assert!(!crop.ph_in_range(6.5));
        assert!((crop.ph_distance(6.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn known_problems_lists_pests_then_diseases() {
        let crop = Crop::new("corn", "Corn", CropCategory::Grain, 5.8, 7.0)
            .with_pests(&["Corn Earworm"])
            .with_diseases(&["Rust"]);
        let problems: Vec<&str> = crop.known_problems().collect();
        assert_eq!(problems, vec!["Corn Earworm", "Rust"]);
    }

    #[test]
    fn crop_category_accepts_display_names_in_yaml() {
        let category: CropCategory = serde_yaml::from_str("Cover Crop").unwrap();
        assert_eq!(category, CropCategory::Cover);
        assert!(serde_yaml::from_str::<CropCategory>("shrub").is_err());
    }

    #[test]
    fn crop_deserializes_with_missing_lists() {
        let yaml = "id: rye\nname: Rye\ncategory: grain\nph_min: 5.0\nph_max: 7.0\n";
        let crop: Crop = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(crop.category, CropCategory::Grain);
        assert!(crop.soil_types.is_empty());
        assert!(crop.cover_crops.is_empty());
    }
}
