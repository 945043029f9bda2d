//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A language offered by the language chooser
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
}

/// Supported UI languages, English first
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", native: "English" },
    Language { code: "hi", name: "Hindi", native: "हिन्दी" },
    Language { code: "es", name: "Spanish", native: "Español" },
    Language { code: "ar", name: "Arabic", native: "العربية" },
    Language { code: "fr", name: "French", native: "Français" },
    Language { code: "bn", name: "Bengali", native: "বাংলা" },
    Language { code: "ta", name: "Tamil", native: "தமிழ்" },
    Language { code: "te", name: "Telugu", native: "తెలుగు" },
    Language { code: "mr", name: "Marathi", native: "मराठी" },
    Language { code: "gu", name: "Gujarati", native: "ગુજરાતી" },
    Language { code: "kn", name: "Kannada", native: "ಕನ್ನಡ" },
    Language { code: "ml", name: "Malayalam", native: "മലയാളം" },
    Language { code: "pa", name: "Punjabi", native: "ਪੰਜਾਬੀ" },
    Language { code: "or", name: "Odia", native: "ଓଡ଼ିଆ" },
    Language { code: "ur", name: "Urdu", native: "اردو" },
    Language { code: "ne", name: "Nepali", native: "नेपाली" },
    Language { code: "si", name: "Sinhala", native: "සිංහල" },
    Language { code: "my", name: "Burmese", native: "မြန်မာ" },
    Language { code: "th", name: "Thai", native: "ไทย" },
    Language { code: "vi", name: "Vietnamese", native: "Tiếng Việt" },
    Language { code: "id", name: "Indonesian", native: "Bahasa Indonesia" },
];

impl Language {
    /// Look up a language by code; unknown or missing codes fall back to English
    pub fn from_code(code: Option<&str>) -> Language {
        code.map(|c| c.trim().to_ascii_lowercase())
            .and_then(|c| LANGUAGES.iter().find(|l| l.code == c).copied())
            .unwrap_or(LANGUAGES[0])
    }

    pub fn is_english(&self) -> bool {
        self.code == "en"
    }
}

impl Default for Language {
    fn default() -> Self {
        LANGUAGES[0]
    }
}

// ============================================================================
// Form option lists
// ============================================================================

/// A dropdown option: the stored value and its display label
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Crops grown across South Asia, grouped by kind
pub const CROPS: &[&str] = &[
    // Cereals & Grains
    "Rice (Paddy)", "Wheat", "Maize (Corn)", "Barley", "Millet", "Sorghum", "Oats",

    // Pulses & Legumes
    "Chickpea (Chana)", "Pigeon Pea (Arhar)", "Lentil (Masoor)", "Green Gram (Moong)",
    "Black Gram (Urad)", "Kidney Bean (Rajma)", "Soybean", "Groundnut (Peanut)",

    // Cash Crops
    "Cotton", "Sugarcane", "Jute", "Tobacco", "Rubber", "Coffee", "Tea",

    // Vegetables
    "Potato", "Tomato", "Onion", "Chili (Pepper)", "Brinjal (Eggplant)", "Cauliflower",
    "Cabbage", "Okra (Ladyfinger)", "Spinach", "Carrot", "Radish", "Cucumber",
    "Bitter Gourd", "Bottle Gourd", "Pumpkin", "Garlic", "Ginger", "Turmeric",

    // Fruits
    "Mango", "Banana", "Papaya", "Guava", "Litchi", "Pomegranate", "Grapes",
    "Watermelon", "Coconut", "Jackfruit", "Pineapple", "Orange", "Lemon",

    // Oilseeds
    "Mustard", "Sunflower", "Sesame", "Safflower", "Castor",

    // Spices
    "Cardamom", "Black Pepper", "Cinnamon", "Clove", "Nutmeg", "Coriander", "Cumin",

    // Plantation Crops
    "Arecanut (Betel Nut)", "Cashew", "Cocoa",
];

/// Growing regions as "State/Division - District", India first
pub const REGIONS: &[&str] = &[
    // India - Northern States
    "Punjab - Amritsar", "Punjab - Ludhiana", "Punjab - Jalandhar", "Punjab - Patiala",
    "Haryana - Hisar", "Haryana - Karnal", "Haryana - Rohtak", "Haryana - Ambala",
    "Uttar Pradesh - Lucknow", "Uttar Pradesh - Varanasi", "Uttar Pradesh - Agra",
    "Uttar Pradesh - Meerut", "Uttar Pradesh - Allahabad", "Uttar Pradesh - Kanpur",
    "Uttarakhand - Dehradun", "Uttarakhand - Haridwar",
    "Himachal Pradesh - Shimla", "Himachal Pradesh - Kullu",
    "Rajasthan - Jaipur", "Rajasthan - Jodhpur", "Rajasthan - Udaipur", "Rajasthan - Kota",

    // India - Western States
    "Maharashtra - Pune", "Maharashtra - Nashik", "Maharashtra - Nagpur",
    "Maharashtra - Aurangabad", "Maharashtra - Kolhapur", "Maharashtra - Solapur",
    "Gujarat - Ahmedabad", "Gujarat - Surat", "Gujarat - Rajkot", "Gujarat - Vadodara",
    "Goa - North Goa", "Goa - South Goa",

    // India - Southern States
    "Tamil Nadu - Chennai", "Tamil Nadu - Coimbatore", "Tamil Nadu - Madurai",
    "Tamil Nadu - Thanjavur", "Tamil Nadu - Salem", "Tamil Nadu - Tirunelveli",
    "Karnataka - Bengaluru", "Karnataka - Mysuru", "Karnataka - Hubli",
    "Karnataka - Mangalore", "Karnataka - Belgaum",
    "Kerala - Thiruvananthapuram", "Kerala - Kochi", "Kerala - Kozhikode", "Kerala - Thrissur",
    "Andhra Pradesh - Vijayawada", "Andhra Pradesh - Visakhapatnam",
    "Andhra Pradesh - Guntur", "Andhra Pradesh - Tirupati",
    "Telangana - Hyderabad", "Telangana - Warangal", "Telangana - Nizamabad",

    // India - Eastern States
    "West Bengal - Kolkata", "West Bengal - Bardhaman", "West Bengal - Siliguri",
    "West Bengal - Murshidabad", "West Bengal - Howrah",
    "Bihar - Patna", "Bihar - Muzaffarpur", "Bihar - Bhagalpur", "Bihar - Gaya",
    "Jharkhand - Ranchi", "Jharkhand - Jamshedpur", "Jharkhand - Dhanbad",
    "Odisha - Bhubaneswar", "Odisha - Cuttack", "Odisha - Puri",

    // India - Northeastern States
    "Assam - Guwahati", "Assam - Jorhat", "Assam - Dibrugarh", "Assam - Silchar",
    "Meghalaya - Shillong", "Tripura - Agartala", "Manipur - Imphal",
    "Nagaland - Kohima", "Arunachal Pradesh - Itanagar", "Mizoram - Aizawl",

    // India - Central States
    "Madhya Pradesh - Bhopal", "Madhya Pradesh - Indore", "Madhya Pradesh - Jabalpur",
    "Chhattisgarh - Raipur", "Chhattisgarh - Bilaspur",

    // Bangladesh
    "Dhaka Division - Dhaka", "Dhaka Division - Gazipur", "Dhaka Division - Narayanganj",
    "Chittagong Division - Chattogram", "Chittagong Division - Cox's Bazar",
    "Chittagong Division - Comilla",
    "Rajshahi Division - Rajshahi", "Rajshahi Division - Bogra",
    "Khulna Division - Khulna", "Khulna Division - Jessore",
    "Sylhet Division - Sylhet", "Sylhet Division - Habiganj",
    "Rangpur Division - Rangpur", "Rangpur Division - Dinajpur",
    "Mymensingh Division - Mymensingh", "Barisal Division - Barisal",

    // Pakistan
    "Punjab - Lahore", "Punjab - Faisalabad", "Punjab - Multan",
    "Punjab - Rawalpindi", "Punjab - Gujranwala", "Punjab - Bahawalpur",
    "Sindh - Karachi", "Sindh - Hyderabad", "Sindh - Sukkur", "Sindh - Larkana",
    "Khyber Pakhtunkhwa - Peshawar", "Khyber Pakhtunkhwa - Mardan",
    "Khyber Pakhtunkhwa - Swat",
    "Balochistan - Quetta", "Balochistan - Gwadar",

    // Sri Lanka
    "Western Province - Colombo", "Western Province - Gampaha",
    "Central Province - Kandy", "Central Province - Nuwara Eliya",
    "Southern Province - Galle", "Southern Province - Matara",
    "Northern Province - Jaffna", "Eastern Province - Trincomalee",
    "North Western Province - Kurunegala", "Sabaragamuwa Province - Ratnapura",
    "Uva Province - Badulla",

    // Nepal
    "Bagmati Province - Kathmandu Valley", "Bagmati Province - Bhaktapur",
    "Gandaki Province - Pokhara", "Gandaki Province - Chitwan",
    "Lumbini Province - Butwal", "Lumbini Province - Bhairahawa",
    "Koshi Province - Biratnagar", "Koshi Province - Dharan",
    "Madhesh Province - Janakpur", "Sudurpashchim Province - Dhangadhi",

    // Bhutan
    "Thimphu District - Thimphu", "Paro District - Paro",
    "Punakha District - Punakha", "Bumthang District - Jakar",
    "Haa District - Haa", "Wangdue Phodrang - Wangdue",

    // Maldives
    "Malé Atoll - Malé", "Addu Atoll - Addu City",
    "Haa Alif Atoll - Dhidhdhoo", "Laamu Atoll - Fonadhoo",
];

/// Cropping seasons
pub const SEASONS: &[SelectOption] = &[
    SelectOption { value: "kharif", label: "Kharif (Monsoon - June to October)" },
    SelectOption { value: "rabi", label: "Rabi (Winter - October to March)" },
    SelectOption { value: "zaid", label: "Zaid (Summer - March to June)" },
    SelectOption { value: "yearround", label: "Year-round" },
];

pub const IRRIGATION_TYPES: &[SelectOption] = &[
    SelectOption { value: "rainfed", label: "Rainfed (Monsoon Dependent)" },
    SelectOption { value: "canal", label: "Canal Irrigation" },
    SelectOption { value: "drip", label: "Drip Irrigation (Micro)" },
    SelectOption { value: "sprinkler", label: "Sprinkler System" },
    SelectOption { value: "tubewell", label: "Tube Well / Borewell" },
    SelectOption { value: "pond", label: "Pond / Tank Irrigation" },
    SelectOption { value: "river", label: "River Lift Irrigation" },
    SelectOption { value: "flood", label: "Flood Irrigation" },
];

pub const SOIL_TYPES: &[&str] = &[
    "Alluvial Soil",
    "Black Cotton Soil",
    "Red Soil",
    "Laterite Soil",
    "Mountain Soil",
    "Desert Soil",
    "Saline Soil",
    "Peaty Soil",
    "Forest Soil",
];

/// Every option list used by the advisory forms
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub crops: &'static [&'static str],
    pub regions: &'static [&'static str],
    pub seasons: &'static [SelectOption],
    pub irrigation_types: &'static [SelectOption],
    pub soil_types: &'static [&'static str],
}

pub const CATALOG: Catalog = Catalog {
    crops: CROPS,
    regions: REGIONS,
    seasons: SEASONS,
    irrigation_types: IRRIGATION_TYPES,
    soil_types: SOIL_TYPES,
};

/// Date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl DateRange {
    /// Inclusive on both ends
    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        assert_eq!(LANGUAGES.len(), 21);
        assert_eq!(Language::from_code(Some("ta")).name, "Tamil");
        assert_eq!(Language::from_code(Some(" HI ")).name, "Hindi");
        assert!(Language::from_code(Some("xx")).is_english());
        assert!(Language::from_code(None).is_english());
    }

    #[test]
    fn test_catalog_lists() {
        assert_eq!(CROPS.len(), 68);
        assert_eq!(CROPS[0], "Rice (Paddy)");
        assert_eq!(CROPS[CROPS.len() - 1], "Cocoa");

        assert_eq!(REGIONS.len(), 148);
        assert_eq!(REGIONS[0], "Punjab - Amritsar");
        assert!(REGIONS.contains(&"Kerala - Kochi"));

        let seasons: Vec<_> = SEASONS.iter().map(|s| s.value).collect();
        assert_eq!(seasons, ["kharif", "rabi", "zaid", "yearround"]);

        assert_eq!(IRRIGATION_TYPES.len(), 8);
        assert_eq!(IRRIGATION_TYPES[0].value, "rainfed");
        assert_eq!(SOIL_TYPES.len(), 9);
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        for list in [CROPS, REGIONS, SOIL_TYPES] {
            let mut seen = std::collections::HashSet::new();
            assert!(list.iter().all(|item| seen.insert(*item)));
        }
    }
}
