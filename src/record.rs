use serde::{Deserialize, Serialize};

/// The fixed degree catalog. Anything else is an invalid selection.
pub const DEGREE_TYPES: [&str; 12] = [
    "BSc", "BTech", "BA", "BBA", "BCA", "BCom", "MSc", "MTech", "MA", "MBA", "MCA", "MCom",
];

pub fn is_degree_type(code: &str) -> bool {
    DEGREE_TYPES.contains(&code)
}

/// The ten validated profile fields, without an identifier.
/// This is what the validator produces and what stores persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub tenth_marks: f64,
    pub twelfth_marks: f64,
    pub degree_type: String,
    pub years_of_study: i64,
}

/// A persisted student row. Ids are store-assigned UUID strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: StudentFields,
}
