use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub iso_code: String,
    #[serde(default)]
    pub phone_code: String,
    #[serde(default)]
    pub is_active: bool,
}

/// State or province; `country` holds the owning country's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}
