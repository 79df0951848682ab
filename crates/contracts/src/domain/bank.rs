use serde::{Deserialize, Serialize};

/// Bank directory entry used when vendors register payout accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub bank_name: String,
    #[serde(default)]
    pub branch: String,
    pub ifsc_code: String,
    #[serde(default)]
    pub is_active: bool,
}

pub mod fields {
    pub const BANK_NAME: &str = "bankName";
    pub const BRANCH: &str = "branch";
    pub const IFSC_CODE: &str = "ifscCode";
    pub const IS_ACTIVE: &str = "isActive";
}
