use serde::{Deserialize, Serialize};

/// Approval state of a vendor registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VendorStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VendorStatus {
    pub const ALL: [VendorStatus; 3] = [
        VendorStatus::Pending,
        VendorStatus::Approved,
        VendorStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Pending => "Pending",
            VendorStatus::Approved => "Approved",
            VendorStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gstin: String,
    #[serde(default)]
    pub pan: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
    #[serde(default)]
    pub status: VendorStatus,
    /// URL of the uploaded GST certificate, set by the server.
    #[serde(default)]
    pub gst_certificate: Option<String>,
    /// URL of the uploaded PAN card scan, set by the server.
    #[serde(default)]
    pub pan_card: Option<String>,
}

pub mod fields {
    pub const BUSINESS_NAME: &str = "businessName";
    pub const OWNER_NAME: &str = "ownerName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const GSTIN: &str = "gstin";
    pub const PAN: &str = "pan";
    pub const BANK_NAME: &str = "bankName";
    pub const ACCOUNT_NUMBER: &str = "accountNumber";
    pub const IFSC_CODE: &str = "ifscCode";
    pub const STATUS: &str = "status";
    pub const GST_CERTIFICATE: &str = "gstCertificate";
    pub const PAN_CARD: &str = "panCard";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_wire_names() {
        let vendor: Vendor = serde_json::from_str(
            r#"{"_id":"v1","businessName":"Acme","ownerName":"R. Rao","email":"a@b.in","status":"Approved"}"#,
        )
        .unwrap();
        assert_eq!(vendor.id.as_deref(), Some("v1"));
        assert_eq!(vendor.status, VendorStatus::Approved);
        assert!(vendor.gst_certificate.is_none());

        let value = serde_json::to_value(&vendor).unwrap();
        assert_eq!(value["businessName"], "Acme");
        assert_eq!(value["_id"], "v1");
    }
}
