use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// The business's own contact details, printed on every exported invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub company_name: String,
    pub phone_number: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub company_name: String,
    pub phone_number: String,
    pub address: String,
}

impl ProfileDraft {
    pub fn validate(&self) -> Result<Profile, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let company_name = self.company_name.trim();
        let phone_number = self.phone_number.trim();
        let address = self.address.trim();

        if company_name.is_empty() {
            errors.add("companyName", "Please enter company name");
        }
        if phone_number.is_empty() {
            errors.add("phoneNumber", "Please enter phone number");
        }
        if address.is_empty() {
            errors.add("address", "Please enter address");
        }
        errors.into_result()?;

        Ok(Profile {
            company_name: company_name.to_string(),
            phone_number: phone_number.to_string(),
            address: address.to_string(),
            updated_at: Some(Utc::now()),
        })
    }
}

impl From<&Profile> for ProfileDraft {
    fn from(profile: &Profile) -> Self {
        ProfileDraft {
            company_name: profile.company_name.clone(),
            phone_number: profile.phone_number.clone(),
            address: profile.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_stamps() {
        let profile = ProfileDraft {
            company_name: " Sharma Woodworks ".into(),
            phone_number: "98765 43210".into(),
            address: "12 MG Road, Pune".into(),
        }
        .validate()
        .unwrap();

        assert_eq!(profile.company_name, "Sharma Woodworks");
        assert!(profile.updated_at.is_some());
    }

    #[test]
    fn every_field_is_required() {
        let errors = ProfileDraft::default().validate().unwrap_err();
        assert_eq!(errors.get("companyName"), Some("Please enter company name"));
        assert_eq!(errors.get("phoneNumber"), Some("Please enter phone number"));
        assert_eq!(errors.get("address"), Some("Please enter address"));
    }

    #[test]
    fn reads_records_without_timestamp() {
        let profile: Profile = serde_json::from_str(
            r#"{"companyName":"A","phoneNumber":"1","address":"B"}"#,
        )
        .unwrap();
        assert_eq!(profile.updated_at, None);
        assert_eq!(ProfileDraft::from(&profile).company_name, "A");
    }
}
