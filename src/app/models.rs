use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::app::taxonomy::generate_class_name;
use crate::app::validate::{is_valid_email, is_valid_phone, require};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rank: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_teacher_id: Option<String>,
    #[serde(default)]
    pub enrollment: u32,
}

impl SchoolClass {
    /// Display name is always derived from rank and stream; there is no
    /// stored name field to drift out of sync.
    pub fn display_name(&self) -> String {
        generate_class_name(&self.rank, self.stream.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub guardian_name: String,
    pub guardian_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
    pub class_id: String,
    /// The backend serves this both as a number and a string.
    #[serde(deserialize_with = "deserialize_number_or_string", default)]
    pub year_of_entry: String,
}

impl Student {
    /// Client-side checks the registration form runs before submitting.
    pub fn validate(&self) -> Result<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("gender", &self.gender)?;
        require("guardian_name", &self.guardian_name)?;
        require("class_id", &self.class_id)?;
        if !is_valid_phone(&self.guardian_phone) {
            anyhow::bail!("Invalid guardian phone: {}", self.guardian_phone);
        }
        if let Some(email) = &self.guardian_email {
            if !is_valid_email(email) {
                anyhow::bail!("Invalid guardian email: {email}");
            }
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Duty post, e.g. "teacher", "bursar", "head_teacher".
    pub designation: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl StaffMember {
    pub fn validate(&self) -> Result<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("designation", &self.designation)?;
        if !is_valid_email(&self.email) {
            anyhow::bail!("Invalid staff email: {}", self.email);
        }
        if !is_valid_phone(&self.phone) {
            anyhow::bail!("Invalid staff phone: {}", self.phone);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subject_id: String,
    /// The backend serves this both as a number and a string.
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub term: String,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub student_id: String,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub term: String,
    /// Amounts in whole shillings.
    pub amount_billed: i64,
    pub amount_paid: i64,
}

impl FeeRecord {
    pub fn balance(&self) -> i64 {
        self.amount_billed - self.amount_paid
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    pub student_id: String,
    pub subject_id: String,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub term: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Processing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportJob {
    pub job_id: String,
    pub status: ReportStatus,
}

fn deserialize_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct NumberOrStringVisitor;

    impl<'de> Visitor<'de> for NumberOrStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(NumberOrStringVisitor)
}
