use serde::{Deserialize, Serialize};

use crate::cv::entities::{
    Certificate, Education, Language, PersonalInfo, Skill, Strength, WorkExperience,
};

/// The aggregate returned by `GET /api/cv`: the profile singleton (null when
/// unseeded) plus every collection ordered by sort order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvResponse {
    pub personal_info: Option<PersonalInfo>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub certificates: Vec<Certificate>,
    pub languages: Vec<Language>,
    pub strengths: Vec<Strength>,
}

// Write payloads. An `id` in the body is ignored; for updates the path id
// is authoritative.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub photo_url: Option<String>,
    pub objective: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub projects: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub school: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInput {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInput {
    pub name: Option<String>,
    pub proficiency: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthInput {
    pub name: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cv_serializes_null_singleton_and_empty_arrays() {
        let cv = CvResponse {
            personal_info: None,
            work_experience: vec![],
            education: vec![],
            skills: vec![],
            certificates: vec![],
            languages: vec![],
            strengths: vec![],
        };
        let json = serde_json::to_value(&cv).unwrap();
        assert!(json["personalInfo"].is_null());
        assert_eq!(json["workExperience"], serde_json::json!([]));
        assert_eq!(json["education"], serde_json::json!([]));
        assert_eq!(json["skills"], serde_json::json!([]));
        assert_eq!(json["certificates"], serde_json::json!([]));
        assert_eq!(json["languages"], serde_json::json!([]));
        assert_eq!(json["strengths"], serde_json::json!([]));
    }

    #[test]
    fn skill_input_defaults_sort_order_and_ignores_body_id() {
        let input: SkillInput =
            serde_json::from_str(r#"{"id": 42, "name": "Go", "category": "Language"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Go"));
        assert_eq!(input.category.as_deref(), Some("Language"));
        assert_eq!(input.sort_order, 0);
    }

    #[test]
    fn skill_entity_serializes_camel_case() {
        let skill = crate::cv::entities::Skill {
            id: 5,
            name: Some("Go".into()),
            category: Some("Language".into()),
            sort_order: 3,
        };
        let json = serde_json::to_string(&skill).unwrap();
        assert!(json.contains(r#""sortOrder":3"#));
        assert!(json.contains(r#""id":5"#));
    }

    #[test]
    fn work_experience_input_defaults_responsibilities() {
        let input: WorkExperienceInput =
            serde_json::from_str(r#"{"title": "Engineer", "company": "Acme"}"#).unwrap();
        assert!(input.responsibilities.is_empty());
        assert_eq!(input.sort_order, 0);
    }
}
