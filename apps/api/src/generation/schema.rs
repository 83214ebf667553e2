//! The output schema handed to the extraction service. It mirrors
//! [`ResumeDocument`](crate::models::ResumeDocument) field for field, and its
//! `required` lists match the fields that have no serde default there.

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "string" })
}

fn bullets() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

pub fn resume_schema() -> Value {
    let personal_info = object(
        json!({
            "name": string(),
            "phone": string(),
            "email": string(),
            "linkedin": string(),
            "github": string()
        }),
        &["name", "email"],
    );

    let education = object(
        json!({
            "school": string(),
            "degree": string(),
            "location": string(),
            "date": string(),
            "description": bullets()
        }),
        &["school", "degree", "date"],
    );

    let experience = object(
        json!({
            "company": string(),
            "role": string(),
            "location": string(),
            "date": string(),
            "description": bullets()
        }),
        &["company", "role", "date"],
    );

    let project = object(
        json!({
            "name": string(),
            "tech": string(),
            "date": string(),
            "description": bullets()
        }),
        &["name", "date"],
    );

    let skills = object(
        json!({
            "languages": string(),
            "frameworks": string(),
            "tools": string(),
            "libraries": string()
        }),
        &[],
    );

    object(
        json!({
            "personalInfo": personal_info,
            "education": { "type": "array", "items": education },
            "experience": { "type": "array", "items": experience },
            "projects": { "type": "array", "items": project },
            "skills": skills
        }),
        &["personalInfo", "education", "experience", "skills"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(v: &Value) -> Vec<&str> {
        v["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_top_level_requirements() {
        let schema = resume_schema();
        assert_eq!(
            required(&schema),
            vec!["personalInfo", "education", "experience", "skills"]
        );
        assert!(schema["properties"]["projects"].is_object());
    }

    #[test]
    fn test_entry_requirements() {
        let p = &resume_schema()["properties"];
        assert_eq!(required(&p["personalInfo"]), vec!["name", "email"]);
        assert_eq!(
            required(&p["education"]["items"]),
            vec!["school", "degree", "date"]
        );
        assert_eq!(
            required(&p["experience"]["items"]),
            vec!["company", "role", "date"]
        );
        assert_eq!(required(&p["projects"]["items"]), vec!["name", "date"]);
        assert!(required(&p["skills"]).is_empty());
    }

    #[test]
    fn test_schema_accepts_seed_shape() {
        // every key the model serializes is declared in the schema
        let seed = serde_json::to_value(crate::models::ResumeDocument::seed()).unwrap();
        let schema = resume_schema();
        for key in seed.as_object().unwrap().keys() {
            assert!(schema["properties"].get(key).is_some(), "{key} missing");
        }
        for key in seed["personalInfo"].as_object().unwrap().keys() {
            assert!(
                schema["properties"]["personalInfo"]["properties"]
                    .get(key)
                    .is_some(),
                "personalInfo.{key} missing"
            );
        }
    }
}
