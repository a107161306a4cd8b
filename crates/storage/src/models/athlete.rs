use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Athlete {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
}

/// The stored body of an athlete document: every field except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl TryFrom<Document> for Athlete {
    type Error = StorageError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let fields: AthleteFields = serde_json::from_value(Value::Object(document.body))?;

        Ok(Self {
            id: document.id,
            name: fields.name,
            age: fields.age,
            email: fields.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::into_body;
    use serde_json::json;

    #[test]
    fn test_document_without_optional_fields() {
        let id = Uuid::new_v4();
        let doc = Document::new(id, into_body(json!({ "name": "Alex" })).unwrap());

        let athlete = Athlete::try_from(doc).unwrap();
        assert_eq!(athlete.id, id);
        assert_eq!(athlete.name, "Alex");
        assert_eq!(athlete.age, None);
        assert_eq!(athlete.email, None);
    }

    #[test]
    fn test_document_missing_name_is_rejected() {
        let doc = Document::new(Uuid::new_v4(), into_body(json!({ "age": 20 })).unwrap());
        let err = Athlete::try_from(doc).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn test_fields_omit_absent_values() {
        let fields = AthleteFields {
            name: "Alex".to_string(),
            age: None,
            email: Some("alex@example.com".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({ "name": "Alex", "email": "alex@example.com" })
        );
    }
}
