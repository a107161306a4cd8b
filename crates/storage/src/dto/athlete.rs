use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Athlete, AthleteFields};

/// Athlete as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
}

/// Request payload for creating a new athlete
///
/// A missing `name` deserializes to an empty string so that it is reported
/// by validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request payload for updating an existing athlete
///
/// Only the fields present in the payload are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_name"))]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CreateAthleteRequest {
    pub fn new(name: impl Into<String>, age: Option<i32>, email: Option<&str>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.map(String::from),
        }
    }
}

impl UpdateAthleteRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }
}

impl From<&CreateAthleteRequest> for AthleteFields {
    fn from(req: &CreateAthleteRequest) -> Self {
        Self {
            name: req.name.clone(),
            age: req.age,
            email: req.email.clone(),
        }
    }
}

// Validation helper
fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("Name is required"));
        return Err(error);
    }

    Ok(())
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            name: athlete.name,
            age: athlete.age,
            email: athlete.email,
        }
    }
}
