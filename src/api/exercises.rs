//! Exercise library: the catalogue trainers assign from, browsable by
//! body part and muscle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiClient, DeletedAck, Page, PageQuery};
use crate::error::ApiError;

/// Difficulty rating. The wire value is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Expert => "expert",
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "expert" => Ok(Level::Expert),
            other => Err(format!(
                "unknown level '{other}' (expected beginner, intermediate, or expert)"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Mongo id; absent on records seeded straight from the catalogue.
    #[serde(rename = "_id", default)]
    pub db_id: Option<String>,
    /// Stable catalogue slug, e.g. `Barbell_Squat`.
    pub id: String,
    pub name: String,
    pub level: Level,
    #[serde(default)]
    pub equipment: Option<String>,
    pub primary_muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub force: Option<String>,
    #[serde(default)]
    pub mechanic: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseRequest {
    pub id: String,
    pub name: String,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    pub primary_muscles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_muscles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExerciseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_muscles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_muscles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A browsable body region, e.g. Back, Chest, Legs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPart {
    #[serde(rename = "_id")]
    pub db_id: String,
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MuscleName {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusclesByBodyPart {
    pub body_part_id: i64,
    pub muscles: Vec<MuscleName>,
    pub total_muscles: u32,
}

/// Pagination shape unique to the by-muscle endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusclePageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_exercises: u64,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesByMuscle {
    pub muscle: String,
    #[serde(default)]
    pub level: Option<String>,
    pub pagination: MusclePageInfo,
    pub exercises: Vec<Exercise>,
}

impl ApiClient {
    pub async fn list_exercises(
        &self,
        page: PageQuery,
        search: Option<&str>,
        level: Option<Level>,
        category: Option<&str>,
    ) -> Result<Page<Exercise>, ApiError> {
        let mut params = page.params();
        if let Some(search) = search {
            params.push(("search", search.to_string()));
        }
        if let Some(level) = level {
            params.push(("level", level.as_str().to_string()));
        }
        if let Some(category) = category {
            params.push(("category", category.to_string()));
        }
        self.get("/exercises", &params).await
    }

    pub async fn get_exercise(&self, id: &str) -> Result<Exercise, ApiError> {
        self.get(&format!("/exercises/{id}"), &[]).await
    }

    pub async fn create_exercise(&self, req: &CreateExerciseRequest) -> Result<Exercise, ApiError> {
        self.post("/exercises", req).await
    }

    pub async fn update_exercise(
        &self,
        id: &str,
        req: &UpdateExerciseRequest,
    ) -> Result<Exercise, ApiError> {
        self.put(&format!("/exercises/{id}"), req).await
    }

    pub async fn delete_exercise(&self, id: &str) -> Result<DeletedAck, ApiError> {
        self.delete(&format!("/exercises/{id}")).await
    }

    pub async fn body_parts(&self) -> Result<Vec<BodyPart>, ApiError> {
        self.get("/exercises/body-parts", &[]).await
    }

    pub async fn muscles_by_body_part(
        &self,
        body_part_id: i64,
    ) -> Result<MusclesByBodyPart, ApiError> {
        self.get(&format!("/exercises/body-parts/{body_part_id}/muscles"), &[])
            .await
    }

    pub async fn exercises_by_muscle(
        &self,
        muscle: &str,
        page: PageQuery,
        level: Option<Level>,
    ) -> Result<ExercisesByMuscle, ApiError> {
        let mut params = page.params();
        if let Some(level) = level {
            params.push(("level", level.as_str().to_string()));
        }
        self.get(&format!("/exercises/muscles/{muscle}"), &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("Beginner".parse::<Level>(), Ok(Level::Beginner));
        assert_eq!("EXPERT".parse::<Level>(), Ok(Level::Expert));
        assert!("pro".parse::<Level>().is_err());
    }

    #[test]
    fn exercise_decodes_without_db_id() {
        let ex: Exercise = serde_json::from_str(
            r#"{
                "id": "Barbell_Squat",
                "name": "Barbell Squat",
                "level": "intermediate",
                "primaryMuscles": ["quadriceps"],
                "secondaryMuscles": ["glutes", "hamstrings"]
            }"#,
        )
        .unwrap();
        assert!(ex.db_id.is_none());
        assert_eq!(ex.level, Level::Intermediate);
        assert_eq!(ex.primary_muscles, vec!["quadriceps"]);
    }
}
