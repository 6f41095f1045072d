use derive_more::AsRef;

use crate::{FitnessGoal, FitnessPlan, GenerateError, UserProfile, WorkoutStyle};

#[allow(async_fn_in_trait)]
pub trait CoachService {
    async fn generate_plan(&self, profile: &UserProfile) -> Result<FitnessPlan, GenerateError>;
    async fn get_exercise_image(&self, exercise: &str) -> Result<ExerciseImage, GenerateError>;
    async fn get_exercise_variations(
        &self,
        exercise: &str,
        goal: FitnessGoal,
        style: WorkoutStyle,
    ) -> Result<Vec<ExerciseVariation>, GenerateError>;
    async fn search(&self, query: &str) -> Result<SearchAnswer, GenerateError>;
}

#[allow(async_fn_in_trait)]
pub trait CoachRepository {
    async fn generate_plan(&self, profile: &UserProfile) -> Result<FitnessPlan, GenerateError>;
    async fn generate_exercise_image(&self, exercise: &str)
    -> Result<ExerciseImage, GenerateError>;
    async fn read_exercise_variations(
        &self,
        exercise: &str,
        goal: FitnessGoal,
        style: WorkoutStyle,
    ) -> Result<Vec<ExerciseVariation>, GenerateError>;
    async fn search(&self, query: &str) -> Result<SearchAnswer, GenerateError>;
}

/// Data URL of a generated exercise demonstration image.
#[derive(AsRef, Debug, Clone, PartialEq, Eq)]
pub struct ExerciseImage(String);

impl ExerciseImage {
    #[must_use]
    pub fn from_base64_png(data: &str) -> Self {
        Self(format!("data:image/png;base64,{data}"))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseVariation {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAnswer {
    pub answer: String,
    pub sources: Vec<SearchSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSource {
    pub uri: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exercise_image_from_base64_png() {
        assert_eq!(
            ExerciseImage::from_base64_png("AAAA").url(),
            "data:image/png;base64,AAAA"
        );
    }
}
