//! Composite repository behind the domain service.
//!
//! Generative requests go to the Gemini API, while plans and progress are
//! kept in browser local storage.

use chrono::NaiveDate;

use vigor_domain as domain;
use vigor_domain::{CoachRepository, PlanRepository, ProgressRepository};

use crate::{gemini::Gemini, local_storage::LocalStorage};

pub struct LocalGemini {
    gemini: Gemini,
}

impl LocalGemini {
    #[must_use]
    pub const fn new() -> Self {
        Self { gemini: Gemini }
    }
}

impl Default for LocalGemini {
    fn default() -> Self {
        Self::new()
    }
}

impl domain::PlanRepository for LocalGemini {
    async fn read_plans(&self) -> Result<Vec<domain::SavedPlan>, domain::ReadError> {
        LocalStorage.read_plans().await
    }

    async fn create_plan(
        &self,
        plan: domain::SavedPlan,
    ) -> Result<domain::SavedPlan, domain::CreateError> {
        LocalStorage.create_plan(plan).await
    }

    async fn replace_plan(
        &self,
        plan: domain::SavedPlan,
    ) -> Result<domain::SavedPlan, domain::UpdateError> {
        LocalStorage.replace_plan(plan).await
    }

    async fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        LocalStorage.delete_plan(id).await
    }
}

impl domain::ProgressRepository for LocalGemini {
    async fn read_progress(&self) -> Result<Vec<domain::ProgressEntry>, domain::ReadError> {
        LocalStorage.read_progress().await
    }

    async fn create_progress_entry(
        &self,
        entry: domain::ProgressEntry,
    ) -> Result<domain::ProgressEntry, domain::CreateError> {
        LocalStorage.create_progress_entry(entry).await
    }

    async fn delete_progress_entry(
        &self,
        date: NaiveDate,
    ) -> Result<NaiveDate, domain::DeleteError> {
        LocalStorage.delete_progress_entry(date).await
    }
}

impl domain::CoachRepository for LocalGemini {
    async fn generate_plan(
        &self,
        profile: &domain::UserProfile,
    ) -> Result<domain::FitnessPlan, domain::GenerateError> {
        self.gemini.generate_plan(profile).await
    }

    async fn generate_exercise_image(
        &self,
        exercise: &str,
    ) -> Result<domain::ExerciseImage, domain::GenerateError> {
        self.gemini.generate_exercise_image(exercise).await
    }

    async fn read_exercise_variations(
        &self,
        exercise: &str,
        goal: domain::FitnessGoal,
        style: domain::WorkoutStyle,
    ) -> Result<Vec<domain::ExerciseVariation>, domain::GenerateError> {
        self.gemini
            .read_exercise_variations(exercise, goal, style)
            .await
    }

    async fn search(&self, query: &str) -> Result<domain::SearchAnswer, domain::GenerateError> {
        self.gemini.search(query).await
    }
}
