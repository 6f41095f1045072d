use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CoachRepository, CoachService, CreateError, DeleteError, ExerciseImage, ExerciseVariation,
    FitnessGoal, FitnessPlan, GenerateError, PlanID, PlanRepository, PlanService, ProgressEntry,
    ProgressRepository, ProgressService, ReadError, SavedPlan, SearchAnswer, UpdateError,
    UserProfile, WorkoutStyle,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: PlanRepository> PlanService for Service<R> {
    async fn get_plans(&self) -> Result<Vec<SavedPlan>, ReadError> {
        log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")
    }

    async fn get_plan(&self, id: PlanID) -> Result<SavedPlan, ReadError> {
        self.get_plans()
            .await?
            .into_iter()
            .find(|plan| plan.id == id)
            .ok_or(ReadError::NotFound)
    }

    async fn create_plan(&self, plan: SavedPlan) -> Result<SavedPlan, CreateError> {
        log_on_error!(
            self.repository.create_plan(plan),
            CreateError,
            "create",
            "plan"
        )
    }

    async fn replace_plan(&self, plan: SavedPlan) -> Result<SavedPlan, UpdateError> {
        log_on_error!(
            self.repository.replace_plan(plan),
            UpdateError,
            "replace",
            "plan"
        )
    }

    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_plan(id),
            DeleteError,
            "delete",
            "plan"
        )
    }
}

impl<R: ProgressRepository> ProgressService for Service<R> {
    async fn get_progress(&self) -> Result<Vec<ProgressEntry>, ReadError> {
        log_on_error!(
            self.repository.read_progress(),
            ReadError,
            "get",
            "progress"
        )
    }

    async fn add_progress_entry(
        &self,
        entry: ProgressEntry,
    ) -> Result<ProgressEntry, CreateError> {
        log_on_error!(
            self.repository.create_progress_entry(entry),
            CreateError,
            "create",
            "progress entry"
        )
    }

    async fn delete_progress_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
        log_on_error!(
            self.repository.delete_progress_entry(date),
            DeleteError,
            "delete",
            "progress entry"
        )
    }
}

macro_rules! log_on_generate_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                GenerateError::RateLimited | GenerateError::NoConnection => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                GenerateError::Other(_) => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: CoachRepository> CoachService for Service<R> {
    async fn generate_plan(&self, profile: &UserProfile) -> Result<FitnessPlan, GenerateError> {
        log_on_generate_error!(self.repository.generate_plan(profile), "generate", "plan")
    }

    async fn get_exercise_image(&self, exercise: &str) -> Result<ExerciseImage, GenerateError> {
        log_on_generate_error!(
            self.repository.generate_exercise_image(exercise),
            "generate",
            "exercise image"
        )
    }

    async fn get_exercise_variations(
        &self,
        exercise: &str,
        goal: FitnessGoal,
        style: WorkoutStyle,
    ) -> Result<Vec<ExerciseVariation>, GenerateError> {
        log_on_generate_error!(
            self.repository.read_exercise_variations(exercise, goal, style),
            "get",
            "exercise variations"
        )
    }

    async fn search(&self, query: &str) -> Result<SearchAnswer, GenerateError> {
        log_on_generate_error!(self.repository.search(query), "get", "search result")
    }
}
