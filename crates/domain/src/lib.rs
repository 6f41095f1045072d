#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod coach;
pub mod error;
pub mod interval;
pub mod name;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod service;

pub use coach::{
    CoachRepository, CoachService, ExerciseImage, ExerciseVariation, SearchAnswer, SearchSource,
};
pub use error::{
    CreateError, DeleteError, GenerateError, ReadError, StorageError, UpdateError,
    ValidationError,
};
pub use interval::{DefaultInterval, Interval, init_interval};
pub use name::{Name, NameError};
pub use plan::{
    DailyMeals, Exercise, FitnessPlan, MacroSplit, Meal, PlanID, PlanRepository, PlanService,
    ProTip, SavedPlan, WorkoutDay, default_plan_name,
};
pub use profile::{ActivityLevel, FitnessGoal, Gender, UserProfile, WorkoutStyle};
pub use progress::{
    ProgressEntry, ProgressRepository, ProgressService, avg_weight, total_change,
};
pub use service::Service;
