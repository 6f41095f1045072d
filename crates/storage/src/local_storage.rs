//! Browser local storage persistence.
//!
//! Stored values that cannot be decoded are not surfaced as errors. The
//! entire store is cleared and the app starts fresh, leaving only a console
//! diagnostic behind.

use std::collections::VecDeque;

use chrono::NaiveDate;
use gloo_storage::Storage as GlooStorage;
use ::log::error;

use vigor_domain as domain;
use vigor_web_app::{Settings, SettingsRepository, log};

const KEY_PLANS: &str = "plans";
const KEY_PROGRESS: &str = "progress";
pub(crate) const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

pub struct LocalStorage;

impl domain::PlanRepository for LocalStorage {
    async fn read_plans(&self) -> Result<Vec<domain::SavedPlan>, domain::ReadError> {
        Ok(read_plans())
    }

    async fn create_plan(
        &self,
        plan: domain::SavedPlan,
    ) -> Result<domain::SavedPlan, domain::CreateError> {
        let mut plans = read_plans();
        if plans.iter().any(|p| p.id == plan.id) {
            return Err(domain::CreateError::Conflict);
        }
        plans.push(plan.clone());
        write_plans(&plans).map_err(domain::CreateError::Storage)?;
        Ok(plan)
    }

    async fn replace_plan(
        &self,
        plan: domain::SavedPlan,
    ) -> Result<domain::SavedPlan, domain::UpdateError> {
        let mut plans = read_plans();
        let Some(stored) = plans.iter_mut().find(|p| p.id == plan.id) else {
            return Err(domain::UpdateError::NotFound);
        };
        *stored = plan.clone();
        write_plans(&plans).map_err(domain::UpdateError::Storage)?;
        Ok(plan)
    }

    async fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        let mut plans = read_plans();
        plans.retain(|p| p.id != id);
        write_plans(&plans).map_err(domain::DeleteError::Storage)?;
        Ok(id)
    }
}

impl domain::ProgressRepository for LocalStorage {
    async fn read_progress(&self) -> Result<Vec<domain::ProgressEntry>, domain::ReadError> {
        Ok(read_progress())
    }

    async fn create_progress_entry(
        &self,
        entry: domain::ProgressEntry,
    ) -> Result<domain::ProgressEntry, domain::CreateError> {
        let mut entries = read_progress();
        entries.retain(|e| e.date != entry.date);
        entries.push(entry.clone());
        entries.sort_by_key(|e| e.date);
        write_progress(&entries).map_err(domain::CreateError::Storage)?;
        Ok(entry)
    }

    async fn delete_progress_entry(
        &self,
        date: NaiveDate,
    ) -> Result<NaiveDate, domain::DeleteError> {
        let mut entries = read_progress();
        entries.retain(|e| e.date != date);
        write_progress(&entries).map_err(domain::DeleteError::Storage)?;
        Ok(date)
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        Ok(read_or_reset(KEY_SETTINGS))
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

fn read_plans() -> Vec<domain::SavedPlan> {
    let models: Vec<model::SavedPlan> = read_or_reset(KEY_PLANS);
    match models
        .into_iter()
        .map(domain::SavedPlan::try_from)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(plans) => plans,
        Err(err) => reset(KEY_PLANS, &err),
    }
}

fn write_plans(plans: &[domain::SavedPlan]) -> Result<(), domain::StorageError> {
    write(
        KEY_PLANS,
        plans.iter().map(model::SavedPlan::from).collect::<Vec<_>>(),
    )
}

fn read_progress() -> Vec<domain::ProgressEntry> {
    let models: Vec<model::ProgressEntry> = read_or_reset(KEY_PROGRESS);
    let mut entries = models
        .into_iter()
        .map(domain::ProgressEntry::from)
        .collect::<Vec<_>>();
    entries.sort_by_key(|e| e.date);
    entries
}

fn write_progress(entries: &[domain::ProgressEntry]) -> Result<(), domain::StorageError> {
    write(
        KEY_PROGRESS,
        entries
            .iter()
            .map(model::ProgressEntry::from)
            .collect::<Vec<_>>(),
    )
}

fn read_or_reset<T>(key: &str) -> T
where
    T: Default + for<'de> serde::Deserialize<'de>,
{
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => value,
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => T::default(),
        Err(err) => reset(key, &err),
    }
}

fn reset<T: Default>(key: &str, err: &dyn std::fmt::Display) -> T {
    error!("clearing local storage after failing to decode {key}: {err}");
    gloo_storage::LocalStorage::clear();
    T::default()
}

fn write<T: serde::Serialize>(key: &str, value: T) -> Result<(), domain::StorageError> {
    gloo_storage::LocalStorage::set(key, value)
        .map_err(|err| domain::StorageError::Other(err.to_string().into()))
}

mod model {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use vigor_domain as domain;

    #[derive(thiserror::Error, Debug)]
    #[error("{0}")]
    pub struct DecodeError(String);

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct SavedPlan {
        pub id: Uuid,
        pub name: String,
        pub created: DateTime<Utc>,
        pub profile: UserProfile,
        pub plan: FitnessPlan,
    }

    impl From<&domain::SavedPlan> for SavedPlan {
        fn from(value: &domain::SavedPlan) -> Self {
            Self {
                id: *value.id,
                name: value.name.as_ref().clone(),
                created: value.created,
                profile: UserProfile::from(&value.profile),
                plan: FitnessPlan::from(&value.plan),
            }
        }
    }

    impl TryFrom<SavedPlan> for domain::SavedPlan {
        type Error = DecodeError;

        fn try_from(value: SavedPlan) -> Result<Self, Self::Error> {
            Ok(Self {
                id: value.id.into(),
                name: domain::Name::new(&value.name)
                    .map_err(|err| DecodeError(err.to_string()))?,
                created: value.created,
                profile: domain::UserProfile::try_from(value.profile)?,
                plan: value.plan.into(),
            })
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct UserProfile {
        pub age: u8,
        pub gender: String,
        pub weight: f32,
        pub height: u16,
        pub goal: String,
        pub activity_level: String,
        pub workout_days: u8,
        pub dietary_restrictions: String,
        pub available_equipment: String,
        pub workout_style: String,
        pub disliked_exercises: String,
        pub target_calories: Option<u32>,
        pub target_protein: Option<u32>,
        pub target_carbs: Option<u32>,
        pub target_fat: Option<u32>,
    }

    impl From<&domain::UserProfile> for UserProfile {
        fn from(value: &domain::UserProfile) -> Self {
            Self {
                age: value.age,
                gender: value.gender.to_string(),
                weight: value.weight,
                height: value.height,
                goal: value.goal.to_string(),
                activity_level: value.activity_level.to_string(),
                workout_days: value.workout_days,
                dietary_restrictions: value.dietary_restrictions.clone(),
                available_equipment: value.available_equipment.clone(),
                workout_style: value.workout_style.to_string(),
                disliked_exercises: value.disliked_exercises.clone(),
                target_calories: value.target_calories,
                target_protein: value.target_protein,
                target_carbs: value.target_carbs,
                target_fat: value.target_fat,
            }
        }
    }

    impl TryFrom<UserProfile> for domain::UserProfile {
        type Error = DecodeError;

        fn try_from(value: UserProfile) -> Result<Self, Self::Error> {
            Ok(Self {
                age: value.age,
                gender: parse(&value.gender, "gender")?,
                weight: value.weight,
                height: value.height,
                goal: parse(&value.goal, "goal")?,
                activity_level: parse(&value.activity_level, "activity level")?,
                workout_days: value.workout_days,
                dietary_restrictions: value.dietary_restrictions,
                available_equipment: value.available_equipment,
                workout_style: parse(&value.workout_style, "workout style")?,
                disliked_exercises: value.disliked_exercises,
                target_calories: value.target_calories,
                target_protein: value.target_protein,
                target_carbs: value.target_carbs,
                target_fat: value.target_fat,
            })
        }
    }

    fn parse<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, DecodeError> {
        value
            .parse()
            .map_err(|_| DecodeError(format!("unknown {what}: {value}")))
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct FitnessPlan {
        pub workout: Vec<WorkoutDay>,
        pub meals: DailyMeals,
        pub tips: Vec<ProTip>,
    }

    impl From<&domain::FitnessPlan> for FitnessPlan {
        fn from(value: &domain::FitnessPlan) -> Self {
            Self {
                workout: value.workout.iter().map(WorkoutDay::from).collect(),
                meals: DailyMeals::from(&value.meals),
                tips: value.tips.iter().map(ProTip::from).collect(),
            }
        }
    }

    impl From<FitnessPlan> for domain::FitnessPlan {
        fn from(value: FitnessPlan) -> Self {
            Self {
                workout: value.workout.into_iter().map(Into::into).collect(),
                meals: value.meals.into(),
                tips: value.tips.into_iter().map(Into::into).collect(),
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct WorkoutDay {
        pub day: String,
        pub focus: String,
        pub warmup: String,
        pub exercises: Vec<Exercise>,
        pub cooldown: String,
    }

    impl From<&domain::WorkoutDay> for WorkoutDay {
        fn from(value: &domain::WorkoutDay) -> Self {
            Self {
                day: value.day.clone(),
                focus: value.focus.clone(),
                warmup: value.warmup.clone(),
                exercises: value.exercises.iter().map(Exercise::from).collect(),
                cooldown: value.cooldown.clone(),
            }
        }
    }

    impl From<WorkoutDay> for domain::WorkoutDay {
        fn from(value: WorkoutDay) -> Self {
            Self {
                day: value.day,
                focus: value.focus,
                warmup: value.warmup,
                exercises: value.exercises.into_iter().map(Into::into).collect(),
                cooldown: value.cooldown,
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct Exercise {
        pub name: String,
        pub sets: String,
        pub reps: String,
        pub rest: String,
        pub technique_focus: Option<String>,
        pub tutorial_query: String,
    }

    impl From<&domain::Exercise> for Exercise {
        fn from(value: &domain::Exercise) -> Self {
            Self {
                name: value.name.clone(),
                sets: value.sets.clone(),
                reps: value.reps.clone(),
                rest: value.rest.clone(),
                technique_focus: value.technique_focus.clone(),
                tutorial_query: value.tutorial_query.clone(),
            }
        }
    }

    impl From<Exercise> for domain::Exercise {
        fn from(value: Exercise) -> Self {
            Self {
                name: value.name,
                sets: value.sets,
                reps: value.reps,
                rest: value.rest,
                technique_focus: value.technique_focus,
                tutorial_query: value.tutorial_query,
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct DailyMeals {
        pub breakfast: Meal,
        pub lunch: Meal,
        pub dinner: Meal,
        pub snack: Option<Meal>,
        pub post_workout_snack: Option<Meal>,
        pub total_calories: u32,
        pub total_protein: u32,
        pub total_carbs: u32,
        pub total_fat: u32,
        pub hydration: String,
        pub supplements: String,
    }

    impl From<&domain::DailyMeals> for DailyMeals {
        fn from(value: &domain::DailyMeals) -> Self {
            Self {
                breakfast: Meal::from(&value.breakfast),
                lunch: Meal::from(&value.lunch),
                dinner: Meal::from(&value.dinner),
                snack: value.snack.as_ref().map(Meal::from),
                post_workout_snack: value.post_workout_snack.as_ref().map(Meal::from),
                total_calories: value.total_calories,
                total_protein: value.total_protein,
                total_carbs: value.total_carbs,
                total_fat: value.total_fat,
                hydration: value.hydration.clone(),
                supplements: value.supplements.clone(),
            }
        }
    }

    impl From<DailyMeals> for domain::DailyMeals {
        fn from(value: DailyMeals) -> Self {
            Self {
                breakfast: value.breakfast.into(),
                lunch: value.lunch.into(),
                dinner: value.dinner.into(),
                snack: value.snack.map(Into::into),
                post_workout_snack: value.post_workout_snack.map(Into::into),
                total_calories: value.total_calories,
                total_protein: value.total_protein,
                total_carbs: value.total_carbs,
                total_fat: value.total_fat,
                hydration: value.hydration,
                supplements: value.supplements,
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct Meal {
        pub name: String,
        pub description: Option<String>,
        pub calories: u32,
        pub protein: u32,
        pub carbs: u32,
        pub fat: u32,
    }

    impl From<&domain::Meal> for Meal {
        fn from(value: &domain::Meal) -> Self {
            Self {
                name: value.name.clone(),
                description: value.description.clone(),
                calories: value.calories,
                protein: value.protein,
                carbs: value.carbs,
                fat: value.fat,
            }
        }
    }

    impl From<Meal> for domain::Meal {
        fn from(value: Meal) -> Self {
            Self {
                name: value.name,
                description: value.description,
                calories: value.calories,
                protein: value.protein,
                carbs: value.carbs,
                fat: value.fat,
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct ProTip {
        pub title: String,
        pub description: String,
    }

    impl From<&domain::ProTip> for ProTip {
        fn from(value: &domain::ProTip) -> Self {
            Self {
                title: value.title.clone(),
                description: value.description.clone(),
            }
        }
    }

    impl From<ProTip> for domain::ProTip {
        fn from(value: ProTip) -> Self {
            Self {
                title: value.title,
                description: value.description,
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct ProgressEntry {
        pub date: NaiveDate,
        pub weight: f32,
        pub waist: Option<f32>,
        pub chest: Option<f32>,
        pub hips: Option<f32>,
    }

    impl From<&domain::ProgressEntry> for ProgressEntry {
        fn from(value: &domain::ProgressEntry) -> Self {
            Self {
                date: value.date,
                weight: value.weight,
                waist: value.waist,
                chest: value.chest,
                hips: value.hips,
            }
        }
    }

    impl From<ProgressEntry> for domain::ProgressEntry {
        fn from(value: ProgressEntry) -> Self {
            Self {
                date: value.date,
                weight: value.weight,
                waist: value.waist,
                chest: value.chest,
                hips: value.hips,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use pretty_assertions::assert_eq;

        use super::*;

        #[test]
        fn test_profile_model_round_trip() {
            let profile = domain::UserProfile {
                gender: domain::Gender::Unspecified,
                goal: domain::FitnessGoal::Endurance,
                workout_style: domain::WorkoutStyle::Bodyweight,
                target_calories: Some(2500),
                ..domain::UserProfile::default()
            };
            assert_eq!(
                domain::UserProfile::try_from(UserProfile::from(&profile)).unwrap(),
                profile
            );
        }

        #[test]
        fn test_profile_model_with_unknown_goal() {
            let mut model = UserProfile::from(&domain::UserProfile::default());
            model.goal = "Get swole".to_string();
            assert!(domain::UserProfile::try_from(model).is_err());
        }

        #[test]
        fn test_saved_plan_model_with_invalid_name() {
            let plan = SavedPlan {
                id: Uuid::nil(),
                name: String::new(),
                created: DateTime::<Utc>::MIN_UTC,
                profile: UserProfile::from(&domain::UserProfile::default()),
                plan: FitnessPlan {
                    workout: vec![],
                    meals: DailyMeals {
                        breakfast: placeholder_meal(),
                        lunch: placeholder_meal(),
                        dinner: placeholder_meal(),
                        snack: None,
                        post_workout_snack: None,
                        total_calories: 0,
                        total_protein: 0,
                        total_carbs: 0,
                        total_fat: 0,
                        hydration: String::new(),
                        supplements: String::new(),
                    },
                    tips: vec![],
                },
            };
            assert!(domain::SavedPlan::try_from(plan).is_err());
        }

        fn placeholder_meal() -> Meal {
            Meal {
                name: String::new(),
                description: None,
                calories: 0,
                protein: 0,
                carbs: 0,
                fat: 0,
            }
        }
    }
}
