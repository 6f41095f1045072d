use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, FitnessGoal, Name, ReadError, UpdateError, UserProfile,
};

#[allow(async_fn_in_trait)]
pub trait PlanService {
    async fn get_plans(&self) -> Result<Vec<SavedPlan>, ReadError>;
    async fn get_plan(&self, id: PlanID) -> Result<SavedPlan, ReadError>;
    async fn create_plan(&self, plan: SavedPlan) -> Result<SavedPlan, CreateError>;
    async fn replace_plan(&self, plan: SavedPlan) -> Result<SavedPlan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    async fn read_plans(&self) -> Result<Vec<SavedPlan>, ReadError>;
    async fn create_plan(&self, plan: SavedPlan) -> Result<SavedPlan, CreateError>;
    async fn replace_plan(&self, plan: SavedPlan) -> Result<SavedPlan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanID(Uuid);

impl PlanID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A generated plan together with the profile it was generated for.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPlan {
    pub id: PlanID,
    pub name: Name,
    pub created: DateTime<Utc>,
    pub profile: UserProfile,
    pub plan: FitnessPlan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitnessPlan {
    pub workout: Vec<WorkoutDay>,
    pub meals: DailyMeals,
    pub tips: Vec<ProTip>,
}

impl FitnessPlan {
    /// The workout scheduled for the given weekday name, falling back to the
    /// first day of the plan. Generated plans label days either by weekday
    /// ("Monday") or by ordinal ("Day 1").
    #[must_use]
    pub fn workout_for_today(&self, weekday: &str) -> Option<&WorkoutDay> {
        self.workout
            .iter()
            .find(|day| day.day.to_lowercase().contains(&weekday.to_lowercase()))
            .or_else(|| self.workout.first())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDay {
    pub day: String,
    pub focus: String,
    pub warmup: String,
    pub exercises: Vec<Exercise>,
    pub cooldown: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub rest: String,
    pub technique_focus: Option<String>,
    pub tutorial_query: String,
}

#[derive(Debug, Clone, PartialEq)]
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

impl DailyMeals {
    /// Caloric contribution of each macronutrient in percent (4 kcal per gram
    /// of protein and carbohydrate, 9 kcal per gram of fat). `None` if all
    /// macro totals are zero.
    #[must_use]
    pub fn macro_split(&self) -> Option<MacroSplit> {
        #[allow(clippy::cast_precision_loss)]
        let (protein, carbs, fat) = (
            (self.total_protein * 4) as f32,
            (self.total_carbs * 4) as f32,
            (self.total_fat * 9) as f32,
        );
        let total = protein + carbs + fat;
        if total <= f32::EPSILON {
            return None;
        }
        Some(MacroSplit {
            protein: protein / total * 100.0,
            carbs: carbs / total * 100.0,
            fat: fat / total * 100.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub name: String,
    pub description: Option<String>,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProTip {
    pub title: String,
    pub description: String,
}

#[must_use]
pub fn default_plan_name(goal: FitnessGoal, date: NaiveDate) -> String {
    format!("{goal} plan - {date}")
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn workout_day(day: &str) -> WorkoutDay {
        WorkoutDay {
            day: day.to_string(),
            focus: String::new(),
            warmup: String::new(),
            exercises: vec![],
            cooldown: String::new(),
        }
    }

    fn meal() -> Meal {
        Meal {
            name: String::new(),
            description: None,
            calories: 0,
            protein: 0,
            carbs: 0,
            fat: 0,
        }
    }

    fn daily_meals(protein: u32, carbs: u32, fat: u32) -> DailyMeals {
        DailyMeals {
            breakfast: meal(),
            lunch: meal(),
            dinner: meal(),
            snack: None,
            post_workout_snack: None,
            total_calories: protein * 4 + carbs * 4 + fat * 9,
            total_protein: protein,
            total_carbs: carbs,
            total_fat: fat,
            hydration: String::new(),
            supplements: String::new(),
        }
    }

    #[rstest]
    #[case::weekday_match(vec!["Monday", "Wednesday", "Friday"], "wednesday", "Wednesday")]
    #[case::embedded_weekday(vec!["Day 1 (Monday)", "Day 2 (Thursday)"], "thursday", "Day 2 (Thursday)")]
    #[case::fallback_to_first(vec!["Day 1", "Day 2"], "sunday", "Day 1")]
    fn test_workout_for_today(
        #[case] days: Vec<&str>,
        #[case] weekday: &str,
        #[case] expected: &str,
    ) {
        let plan = FitnessPlan {
            workout: days.into_iter().map(workout_day).collect(),
            meals: daily_meals(0, 0, 0),
            tips: vec![],
        };
        assert_eq!(plan.workout_for_today(weekday).unwrap().day, expected);
    }

    #[test]
    fn test_workout_for_today_empty_plan() {
        let plan = FitnessPlan {
            workout: vec![],
            meals: daily_meals(0, 0, 0),
            tips: vec![],
        };
        assert_eq!(plan.workout_for_today("monday"), None);
    }

    #[test]
    fn test_macro_split() {
        let split = daily_meals(150, 250, 80).macro_split().unwrap();
        assert_approx_eq!(split.protein, 25.862, 0.001);
        assert_approx_eq!(split.carbs, 43.103, 0.001);
        assert_approx_eq!(split.fat, 31.034, 0.001);
        assert_approx_eq!(split.protein + split.carbs + split.fat, 100.0, 0.001);
    }

    #[test]
    fn test_macro_split_without_macros() {
        assert_eq!(daily_meals(0, 0, 0).macro_split(), None);
    }

    #[test]
    fn test_default_plan_name() {
        assert_eq!(
            default_plan_name(
                FitnessGoal::FatLoss,
                NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
            ),
            "Fat Loss plan - 2024-05-17"
        );
    }

    #[test]
    fn test_plan_id() {
        assert!(PlanID::nil().is_nil());
        assert!(!PlanID::random().is_nil());
        assert_eq!(PlanID::from(0u128), PlanID::nil());
    }
}
