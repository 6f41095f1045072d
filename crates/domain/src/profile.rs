use strum::{Display, EnumIter, EnumString};

use crate::ValidationError;

#[derive(Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    #[strum(to_string = "Male")]
    Male,
    #[strum(to_string = "Female")]
    Female,
    #[strum(to_string = "Prefer not to say")]
    Unspecified,
}

#[derive(Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitnessGoal {
    #[strum(to_string = "Fat Loss")]
    FatLoss,
    #[default]
    #[strum(to_string = "Muscle Gain")]
    MuscleGain,
    #[strum(to_string = "Weight Maintenance")]
    WeightMaintenance,
    #[strum(to_string = "Improve Endurance")]
    Endurance,
}

#[derive(Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    #[strum(to_string = "Sedentary (little or no exercise)")]
    Sedentary,
    #[strum(to_string = "Lightly Active (light exercise/sports 1-3 days/week)")]
    LightlyActive,
    #[default]
    #[strum(to_string = "Moderately Active (moderate exercise/sports 3-5 days/week)")]
    ModeratelyActive,
    #[strum(to_string = "Very Active (hard exercise/sports 6-7 days a week)")]
    VeryActive,
    #[strum(to_string = "Extra Active (very hard exercise/sports & physical job)")]
    ExtraActive,
}

#[derive(Display, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutStyle {
    #[default]
    #[strum(to_string = "Strength Training")]
    Strength,
    #[strum(to_string = "Hypertrophy (Bodybuilding)")]
    Hypertrophy,
    #[strum(to_string = "High-Intensity Interval Training (HIIT)")]
    Hiit,
    #[strum(to_string = "Endurance / Cardio")]
    Endurance,
    #[strum(to_string = "Functional Fitness")]
    Functional,
    #[strum(to_string = "Bodyweight / Calisthenics")]
    Bodyweight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub age: u8,
    pub gender: Gender,
    /// Body weight in kilograms.
    pub weight: f32,
    /// Body height in centimeters.
    pub height: u16,
    pub goal: FitnessGoal,
    pub activity_level: ActivityLevel,
    pub workout_days: u8,
    pub dietary_restrictions: String,
    pub available_equipment: String,
    pub workout_style: WorkoutStyle,
    pub disliked_exercises: String,
    pub target_calories: Option<u32>,
    pub target_protein: Option<u32>,
    pub target_carbs: Option<u32>,
    pub target_fat: Option<u32>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 25,
            gender: Gender::default(),
            weight: 70.0,
            height: 175,
            goal: FitnessGoal::default(),
            activity_level: ActivityLevel::default(),
            workout_days: 4,
            dietary_restrictions: String::new(),
            available_equipment: "Full Gym Access".to_string(),
            workout_style: WorkoutStyle::default(),
            disliked_exercises: String::new(),
            target_calories: None,
            target_protein: None,
            target_carbs: None,
            target_fat: None,
        }
    }
}

impl UserProfile {
    #[must_use]
    pub fn bmi(&self) -> f32 {
        let height_m = f32::from(self.height) / 100.0;
        self.weight / (height_m * height_m)
    }

    pub fn validate_age(age: &str) -> Result<u8, ValidationError> {
        parse_in_range(age, 12, 100, "Age")
    }

    pub fn validate_height(height: &str) -> Result<u16, ValidationError> {
        parse_in_range(height, 100, 250, "Height")
    }

    pub fn validate_workout_days(days: &str) -> Result<u8, ValidationError> {
        parse_in_range(days, 1, 7, "Workout days")
    }

    pub fn validate_weight(weight: &str) -> Result<f32, ValidationError> {
        match weight.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_weight) => {
                if (30.0..=300.0).contains(&parsed_weight) {
                    Ok(parsed_weight)
                } else {
                    Err(ValidationError::Other(
                        "Weight must be between 30 and 300 kg".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Weight must be a decimal number".into(),
            )),
        }
    }

    /// An empty input means no custom target.
    pub fn validate_target(target: &str) -> Result<Option<u32>, ValidationError> {
        if target.trim().is_empty() {
            return Ok(None);
        }
        match target.trim().parse::<u32>() {
            Ok(parsed_target) => Ok(Some(parsed_target)),
            Err(_) => Err(ValidationError::Other(
                "Target must be a whole number".into(),
            )),
        }
    }
}

fn parse_in_range<T>(value: &str, min: T, max: T, what: &str) -> Result<T, ValidationError>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display + Copy,
{
    match value.trim().parse::<T>() {
        Ok(parsed_value) => {
            if parsed_value >= min && parsed_value <= max {
                Ok(parsed_value)
            } else {
                Err(ValidationError::Other(
                    format!("{what} must be between {min} and {max}").into(),
                ))
            }
        }
        Err(_) => Err(ValidationError::Other(
            format!("{what} must be a whole number").into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_bmi() {
        let profile = UserProfile {
            weight: 70.0,
            height: 175,
            ..UserProfile::default()
        };
        assert_approx_eq!(profile.bmi(), 22.857, 0.001);
    }

    #[rstest]
    #[case("25", Ok(25))]
    #[case(" 12 ", Ok(12))]
    #[case("100", Ok(100))]
    #[case("11", Err(()))]
    #[case("101", Err(()))]
    #[case("twenty", Err(()))]
    fn test_validate_age(#[case] age: &str, #[case] expected: Result<u8, ()>) {
        assert_eq!(UserProfile::validate_age(age).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("70.5", Ok(70.5))]
    #[case("70,5", Ok(70.5))]
    #[case("29.9", Err(()))]
    #[case("301", Err(()))]
    #[case("", Err(()))]
    fn test_validate_weight(#[case] weight: &str, #[case] expected: Result<f32, ()>) {
        assert_eq!(UserProfile::validate_weight(weight).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("", Ok(None))]
    #[case("  ", Ok(None))]
    #[case("2500", Ok(Some(2500)))]
    #[case("-1", Err(()))]
    #[case("a lot", Err(()))]
    fn test_validate_target(#[case] target: &str, #[case] expected: Result<Option<u32>, ()>) {
        assert_eq!(UserProfile::validate_target(target).map_err(|_| ()), expected);
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Gender::Unspecified.to_string(), "Prefer not to say");
        assert_eq!(
            Gender::from_str("Prefer not to say").unwrap(),
            Gender::Unspecified
        );
        assert_eq!(FitnessGoal::FatLoss.to_string(), "Fat Loss");
        assert_eq!(
            FitnessGoal::from_str("Fat Loss").unwrap(),
            FitnessGoal::FatLoss
        );
        assert_eq!(
            WorkoutStyle::Hiit.to_string(),
            "High-Intensity Interval Training (HIIT)"
        );
        assert_eq!(
            WorkoutStyle::from_str("High-Intensity Interval Training (HIIT)").unwrap(),
            WorkoutStyle::Hiit
        );
    }
}
