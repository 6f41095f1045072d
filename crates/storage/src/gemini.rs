//! Gemini REST client.
//!
//! Plan, variation and search requests go to the text-generation endpoint,
//! exercise images to the image-generation endpoint. The API key is taken
//! from the persisted settings.

use gloo_net::http::Request;
use gloo_storage::Storage as GlooStorage;
use serde_json::{Value, json};

use vigor_domain as domain;
use vigor_web_app::Settings;

use crate::local_storage::KEY_SETTINGS;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEXT_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "imagen-4.0-generate-001";

pub struct Gemini;

impl domain::CoachRepository for Gemini {
    async fn generate_plan(
        &self,
        profile: &domain::UserProfile,
    ) -> Result<domain::FitnessPlan, domain::GenerateError> {
        let response = generate_content(&json!({
            "contents": [{"parts": [{"text": plan_prompt(profile)}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": plan_schema(),
                "thinkingConfig": {"thinkingBudget": 0},
            },
        }))
        .await?;
        parse_plan(&response_text(&response)?)
    }

    async fn generate_exercise_image(
        &self,
        exercise: &str,
    ) -> Result<domain::ExerciseImage, domain::GenerateError> {
        let response = fetch(
            &format!("{BASE_URL}/{IMAGE_MODEL}:predict"),
            &json!({
                "instances": [{"prompt": image_prompt(exercise)}],
                "parameters": {
                    "sampleCount": 1,
                    "aspectRatio": "1:1",
                    "outputMimeType": "image/png",
                },
            }),
        )
        .await?;
        parse_image(&response)
    }

    async fn read_exercise_variations(
        &self,
        exercise: &str,
        goal: domain::FitnessGoal,
        style: domain::WorkoutStyle,
    ) -> Result<Vec<domain::ExerciseVariation>, domain::GenerateError> {
        let response = generate_content(&json!({
            "contents": [{"parts": [{"text": variations_prompt(exercise, goal, style)}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": variations_schema(),
                "thinkingConfig": {"thinkingBudget": 0},
            },
        }))
        .await?;
        parse_variations(&response_text(&response)?)
    }

    async fn search(&self, query: &str) -> Result<domain::SearchAnswer, domain::GenerateError> {
        let response = generate_content(&json!({
            "contents": [{"parts": [{"text": format!(
                "Answer the following fitness-related question based on Google Search results: \"{query}\""
            )}]}],
            "tools": [{"googleSearch": {}}],
        }))
        .await?;
        Ok(parse_search(&response))
    }
}

async fn generate_content(body: &Value) -> Result<Value, domain::GenerateError> {
    fetch(&format!("{BASE_URL}/{TEXT_MODEL}:generateContent"), body).await
}

async fn fetch(url: &str, body: &Value) -> Result<Value, domain::GenerateError> {
    let request = Request::post(url)
        .header("x-goog-api-key", &api_key()?)
        .json(body)
        .map_err(|err| {
            domain::GenerateError::Other(format!("serialization failed: {err:?}").into())
        })?;

    match request.send().await {
        Ok(response) => {
            if response.ok() {
                response.json::<Value>().await.map_err(|err| {
                    domain::GenerateError::Other(format!("deserialization failed: {err:?}").into())
                })
            } else if response.status() == 429 {
                Err(domain::GenerateError::RateLimited)
            } else {
                let text = response.text().await.unwrap_or_default();
                Err(domain::GenerateError::classify(&format!(
                    "{} {} {text}",
                    response.status(),
                    response.status_text()
                )))
            }
        }
        Err(_) => Err(domain::GenerateError::NoConnection),
    }
}

fn api_key() -> Result<String, domain::GenerateError> {
    let settings =
        gloo_storage::LocalStorage::get::<Settings>(KEY_SETTINGS).unwrap_or_default();
    if settings.api_key.trim().is_empty() {
        return Err(domain::GenerateError::Other(
            "No API key configured. Add one on the settings page.".into(),
        ));
    }
    Ok(settings.api_key)
}

fn plan_prompt(profile: &domain::UserProfile) -> String {
    let mut custom_targets = String::new();
    for (label, target) in [
        ("Calorie", profile.target_calories.map(|t| format!("{t} kcal"))),
        ("Protein", profile.target_protein.map(|t| format!("{t} g"))),
        ("Carbs", profile.target_carbs.map(|t| format!("{t} g"))),
        ("Fat", profile.target_fat.map(|t| format!("{t} g"))),
    ] {
        if let Some(target) = target {
            custom_targets += &format!("- Daily {label} Target: {target}\n");
        }
    }
    if !custom_targets.is_empty() {
        custom_targets = format!("Custom Nutrition Targets:\n{custom_targets}");
    }

    format!(
        "You are an expert fitness and nutrition coach. Based on the following user profile, \
         create a comprehensive and personalized weekly workout plan, a daily meal plan, and a \
         set of professional tips.\n\
         User Profile:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Weight: {weight} kg\n\
         - Height: {height} cm\n\
         - Main Goal: {goal}\n\
         - Activity Level: {activity_level}\n\
         - Workout Days Per Week: {workout_days}\n\
         - Available Equipment: {equipment}\n\
         - Dietary Restrictions: {diet}\n\
         - Preferred Workout Style: {style}\n\
         - Disliked Exercises to Avoid: {disliked}\n\
         {custom_targets}\n\
         Instructions:\n\
         1. Workout Plan: Create a plan for the specified number of workout days that aligns \
         with the preferred workout style. You MUST NOT include any of the disliked exercises; \
         find suitable alternatives if necessary. For each day, provide a focus, a brief warmup \
         routine, a list of exercises and a cooldown routine. For each exercise, provide name, \
         sets, reps, rest, a concise technique tip and a simple YouTube search query for an \
         instructional video. The exercises must be appropriate for the available equipment.\n\
         2. Meal Plan: Design a single day's meal plan that aligns with the user's goal. If \
         custom daily targets are provided above, the meal plan MUST meet them precisely; \
         otherwise calculate appropriate targets yourself. Provide breakfast, lunch, dinner and \
         one snack. If the goal is 'Muscle Gain' or 'Improve Endurance', or the activity level \
         is 'Very Active' or 'Extra Active', include a post-workout snack rich in protein and \
         carbohydrates. Ensure the totals reflect ALL included meals. Include hydration goals \
         and supplement suggestions.\n\
         3. Pro Tips: Provide 3-4 high-level, actionable tips, each with a title and a \
         description, tailored to the user's goal.\n\
         4. Response Format: Your response MUST be a valid JSON object that strictly adheres to \
         the provided schema. Do not include any text or markdown formatting outside of the \
         JSON object.",
        age = profile.age,
        gender = profile.gender,
        weight = profile.weight,
        height = profile.height,
        goal = profile.goal,
        activity_level = profile.activity_level,
        workout_days = profile.workout_days,
        equipment = profile.available_equipment,
        diet = or_none(&profile.dietary_restrictions),
        style = profile.workout_style,
        disliked = or_none(&profile.disliked_exercises),
    )
}

fn image_prompt(exercise: &str) -> String {
    format!(
        "Generate a clean, photorealistic image of a person (gender-neutral) correctly \
         performing the '{exercise}' exercise. The image should clearly demonstrate proper form \
         and technique. Use a simple, minimalist background to keep the focus on the exercise \
         itself. The image should be well-lit and have a professional, instructional quality. \
         Avoid any text or overlays on the image. Style: photorealistic, high-detail, fitness \
         photography."
    )
}

fn variations_prompt(
    exercise: &str,
    goal: domain::FitnessGoal,
    style: domain::WorkoutStyle,
) -> String {
    format!(
        "You are an expert fitness coach. A user is looking for variations of the exercise \
         \"{exercise}\". Their primary fitness goal is \"{goal}\" and their preferred workout \
         style is \"{style}\". Provide 3-4 suitable variations that fit this goal and style. \
         For each variation, provide a clear name and a concise description explaining why it \
         is a good alternative and how it differs from the original. Your response MUST be a \
         valid JSON object that strictly adheres to the provided schema. Do not include any \
         text outside the JSON object."
    )
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() { "None" } else { value }
}

fn meal_schema(description_required: bool) -> Value {
    let mut required = vec!["name", "calories", "protein", "carbs", "fat"];
    if description_required {
        required.push("description");
    }
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "description": {"type": "STRING"},
            "calories": {"type": "NUMBER"},
            "protein": {"type": "NUMBER"},
            "carbs": {"type": "NUMBER"},
            "fat": {"type": "NUMBER"},
        },
        "required": required,
    })
}

fn plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "workoutPlan": {
                "type": "ARRAY",
                "description": "A detailed weekly workout plan.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": {"type": "STRING", "description": "e.g. 'Monday' or 'Day 1'"},
                        "focus": {"type": "STRING", "description": "e.g. 'Chest & Triceps'"},
                        "warmup": {"type": "STRING"},
                        "exercises": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": {"type": "STRING"},
                                    "sets": {"type": "STRING"},
                                    "reps": {"type": "STRING"},
                                    "rest": {"type": "STRING"},
                                    "techniqueFocus": {"type": "STRING"},
                                    "youtubeSearchQuery": {"type": "STRING"},
                                },
                                "required": ["name", "sets", "reps", "rest", "youtubeSearchQuery"],
                            },
                        },
                        "cooldown": {"type": "STRING"},
                    },
                    "required": ["day", "focus", "warmup", "exercises", "cooldown"],
                },
            },
            "mealPlan": {
                "type": "OBJECT",
                "description": "A daily meal plan with macronutrient breakdown.",
                "properties": {
                    "breakfast": meal_schema(true),
                    "lunch": meal_schema(true),
                    "dinner": meal_schema(true),
                    "snack": meal_schema(false),
                    "postWorkoutSnack": meal_schema(false),
                    "totalCalories": {"type": "NUMBER"},
                    "totalProtein": {"type": "NUMBER"},
                    "totalCarbs": {"type": "NUMBER"},
                    "totalFat": {"type": "NUMBER"},
                    "hydration": {"type": "STRING"},
                    "supplementSuggestions": {"type": "STRING"},
                },
                "required": [
                    "breakfast", "lunch", "dinner", "totalCalories", "totalProtein",
                    "totalCarbs", "totalFat", "hydration", "supplementSuggestions",
                ],
            },
            "proTips": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "description": {"type": "STRING"},
                    },
                    "required": ["title", "description"],
                },
            },
        },
        "required": ["workoutPlan", "mealPlan", "proTips"],
    })
}

fn variations_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "variations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "description": {"type": "STRING"},
                    },
                    "required": ["name", "description"],
                },
            },
        },
        "required": ["variations"],
    })
}

fn response_text(response: &Value) -> Result<String, domain::GenerateError> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| domain::GenerateError::Other("no text in response".into()))
}

fn parse_plan(text: &str) -> Result<domain::FitnessPlan, domain::GenerateError> {
    let plan: model::FitnessPlan = serde_json::from_str(text.trim())
        .map_err(|err| domain::GenerateError::Other(format!("malformed plan: {err}").into()))?;
    Ok(plan.into())
}

fn parse_variations(text: &str) -> Result<Vec<domain::ExerciseVariation>, domain::GenerateError> {
    let variations: model::Variations = serde_json::from_str(text.trim()).map_err(|err| {
        domain::GenerateError::Other(format!("malformed variations: {err}").into())
    })?;
    Ok(variations
        .variations
        .into_iter()
        .map(Into::into)
        .collect())
}

fn parse_image(response: &Value) -> Result<domain::ExerciseImage, domain::GenerateError> {
    response["predictions"][0]["bytesBase64Encoded"]
        .as_str()
        .map(domain::ExerciseImage::from_base64_png)
        .ok_or_else(|| domain::GenerateError::Other("no image data returned".into()))
}

fn parse_search(response: &Value) -> domain::SearchAnswer {
    let answer = response_text(response).unwrap_or_default();
    let sources = response["candidates"][0]["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    Some(domain::SearchSource {
                        uri: chunk["web"]["uri"].as_str()?.to_string(),
                        title: chunk["web"]["title"].as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    domain::SearchAnswer { answer, sources }
}

mod model {
    use serde::Deserialize;

    use vigor_domain as domain;

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct FitnessPlan {
        pub workout_plan: Vec<WorkoutDay>,
        pub meal_plan: DailyMeals,
        pub pro_tips: Vec<ProTip>,
    }

    impl From<FitnessPlan> for domain::FitnessPlan {
        fn from(value: FitnessPlan) -> Self {
            Self {
                workout: value.workout_plan.into_iter().map(Into::into).collect(),
                meals: value.meal_plan.into(),
                tips: value.pro_tips.into_iter().map(Into::into).collect(),
            }
        }
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct WorkoutDay {
        pub day: String,
        pub focus: String,
        pub warmup: String,
        pub exercises: Vec<Exercise>,
        pub cooldown: String,
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

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct Exercise {
        pub name: String,
        pub sets: String,
        pub reps: String,
        pub rest: String,
        pub technique_focus: Option<String>,
        pub youtube_search_query: String,
    }

    impl From<Exercise> for domain::Exercise {
        fn from(value: Exercise) -> Self {
            Self {
                name: value.name,
                sets: value.sets,
                reps: value.reps,
                rest: value.rest,
                technique_focus: value.technique_focus,
                tutorial_query: value.youtube_search_query,
            }
        }
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct DailyMeals {
        pub breakfast: Meal,
        pub lunch: Meal,
        pub dinner: Meal,
        pub snack: Option<Meal>,
        pub post_workout_snack: Option<Meal>,
        pub total_calories: f64,
        pub total_protein: f64,
        pub total_carbs: f64,
        pub total_fat: f64,
        pub hydration: String,
        pub supplement_suggestions: String,
    }

    impl From<DailyMeals> for domain::DailyMeals {
        fn from(value: DailyMeals) -> Self {
            Self {
                breakfast: value.breakfast.into(),
                lunch: value.lunch.into(),
                dinner: value.dinner.into(),
                snack: value.snack.map(Into::into),
                post_workout_snack: value.post_workout_snack.map(Into::into),
                total_calories: round(value.total_calories),
                total_protein: round(value.total_protein),
                total_carbs: round(value.total_carbs),
                total_fat: round(value.total_fat),
                hydration: value.hydration,
                supplements: value.supplement_suggestions,
            }
        }
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Meal {
        pub name: String,
        pub description: Option<String>,
        pub calories: f64,
        pub protein: f64,
        pub carbs: f64,
        pub fat: f64,
    }

    impl From<Meal> for domain::Meal {
        fn from(value: Meal) -> Self {
            Self {
                name: value.name,
                description: value.description,
                calories: round(value.calories),
                protein: round(value.protein),
                carbs: round(value.carbs),
                fat: round(value.fat),
            }
        }
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct ProTip {
        pub title: String,
        pub description: String,
    }

    impl From<ProTip> for domain::ProTip {
        fn from(value: ProTip) -> Self {
            Self {
                title: value.title,
                description: value.description,
            }
        }
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Variations {
        pub variations: Vec<Variation>,
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Variation {
        pub name: String,
        pub description: String,
    }

    impl From<Variation> for domain::ExerciseVariation {
        fn from(value: Variation) -> Self {
            Self {
                name: value.name,
                description: value.description,
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn round(value: f64) -> u32 {
        value.round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_plan() {
        let text = json!({
            "workoutPlan": [{
                "day": "Monday",
                "focus": "Full Body",
                "warmup": "5 minutes of light cardio",
                "exercises": [{
                    "name": "Goblet Squat",
                    "sets": "3",
                    "reps": "8-12",
                    "rest": "90 seconds",
                    "techniqueFocus": "Keep the chest up",
                    "youtubeSearchQuery": "how to do goblet squat"
                }],
                "cooldown": "Stretch for 5 minutes"
            }],
            "mealPlan": {
                "breakfast": {
                    "name": "Oatmeal",
                    "description": "Oats with berries",
                    "calories": 420.4,
                    "protein": 18.0,
                    "carbs": 60.0,
                    "fat": 12.0
                },
                "lunch": {
                    "name": "Chicken bowl",
                    "description": "Rice, chicken, vegetables",
                    "calories": 650.0,
                    "protein": 45.0,
                    "carbs": 70.0,
                    "fat": 18.0
                },
                "dinner": {
                    "name": "Salmon and potatoes",
                    "description": "Baked salmon",
                    "calories": 600.0,
                    "protein": 40.0,
                    "carbs": 50.0,
                    "fat": 22.0
                },
                "snack": {
                    "name": "Greek yogurt",
                    "calories": 150.0,
                    "protein": 15.0,
                    "carbs": 10.0,
                    "fat": 5.0
                },
                "totalCalories": 1820.4,
                "totalProtein": 118.0,
                "totalCarbs": 190.0,
                "totalFat": 57.0,
                "hydration": "Aim for 3 liters of water",
                "supplementSuggestions": "Consider creatine monohydrate"
            },
            "proTips": [{
                "title": "Progressive overload",
                "description": "Increase the weight gradually."
            }]
        })
        .to_string();

        let plan = parse_plan(&text).unwrap();
        assert_eq!(plan.workout.len(), 1);
        assert_eq!(plan.workout[0].exercises[0].name, "Goblet Squat");
        assert_eq!(
            plan.workout[0].exercises[0].tutorial_query,
            "how to do goblet squat"
        );
        assert_eq!(plan.meals.total_calories, 1820);
        assert_eq!(plan.meals.snack.as_ref().unwrap().description, None);
        assert_eq!(plan.meals.post_workout_snack, None);
        assert_eq!(plan.tips[0].title, "Progressive overload");
    }

    #[test]
    fn test_parse_plan_with_malformed_payload() {
        assert!(parse_plan("not json").is_err());
        assert!(parse_plan("{}").is_err());
    }

    #[test]
    fn test_parse_image() {
        let response = json!({"predictions": [{"bytesBase64Encoded": "AAAA"}]});
        assert_eq!(
            parse_image(&response).unwrap().url(),
            "data:image/png;base64,AAAA"
        );
        assert!(parse_image(&json!({"predictions": []})).is_err());
    }

    #[test]
    fn test_parse_search() {
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": "Roughly 1.6 to 2.2 g per kg of body weight."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://example.org/protein", "title": "Protein intake"}},
                        {"web": {"uri": "https://example.org/no-title"}},
                    ]
                }
            }]
        });
        let result = parse_search(&response);
        assert_eq!(result.answer, "Roughly 1.6 to 2.2 g per kg of body weight.");
        assert_eq!(
            result.sources,
            vec![domain::SearchSource {
                uri: "https://example.org/protein".to_string(),
                title: "Protein intake".to_string(),
            }]
        );
    }

    #[test]
    fn test_plan_prompt_contains_profile_and_constraints() {
        let profile = domain::UserProfile {
            disliked_exercises: "Burpees".to_string(),
            target_calories: Some(2500),
            ..domain::UserProfile::default()
        };
        let prompt = plan_prompt(&profile);
        assert!(prompt.contains("- Age: 25"));
        assert!(prompt.contains("- Main Goal: Muscle Gain"));
        assert!(prompt.contains("- Disliked Exercises to Avoid: Burpees"));
        assert!(prompt.contains("- Daily Calorie Target: 2500 kcal"));
        assert!(prompt.contains("- Dietary Restrictions: None"));
    }

    #[test]
    fn test_plan_prompt_without_custom_targets() {
        let prompt = plan_prompt(&domain::UserProfile::default());
        assert!(!prompt.contains("Custom Nutrition Targets"));
    }
}
