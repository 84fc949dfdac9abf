use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Number of workout days every plan carries, Monday through Sunday.
pub const DAYS_PER_PLAN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Training goal. Labels outside the known set are kept verbatim so the
/// prompt still sees what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    GeneralHealth,
    Other(String),
}

impl Goal {
    pub fn label(&self) -> &str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Endurance => "Endurance",
            Goal::Flexibility => "Flexibility",
            Goal::GeneralHealth => "General Health",
            Goal::Other(label) => label,
        }
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Weight Loss" => Goal::WeightLoss,
            "Muscle Gain" => Goal::MuscleGain,
            "Endurance" => Goal::Endurance,
            "Flexibility" => Goal::Flexibility,
            "General Health" => Goal::GeneralHealth,
            _ => Goal::Other(value),
        }
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        match goal {
            Goal::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Gym,
    Outdoor,
}

impl Location {
    pub fn label(self) -> &'static str {
        match self {
            Location::Home => "Home",
            Location::Gym => "Gym",
            Location::Outdoor => "Outdoor",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dietary preference, same open-ended treatment as [`Goal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Diet {
    Veg,
    NonVeg,
    Vegan,
    Keto,
    Paleo,
    Other(String),
}

impl Diet {
    pub fn label(&self) -> &str {
        match self {
            Diet::Veg => "Veg",
            Diet::NonVeg => "Non-Veg",
            Diet::Vegan => "Vegan",
            Diet::Keto => "Keto",
            Diet::Paleo => "Paleo",
            Diet::Other(label) => label,
        }
    }
}

impl From<String> for Diet {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Veg" => Diet::Veg,
            "Non-Veg" => Diet::NonVeg,
            "Vegan" => Diet::Vegan,
            "Keto" => Diet::Keto,
            "Paleo" => Diet::Paleo,
            _ => Diet::Other(value),
        }
    }
}

impl From<Diet> for String {
    fn from(diet: Diet) -> Self {
        match diet {
            Diet::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form input for one generation request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub gender: Gender,
    pub height: String,
    pub weight: String,
    pub goal: Goal,
    pub level: Level,
    pub location: Location,
    pub diet: Diet,
    #[serde(default)]
    pub extras: String,
}

/// Providers send sets either as any JSON number (`3`, `3.0`, `2.5`) or as
/// free text ("3-4").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sets {
    Number(serde_json::Number),
    Text(String),
}

impl From<u32> for Sets {
    fn from(count: u32) -> Self {
        Sets::Number(count.into())
    }
}

impl fmt::Display for Sets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sets::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
                (Some(u), _, _) => write!(f, "{u}"),
                (None, Some(i), _) => write!(f, "{i}"),
                // f64 Display drops a zero fraction: 3.0 prints as 3.
                (None, None, Some(x)) => write!(f, "{x}"),
                (None, None, None) => write!(f, "{n}"),
            },
            Sets::Text(text) => f.write_str(text),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Exercise {
    pub name: String,
    pub sets: Sets,
    pub reps: String,
    pub rest: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkoutDay {
    pub day: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DietPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanMetadata {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// A complete weekly plan. Built once per request and never edited;
/// regenerating produces a new value.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FitnessPlan {
    #[serde(default)]
    pub metadata: Option<PlanMetadata>,
    pub workout_plan: Vec<WorkoutDay>,
    pub diet_plan: DietPlan,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageRef {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
}
