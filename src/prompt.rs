use crate::models::UserProfile;

const OUTPUT_RULES: &str = "You MUST return ONLY valid JSON.
Do NOT include code fences.
Do NOT include markdown.
Do NOT add extra fields.
Do NOT change the schema.";

const OUTPUT_SHAPE: &str = r#"{
  "metadata": {
    "userName": "string",
    "goal": "string",
    "generatedAt": "ISO-8601 timestamp"
  },
  "workoutPlan": [
    {
      "day": "string",
      "exercises": [
        {
          "name": "string",
          "sets": 3,
          "reps": "string",
          "rest": "string",
          "notes": "string"
        }
      ]
    }
  ],
  "dietPlan": {
    "breakfast": ["string"],
    "lunch": ["string"],
    "dinner": ["string"],
    "snacks": ["string"]
  },
  "tips": ["string"]
}"#;

const CARDINALITY_RULES: &str = "RULES:
- ALWAYS return exactly 7 workoutPlan days, Monday to Sunday in order.
- ALWAYS return an array of exercises for each day.
- ALWAYS return breakfast, lunch, dinner and snacks as arrays of strings, or empty arrays.
- ALWAYS return tips as a simple array of strings.
- metadata.userName is the user's name and metadata.goal is the user's goal.
- NEVER add keys that are not in the structure above.
- NEVER invent extra objects or nesting.
- If unsure about any field, return empty strings or empty arrays.";

/// Renders the strict-schema instruction text for the live plan provider.
pub fn build_prompt(profile: &UserProfile) -> String {
    format!(
        "{OUTPUT_RULES}\n\n\
         OUTPUT MUST FOLLOW THIS EXACT STRUCTURE:\n\n\
         {OUTPUT_SHAPE}\n\n\
         {CARDINALITY_RULES}\n\n\
         User Info:\n\
         Name: {}\n\
         Age: {}\n\
         Gender: {}\n\
         Height: {}\n\
         Weight: {}\n\
         Goal: {}\n\
         Level: {}\n\
         Location: {}\n\
         Diet: {}\n\
         Extras: {}\n",
        profile.name,
        profile.age,
        profile.gender,
        profile.height,
        profile.weight,
        profile.goal,
        profile.level,
        profile.location,
        profile.diet,
        profile.extras,
    )
}
