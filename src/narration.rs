use std::collections::HashSet;

use crate::models::FitnessPlan;

const HIGHLIGHTED_EXERCISES: usize = 5;

/// Spoken summary of a plan, fed to the speech domain.
pub fn narration_script(plan: &FitnessPlan) -> String {
    let meta = plan.metadata.as_ref();
    let name = meta.and_then(|m| m.user_name.as_deref()).filter(|n| !n.is_empty()).unwrap_or("Friend");
    let goal = meta.and_then(|m| m.goal.as_deref()).filter(|g| !g.is_empty()).unwrap_or("fitness");

    let mut seen = HashSet::new();
    let highlights: Vec<&str> = plan
        .workout_plan
        .iter()
        .flat_map(|day| day.exercises.iter().map(|e| e.name.as_str()))
        .filter(|exercise| seen.insert(*exercise))
        .take(HIGHLIGHTED_EXERCISES)
        .collect();

    let diet = &plan.diet_plan;
    let mut script = format!("Hi {name}, welcome to your personalized {goal} plan.\n\n");
    script.push_str("Let's start with your workout routine.\n");
    script.push_str(&format!(
        "Your week focuses on exercises like {}, and more.\n",
        highlights.join(", ")
    ));
    script.push_str("For your nutrition, here is what a typical day looks like:\n");
    script.push_str(&format!("Breakfast: {}.\n", diet.breakfast.join(" or ")));
    script.push_str(&format!("Lunch: {}.\n", diet.lunch.join(" or ")));
    script.push_str(&format!("Dinner: {}.\n", diet.dinner.join(" or ")));
    script.push_str("\nHere are some expert tips for you:\n");
    for tip in &plan.tips {
        script.push_str(tip);
        script.push('\n');
    }
    script.push_str("\nYou've got this! Let's get started.");
    script
}
