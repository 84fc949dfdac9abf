//! Offline plan generator. Used whenever the plan provider is not
//! configured; always produces a plan with the production shape.

use chrono::{SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    DietPlan, Diet, Exercise, FitnessPlan, Goal, PlanMetadata, Sets, UserProfile, WorkoutDay,
    DAYS_PER_PLAN,
};

pub const EXERCISES_PER_DAY: usize = 3;
pub const ITEMS_PER_MEAL: usize = 2;
pub const TIPS_PER_PLAN: usize = 3;

#[derive(Debug)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub rest: &'static str,
    pub notes: &'static str,
}

impl ExerciseTemplate {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            name: self.name.to_string(),
            sets: Sets::from(self.sets),
            reps: self.reps.to_string(),
            rest: self.rest.to_string(),
            notes: Some(self.notes.to_string()),
        }
    }
}

const fn ex(
    name: &'static str,
    sets: u32,
    reps: &'static str,
    rest: &'static str,
    notes: &'static str,
) -> ExerciseTemplate {
    ExerciseTemplate { name, sets, reps, rest, notes }
}

static WEIGHT_LOSS: [ExerciseTemplate; 5] = [
    ex("Burpees", 3, "15", "60s", "Explosive movement"),
    ex("Jump Squats", 3, "20", "60s", "Land softly"),
    ex("Mountain Climbers", 3, "40s", "45s", "Keep pace up"),
    ex("High Knees", 3, "45s", "45s", "Drive knees high"),
    ex("Jumping Jacks", 3, "50", "30s", "Full arm extension"),
];

static MUSCLE_GAIN: [ExerciseTemplate; 5] = [
    ex("Bench Press", 4, "8-10", "90s", "Focus on chest"),
    ex("Deadlifts", 3, "5", "120s", "Keep back straight"),
    ex("Pull-ups", 3, "Max", "90s", "Full range of motion"),
    ex("Overhead Press", 3, "8-12", "90s", "Core tight"),
    ex("Barbell Rows", 4, "8-10", "90s", "Squeeze shoulder blades"),
];

static GENERAL_HEALTH: [ExerciseTemplate; 5] = [
    ex("Push-ups", 3, "12", "60s", "Keep body aligned"),
    ex("Bodyweight Squats", 3, "15", "60s", "Deep squat"),
    ex("Lunges", 3, "12/leg", "60s", "Knee shouldn't pass toe"),
    ex("Plank", 3, "45s", "45s", "Engage core"),
    ex("Glute Bridges", 3, "15", "45s", "Squeeze at the top"),
];

#[derive(Debug)]
pub struct MealPool {
    pub breakfast: [&'static str; 5],
    pub lunch: [&'static str; 5],
    pub dinner: [&'static str; 5],
    pub snacks: [&'static str; 5],
}

static VEG: MealPool = MealPool {
    breakfast: ["Oatmeal with berries", "Greek Yogurt Parfait", "Avocado Toast", "Smoothie Bowl", "Pancakes"],
    lunch: ["Quinoa Bowl", "Lentil Soup", "Caprese Salad", "Veggie Wrap", "Chickpea Curry"],
    dinner: ["Stir-fry Tofu", "Vegetable Pasta", "Stuffed Bell Peppers", "Mushroom Risotto", "Dal Tadka"],
    snacks: ["Almonds", "Apple slices", "Carrot sticks", "Cottage Cheese", "Fruit Salad"],
};

static NON_VEG: MealPool = MealPool {
    breakfast: ["Scrambled Eggs & Toast", "Omelette", "Chicken Sausage", "Bacon & Eggs", "Protein Smoothie"],
    lunch: ["Grilled Chicken Salad", "Turkey Wrap", "Tuna Sandwich", "Chicken Burrito", "Beef Stir-fry"],
    dinner: ["Steamed Fish & Veggies", "Grilled Salmon", "Baked Chicken Breast", "Lean Steak with Salad", "Shrimp Pasta"],
    snacks: ["Protein Bar", "Jerky", "Boiled Eggs", "Greek Yogurt", "String Cheese"],
};

static VEGAN: MealPool = MealPool {
    breakfast: ["Oatmeal with Almond Milk", "Tofu Scramble", "Chia Pudding", "Fruit Smoothie", "Avocado Toast"],
    lunch: ["Buddha Bowl", "Vegan Burrito", "Falafel Wrap", "Lentil Soup", "Chickpea Salad"],
    dinner: ["Lentil Curry", "Vegan Chili", "Zucchini Noodles", "Stir-fry Vegetables", "Black Bean Burger"],
    snacks: ["Nuts", "Fruit", "Hummus & Veggies", "Rice Cakes", "Dark Chocolate"],
};

static KETO: MealPool = MealPool {
    breakfast: ["Bacon & Eggs", "Omelette with Cheese", "Avocado & Salmon", "Keto Coffee", "Chia Pudding"],
    lunch: ["Chicken Caesar Salad (No Croutons)", "Tuna Salad Lettuce Wraps", "Burger Patty with Cheese", "Cobb Salad", "Zucchini Noodles with Pesto"],
    dinner: ["Grilled Salmon with Asparagus", "Steak with Broccoli", "Baked Chicken Thighs", "Pork Chops with Cauliflower Mash", "Shrimp Scampi"],
    snacks: ["Cheese Slices", "Macadamia Nuts", "Pork Rinds", "Hard Boiled Eggs", "Avocado"],
};

static PALEO: MealPool = MealPool {
    breakfast: ["Scrambled Eggs with Spinach", "Sweet Potato Hash", "Fruit Salad", "Paleo Pancakes", "Smoked Salmon"],
    lunch: ["Grilled Chicken Salad", "Turkey Lettuce Wraps", "Butternut Squash Soup", "Beef & Veggie Stir-fry", "Salmon Salad"],
    dinner: ["Roast Chicken with Root Veggies", "Grilled Steak with Sweet Potato", "Baked Fish with Lemon", "Zucchini Noodles with Meatballs", "Shepherd's Pie (Sweet Potato Top)"],
    snacks: ["Almonds", "Fruit", "Jerky", "Hard Boiled Eggs", "Apple slices with Almond Butter"],
};

static TIPS: [&str; 7] = [
    "Stay hydrated throughout the day.",
    "Consistency is key to seeing results.",
    "Get at least 7-8 hours of sleep.",
    "Don't skip your warm-up routine.",
    "Listen to your body and rest when needed.",
    "Track your progress weekly.",
    "Focus on form over weight.",
];

/// Weight Loss and Muscle Gain have their own pools; every other goal
/// trains from the General Health pool.
pub fn exercise_pool(goal: &Goal) -> &'static [ExerciseTemplate] {
    match goal {
        Goal::WeightLoss => &WEIGHT_LOSS,
        Goal::MuscleGain => &MUSCLE_GAIN,
        _ => &GENERAL_HEALTH,
    }
}

/// Unrecognized or empty diets eat from the Veg pool.
pub fn meal_pool(diet: &Diet) -> &'static MealPool {
    match diet {
        Diet::Veg | Diet::Other(_) => &VEG,
        Diet::NonVeg => &NON_VEG,
        Diet::Vegan => &VEGAN,
        Diet::Keto => &KETO,
        Diet::Paleo => &PALEO,
    }
}

pub fn generate_stub(profile: &UserProfile) -> FitnessPlan {
    generate_stub_with(profile, &mut rand::thread_rng())
}

pub fn generate_stub_with<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> FitnessPlan {
    let exercises = exercise_pool(&profile.goal);
    let meals = meal_pool(&profile.diet);

    let workout_plan = (1..=DAYS_PER_PLAN)
        .map(|n| WorkoutDay {
            day: format!("Day {n}"),
            exercises: exercises
                .choose_multiple(rng, EXERCISES_PER_DAY)
                .map(ExerciseTemplate::to_exercise)
                .collect(),
        })
        .collect();

    let diet_plan = DietPlan {
        breakfast: sample(&meals.breakfast, ITEMS_PER_MEAL, rng),
        lunch: sample(&meals.lunch, ITEMS_PER_MEAL, rng),
        dinner: sample(&meals.dinner, ITEMS_PER_MEAL, rng),
        snacks: sample(&meals.snacks, ITEMS_PER_MEAL, rng),
    };

    FitnessPlan {
        metadata: Some(PlanMetadata {
            user_name: Some(profile.name.clone()),
            goal: Some(profile.goal.label().to_string()),
            generated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }),
        workout_plan,
        diet_plan,
        tips: sample(&TIPS, TIPS_PER_PLAN, rng),
    }
}

fn sample<R: Rng + ?Sized>(pool: &[&'static str], count: usize, rng: &mut R) -> Vec<String> {
    pool.choose_multiple(rng, count).map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(plan: &FitnessPlan) -> HashSet<String> {
        plan.workout_plan
            .iter()
            .flat_map(|day| day.exercises.iter().map(|e| e.name.clone()))
            .collect()
    }

    #[test]
    fn plan_has_production_shape() {
        let plan = generate_stub(&profile());

        assert_eq!(plan.workout_plan.len(), DAYS_PER_PLAN);
        for (i, day) in plan.workout_plan.iter().enumerate() {
            assert_eq!(day.day, format!("Day {}", i + 1));
            assert_eq!(day.exercises.len(), EXERCISES_PER_DAY);
            let distinct: HashSet<_> = day.exercises.iter().map(|e| &e.name).collect();
            assert_eq!(distinct.len(), EXERCISES_PER_DAY, "duplicate exercise within a day");
        }
        for items in [
            &plan.diet_plan.breakfast,
            &plan.diet_plan.lunch,
            &plan.diet_plan.dinner,
            &plan.diet_plan.snacks,
        ] {
            assert_eq!(items.len(), ITEMS_PER_MEAL);
            assert_ne!(items[0], items[1]);
        }
        assert_eq!(plan.tips.len(), TIPS_PER_PLAN);

        let meta = plan.metadata.unwrap();
        assert_eq!(meta.user_name.as_deref(), Some("Riya"));
        assert_eq!(meta.goal.as_deref(), Some("Muscle Gain"));
        assert!(meta.generated_at.unwrap().ends_with('Z'));
    }

    #[test]
    fn stub_output_passes_validation() {
        let value = serde_json::to_value(generate_stub(&profile())).unwrap();
        assert!(crate::sanitize::validate(value).is_ok());
    }

    #[test]
    fn other_goals_use_general_health_pool() {
        for goal in ["Endurance", "Flexibility", "General Health", "Yoga", ""] {
            let pool = exercise_pool(&Goal::from(goal.to_string()));
            assert!(std::ptr::eq(pool, &GENERAL_HEALTH[..]), "goal {goal:?}");
        }
        assert!(std::ptr::eq(exercise_pool(&Goal::WeightLoss), &WEIGHT_LOSS[..]));
        assert!(std::ptr::eq(exercise_pool(&Goal::MuscleGain), &MUSCLE_GAIN[..]));
    }

    #[test]
    fn other_diets_use_veg_pool() {
        for diet in ["Pescatarian", "", "veg", "Mediterranean"] {
            assert!(std::ptr::eq(meal_pool(&Diet::from(diet.to_string())), &VEG), "diet {diet:?}");
        }
        assert!(std::ptr::eq(meal_pool(&Diet::Keto), &KETO));
        assert!(std::ptr::eq(meal_pool(&Diet::NonVeg), &NON_VEG));
    }

    #[test]
    fn exercises_come_from_the_selected_pool() {
        let mut user = profile();
        user.goal = Goal::Other("Climbing".into());
        let plan = generate_stub(&user);
        let pool: HashSet<String> = GENERAL_HEALTH.iter().map(|e| e.name.to_string()).collect();
        assert!(names(&plan).is_subset(&pool));
    }

    #[test]
    fn pools_hold_at_least_five_entries() {
        for pool in [&WEIGHT_LOSS[..], &MUSCLE_GAIN[..], &GENERAL_HEALTH[..]] {
            assert!(pool.len() >= 5);
        }
        assert!(TIPS.len() >= TIPS_PER_PLAN);
    }

    #[test]
    fn seeded_rng_gives_repeatable_content() {
        let a = generate_stub_with(&profile(), &mut StdRng::seed_from_u64(7));
        let b = generate_stub_with(&profile(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a.workout_plan, b.workout_plan);
        assert_eq!(a.diet_plan, b.diet_plan);
        assert_eq!(a.tips, b.tips);
    }
}
