// LLM prompt template for plan generation.
// Profile values are substituted verbatim; the model sees exactly what the user typed.

use crate::planner::profile::UserProfile;

/// Plan prompt template.
/// Replace: {gender}, {age}, {height}, {weight}, {goal}, {diet}, {dislikes},
///          {medical_conditions}, {supplements}
pub const PLAN_PROMPT_TEMPLATE: &str = r#"You are an expert personal trainer and nutritionist. Generate a comprehensive seven-day personalized workout and diet plan.
User details:
- Gender: {gender}
- Age: {age} years
- Height: {height} cm
- Weight: {weight} kg
- Goal: {goal}
- Dietary Preferences: {diet}
- Food Allergies/Dislikes: {dislikes}
- Medical Conditions: {medical_conditions}
- Supplements: {supplements}

Response format: a single JSON object with the following keys:
- `workout_plan`: An object with keys "Monday" to "Sunday", each containing "focus" and a list of "exercises".
- `meal_plan`: An object with keys "Monday" to "Sunday", each containing "breakfast", "lunch", and "dinner".
- `shopping_list`: A single list of strings of all unique ingredients."#;

/// Fills the plan template. Free-text fields go first so that a value containing a
/// placeholder-like token is never expanded a second time.
pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let mut prompt = String::with_capacity(PLAN_PROMPT_TEMPLATE.len() + 256);
    let mut rest = PLAN_PROMPT_TEMPLATE;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let key = &rest[start + 1..start + len];
        prompt.push_str(&rest[..start]);
        match placeholder_value(profile, key) {
            Some(value) => prompt.push_str(&value),
            None => prompt.push_str(&rest[start..=start + len]),
        }
        rest = &rest[start + len + 1..];
    }
    prompt.push_str(rest);
    prompt
}

fn placeholder_value(profile: &UserProfile, key: &str) -> Option<String> {
    let value = match key {
        "gender" => profile.gender().to_string(),
        "age" => profile.age().to_string(),
        "height" => profile.height_cm().to_string(),
        "weight" => profile.weight_kg().to_string(),
        "goal" => profile.goal().to_string(),
        "diet" => profile.diet().to_string(),
        "dislikes" => profile.dislikes().to_string(),
        "medical_conditions" => profile.medical_conditions().to_string(),
        "supplements" => profile.supplements().to_string(),
        _ => return None,
    };
    Some(value)
}
