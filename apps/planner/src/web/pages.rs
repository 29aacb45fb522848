//! Server-rendered pages: the profile form, the plan result, and the failure notice.
//!
//! Every user- or model-derived string passes through `escape_html` here and nowhere else.

use serde::Deserialize;

use crate::errors::AppError;
use crate::planner::plan::{DaySchedule, GeneratedPlan, MealDay, WorkoutDay};
use crate::planner::profile::{
    Gender, Goal, ProfileInput, UserProfile, AGE_RANGE, DEFAULT_AGE, DEFAULT_HEIGHT_CM,
    DEFAULT_WEIGHT_KG, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE,
};
use crate::web::html::escape_html;

const SHOPPING_COLUMNS: usize = 3;
const EMPTY_MEAL: &str = "N/A";
pub const NO_SHOPPING_LIST: &str = "No shopping list generated.";

const STYLE: &str = r#"
body { background: #121212; color: #FFFFFF; font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 24px; }
h1, h2, h3, h4 { color: #FFFFFF; }
.subtitle { text-align: center; color: #E0E0E0; font-size: 1.1rem; margin-top: -1rem; margin-bottom: 2rem; }
.row { display: flex; gap: 16px; flex-wrap: wrap; }
.row > * { flex: 1; min-width: 180px; }
label { display: block; margin-bottom: 4px; font-weight: bold; }
input, select, textarea { width: 100%; box-sizing: border-box; background-color: #2D2D2D; color: #FFFFFF; border: 1px solid #444; border-radius: 6px; padding: 8px; }
button { background-color: #4CAF50; color: white; border-radius: 8px; padding: 10px 24px; font-size: 1rem; border: none; margin-top: 16px; cursor: pointer; }
details { border: 1px solid #444; border-radius: 10px; padding: 8px; background: #1e1e1e; box-shadow: 0 2px 4px rgba(0,0,0,0.4); margin-bottom: 8px; }
summary { cursor: pointer; font-weight: bold; }
.metric-value { color: #4CAF50; font-size: 1.3rem; font-weight: bold; }
.success { background: #1b3a1f; border-radius: 8px; padding: 12px; }
.warning { background: #3a351b; border-radius: 8px; padding: 12px; }
.error { background: #3a1b1b; border-radius: 8px; padding: 12px; }
pre { background: #1e1e1e; padding: 12px; border-radius: 8px; overflow-x: auto; white-space: pre-wrap; }
"#;

/// Failure shown above the form.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub raw_response: Option<String>,
}

/// The form exactly as submitted. Every field is text, so a bad number or an unknown
/// option still round-trips back into the form alongside the error.
#[derive(Debug, Clone, Deserialize)]
pub struct FormValues {
    pub gender: String,
    pub age: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub goal: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub dislikes: String,
    #[serde(default)]
    pub medical_conditions: String,
    #[serde(default)]
    pub supplements: String,
}

impl Default for FormValues {
    fn default() -> Self {
        FormValues {
            gender: Gender::default().label().to_string(),
            age: DEFAULT_AGE.to_string(),
            height_cm: DEFAULT_HEIGHT_CM.to_string(),
            weight_kg: DEFAULT_WEIGHT_KG.to_string(),
            goal: Goal::default().label().to_string(),
            diet: String::new(),
            dislikes: String::new(),
            medical_conditions: String::new(),
            supplements: String::new(),
        }
    }
}

impl FormValues {
    /// Parses the text fields into a `ProfileInput`; range checks happen later.
    pub fn to_input(&self) -> Result<ProfileInput, AppError> {
        Ok(ProfileInput {
            gender: Gender::from_label(&self.gender).ok_or_else(|| {
                unknown_option("gender", &self.gender, &Gender::ALL.map(Gender::label))
            })?,
            age: whole_number("age", &self.age)?,
            height_cm: whole_number("height_cm", &self.height_cm)?,
            weight_kg: whole_number("weight_kg", &self.weight_kg)?,
            goal: Goal::from_label(&self.goal).ok_or_else(|| {
                unknown_option("goal", &self.goal, &Goal::ALL.map(Goal::label))
            })?,
            diet: self.diet.clone(),
            dislikes: self.dislikes.clone(),
            medical_conditions: self.medical_conditions.clone(),
            supplements: self.supplements.clone(),
        })
    }
}

fn whole_number(field: &str, value: &str) -> Result<i64, AppError> {
    value.trim().parse::<i64>().map_err(|_| {
        AppError::Validation(format!("{field} must be a whole number (got {value:?})"))
    })
}

fn unknown_option(field: &str, value: &str, allowed: &[&str]) -> AppError {
    AppError::Validation(format!(
        "{field} must be one of {} (got {value:?})",
        allowed.join(", ")
    ))
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>AI Workout &amp; Diet Planner</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>AI-Powered Workout &amp; Diet Planner</h1>
    <div class="subtitle">Fill out the form below to get a personalized 7-day plan.</div>
{body}
</body>
</html>
"#
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Form page
// ────────────────────────────────────────────────────────────────────────────

pub fn render_form_page(values: &FormValues, notice: Option<&Notice>) -> String {
    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(&render_notice(notice));
    }
    body.push_str(&render_form(values));
    layout(&body)
}

fn render_notice(notice: &Notice) -> String {
    let mut html = format!(
        r#"    <div class="error">{}</div>
"#,
        escape_html(&notice.message)
    );
    if let Some(raw) = &notice.raw_response {
        html.push_str(&format!(
            "    <pre><code>{}</code></pre>\n",
            escape_html(raw)
        ));
    }
    html
}

fn render_form(values: &FormValues) -> String {
    let gender_options = options(Gender::ALL.iter().map(|g| g.label()), &values.gender);
    let goal_options = options(Goal::ALL.iter().map(|g| g.label()), &values.goal);

    format!(
        r#"    <form method="post" action="/plan">
        <h3>Personal Information</h3>
        <div class="row">
            <div><label for="gender">Gender</label><select id="gender" name="gender">{gender_options}</select></div>
            {age}
            {height}
            {weight}
        </div>
        <h3>Goals &amp; Preferences</h3>
        <label for="goal">Fitness Goal</label><select id="goal" name="goal">{goal_options}</select>
        <label for="diet">Dietary Preference (e.g., Vegetarian, Keto)</label>
        <input type="text" id="diet" name="diet" value="{diet}">
        <div class="row">
            <div><label for="dislikes">Allergies / Dislikes</label><textarea id="dislikes" name="dislikes" rows="3">{dislikes}</textarea></div>
            <div><label for="medical_conditions">Medical Conditions</label><textarea id="medical_conditions" name="medical_conditions" rows="3">{medical}</textarea></div>
        </div>
        <label for="supplements">Supplements</label>
        <textarea id="supplements" name="supplements" rows="2">{supplements}</textarea>
        <button type="submit">Generate My Plan</button>
    </form>
"#,
        age = number_input("age", "Age", &values.age, *AGE_RANGE.start(), *AGE_RANGE.end()),
        height = number_input(
            "height_cm",
            "Height (cm)",
            &values.height_cm,
            *HEIGHT_CM_RANGE.start(),
            *HEIGHT_CM_RANGE.end()
        ),
        weight = number_input(
            "weight_kg",
            "Weight (kg)",
            &values.weight_kg,
            *WEIGHT_KG_RANGE.start(),
            *WEIGHT_KG_RANGE.end()
        ),
        diet = escape_html(&values.diet),
        dislikes = escape_html(&values.dislikes),
        medical = escape_html(&values.medical_conditions),
        supplements = escape_html(&values.supplements),
    )
}

fn options<'a>(labels: impl Iterator<Item = &'a str>, selected: &str) -> String {
    labels
        .map(|label| {
            let marker = if label == selected { " selected" } else { "" };
            format!(r#"<option value="{label}"{marker}>{label}</option>"#)
        })
        .collect()
}

fn number_input(name: &str, label: &str, value: &str, min: u16, max: u16) -> String {
    let value = escape_html(value);
    format!(
        r#"<div><label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{value}" required></div>"#
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Plan page
// ────────────────────────────────────────────────────────────────────────────

pub fn render_plan_page(profile: &UserProfile, plan: &GeneratedPlan) -> String {
    let body = format!(
        r#"    <div class="success">Plan generated successfully!</div>
    <div class="row">
        <div><div>Age</div><div class="metric-value">{age} yrs</div></div>
        <div><div>Weight</div><div class="metric-value">{weight} kg</div></div>
        <div><div>Goal</div><div class="metric-value">{goal}</div></div>
    </div>
    <section id="workout">
        <h2>7-Day Workout Plan</h2>
{workout}    </section>
    <section id="meals">
        <h2>7-Day Meal Plan</h2>
{meals}    </section>
    <section id="shopping">
        <h2>Shopping List</h2>
{shopping}    </section>
    <p><a href="/">Start over</a></p>
"#,
        age = profile.age(),
        weight = profile.weight_kg(),
        goal = profile.goal(),
        workout = render_workout_panel(&plan.workout_plan),
        meals = render_meal_panel(&plan.meal_plan),
        shopping = render_shopping_panel(&plan.shopping_list),
    );
    layout(&body)
}

pub fn render_workout_panel(schedule: &DaySchedule<WorkoutDay>) -> String {
    schedule
        .entries()
        .into_iter()
        .map(|(label, day)| {
            let exercises: String = day
                .exercises
                .iter()
                .map(|exercise| format!("<li>{}</li>", escape_html(exercise)))
                .collect();
            format!(
                "        <details><summary>{} - {}</summary><ul>{exercises}</ul></details>\n",
                escape_html(&label),
                escape_html(&day.focus)
            )
        })
        .collect()
}

pub fn render_meal_panel(schedule: &DaySchedule<MealDay>) -> String {
    schedule
        .entries()
        .into_iter()
        .map(|(label, meals)| {
            format!(
                "        <details><summary>{}</summary>\
                 <p><strong>Breakfast:</strong> {}</p>\
                 <p><strong>Lunch:</strong> {}</p>\
                 <p><strong>Dinner:</strong> {}</p></details>\n",
                escape_html(&label),
                meal_text(&meals.breakfast),
                meal_text(&meals.lunch),
                meal_text(&meals.dinner)
            )
        })
        .collect()
}

fn meal_text(meal: &str) -> String {
    if meal.is_empty() {
        EMPTY_MEAL.to_string()
    } else {
        escape_html(meal)
    }
}

pub fn render_shopping_panel(items: &[String]) -> String {
    if items.is_empty() {
        return format!("        <div class=\"warning\">{NO_SHOPPING_LIST}</div>\n");
    }

    let columns: String = shopping_columns(items, SHOPPING_COLUMNS)
        .into_iter()
        .map(|column| {
            let entries: String = column
                .into_iter()
                .map(|item| format!("<li>{}</li>", escape_html(item)))
                .collect();
            format!("<ul>{entries}</ul>")
        })
        .collect();
    format!("        <div class=\"row\">{columns}</div>\n")
}

/// Deals items round-robin into `count` columns.
pub fn shopping_columns(items: &[String], count: usize) -> Vec<Vec<&str>> {
    let mut columns = vec![Vec::new(); count.max(1)];
    let width = columns.len();
    for (idx, item) in items.iter().enumerate() {
        columns[idx % width].push(item.as_str());
    }
    columns
}
