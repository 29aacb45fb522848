//! Generated plan — the normalized three-part result of one generation call.
//!
//! Day-keyed sections arrive either as a mapping keyed by weekday or as a sequence.
//! Both are resolved once into `DaySchedule` so rendering never re-inspects raw JSON.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkoutDay {
    pub focus: String,
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealDay {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

/// Day-indexed schedule in the shape the model chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule<T> {
    /// Mapping keyed by day name, in source order.
    Keyed(Vec<(String, T)>),
    /// Sequence labelled positionally as "Day 1", "Day 2", …
    Sequenced(Vec<T>),
}

impl<T> Default for DaySchedule<T> {
    fn default() -> Self {
        DaySchedule::Keyed(Vec::new())
    }
}

impl<T> DaySchedule<T> {
    pub fn len(&self) -> usize {
        match self {
            DaySchedule::Keyed(days) => days.len(),
            DaySchedule::Sequenced(days) => days.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every day with its display label, in order.
    pub fn entries(&self) -> Vec<(Cow<'_, str>, &T)> {
        match self {
            DaySchedule::Keyed(days) => days
                .iter()
                .map(|(day, entry)| (Cow::Borrowed(day.as_str()), entry))
                .collect(),
            DaySchedule::Sequenced(days) => days
                .iter()
                .enumerate()
                .map(|(idx, entry)| (Cow::Owned(format!("Day {}", idx + 1)), entry))
                .collect(),
        }
    }

    /// Looks a day up by its display label ("Monday" or "Day 3").
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&T> {
        match self {
            DaySchedule::Keyed(days) => days
                .iter()
                .find(|(day, _)| day == label)
                .map(|(_, entry)| entry),
            DaySchedule::Sequenced(days) => label
                .strip_prefix("Day ")
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| days.get(idx)),
        }
    }
}

impl<T: Serialize> Serialize for DaySchedule<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaySchedule::Keyed(days) => {
                serializer.collect_map(days.iter().map(|(day, entry)| (day, entry)))
            }
            DaySchedule::Sequenced(days) => serializer.collect_seq(days),
        }
    }
}

/// Normalized plan. Built whole from one model response and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedPlan {
    pub workout_plan: DaySchedule<WorkoutDay>,
    pub meal_plan: DaySchedule<MealDay>,
    pub shopping_list: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

trait DayEntry: Sized {
    fn from_value(value: &Value) -> Self;
}

impl DayEntry for WorkoutDay {
    fn from_value(value: &Value) -> Self {
        WorkoutDay {
            focus: text_field(value, "focus"),
            exercises: match value.get("exercises") {
                Some(Value::Array(items)) => items.iter().map(display_text).collect(),
                _ => Vec::new(),
            },
        }
    }
}

impl DayEntry for MealDay {
    fn from_value(value: &Value) -> Self {
        MealDay {
            breakfast: text_field(value, "breakfast"),
            lunch: text_field(value, "lunch"),
            dinner: text_field(value, "dinner"),
        }
    }
}

impl GeneratedPlan {
    /// Normalizes a parsed model document. Only a non-object top level is an error;
    /// every missing or oddly-typed section degrades to empty.
    pub fn from_document(document: Value) -> Result<Self, String> {
        let root = match document {
            Value::Object(root) => root,
            other => {
                return Err(format!(
                    "expected a JSON object at the top level, found {}",
                    json_kind(&other)
                ))
            }
        };

        Ok(GeneratedPlan {
            workout_plan: schedule(&root, "workout_plan"),
            meal_plan: schedule(&root, "meal_plan"),
            shopping_list: shopping_list(&root),
        })
    }
}

fn schedule<T: DayEntry>(root: &Map<String, Value>, key: &str) -> DaySchedule<T> {
    match root.get(key) {
        Some(Value::Object(days)) => DaySchedule::Keyed(
            days.iter()
                .map(|(day, entry)| (day.clone(), T::from_value(entry)))
                .collect(),
        ),
        Some(Value::Array(days)) => DaySchedule::Sequenced(days.iter().map(T::from_value).collect()),
        _ => DaySchedule::default(),
    }
}

/// Unique items in first-seen order.
fn shopping_list(root: &Map<String, Value>) -> Vec<String> {
    let Some(Value::Array(items)) = root.get("shopping_list") else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .map(display_text)
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn text_field(value: &Value, key: &str) -> String {
    value.get(key).map(display_text).unwrap_or_default()
}

/// Strings as-is, null as empty, anything else as its JSON text.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
