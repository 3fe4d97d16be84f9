use serde::{Deserialize, Deserializer, Serialize};

/// Kind of a scheduled activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    #[default]
    Attraction,
    Shopping,
    Meal,
    Transport,
    Free,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 5] = [
        ActivityCategory::Attraction,
        ActivityCategory::Shopping,
        ActivityCategory::Meal,
        ActivityCategory::Transport,
        ActivityCategory::Free,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ActivityCategory::Attraction => "attraction",
            ActivityCategory::Shopping => "shopping",
            ActivityCategory::Meal => "meal",
            ActivityCategory::Transport => "transport",
            ActivityCategory::Free => "free",
        }
    }

    /// CLI / snapshot string → enum (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "attraction" | "sight" | "sightseeing" => Some(ActivityCategory::Attraction),
            "shopping" => Some(ActivityCategory::Shopping),
            "meal" | "food" | "restaurant" => Some(ActivityCategory::Meal),
            "transport" | "transit" => Some(ActivityCategory::Transport),
            "free" => Some(ActivityCategory::Free),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityCategory::Attraction => "🏛️",
            ActivityCategory::Shopping => "🛍️",
            ActivityCategory::Meal => "🍜",
            ActivityCategory::Transport => "🚆",
            ActivityCategory::Free => "🕊️",
        }
    }
}

// Unknown categories from older snapshots fall back to the default
// instead of failing the whole import.
impl<'de> Deserialize<'de> for ActivityCategory {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw
            .as_deref()
            .and_then(ActivityCategory::from_code)
            .unwrap_or_default())
    }
}

/// Category of a global (not activity-bound) expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Lodging,
    Sightseeing,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub fn code(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Lodging => "lodging",
            ExpenseCategory::Sightseeing => "sightseeing",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "food" | "meal" => Some(ExpenseCategory::Food),
            "transport" => Some(ExpenseCategory::Transport),
            "shopping" => Some(ExpenseCategory::Shopping),
            "lodging" | "hotel" | "accommodation" => Some(ExpenseCategory::Lodging),
            "sightseeing" | "attraction" => Some(ExpenseCategory::Sightseeing),
            "other" | "etc" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ExpenseCategory {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw
            .as_deref()
            .and_then(ExpenseCategory::from_code)
            .unwrap_or_default())
    }
}
