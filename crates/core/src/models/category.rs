use serde::{Deserialize, Serialize};

/// Category key used for allocation transactions.
pub const SAVINGS_CATEGORY: &str = "savings";

/// Built-in transaction categories with a display name, icon and colour class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Shopping,
    Transport,
    Housing,
    Entertainment,
    Education,
    Health,
    Savings,
    Other,
}

impl Category {
    /// Every built-in category, in catalog order.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Shopping,
        Category::Transport,
        Category::Housing,
        Category::Entertainment,
        Category::Education,
        Category::Health,
        Category::Savings,
        Category::Other,
    ];

    /// Storage key, as it appears in `Transaction::category`.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Shopping => "shopping",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Entertainment => "entertainment",
            Category::Education => "education",
            Category::Health => "health",
            Category::Savings => SAVINGS_CATEGORY,
            Category::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Shopping => "Shopping",
            Category::Transport => "Transportation",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Education => "Education",
            Category::Health => "Healthcare",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "fas fa-utensils",
            Category::Shopping => "fas fa-shopping-bag",
            Category::Transport => "fas fa-car",
            Category::Housing => "fas fa-home",
            Category::Entertainment => "fas fa-film",
            Category::Education => "fas fa-graduation-cap",
            Category::Health => "fas fa-heartbeat",
            Category::Savings => "fas fa-piggy-bank",
            Category::Other => "fas fa-question-circle",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Category::Food => "bg-food",
            Category::Shopping => "bg-shopping",
            Category::Transport => "bg-transport",
            Category::Housing => "bg-housing",
            Category::Entertainment => "bg-entertainment",
            Category::Education => "bg-education",
            Category::Health => "bg-health",
            Category::Savings => "bg-savings",
            Category::Other => "bg-other",
        }
    }

    /// Exact, case-sensitive key lookup.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Result of looking a category key up in the catalog.
///
/// Keys outside the catalog are valid; they label as themselves and
/// borrow the `Other` icon and colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryLabel {
    Known(Category),
    Unknown(String),
}

impl CategoryLabel {
    pub fn lookup(key: &str) -> Self {
        match Category::from_key(key) {
            Some(category) => CategoryLabel::Known(category),
            None => CategoryLabel::Unknown(key.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CategoryLabel::Known(category) => category.display_name(),
            CategoryLabel::Unknown(key) => key,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CategoryLabel::Known(category) => category.icon(),
            CategoryLabel::Unknown(_) => Category::Other.icon(),
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            CategoryLabel::Known(category) => category.color_class(),
            CategoryLabel::Unknown(_) => Category::Other.color_class(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CategoryLabel::Known(_))
    }
}

impl std::fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
