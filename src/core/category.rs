//! Expense categories.
//!
//! Categories are stored as short text ids. Ids this build does not know are
//! kept verbatim in [`Category::Unknown`] instead of being silently remapped.

use std::{convert::Infallible, fmt, str::FromStr};

/// Id of the reserved transit allowance category
pub const TRANSPORT_BUDGET_ID: &str = "transport_budget";
/// Id of the reserved daily transit fare category
pub const TRANSPORT_DAILY_ID: &str = "transport_daily";

/// An expense category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Food and groceries
    Food,
    /// Transport outside the transit sub-budget
    Transport,
    /// Shopping
    Shopping,
    /// Entertainment
    Entertainment,
    /// Health
    Health,
    /// Home
    Home,
    /// Bills and subscriptions
    Services,
    /// Anything else
    #[default]
    Other,
    /// The month's transit allowance (at most one per month)
    TransportBudget,
    /// A daily fare drawn from the transit allowance
    TransportDaily,
    /// A stored id this build does not recognise
    Unknown(String),
}

const USER_SELECTABLE: [Category; 8] = [
    Category::Food,
    Category::Transport,
    Category::Shopping,
    Category::Entertainment,
    Category::Health,
    Category::Home,
    Category::Services,
    Category::Other,
];

impl Category {
    /// Maps a stored id to a category. Never fails.
    ///
    /// Ids match exactly, the same way the store filters on them; anything
    /// else is [`Category::Unknown`].
    #[must_use]
    pub fn parse(id: &str) -> Self {
        match id {
            "comida" => Self::Food,
            "transporte" => Self::Transport,
            "compras" => Self::Shopping,
            "entretenimiento" => Self::Entertainment,
            "salud" => Self::Health,
            "hogar" => Self::Home,
            "servicios" => Self::Services,
            "otros" => Self::Other,
            TRANSPORT_BUDGET_ID => Self::TransportBudget,
            TRANSPORT_DAILY_ID => Self::TransportDaily,
            _ => Self::Unknown(id.to_string()),
        }
    }

    /// Resolves a category picked by a user, by id or display name.
    ///
    /// Only [`Category::user_selectable`] categories match; reserved and
    /// unknown ids yield `None`.
    #[must_use]
    pub fn from_user_input(input: &str) -> Option<Self> {
        let wanted = input.trim();
        USER_SELECTABLE
            .iter()
            .find(|cat| {
                cat.id().eq_ignore_ascii_case(wanted) || cat.name().eq_ignore_ascii_case(wanted)
            })
            .cloned()
    }

    /// The id written to the store.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Food => "comida",
            Self::Transport => "transporte",
            Self::Shopping => "compras",
            Self::Entertainment => "entretenimiento",
            Self::Health => "salud",
            Self::Home => "hogar",
            Self::Services => "servicios",
            Self::Other => "otros",
            Self::TransportBudget => TRANSPORT_BUDGET_ID,
            Self::TransportDaily => TRANSPORT_DAILY_ID,
            Self::Unknown(id) => id,
        }
    }

    /// Emoji shown next to the category.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Shopping => "🛍️",
            Self::Entertainment => "🎬",
            Self::Health => "💊",
            Self::Home => "🏠",
            Self::Services => "📱",
            Self::Other => "✨",
            Self::TransportBudget | Self::TransportDaily => "🚌",
            Self::Unknown(_) => "❔",
        }
    }

    /// Display name without emoji.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Home => "Home",
            Self::Services => "Services",
            Self::Other => "Other",
            Self::TransportBudget => "Transit budget",
            Self::TransportDaily => "Daily fares",
            Self::Unknown(id) => id,
        }
    }

    /// Emoji plus name, e.g. `"🍔 Food"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji(), self.name())
    }

    /// Whether the category belongs to the transit sub-budget.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::TransportBudget | Self::TransportDaily)
    }

    /// Categories a user can pick for a regular expense, in display order.
    #[must_use]
    pub const fn user_selectable() -> &'static [Self] {
        &USER_SELECTABLE
    }

    /// Position used to order category breakdowns. Unknown ids sort last.
    #[must_use]
    pub const fn display_rank(&self) -> usize {
        match self {
            Self::Food => 0,
            Self::Transport => 1,
            Self::Shopping => 2,
            Self::Entertainment => 3,
            Self::Health => 4,
            Self::Home => 5,
            Self::Services => 6,
            Self::Other => 7,
            Self::TransportBudget => 8,
            Self::TransportDaily => 9,
            Self::Unknown(_) => 10,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        assert_eq!(Category::parse("comida"), Category::Food);
        assert_eq!(Category::parse("servicios"), Category::Services);
        assert_eq!(
            Category::parse("transport_budget"),
            Category::TransportBudget
        );
        assert_eq!(Category::parse("transport_daily"), Category::TransportDaily);
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(
            Category::parse("Servicios"),
            Category::Unknown("Servicios".to_string())
        );
        assert_eq!(
            Category::parse(" transport_budget"),
            Category::Unknown(" transport_budget".to_string())
        );
    }

    #[test]
    fn test_from_user_input() {
        assert_eq!(Category::from_user_input("food"), Some(Category::Food));
        assert_eq!(Category::from_user_input(" Comida "), Some(Category::Food));
        assert_eq!(Category::from_user_input("SERVICES"), Some(Category::Services));
        assert_eq!(Category::from_user_input("transport_daily"), None);
        assert_eq!(Category::from_user_input("mascotas"), None);
    }

    #[test]
    fn test_unknown_id_is_preserved() {
        let cat = Category::parse("mascotas");
        assert_eq!(cat, Category::Unknown("mascotas".to_string()));
        assert_eq!(cat.id(), "mascotas");
        assert_eq!(cat.label(), "❔ mascotas");
    }

    #[test]
    fn test_ids_roundtrip_for_every_named_category() {
        for cat in Category::user_selectable() {
            assert_eq!(&Category::parse(cat.id()), cat);
        }
        assert_eq!(
            Category::parse(Category::TransportDaily.id()),
            Category::TransportDaily
        );
    }

    #[test]
    fn test_user_selectable_excludes_reserved() {
        let selectable = Category::user_selectable();
        assert_eq!(selectable.len(), 8);
        assert!(selectable.iter().all(|c| !c.is_reserved()));
        assert_eq!(selectable.last(), Some(&Category::Other));
    }

    #[test]
    fn test_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Category::default().to_string(), "otros");
    }

    #[test]
    fn test_from_str_never_fails() {
        let parsed: Category = "hogar".parse().unwrap_or_default();
        assert_eq!(parsed, Category::Home);
    }
}
