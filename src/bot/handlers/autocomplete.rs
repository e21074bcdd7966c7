//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::BotData, core::category::Category, errors::Error};

/// Category names matching `partial`, for the `/expense` category argument.
///
/// Only user-selectable categories are offered; the transit categories are
/// managed by their own commands.
#[must_use]
pub fn category_suggestions(partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();

    Category::user_selectable()
        .iter()
        .filter(|cat| {
            cat.name().to_lowercase().contains(&partial_lower) || cat.id().contains(&partial_lower)
        })
        .map(|cat| cat.name().to_string())
        .collect()
}

/// Provides autocomplete suggestions for category names.
///
/// # Arguments
/// * `_ctx` - The poise context (unused, but required by poise signature)
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    category_suggestions(partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_lists_every_selectable_category() {
        assert_eq!(category_suggestions("").len(), 8);
        assert!(!category_suggestions("").iter().any(|c| c.contains("fare")));
    }

    #[test]
    fn test_matches_name_or_id() {
        assert_eq!(category_suggestions("foo"), vec!["Food"]);
        assert_eq!(category_suggestions("comi"), vec!["Food"]);
        assert_eq!(category_suggestions("HOME"), vec!["Home"]);
        assert!(category_suggestions("zzz").is_empty());
    }
}
