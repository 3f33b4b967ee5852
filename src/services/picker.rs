//! Completion phrase and theme selection

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Name shown when no username has been entered
pub const GUEST_NAME: &str = "Guest";

/// Congratulatory phrases drawn on completion
pub const PHRASES: [&str; 4] = ["Congrats!!!", "YAY!", "Never give up!", "URAHHHH"];

/// Background colour token
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    /// Background before the first completion
    #[default]
    Neutral,
    Rose,
    Mint,
    Sky,
    Lavender,
    Cream,
}

/// Colours a completion can pick from
pub const PALETTE: [ColorToken; 5] = [
    ColorToken::Rose,
    ColorToken::Mint,
    ColorToken::Sky,
    ColorToken::Lavender,
    ColorToken::Cream,
];

impl ColorToken {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Neutral => "#f0f8ff",
            ColorToken::Rose => "#ffebee",
            ColorToken::Mint => "#e8f5e9",
            ColorToken::Sky => "#e3f2fd",
            ColorToken::Lavender => "#f3e5f5",
            ColorToken::Cream => "#fff8e1",
        }
    }
}

/// Strategy invoked by the controller each time a countdown completes
pub trait CompletionPicker: Send + Sync {
    fn pick_phrase(&self) -> &'static str;

    fn pick_theme(&self) -> ColorToken;

    /// Draw a phrase and address it to `username`
    fn pick_completion_message(&self, username: &str) -> String {
        render_message(self.pick_phrase(), username)
    }
}

/// Name to address the user by
pub fn display_name(username: &str) -> &str {
    if username.is_empty() {
        GUEST_NAME
    } else {
        username
    }
}

/// Format a completion message, e.g. `"YAY! dan!"`
pub fn render_message(phrase: &str, username: &str) -> String {
    format!("{} {}!", phrase, display_name(username))
}

/// Uniform random selection backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl CompletionPicker for RandomPicker {
    fn pick_phrase(&self) -> &'static str {
        PHRASES.choose(&mut rand::thread_rng()).copied().unwrap_or(PHRASES[0])
    }

    fn pick_theme(&self) -> ColorToken {
        PALETTE.choose(&mut rand::thread_rng()).copied().unwrap_or(PALETTE[0])
    }
}

/// Always returns the same phrase and theme
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker {
    pub phrase: &'static str,
    pub theme: ColorToken,
}

impl FixedPicker {
    pub fn new(phrase: &'static str, theme: ColorToken) -> Self {
        Self { phrase, theme }
    }
}

impl Default for FixedPicker {
    fn default() -> Self {
        Self::new(PHRASES[0], PALETTE[0])
    }
}

impl CompletionPicker for FixedPicker {
    fn pick_phrase(&self) -> &'static str {
        self.phrase
    }

    fn pick_theme(&self) -> ColorToken {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_addresses_user_or_guest() {
        assert_eq!(render_message("YAY!", "dan"), "YAY! dan!");
        assert_eq!(render_message("YAY!", ""), "YAY! Guest!");
    }

    #[test]
    fn random_picks_stay_within_fixed_sets() {
        let picker = RandomPicker;
        for _ in 0..200 {
            assert!(PHRASES.contains(&picker.pick_phrase()));
            assert!(PALETTE.contains(&picker.pick_theme()));
        }
    }

    #[test]
    fn random_message_uses_a_known_phrase() {
        let message = RandomPicker.pick_completion_message("dan");
        assert!(message.ends_with("dan!"));
        assert!(PHRASES.iter().any(|phrase| message.starts_with(phrase)));
    }

    #[test]
    fn palette_never_yields_the_neutral_background() {
        assert!(!PALETTE.contains(&ColorToken::Neutral));
        assert_eq!(ColorToken::default().hex(), "#f0f8ff");
    }
}
