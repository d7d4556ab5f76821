pub mod colors;
pub mod dark;
pub mod light;
pub mod tokens;

use egui::Visuals;
use serde::{Deserialize, Serialize};

use colors::ThemeColors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: &[ThemeMode] = &[ThemeMode::Dark, ThemeMode::Light];

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            ThemeMode::Dark => dark::dark_visuals(),
            ThemeMode::Light => light::light_visuals(),
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            ThemeMode::Dark => ThemeColors::dark(),
            ThemeMode::Light => ThemeColors::light(),
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_display_names() {
        for mode in ThemeMode::ALL {
            assert!(!mode.display_name().is_empty());
        }
    }

    #[test]
    fn theme_mode_toggle_is_involution() {
        for mode in ThemeMode::ALL {
            assert_eq!(mode.toggle().toggle(), *mode);
        }
    }

    #[test]
    fn theme_mode_default() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn theme_mode_serde_roundtrip() {
        for mode in ThemeMode::ALL {
            let json = serde_json::to_string(mode).unwrap();
            let m2: ThemeMode = serde_json::from_str(&json).unwrap();
            assert_eq!(*mode, m2);
        }
    }
}
