//! User preferences persisted as one flat object under [`crate::persistence::SETTINGS_KEY`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Neon,
}

impl Theme {
    /// Start-menu toggle target: light and dark swap, neon falls back to dark.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::Neon => Self::Dark,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Neon => "neon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskbarPosition {
    #[default]
    Bottom,
    Top,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl ClockFormat {
    /// Formats a wall-clock time as `h:mm AM` or `HH:mm`.
    pub fn format(self, hours: u32, minutes: u32) -> String {
        match self {
            Self::TwentyFourHour => format!("{hours:02}:{minutes:02}"),
            Self::TwelveHour => {
                let suffix = if hours < 12 { "AM" } else { "PM" };
                let display = match hours % 12 {
                    0 => 12,
                    h => h,
                };
                format!("{display}:{minutes:02} {suffix}")
            }
        }
    }
}

pub const DEFAULT_WALLPAPER: &str = "gradient-blue";

/// Entry in the start-menu wallpaper picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallpaperChoice {
    pub id: &'static str,
    pub name: &'static str,
    pub glyph: &'static str,
}

pub const WALLPAPER_CHOICES: [WallpaperChoice; 4] = [
    WallpaperChoice {
        id: DEFAULT_WALLPAPER,
        name: "Cyber Blue",
        glyph: "🌊",
    },
    WallpaperChoice {
        id: "gradient-purple",
        name: "Neon Purple",
        glyph: "🌸",
    },
    WallpaperChoice {
        id: "gradient-green",
        name: "Matrix Green",
        glyph: "🌿",
    },
    WallpaperChoice {
        id: "gradient-orange",
        name: "Solar Orange",
        glyph: "🍊",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesktopSettings {
    pub theme: Theme,
    pub wallpaper: String,
    pub show_clock: bool,
    pub taskbar_position: TaskbarPosition,
    pub clock_format: ClockFormat,
    pub animations: bool,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            wallpaper: DEFAULT_WALLPAPER.to_string(),
            show_clock: true,
            taskbar_position: TaskbarPosition::Bottom,
            clock_format: ClockFormat::TwelveHour,
            animations: true,
        }
    }
}

/// One preference change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingUpdate {
    Theme(Theme),
    Wallpaper(String),
    ShowClock(bool),
    TaskbarPosition(TaskbarPosition),
    ClockFormat(ClockFormat),
    Animations(bool),
}

impl DesktopSettings {
    /// Applies `update`; returns whether anything changed.
    pub fn apply(&mut self, update: SettingUpdate) -> bool {
        let before = self.clone();
        match update {
            SettingUpdate::Theme(theme) => self.theme = theme,
            SettingUpdate::Wallpaper(wallpaper) => self.wallpaper = wallpaper,
            SettingUpdate::ShowClock(show) => self.show_clock = show,
            SettingUpdate::TaskbarPosition(position) => self.taskbar_position = position,
            SettingUpdate::ClockFormat(format) => self.clock_format = format,
            SettingUpdate::Animations(enabled) => self.animations = enabled,
        }
        *self != before
    }

    /// CSS background for the configured wallpaper. `custom:<url>` wallpapers use the image URL;
    /// unrecognized ids render as the default.
    pub fn wallpaper_style(&self) -> String {
        if let Some(url) = self.wallpaper.strip_prefix("custom:") {
            return format!("background-image:url(\"{url}\");background-size:cover;");
        }
        let background = match self.wallpaper.as_str() {
            "gradient-purple" => "linear-gradient(135deg,#9333ea,#db2777,#6b21a8)",
            "gradient-green" => "linear-gradient(135deg,#16a34a,#0d9488,#166534)",
            "gradient-orange" => "linear-gradient(135deg,#ea580c,#dc2626,#9a3412)",
            "solid-black" => "#000000",
            "pattern-circuit" => "#111827",
            _ => "linear-gradient(135deg,#2563eb,#9333ea,#3730a3)",
        };
        format!("background:{background};")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_flat_camel_case_object() {
        let value = serde_json::to_value(DesktopSettings::default()).expect("encode");
        assert_eq!(
            value,
            json!({
                "theme": "dark",
                "wallpaper": "gradient-blue",
                "showClock": true,
                "taskbarPosition": "bottom",
                "clockFormat": "12h",
                "animations": true,
            })
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: DesktopSettings =
            serde_json::from_value(json!({ "theme": "neon", "clockFormat": "24h" }))
                .expect("decode");
        assert_eq!(settings.theme, Theme::Neon);
        assert_eq!(settings.clock_format, ClockFormat::TwentyFourHour);
        assert_eq!(settings.wallpaper, DEFAULT_WALLPAPER);
        assert!(settings.show_clock);
    }

    #[test]
    fn apply_reports_changes() {
        let mut settings = DesktopSettings::default();
        assert!(!settings.apply(SettingUpdate::Theme(Theme::Dark)));
        assert!(settings.apply(SettingUpdate::TaskbarPosition(TaskbarPosition::Left)));
        assert_eq!(settings.taskbar_position, TaskbarPosition::Left);
        assert!(settings.apply(SettingUpdate::Animations(false)));
        assert!(!settings.animations);
    }

    #[test]
    fn theme_toggle_swaps_light_and_dark() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Neon.toggled(), Theme::Dark);
    }

    #[test]
    fn clock_formats() {
        assert_eq!(ClockFormat::TwelveHour.format(0, 5), "12:05 AM");
        assert_eq!(ClockFormat::TwelveHour.format(13, 30), "1:30 PM");
        assert_eq!(ClockFormat::TwentyFourHour.format(9, 7), "09:07");
    }

    #[test]
    fn every_known_wallpaper_has_its_own_style() {
        let default_style = DesktopSettings::default().wallpaper_style();
        let mut seen = vec![default_style.clone()];
        for id in [
            "gradient-purple",
            "gradient-green",
            "gradient-orange",
            "solid-black",
            "pattern-circuit",
        ] {
            let mut settings = DesktopSettings::default();
            settings.apply(SettingUpdate::Wallpaper(id.to_string()));
            let style = settings.wallpaper_style();
            assert!(!seen.contains(&style), "{id} renders like another wallpaper");
            seen.push(style);
        }

        let mut unknown = DesktopSettings::default();
        unknown.apply(SettingUpdate::Wallpaper("aurora".to_string()));
        assert_eq!(unknown.wallpaper_style(), default_style);
    }

    #[test]
    fn picker_offers_default_first() {
        let ids: Vec<_> = WALLPAPER_CHOICES.iter().map(|choice| choice.id).collect();
        assert_eq!(
            ids,
            vec!["gradient-blue", "gradient-purple", "gradient-green", "gradient-orange"]
        );
    }

    #[test]
    fn custom_wallpapers_use_image_url() {
        let mut settings = DesktopSettings::default();
        settings.apply(SettingUpdate::Wallpaper("custom:https://x/y.jpg".to_string()));
        assert!(settings.wallpaper_style().contains("url(\"https://x/y.jpg\")"));
    }
}
