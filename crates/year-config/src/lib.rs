//! YearView configuration system
//!
//! Loads grid, behaviour, style and surface settings from `yearview.toml`,
//! with environment variables taking precedence over the file.

use std::path::{Path, PathBuf};

use engine_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use year_grid::{GridParameters, PatternDateFormatter, WeekendDays};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "yearview.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct YearViewConfig {
    pub grid: GridConfig,
    pub behavior: BehaviorConfig,
    pub style: StyleConfig,
    /// Surface used by the headless demo
    pub surface: SurfaceConfig,
}

/// Grid layout settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Displayed year; the current year when unset
    pub year: Option<i32>,
    pub rows: i32,
    pub columns: i32,
    /// 1 = Monday .. 7 = Sunday
    pub first_day_of_week: u8,
    /// ISO weekday numbers drawn with the weekend style
    pub weekend_days: Vec<u8>,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub margin_below_month_name: f32,
    pub day_name_transcends_weekend: bool,
}

/// Selection behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Keep the tapped day selected until tapped again
    pub sticky_selection: bool,
    /// Two taps select a date range
    pub multi_selection: bool,
    /// How long a tapped month stays highlighted
    pub highlight_duration_ms: u64,
    /// chrono pattern used for date keys
    pub date_pattern: String,
}

/// Fonts, colors and shapes. Colors are "#RRGGBB" or "#RRGGBBAA".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// start, left, center, end or right
    pub title_gravity: String,
    pub month_name_size: f32,
    pub month_name_color: String,
    pub current_month_name_color: String,
    pub day_name_size: f32,
    pub day_name_color: String,
    pub day_text_size: f32,
    pub simple_day_color: String,
    pub weekend_day_color: String,
    pub today_text_color: String,
    pub today_background_color: String,
    /// circle, square, rounded_square or star
    pub today_shape: String,
    pub selected_text_color: String,
    pub selected_background_color: String,
    pub selected_shape: String,
    pub range_background_color: String,
    pub month_selection_color: String,
    pub month_background_color: Option<String>,
    pub month_selection_margin: f32,
    /// Padding around the measured day number that still counts as a hit
    pub touch_padding: f32,
}

/// Headless surface size
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        let grid = GridParameters::default();
        Self {
            year: None,
            rows: grid.rows,
            columns: grid.columns,
            first_day_of_week: grid.first_day_of_week,
            weekend_days: grid.weekend_days.iter().collect(),
            horizontal_spacing: grid.horizontal_spacing,
            vertical_spacing: grid.vertical_spacing,
            margin_below_month_name: grid.margin_below_month_name,
            day_name_transcends_weekend: grid.day_name_transcends_weekend,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            sticky_selection: true,
            multi_selection: false,
            highlight_duration_ms: 300,
            date_pattern: PatternDateFormatter::ISO.to_string(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_gravity: "center".to_string(),
            month_name_size: 14.0,
            month_name_color: "#212121".to_string(),
            current_month_name_color: "#d32f2f".to_string(),
            day_name_size: 11.0,
            day_name_color: "#757575".to_string(),
            day_text_size: 12.0,
            simple_day_color: "#212121".to_string(),
            weekend_day_color: "#9e9e9e".to_string(),
            today_text_color: "#ffffff".to_string(),
            today_background_color: "#d32f2f".to_string(),
            today_shape: "circle".to_string(),
            selected_text_color: "#ffffff".to_string(),
            selected_background_color: "#1976d2".to_string(),
            selected_shape: "circle".to_string(),
            range_background_color: "#bbdefb".to_string(),
            month_selection_color: "#e3f2fd".to_string(),
            month_background_color: None,
            month_selection_margin: 2.0,
            touch_padding: 4.0,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { width: 960.0, height: 1280.0 }
    }
}

impl StyleConfig {
    /// Every color field as `(name, value)`, for validation.
    fn colors(&self) -> Vec<(&'static str, &str)> {
        let mut colors = vec![
            ("month_name_color", self.month_name_color.as_str()),
            ("current_month_name_color", self.current_month_name_color.as_str()),
            ("day_name_color", self.day_name_color.as_str()),
            ("simple_day_color", self.simple_day_color.as_str()),
            ("weekend_day_color", self.weekend_day_color.as_str()),
            ("today_text_color", self.today_text_color.as_str()),
            ("today_background_color", self.today_background_color.as_str()),
            ("selected_text_color", self.selected_text_color.as_str()),
            ("selected_background_color", self.selected_background_color.as_str()),
            ("range_background_color", self.range_background_color.as_str()),
            ("month_selection_color", self.month_selection_color.as_str()),
        ];
        if let Some(bg) = &self.month_background_color {
            colors.push(("month_background_color", bg.as_str()));
        }
        colors
    }
}

/// Parse a hex color, naming the offending field on failure.
pub fn parse_color(field: &str, value: &str) -> Result<Color> {
    Color::from_hex(value)
        .ok_or_else(|| ConfigError::Invalid(format!("{field}: {value:?} is not a #RRGGBB[AA] color")))
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn parse_env<T: std::str::FromStr>(name: &str, val: &str) -> Option<T> {
    match val.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring {name}={val:?}: not a valid value");
            None
        }
    }
}

impl YearViewConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `yearview.toml` from the current directory, or defaults if it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    /// Values that fail to parse are skipped with a warning.
    pub fn merge_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Grid settings
        if let Some(val) = lookup("YEARVIEW_YEAR") {
            if let Some(year) = parse_env("YEARVIEW_YEAR", &val) {
                self.grid.year = Some(year);
            }
        }
        if let Some(val) = lookup("YEARVIEW_ROWS") {
            if let Some(rows) = parse_env("YEARVIEW_ROWS", &val) {
                self.grid.rows = rows;
            }
        }
        if let Some(val) = lookup("YEARVIEW_COLUMNS") {
            if let Some(columns) = parse_env("YEARVIEW_COLUMNS", &val) {
                self.grid.columns = columns;
            }
        }
        if let Some(val) = lookup("YEARVIEW_FIRST_DAY_OF_WEEK") {
            if let Some(day) = parse_env("YEARVIEW_FIRST_DAY_OF_WEEK", &val) {
                self.grid.first_day_of_week = day;
            }
        }
        if let Some(val) = lookup("YEARVIEW_WEEKEND_DAYS") {
            let days: Option<Vec<u8>> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_env("YEARVIEW_WEEKEND_DAYS", s))
                .collect();
            if let Some(days) = days {
                self.grid.weekend_days = days;
            }
        }

        // Behaviour settings
        if let Some(val) = lookup("YEARVIEW_STICKY_SELECTION") {
            self.behavior.sticky_selection = parse_flag(&val);
        }
        if let Some(val) = lookup("YEARVIEW_MULTI_SELECTION") {
            self.behavior.multi_selection = parse_flag(&val);
        }

        // Style settings
        if let Some(val) = lookup("YEARVIEW_TITLE_GRAVITY") {
            self.style.title_gravity = val;
        }

        // Surface settings
        if let Some(val) = lookup("YEARVIEW_WIDTH") {
            if let Some(width) = parse_env("YEARVIEW_WIDTH", &val) {
                self.surface.width = width;
            }
        }
        if let Some(val) = lookup("YEARVIEW_HEIGHT") {
            if let Some(height) = parse_env("YEARVIEW_HEIGHT", &val) {
                self.surface.height = height;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from yearview.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Grid parameters for the configured year, or `current_year` when none is set.
    pub fn grid_parameters(&self, current_year: i32) -> Result<GridParameters> {
        let g = &self.grid;
        let weekend_days = WeekendDays::from_days(g.weekend_days.iter().copied())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let params = GridParameters {
            year: g.year.unwrap_or(current_year),
            rows: g.rows,
            columns: g.columns,
            first_day_of_week: g.first_day_of_week,
            horizontal_spacing: g.horizontal_spacing,
            vertical_spacing: g.vertical_spacing,
            margin_below_month_name: g.margin_below_month_name,
            weekend_days,
            day_name_transcends_weekend: g.day_name_transcends_weekend,
        };
        params.validate().map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(params)
    }

    pub fn date_formatter(&self) -> Result<PatternDateFormatter> {
        PatternDateFormatter::new(self.behavior.date_pattern.clone())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Check every value that can be checked without a surface.
    ///
    /// Title gravity and shape names are not checked here: unknown names fall
    /// back to a default when the style is built.
    pub fn validate(&self) -> Result<()> {
        self.grid_parameters(2000)?;
        self.date_formatter()?;
        for (field, value) in self.style.colors() {
            parse_color(field, value)?;
        }
        let lengths = [
            ("style.month_name_size", self.style.month_name_size),
            ("style.day_name_size", self.style.day_name_size),
            ("style.day_text_size", self.style.day_text_size),
            ("style.month_selection_margin", self.style.month_selection_margin),
            ("style.touch_padding", self.style.touch_padding),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{field} must be a non-negative length, got {value}")));
            }
        }
        if !(self.surface.width.is_finite() && self.surface.height.is_finite())
            || self.surface.width <= 0.0
            || self.surface.height <= 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "surface must have a positive size, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        Ok(())
    }
}
