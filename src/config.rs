//! Configuration persistence for fracpie settings

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ShapeColor {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to RGBA bytes (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }

    /// `#rrggbb` form, as used in SVG attributes
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Matplotlib's default blue
        Self::from_rgb_u8(0x1f, 0x77, 0xb4)
    }
}

impl FromStr for ShapeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected a #rrggbb color, got {s:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("expected a #rrggbb color, got {s:?}"))
        };
        Ok(Self::from_rgb_u8(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// File format for the rendered diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FracpieConfig {
    /// Circle radius in diagram units
    pub radius: f64,
    /// Fill for shaded sectors
    pub fill_color: ShapeColor,
    /// Outline, divider and label color
    pub line_color: ShapeColor,
    pub background: ShapeColor,
    /// Minimum side of the square canvas, grown to fit larger circles
    pub canvas_size: u32,
    /// Font family used for labels
    pub label_font: String,
    pub default_format: OutputFormat,
}

impl Default for FracpieConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            fill_color: ShapeColor::default(),
            line_color: ShapeColor::BLACK,
            background: ShapeColor::WHITE,
            canvas_size: 800,
            label_font: "Arial".to_string(),
            default_format: OutputFormat::Png,
        }
    }
}

impl FracpieConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "fracpie";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("Could not locate a config directory, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Could not read config {}: {:?}", path.display(), err);
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&data) {
            Ok(config) if config.radius > 0.0 && config.radius.is_finite() => config,
            Ok(config) => {
                log::warn!(
                    "Ignoring non-positive radius {} in config, using defaults",
                    config.radius
                );
                Self {
                    radius: Self::default().radius,
                    ..config
                }
            }
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match Self::path() {
            Some(path) => {
                if let Err(err) = self.save_to(&path) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            None => log::error!("Could not locate a config directory for saving"),
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let c: ShapeColor = "#1f77b4".parse().unwrap();
        assert_eq!(c.to_hex(), "#1f77b4");
        assert_eq!(ShapeColor::default().to_hex(), "#1f77b4");
        assert_eq!(ShapeColor::BLACK.to_rgba_u8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!("#12345".parse::<ShapeColor>().is_err());
        assert!("zzzzzz".parse::<ShapeColor>().is_err());
        assert!("+1+2+3".parse::<ShapeColor>().is_err());
        assert!("#+1+2+3".parse::<ShapeColor>().is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a/b.SVG")),
            Some(OutputFormat::Svg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("x.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_path(Path::new("x.jpg")), None);
        assert_eq!(OutputFormat::Svg.extension(), "svg");
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FracpieConfig::load_from(&dir.path().join("nope.json"));
        assert_eq!(config, FracpieConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fracpie").join("config.json");
        let config = FracpieConfig {
            radius: 120.0,
            default_format: OutputFormat::Svg,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(FracpieConfig::load_from(&path), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"radius": 50.0}"#).unwrap();
        let config = FracpieConfig::load_from(&path);
        assert_eq!(config.radius, 50.0);
        assert_eq!(config.canvas_size, 800);
    }

    #[test]
    fn test_bad_radius_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"radius": -3.0, "canvas_size": 640}"#).unwrap();
        let config = FracpieConfig::load_from(&path);
        assert_eq!(config.radius, 200.0);
        assert_eq!(config.canvas_size, 640);
    }
}
