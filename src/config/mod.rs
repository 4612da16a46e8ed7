//! Configuration file management
//!
//! Loads TOML configuration files and provides generator settings.
//! Default config path: ~/.config/wadtext/config.toml

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generator settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input asset locations
    pub input: InputConfig,
    /// Output WAD settings
    pub output: OutputConfig,
    /// Room and wall dimensions
    pub geometry: GeometryConfig,
    /// Texture and flat names
    pub textures: TextureConfig,
    /// Player start
    pub spawn: SpawnConfig,
}

/// Input asset locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Reference atlas image (the texture the wall is drawn with)
    pub atlas: String,
    /// Directory of glyph images, one `<char>.png` per character
    /// plus `long_space.png` and `short_space.png`
    pub glyphs: String,
    /// Word list: one line of text per line, blank line between levels
    pub words: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            atlas: "cyl1_1.gif".to_string(),
            glyphs: "letters".to_string(),
            words: "words.txt".to_string(),
        }
    }
}

/// Map lump naming scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapNaming {
    /// MAP01 .. MAP32
    #[default]
    Doom2,
    /// E1M1 .. E4M9
    Doom1,
}

/// Output WAD settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// PWAD file to write
    pub path: String,
    /// "doom2" (MAPxx) or "doom1" (ExMy)
    pub naming: MapNaming,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "wadtext.wad".to_string(),
            naming: MapNaming::Doom2,
        }
    }
}

/// Room and wall dimensions (map units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Distance from the text wall to the opposite wall
    pub room_width: i32,
    /// Gap along the wall before each line of text
    pub line_pitch: i32,
    /// Extra wall length after the last line
    pub margin: i32,
    /// How far the backing vertex sits behind the wall
    pub backing_depth: i32,
    /// Floor height of the room
    pub floor_height: i32,
    /// Ceiling height of the room and text sector
    pub ceiling_height: i32,
    /// Height of the text band above the floor (atlas height if unset)
    pub text_height: Option<i32>,
    /// Sector light level (0-255)
    pub light_level: i32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            room_width: 256,
            line_pitch: 64,
            margin: 64,
            backing_depth: 8,
            floor_height: 0,
            ceiling_height: 128,
            text_height: None,
            light_level: 192,
        }
    }
}

/// Texture and flat names (up to 8 characters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Wall texture holding the rendered atlas
    pub text: String,
    /// Texture for the plain room walls
    pub wall: String,
    /// Floor flat
    pub floor: String,
    /// Ceiling flat
    pub ceiling: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            text: "CYL1_1".to_string(),
            wall: "STARTAN3".to_string(),
            floor: "FLOOR4_8".to_string(),
            ceiling: "CEIL3_5".to_string(),
        }
    }
}

/// Player start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub x: i32,
    pub y: i32,
    /// Facing in degrees (0 = east, 90 = north)
    pub angle: i32,
    /// Thing type (1 = player 1 start)
    pub thing_type: i32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            x: 128,
            y: 32,
            angle: 90,
            thing_type: 1,
        }
    }
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/wadtext/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. WADTEXT_CONFIG environment variable
        if let Ok(path) = std::env::var("WADTEXT_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/wadtext/config.toml
        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Some(path);
            }
        }

        // 3. System config: /etc/wadtext/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// ~/.config/wadtext/config.toml, whether or not it exists
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wadtext").join("config.toml"))
    }

    /// Load configuration with priority:
    /// 1. WADTEXT_CONFIG environment variable
    /// 2. ~/.config/wadtext/config.toml (user config)
    /// 3. /etc/wadtext/config.toml (system config)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the default settings as a commented template
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let body = toml::to_string_pretty(&Self::default())?;
        let template = format!(
            "# wadtext configuration\n\
             #\n\
             # [geometry] text_height defaults to the atlas height when omitted.\n\
             # [output] naming is \"doom2\" (MAP01-MAP32) or \"doom1\" (E1M1-E4M9).\n\
             \n{}",
            body
        );
        std::fs::write(path, template)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Reject settings that cannot produce a closed room
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        if g.room_width <= 0 {
            bail!("geometry.room_width must be positive (got {})", g.room_width);
        }
        if g.line_pitch <= 0 {
            bail!("geometry.line_pitch must be positive (got {})", g.line_pitch);
        }
        if g.margin <= 0 {
            bail!("geometry.margin must be positive (got {})", g.margin);
        }
        if g.backing_depth <= 0 {
            bail!("geometry.backing_depth must be positive (got {})", g.backing_depth);
        }
        if g.ceiling_height <= g.floor_height {
            bail!(
                "geometry.ceiling_height ({}) must be above floor_height ({})",
                g.ceiling_height,
                g.floor_height
            );
        }
        if let Some(h) = g.text_height {
            if h <= 0 {
                bail!("geometry.text_height must be positive (got {})", h);
            }
        }
        if !(0..=255).contains(&g.light_level) {
            bail!("geometry.light_level must be 0-255 (got {})", g.light_level);
        }

        // Spawn must be inside the room even when the word list is empty
        let s = &self.spawn;
        if s.x <= 0 || s.x >= g.room_width || s.y <= 0 || s.y >= g.line_pitch.min(g.margin) {
            bail!(
                "spawn ({}, {}) must lie inside 0 < x < {} and 0 < y < {}",
                s.x,
                s.y,
                g.room_width,
                g.line_pitch.min(g.margin)
            );
        }

        let t = &self.textures;
        for (key, name) in [
            ("text", &t.text),
            ("wall", &t.wall),
            ("floor", &t.floor),
            ("ceiling", &t.ceiling),
        ] {
            if name.is_empty() || name.len() > 8 || !name.is_ascii() {
                bail!("textures.{} must be 1-8 ASCII characters (got {:?})", key, name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[geometry]
line_pitch = 96

[output]
naming = "doom1"
"#,
        )
        .unwrap();
        assert_eq!(config.geometry.line_pitch, 96);
        assert_eq!(config.geometry.room_width, 256);
        assert_eq!(config.output.naming, MapNaming::Doom1);
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.geometry.text_height = Some(24);
        config.textures.text = "WORDS".to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.geometry.line_pitch = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spawn.x = 300;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.textures.wall = "TOOLONGNAME".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_write_default_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::write_default(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
    }
}
