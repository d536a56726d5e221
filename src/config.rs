use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveTime;
use egui::Color32;
use log::{info, warn};
use serde::Deserialize;

use crate::schedule::ResetSchedule;

const CONFIG_PATH_ENV: &str = "FEEDTIMER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_pet_name")]
    pub(crate) pet_name: String,

    #[serde(default = "default_window_title")]
    pub(crate) window_title: String,

    #[serde(default = "default_morning_reset")]
    pub(crate) morning_reset: String,

    #[serde(default = "default_evening_reset")]
    pub(crate) evening_reset: String,

    #[serde(default = "default_update_interval_ms")]
    pub(crate) update_interval_ms: u64,

    #[serde(default = "default_font_size")]
    pub(crate) font_size: f32,

    #[serde(default = "default_text_color")]
    pub(crate) text_color: String,

    #[serde(default = "default_canvas_width")]
    pub(crate) canvas_width: f32,

    #[serde(default = "default_canvas_height")]
    pub(crate) canvas_height: f32,

    #[serde(default)]
    pub(crate) asset_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pet_name: default_pet_name(),
            window_title: default_window_title(),
            morning_reset: default_morning_reset(),
            evening_reset: default_evening_reset(),
            update_interval_ms: default_update_interval_ms(),
            font_size: default_font_size(),
            text_color: default_text_color(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            asset_dir: None,
        }
    }
}

fn default_pet_name() -> String {
    "Jake".to_string()
}

fn default_window_title() -> String {
    "DogTimer".to_string()
}

fn default_morning_reset() -> String {
    "06:00".to_string()
}

fn default_evening_reset() -> String {
    "16:30".to_string()
}

fn default_update_interval_ms() -> u64 {
    1000
}

fn default_font_size() -> f32 {
    24.0
}

fn default_text_color() -> String {
    "black".to_string()
}

fn default_canvas_width() -> f32 {
    800.0
}

fn default_canvas_height() -> f32 {
    480.0
}

impl Config {
    /// Reads the config file if there is one. Anything unusable is logged and
    /// replaced by the defaults, the applet should always come up.
    pub(crate) fn load() -> Self {
        let Some(path) = config_path() else {
            warn!("Could not find config directory, using defaults");
            return Config::default();
        };

        match Config::load_from(&path) {
            Ok(Some(config)) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Ok(None) => {
                info!("No config at {}, using defaults", path.display());
                Config::default()
            }
            Err(err) => {
                warn!("Ignoring config {}: {:?}", path.display(), err);
                Config::default()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).context("Failed to read config")?;
        Config::parse(&contents).map(Some)
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.schedule()?;
        self.text_color()?;
        if self.update_interval_ms == 0 {
            bail!("update_interval_ms must be positive");
        }
        if self.font_size <= 0.0 {
            bail!("font_size must be positive");
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            bail!("canvas size must be positive");
        }
        Ok(())
    }

    pub(crate) fn schedule(&self) -> Result<ResetSchedule> {
        let morning = parse_time(&self.morning_reset).context("Invalid morning_reset")?;
        let evening = parse_time(&self.evening_reset).context("Invalid evening_reset")?;
        Ok(ResetSchedule::new(morning, evening)?)
    }

    pub(crate) fn text_color(&self) -> Result<Color32> {
        parse_color(&self.text_color)
    }

    pub(crate) fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("feedtimer").join("config.toml"))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .with_context(|| format!("Expected HH:MM, got {s:?}"))
}

fn parse_color(s: &str) -> Result<Color32> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Ok(Color32::BLACK),
        "white" => Ok(Color32::WHITE),
        hex => {
            let digits = hex
                .strip_prefix('#')
                .filter(|digits| digits.len() == 6)
                .ok_or_else(|| anyhow!("Unknown colour {s:?}"))?;
            let channel = |i: usize| {
                digits
                    .get(i..i + 2)
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| anyhow!("Unknown colour {s:?}"))
            };
            Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, str::FromStr, time::Duration};

    use chrono::NaiveTime;
    use egui::Color32;

    use crate::{schedule::ResetSchedule, testhelper::TmpDir};

    use super::Config;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn default_schedule() {
        assert_eq!(
            Config::default().schedule().unwrap(),
            ResetSchedule::default()
        );
        assert_eq!(
            Config::default().update_interval(),
            Duration::from_millis(1000)
        );
        assert_eq!(Config::default().text_color().unwrap(), Color32::BLACK);
    }

    #[test]
    fn partial_file() {
        let config = Config::parse(
            r##"
                pet_name = "Rex"
                evening_reset = "18:15"
                text_color = "#ff8000"
                asset_dir = "/opt/feedtimer/assets"
            "##,
        )
        .unwrap();

        assert_eq!(config.pet_name, "Rex");
        assert_eq!(config.window_title, "DogTimer");
        assert_eq!(
            config.schedule().unwrap().evening(),
            NaiveTime::from_str("18:15:00").unwrap()
        );
        assert_eq!(
            config.schedule().unwrap().morning(),
            NaiveTime::from_str("06:00:00").unwrap()
        );
        assert_eq!(
            config.text_color().unwrap(),
            Color32::from_rgb(0xff, 0x80, 0x00)
        );
        assert_eq!(
            config.asset_dir,
            Some(PathBuf::from("/opt/feedtimer/assets"))
        );
    }

    #[test]
    fn accepts_seconds() {
        let config = Config::parse(r#"morning_reset = "05:59:30""#).unwrap();
        assert_eq!(
            config.schedule().unwrap().morning(),
            NaiveTime::from_str("05:59:30").unwrap()
        );
    }

    #[test]
    fn rejects_morning_after_evening() {
        assert!(Config::parse(
            r#"
                morning_reset = "20:00"
                evening_reset = "08:00"
            "#
        )
        .is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::parse(r#"morning_reset = "6am""#).is_err());
        assert!(Config::parse(r#"text_color = "mauve""#).is_err());
        assert!(Config::parse(r##"text_color = "#12345""##).is_err());
        assert!(Config::parse("update_interval_ms = 0").is_err());
        assert!(Config::parse("font_size = -1.0").is_err());
        assert!(Config::parse("pet_name = 3").is_err());
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = TmpDir::new();
        assert_eq!(
            Config::load_from(&tmp.path().join("config.toml")).unwrap(),
            None
        );
    }

    #[test]
    fn loads_file() {
        let tmp = TmpDir::new();
        let path = tmp.write("config.toml", b"pet_name = \"Biscuit\"\n");
        assert_eq!(
            Config::load_from(&path).unwrap().unwrap().pet_name,
            "Biscuit"
        );
    }

    #[test]
    fn broken_file_is_an_error() {
        let tmp = TmpDir::new();
        let path = tmp.write("config.toml", b"pet_name = [");
        assert!(Config::load_from(&path).is_err());
    }
}
