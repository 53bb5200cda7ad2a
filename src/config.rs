//! Configuration for the pgmp-prep server and study calendar

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calendar::Calendar;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub study: StudyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Study-period calendar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// First day of the study period
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Length of the study period in days
    #[serde(default = "default_total_days")]
    pub total_days: u32,

    /// Exam day
    #[serde(default = "default_exam_date")]
    pub exam_date: NaiveDate,

    /// Weekdays treated as weekend. The plan is also published against the
    /// UAE calendar, which uses ["friday", "saturday"].
    #[serde(default = "default_weekend", with = "weekday_names")]
    pub weekend: Vec<Weekday>,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date")
}

fn default_total_days() -> u32 {
    68
}

fn default_exam_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 23).expect("valid date")
}

fn default_weekend() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: default_bind(),
                port: default_port(),
            },
            study: StudyConfig::default(),
        }
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            total_days: default_total_days(),
            exam_date: default_exam_date(),
            weekend: default_weekend(),
        }
    }
}

impl StudyConfig {
    /// The calendar described by this configuration
    pub fn calendar(&self) -> Calendar {
        Calendar {
            start_date: self.start_date,
            total_days: self.total_days,
            weekend: self.weekend.clone(),
        }
    }
}

impl Config {
    /// Default config path
    pub fn default_path() -> Result<PathBuf> {
        // Check environment variable first
        if let Ok(env_path) = std::env::var("PGMP_PREP_CONFIG") {
            return Ok(PathBuf::from(env_path));
        }

        // Check for config in current directory
        let local = PathBuf::from("config.toml");
        if local.exists() {
            return Ok(local);
        }

        // Check /data/config.toml (Docker default)
        let data_config = PathBuf::from("/data/config.toml");
        if data_config.exists() {
            return Ok(data_config);
        }

        // Then check XDG config
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("pgmp-prep");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Add helpful comments
        let with_comments = format!(
            "# pgmp-prep configuration\n\
             # [study] weekend controls which days count as weekend sessions;\n\
             # use [\"friday\", \"saturday\"] for the UAE calendar.\n\n\
             {}\n",
            content
        );

        std::fs::write(path, with_comments).context("Failed to write config file")?;

        Ok(())
    }
}

mod weekday_names {
    use chrono::Weekday;
    use serde::de::Error;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(name(*day))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|n| {
                n.parse::<Weekday>()
                    .map_err(|_| D::Error::custom(format!("unknown weekday: {n}")))
            })
            .collect()
    }

    fn name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        }
    }
}
