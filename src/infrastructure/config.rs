use crate::domain::calendar::CalendarZone;
use crate::domain::entity::Entity;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct TrendConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub source: SourceSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSettings {
    Http { url: String },
    File { path: PathBuf },
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowSettings {
    pub default_days: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { default_days: 30 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplaySettings {
    /// Minutes east of UTC. Absent means the host's local timezone.
    pub utc_offset_minutes: Option<i32>,
}

impl DisplaySettings {
    pub fn calendar_zone(&self) -> anyhow::Result<CalendarZone> {
        match self.utc_offset_minutes {
            None => Ok(CalendarZone::Local),
            Some(minutes) => CalendarZone::from_offset_minutes(minutes)
                .ok_or_else(|| anyhow::anyhow!("utc_offset_minutes out of range: {}", minutes)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EntityConfig {
    pub id: String,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl EntityConfig {
    pub fn to_entity(&self) -> Entity {
        Entity::new(
            self.id.clone(),
            self.label.clone().unwrap_or_else(|| self.id.clone()),
            self.color.clone(),
        )
    }
}

/// Reads `config/trend.*`, then `TREND__SECTION__KEY` environment overrides.
pub fn load_trend_config() -> anyhow::Result<TrendConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/trend"))
        .add_source(config::Environment::with_prefix("TREND").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
