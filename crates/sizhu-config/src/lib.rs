use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Engine-wide calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Meridian of the civil timezone, degrees east.
    pub standard_meridian: f64,
    /// Offset of civil time from UTC, minutes.
    pub utc_offset_minutes: i32,
    pub min_year: i32,
    pub max_year: i32,
    /// Longitude assumed when a birth record carries none.
    pub default_longitude: Option<f64>,
    pub dayun_count: usize,
    /// Optional precomputed solar-term table (JSON).
    pub term_table: Option<PathBuf>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            standard_meridian: default_standard_meridian(),
            utc_offset_minutes: default_utc_offset_minutes(),
            min_year: default_min_year(),
            max_year: default_max_year(),
            default_longitude: None,
            dayun_count: default_dayun_count(),
            term_table: None,
        }
    }
}

impl ChartSettings {
    pub fn supports_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Longitude to correct with: the configured default, else the meridian itself.
    pub fn fallback_longitude(&self) -> f64 {
        self.default_longitude.unwrap_or(self.standard_meridian)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_standard_meridian")]
    standard_meridian: f64,
    #[serde(default = "default_utc_offset_minutes")]
    utc_offset_minutes: i32,
    #[serde(default = "default_min_year")]
    min_year: i32,
    #[serde(default = "default_max_year")]
    max_year: i32,
    #[serde(default)]
    default_longitude: Option<f64>,
    #[serde(default = "default_dayun_count")]
    dayun_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct OracleToml {
    #[serde(default)]
    term_table: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
    #[serde(default)]
    oracle: Option<OracleToml>,
}

fn default_standard_meridian() -> f64 {
    120.0
}

fn default_utc_offset_minutes() -> i32 {
    480
}

fn default_min_year() -> i32 {
    1800
}

fn default_max_year() -> i32 {
    2200
}

fn default_dayun_count() -> usize {
    10
}

const CONFIG_PATHS: [&str; 2] = ["configs/sizhu.toml", "../../configs/sizhu.toml"];

/// Try the common relative locations of `configs/sizhu.toml`.
pub fn read_settings_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load sizhu.toml from {:?}", CONFIG_PATHS);
}

pub fn load_settings_from_str(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse sizhu.toml: {e}"))?;

    let mut settings = ChartSettings::default();
    if let Some(chart) = root.chart {
        let ChartToml {
            standard_meridian,
            utc_offset_minutes,
            min_year,
            max_year,
            default_longitude,
            dayun_count,
        } = chart;
        settings.standard_meridian = standard_meridian;
        settings.utc_offset_minutes = utc_offset_minutes;
        settings.min_year = min_year;
        settings.max_year = max_year;
        settings.default_longitude = default_longitude;
        settings.dayun_count = dayun_count;
    }
    settings.term_table = root.oracle.and_then(|o| o.term_table);

    validate_settings(&settings)?;
    Ok(settings)
}

pub fn load_settings_from_path(path: &Path) -> anyhow::Result<ChartSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    load_settings_from_str(&text)
}

/// Load from the default locations, or fall back to built-in defaults if no file exists.
pub fn load_settings() -> anyhow::Result<ChartSettings> {
    match read_settings_toml_text() {
        Ok(text) => load_settings_from_str(&text),
        Err(_) => Ok(ChartSettings::default()),
    }
}

pub fn validate_settings(settings: &ChartSettings) -> anyhow::Result<()> {
    if settings.min_year > settings.max_year {
        anyhow::bail!(
            "chart.min_year ({}) is after chart.max_year ({})",
            settings.min_year,
            settings.max_year
        );
    }
    if !(-180.0..=180.0).contains(&settings.standard_meridian) {
        anyhow::bail!(
            "chart.standard_meridian must be within [-180, 180], got {}",
            settings.standard_meridian
        );
    }
    if let Some(lon) = settings.default_longitude {
        if !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("chart.default_longitude must be within [-180, 180], got {lon}");
        }
    }
    if settings.utc_offset_minutes.abs() > 14 * 60 {
        anyhow::bail!(
            "chart.utc_offset_minutes must be within ±840, got {}",
            settings.utc_offset_minutes
        );
    }
    if settings.dayun_count == 0 {
        anyhow::bail!("chart.dayun_count must be at least 1");
    }
    if let Some(path) = &settings.term_table {
        if path.as_os_str().is_empty() {
            anyhow::bail!("oracle.term_table is set but empty");
        }
    }
    Ok(())
}
