use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

use crate::models::{LatLng, DEFAULT_LISTING_LIMIT, MAX_LISTING_LIMIT};

pub const SETTINGS_PATH_VAR: &str = "INNSIGHT_SETTINGS";
pub const API_URL_VAR: &str = "INNSIGHT_API_URL";
pub const CITY_VAR: &str = "INNSIGHT_CITY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub api_base_url: String,
    pub city: String,
    pub listing_limit: u32,
    pub max_listing_limit: u32,
    /// Bars shown in the city-wide price-by-area chart.
    pub top_neighbourhoods: usize,
    pub top_hosts: u32,
    pub word_limit: u32,
    pub currency_symbol: String,
    pub request_timeout_secs: u64,
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub fit_padding_px: u32,
    pub fit_max_zoom: u8,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".into(),
            city: "london".into(),
            listing_limit: DEFAULT_LISTING_LIMIT,
            max_listing_limit: MAX_LISTING_LIMIT,
            top_neighbourhoods: 10,
            top_hosts: 10,
            word_limit: 50,
            currency_symbol: "£".into(),
            request_timeout_secs: 30,
            default_center: LatLng {
                lat: 51.5074,
                lng: -0.1278,
            },
            default_zoom: 11,
            fit_padding_px: 50,
            fit_max_zoom: 15,
        }
    }
}

impl DashboardSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub struct SettingsStore {
    path: Option<PathBuf>,
    data: DashboardSettings,
}

impl SettingsStore {
    /// Reads settings from `path` when it exists. Unparseable files fall back
    /// to defaults rather than aborting startup.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let data = match &path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings from {}", path.display()))?;
                serde_json::from_str(&contents).unwrap_or_default()
            }
            _ => DashboardSettings::default(),
        };

        Ok(Self { path, data })
    }

    /// Settings file named by `INNSIGHT_SETTINGS`, then the URL and city
    /// environment overrides on top.
    pub fn from_env() -> Result<Self> {
        let path = env::var(SETTINGS_PATH_VAR).ok().map(PathBuf::from);
        let mut store = Self::new(path)?;
        store.apply_overrides(env::var(API_URL_VAR).ok(), env::var(CITY_VAR).ok());
        Ok(store)
    }

    fn apply_overrides(&mut self, api_url: Option<String>, city: Option<String>) {
        if let Some(url) = api_url.filter(|value| !value.trim().is_empty()) {
            self.data.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(city) = city.filter(|value| !value.trim().is_empty()) {
            self.data.city = city.trim().to_lowercase();
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn settings(&self) -> DashboardSettings {
        self.data.clone()
    }
}
