use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::layout::{FontFamily, LayoutProfile, PageSize};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
    /// Font whose metrics drive the layout engine's line estimates.
    pub reference_font: FontFamily,
    pub ats_max_keywords: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            page_size: PageSize::Letter,
            reference_font: FontFamily::Helvetica,
            ats_max_keywords: 25,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            port: env_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            page_size: env_or(&lookup, "LAYOUT_PAGE_SIZE", defaults.page_size)
                .context("LAYOUT_PAGE_SIZE must be 'letter' or 'a4'")?,
            reference_font: env_or(&lookup, "LAYOUT_REFERENCE_FONT", defaults.reference_font)
                .context("LAYOUT_REFERENCE_FONT must be 'helvetica' or 'times'")?,
            ats_max_keywords: env_or(&lookup, "ATS_MAX_KEYWORDS", defaults.ats_max_keywords)
                .context("ATS_MAX_KEYWORDS must be a positive integer")?,
        })
    }

    pub fn layout_profile(&self) -> LayoutProfile {
        LayoutProfile {
            page: self.page_size,
            reference_font: self.reference_font,
        }
    }
}

fn env_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("invalid value '{raw}' for {key}: {e}")),
    }
}
