use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendscope_core::currency::DEFAULT_USD_TO_INR;
use spendscope_core::{Currency, ExchangeRates};
use spendscope_finance::AnalysisConfig;
use spendscope_ingest::LoadOptions;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::ensure_spendscope_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub currency: CurrencySection,
    pub ingest: IngestSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySection {
    /// Display currency when --currency is not given
    pub default: Currency,
    /// Fixed USD -> INR multiplier
    pub usd_to_inr: f64,
}

impl Default for CurrencySection {
    fn default() -> Self {
        Self {
            default: Currency::Usd,
            usd_to_inr: DEFAULT_USD_TO_INR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Simulated processing time for PDF uploads
    pub processing_delay_ms: u64,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            processing_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn rates(&self) -> ExchangeRates {
        ExchangeRates::new(self.currency.usd_to_inr)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            processing_delay: Duration::from_millis(self.ingest.processing_delay_ms),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendscope_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    anyhow::ensure!(
        cfg.currency.usd_to_inr.is_finite() && cfg.currency.usd_to_inr > 0.0,
        "currency.usd_to_inr must be a positive number"
    );
    Ok(cfg)
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(s.contains("[analysis]"));
        assert!(s.contains("usd_to_inr = 75.0"));
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config("[currency]\ndefault = \"INR\"\nusd_to_inr = 83.1\n").unwrap();
        assert_eq!(cfg.currency.default, Currency::Inr);
        assert_eq!(cfg.rates().usd_to_inr, 83.1);
        assert_eq!(cfg.analysis.model, "gpt-3.5-turbo");
        assert_eq!(cfg.load_options().processing_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(parse_config("[currency]\nusd_to_inr = 0.0\n").is_err());
    }
}
