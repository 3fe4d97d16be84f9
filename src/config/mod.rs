use crate::errors::{AppError, AppResult};
use crate::money::{Converter, Currency, ExchangeRates, RateSource};
use crate::ocr::DEFAULT_OCR_CURRENCY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    pub base_currency: Currency,
    pub display_currency: Currency,
    pub ocr_default_currency: Currency,
    /// `1 base = rate × currency`.
    pub exchange_rates: BTreeMap<Currency, f64>,
    pub rates_updated_at: Option<DateTime<Utc>>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            base_currency: Currency::Krw,
            display_currency: Currency::Krw,
            ocr_default_currency: DEFAULT_OCR_CURRENCY,
            exchange_rates: BTreeMap::new(),
            rates_updated_at: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtripplanner")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rtripplanner")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtripplanner.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtripplanner.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        fs::write(Self::config_file(), serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    ///
    /// In test mode the config file is left alone and only the database
    /// path is prepared.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        // keep whatever the user already configured (rates, currencies)
        let mut config = if is_test {
            Self::default()
        } else {
            Self::load().unwrap_or_default()
        };
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save()?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }

    /// Rate table built from the configured values.
    pub fn rates(&self) -> ExchangeRates {
        ExchangeRates {
            base: self.base_currency,
            rates: self.exchange_rates.clone(),
            updated_at: self.rates_updated_at,
        }
    }

    /// Converter for the configured display currency. A display currency
    /// without a rate falls back to showing the base currency.
    pub fn converter(&self) -> Converter {
        self.rates()
            .converter(self.display_currency)
            .unwrap_or_else(|_| Converter::identity(self.base_currency))
    }

    /// Store a manually entered rate and stamp the table.
    pub fn set_rate(&mut self, currency: Currency, rate: f64) -> AppResult<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(AppError::InvalidAmount(rate.to_string()));
        }
        if currency == self.base_currency {
            return Err(AppError::Config(format!(
                "{currency} is the base currency; its rate is always 1"
            )));
        }
        self.exchange_rates.insert(currency, rate);
        self.rates_updated_at = Some(Utc::now());
        Ok(())
    }
}

/// The config file is the rate source of the CLI: rates are entered with
/// `config --set-rate`.
impl RateSource for Config {
    fn fetch_rates(&self) -> AppResult<ExchangeRates> {
        Ok(self.rates())
    }
}
