use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::money::Currency;
use crate::ui::messages::{success, warning};
use chrono::Utc;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
        set_rate,
        display,
        ocr_default,
    } = cmd
    {
        // ---- UPDATE VALUES ----
        // Edits start from the file, not from `cfg`, so a --db override is
        // never written back.
        if !set_rate.is_empty() || display.is_some() || ocr_default.is_some() {
            let mut file_cfg = Config::load()?;

            for pair in set_rate {
                let (code, rate) = parse_rate(pair)?;
                file_cfg.set_rate(code, rate)?;
                success(format!("Rate stored: 1 {} = {} {}", file_cfg.base_currency, rate, code));
            }

            if let Some(code) = display {
                file_cfg.display_currency = code.parse()?;
                if file_cfg.rates().rate(file_cfg.display_currency).is_none() {
                    warning(format!(
                        "No rate for {} yet; amounts will show in {} until one is set.",
                        file_cfg.display_currency, file_cfg.base_currency
                    ));
                }
            }

            if let Some(code) = ocr_default {
                file_cfg.ocr_default_currency = code.parse()?;
            }

            file_cfg.save()?;
            success(format!("Configuration saved to {}", Config::config_file().display()));
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
            let rates = cfg.rates();
            for currency in Currency::ALL {
                match rates.rate(currency) {
                    Some(r) => println!("  1 {} = {r} {currency}", cfg.base_currency),
                    None => println!("  {currency}: no rate"),
                }
            }
            if cfg.rates().is_stale(Utc::now()) {
                warning("Exchange rates are older than 24h (or were never set).");
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(editor.as_deref())?;
        }
    }

    Ok(())
}

/// "JPY=0.11" → (JPY, 0.11)
fn parse_rate(pair: &str) -> AppResult<(Currency, f64)> {
    let (code, rate) = pair
        .split_once('=')
        .ok_or_else(|| AppError::Config(format!("expected CODE=RATE, got '{pair}'")))?;
    let currency: Currency = code.parse()?;
    let rate: f64 = rate
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidAmount(rate.to_string()))?;
    Ok((currency, rate))
}

fn edit(requested: Option<&str>) -> AppResult<()> {
    let path = Config::config_file();

    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor = requested.map(str::to_string).unwrap_or_else(|| default_editor.clone());

    // first attempt: requested editor, then the default one
    for candidate in [editor.as_str(), default_editor.as_str()] {
        match Command::new(candidate).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{candidate}'"));
                return Ok(());
            }
            _ => warning(format!("Editor '{candidate}' not available")),
        }
        if candidate == default_editor {
            break;
        }
    }

    Err(AppError::Config(format!(
        "failed to edit {} with '{editor}' or '{default_editor}'",
        path.display()
    )))
}
