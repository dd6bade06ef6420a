//! Settings command handlers
//!
//! Shows and mutates the persisted settings document. Every mutation is
//! validated before being written back; unknown keys are rejected with the
//! list of valid ones.

use crate::error::{JarvisError, Result};
use crate::storage::JsonStorage;
use colored::Colorize;
use url::Url;

/// Valid settings keys, in display order
const KEYS: &[&str] = &[
    "theme",
    "color_scheme",
    "font_size",
    "tts",
    "api_url",
    "notifications",
    "auto_save",
];

/// Print the merged settings document
pub fn show(storage: &JsonStorage) {
    let settings = storage.load_settings();
    println!("{}", "Settings".bold());
    println!("  theme:         {}", settings.theme);
    println!("  color_scheme:  {}", settings.color_scheme);
    println!("  font_size:     {}", settings.font_size);
    println!("  tts:           {}", settings.tts);
    println!("  api_url:       {}", settings.api_url);
    println!("  notifications: {}", settings.notifications);
    println!("  auto_save:     {}", settings.auto_save);
}

/// Set one settings key and save the document
///
/// # Arguments
///
/// * `key` - Settings key (see `settings show` for the list)
/// * `value` - New value; booleans accept true/false, the theme accepts
///   dark/light, and `api_url` must parse as an absolute URL
pub fn set(storage: &JsonStorage, key: &str, value: &str) -> Result<()> {
    let mut settings = storage.load_settings();

    match key {
        "theme" => {
            let value = value.to_lowercase();
            if value != "dark" && value != "light" {
                return Err(
                    JarvisError::Config(format!("theme must be dark or light, got {}", value))
                        .into(),
                );
            }
            settings.theme = value;
        }
        "color_scheme" => settings.color_scheme = value.to_string(),
        "font_size" => {
            let value = value.to_lowercase();
            if !["small", "medium", "large"].contains(&value.as_str()) {
                return Err(JarvisError::Config(format!(
                    "font_size must be small, medium, or large, got {}",
                    value
                ))
                .into());
            }
            settings.font_size = value;
        }
        "tts" => settings.tts = parse_bool(key, value)?,
        "api_url" => {
            let url = Url::parse(value)
                .map_err(|e| JarvisError::Config(format!("invalid api_url: {}", e)))?;
            settings.api_url = url.to_string().trim_end_matches('/').to_string();
        }
        "notifications" => settings.notifications = parse_bool(key, value)?,
        "auto_save" => settings.auto_save = parse_bool(key, value)?,
        other => {
            return Err(JarvisError::Config(format!(
                "unknown settings key '{}' (valid keys: {})",
                other,
                KEYS.join(", ")
            ))
            .into());
        }
    }

    storage.save_settings(&settings)?;
    println!("Settings saved");
    Ok(())
}

/// Clear all stored data
///
/// Removes every JSON document in the storage directory. Prompts on
/// stdin unless `force` is set.
pub fn reset(storage: &JsonStorage, force: bool) -> Result<()> {
    if !force {
        print!("This removes all settings, stats, and history. Continue? [y/N] ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted");
            return Ok(());
        }
    }

    storage.clear_all()?;
    println!("All stored data cleared");
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => {
            Err(JarvisError::Config(format!("{} must be true or false, got {}", key, other)).into())
        }
    }
}
