use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WxError};
use crate::state::CurrentLocation;
use crate::types::Coordinates;

pub const DEFAULT_CONFIG_PATH: &str = "wxbot.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
pub const DEFAULT_JOURNAL_PATH: &str = "log.txt";

/// Env vars the bot has always read, mapped onto their config keys.
const LEGACY_ENV: [(&str, &str); 3] = [
    ("WEATHER_API_KEY", "weather.api_key"),
    ("DISCORD_TOKEN", "discord.bot_token"),
    ("CHANNEL_ID", "discord.channel_id"),
];

/// Top-level config (wxbot.toml + WXBOT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WxConfig {
    pub discord: DiscordConfig,
    pub weather: WeatherConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    /// Destination for scheduled reports. When unset the reporter is not installed.
    #[serde(default)]
    pub channel_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap key, shared by the geocoding and current-weather endpoints.
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Location reported until someone changes it from chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            label: "Yukuhashi,Fukuoka,JP".to_string(),
            latitude: 33.7287,
            longitude: 130.983,
        }
    }
}

/// One daily report slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// `HH:MM` or a daily cron expression such as `0 8 * * *`.
    pub time: String,
    /// Period label shown in the report title.
    pub label: String,
}

impl ScheduleEntry {
    fn new(time: &str, label: &str) -> Self {
        Self {
            time: time.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// IANA zone the entries are evaluated in, e.g. `Asia/Tokyo`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_entries")]
    pub entries: Vec<ScheduleEntry>,
    /// Consecutive failed scheduled fetches before an error is logged.
    #[serde(default = "default_alert_after_misses")]
    pub alert_after_misses: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            entries: default_entries(),
            alert_after_misses: default_alert_after_misses(),
        }
    }
}

/// Chat command literals. Matching is case- and whitespace-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_change_location")]
    pub change_location: String,
    #[serde(default = "default_query_location")]
    pub query_location: String,
    #[serde(default = "default_report_now")]
    pub report_now: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            change_location: default_change_location(),
            query_location: default_query_location(),
            report_now: default_report_now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_journal_path")]
    pub path: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_journal_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_units() -> String {
    "metric".to_string()
}
fn default_lang() -> String {
    "ja".to_string()
}
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_entries() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::new("0 8 * * *", "08:00"),
        ScheduleEntry::new("0 12 * * *", "12:00"),
        ScheduleEntry::new("0 17 * * *", "17:00"),
    ]
}
fn default_alert_after_misses() -> u32 {
    3
}
fn default_change_location() -> String {
    "Change/".to_string()
}
fn default_query_location() -> String {
    "now city".to_string()
}
fn default_report_now() -> String {
    "!天気".to_string()
}
fn default_journal_path() -> String {
    DEFAULT_JOURNAL_PATH.to_string()
}

impl WxConfig {
    /// Load config from a TOML file with env var overrides.
    ///
    /// Later sources win:
    ///   1. the TOML file (explicit path, else `./wxbot.toml`)
    ///   2. `WEATHER_API_KEY`, `DISCORD_TOKEN`, `CHANNEL_ID`
    ///   3. `WXBOT_*`, with `__` separating nested keys (`WXBOT_WEATHER__LANG=ja`)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

        let config: WxConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(legacy_env())
            .merge(Env::prefixed("WXBOT_").split("__"))
            .extract()
            .map_err(|e| WxError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configs the bot cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.discord.bot_token.trim().is_empty() {
            return Err(WxError::Config("discord.bot_token is empty".to_string()));
        }
        if self.weather.api_key.trim().is_empty() {
            return Err(WxError::Config("weather.api_key is empty".to_string()));
        }
        self.timezone()?;
        self.default_location()?;
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.schedule.timezone.parse::<Tz>().map_err(|e| {
            WxError::Config(format!(
                "schedule.timezone '{}': {e}",
                self.schedule.timezone
            ))
        })
    }

    /// The configured starting location as a state record.
    pub fn default_location(&self) -> Result<CurrentLocation> {
        let coords = Coordinates::new(self.location.latitude, self.location.longitude)
            .map_err(|e| WxError::Config(format!("location: {e}")))?;
        Ok(CurrentLocation {
            label: self.location.label.clone(),
            coords,
        })
    }
}

fn legacy_env() -> Env {
    Env::raw()
        .only(&LEGACY_ENV.map(|(var, _)| var))
        .map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, target)| (*target).into())
                .unwrap_or_else(|| key.as_str().to_string().into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const MINIMAL: &str = r#"
        [discord]
        bot_token = "token"

        [weather]
        api_key = "key"
    "#;

    fn load() -> figment::Result<WxConfig> {
        WxConfig::load(Some("wxbot.toml")).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn defaults_fill_optional_sections() {
        Jail::expect_with(|jail| {
            jail.create_file("wxbot.toml", MINIMAL)?;
            let config = load()?;

            assert_eq!(config.weather.base_url, DEFAULT_API_BASE_URL);
            assert_eq!(config.weather.units, "metric");
            assert_eq!(config.weather.lang, "ja");
            assert_eq!(config.discord.channel_id, None);
            assert_eq!(config.location.label, "Yukuhashi,Fukuoka,JP");
            assert_eq!(config.schedule.entries.len(), 3);
            assert_eq!(config.schedule.entries[0].label, "08:00");
            assert_eq!(config.commands.change_location, "Change/");
            assert_eq!(config.commands.report_now, "!天気");
            assert_eq!(config.journal.path, "log.txt");
            assert_eq!(config.timezone().unwrap(), chrono_tz::Asia::Tokyo);
            Ok(())
        });
    }

    #[test]
    fn legacy_env_vars_are_honoured() {
        Jail::expect_with(|jail| {
            jail.create_file("wxbot.toml", MINIMAL)?;
            jail.set_env("WEATHER_API_KEY", "from-env");
            jail.set_env("CHANNEL_ID", "123456789012345678");
            let config = load()?;

            assert_eq!(config.weather.api_key, "from-env");
            assert_eq!(config.discord.channel_id, Some(123456789012345678));
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_overrides_nested_keys() {
        Jail::expect_with(|jail| {
            jail.create_file("wxbot.toml", MINIMAL)?;
            jail.set_env("WXBOT_WEATHER__LANG", "en");
            jail.set_env("WXBOT_COMMANDS__REPORT_NOW", "!tenki");
            let config = load()?;

            assert_eq!(config.weather.lang, "en");
            assert_eq!(config.commands.report_now, "!tenki");
            Ok(())
        });
    }

    #[test]
    fn empty_token_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "wxbot.toml",
                "[discord]\nbot_token = \"\"\n[weather]\napi_key = \"key\"\n",
            )?;
            let err = WxConfig::load(Some("wxbot.toml")).unwrap_err();
            assert!(matches!(err, WxError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "wxbot.toml",
                &format!("{MINIMAL}\n[schedule]\ntimezone = \"Mars/Olympus\"\n"),
            )?;
            let err = WxConfig::load(Some("wxbot.toml")).unwrap_err();
            assert!(err.to_string().contains("Mars/Olympus"));
            Ok(())
        });
    }
}
