use chrono::FixedOffset;
use std::env;
use std::str::FromStr;

/// Default JSON body limit (10 MB)
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// UTC offset that decides which calendar day a check-in belongs to
    pub checkin_utc_offset_hours: i32,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: parse_var("PORT", 8080)?,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "./.db/wanrun.db".to_string()),
            checkin_utc_offset_hours: parse_var("CHECKIN_UTC_OFFSET_HOURS", 9)?,
            max_body_bytes: parse_var("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    pub fn checkin_offset(&self) -> Result<FixedOffset, String> {
        checkin_offset(self.checkin_utc_offset_hours)
    }
}

pub fn checkin_offset(hours: i32) -> Result<FixedOffset, String> {
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| format!("CHECKIN_UTC_OFFSET_HOURS out of range: {}", hours))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a valid number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
