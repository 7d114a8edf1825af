use std::env;

use log::warn;

/// Runtime settings, read once at startup. Everything has a default so the
/// binary runs with no environment at all.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: load_port(),
            db_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "collegepath.sqlite".to_string()),
        }
    }
}

fn load_port() -> u16 {
    match env::var("PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid PORT value {:?} ({}), using 8080", raw, e);
            8080
        }),
        Err(_) => 8080,
    }
}
