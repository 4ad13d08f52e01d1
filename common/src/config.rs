use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

/// Process-wide configuration, loaded once from the environment
/// (optionally seeded from a dotenv file).
#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: i64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let log_file = env_or("LOG_FILE", "logs/attendance-api.log");
            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }

            Config {
                project_name: env_or("PROJECT_NAME", "attendance-api"),
                log_level: env_or("LOG_LEVEL", "info"),
                log_file,
                database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
                host: env_or("HOST", "127.0.0.1"),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
                jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
                jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                    .ok()
                    .and_then(|m| m.parse().ok())
                    .unwrap_or(60),
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }
}
