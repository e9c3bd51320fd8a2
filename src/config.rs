use std::env;

/// Process configuration, read once at startup from environment variables
/// (a `.env` file is honored when present). Every knob has a default so the
/// server boots with no configuration at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// Directory served under /images for character artwork.
    pub images_path: String,

    /// Number of tokio worker threads (0 = number of CPU cores)
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide HS256 signing secret. Read-only after startup.
    pub jwt_secret: String,

    pub token_expiry_hours: i64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/grandline.db".to_string(),
            log_level: "info".to_string(),
            images_path: "images".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-in-production".to_string(),
            token_expiry_hours: 24,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.server.cors_allowed_origins);

        Ok(Self {
            general: GeneralConfig {
                database_url: env_or("DATABASE_URL", defaults.general.database_url),
                log_level: env_or("LOG_LEVEL", defaults.general.log_level),
                images_path: env_or("IMAGES_PATH", defaults.general.images_path),
                worker_threads: env_or("WORKER_THREADS", defaults.general.worker_threads),
                max_db_connections: env_or(
                    "MAX_DB_CONNECTIONS",
                    defaults.general.max_db_connections,
                ),
                min_db_connections: env_or(
                    "MIN_DB_CONNECTIONS",
                    defaults.general.min_db_connections,
                ),
            },
            server: ServerConfig {
                port: env_or("PORT", defaults.server.port),
                cors_allowed_origins,
            },
            auth: AuthConfig {
                jwt_secret: env_or("JWT_SECRET", defaults.auth.jwt_secret),
                token_expiry_hours: env_or("TOKEN_EXPIRY_HOURS", defaults.auth.token_expiry_hours),
            },
        })
    }
}
