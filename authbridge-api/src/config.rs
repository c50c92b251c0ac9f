/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 5000)
/// - `CLIENT_URL`: Allowed CORS origin (absent: permissive CORS for development)
/// - `DB_HOST`: PostgreSQL host (default: localhost)
/// - `DB_PORT`: PostgreSQL port (default: 5432)
/// - `DB_USER`: PostgreSQL user (required)
/// - `DB_PASSWORD`: PostgreSQL password (default: empty)
/// - `DB_DATABASE`: PostgreSQL database name (required)
/// - `DB_MAX_CONNECTIONS`: Connection pool size (default: 10)
/// - `REDIS_URL`: Document store connection URL (required)
/// - `JWT_SECRET`: Secret key for token signing (required)
/// - `HASH_COST`: bcrypt cost factor (default: 10)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use authbridge_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```
use authbridge_shared::auth::password::DEFAULT_HASH_COST;
use authbridge_shared::db::pool::DatabaseConfig;
use authbridge_shared::docstore::client::DocStoreConfig;
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Credential store (PostgreSQL) configuration
    pub database: DatabaseConfig,

    /// Profile document store (Redis) configuration
    pub docstore: DocStoreConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    pub hashing: HashingConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origin
    ///
    /// None means permissive CORS (development mode).
    pub client_url: Option<String>,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// IMPORTANT: This must be kept secret.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Password hashing configuration
#[derive(Debug, Clone)]
pub struct HashingConfig {
    /// bcrypt cost factor
    ///
    /// Each +1 doubles the hashing work. 10 is the conventional default;
    /// tests drop to 4 to stay fast.
    pub cost: u32,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    ///
    /// # Example
    ///
    /// ```no_run
    /// use authbridge_api::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_env()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()?;
        let client_url = env::var("CLIENT_URL").ok();

        let database = DatabaseConfig {
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("DB_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse::<u16>()?,
            user: env::var("DB_USER")
                .map_err(|_| anyhow::anyhow!("DB_USER environment variable is required"))?,
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            database: env::var("DB_DATABASE")
                .map_err(|_| anyhow::anyhow!("DB_DATABASE environment variable is required"))?,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()?,
            ..DatabaseConfig::default()
        };

        let docstore = DocStoreConfig::from_env()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let hash_cost = match env::var("HASH_COST") {
            Ok(raw) => raw.parse::<u32>()?,
            Err(_) => DEFAULT_HASH_COST,
        };
        if !(4..=31).contains(&hash_cost) {
            anyhow::bail!("HASH_COST must be between 4 and 31");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                client_url,
            },
            database,
            docstore,
            jwt: JwtConfig { secret: jwt_secret },
            hashing: HashingConfig { cost: hash_cost },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                client_url: None,
            },
            database: DatabaseConfig::default(),
            docstore: DocStoreConfig {
                url: "redis://localhost:6379".to_string(),
                connection_timeout_secs: 5,
                command_timeout_secs: 10,
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
            },
            hashing: HashingConfig {
                cost: DEFAULT_HASH_COST,
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }
}
