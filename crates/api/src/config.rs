use crate::auth::jwt::JwtConfig;

/// Default number of concurrent investor writes during a company fan-out.
const DEFAULT_FANOUT_CONCURRENCY: usize = 8;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on in-flight investor writes while fanning out a new company.
    pub fanout_concurrency: usize,
    /// PostgreSQL URL. `None` serves from the in-memory store.
    pub database_url: Option<String>,
    /// Admin account created at startup if it does not exist yet.
    pub bootstrap_admin: Option<AdminCredentials>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Email and plaintext password of the startup admin account.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `FANOUT_CONCURRENCY`   | `8`                        |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    /// | `ADMIN_EMAIL`          | unset                      |
    /// | `ADMIN_PASSWORD`       | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers and on a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let fanout_concurrency: usize = std::env::var("FANOUT_CONCURRENCY")
            .unwrap_or_else(|_| DEFAULT_FANOUT_CONCURRENCY.to_string())
            .parse()
            .expect("FANOUT_CONCURRENCY must be a valid usize");
        assert!(fanout_concurrency > 0, "FANOUT_CONCURRENCY must be at least 1");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let bootstrap_admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() => Some(AdminCredentials { email, password }),
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            fanout_concurrency,
            database_url,
            bootstrap_admin,
            jwt,
        }
    }
}
