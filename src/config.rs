//! Environment-driven configuration for the three services and the database pool.

use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_pool_size: u32,
    pub graphql_port: u16,
    pub rest_port: u16,
    pub messaging_port: u16,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Read configuration from the environment, falling back to local-development
    /// defaults. `DATABASE_URL` wins over the individual `DB_*` variables.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
            let port: u16 = env_or("DB_PORT", 5432);
            let name = env::var("DB_NAME").unwrap_or_else(|_| "portfolio_db".into());
            let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".into());
            let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "password".into());
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        });
        Config {
            database_url,
            db_pool_size: env_or("DB_POOL_SIZE", 20),
            graphql_port: env_or("GRAPHQL_PORT", 5051),
            rest_port: env_or("REST_PORT", 5052),
            messaging_port: env_or("MESSAGING_PORT", 5005),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".into()),
            ),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        let origins = parse_origins(" http://localhost:3000, http://localhost:3001 ,");
        assert_eq!(
            origins,
            vec!["http://localhost:3000".to_string(), "http://localhost:3001".to_string()]
        );
    }

    #[test]
    fn empty_origin_list_stays_empty() {
        assert!(parse_origins("").is_empty());
    }
}
