use anyhow::{Context, Result, bail};
use jsonwebtoken::Algorithm;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
/// One year
const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_algorithm = match lookup("JWT_ALGORITHM") {
            Some(value) => value
                .parse::<Algorithm>()
                .with_context(|| format!("Unknown JWT_ALGORITHM {value}"))?,
            None => Algorithm::HS256,
        };
        if !matches!(
            jwt_algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!("JWT_ALGORITHM must be one of HS256, HS384, HS512 to sign with JWT_SECRET");
        }

        let jwt_secret = lookup("JWT_SECRET").context("Cannot load JWT_SECRET env variable")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let token_ttl_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(value) => value
                .parse()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a number")?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&token_ttl_minutes) {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {MAX_TOKEN_TTL_MINUTES}");
        }

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            jwt_secret,
            jwt_algorithm,
            token_ttl_minutes,
            bcrypt_cost: match lookup("BCRYPT_COST") {
                Some(value) => value.parse().context("BCRYPT_COST must be a number")?,
                None => bcrypt::DEFAULT_COST,
            },
        })
    }
}
