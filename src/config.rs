use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub shop_name: String,
    pub admin_user: String,
    pub admin_password: String,
    pub admin_display_name: String,
    pub event_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            shop_name: "MechEase".to_string(),
            admin_user: "admin".to_string(),
            admin_password: "admin".to_string(),
            admin_display_name: "Workshop Admin".to_string(),
            event_buffer: 64,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source; unset values fall back to
    /// the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let text = |name: &str, fallback: String| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value,
            })?,
            None => defaults.port,
        };

        let event_buffer = match lookup("EVENT_BUFFER") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "EVENT_BUFFER",
                        expected: "positive integer",
                        value,
                    })
                }
            },
            None => defaults.event_buffer,
        };

        Ok(Self {
            bind_address: text("BIND_ADDRESS", defaults.bind_address),
            port,
            shop_name: text("SHOP_NAME", defaults.shop_name),
            admin_user: text("ADMIN_USER", defaults.admin_user),
            admin_password: text("ADMIN_PASSWORD", defaults.admin_password),
            admin_display_name: text("ADMIN_DISPLAY_NAME", defaults.admin_display_name),
            event_buffer,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin_password == "admin"
    }
}
