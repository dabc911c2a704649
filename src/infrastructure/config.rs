use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_stream_path")]
    pub stream_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

fn default_stream_path() -> String {
    "stream".to_string()
}

impl ClientConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }

    pub fn stream_url(&self) -> String {
        format!("{}/{}", self.base_url(), self.server.stream_path)
    }
}

pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/client"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_from_settings() {
        let config = ClientConfig {
            server: ServerSettings {
                host: "keghost".to_string(),
                port: 8000,
                stream_path: default_stream_path(),
            },
            viewport: ViewportSettings::default(),
        };

        assert_eq!(config.base_url(), "http://keghost:8000");
        assert_eq!(config.stream_url(), "http://keghost:8000/stream");
    }
}
