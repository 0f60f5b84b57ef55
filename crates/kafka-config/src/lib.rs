use config::Config;
use config::File;
use rdkafka::ClientConfig;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Sasl {
    pub username: String,
    pub password: String,
    pub mechanisms: String,
}

impl Default for Sasl {
    fn default() -> Self {
        Sasl {
            mechanisms: "PLAIN".to_string(),
            username: "".to_string(),
            password: "".to_string(),
        }
    }
}

/// Connection settings shared by every client this tool creates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KafkaConfig {
    pub securityprotocol: String,
    pub endpoint: String,
    pub sasl: Option<Sasl>,
}

impl KafkaConfig {
    pub fn unsecure(endpoint: String) -> Self {
        Self {
            endpoint,
            securityprotocol: "plaintext".to_string(),
            sasl: None,
        }
    }

    /// Loads defaults, then `.kafka.config.{yaml,json}`, then the file named by
    /// `KAFKA_CONFIG_PATH`, then `KAFKA_*` environment variables.
    pub fn from_env() -> anyhow::Result<KafkaConfig> {
        let mut builder = Config::builder();

        builder = builder.add_source(Config::try_from(&KafkaConfig::default())?);
        builder = builder
            .add_source(File::new(".kafka.config.yaml", config::FileFormat::Yaml).required(false));
        builder = builder
            .add_source(File::new(".kafka.config.json", config::FileFormat::Json).required(false));

        let path_from_env = std::env::var("KAFKA_CONFIG_PATH");
        builder = if let Ok(path_from_env) = path_from_env {
            log::info!("Loading config from: {path_from_env}");
            if path_from_env.ends_with("yaml") || path_from_env.ends_with("yml") {
                builder
                    .add_source(File::new(&path_from_env, config::FileFormat::Yaml).required(true))
            } else if path_from_env.ends_with("json") {
                builder
                    .add_source(File::new(&path_from_env, config::FileFormat::Json).required(true))
            } else {
                log::warn!("File type not supported. Ignore file: {path_from_env}");
                builder
            }
        } else {
            builder
        };

        builder = builder.add_source(config::Environment::with_prefix("KAFKA").separator("_"));

        let kafka_config: KafkaConfig = builder.build()?.try_deserialize()?;
        log::debug!(
            "Resolved kafka config: endpoint={}, security.protocol={}, sasl={}",
            kafka_config.endpoint,
            kafka_config.securityprotocol,
            kafka_config.sasl.is_some()
        );
        Ok(kafka_config)
    }

    /// Bootstrap servers given on the command line win over any configured endpoint.
    pub fn with_bootstrap_servers(mut self, bootstrap_servers: &str) -> Self {
        if self.endpoint != bootstrap_servers {
            log::debug!(
                "Overriding endpoint {} with {}",
                self.endpoint,
                bootstrap_servers
            );
        }
        self.endpoint = bootstrap_servers.to_string();
        self
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        KafkaConfig::unsecure("localhost:9092".to_string())
    }
}

impl From<KafkaConfig> for ClientConfig {
    fn from(config: KafkaConfig) -> Self {
        let mut client_config = ClientConfig::new();

        client_config.set("bootstrap.servers", config.endpoint);
        client_config.set("security.protocol", config.securityprotocol);
        if let Some(sasl) = config.sasl {
            client_config.set("sasl.mechanisms", sasl.mechanisms);
            client_config.set("sasl.username", sasl.username);
            client_config.set("sasl.password", sasl.password);
        }

        client_config
    }
}
