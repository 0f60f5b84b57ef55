use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use rdkafka::client::ClientContext;
use rdkafka::config::{ClientConfig, RDKafkaLogLevel};
use rdkafka::consumer::{BaseConsumer, Consumer, ConsumerContext};
use rdkafka::error::KafkaError;
use rdkafka::groups::GroupInfo;

pub mod groups;

pub use groups::*;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Create(#[source] KafkaError),
    #[error("{0}")]
    Request(#[source] KafkaError),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Anything able to answer a "list consumer groups" request.
#[async_trait]
pub trait GroupLister: Send + Sync {
    async fn list_consumer_groups(
        &self,
        options: &ListConsumerGroupsOptions,
    ) -> Result<ListConsumerGroupsResult, ClientError>;
}

/// One entry of the broker's group listing, detached from librdkafka memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub state: String,
    pub protocol_type: String,
}

impl From<&GroupInfo> for GroupRecord {
    fn from(group: &GroupInfo) -> Self {
        Self {
            name: group.name().to_string(),
            state: group.state().to_string(),
            protocol_type: group.protocol_type().to_string(),
        }
    }
}

/// Splits raw group records into described listings and per-group errors,
/// keeping only listings accepted by the options' filters.
///
/// The ListGroups API carries no group type, so every listing is typed
/// [`ConsumerGroupType::Unknown`] and a type filter is ignored for it.
pub fn collect_groups(
    records: impl IntoIterator<Item = GroupRecord>,
    options: &ListConsumerGroupsOptions,
) -> ListConsumerGroupsResult {
    let mut result = ListConsumerGroupsResult::default();
    for record in records {
        let state = match record.state.parse::<ConsumerGroupState>() {
            Ok(state) => state,
            Err(e) => {
                warn!("Cannot describe group {}: {}", record.name, e);
                result.errors.push(GroupError {
                    group_id: record.name,
                    reason: format!("unrecognized group state '{}'", record.state),
                });
                continue;
            }
        };
        let listing = ConsumerGroupListing {
            is_simple_consumer_group: record.protocol_type.is_empty(),
            group_id: record.name,
            state,
            group_type: ConsumerGroupType::Unknown,
        };
        if options.matches(&listing) {
            result.valid.push(listing);
        } else {
            debug!("Group {} filtered out ({})", listing.group_id, listing.state);
        }
    }
    result
}

pub struct KafkaAdmin {
    consumer: Arc<AdminConsumer>,
}

impl KafkaAdmin {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let consumer: AdminConsumer = config
            .clone()
            .set_log_level(RDKafkaLogLevel::Warning)
            .create_with_context(AdminContext)
            .map_err(ClientError::Create)?;
        Ok(Self {
            consumer: Arc::new(consumer),
        })
    }
}

#[async_trait]
impl GroupLister for KafkaAdmin {
    async fn list_consumer_groups(
        &self,
        options: &ListConsumerGroupsOptions,
    ) -> Result<ListConsumerGroupsResult, ClientError> {
        let deadline = options.request_timeout;
        let consumer = Arc::clone(&self.consumer);
        info!("Listing consumer groups (timeout {:?})", deadline);

        let request = tokio::task::spawn_blocking(move || {
            consumer.fetch_group_list(None, deadline).map(|list| {
                list.groups()
                    .iter()
                    .map(GroupRecord::from)
                    .collect::<Vec<_>>()
            })
        });
        let records = match tokio::time::timeout(deadline, request).await {
            Ok(joined) => joined?.map_err(ClientError::Request)?,
            Err(_) => return Err(ClientError::Timeout(deadline)),
        };
        info!("Broker returned {} group(s)", records.len());

        Ok(collect_groups(records, options))
    }
}

struct AdminContext;

fn log_level(level: RDKafkaLogLevel) -> log::Level {
    match level {
        RDKafkaLogLevel::Emerg
        | RDKafkaLogLevel::Alert
        | RDKafkaLogLevel::Critical
        | RDKafkaLogLevel::Error => log::Level::Error,
        RDKafkaLogLevel::Warning => log::Level::Warn,
        RDKafkaLogLevel::Notice | RDKafkaLogLevel::Info => log::Level::Info,
        RDKafkaLogLevel::Debug => log::Level::Debug,
    }
}

impl ClientContext for AdminContext {
    // librdkafka writes to stderr itself unless its lines are taken here.
    fn log(&self, level: RDKafkaLogLevel, fac: &str, log_message: &str) {
        log::log!(target: "librdkafka", log_level(level), "{} {}", fac, log_message);
    }

    fn error(&self, error: KafkaError, reason: &str) {
        warn!("Kafka client error: {} ({})", error, reason);
    }
}

impl ConsumerContext for AdminContext {}

type AdminConsumer = BaseConsumer<AdminContext>;
