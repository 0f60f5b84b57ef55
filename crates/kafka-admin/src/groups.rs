use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// State of a consumer group as reported by the group coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerGroupState {
    Unknown,
    PreparingRebalance,
    CompletingRebalance,
    Stable,
    Dead,
    Empty,
    Assigning,
    Reconciling,
}

impl ConsumerGroupState {
    pub const ALL: [ConsumerGroupState; 8] = [
        ConsumerGroupState::Unknown,
        ConsumerGroupState::PreparingRebalance,
        ConsumerGroupState::CompletingRebalance,
        ConsumerGroupState::Stable,
        ConsumerGroupState::Dead,
        ConsumerGroupState::Empty,
        ConsumerGroupState::Assigning,
        ConsumerGroupState::Reconciling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumerGroupState::Unknown => "Unknown",
            ConsumerGroupState::PreparingRebalance => "PreparingRebalance",
            ConsumerGroupState::CompletingRebalance => "CompletingRebalance",
            ConsumerGroupState::Stable => "Stable",
            ConsumerGroupState::Dead => "Dead",
            ConsumerGroupState::Empty => "Empty",
            ConsumerGroupState::Assigning => "Assigning",
            ConsumerGroupState::Reconciling => "Reconciling",
        }
    }
}

impl fmt::Display for ConsumerGroupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsumerGroupState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Brokers before 2.4 call CompletingRebalance "AwaitingSync".
        if s.eq_ignore_ascii_case("AwaitingSync") {
            return Ok(ConsumerGroupState::CompletingRebalance);
        }
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "consumer group state",
                value: s.to_string(),
            })
    }
}

/// Rebalance protocol a group runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerGroupType {
    Unknown,
    Consumer,
    Classic,
}

impl ConsumerGroupType {
    pub const ALL: [ConsumerGroupType; 3] = [
        ConsumerGroupType::Unknown,
        ConsumerGroupType::Consumer,
        ConsumerGroupType::Classic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumerGroupType::Unknown => "Unknown",
            ConsumerGroupType::Consumer => "Consumer",
            ConsumerGroupType::Classic => "Classic",
        }
    }
}

impl fmt::Display for ConsumerGroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsumerGroupType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group_type| group_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "consumer group type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerGroupListing {
    pub group_id: String,
    pub state: ConsumerGroupState,
    pub group_type: ConsumerGroupType,
    /// Set for groups that commit offsets without any group membership protocol.
    pub is_simple_consumer_group: bool,
}

/// A group the cluster returned but which could not be described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupError {
    pub group_id: String,
    pub reason: String,
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group_id, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConsumerGroupsResult {
    pub valid: Vec<ConsumerGroupListing>,
    pub errors: Vec<GroupError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConsumerGroupsOptions {
    pub match_states: Vec<ConsumerGroupState>,
    pub match_types: Vec<ConsumerGroupType>,
    pub request_timeout: Duration,
}

impl ListConsumerGroupsOptions {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            match_states: Vec::new(),
            match_types: Vec::new(),
            request_timeout,
        }
    }

    pub fn match_states(mut self, states: Vec<ConsumerGroupState>) -> Self {
        self.match_states = states;
        self
    }

    pub fn match_types(mut self, types: Vec<ConsumerGroupType>) -> Self {
        self.match_types = types;
        self
    }

    /// An empty filter list matches everything. A listing whose type the
    /// broker did not report is not checked against the type filter.
    pub fn matches(&self, listing: &ConsumerGroupListing) -> bool {
        (self.match_states.is_empty() || self.match_states.contains(&listing.state))
            && (self.match_types.is_empty()
                || listing.group_type == ConsumerGroupType::Unknown
                || self.match_types.contains(&listing.group_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(state: ConsumerGroupState, group_type: ConsumerGroupType) -> ConsumerGroupListing {
        ConsumerGroupListing {
            group_id: "orders".to_string(),
            state,
            group_type,
            is_simple_consumer_group: false,
        }
    }

    #[test]
    fn test_state_display_parses_back() {
        for state in ConsumerGroupState::ALL {
            assert_eq!(state.to_string().parse::<ConsumerGroupState>(), Ok(state));
        }
        for group_type in ConsumerGroupType::ALL {
            assert_eq!(
                group_type.to_string().parse::<ConsumerGroupType>(),
                Ok(group_type)
            );
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("stable".parse::<ConsumerGroupState>(), Ok(ConsumerGroupState::Stable));
        assert_eq!(
            "PREPARINGREBALANCE".parse::<ConsumerGroupState>(),
            Ok(ConsumerGroupState::PreparingRebalance)
        );
        assert_eq!("classic".parse::<ConsumerGroupType>(), Ok(ConsumerGroupType::Classic));
    }

    #[test]
    fn test_awaiting_sync_is_completing_rebalance() {
        assert_eq!(
            "AwaitingSync".parse::<ConsumerGroupState>(),
            Ok(ConsumerGroupState::CompletingRebalance)
        );
    }

    #[test]
    fn test_parse_unknown_names_the_token() {
        let err = "Sleeping".parse::<ConsumerGroupState>().unwrap_err();
        assert_eq!(err.value, "Sleeping");
        assert_eq!(err.to_string(), "unknown consumer group state 'Sleeping'");
        assert!("legacy".parse::<ConsumerGroupType>().is_err());
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let options = ListConsumerGroupsOptions::new(Duration::from_secs(1));
        assert!(options.matches(&listing(ConsumerGroupState::Dead, ConsumerGroupType::Unknown)));
    }

    #[test]
    fn test_filters_combine_state_and_type() {
        let options = ListConsumerGroupsOptions::new(Duration::from_secs(1))
            .match_states(vec![ConsumerGroupState::Stable, ConsumerGroupState::Empty])
            .match_types(vec![ConsumerGroupType::Classic]);

        assert!(options.matches(&listing(ConsumerGroupState::Empty, ConsumerGroupType::Classic)));
        assert!(!options.matches(&listing(ConsumerGroupState::Dead, ConsumerGroupType::Classic)));
        assert!(!options.matches(&listing(ConsumerGroupState::Stable, ConsumerGroupType::Consumer)));
    }

    #[test]
    fn test_type_filter_ignored_for_unreported_type() {
        let options = ListConsumerGroupsOptions::new(Duration::from_secs(1))
            .match_states(vec![ConsumerGroupState::Stable])
            .match_types(vec![ConsumerGroupType::Consumer]);

        assert!(options.matches(&listing(ConsumerGroupState::Stable, ConsumerGroupType::Unknown)));
        assert!(!options.matches(&listing(ConsumerGroupState::Empty, ConsumerGroupType::Unknown)));
    }

    #[test]
    fn test_group_error_display() {
        let err = GroupError {
            group_id: "payments".to_string(),
            reason: "coordinator not available".to_string(),
        };
        assert_eq!(err.to_string(), "payments: coordinator not available");
    }
}
