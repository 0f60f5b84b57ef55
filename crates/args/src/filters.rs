use kafka_admin::{ConsumerGroupState, ConsumerGroupType};

const STATES_FLAG: &str = "-states";
const TYPES_FLAG: &str = "-types";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Cannot pass the {name} flag ({flag}) more than once.")]
    DuplicateFlag {
        name: &'static str,
        flag: &'static str,
    },
    #[error("Unexpected argument '{0}': values must follow -states or -types")]
    UnexpectedToken(String),
    #[error("Given state {0} is not a valid state")]
    InvalidState(String),
    #[error("Given group type {0} is not a valid group type")]
    InvalidGroupType(String),
}

impl ArgsError {
    /// Whether the usage line should accompany the message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, ArgsError::UnexpectedToken(_))
    }
}

/// Match criteria parsed from the trailing command line tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub states: Vec<ConsumerGroupState>,
    pub types: Vec<ConsumerGroupType>,
}

#[derive(Clone, Copy)]
enum Section {
    None,
    States,
    Types,
}

/// Parses `-states <state>...` and `-types <type>...`.
///
/// Each flag may appear once, in any order. Values run until the next flag
/// or the end of input.
pub fn parse_filters<S: AsRef<str>>(tokens: &[S]) -> Result<Filters, ArgsError> {
    let mut filters = Filters::default();
    let mut section = Section::None;
    let mut seen_states = false;
    let mut seen_types = false;

    for token in tokens.iter().map(|token| token.as_ref()) {
        match token {
            STATES_FLAG => {
                if seen_states {
                    return Err(ArgsError::DuplicateFlag {
                        name: "states",
                        flag: STATES_FLAG,
                    });
                }
                seen_states = true;
                section = Section::States;
            }
            TYPES_FLAG => {
                if seen_types {
                    return Err(ArgsError::DuplicateFlag {
                        name: "types",
                        flag: TYPES_FLAG,
                    });
                }
                seen_types = true;
                section = Section::Types;
            }
            value => match section {
                Section::States => filters.states.push(
                    value
                        .parse::<ConsumerGroupState>()
                        .map_err(|_| ArgsError::InvalidState(value.to_string()))?,
                ),
                Section::Types => filters.types.push(
                    value
                        .parse::<ConsumerGroupType>()
                        .map_err(|_| ArgsError::InvalidGroupType(value.to_string()))?,
                ),
                Section::None => return Err(ArgsError::UnexpectedToken(value.to_string())),
            },
        }
    }

    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_tokens_means_no_filters() {
        let filters = parse_filters::<&str>(&[]).unwrap();
        assert_eq!(filters, Filters::default());
    }

    #[test]
    fn test_states_and_types_in_any_order() {
        let filters =
            parse_filters(&["-types", "classic", "Consumer", "-states", "Stable", "empty"]).unwrap();

        assert_eq!(
            filters,
            Filters {
                states: vec![ConsumerGroupState::Stable, ConsumerGroupState::Empty],
                types: vec![ConsumerGroupType::Classic, ConsumerGroupType::Consumer],
            }
        );
    }

    #[test]
    fn test_flag_without_values_is_allowed() {
        let filters = parse_filters(&["-states", "-types", "Classic"]).unwrap();
        assert!(filters.states.is_empty());
        assert_eq!(filters.types, vec![ConsumerGroupType::Classic]);
    }

    #[test]
    fn test_duplicate_states_flag() {
        let err = parse_filters(&["-states", "Stable", "-states", "Dead"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot pass the states flag (-states) more than once."
        );
    }

    #[test]
    fn test_duplicate_types_flag() {
        let err = parse_filters(&["-types", "-states", "Dead", "-types"]).unwrap_err();
        assert_eq!(
            err,
            ArgsError::DuplicateFlag {
                name: "types",
                flag: "-types"
            }
        );
    }

    #[test]
    fn test_token_before_any_flag() {
        let err = parse_filters(&["Stable", "-states"]).unwrap_err();
        assert_eq!(err, ArgsError::UnexpectedToken("Stable".to_string()));
        assert!(err.shows_usage());
    }

    #[test]
    fn test_invalid_state_names_the_token() {
        for token in ["Sleeping", "stable-ish", ""] {
            let err = parse_filters(&["-states", "Stable", token]).unwrap_err();
            assert_eq!(err, ArgsError::InvalidState(token.to_string()));
            assert_eq!(
                err.to_string(),
                format!("Given state {token} is not a valid state")
            );
            assert!(!err.shows_usage());
        }
    }

    #[test]
    fn test_invalid_group_type() {
        let err = parse_filters(&["-types", "modern"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Given group type modern is not a valid group type"
        );
    }

    #[test]
    fn test_accepted_tokens_print_canonically() {
        let states: Vec<String> = ConsumerGroupState::ALL
            .iter()
            .map(|s| s.as_str().to_lowercase())
            .collect();
        let mut tokens = vec!["-states".to_string()];
        tokens.extend(states);

        let filters = parse_filters(tokens.as_slice()).unwrap();
        let printed: Vec<String> = filters.states.iter().map(ToString::to_string).collect();
        let canonical: Vec<String> = ConsumerGroupState::ALL
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        assert_eq!(printed, canonical);
    }
}
