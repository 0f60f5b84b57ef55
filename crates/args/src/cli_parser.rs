use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "kafka-list-groups")]
#[command(author)]
#[command(version)]
#[command(about = "List the consumer groups of a Kafka cluster", long_about = None)]
#[command(override_usage = "kafka-list-groups [OPTIONS] <BOOTSTRAP_SERVERS> [-states <STATE>...] [-types <TYPE>...]")]
pub struct Cli {
    #[clap(value_enum, default_value_t=LogOutput::StdErr)]
    #[arg(short, long)]
    pub log_output: LogOutput,
    /// Comma-separated host:port list used to reach the cluster
    pub bootstrap_servers: String,
    /// `-states <state>...` and `-types <type>...` filters
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub filters: Vec<String>,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum LogOutput {
    StdOut,
    StdErr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collects_filter_tokens_verbatim() {
        let cli = Cli::try_parse_from([
            "kafka-list-groups",
            "localhost:9092",
            "-states",
            "Stable",
            "-types",
            "Classic",
        ])
        .unwrap();

        assert_eq!(cli.bootstrap_servers, "localhost:9092");
        assert_eq!(cli.filters, vec!["-states", "Stable", "-types", "Classic"]);
        assert_eq!(cli.log_output, LogOutput::StdErr);
    }

    #[test]
    fn test_log_output_before_bootstrap_servers() {
        let cli = Cli::try_parse_from([
            "kafka-list-groups",
            "--log-output",
            "std-out",
            "localhost:9092",
        ])
        .unwrap();

        assert_eq!(cli.log_output, LogOutput::StdOut);
        assert!(cli.filters.is_empty());
    }

    #[test]
    fn test_missing_bootstrap_servers_is_an_error() {
        let err = Cli::try_parse_from(["kafka-list-groups"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
        assert!(err.to_string().contains("Usage:"));
    }
}
