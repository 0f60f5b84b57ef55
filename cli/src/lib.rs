use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use args::{Cli, Filters};
use clap::Parser;
use kafka_admin::{GroupLister, ListConsumerGroupsOptions};

pub mod output;

/// Upper bound for the whole listing request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Validates the whole command line before anything touches the network.
///
/// On `Err` the message has already been written and the outcome is the
/// process result: `Success` for `--help`/`--version`, `Failure` otherwise.
pub fn parse_args<I, T>(
    argv: I,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(Cli, Filters), Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let program = argv
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "kafka-list-groups".to_string());

    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        // clap's own usage errors exit with 2; this tool reports every usage error as 1.
        Err(e) if e.use_stderr() => {
            let _ = write!(err, "{}", e.render());
            return Err(Outcome::Failure);
        }
        Err(e) => {
            let _ = write!(out, "{}", e.render());
            return Err(Outcome::Success);
        }
    };

    match args::parse_filters(cli.filters.as_slice()) {
        Ok(filters) => Ok((cli, filters)),
        Err(e) => {
            let _ = writeln!(err, "{e}");
            if e.shows_usage() {
                let _ = writeln!(err, "{}", args::usage(&program));
            }
            Err(Outcome::Failure)
        }
    }
}

pub fn list_options(filters: Filters) -> ListConsumerGroupsOptions {
    ListConsumerGroupsOptions::new(REQUEST_TIMEOUT)
        .match_states(filters.states)
        .match_types(filters.types)
}

/// Issues the listing request and prints its result.
///
/// Per-group errors are printed but do not fail the run; a client-level
/// error does.
pub async fn run<L>(lister: &L, filters: Filters, out: &mut impl Write, err: &mut impl Write) -> Outcome
where
    L: GroupLister + ?Sized,
{
    let options = list_options(filters);
    let result = match lister.list_consumer_groups(&options).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Listing consumer groups failed: {:?}", e);
            let _ = writeln!(err, "Failed to list groups with client-level error {e}");
            return Outcome::Failure;
        }
    };
    log::info!(
        "Listed {} group(s) with {} error(s)",
        result.valid.len(),
        result.errors.len()
    );

    match output::print_result(out, &result) {
        Ok(()) => Outcome::Success,
        Err(e) => {
            log::error!("Cannot write listing: {}", e);
            Outcome::Failure
        }
    }
}
