use std::io;
use std::process::ExitCode;

use env_logger::{Builder, Env, Target};
use kafka_admin::KafkaAdmin;
use kafka_list_groups::{output, Outcome};
use rdkafka::ClientConfig;

fn init_logging(log_output: &args::LogOutput) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match log_output {
        args::LogOutput::StdOut => {
            builder.target(Target::Stdout);
        }
        args::LogOutput::StdErr => {
            builder.target(Target::Stderr);
        }
    }
    builder.init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let parsed = kafka_list_groups::parse_args(std::env::args_os(), &mut stdout, &mut stderr);
    let (cli, filters) = match parsed {
        Ok(parsed) => parsed,
        Err(outcome) => return outcome.into(),
    };
    init_logging(&cli.log_output);

    let config = match kafka_config::KafkaConfig::from_env() {
        Ok(config) => config.with_bootstrap_servers(&cli.bootstrap_servers),
        Err(e) => {
            log::error!("Kafka config could not be loaded: {:?}", e);
            eprintln!("Failed to load Kafka config: {e:#}");
            return Outcome::Failure.into();
        }
    };

    if let Err(e) = output::print_notice(&mut stdout) {
        log::error!("Cannot write to stdout: {}", e);
        return Outcome::Failure.into();
    }

    // Dropped on every return below, which closes the client.
    let admin = match KafkaAdmin::new(&ClientConfig::from(config)) {
        Ok(admin) => admin,
        Err(e) => {
            eprintln!("Failed to create Admin client: {e}");
            return Outcome::Failure.into();
        }
    };

    kafka_list_groups::run(&admin, filters, &mut stdout, &mut stderr)
        .await
        .into()
}
