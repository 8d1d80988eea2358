use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use tracing::{debug, info, warn};

use zk::adapter::inbound::cli::command::{Cli, Commands, RunCommand};
use zk::adapter::inbound::cli::{diagnostic, registry};
use zk::adapter::outbound::process::SystemRunner;
use zk::application::dispatch::{Completion, Dispatcher};
use zk::error::{Error, Result};
use zk::infrastructure::config::settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match unknown_subcommand(&e) {
            Some(name) => fail(&Error::UnknownCommand {
                name,
                known: registry::names(),
            }),
            None => e.exit(),
        },
    };

    match run(cli).await {
        Ok(Completion::Done) => {}
        Ok(Completion::Exit(code)) => {
            debug!(code, "Exiting with requested status");
            std::process::exit(code);
        }
        Err(e) => fail(&e),
    }
}

async fn run(cli: Cli) -> Result<Completion> {
    let Commands::Run(command) = cli.command;

    let (mut settings, ignored) = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        // cat-logs must not fail, not even on a broken configuration.
        Err(e) if matches!(command, RunCommand::CatLogs(_)) => (Settings::from_env(), Some(e)),
        Err(e) => return Err(e),
    };
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    settings
        .logging
        .clone()
        .adjusted(cli.verbose, cli.quiet)
        .init();
    if let Some(e) = ignored {
        warn!(error = %e, "Ignoring unusable configuration");
    }
    info!(workdir = %settings.workdir.display(), "zk starting");

    let dispatcher = Dispatcher::new(settings, SystemRunner::new());
    dispatcher.execute(command.into()).await
}

/// The operation name when clap rejected `zk run <name>`.
fn unknown_subcommand(err: &clap::Error) -> Option<String> {
    if err.kind() != ErrorKind::InvalidSubcommand {
        return None;
    }
    match err.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(name)) => Some(name.clone()),
        _ => None,
    }
}

fn fail(err: &Error) -> ! {
    eprintln!("{:?}", diagnostic::report(err));
    if matches!(err, Error::UnknownCommand { .. }) {
        eprintln!("{}", registry::usage());
    }
    std::process::exit(err.exit_code());
}
