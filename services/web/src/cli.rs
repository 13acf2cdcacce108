use crate::commands::{run_preview, run_resolve, PreviewArgs, ResolveArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use schoolsite::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "schoolsite",
    about = "Serve school websites by hostname, or inspect routing and templates from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Show how a hostname is classified and where a path would be routed
    Resolve(ResolveArgs),
    /// Render a template with fixture content to stdout
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Resolve(args) => run_resolve(args),
        Command::Preview(args) => run_preview(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["schoolsite"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn preview_accepts_fixture_and_date() {
        let cli = Cli::try_parse_from([
            "schoolsite",
            "preview",
            "template_modern",
            "--fixture",
            "school.json",
            "--today",
            "2026-10-19",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Preview(args)) => {
                assert_eq!(args.template, "template_modern");
                assert_eq!(args.fixture.as_deref(), Some(std::path::Path::new("school.json")));
                assert!(args.today.is_some());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn preview_rejects_malformed_dates() {
        let err = Cli::try_parse_from(["schoolsite", "preview", "template_classic", "--today", "19/10/2026"])
            .expect_err("date must be YYYY-MM-DD");
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
