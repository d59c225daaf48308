//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CommandContext, FormArgs, run_config_show, run_defaults, run_load, run_manifest, run_models,
    run_sanitize_key, run_save, run_schema, run_test_connection, run_validate,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use openai_settings_infra::load_effective_config;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

/// Prefix of every environment variable the CLI reads.
const ENV_PREFIX: &str = "OAS_";

#[derive(Debug, Parser)]
#[command(
    name = "openai-settings",
    version,
    about = "Manage BrainDrive OpenAI plugin settings",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Config file path (JSON/TOML). Built-in defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive (overrides the config; `RUST_LOG` wins over both).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate form input without saving.
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Validate and persist settings (host API first, local file on failure).
    Save {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Load stored settings.
    Load {
        /// Return the defaults when nothing is stored.
        #[arg(long)]
        defaults: bool,
        /// Print the API key unshortened.
        #[arg(long)]
        reveal_key: bool,
    },
    /// Probe the OpenAI API with the given (or stored) credentials.
    TestConnection {
        /// API key to test. Falls back to the stored settings.
        #[arg(long)]
        api_key: Option<String>,
        /// Organization id to send with the probe.
        #[arg(long)]
        organization_id: Option<String>,
    },
    /// Print the default settings.
    Defaults,
    /// List the selectable models.
    Models,
    /// Print the plugin manifest document.
    Manifest,
    /// Print a JSON Schema document.
    Schema {
        /// Which shape to describe.
        #[arg(value_enum, default_value_t = SchemaTarget::Settings)]
        target: SchemaTarget,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Shorten an API key for display.
    SanitizeKey {
        /// Key to shorten.
        #[arg(value_name = "KEY")]
        key: String,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective config after env overrides.
    Show,
}

/// Shapes the `schema` command can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    /// Normalized settings record.
    Settings,
    /// Raw form input.
    Form,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

impl CliOutput {
    const fn new(stdout: String, stderr: String, exit_code: ExitCode) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    let env = collect_scoped_env(ENV_PREFIX);
    let config = load_effective_config(&env, cli.config.as_deref());

    let logging_config = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging::init_tracing(&logging_config, cli.log_level.as_deref());

    let ctx = CommandContext {
        mode,
        config_path: cli.config.clone(),
        config,
    };

    match run(&cli.command, &ctx) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, ctx: &CommandContext) -> Result<CliOutput, CliError> {
    match command {
        Commands::Validate { form } => run_validate(ctx, form),
        Commands::Save { form } => run_save(ctx, form),
        Commands::Load {
            defaults,
            reveal_key,
        } => run_load(ctx, *defaults, *reveal_key),
        Commands::TestConnection {
            api_key,
            organization_id,
        } => run_test_connection(ctx, api_key.as_deref(), organization_id.as_deref()),
        Commands::Defaults => run_defaults(ctx.mode),
        Commands::Models => run_models(ctx.mode),
        Commands::Manifest => run_manifest(),
        Commands::Schema { target } => run_schema(*target),
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(ctx),
        },
        Commands::SanitizeKey { key } => run_sanitize_key(ctx.mode, key),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

fn collect_scoped_env(prefix: &str) -> BTreeMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn version_flag_is_supported() {
        let result = Cli::command().try_get_matches_from(["cli", "--version"]);
        let is_version = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::DisplayVersion
        );

        assert!(is_version, "expected clap to render version");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn form_json_conflicts_with_field_flags() {
        let result = Cli::try_parse_from([
            "cli",
            "validate",
            "--form-json",
            "{}",
            "--api-key",
            "sk-x",
        ]);
        let is_conflict = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::ArgumentConflict
        );
        assert!(is_conflict, "expected --form-json to conflict with field flags");
    }

    #[test]
    fn global_flags_follow_subcommands() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "cli",
            "load",
            "--output",
            "json",
            "--config",
            "plugin.toml",
            "--log-level",
            "debug",
        ])?;
        assert!(OutputMode::from_args(&cli.output).is_json());
        assert_eq!(cli.config, Some(PathBuf::from("plugin.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        Ok(())
    }

    #[test]
    fn exit_codes_for_errors() -> Result<(), Box<dyn std::error::Error>> {
        let io_error = CliError::Io(io::Error::other("io"));
        let serialization_error = match serde_json::from_str::<serde_json::Value>("not-json") {
            Ok(_) => return Err("expected serialization error".into()),
            Err(error) => CliError::Serialization(error),
        };

        assert_eq!(io_error.exit_code(), ExitCode::Io);
        assert_eq!(serialization_error.exit_code(), ExitCode::Internal);
        assert_eq!(
            CliError::InvalidInput("x".to_string()).exit_code(),
            ExitCode::InvalidInput
        );
        Ok(())
    }
}
