mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use capimig_domain::Engine;
use capimig_edit::{MigrateError, YamlCodec, migrate_file};
use clap::Parser;
use config::{CliOverrides, ConfigMerger};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "capimig",
    version,
    about = "Migrate Cluster API manifests from v1beta1 to v1beta2 in place."
)]
struct Cli {
    /// YAML manifest to migrate (may contain several documents).
    #[arg(required_unless_present = "list_rules")]
    path: Option<Utf8PathBuf>,

    /// Show what would change as a unified diff without writing the file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Copy the original file to <path><suffix> before overwriting it.
    #[arg(long, default_value_t = false)]
    backup: bool,

    /// Config file (default: ./capimig.toml when present).
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Identifier replaced throughout the raw text (default: cluster.x-k8s.io/v1beta1).
    #[arg(long, value_name = "IDENTIFIER")]
    from: Option<String>,

    /// Replacement identifier (default: cluster.x-k8s.io/v1beta2).
    #[arg(long, value_name = "IDENTIFIER")]
    to: Option<String>,

    /// List the migration rules in evaluation order and exit.
    #[arg(long, default_value_t = false, conflicts_with = "path")]
    list_rules: bool,

    /// Output format for --list-rules.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!("{:?}", e);
            let code = e
                .downcast_ref::<MigrateError>()
                .map_or(1, MigrateError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let engine = Engine::new();

    if cli.list_rules {
        return cmd_list_rules(&engine, cli.format);
    }

    let Some(path) = cli.path else {
        anyhow::bail!("missing manifest path");
    };
    if !path.is_file() {
        anyhow::bail!("{} is not a file", path);
    }

    let file_config = config::load_or_default(cli.config.as_deref(), Utf8Path::new("."))
        .context("load capimig.toml config")?;
    let opts = ConfigMerger::new(file_config).merge(CliOverrides {
        from: cli.from,
        to: cli.to,
        backup: cli.backup,
        dry_run: cli.dry_run,
    });
    debug!(
        "merged config: from={}, to={}, dry_run={}, backup_suffix={:?}",
        opts.substitution.from, opts.substitution.to, opts.dry_run, opts.backup_suffix
    );

    let outcome = migrate_file(&path, &opts, &YamlCodec, &engine)
        .with_context(|| format!("migrate {}", path))?;

    if !outcome.changed {
        println!("No changes needed: {}", outcome.path);
    } else if opts.dry_run {
        println!("Would update: {}", outcome.path);
        print!("{}", outcome.patch);
    } else {
        println!("Updated: {}", outcome.path);
    }
    Ok(())
}

fn cmd_list_rules(engine: &Engine, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Migration rules (applied to every mapping, in this order):\n");
            println!("  {:<3} {:<42} DESCRIPTION", "#", "ID");
            println!("  {:<3} {:<42} -----------", "-", "--");
            for (idx, rule) in engine.rules().enumerate() {
                println!("  {:<3} {:<42} {}", idx + 1, rule.id, rule.description);
            }
        }
        OutputFormat::Json => {
            let rules: Vec<_> = engine
                .rules()
                .enumerate()
                .map(|(idx, r)| {
                    serde_json::json!({
                        "order": idx + 1,
                        "id": r.id,
                        "description": r.description,
                        "triggers": r.triggers,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
