use anyhow::{Context, Result};
use stagegraph::cli::commands::{ShowCommand, ValidateCommand};
use stagegraph::cli::output::*;
use stagegraph::cli::{log_filter, Cli, Command};
use stagegraph::core::config::StageConfig;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let directives = std::env::var("RUST_LOG").ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Validate(cmd) => validate_stage(cmd)?,
        Command::Show(cmd) => show_stage(cmd)?,
    }

    Ok(())
}

fn validate_stage(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating stage...", INFO);

    let result = StageConfig::from_file(&cmd.file).and_then(|config| {
        let graph = config.to_graph()?;
        Ok((config, graph))
    });

    match result {
        Ok((config, graph)) => {
            println!("{} Stage definition is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Type: {}", format_graph_type(graph.graph_type()));
            println!("  Tasks: {}", style(config.task_count()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn show_stage(cmd: &ShowCommand) -> Result<()> {
    let config = StageConfig::from_file(&cmd.file).context("Failed to load stage definition")?;
    let graph = config.to_graph()?;

    println!("{} {}", INFO, style(&config.name).bold());
    if let Some(description) = &config.description {
        println!("  {}", style(description).dim());
    }
    println!();

    if cmd.flat {
        print!("{}", format_task_list(&graph));
    } else {
        print!("{}", format_graph_tree(&graph));
    }

    Ok(())
}
