use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use scopebind::ast::Ast;
use scopebind::cli;
use scopebind::discovery;
use scopebind::engine::Resolver;
use scopebind::logging::{self, Verbosity};
use scopebind::output::{OutputFormatter, UnitReport};
use std::fs;
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let config = args.resolver_config()?;
    info!(
        language = config.language.as_str(),
        ambiguity = config.ambiguity_policy.as_str(),
        "resolving {}",
        args.path.display()
    );

    let inputs = discovery::collect_inputs(&args.path)
        .with_context(|| format!("Cannot collect documents under {}", args.path.display()))?;
    if inputs.is_empty() {
        warn!(path = %args.path.display(), "no syntax documents found");
    }

    let mut reports: Vec<UnitReport> = Vec::with_capacity(inputs.len());
    let mut loaded_files = Vec::new();
    let mut units: Vec<Ast> = Vec::new();
    for path in &inputs {
        let file = path.display().to_string();
        match discovery::load_unit(path) {
            Ok(ast) => {
                loaded_files.push(file);
                units.push(ast);
            }
            Err(e) => {
                warn!(file = %file, error = %e, "skipping unit");
                reports.push(UnitReport::failed(file, e.to_string()));
            }
        }
    }

    let resolver = Resolver::with_config(config);
    let results = resolver.resolve_units(&mut units);
    for ((file, ast), result) in loaded_files.into_iter().zip(&units).zip(results) {
        match result {
            Ok(unit) => reports.push(UnitReport::from_unit(file, ast, &unit)),
            Err(e) => {
                warn!(file = %file, error = %e, "resolution failed");
                reports.push(UnitReport::from_error(file, &e));
            }
        }
    }
    reports.sort_by(|a, b| a.file.cmp(&b.file));

    let output = OutputFormatter::format(&reports, args.format)?;
    match &args.output_file {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("Cannot write output: {}", path.display()))?,
        None => println!("{output}"),
    }

    let failed = reports.iter().filter(|r| r.is_failed()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} unit(s) failed", reports.len());
    }
    Ok(())
}
