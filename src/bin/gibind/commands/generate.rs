//! `gibind generate` command
//!
//! Loads the requested namespaces and writes one Go package per namespace.

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::{current_config, metadata_provider};
use gibind::ops::{
    generate_all, generate_many, load_namespaces, write_bindings, write_report, GenerateOptions,
};
use gibind::util::diagnostic::suggestions;

pub fn execute(args: GenerateArgs, verbose: bool) -> Result<()> {
    let config = current_config()?;
    let mut provider = metadata_provider(&args.metadata, &config);

    load_namespaces(&mut provider, &args.namespaces)?;

    // A configured denylist directory is optional; an explicit one is not.
    let denylist_dir = match args.denylist_dir {
        Some(dir) => Some(dir),
        None => Some(config.output.denylist_dir.clone()).filter(|dir| dir.is_dir()),
    };

    let opts = GenerateOptions {
        codegen: config.codegen.clone(),
        denylist_dir,
        import_root: args
            .import_root
            .unwrap_or_else(|| config.output.import_root.clone()),
        jobs: args.jobs,
    };

    let generated = if args.with_deps {
        generate_all(&provider, &args.namespaces, &opts)?
    } else {
        generate_many(&provider, &args.namespaces, &opts)?
    };

    let out_dir = args.out.unwrap_or_else(|| config.output.dir.clone());
    for bindings in &generated {
        let path = write_bindings(bindings, &out_dir)?;
        tracing::info!("Generated {} -> {}", bindings.namespace, path.display());
    }

    // Skip reasons are only logged at debug level.
    let skipped: usize = generated.iter().map(|b| b.stats.skipped).sum();
    if skipped > 0 && !verbose {
        tracing::info!("Skipped {} declarations. {}", skipped, suggestions::VERBOSE);
    }

    if let Some(report) = args.report {
        write_report(&generated, &report)?;
        tracing::info!("Wrote report to {}", report.display());
    }

    Ok(())
}
