//! `gibind deps` command

use anyhow::Result;

use crate::cli::DepsArgs;
use crate::commands::{current_config, metadata_provider};
use gibind::ops::{dependency_order, load_namespaces};

pub fn execute(args: DepsArgs) -> Result<()> {
    let config = current_config()?;
    let mut provider = metadata_provider(&args.metadata, &config);

    let roots = vec![args.namespace];
    load_namespaces(&mut provider, &roots)?;

    for namespace in dependency_order(&provider, &roots)? {
        println!("{}", namespace);
    }

    Ok(())
}
