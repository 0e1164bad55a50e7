//! knowledge-digest - Source tree knowledge file generator
//!
//! Walks a directory and writes `<dir>_knowledge.txt` with one line per
//! discovered fact: file names, C functions, structs, enums, local includes,
//! and label script groups from `.inc` files.

use anyhow::Result;
use knowledge_digest::cli::{analyze, generate, print_items, prompt_root, Cli, Commands};
use knowledge_digest::tree::DigestConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.into_command() {
        Commands::Generate(args) => {
            let root = match args.root {
                Some(root) => root,
                None => prompt_root(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
            };

            let mut config = DigestConfig::new(&root);
            if let Some(dir) = args.output_dir {
                config = config.with_output_dir(dir);
            }

            generate(&config)?;
            println!("Knowledge file created successfully.");
        }

        Commands::Analyze(args) => {
            let items = analyze(&args.target)?;
            print_items(&items);
        }
    }

    Ok(())
}
