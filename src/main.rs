use clap::Parser;
use retest_state::cli::commands::{cmd_apply, cmd_checksum, cmd_ids, cmd_match, cmd_similarity};
use retest_state::cli::config::{Cli, Commands, load_config};
use retest_state::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    logging::init(cli.verbose, config.logging.json);

    let output = match cli.command {
        Commands::Similarity { a, b, path } => cmd_similarity(&a, &b, path),
        Commands::Match {
            expected_path,
            expected_type,
            actual_path,
            actual_type,
        } => cmd_match(
            &expected_path,
            &expected_type,
            &actual_path,
            &actual_type,
            &config.matching.weights,
        )?,
        Commands::Ids { texts } => cmd_ids(&texts)?,
        Commands::Checksum { text } => cmd_checksum(&text),
        Commands::Apply {
            tree,
            changes,
            output,
        } => cmd_apply(&tree, &changes, output.as_deref())?,
    };

    println!("{output}");
    Ok(())
}
