//! Subcommand implementations.
//!
//! Each command writes human-readable output to the supplied writer so it
//! can be exercised without a terminal.

use std::io::Write;

use neo_loader::{create_filters, limit, write_to_path, NeoDatabase, NeoResult};

use crate::args::{Cli, Command, InspectArgs, QueryArgs};

/// Results printed to the terminal when no limit is given.
pub const DEFAULT_PRINT_LIMIT: usize = 10;

/// Prints the NEO selected by `args`.
///
/// Returns false when no NEO matched.
pub fn inspect<W: Write>(db: &NeoDatabase, args: &InspectArgs, out: &mut W) -> NeoResult<bool> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        writeln!(out, "No matching NEOs exist in the database.")?;
        return Ok(false);
    };

    writeln!(out, "{neo}")?;
    if args.verbose {
        for approach in db.approaches_for(neo) {
            writeln!(out, "- {approach}")?;
        }
    }
    Ok(true)
}

/// Runs a filtered query, printing results or writing them to `--outfile`.
///
/// Returns the number of results emitted.
pub fn query<W: Write>(db: &NeoDatabase, args: &QueryArgs, out: &mut W) -> NeoResult<usize> {
    let filters = create_filters(&args.criteria());
    for filter in &filters {
        tracing::debug!("filter: {}", filter);
    }
    let results = db.query(&filters);

    match &args.outfile {
        Some(path) => {
            let count = write_to_path(path, limit(results, args.limit))?;
            tracing::info!("Wrote {} results to {}", count, path.display());
            Ok(count)
        }
        None => {
            let cap = args.limit.unwrap_or(DEFAULT_PRINT_LIMIT);
            let mut count = 0;
            for approach in limit(results, Some(cap)) {
                writeln!(out, "{approach}")?;
                count += 1;
            }
            Ok(count)
        }
    }
}

/// Loads the database and dispatches the parsed command.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let files = cli.data_files()?;
    let config = cli.load_config();

    tracing::info!(
        "Loading NEO data from {} and {}",
        files.neos_file.display(),
        files.approaches_file.display()
    );
    let db = NeoDatabase::from_files(&files, &config)?;
    tracing::info!(
        "Loaded {} NEOs and {} close approaches ({} unlinked)",
        db.neo_count(),
        db.approach_count(),
        db.unlinked_count()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Inspect(args) => {
            inspect(&db, args, &mut out)?;
        }
        Command::Query(args) => {
            let count = query(&db, args, &mut out)?;
            tracing::debug!("query produced {} results", count);
        }
    }

    Ok(())
}
