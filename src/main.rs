use std::{path::PathBuf, process::ExitCode};

use clap::{command, Args, Parser, Subcommand};
use rackbatch::{Config, DEFAULT_CAPACITY, DEFAULT_MAX_BATCH_SIZE};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(version, propagate_version = true, author, about)]
struct RackbatchArgs {
	/// Log more details, repeat for even more
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
	Plan(PlanArgs),
}

/// Group source racks into batches and export them as csv
#[derive(Args, Clone, Debug)]
struct PlanArgs {
	/// Text file with one rack per line: its id followed by its number of samples, `-` for stdin
	input: PathBuf,
	/// File to write the batches to, `.csv` is added if missing
	#[arg(short, long, default_value = "batches.csv")]
	out: PathBuf,
	/// Number of spots in a rack
	#[arg(short, long, env = "RACKBATCH_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
	capacity: u32,
	/// Maximum number of racks, source and destination, in one batch
	#[arg(short, long, env = "RACKBATCH_MAX_BATCH_SIZE", default_value_t = DEFAULT_MAX_BATCH_SIZE)]
	max_batch_size: usize,
	/// Print an overview of every batch before exporting
	#[arg(short, long)]
	summary: bool,
}

fn main() -> ExitCode {
	let args = RackbatchArgs::parse();
	
	let level = match args.verbose {
		0 => Level::WARN,
		1 => Level::INFO,
		_ => Level::DEBUG,
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.init();
	
	let result = match args.command {
		Commands::Plan(plan_args) => Config::new(plan_args.capacity, plan_args.max_batch_size)
			.and_then(|config| rackbatch::distribute(plan_args.input, plan_args.out, config, plan_args.summary)),
	};
	
	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err}");
			ExitCode::FAILURE
		},
	}
}
