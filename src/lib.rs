use std::{fs::File, io::{self, BufWriter}, path::PathBuf};

mod batch;
pub use batch::{Batch, BatchKind};

mod candidate;
pub use candidate::CandidateSequence;

mod config;
pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_MAX_BATCH_SIZE};

mod error;
pub use error::{Error, InvariantViolation, Violation};

pub mod export;
pub mod input;

pub mod planner;
use planner::Planner;

pub mod pool;

mod progress;
use progress::ProgressDisplay;

/// A source rack, identified by its id and holding `weight` samples.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Item {
	id: String,
	weight: u32,
}

impl Item {
	pub fn new(id: impl Into<String>, weight: u32) -> Self {
		Self {
			id: id.into(),
			weight,
		}
	}
	
	pub fn id(&self) -> &str {
		&self.id
	}
	
	pub fn weight(&self) -> u32 {
		self.weight
	}
}

/// Splits all racks into batches.
pub fn plan(items: Vec<Item>, config: Config) -> Result<Vec<Batch>, Error> {
	Planner::new(items, config)?.run()
}

pub fn distribute(input: PathBuf, out: PathBuf, config: Config, show_summary: bool) -> Result<(), Error> {
	let items = input::read_items(input::open(&input)?)?;
	println!("Read {} racks from {}.", items.len(), input.to_string_lossy());
	
	let progress_display = ProgressDisplay::new(items.len() as u64);
	let mut planner = Planner::new(items, config)?;
	let mut batches = Vec::new();
	
	while let Some(batch) = planner.next_batch()? {
		progress_display.advance(&batch);
		batches.push(batch);
	}
	
	if show_summary {
		export::write_summary(&batches, &config, io::stdout().lock())?;
	}
	
	let out = export::csv_path(out);
	let file = File::create(&out).map_err(|source| Error::Output {
		path: out.clone(),
		source,
	})?;
	export::write_csv(&batches, BufWriter::new(file)).map_err(|source| Error::Output {
		path: out.clone(),
		source,
	})?;
	
	println!("Wrote {} batches to {}.", batches.len(), out.to_string_lossy());
	
	Ok(())
}
