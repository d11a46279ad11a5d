use tracing::debug;

use crate::{pool::Pool, Config, Error};

/// Result of the trial fill that decides how many source racks the next batch gets.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Sizing {
	pub batch_size: usize,
	/// Largest rack plus the smallest ones, `batch_size` values that are known to fit.
	pub fallback: Vec<u32>,
}

/// Adds the smallest racks to the largest one until the samples no longer fit
/// into the destination racks the batch has room for, then backs off by one.
///
/// Nothing is reserved once this returns.
pub fn choose_batch_size(pool: &mut Pool, config: &Config) -> Result<Sizing, Error> {
	let mut candidate = pool.candidate(None);
	
	let Some(largest) = candidate.frequencies().largest_available() else {
		return Ok(Sizing {
			batch_size: 0,
			fallback: Vec::new(),
		});
	};
	candidate.insert_sorted(largest)?;
	
	let mut sources = 1;
	let mut fallback = Vec::new();
	
	while i64::from(candidate.sum()) <= config.slot_budget(sources) && sources < config.max_batch_size {
		fallback = candidate.weights().to_vec();
		
		let Some(smallest) = candidate.frequencies().smallest_available() else {
			// everything fits, the pool just ran dry
			debug!(sources, "pool exhausted while sizing");
			candidate.clear();
			return Ok(Sizing {
				batch_size: sources,
				fallback,
			});
		};
		
		candidate.insert_sorted(smallest)?;
		sources += 1;
	}
	
	candidate.clear();
	
	let batch_size = sources - 1;
	debug!(batch_size, ?fallback, "chose batch size");
	
	Ok(Sizing {
		batch_size,
		fallback,
	})
}
