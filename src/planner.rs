use tracing::{debug, info};

use crate::{pool::Pool, Batch, BatchKind, Config, Error, Item};

mod composer;
pub use composer::{compose_batch, Composition};

mod remainder;
pub use remainder::pack_remainder;

mod sizer;
pub use sizer::{choose_batch_size, Sizing};

/// Splits a pool of racks into batches, one at a time.
#[derive(Debug)]
pub struct Planner {
	config: Config,
	pool: Pool,
	finished: usize,
}

impl Planner {
	pub fn new(items: Vec<Item>, config: Config) -> Result<Self, Error> {
		Ok(Self {
			pool: Pool::new(items, config.capacity)?,
			config,
			finished: 0,
		})
	}
	
	pub fn config(&self) -> &Config {
		&self.config
	}
	
	/// Racks that haven't been put into a batch yet.
	pub fn remaining(&self) -> usize {
		self.pool.len()
	}
	
	/// Builds and finalizes the next batch, `None` once the pool is empty.
	pub fn next_batch(&mut self) -> Result<Option<Batch>, Error> {
		if self.pool.is_empty() {
			return Ok(None);
		}
		
		let number = self.finished + 1;
		
		let composed = if self.pool.len() >= self.config.max_batch_size {
			let sizing = choose_batch_size(&mut self.pool, &self.config)?;
			compose_batch(&mut self.pool, &self.config, &sizing)?
				.map(|composition| composition.finalize(number))
				.transpose()?
		} else {
			None
		};
		
		let batch = match composed {
			Some(batch) => batch,
			None => {
				debug!(remaining = self.pool.len(), "packing remainder");
				pack_remainder(&mut self.pool, &self.config)?.finalize(number, BatchKind::Remainder)?
			},
		};
		
		self.finished = number;
		info!(
			number,
			kind = %batch.kind(),
			racks = batch.len(),
			samples = batch.total_weight(),
			destinations = batch.containers(&self.config),
			"finalized batch",
		);
		
		Ok(Some(batch))
	}
	
	/// Batches the whole pool.
	pub fn run(mut self) -> Result<Vec<Batch>, Error> {
		let mut batches = Vec::new();
		
		while let Some(batch) = self.next_batch()? {
			batches.push(batch);
		}
		
		Ok(batches)
	}
}
