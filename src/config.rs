use crate::Error;

pub const DEFAULT_CAPACITY: u32 = 96;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 20;

/// Capacity of one destination rack and the most racks (source plus destination) a batch may use
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Config {
	pub capacity: u32,
	pub max_batch_size: usize,
}

impl Config {
	pub fn new(capacity: u32, max_batch_size: usize) -> Result<Self, Error> {
		if capacity == 0 {
			return Err(Error::Config("capacity must be at least 1".to_owned()));
		}
		
		// one source rack and one destination rack is the smallest batch that makes sense
		if max_batch_size < 2 {
			return Err(Error::Config(format!("max batch size must be at least 2, got {max_batch_size}")));
		}
		
		Ok(Self {
			capacity,
			max_batch_size,
		})
	}
	
	/// Destination spots left over when `sources` of the batch's slots hold source racks.
	pub fn slot_budget(&self, sources: usize) -> i64 {
		(self.max_batch_size as i64 - sources as i64) * i64::from(self.capacity)
	}
	
	/// Destination racks needed to hold `total` samples.
	pub fn containers_for(&self, total: u32) -> u32 {
		total.div_ceil(self.capacity)
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CAPACITY,
			max_batch_size: DEFAULT_MAX_BATCH_SIZE,
		}
	}
}
