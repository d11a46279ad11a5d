use crate::{candidate::CandidateSequence, pool::Pool, Config, Error};

/// Takes racks in pool order for as long as their samples fit into the
/// destination racks of one batch.
///
/// Always takes at least one rack from a non-empty pool, so repeated calls drain it.
pub fn pack_remainder<'p>(pool: &'p mut Pool, config: &Config) -> Result<CandidateSequence<'p>, Error> {
	let mut candidate = pool.candidate(None);
	let mut total = 0;
	
	for weight in candidate.pool_weights() {
		if candidate.len() == config.max_batch_size {
			break;
		}
		
		if config.containers_for(total + weight) as usize > config.max_batch_size {
			break;
		}
		
		total += weight;
		candidate.insert_sorted(weight)?;
	}
	
	Ok(candidate)
}
