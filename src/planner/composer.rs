use tracing::{debug, warn};

use super::sizer::Sizing;
use crate::{
	candidate::CandidateSequence, error::Violation, pool::Pool, Batch, BatchKind, Config, Error,
};

/// A complete batch composition, still reserved in the pool.
#[derive(Debug)]
pub struct Composition<'p> {
	pub candidate: CandidateSequence<'p>,
	pub kind: BatchKind,
}

impl Composition<'_> {
	pub fn finalize(self, number: usize) -> Result<Batch, Error> {
		self.candidate.finalize(number, self.kind)
	}
}

/// Picks the sample counts of the next batch.
///
/// The largest rack goes in first, then sample counts proportionally to how
/// often they occur in the pool, then the smallest ones until one spot is
/// left. The last rack is chosen to fill the destination racks exactly, and
/// the other values are shifted down or up when no such rack exists.
///
/// Returns `None` if the pool ran out of racks before the batch was complete.
pub fn compose_batch<'p>(pool: &'p mut Pool, config: &Config, sizing: &Sizing) -> Result<Option<Composition<'p>>, Error> {
	let batch_size = sizing.batch_size;
	let pool_len = pool.len();
	let mut candidate = pool.candidate(Some(batch_size));
	
	let Some(largest) = candidate.frequencies().largest_available() else {
		return Ok(None);
	};
	candidate.insert_sorted(largest)?;
	
	if batch_size <= 1 {
		return Ok(Some(Composition {
			candidate,
			kind: BatchKind::Fitted,
		}));
	}
	
	add_ratios(&mut candidate, config, batch_size, pool_len)?;
	
	while candidate.len() < batch_size - 1 {
		let Some(smallest) = candidate.frequencies().smallest_available() else {
			warn!(batch_size, "no racks left to fill the batch");
			return Ok(None);
		};
		
		candidate.insert_sorted(smallest)?;
	}
	
	let ideal = ideal_last(&candidate, config, batch_size);
	debug!(batch_size, ideal, candidate = ?candidate.weights(), "filled all but the last spot");
	
	let last = if ideal < 1 {
		decrease_total(&mut candidate, config, batch_size)?
	} else if !fits(&candidate, config, ideal) {
		increase_total(&mut candidate, config, batch_size, ideal)?
	} else {
		Some(ideal as u32)
	};
	
	let Some(last) = last else {
		warn!(batch_size, fallback = ?sizing.fallback, "no fitting last rack, using sizing estimate");
		
		candidate.clear();
		for &weight in &sizing.fallback {
			candidate.insert_sorted(weight)?;
		}
		
		return Ok(Some(Composition {
			candidate,
			kind: BatchKind::Approximate,
		}));
	};
	
	candidate.insert_sorted(last)?;
	
	Ok(Some(Composition {
		candidate,
		kind: BatchKind::Fitted,
	}))
}

/// Adds every sample count in proportion to its share of the pool, keeping
/// one spot free for the last rack.
fn add_ratios(candidate: &mut CandidateSequence, config: &Config, batch_size: usize, pool_len: usize) -> Result<(), Error> {
	for weight in 1..=config.capacity {
		let count = candidate.frequencies().count_at(weight);
		if count == 0 {
			continue;
		}
		
		let to_add = (count * batch_size / pool_len).min(count);
		
		for _ in 0..to_add {
			if candidate.len() >= batch_size - 1 {
				return Ok(());
			}
			
			candidate.insert_sorted(weight)?;
		}
	}
	
	Ok(())
}

fn ideal_last(candidate: &CandidateSequence, config: &Config, batch_size: usize) -> i64 {
	config.slot_budget(batch_size) - i64::from(candidate.sum())
}

fn fits(candidate: &CandidateSequence, config: &Config, ideal: i64) -> bool {
	ideal >= 1 && ideal <= i64::from(config.capacity) && candidate.frequencies().is_available(ideal as u32)
}

/// Replaces the second largest value with the next smaller available one
/// until the ideal last rack becomes positive, then rounds it down to an
/// available sample count.
///
/// The largest value stays: the sizing run showed it fits with the smallest
/// racks of the pool. Returns `None` if nothing at or below the ideal value is
/// left.
fn decrease_total(candidate: &mut CandidateSequence, config: &Config, batch_size: usize) -> Result<Option<u32>, Error> {
	let mut ideal = ideal_last(candidate, config, batch_size);
	
	while ideal < 1 {
		let Some(second_largest) = candidate.second_largest() else {
			return Err(candidate.violation(Violation::NoSecondLargest));
		};
		
		let Some(replacement) = candidate.frequencies().next_available_below(second_largest) else {
			return Err(candidate.violation(Violation::NothingBelow(second_largest)));
		};
		
		candidate.remove_value(second_largest)?;
		candidate.insert_sorted(replacement)?;
		
		ideal = ideal_last(candidate, config, batch_size);
		debug!(second_largest, replacement, ideal, "decreased total");
	}
	
	let ideal = u32::try_from(ideal).unwrap_or(u32::MAX);
	if candidate.frequencies().is_available(ideal) {
		return Ok(Some(ideal));
	}
	
	Ok(candidate.frequencies().next_available_below(ideal))
}

/// Replaces the smallest value with the next larger available one until the
/// ideal last rack is an available sample count.
///
/// Returns `None` once the values can't be raised any further or the total
/// would overflow the destination racks.
fn increase_total(candidate: &mut CandidateSequence, config: &Config, batch_size: usize, mut ideal: i64) -> Result<Option<u32>, Error> {
	while !fits(candidate, config, ideal) {
		let Some(smallest) = candidate.smallest() else {
			return Ok(None);
		};
		
		let replacement = candidate.frequencies().next_available_above(smallest);
		if replacement == smallest || Some(replacement) == candidate.frequencies().largest_available() {
			return Ok(None);
		}
		
		candidate.remove_value(smallest)?;
		candidate.insert_sorted(replacement)?;
		
		ideal = ideal_last(candidate, config, batch_size);
		debug!(smallest, replacement, ideal, "increased total");
		
		if ideal < 1 {
			return Ok(None);
		}
	}
	
	Ok(Some(ideal as u32))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	
	use super::*;
	use crate::{planner::sizer::choose_batch_size, Item};
	
	fn pool(weights: &[u32], capacity: u32) -> Pool {
		let items = weights.iter()
			.enumerate()
			.map(|(i, &weight)| Item::new(format!("R{i}"), weight))
			.collect();
		
		Pool::new(items, capacity).unwrap()
	}
	
	fn repeat(weight: u32, times: usize) -> impl Iterator<Item = u32> {
		std::iter::repeat_n(weight, times)
	}
	
	#[test]
	fn decreases_when_ratios_overshoot() {
		let config = Config::new(10, 8).unwrap();
		let weights: Vec<u32> = repeat(10, 1).chain(repeat(1, 6)).chain(repeat(9, 14)).collect();
		let mut pool = pool(&weights, 10);
		
		let sizing = choose_batch_size(&mut pool, &config).unwrap();
		assert_eq!(sizing.batch_size, 6);
		
		// ratios give [1, 9, 9, 9, 10], every 9 has to be swapped for a 1
		let composition = compose_batch(&mut pool, &config, &sizing).unwrap().unwrap();
		assert_eq!(composition.kind, BatchKind::Fitted);
		assert_eq!(composition.candidate.weights(), &[1, 1, 1, 1, 1, 10]);
		assert!(i64::from(composition.candidate.sum()) <= config.slot_budget(6));
	}
	
	#[test]
	fn falls_back_to_sizing_estimate() {
		let config = Config::new(10, 4).unwrap();
		let mut pool = pool(&[10, 1, 1, 1, 1, 9], 10);
		
		let sizing = choose_batch_size(&mut pool, &config).unwrap();
		let composition = compose_batch(&mut pool, &config, &sizing).unwrap().unwrap();
		
		// 10 would be the ideal last rack, but the only 10 is already taken
		assert_eq!(composition.kind, BatchKind::Approximate);
		assert_eq!(composition.candidate.weights(), &[1, 10]);
	}
	
	#[test]
	fn picks_the_exact_last_rack() {
		let config = Config::new(10, 6).unwrap();
		let weights = [10, 2, 2, 2, 8, 8, 4, 4];
		let mut pool = pool(&weights, 10);
		
		let sizing = choose_batch_size(&mut pool, &config).unwrap();
		assert_eq!(sizing.batch_size, 4);
		
		// [2, 4, 10] leaves 20 - 16 = 4 spots and a 4 is still free
		let composition = compose_batch(&mut pool, &config, &sizing).unwrap().unwrap();
		assert_eq!(composition.kind, BatchKind::Fitted);
		assert_eq!(composition.candidate.weights(), &[2, 4, 4, 10]);
	}
	
	#[test]
	fn increases_until_a_rack_fits() {
		let config = Config::new(10, 6).unwrap();
		let weights = [10, 10, 1, 1, 1, 1, 3, 6];
		let mut pool = pool(&weights, 10);
		
		let sizing = choose_batch_size(&mut pool, &config).unwrap();
		assert_eq!(sizing.batch_size, 4);
		
		// [1, 1, 10] asks for an 8, raising a 1 to 3 asks for a 6 instead
		let composition = compose_batch(&mut pool, &config, &sizing).unwrap().unwrap();
		assert_eq!(composition.kind, BatchKind::Fitted);
		assert_eq!(composition.candidate.weights(), &[1, 3, 6, 10]);
		assert_eq!(composition.candidate.sum(), 20);
	}
	
	#[test]
	fn single_rack_batch_is_the_largest() {
		let config = Config::new(10, 3).unwrap();
		let mut pool = pool(&[10, 9, 9, 9], 10);
		
		let sizing = choose_batch_size(&mut pool, &config).unwrap();
		assert_eq!(sizing.batch_size, 1);
		
		let composition = compose_batch(&mut pool, &config, &sizing).unwrap().unwrap();
		assert_eq!(composition.candidate.weights(), &[10]);
	}
	
	#[test]
	fn finalized_composition_leaves_table_consistent() {
		let config = Config::new(10, 8).unwrap();
		let weights: Vec<u32> = repeat(10, 1).chain(repeat(1, 6)).chain(repeat(9, 14)).collect();
		let mut pool = pool(&weights, 10);
		
		let sizing = choose_batch_size(&mut pool, &config).unwrap();
		let batch = compose_batch(&mut pool, &config, &sizing).unwrap().unwrap().finalize(1).unwrap();
		
		assert_eq!(batch.len(), 6);
		assert_eq!(pool.len(), 15);
		assert_eq!(pool.frequencies().count_at(1), 1);
		assert_eq!(pool.frequencies().count_at(9), 14);
		assert_eq!(pool.frequencies().count_at(10), 0);
	}
}
