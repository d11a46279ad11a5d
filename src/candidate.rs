use std::mem;

use crate::{
	error::{InvariantViolation, Violation},
	pool::{Pool, WeightFrequencyTable},
	Batch, BatchKind, Error,
};

/// Sample counts of a batch under construction, kept in ascending order.
///
/// Every value in the sequence is reserved in the pool's frequency table, so
/// the table always shows what is still free to pick. The racks themselves
/// stay in the pool until [`CandidateSequence::finalize`]; dropping the
/// sequence without finalizing it releases all reservations.
#[derive(Debug)]
pub struct CandidateSequence<'p> {
	pool: &'p mut Pool,
	weights: Vec<u32>,
	batch_size: Option<usize>,
}

impl<'p> CandidateSequence<'p> {
	pub(crate) fn new(pool: &'p mut Pool, batch_size: Option<usize>) -> Self {
		Self {
			pool,
			weights: Vec::new(),
			batch_size,
		}
	}
	
	/// Inserts after any equal values and reserves one rack with `weight` samples.
	pub fn insert_sorted(&mut self, weight: u32) -> Result<(), Error> {
		if !self.pool.frequencies_mut().decrement(weight) {
			return Err(self.violation(Violation::Unavailable(weight)));
		}
		
		let position = self.weights.partition_point(|&existing| existing <= weight);
		self.weights.insert(position, weight);
		
		Ok(())
	}
	
	/// Removes the last occurrence of `weight` and releases its reservation.
	pub fn remove_value(&mut self, weight: u32) -> Result<(), Error> {
		let Some(position) = self.weights.iter().rposition(|&existing| existing == weight) else {
			return Err(self.violation(Violation::NotInCandidate(weight)));
		};
		
		self.weights.remove(position);
		self.pool.frequencies_mut().increment(weight);
		
		Ok(())
	}
	
	pub fn clear(&mut self) {
		for weight in mem::take(&mut self.weights) {
			self.pool.frequencies_mut().increment(weight);
		}
	}
	
	pub fn sum(&self) -> u32 {
		self.weights.iter().sum()
	}
	
	pub fn len(&self) -> usize {
		self.weights.len()
	}
	
	pub fn is_empty(&self) -> bool {
		self.weights.is_empty()
	}
	
	pub fn weights(&self) -> &[u32] {
		&self.weights
	}
	
	pub fn smallest(&self) -> Option<u32> {
		self.weights.first().copied()
	}
	
	pub fn second_largest(&self) -> Option<u32> {
		let len = self.weights.len();
		if len < 2 {
			return None;
		}
		
		Some(self.weights[len - 2])
	}
	
	/// What is left to choose from, not counting this candidate's reservations.
	pub fn frequencies(&self) -> &WeightFrequencyTable {
		self.pool.frequencies()
	}
	
	/// Number of racks in the pool, including the ones reserved by this candidate.
	pub fn pool_len(&self) -> usize {
		self.pool.len()
	}
	
	pub fn pool_weights(&self) -> Vec<u32> {
		self.pool.items().iter().map(|item| item.weight()).collect()
	}
	
	pub fn violation(&self, kind: Violation) -> Error {
		Error::Invariant(Box::new(InvariantViolation {
			kind,
			batch_size: self.batch_size,
			candidate: self.weights.clone(),
			available: self.frequencies().iter().collect(),
		}))
	}
	
	/// Moves one pool rack per sample count into a new batch, in sequence order.
	pub fn finalize(mut self, number: usize, kind: BatchKind) -> Result<Batch, Error> {
		let weights = mem::take(&mut self.weights);
		let mut items = Vec::with_capacity(weights.len());
		
		for &weight in &weights {
			let Some(item) = self.pool.withdraw(weight) else {
				return Err(Error::Invariant(Box::new(InvariantViolation {
					kind: Violation::NoMatchingItem(weight),
					batch_size: self.batch_size,
					candidate: weights.clone(),
					available: self.frequencies().iter().collect(),
				})));
			};
			
			items.push(item);
		}
		
		Ok(Batch::new(number, kind, items))
	}
}

impl Drop for CandidateSequence<'_> {
	fn drop(&mut self) {
		self.clear();
	}
}
