use std::fmt::Display;

use crate::{Config, Item};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BatchKind {
	/// Last rack was chosen to fill the destination racks exactly or as close as possible
	Fitted,
	/// No fitting last rack existed, the sizing estimate was used instead
	Approximate,
	/// Built from the leftover racks once too few remained for the heuristic
	Remainder,
}

impl Display for BatchKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BatchKind::Fitted => f.write_str("fitted"),
			BatchKind::Approximate => f.write_str("approximate"),
			BatchKind::Remainder => f.write_str("remainder"),
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Batch {
	number: usize,
	kind: BatchKind,
	items: Vec<Item>,
}

impl Batch {
	pub(crate) fn new(number: usize, kind: BatchKind, items: Vec<Item>) -> Self {
		Self {
			number,
			kind,
			items,
		}
	}
	
	/// 1-based position of the batch in the run.
	pub fn number(&self) -> usize {
		self.number
	}
	
	pub fn kind(&self) -> BatchKind {
		self.kind
	}
	
	pub fn items(&self) -> &[Item] {
		&self.items
	}
	
	pub fn len(&self) -> usize {
		self.items.len()
	}
	
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
	
	pub fn total_weight(&self) -> u32 {
		self.items.iter().map(Item::weight).sum()
	}
	
	/// Destination racks needed for all samples in the batch.
	pub fn containers(&self, config: &Config) -> u32 {
		config.containers_for(self.total_weight())
	}
}
