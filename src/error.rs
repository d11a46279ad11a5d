use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to read {}: {source}", path.display())]
	Input {
		path: PathBuf,
		source: io::Error,
	},
	#[error("failed to write {}: {source}", path.display())]
	Output {
		path: PathBuf,
		source: io::Error,
	},
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error("line {line}: {reason}")]
	Parse {
		line: usize,
		reason: String,
	},
	#[error("rack {id} has {weight} samples, expected between 1 and {capacity}")]
	WeightOutOfRange {
		id: String,
		weight: u32,
		capacity: u32,
	},
	#[error("invalid configuration: {0}")]
	Config(String),
	#[error("internal invariant violated: {0}")]
	Invariant(#[from] Box<InvariantViolation>),
}

/// Bookkeeping failure inside the batching heuristic, with the state it happened in
#[derive(Debug, thiserror::Error)]
#[error("{kind} (batch size {batch_size:?}, candidate {candidate:?}, available {available:?})")]
pub struct InvariantViolation {
	pub kind: Violation,
	pub batch_size: Option<usize>,
	pub candidate: Vec<u32>,
	/// `(weight, count)` for every weight that still had racks left
	pub available: Vec<(u32, usize)>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Violation {
	#[error("no available sample count below {0}")]
	NothingBelow(u32),
	#[error("candidate has no second largest value to replace")]
	NoSecondLargest,
	#[error("{0} is not in the candidate sequence")]
	NotInCandidate(u32),
	#[error("no rack with {0} samples is left to reserve")]
	Unavailable(u32),
	#[error("no rack with {0} samples is left in the pool")]
	NoMatchingItem(u32),
}

impl Error {
	pub fn violation(&self) -> Option<Violation> {
		match self {
			Error::Invariant(violation) => Some(violation.kind),
			_ => None,
		}
	}
}
