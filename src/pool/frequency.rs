use std::collections::BTreeSet;

/// Number of racks left for every sample count between 1 and the rack capacity.
///
/// Counts live in a vector indexed by sample count (index 0 is unused). The
/// sample counts that still have at least one rack are mirrored in an ordered
/// set so neighbor lookups don't have to scan the whole range.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WeightFrequencyTable {
	counts: Vec<usize>,
	available: BTreeSet<u32>,
	total: usize,
}

impl WeightFrequencyTable {
	pub fn new(capacity: u32) -> Self {
		Self {
			counts: vec![0; capacity as usize + 1],
			available: BTreeSet::new(),
			total: 0,
		}
	}
	
	/// # Panics
	///
	/// Panics if a weight is 0 or larger than the capacity.
	pub fn from_weights(capacity: u32, weights: impl IntoIterator<Item = u32>) -> Self {
		let mut table = Self::new(capacity);
		
		for weight in weights {
			table.increment(weight);
		}
		
		table
	}
	
	pub fn capacity(&self) -> u32 {
		(self.counts.len() - 1) as u32
	}
	
	/// Total number of racks counted over all sample counts.
	pub fn total(&self) -> usize {
		self.total
	}
	
	/// # Panics
	///
	/// Panics if `weight` is 0 or larger than the capacity.
	pub fn increment(&mut self, weight: u32) {
		assert!((1..=self.capacity()).contains(&weight), "sample count {weight} is out of range");
		
		let count = &mut self.counts[weight as usize];
		*count += 1;
		self.total += 1;
		
		if *count == 1 {
			self.available.insert(weight);
		}
	}
	
	/// Takes one rack with `weight` samples out of the table, returns `false` if there was none left.
	pub fn decrement(&mut self, weight: u32) -> bool {
		if !self.is_available(weight) {
			return false;
		}
		
		let count = &mut self.counts[weight as usize];
		*count -= 1;
		self.total -= 1;
		
		if *count == 0 {
			self.available.remove(&weight);
		}
		
		true
	}
	
	pub fn count_at(&self, weight: u32) -> usize {
		self.counts.get(weight as usize).copied().unwrap_or(0)
	}
	
	pub fn is_available(&self, weight: u32) -> bool {
		weight >= 1 && self.count_at(weight) > 0
	}
	
	pub fn smallest_available(&self) -> Option<u32> {
		self.available.first().copied()
	}
	
	pub fn largest_available(&self) -> Option<u32> {
		self.available.last().copied()
	}
	
	/// Largest available value strictly below `weight`.
	pub fn next_available_below(&self, weight: u32) -> Option<u32> {
		self.available.range(..weight).next_back().copied()
	}
	
	/// Smallest available value strictly above `weight`, or `weight` itself if
	/// nothing larger is left.
	pub fn next_available_above(&self, weight: u32) -> u32 {
		match weight.checked_add(1) {
			Some(start) => self.available.range(start..).next().copied().unwrap_or(weight),
			None => weight,
		}
	}
	
	/// Iterates over `(weight, count)` for every available weight in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
		self.available.iter().map(|&weight| (weight, self.counts[weight as usize]))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	
	use super::*;
	
	fn table() -> WeightFrequencyTable {
		WeightFrequencyTable::from_weights(10, [3, 3, 5, 8, 10])
	}
	
	#[test]
	fn counts_every_weight() {
		let table = table();
		
		assert_eq!(table.total(), 5);
		assert_eq!(table.count_at(3), 2);
		assert_eq!(table.count_at(4), 0);
		assert_eq!(table.count_at(11), 0);
		assert_eq!(table.iter().collect::<Vec<_>>(), vec![(3, 2), (5, 1), (8, 1), (10, 1)]);
	}
	
	#[rstest]
	#[case(0, false)]
	#[case(3, true)]
	#[case(4, false)]
	#[case(10, true)]
	#[case(11, false)]
	fn availability_is_bounded_by_capacity(#[case] weight: u32, #[case] expected: bool) {
		assert_eq!(table().is_available(weight), expected);
	}
	
	#[test]
	fn extremes_follow_removals() {
		let mut table = table();
		assert_eq!(table.smallest_available(), Some(3));
		assert_eq!(table.largest_available(), Some(10));
		
		assert!(table.decrement(10));
		assert!(table.decrement(3));
		assert_eq!(table.smallest_available(), Some(3));
		assert_eq!(table.largest_available(), Some(8));
		
		assert!(table.decrement(3));
		assert_eq!(table.smallest_available(), Some(5));
	}
	
	#[test]
	fn decrement_refuses_missing_weights() {
		let mut table = table();
		
		assert!(!table.decrement(4));
		assert!(!table.decrement(0));
		assert!(!table.decrement(42));
		assert_eq!(table.total(), 5);
	}
	
	#[test]
	fn empty_table_has_no_extremes() {
		let table = WeightFrequencyTable::new(96);
		
		assert_eq!(table.smallest_available(), None);
		assert_eq!(table.largest_available(), None);
		assert_eq!(table.next_available_below(96), None);
		assert_eq!(table.next_available_above(1), 1);
	}
	
	#[rstest]
	#[case(10, Some(8))]
	#[case(8, Some(5))]
	#[case(6, Some(5))]
	#[case(4, Some(3))]
	#[case(3, None)]
	#[case(200, Some(10))]
	fn neighbor_below_is_strict(#[case] weight: u32, #[case] expected: Option<u32>) {
		assert_eq!(table().next_available_below(weight), expected);
	}
	
	#[rstest]
	#[case(1, 3)]
	#[case(3, 5)]
	#[case(5, 8)]
	#[case(9, 10)]
	#[case(10, 10)]
	#[case(u32::MAX, u32::MAX)]
	fn neighbor_above_is_strict(#[case] weight: u32, #[case] expected: u32) {
		assert_eq!(table().next_available_above(weight), expected);
	}
	
	#[test]
	fn neighbors_skip_exhausted_weights() {
		let mut table = table();
		table.decrement(5);
		
		assert_eq!(table.next_available_below(8), Some(3));
		assert_eq!(table.next_available_above(3), 8);
	}
	
	#[test]
	#[should_panic]
	fn increment_rejects_out_of_range() {
		WeightFrequencyTable::new(10).increment(11);
	}
}
