use crate::{candidate::CandidateSequence, Error, Item};

mod frequency;
pub use frequency::WeightFrequencyTable;

/// Racks that haven't been put into a batch yet, in input order.
///
/// The frequency table is kept next to the racks so that every change goes
/// through one owner. Outside of a live [`CandidateSequence`] the table
/// matches the racks exactly; a candidate reserves counts in the table and
/// only removes racks when it's finalized.
#[derive(Debug)]
pub struct Pool {
	items: Vec<Item>,
	frequencies: WeightFrequencyTable,
}

impl Pool {
	pub fn new(items: Vec<Item>, capacity: u32) -> Result<Self, Error> {
		if let Some(item) = items.iter().find(|item| item.weight() == 0 || item.weight() > capacity) {
			return Err(Error::WeightOutOfRange {
				id: item.id().to_owned(),
				weight: item.weight(),
				capacity,
			});
		}
		
		let frequencies = WeightFrequencyTable::from_weights(capacity, items.iter().map(Item::weight));
		
		Ok(Self {
			items,
			frequencies,
		})
	}
	
	pub fn len(&self) -> usize {
		self.items.len()
	}
	
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
	
	pub fn items(&self) -> &[Item] {
		&self.items
	}
	
	pub fn frequencies(&self) -> &WeightFrequencyTable {
		&self.frequencies
	}
	
	pub fn total_weight(&self) -> u32 {
		self.items.iter().map(Item::weight).sum()
	}
	
	/// Starts an empty candidate; `batch_size` is only used to describe failures.
	pub fn candidate(&mut self, batch_size: Option<usize>) -> CandidateSequence<'_> {
		CandidateSequence::new(self, batch_size)
	}
	
	pub(crate) fn frequencies_mut(&mut self) -> &mut WeightFrequencyTable {
		&mut self.frequencies
	}
	
	/// Removes the first rack with `weight` samples. Its count must already
	/// have been reserved in the frequency table.
	pub(crate) fn withdraw(&mut self, weight: u32) -> Option<Item> {
		let position = self.items.iter().position(|item| item.weight() == weight)?;
		Some(self.items.remove(position))
	}
}
