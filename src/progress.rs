use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};

use crate::Batch;

pub struct ProgressDisplay {
	finished_style: ProgressStyle,
	placed: ProgressBar,
}

impl ProgressDisplay {
	pub fn new(total_racks: u64) -> Self {
		let style = ProgressStyle::with_template("{prefix} ({msg}):  [{wide_bar:.yellow/yellow}]  {pos}/{len} racks ")
			.expect("progress template should be valid")
			.progress_chars("##-");
		let finished_style = ProgressStyle::with_template("{prefix} ({msg}):  [{wide_bar:.green}]  {pos}/{len} racks ")
			.expect("progress template should be valid")
			.progress_chars("##-");
		
		let placed = ProgressBar::new(total_racks)
			.with_finish(ProgressFinish::AndLeave)
			.with_prefix("Batching")
			.with_message("0 batches")
			.with_style(style);
		
		Self {
			finished_style,
			placed,
		}
	}
	
	pub fn advance(&self, batch: &Batch) {
		self.placed.inc(batch.len() as u64);
		self.placed.set_message(format!("{} batches", batch.number()));
		
		if self.placed.position() == self.placed.length().unwrap_or(0) {
			self.placed.set_style(self.finished_style.clone());
			self.placed.finish();
		}
	}
}
