use std::{ffi::OsString, io::{self, Write}, path::PathBuf};

use crate::{Batch, Config};

pub const CSV_HEADER: &str = "Rack ID,Sample Number,Batch Number,Number of Samples In Batch";

/// Appends `.csv` unless the name already ends with it.
pub fn csv_path(out: PathBuf) -> PathBuf {
	if out.extension().is_some_and(|extension| extension == "csv") {
		return out;
	}
	
	let mut name = OsString::from(out);
	name.push(".csv");
	name.into()
}

/// One row per rack, with a blank line after every batch.
pub fn write_csv(batches: &[Batch], mut writer: impl Write) -> Result<(), io::Error> {
	writeln!(writer, "{CSV_HEADER}")?;
	
	for batch in batches {
		let total = batch.total_weight();
		
		for item in batch.items() {
			writeln!(writer, "{},{},{},{}", item.id(), item.weight(), batch.number(), total)?;
		}
		
		writeln!(writer)?;
	}
	
	writer.flush()
}

pub fn write_summary(batches: &[Batch], config: &Config, mut writer: impl Write) -> Result<(), io::Error> {
	writeln!(writer, "Number of batches is: {}", batches.len())?;
	
	for batch in batches {
		writeln!(writer, "-- Batch number {} ({}) --", batch.number(), batch.kind())?;
		writeln!(writer, "Number of sources in this batch: {}", batch.len())?;
		writeln!(writer, "Number of destinations in this batch: {}", batch.containers(config))?;
		writeln!(writer, "Number of spots filled in destination racks: {}", batch.total_weight())?;
	}
	
	writeln!(writer)
}
