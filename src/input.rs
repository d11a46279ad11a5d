use std::{fs::File, io::{self, BufRead, BufReader}, path::Path};

use either::Either;

use crate::{Error, Item};

/// Opens a rack list, `-` reads from standard input.
pub fn open(path: &Path) -> Result<impl BufRead, Error> {
	if path == Path::new("-") {
		return Ok(Either::Right(io::stdin().lock()));
	}
	
	let file = File::open(path).map_err(|source| Error::Input {
		path: path.to_owned(),
		source,
	})?;
	
	Ok(Either::Left(BufReader::new(file)))
}

/// Reads one rack per line, written as its id followed by its sample count.
///
/// Blank lines are skipped, anything else that doesn't have exactly these two
/// fields is rejected.
pub fn read_items(reader: impl BufRead) -> Result<Vec<Item>, Error> {
	let mut items = Vec::new();
	
	for (index, line) in reader.lines().enumerate() {
		let line = line?;
		let line_number = index + 1;
		
		let mut fields = line.split_whitespace();
		let Some(id) = fields.next() else {
			continue;
		};
		
		let Some(weight) = fields.next() else {
			return Err(Error::Parse {
				line: line_number,
				reason: format!("rack {id} has no sample count"),
			});
		};
		
		if let Some(extra) = fields.next() {
			return Err(Error::Parse {
				line: line_number,
				reason: format!("unexpected field {extra:?} after sample count"),
			});
		}
		
		let weight = weight.parse().map_err(|err| Error::Parse {
			line: line_number,
			reason: format!("invalid sample count {weight:?}: {err}"),
		})?;
		
		items.push(Item::new(id, weight));
	}
	
	Ok(items)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	
	use super::*;
	
	#[test]
	fn reads_ids_and_sample_counts() {
		let input = "SAMPLEid1 23\n\nSAMPLEid2\t96\n  R-3   1  \n";
		
		let items = read_items(input.as_bytes()).unwrap();
		
		assert_eq!(items, vec![
			Item::new("SAMPLEid1", 23),
			Item::new("SAMPLEid2", 96),
			Item::new("R-3", 1),
		]);
	}
	
	#[test]
	fn reports_line_of_bad_sample_count() {
		let input = "A 1\nB many\n";
		
		let err = read_items(input.as_bytes()).unwrap_err();
		assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
	}
	
	#[test]
	fn rejects_missing_and_extra_fields() {
		assert!(matches!(read_items("A\n".as_bytes()), Err(Error::Parse { line: 1, .. })));
		assert!(matches!(read_items("A 1 2\n".as_bytes()), Err(Error::Parse { line: 1, .. })));
	}
	
	#[test]
	fn missing_file_names_the_path() {
		let err = open(Path::new("does/not/exist.txt")).err().unwrap();
		assert!(err.to_string().contains("does/not/exist.txt"), "{err}");
	}
}
