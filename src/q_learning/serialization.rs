//! Flat-file persistence for the Q-table.
//!
//! One record per line, no header: `<stateKey>,<action>,<value>`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use log::{info, warn};
use tempfile::NamedTempFile;

use crate::{
    error::{Error, Result},
    q_learning::q_table::QTable,
    types::StateKey,
};

/// Parse a whole table from a reader.
///
/// # Errors
///
/// Fails on the first malformed record with [`Error::MalformedRecord`]; nothing
/// from a partially valid source is returned.
pub fn read_table<R: Read>(reader: R) -> Result<QTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = QTable::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);
        let (state, action, value) =
            parse_record(&record).map_err(|reason| Error::MalformedRecord { line, reason })?;
        table.set(state, action, value);
    }
    Ok(table)
}

fn parse_record(record: &csv::StringRecord) -> std::result::Result<(StateKey, usize, f64), String> {
    if record.len() != 3 {
        return Err(format!("expected 3 fields, found {}", record.len()));
    }

    let state = StateKey::parse(&record[0]).map_err(|e| e.to_string())?;

    // Blank cells may be spaces, so only the numeric fields are trimmed
    let (action, value) = (record[1].trim(), record[2].trim());
    let action: usize = action
        .parse()
        .map_err(|_| format!("action '{action}' is not an integer"))?;
    if action >= 9 {
        return Err(format!("action {action} is out of range 0-8"));
    }

    let value: f64 = value
        .parse()
        .map_err(|_| format!("value '{value}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("value {value} is not finite"));
    }

    Ok((state, action, value))
}

/// Write every entry of the table, sorted by state then action.
pub fn write_table<W: Write>(table: &QTable, writer: W) -> Result<()> {
    let mut entries: Vec<(&StateKey, usize, f64)> = table.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0).then(a.1.cmp(&b.1)));

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for (state, action, value) in entries {
        let action = action.to_string();
        let value = value.to_string();
        csv_writer.write_record([state.as_str(), action.as_str(), value.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

impl QTable {
    /// Load a table from disk. A missing file yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains a
    /// malformed record.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no Q-table at {}, starting empty", path.display());
                return Ok(QTable::new());
            }
            Err(err) => {
                return Err(Error::io(
                    format!("open Q-table {}", path.display()),
                    err,
                ));
            }
        };

        let table = read_table(BufReader::new(file))?;
        info!(
            "loaded {} Q-values for {} states from {}",
            table.len(),
            table.state_count(),
            path.display()
        );
        Ok(table)
    }

    /// Load a table, falling back to an empty one when the source is unusable.
    ///
    /// Losing learned history never blocks play; the failure is logged.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(table) => table,
            Err(err) => {
                warn!(
                    "ignoring unusable Q-table {}: {err}; starting empty",
                    path.display()
                );
                QTable::new()
            }
        }
    }

    /// Replace `path` with every entry in the table.
    ///
    /// The table is written to a temporary file next to `path` and renamed
    /// over it, so a failed save leaves the previous file intact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)
            .map_err(|err| Error::io(format!("stage Q-table in {}", dir.display()), err))?;
        write_table(self, BufWriter::new(staged.as_file_mut()))?;
        staged
            .persist(path)
            .map_err(|err| Error::io(format!("replace Q-table {}", path.display()), err.error))?;

        info!("saved {} Q-values to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_write_format() {
        let mut table = QTable::new();
        table.set(key("X...O...."), 2, -0.5);
        table.set(key("........."), 4, 0.25);
        table.set(key("........."), 0, 1.0);

        let mut buffer = Vec::new();
        write_table(&table, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text, ".........,0,1\n.........,4,0.25\nX...O....,2,-0.5\n");
    }

    #[test]
    fn test_read_table() {
        let source = "X...O....,2,-0.5\n.........,4,0.25\n";
        let table = read_table(source.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&key("X...O...."), 2), -0.5);
        assert_eq!(table.get(&key("........."), 4), 0.25);
    }

    #[test]
    fn test_read_tolerates_padded_numbers_and_blank_lines() {
        let source = "X...O...., 2 , 0.125 \n\n.........,4,1e-3\n";
        let table = read_table(source.as_bytes()).unwrap();

        assert_eq!(table.get(&key("X...O...."), 2), 0.125);
        assert_eq!(table.get(&key("........."), 4), 0.001);
    }

    #[test]
    fn test_read_space_blank_keys() {
        let source = "    X    ,0,0.5\nXO  X    , 8 ,-0.25\n";
        let table = read_table(source.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&key("....X...."), 0), 0.5);
        assert_eq!(table.get(&key("XO..X...."), 8), -0.25);

        let mut buffer = Vec::new();
        write_table(&table, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "....X....,0,0.5\nXO..X....,8,-0.25\n"
        );
    }

    #[test]
    fn test_padded_key_is_rejected() {
        let err = read_table(" X...O.... ,2,0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_empty_source() {
        let table = read_table("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let source = ".........,4,0.5\n.........,4\n";
        let err = read_table(source.as_bytes()).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { line: 2, .. }),
            "unexpected error: {err}"
        );

        let err = read_table(".........,4,0.5,7\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_rejects_non_numeric_value() {
        let err = read_table(".........,4,high\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("not a number"), "{err}");

        let err = read_table(".........,4,NaN\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("not finite"), "{err}");
    }

    #[test]
    fn test_rejects_bad_action() {
        let err = read_table(".........,four,0.5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("not an integer"), "{err}");

        let err = read_table(".........,9,0.5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn test_rejects_bad_state_key() {
        let err = read_table("XO,4,0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));

        let err = read_table("ABCDEFGHI,4,0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }
}
