//! Data file reading and writing.
//!
//! File layout (all integers unsigned 64-bit little-endian):
//!
//! ```text
//! count
//! len record   (repeated `count` times; record is `len` bytes of UTF-8)
//! ```
//!
//! Each record is the text produced by `Event::serialize`. Loading is
//! all-or-nothing: a truncated or malformed file yields `CorruptData` and no
//! events at all.

pub mod record;

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{RemindrError, RemindrResult};
use crate::event::Event;
use crate::store::EventStore;

/// Write `events` in the order given.
pub fn write_events<W: Write>(writer: &mut W, events: &[Event]) -> RemindrResult<()> {
    writer.write_u64::<LittleEndian>(events.len() as u64)?;

    for event in events {
        let record = event.serialize();
        writer.write_u64::<LittleEndian>(record.len() as u64)?;
        writer.write_all(record.as_bytes())?;
    }

    Ok(())
}

/// Read a complete store. The file order does not need to match store order.
pub fn read_events<R: Read>(reader: &mut R) -> RemindrResult<EventStore> {
    let count = reader
        .read_u64::<LittleEndian>()
        .map_err(|e| read_failure(e, "record count"))?;

    let mut store = EventStore::new();

    for index in 0..count {
        let len = reader
            .read_u64::<LittleEndian>()
            .map_err(|e| read_failure(e, "record length"))?;

        // Read through `take` so a bogus length cannot trigger a huge allocation
        let mut bytes = Vec::new();
        reader.by_ref().take(len).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < len {
            return Err(RemindrError::CorruptData(format!(
                "record {} truncated: expected {} bytes, found {}",
                index,
                len,
                bytes.len()
            )));
        }

        let text = String::from_utf8(bytes).map_err(|_| {
            RemindrError::CorruptData(format!("record {} is not valid UTF-8", index))
        })?;

        let event = Event::deserialize(&text, store.ids()).map_err(|e| match e {
            RemindrError::CorruptData(msg) => {
                RemindrError::CorruptData(format!("record {}: {}", index, msg))
            }
            other => other,
        })?;

        store.add(event).map_err(|e| match e {
            RemindrError::DuplicateId(id) => {
                RemindrError::CorruptData(format!("record {}: duplicate id {}", index, id))
            }
            other => other,
        })?;
    }

    let mut trailing = [0u8; 1];
    if reader.read(&mut trailing)? != 0 {
        return Err(RemindrError::CorruptData(format!(
            "unexpected data after {} records",
            count
        )));
    }

    Ok(store)
}

/// Save `events` to `path`.
///
/// The data goes to `<path>.tmp` first and is renamed over `path` once it is
/// synced, so a failed save leaves the previous file intact.
pub fn save(events: &[Event], path: &Path) -> RemindrResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);

    let result = write_file(&temp_path, events).and_then(|_| {
        fs::rename(&temp_path, path)?;
        Ok(())
    });

    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), count = events.len(), "saved events");
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            tracing::warn!(path = %path.display(), error = %e, "failed to save events");
            Err(e)
        }
    }
}

/// Load a store from `path`.
///
/// Returns `Ok(None)` when the file does not exist: there is simply no prior
/// data. Open/read failures are `Io`; a malformed file is `CorruptData`.
pub fn load(path: &Path) -> RemindrResult<Option<EventStore>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no data file, starting empty");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = BufReader::new(file);
    match read_events(&mut reader) {
        Ok(store) => {
            tracing::info!(path = %path.display(), count = store.len(), "loaded events");
            Ok(Some(store))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load events");
            Err(e)
        }
    }
}

fn write_file(path: &Path, events: &[Event]) -> RemindrResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_events(&mut writer, events)?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Running out of bytes mid-structure means the file is cut short.
fn read_failure(e: io::Error, what: &str) -> RemindrError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        RemindrError::CorruptData(format!("truncated file: missing {}", what))
    } else {
        RemindrError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{IdAllocator, Priority};
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn events() -> Vec<Event> {
        let mut ids = IdAllocator::new();
        vec![
            Event::new(&mut ids, "B", "", Utc.timestamp_opt(50, 0).unwrap(), Priority::High)
                .unwrap(),
            Event::new(&mut ids, "A", "x", Utc.timestamp_opt(100, 0).unwrap(), Priority::Medium)
                .unwrap(),
        ]
    }

    fn encode(events: &[Event]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_events(&mut buf, events).unwrap();
        buf
    }

    #[test]
    fn framing_layout() {
        let events = events();
        let buf = encode(&events[..1]);

        let record = events[0].serialize();
        let mut expected = Vec::new();
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&(record.len() as u64).to_le_bytes());
        expected.extend_from_slice(record.as_bytes());

        assert_eq!(buf, expected);
    }

    #[test]
    fn empty_store_encodes_as_zero_count() {
        let buf = encode(&[]);
        assert_eq!(buf, 0u64.to_le_bytes());

        let store = read_events(&mut Cursor::new(buf)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn read_resorts_out_of_order_records() {
        let mut events = events();
        events.reverse();
        let buf = encode(&events);

        let store = read_events(&mut Cursor::new(buf)).unwrap();
        let titles: Vec<_> = store.iter().map(|e| e.title().to_string()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn empty_input_is_corrupt() {
        let result = read_events(&mut Cursor::new(Vec::new()));
        assert!(matches!(result, Err(RemindrError::CorruptData(_))));
    }

    #[test]
    fn truncated_record_is_corrupt() {
        let buf = encode(&events());
        for cut in [4, 8, 12, buf.len() - 1] {
            let result = read_events(&mut Cursor::new(buf[..cut].to_vec()));
            assert!(
                matches!(result, Err(RemindrError::CorruptData(_))),
                "cut at {} should be corrupt",
                cut
            );
        }
    }

    #[test]
    fn oversized_length_is_corrupt() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u64.to_le_bytes());
        buf.extend_from_slice(&u64::MAX.to_le_bytes());
        buf.extend_from_slice(b"1|a|b|0|1|0");

        let result = read_events(&mut Cursor::new(buf));
        assert!(matches!(result, Err(RemindrError::CorruptData(_))));
    }

    #[test]
    fn trailing_bytes_are_corrupt() {
        let mut buf = encode(&events());
        buf.push(0);

        let result = read_events(&mut Cursor::new(buf));
        assert!(matches!(result, Err(RemindrError::CorruptData(_))));
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let events = events();
        let buf = encode(&[events[0].clone(), events[0].clone()]);

        let result = read_events(&mut Cursor::new(buf));
        assert!(matches!(result, Err(RemindrError::CorruptData(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn invalid_utf8_is_corrupt() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u64.to_le_bytes());
        buf.extend_from_slice(&2u64.to_le_bytes());
        buf.extend_from_slice(&[0xff, 0xfe]);

        let result = read_events(&mut Cursor::new(buf));
        assert!(matches!(result, Err(RemindrError::CorruptData(_))));
    }

    #[test]
    fn loaded_store_allocates_past_max_id() {
        let mut ids = IdAllocator::starting_at(50);
        let event =
            Event::new(&mut ids, "far", "", Utc.timestamp_opt(0, 0).unwrap(), Priority::Low)
                .unwrap();
        let buf = encode(&[event]);

        let mut store = read_events(&mut Cursor::new(buf)).unwrap();
        let next = store
            .create_event("new", "", Utc::now(), Priority::Low)
            .unwrap();
        assert_eq!(next.id(), 51);
    }
}
