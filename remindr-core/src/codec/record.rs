//! Text encoding of a single event record.
//!
//! Layout: `id|title|description|epochSeconds|priority|completed`, with
//! `completed` written as `1` or `0`. A literal `|` or `\` inside the title
//! or description is escaped with a backslash.

use chrono::DateTime;

use crate::error::{RemindrError, RemindrResult};
use crate::event::{Event, EventFields, EventId, IdAllocator, Priority};

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';
const FIELD_COUNT: usize = 6;

impl Event {
    /// Encode the event as one record.
    pub fn serialize(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.id(),
            escape(self.title()),
            escape(self.description()),
            self.scheduled_at().timestamp(),
            self.priority().level(),
            if self.is_completed() { 1 } else { 0 },
        )
    }

    /// Decode one record.
    ///
    /// The decoded id is reported to `ids` so that events created later never
    /// reuse it. Malformed input is `CorruptData`; `ids` is left untouched then.
    pub fn deserialize(data: &str, ids: &mut IdAllocator) -> RemindrResult<Event> {
        let fields = split_fields(data)?;
        if fields.len() != FIELD_COUNT {
            return Err(corrupt(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let id: u64 = fields[0]
            .parse()
            .map_err(|_| corrupt(format!("invalid id '{}'", fields[0])))?;
        if id == 0 {
            return Err(corrupt("id must be positive".to_string()));
        }
        if id == EventId::MAX {
            return Err(corrupt(format!("id {} is out of range", id)));
        }

        let secs: i64 = fields[3]
            .parse()
            .map_err(|_| corrupt(format!("invalid timestamp '{}'", fields[3])))?;
        let scheduled_at = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| corrupt(format!("timestamp out of range: {}", secs)))?;

        let level: i64 = fields[4]
            .parse()
            .map_err(|_| corrupt(format!("invalid priority '{}'", fields[4])))?;
        let priority = Priority::from_level(level).map_err(|e| corrupt(e.to_string()))?;

        let completed = match fields[5].as_str() {
            "1" => true,
            "0" => false,
            other => return Err(corrupt(format!("invalid completed flag '{}'", other))),
        };

        let mut fields = fields.into_iter();
        let _ = fields.next();
        let title = fields.next().unwrap_or_default();
        let description = fields.next().unwrap_or_default();

        ids.observe(id);

        Ok(Event::from_parts(
            id,
            EventFields {
                title,
                description,
                scheduled_at,
                priority,
                completed,
            },
        ))
    }
}

fn corrupt(message: String) -> RemindrError {
    RemindrError::CorruptData(message)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == SEPARATOR || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Split on unescaped separators, unescaping each field.
fn split_fields(data: &str) -> RemindrResult<Vec<String>> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut chars = data.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next @ (SEPARATOR | ESCAPE)) => current.push(next),
                Some(other) => {
                    return Err(corrupt(format!("invalid escape sequence '\\{}'", other)));
                }
                None => return Err(corrupt("dangling escape at end of record".to_string())),
            },
            SEPARATOR => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(ids: &mut IdAllocator) -> Event {
        Event::new(
            ids,
            "Team standup",
            "Daily sync",
            Utc.timestamp_opt(1_742_482_800, 0).unwrap(),
            Priority::High,
        )
        .unwrap()
    }

    #[test]
    fn serialize_layout() {
        let mut ids = IdAllocator::starting_at(7);
        let mut event = sample(&mut ids);
        assert_eq!(event.serialize(), "7|Team standup|Daily sync|1742482800|1|0");

        event.set_completed(true);
        assert!(event.serialize().ends_with("|1|1"));
    }

    #[test]
    fn deserialize_plain_record() {
        let mut ids = IdAllocator::new();
        let event = Event::deserialize("3|Dentist|Bring forms|100|2|1", &mut ids).unwrap();

        assert_eq!(event.id(), 3);
        assert_eq!(event.title(), "Dentist");
        assert_eq!(event.description(), "Bring forms");
        assert_eq!(event.scheduled_at().timestamp(), 100);
        assert_eq!(event.priority(), Priority::Medium);
        assert!(event.is_completed());
    }

    #[test]
    fn deserialize_bumps_allocator() {
        let mut ids = IdAllocator::starting_at(10);
        Event::deserialize("50|x||0|3|0", &mut ids).unwrap();

        let next = Event::new(&mut ids, "next", "", Utc::now(), Priority::Low).unwrap();
        assert!(next.id() >= 51);
    }

    #[test]
    fn separators_in_text_survive() {
        let mut ids = IdAllocator::new();
        let event = Event::new(
            &mut ids,
            "a|b",
            r"back\slash | pipe\|",
            Utc.timestamp_opt(-86_400, 0).unwrap(),
            Priority::Low,
        )
        .unwrap();

        let record = event.serialize();
        let decoded = Event::deserialize(&record, &mut IdAllocator::new()).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn largest_usable_id_exhausts_allocator() {
        let mut ids = IdAllocator::new();
        let event = Event::deserialize("18446744073709551614|far||0|3|0", &mut ids).unwrap();
        assert_eq!(event.id(), EventId::MAX - 1);

        assert!(matches!(
            Event::new(&mut ids, "next", "", Utc::now(), Priority::Low),
            Err(RemindrError::IdsExhausted)
        ));
    }

    #[test]
    fn empty_text_fields() {
        let mut ids = IdAllocator::new();
        let event = Event::deserialize("1|||5|1|0", &mut ids).unwrap();
        assert_eq!(event.title(), "");
        assert_eq!(event.description(), "");
    }

    #[test]
    fn malformed_records_rejected() {
        let cases = [
            "",
            "1|too|few|fields",
            "1|a|b|100|2|0|extra",
            "x|a|b|100|2|0",
            "0|a|b|100|2|0",
            "-4|a|b|100|2|0",
            "1|a|b|soon|2|0",
            "1|a|b|100|9|0",
            "1|a|b|100|2|yes",
            "1|a\\|b|100|2|0\\",
            "1|a\\nb|c|100|2|0",
            "18446744073709551615|far||0|3|0",
            "18446744073709551616|far||0|3|0",
        ];

        for case in cases {
            let mut ids = IdAllocator::new();
            let result = Event::deserialize(case, &mut ids);
            assert!(
                matches!(result, Err(RemindrError::CorruptData(_))),
                "expected corrupt data for {:?}",
                case
            );
            assert_eq!(ids.peek(), 1, "allocator moved for {:?}", case);
        }
    }
}
