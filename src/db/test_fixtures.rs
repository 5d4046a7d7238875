//! Shared test fixtures for db module tests
//!
//! States are written in the device export format and loaded through the
//! importer, so fixtures exercise the same path as `dialbook import`.

#[cfg(test)]
use rusqlite::Connection;
#[cfg(test)]
use serde_json::{Value, json};

/// Three contacts: Ann (two numbers, one stored twice), starred Bob, and Cy with no numbers.
#[cfg(test)]
pub fn directory_state() -> Value {
    json!({
        "contacts": [
            {
                "id": "1",
                "name": "Ann Lee",
                "photo_uri": "content://photo/1",
                "starred": false,
                "numbers": ["+1 (555) 123-0000", "555.000.1111", "+15551230000"]
            },
            {"id": "2", "name": "Bob Ray", "starred": true, "numbers": ["555 987 6543"]},
            {"id": "3", "name": "Cy Twombly"}
        ]
    })
}

/// The directory plus a call log mixing linked, unknown and malformed rows.
#[cfg(test)]
pub fn calls_state() -> Value {
    let mut state = directory_state();
    state["calls"] = json!([
        {"id": "c1", "number": "+15551230000", "type": 1, "date": 1_700_000_300_000i64, "duration": 65},
        {"id": "c2", "number": "15551230000", "type": 3, "date": 1_700_000_200_000i64, "duration": 0},
        {"id": "c3", "number": "5550009999", "cached_name": "Pizza Place", "type": 2, "date": 1_700_000_100_000i64, "duration": 30},
        {"id": "c4", "number": "555 987 6543", "type": 3, "date": 1_700_000_400_000i64, "duration": 0},
        {"id": "c5", "type": 99, "date": 1_700_000_000_000i64, "duration": -5}
    ]);
    state
}

/// Creates an in-memory database at the latest schema holding `state`.
#[cfg(test)]
pub fn build_test_db(state: &Value) -> Connection {
    let mut conn = crate::db::schema::in_memory().unwrap();
    let export: crate::db::import::DeviceExport = serde_json::from_value(state.clone()).unwrap();
    crate::db::import::import_export(&mut conn, &export, false).unwrap();
    conn
}
