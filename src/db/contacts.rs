use anyhow::{Context, Result};
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use crate::directory::number::normalize;
use crate::models::{ContactDetails, DirectoryRow};

/// Fields for a new contact, as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Display name built from name parts, skipping blank parts.
pub fn display_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every directory row in two bulk queries: one row per contact (no number), then
/// one row per phone number carrying only the contact id.
pub fn fetch_directory_rows(conn: &Connection) -> rusqlite::Result<Vec<DirectoryRow>> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT id, display_name, photo_uri, starred FROM contacts
         ORDER BY display_name COLLATE NOCASE, id",
    )?;
    let contacts = stmt.query_map([], |row| {
        Ok(DirectoryRow {
            id: row.get(0)?,
            display_name: row.get(1)?,
            photo_reference: row.get(2)?,
            is_favorite: row.get::<_, Option<i64>>(3)?.map(|s| s == 1),
            phone_number: None,
        })
    })?;
    for contact in contacts {
        rows.push(contact?);
    }

    let mut stmt = conn.prepare("SELECT contact_id, number FROM phone_numbers ORDER BY id")?;
    let numbers = stmt.query_map([], |row| {
        Ok(DirectoryRow {
            id: row.get(0)?,
            phone_number: row.get(1)?,
            ..Default::default()
        })
    })?;
    for number in numbers {
        rows.push(number?);
    }

    debug!("Fetched {} directory rows", rows.len());
    Ok(rows)
}

/// One contact with its numbers normalized and de-duplicated.
pub fn contact_details(conn: &Connection, contact_id: &str) -> Result<Option<ContactDetails>> {
    let contact = conn
        .query_row(
            "SELECT display_name, photo_uri, starred, email FROM contacts WHERE id = ?1",
            [contact_id],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((name, photo_uri, starred, email)) = contact else {
        return Ok(None);
    };

    let mut stmt = conn.prepare("SELECT number FROM phone_numbers WHERE contact_id = ?1 ORDER BY id")?;
    let mut phone_numbers: Vec<String> = Vec::new();
    for number in stmt.query_map([contact_id], |row| row.get::<_, String>(0))? {
        let normalized = normalize(&number?);
        if !normalized.is_empty() && !phone_numbers.contains(&normalized) {
            phone_numbers.push(normalized);
        }
    }

    Ok(Some(ContactDetails {
        id: contact_id.to_string(),
        name: name.unwrap_or_default(),
        photo_reference: photo_uri.filter(|p| !p.is_empty()),
        phone_numbers,
        email: email.filter(|e| !e.is_empty()),
        is_favorite: starred == Some(1),
    }))
}

/// Insert a contact and return its new id.
pub fn add_contact(conn: &mut Connection, contact: &NewContact) -> Result<String> {
    let tx = conn.transaction()?;

    let next_id: i64 = tx.query_row(
        "SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) + 1 FROM contacts",
        [],
        |row| row.get(0),
    )?;
    let id = next_id.to_string();

    tx.execute(
        "INSERT INTO contacts (id, display_name, first_name, last_name, starred, email)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        params![
            id,
            display_name(&contact.first_name, &contact.last_name),
            contact.first_name.trim(),
            contact.last_name.trim(),
            Some(contact.email.trim()).filter(|e| !e.is_empty()),
        ],
    )?;

    if !contact.phone.trim().is_empty() {
        tx.execute(
            "INSERT INTO phone_numbers (contact_id, number, phone_type) VALUES (?1, ?2, 'mobile')",
            params![id, contact.phone.trim()],
        )?;
    }

    tx.commit().context("Failed to save contact")?;
    debug!("Added contact {}", id);
    Ok(id)
}

/// Rename a contact and upsert its primary number: an existing first number is
/// replaced, or deleted when `phone` is blank; a missing one is inserted.
/// Returns false when no such contact exists.
pub fn update_contact(
    conn: &mut Connection,
    contact_id: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
) -> Result<bool> {
    let tx = conn.transaction()?;

    let updated = tx.execute(
        "UPDATE contacts SET display_name = ?2, first_name = ?3, last_name = ?4 WHERE id = ?1",
        params![
            contact_id,
            display_name(first_name, last_name),
            first_name.trim(),
            last_name.trim(),
        ],
    )?;
    if updated == 0 {
        return Ok(false);
    }

    let phone_row: Option<i64> = tx
        .query_row(
            "SELECT id FROM phone_numbers WHERE contact_id = ?1 ORDER BY id LIMIT 1",
            [contact_id],
            |row| row.get(0),
        )
        .optional()?;

    let phone = phone.trim();
    match (phone_row, phone.is_empty()) {
        (Some(row_id), false) => {
            tx.execute(
                "UPDATE phone_numbers SET number = ?2 WHERE id = ?1",
                params![row_id, phone],
            )?;
        }
        (Some(row_id), true) => {
            tx.execute("DELETE FROM phone_numbers WHERE id = ?1", [row_id])?;
        }
        (None, false) => {
            tx.execute(
                "INSERT INTO phone_numbers (contact_id, number, phone_type) VALUES (?1, ?2, 'mobile')",
                params![contact_id, phone],
            )?;
        }
        (None, true) => {}
    }

    tx.commit().context("Failed to update contact")?;
    Ok(true)
}

/// Delete a contact and its numbers. Returns false when nothing was deleted.
pub fn delete_contact(conn: &mut Connection, contact_id: &str) -> Result<bool> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM phone_numbers WHERE contact_id = ?1", [contact_id])?;
    let deleted = tx.execute("DELETE FROM contacts WHERE id = ?1", [contact_id])?;
    tx.commit()?;
    Ok(deleted > 0)
}

/// Star or unstar a contact. Returns false when no such contact exists.
pub fn set_favorite(conn: &Connection, contact_id: &str, is_favorite: bool) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE contacts SET starred = ?2 WHERE id = ?1",
        params![contact_id, is_favorite as i64],
    )?;
    Ok(updated > 0)
}
