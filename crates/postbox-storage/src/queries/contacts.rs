// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact record operations.
//!
//! The submission pipeline only inserts. Reads exist for tests and
//! out-of-band administration; records are never updated or deleted.

use postbox_core::{ContactRecord, NewContact, PostboxError};
use rusqlite::params;

use crate::database::Database;

/// Insert a new contact record and return the auto-assigned row id.
pub async fn insert_contact(db: &Database, contact: &NewContact) -> Result<i64, PostboxError> {
    let contact = contact.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO contacts (name, email, message, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    contact.name,
                    contact.email,
                    contact.message,
                    contact.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a contact record by id.
pub async fn get_contact(db: &Database, id: i64) -> Result<Option<ContactRecord>, PostboxError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, message, created_at
                 FROM contacts WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(ContactRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    message: row.get(3)?,
                    created_at: row.get(4)?,
                })
            });
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count stored contact records.
pub async fn contact_count(db: &Database) -> Result<i64, PostboxError> {
    db.connection()
        .call(|conn| {
            let n = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
            Ok(n)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
