use std::path::PathBuf;

use rusqlite::Connection;
use uuid::Uuid;

use crate::db;
use crate::record::{StudentFields, StudentRecord};
use crate::store::{RecordStore, StoreError};

/// SQLite-backed store rooted in a workspace directory. Every operation
/// opens its own connection and drops it on return; nothing is shared
/// between calls. All values are bound as parameters, never spliced into
/// statement text.
#[derive(Debug)]
pub struct SqliteStore {
    workspace: PathBuf,
}

impl SqliteStore {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        db::open_db(&self.workspace).map_err(|e| StoreError::Connectivity(e.to_string()))
    }
}

fn persistence(e: rusqlite::Error) -> StoreError {
    StoreError::Persistence(e.to_string())
}

impl RecordStore for SqliteStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, first_name, last_name, city, email, phone, bio,
                        tenth_marks, twelfth_marks, degree_type, years_of_study
                 FROM students
                 ORDER BY rowid",
            )
            .map_err(persistence)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StudentRecord {
                    id: row.get(0)?,
                    fields: StudentFields {
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        city: row.get(3)?,
                        email: row.get(4)?,
                        phone: row.get(5)?,
                        bio: row.get(6)?,
                        tenth_marks: row.get(7)?,
                        twelfth_marks: row.get(8)?,
                        degree_type: row.get(9)?,
                        years_of_study: row.get(10)?,
                    },
                })
            })
            .and_then(|it| it.collect::<Result<Vec<_>, _>>())
            .map_err(persistence)?;

        Ok(rows)
    }

    fn create(&mut self, fields: &StudentFields) -> Result<StudentRecord, StoreError> {
        let conn = self.connect()?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO students(
               id, first_name, last_name, city, email, phone, bio,
               tenth_marks, twelfth_marks, degree_type, years_of_study, updated_at
             ) VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%SZ','now'))",
            (
                &id,
                &fields.first_name,
                &fields.last_name,
                &fields.city,
                &fields.email,
                &fields.phone,
                &fields.bio,
                fields.tenth_marks,
                fields.twelfth_marks,
                &fields.degree_type,
                fields.years_of_study,
            ),
        )
        .map_err(persistence)?;

        Ok(StudentRecord {
            id,
            fields: fields.clone(),
        })
    }

    fn update(&mut self, id: &str, fields: &StudentFields) -> Result<StudentRecord, StoreError> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                "UPDATE students SET
                   first_name = ?, last_name = ?, city = ?, email = ?, phone = ?, bio = ?,
                   tenth_marks = ?, twelfth_marks = ?, degree_type = ?, years_of_study = ?,
                   updated_at = strftime('%Y-%m-%dT%H:%M:%SZ','now')
                 WHERE id = ?",
                (
                    &fields.first_name,
                    &fields.last_name,
                    &fields.city,
                    &fields.email,
                    &fields.phone,
                    &fields.bio,
                    fields.tenth_marks,
                    fields.twelfth_marks,
                    &fields.degree_type,
                    fields.years_of_study,
                    id,
                ),
            )
            .map_err(persistence)?;

        if changed == 0 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(StudentRecord {
            id: id.to_string(),
            fields: fields.clone(),
        })
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn
            .execute("DELETE FROM students WHERE id = ?", [id])
            .map_err(persistence)?;
        if changed == 0 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
