use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE: &str = "roster.sqlite3";

/// Open (creating if needed) the roster database inside a workspace
/// directory. Table creation is idempotent; there is no migration tooling.
pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            city TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            bio TEXT NOT NULL,
            tenth_marks REAL NOT NULL,
            twelfth_marks REAL NOT NULL,
            degree_type TEXT NOT NULL,
            years_of_study INTEGER NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    Ok(conn)
}
