use directories::ProjectDirs;
use rusqlite::{params, Connection};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::models::RoomCreated;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no data directory available")]
    NoDataDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Clone)]
pub struct RoomEntry {
    pub id: String,
    pub name: String,
}

fn db_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "example", "ParallelGtk")?;
    Some(proj.data_dir().join("cache.sqlite"))
}

fn open_conn() -> Result<Connection, StorageError> {
    let path = db_path().ok_or(StorageError::NoDataDir)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(Connection::open(path)?)
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS rooms (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        "#,
    )
}

fn upsert_room(conn: &Connection, id: &str, name: &str, created_at: i64) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO rooms (id, name, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            name=excluded.name,
            created_at=excluded.created_at
        "#,
        params![id, name, created_at],
    )?;
    Ok(())
}

fn rooms_from(conn: &Connection, limit: usize) -> rusqlite::Result<Vec<RoomEntry>> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM rooms ORDER BY created_at DESC, name ASC LIMIT ?1")?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(RoomEntry {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect()
}

// Remembering created rooms locally so the sidebar can show where previous
// sessions went, even though the backend keeps the rooms themselves.
pub fn init() -> Result<(), StorageError> {
    let conn = open_conn()?;
    init_schema(&conn)?;
    Ok(())
}

pub fn remember_room(created: &RoomCreated) -> Result<(), StorageError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default();
    let conn = open_conn()?;
    let name = if created.room_name.is_empty() {
        "Room"
    } else {
        &created.room_name
    };
    upsert_room(&conn, &created.room_id, name, now)?;
    Ok(())
}

pub fn recent_rooms(limit: usize) -> Result<Vec<RoomEntry>, StorageError> {
    let conn = open_conn()?;
    Ok(rooms_from(&conn, limit)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn newest_rooms_come_first() {
        let conn = test_conn();
        upsert_room(&conn, "r1", "Old Room", 10).unwrap();
        upsert_room(&conn, "r2", "New Room", 20).unwrap();

        let rooms = rooms_from(&conn, 10).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id, "r2");
        assert_eq!(rooms[1].id, "r1");
    }

    #[test]
    fn reinserting_a_room_keeps_one_row() {
        let conn = test_conn();
        upsert_room(&conn, "r1", "Dev Room", 10).unwrap();
        upsert_room(&conn, "r1", "Dev Room (renamed)", 30).unwrap();

        let rooms = rooms_from(&conn, 10).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Dev Room (renamed)");
    }

    #[test]
    fn limit_is_respected() {
        let conn = test_conn();
        for i in 0..5 {
            upsert_room(&conn, &format!("r{i}"), "Room", i).unwrap();
        }
        assert_eq!(rooms_from(&conn, 3).unwrap().len(), 3);
    }
}
