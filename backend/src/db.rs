//! SQLite access. One connection is opened per request by the handler and
//! passed into the service functions, so each call runs against its own
//! unit of work and nothing holds a connection across requests.

use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS institutions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    city        TEXT,
    state       TEXT,
    website     TEXT
);

CREATE TABLE IF NOT EXISTS scholarships (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    organization TEXT,
    amount_min   REAL,
    amount_max   REAL,
    deadline     TEXT,
    website      TEXT,
    description  TEXT
);

CREATE TABLE IF NOT EXISTS college_applications (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id          INTEGER NOT NULL,
    institution_id   INTEGER NOT NULL REFERENCES institutions(id),
    status           TEXT NOT NULL,
    application_type TEXT,
    deadline         TEXT,
    notes            TEXT,
    application_fee  REAL,
    fee_waived       INTEGER NOT NULL DEFAULT 0,
    saved_at         TEXT NOT NULL,
    started_at       TEXT,
    submitted_at     TEXT,
    decided_at       TEXT,
    updated_at       TEXT NOT NULL,
    UNIQUE (user_id, institution_id)
);

CREATE TABLE IF NOT EXISTS scholarship_applications (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id        INTEGER NOT NULL,
    scholarship_id INTEGER NOT NULL REFERENCES scholarships(id),
    status         TEXT NOT NULL,
    notes          TEXT,
    essay_draft    TEXT,
    award_amount   REAL,
    saved_at       TEXT NOT NULL,
    started_at     TEXT,
    submitted_at   TEXT,
    decision_date  TEXT,
    updated_at     TEXT NOT NULL,
    UNIQUE (user_id, scholarship_id)
);
";

pub fn open(path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(conn)
}

/// Idempotent schema bootstrap. The catalog tables are populated offline;
/// the application tables carry the per-user uniqueness constraints that
/// back the duplicate-save check.
pub fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
