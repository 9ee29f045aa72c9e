//! SQL schema for the intake SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- All three tables are append-only.
-- No UPDATE or DELETE is ever issued against them.
CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    fullname    TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL DEFAULT '',
    subject     TEXT NOT NULL
                CHECK (subject IN ('registration support', 'volunteer', 'general inquiry')),
    message     TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL   -- RFC 3339 UTC, fixed width
);

CREATE TABLE IF NOT EXISTS registrations (
    id                        INTEGER PRIMARY KEY AUTOINCREMENT,
    fullname                  TEXT NOT NULL,
    dob                       TEXT NOT NULL DEFAULT '',
    gender                    TEXT NOT NULL DEFAULT '',
    email                     TEXT NOT NULL,
    phone                     TEXT NOT NULL DEFAULT '',
    state_of_origin           TEXT NOT NULL DEFAULT '',
    state_of_residence        TEXT NOT NULL DEFAULT '',
    education                 TEXT NOT NULL DEFAULT '',
    previous_office           TEXT NOT NULL DEFAULT '',
    interested_office         TEXT NOT NULL DEFAULT '',
    previous_contest          TEXT NOT NULL DEFAULT '',
    card_carrying_member      INTEGER NOT NULL DEFAULT 0,
    party_membership_doc_link TEXT NOT NULL DEFAULT '',
    cv_link                   TEXT NOT NULL DEFAULT '',
    motivation                TEXT NOT NULL DEFAULT '',
    political_understanding   TEXT
                              CHECK (political_understanding IN ('beginner', 'intermediate', 'advance', 'expert')),
    assistance_needed         TEXT NOT NULL DEFAULT '[]',   -- JSON array
    other_support             TEXT NOT NULL DEFAULT '',
    availability              TEXT NOT NULL DEFAULT '[]',   -- JSON array
    preferred_communication   TEXT NOT NULL DEFAULT '',
    consent                   INTEGER NOT NULL DEFAULT 0,
    created_at                TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS volunteers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT,
    location    TEXT,
    skills      TEXT NOT NULL DEFAULT '[]',   -- JSON array
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_created_idx      ON contacts(created_at);
CREATE INDEX IF NOT EXISTS registrations_created_idx ON registrations(created_at);
CREATE INDEX IF NOT EXISTS volunteers_created_idx    ON volunteers(created_at);

PRAGMA user_version = 1;
";
