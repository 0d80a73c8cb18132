use rusqlite::Connection;

use crate::error::StorageError;

pub const SCHEMA_VERSION: i32 = 1;

pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;
    conn.execute_batch(SCHEMA_SQL)?;
    log::debug!("schema initialised at version {SCHEMA_VERSION}");
    Ok(())
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at INTEGER NOT NULL
);
INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (1, unixepoch());

CREATE TABLE IF NOT EXISTS exercises (
    exercise_id BLOB PRIMARY KEY CHECK (length(exercise_id) = 16),
    name TEXT NOT NULL,
    muscle_group TEXT NOT NULL,
    equipment TEXT NOT NULL,
    is_curated INTEGER NOT NULL DEFAULT 0,
    created_by BLOB CHECK (created_by IS NULL OR length(created_by) = 16)
);

CREATE TABLE IF NOT EXISTS exercise_favorites (
    user_id BLOB NOT NULL CHECK (length(user_id) = 16),
    exercise_id BLOB NOT NULL REFERENCES exercises (exercise_id),
    PRIMARY KEY (user_id, exercise_id)
);

CREATE TABLE IF NOT EXISTS routines (
    routine_id BLOB PRIMARY KEY CHECK (length(routine_id) = 16),
    user_id BLOB NOT NULL CHECK (length(user_id) = 16),
    name TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_routines_user ON routines (user_id);

CREATE TABLE IF NOT EXISTS routine_days (
    day_id BLOB PRIMARY KEY CHECK (length(day_id) = 16),
    routine_id BLOB NOT NULL REFERENCES routines (routine_id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    muscle_group TEXT NOT NULL,
    exercise_id BLOB NOT NULL REFERENCES exercises (exercise_id),
    planned_sets INTEGER NOT NULL CHECK (planned_sets BETWEEN 1 AND 20),
    sort_order INTEGER NOT NULL,
    UNIQUE (routine_id, sort_order)
);

CREATE TABLE IF NOT EXISTS profiles (
    user_id BLOB PRIMARY KEY CHECK (length(user_id) = 16),
    rep_min INTEGER NOT NULL CHECK (rep_min > 0),
    rep_max INTEGER NOT NULL CHECK (rep_max >= rep_min),
    active_routine_id BLOB REFERENCES routines (routine_id) ON DELETE SET NULL,
    onboarding_completed_at INTEGER
);

CREATE TABLE IF NOT EXISTS sessions (
    session_id BLOB PRIMARY KEY CHECK (length(session_id) = 16),
    user_id BLOB NOT NULL CHECK (length(user_id) = 16),
    exercise_id BLOB NOT NULL REFERENCES exercises (exercise_id),
    status TEXT NOT NULL CHECK (status IN ('in_progress', 'completed')),
    planned_sets INTEGER NOT NULL CHECK (planned_sets BETWEEN 1 AND 20),
    target_rep_min INTEGER NOT NULL,
    target_rep_max INTEGER NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    CHECK ((status = 'completed') = (completed_at IS NOT NULL))
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_active
    ON sessions (user_id) WHERE status = 'in_progress';
CREATE INDEX IF NOT EXISTS idx_sessions_history
    ON sessions (user_id, exercise_id, completed_at) WHERE status = 'completed';

CREATE TABLE IF NOT EXISTS session_sets (
    set_id BLOB PRIMARY KEY CHECK (length(set_id) = 16),
    session_id BLOB NOT NULL REFERENCES sessions (session_id) ON DELETE CASCADE,
    set_number INTEGER NOT NULL CHECK (set_number > 0),
    reps INTEGER NOT NULL CHECK (reps > 0),
    weight REAL CHECK (weight IS NULL OR weight >= 0),
    UNIQUE (session_id, set_number)
);
";
