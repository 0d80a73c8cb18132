use std::fmt;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, types::Type};

use liftlog_core::{
    CoreError, Equipment, Exercise, MuscleGroup, PlannedSets, RepRange, Routine, RoutineDay,
    SessionHeader, SessionStatus, SetRecord, TimestampMs, UserProfile, ids::*, prefill::SeedRow,
};

use crate::error::StorageError;
use crate::traits::{CreatedSession, RoutineRecord, Storage};

const PROFILE_COLUMNS: &str =
    "user_id, rep_min, rep_max, active_routine_id, onboarding_completed_at";
const ROUTINE_COLUMNS: &str = "routine_id, user_id, name, created_at";
const DAY_COLUMNS: &str =
    "day_id, routine_id, title, muscle_group, exercise_id, planned_sets, sort_order";
const SESSION_COLUMNS: &str = "session_id, user_id, exercise_id, status, planned_sets, \
     target_rep_min, target_rep_max, started_at, completed_at";
const SET_COLUMNS: &str = "set_id, session_id, set_number, reps, weight";

/// Select exercises with the favorite flag of the viewer bound to `?1`.
const EXERCISE_SELECT: &str = "SELECT e.exercise_id, e.name, e.muscle_group, e.equipment, \
     e.is_curated, e.created_by, \
     EXISTS (SELECT 1 FROM exercise_favorites f WHERE f.exercise_id = e.exercise_id AND f.user_id = ?1) \
     FROM exercises e";

#[derive(Debug)]
struct InvalidColumn(String);

impl fmt::Display for InvalidColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidColumn {}

fn to_array(v: Vec<u8>, idx: usize) -> rusqlite::Result<[u8; 16]> {
    v.try_into().map_err(|v: Vec<u8>| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Blob,
            Box::new(InvalidColumn(format!("expected 16-byte id, got {} bytes", v.len()))),
        )
    })
}

fn id_at(row: &Row, idx: usize) -> rusqlite::Result<[u8; 16]> {
    to_array(row.get(idx)?, idx)
}

fn opt_id_at(row: &Row, idx: usize) -> rusqlite::Result<Option<[u8; 16]>> {
    row.get::<_, Option<Vec<u8>>>(idx)?
        .map(|v| to_array(v, idx))
        .transpose()
}

fn parsed<T>(idx: usize, value: Result<T, CoreError>) -> rusqlite::Result<T> {
    value.map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<TimestampMs> {
    Ok(row.get::<_, i64>(idx)? as TimestampMs)
}

/// Give `ordered[i]` position `i + 1` within `routine_id`. Runs inside the
/// caller's transaction.
fn write_positions(
    conn: &Connection,
    routine_id: RoutineId,
    ordered: &[RoutineDayId],
) -> Result<(), StorageError> {
    let routine_bytes = routine_id.as_bytes().as_slice();

    // Park every position below zero so the new ones never collide with old ones.
    conn.execute(
        "UPDATE routine_days SET sort_order = -sort_order - 1 WHERE routine_id = ?1",
        rusqlite::params![routine_bytes],
    )?;

    let mut stmt = conn
        .prepare("UPDATE routine_days SET sort_order = ?1 WHERE day_id = ?2 AND routine_id = ?3")?;
    for (i, day_id) in ordered.iter().enumerate() {
        let changed = stmt.execute(rusqlite::params![
            i as u32 + 1,
            day_id.as_bytes().as_slice(),
            routine_bytes,
        ])?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!(
                "routine day {day_id} in routine {routine_id}"
            )));
        }
    }

    let unplaced: i64 = conn.query_row(
        "SELECT COUNT(*) FROM routine_days WHERE routine_id = ?1 AND sort_order < 1",
        rusqlite::params![routine_bytes],
        |row| row.get(0),
    )?;
    if unplaced > 0 {
        return Err(StorageError::ConstraintViolation(format!(
            "ordering of routine {routine_id} leaves {unplaced} day(s) without a position"
        )));
    }
    Ok(())
}

fn read_profile(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        user_id: UserId::from_bytes(id_at(row, 0)?),
        rep_range: RepRange {
            min: row.get(1)?,
            max: row.get(2)?,
        },
        active_routine_id: opt_id_at(row, 3)?.map(RoutineId::from_bytes),
        onboarding_completed_at: row.get::<_, Option<i64>>(4)?.map(|v| v as TimestampMs),
    })
}

fn read_exercise(row: &Row) -> rusqlite::Result<Exercise> {
    Ok(Exercise {
        id: ExerciseId::from_bytes(id_at(row, 0)?),
        name: row.get(1)?,
        muscle_group: parsed(2, MuscleGroup::parse(&row.get::<_, String>(2)?))?,
        equipment: parsed(3, Equipment::parse(&row.get::<_, String>(3)?))?,
        is_curated: row.get(4)?,
        created_by: opt_id_at(row, 5)?.map(UserId::from_bytes),
        is_favorite: row.get(6)?,
    })
}

fn read_routine(row: &Row) -> rusqlite::Result<RoutineRecord> {
    Ok(RoutineRecord {
        routine_id: RoutineId::from_bytes(id_at(row, 0)?),
        user_id: UserId::from_bytes(id_at(row, 1)?),
        name: row.get(2)?,
        created_at: timestamp_at(row, 3)?,
    })
}

fn read_day(row: &Row) -> rusqlite::Result<RoutineDay> {
    Ok(RoutineDay {
        id: RoutineDayId::from_bytes(id_at(row, 0)?),
        routine_id: RoutineId::from_bytes(id_at(row, 1)?),
        title: row.get(2)?,
        muscle_group: parsed(3, MuscleGroup::parse(&row.get::<_, String>(3)?))?,
        exercise_id: ExerciseId::from_bytes(id_at(row, 4)?),
        planned_sets: parsed(5, PlannedSets::new(row.get(5)?))?,
        sort_order: row.get(6)?,
    })
}

fn read_session(row: &Row) -> rusqlite::Result<SessionHeader> {
    Ok(SessionHeader {
        id: SessionId::from_bytes(id_at(row, 0)?),
        user_id: UserId::from_bytes(id_at(row, 1)?),
        exercise_id: ExerciseId::from_bytes(id_at(row, 2)?),
        status: parsed(3, SessionStatus::parse(&row.get::<_, String>(3)?))?,
        planned_sets: parsed(4, PlannedSets::new(row.get(4)?))?,
        target_reps: RepRange {
            min: row.get(5)?,
            max: row.get(6)?,
        },
        started_at: timestamp_at(row, 7)?,
        completed_at: row.get::<_, Option<i64>>(8)?.map(|v| v as TimestampMs),
    })
}

fn read_set(row: &Row) -> rusqlite::Result<SetRecord> {
    Ok(SetRecord {
        id: SetId::from_bytes(id_at(row, 0)?),
        session_id: SessionId::from_bytes(id_at(row, 1)?),
        set_number: row.get(2)?,
        reps: row.get(3)?,
        weight: row.get(4)?,
    })
}

fn insert_seeds(
    conn: &Connection,
    session_id: SessionId,
    seeds: &[SeedRow],
) -> Result<Vec<SetRecord>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "INSERT INTO session_sets ({SET_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"
    ))?;
    let mut written = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let record = SetRecord {
            id: SetId::new(),
            session_id,
            set_number: seed.set_number,
            reps: seed.reps,
            weight: seed.weight,
        };
        stmt.execute(rusqlite::params![
            record.id.as_bytes().as_slice(),
            session_id.as_bytes().as_slice(),
            record.set_number,
            record.reps,
            record.weight,
        ])?;
        written.push(record);
    }
    Ok(written)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Storage for SqliteStorage {
    fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let profile = self
            .conn
            .query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?1"),
                rusqlite::params![user_id.as_bytes().as_slice()],
                read_profile,
            )
            .optional()?;
        Ok(profile)
    }

    fn upsert_profile(&mut self, profile: &UserProfile) -> Result<(), StorageError> {
        self.conn.execute(
            &format!(
                "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET rep_min = excluded.rep_min, rep_max = excluded.rep_max,
                 active_routine_id = excluded.active_routine_id,
                 onboarding_completed_at = excluded.onboarding_completed_at"
            ),
            rusqlite::params![
                profile.user_id.as_bytes().as_slice(),
                profile.rep_range.min,
                profile.rep_range.max,
                profile.active_routine_id.as_ref().map(|id| id.as_bytes().as_slice()),
                profile.onboarding_completed_at.map(|v| v as i64),
            ],
        )?;
        Ok(())
    }

    fn insert_exercise(&mut self, exercise: &Exercise) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO exercises (exercise_id, name, muscle_group, equipment, is_curated, created_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                exercise.id.as_bytes().as_slice(),
                exercise.name,
                exercise.muscle_group.as_str(),
                exercise.equipment.as_str(),
                exercise.is_curated,
                exercise.created_by.as_ref().map(|id| id.as_bytes().as_slice()),
            ],
        )?;
        Ok(())
    }

    fn update_exercise(&mut self, exercise: &Exercise) -> Result<(), StorageError> {
        let changed = self.conn.execute(
            "UPDATE exercises SET name = ?1, muscle_group = ?2, equipment = ?3 WHERE exercise_id = ?4",
            rusqlite::params![
                exercise.name,
                exercise.muscle_group.as_str(),
                exercise.equipment.as_str(),
                exercise.id.as_bytes().as_slice(),
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("exercise {}", exercise.id)));
        }
        Ok(())
    }

    fn get_exercise(
        &self,
        exercise_id: ExerciseId,
        viewer: UserId,
    ) -> Result<Option<Exercise>, StorageError> {
        let exercise = self
            .conn
            .query_row(
                &format!("{EXERCISE_SELECT} WHERE e.exercise_id = ?2"),
                rusqlite::params![
                    viewer.as_bytes().as_slice(),
                    exercise_id.as_bytes().as_slice()
                ],
                read_exercise,
            )
            .optional()?;
        Ok(exercise)
    }

    fn list_exercises(&self, viewer: UserId) -> Result<Vec<Exercise>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "{EXERCISE_SELECT} WHERE e.is_curated = 1 OR e.created_by = ?1 ORDER BY e.name, e.exercise_id"
        ))?;
        let exercises = stmt
            .query_map(rusqlite::params![viewer.as_bytes().as_slice()], read_exercise)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    fn set_favorite(
        &mut self,
        user_id: UserId,
        exercise_id: ExerciseId,
        favorite: bool,
    ) -> Result<(), StorageError> {
        let params = rusqlite::params![
            user_id.as_bytes().as_slice(),
            exercise_id.as_bytes().as_slice()
        ];
        if favorite {
            self.conn.execute(
                "INSERT OR IGNORE INTO exercise_favorites (user_id, exercise_id) VALUES (?1, ?2)",
                params,
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM exercise_favorites WHERE user_id = ?1 AND exercise_id = ?2",
                params,
            )?;
        }
        Ok(())
    }

    fn insert_routine(&mut self, record: &RoutineRecord) -> Result<(), StorageError> {
        self.conn.execute(
            &format!("INSERT INTO routines ({ROUTINE_COLUMNS}) VALUES (?1, ?2, ?3, ?4)"),
            rusqlite::params![
                record.routine_id.as_bytes().as_slice(),
                record.user_id.as_bytes().as_slice(),
                record.name,
                record.created_at as i64,
            ],
        )?;
        Ok(())
    }

    fn get_routine_record(
        &self,
        routine_id: RoutineId,
    ) -> Result<Option<RoutineRecord>, StorageError> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {ROUTINE_COLUMNS} FROM routines WHERE routine_id = ?1"),
                rusqlite::params![routine_id.as_bytes().as_slice()],
                read_routine,
            )
            .optional()?;
        Ok(record)
    }

    fn list_routines(&self, user_id: UserId) -> Result<Vec<Routine>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ROUTINE_COLUMNS} FROM routines WHERE user_id = ?1 ORDER BY created_at, rowid"
        ))?;
        let records = stmt
            .query_map(rusqlite::params![user_id.as_bytes().as_slice()], read_routine)?
            .collect::<Result<Vec<_>, _>>()?;

        records
            .into_iter()
            .map(|record| {
                Ok(Routine {
                    days: self.list_routine_days(record.routine_id)?,
                    id: record.routine_id,
                    user_id: record.user_id,
                    name: record.name,
                })
            })
            .collect()
    }

    fn rename_routine(&mut self, routine_id: RoutineId, name: &str) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "UPDATE routines SET name = ?1 WHERE routine_id = ?2",
            rusqlite::params![name, routine_id.as_bytes().as_slice()],
        )?;
        Ok(changed > 0)
    }

    fn delete_routine(&mut self, routine_id: RoutineId) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "DELETE FROM routines WHERE routine_id = ?1",
            rusqlite::params![routine_id.as_bytes().as_slice()],
        )?;
        Ok(changed > 0)
    }

    fn insert_routine_day(&mut self, day: &RoutineDay) -> Result<(), StorageError> {
        let result = self.conn.execute(
            &format!("INSERT INTO routine_days ({DAY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            rusqlite::params![
                day.id.as_bytes().as_slice(),
                day.routine_id.as_bytes().as_slice(),
                day.title,
                day.muscle_group.as_str(),
                day.exercise_id.as_bytes().as_slice(),
                day.planned_sets.get(),
                day.sort_order,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::ConstraintViolation(format!(
                "position {} already taken in routine {}",
                day.sort_order, day.routine_id
            ))),
            Err(e) => Err(StorageError::Sqlite(e)),
        }
    }

    fn get_routine_day(&self, day_id: RoutineDayId) -> Result<Option<RoutineDay>, StorageError> {
        let day = self
            .conn
            .query_row(
                &format!("SELECT {DAY_COLUMNS} FROM routine_days WHERE day_id = ?1"),
                rusqlite::params![day_id.as_bytes().as_slice()],
                read_day,
            )
            .optional()?;
        Ok(day)
    }

    fn list_routine_days(&self, routine_id: RoutineId) -> Result<Vec<RoutineDay>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DAY_COLUMNS} FROM routine_days WHERE routine_id = ?1 ORDER BY sort_order, day_id"
        ))?;
        let days = stmt
            .query_map(rusqlite::params![routine_id.as_bytes().as_slice()], read_day)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(days)
    }

    fn update_planned_sets(
        &mut self,
        day_id: RoutineDayId,
        planned_sets: PlannedSets,
    ) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "UPDATE routine_days SET planned_sets = ?1 WHERE day_id = ?2",
            rusqlite::params![planned_sets.get(), day_id.as_bytes().as_slice()],
        )?;
        Ok(changed > 0)
    }

    fn delete_routine_day(&mut self, day_id: RoutineDayId) -> Result<bool, StorageError> {
        let tx = self.conn.transaction()?;
        let routine_id = tx
            .query_row(
                "SELECT routine_id FROM routine_days WHERE day_id = ?1",
                rusqlite::params![day_id.as_bytes().as_slice()],
                |row| id_at(row, 0),
            )
            .optional()?
            .map(RoutineId::from_bytes);
        let Some(routine_id) = routine_id else {
            return Ok(false);
        };

        tx.execute(
            "DELETE FROM routine_days WHERE day_id = ?1",
            rusqlite::params![day_id.as_bytes().as_slice()],
        )?;
        let remaining = {
            let mut stmt = tx.prepare(
                "SELECT day_id FROM routine_days WHERE routine_id = ?1 ORDER BY sort_order, day_id",
            )?;
            stmt.query_map(rusqlite::params![routine_id.as_bytes().as_slice()], |row| {
                id_at(row, 0).map(RoutineDayId::from_bytes)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        write_positions(&tx, routine_id, &remaining)?;

        tx.commit()?;
        Ok(true)
    }

    fn renumber_routine_days(
        &mut self,
        routine_id: RoutineId,
        ordered: &[RoutineDayId],
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        write_positions(&tx, routine_id, ordered)?;
        tx.commit()?;
        Ok(())
    }

    fn create_session(
        &mut self,
        header: &SessionHeader,
        seeds: &[SeedRow],
    ) -> Result<CreatedSession, StorageError> {
        // Take the write lock up front so racing creates queue on busy_timeout.
        let mut tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let inserted = tx.execute(
            &format!(
                "INSERT INTO sessions ({SESSION_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            rusqlite::params![
                header.id.as_bytes().as_slice(),
                header.user_id.as_bytes().as_slice(),
                header.exercise_id.as_bytes().as_slice(),
                header.status.as_str(),
                header.planned_sets.get(),
                header.target_reps.min,
                header.target_reps.max,
                header.started_at as i64,
                header.completed_at.map(|v| v as i64),
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StorageError::ActiveSessionExists {
                    user_id: header.user_id.to_string(),
                });
            }
            Err(e) => return Err(StorageError::Sqlite(e)),
        }

        let (seeded, seed_failure) = {
            let mut sp = tx.savepoint()?;
            match insert_seeds(&sp, header.id, seeds) {
                Ok(rows) => {
                    sp.commit()?;
                    (rows, None)
                }
                Err(e) => {
                    sp.rollback()?;
                    (Vec::new(), Some(e))
                }
            }
        };

        tx.commit()?;
        Ok(CreatedSession {
            header: header.clone(),
            seeded,
            seed_failure,
        })
    }

    fn get_session(&self, session_id: SessionId) -> Result<Option<SessionHeader>, StorageError> {
        let session = self
            .conn
            .query_row(
                &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE session_id = ?1"),
                rusqlite::params![session_id.as_bytes().as_slice()],
                read_session,
            )
            .optional()?;
        Ok(session)
    }

    fn get_active_session(&self, user_id: UserId) -> Result<Option<SessionHeader>, StorageError> {
        let session = self
            .conn
            .query_row(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ?1 AND status = 'in_progress'"
                ),
                rusqlite::params![user_id.as_bytes().as_slice()],
                read_session,
            )
            .optional()?;
        Ok(session)
    }

    fn latest_completed_session(
        &self,
        user_id: UserId,
        exercise_id: ExerciseId,
    ) -> Result<Option<SessionHeader>, StorageError> {
        let session = self
            .conn
            .query_row(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions
                     WHERE user_id = ?1 AND exercise_id = ?2 AND status = 'completed'
                     ORDER BY completed_at DESC, session_id DESC LIMIT 1"
                ),
                rusqlite::params![
                    user_id.as_bytes().as_slice(),
                    exercise_id.as_bytes().as_slice()
                ],
                read_session,
            )
            .optional()?;
        Ok(session)
    }

    fn list_completed_sessions(&self, user_id: UserId) -> Result<Vec<SessionHeader>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ?1 AND status = 'completed'
             ORDER BY completed_at DESC, session_id DESC"
        ))?;
        let sessions = stmt
            .query_map(rusqlite::params![user_id.as_bytes().as_slice()], read_session)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    fn complete_session(
        &mut self,
        session_id: SessionId,
        completed_at: TimestampMs,
    ) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "UPDATE sessions SET status = 'completed', completed_at = ?1
             WHERE session_id = ?2 AND status = 'in_progress'",
            rusqlite::params![completed_at as i64, session_id.as_bytes().as_slice()],
        )?;
        Ok(changed > 0)
    }

    fn delete_session(&mut self, session_id: SessionId) -> Result<bool, StorageError> {
        let tx = self.conn.transaction()?;
        let id = session_id.as_bytes().as_slice();
        tx.execute("DELETE FROM session_sets WHERE session_id = ?1", rusqlite::params![id])?;
        let changed = tx.execute("DELETE FROM sessions WHERE session_id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(changed > 0)
    }

    fn list_sets(&self, session_id: SessionId) -> Result<Vec<SetRecord>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SET_COLUMNS} FROM session_sets WHERE session_id = ?1 ORDER BY set_number"
        ))?;
        let sets = stmt
            .query_map(rusqlite::params![session_id.as_bytes().as_slice()], read_set)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sets)
    }

    fn upsert_set(
        &mut self,
        session_id: SessionId,
        set_number: u32,
        reps: u32,
        weight: Option<f64>,
    ) -> Result<SetRecord, StorageError> {
        let record = self.conn.query_row(
            &format!(
                "INSERT INTO session_sets ({SET_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(session_id, set_number) DO UPDATE SET reps = excluded.reps, weight = excluded.weight
                 RETURNING {SET_COLUMNS}"
            ),
            rusqlite::params![
                SetId::new().as_bytes().as_slice(),
                session_id.as_bytes().as_slice(),
                set_number,
                reps,
                weight,
            ],
            read_set,
        )?;
        Ok(record)
    }

    fn delete_set(&mut self, session_id: SessionId, set_number: u32) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "DELETE FROM session_sets WHERE session_id = ?1 AND set_number = ?2",
            rusqlite::params![session_id.as_bytes().as_slice(), set_number],
        )?;
        Ok(changed > 0)
    }
}
