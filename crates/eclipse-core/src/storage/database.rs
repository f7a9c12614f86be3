//! SQLite-backed profile, session and presence storage.
//!
//! Provides persistent storage for:
//! - The local user's progression (XP, level, rank, story position)
//! - The daily brain burner counter
//! - Completed focus sessions for analytics
//! - Focus presence of connected users
//! - Key-value store for application state

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result};
use crate::progression::{ProgressionSnapshot, XpAward};
use crate::scheduler::SchedulingContext;
use crate::stats::{validate_depth_score, FocusSession};
use crate::story::{self, Alignment, Chapter};
use crate::task::TaskType;

/// The single local profile row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: Option<String>,
    pub xp: u64,
    pub level: u32,
    pub rank: String,
    pub brain_burners_today: i32,
    /// Day the brain burner counter belongs to
    pub brain_burner_day: Option<NaiveDate>,
    pub chapter: u32,
    pub alignment: String,
    pub last_active_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Brain burners completed on `day`. A counter left over from an
    /// earlier day reads as zero.
    pub fn brain_burners_completed_on(&self, day: NaiveDate) -> i32 {
        if self.brain_burner_day == Some(day) {
            self.brain_burners_today
        } else {
            0
        }
    }

    pub fn scheduling_context(&self, current_hour: i32, today: NaiveDate) -> SchedulingContext {
        SchedulingContext::new(
            current_hour,
            self.brain_burners_completed_on(today),
            self.last_active_at,
            self.level,
        )
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot::from_xp(self.xp)
    }
}

/// Result of completing a task: the XP award plus the updated daily
/// brain burner count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    pub award: XpAward,
    pub brain_burners_today: i32,
}

fn parse_time(column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupt(column, value))
}

fn corrupt(column: &str, value: &str) -> crate::error::CoreError {
    DatabaseError::CorruptValue {
        column: column.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// Raw column values, decoded outside the rusqlite row closure so decoding
/// failures surface as [`DatabaseError::CorruptValue`].
struct ProfileRow {
    display_name: Option<String>,
    xp: i64,
    level: i64,
    rank: String,
    brain_burners_today: i64,
    brain_burner_day: Option<String>,
    chapter: i64,
    alignment: String,
    last_active_at: String,
    created_at: String,
}

impl ProfileRow {
    fn decode(self) -> Result<Profile> {
        let brain_burner_day = match self.brain_burner_day {
            Some(day) => Some(
                NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                    .map_err(|_| corrupt("brain_burner_day", &day))?,
            ),
            None => None,
        };
        Ok(Profile {
            display_name: self.display_name,
            xp: u64::try_from(self.xp).map_err(|_| corrupt("xp", &self.xp.to_string()))?,
            level: u32::try_from(self.level)
                .map_err(|_| corrupt("level", &self.level.to_string()))?,
            rank: self.rank,
            brain_burners_today: i32::try_from(self.brain_burners_today)
                .map_err(|_| corrupt("brain_burners_today", &self.brain_burners_today.to_string()))?,
            brain_burner_day,
            chapter: u32::try_from(self.chapter)
                .map_err(|_| corrupt("chapter", &self.chapter.to_string()))?,
            alignment: self.alignment,
            last_active_at: parse_time("last_active_at", &self.last_active_at)?,
            created_at: parse_time("created_at", &self.created_at)?,
        })
    }
}

fn day_key(now: DateTime<Utc>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}

/// SQLite database for the local profile and session log.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/eclipse.db`.
    ///
    /// Creates the database file, schema and profile row if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("eclipse.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let db = Self { conn };
        db.migrate()?;
        db.ensure_profile(Utc::now())?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    fn ensure_profile(&self, now: DateTime<Utc>) -> Result<()> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO profile (id, last_active_at, created_at) VALUES (1, ?1, ?1)",
            params![now.to_rfc3339()],
        )?;
        if inserted > 0 {
            tracing::info!("created local profile");
        }
        Ok(())
    }

    /// Load the local profile.
    pub fn profile(&self) -> Result<Profile> {
        let row = self.conn.query_row(
            "SELECT display_name, xp, level, rank, brain_burners_today, brain_burner_day,
                    chapter, alignment, last_active_at, created_at
             FROM profile WHERE id = 1",
            [],
            |row| {
                Ok(ProfileRow {
                    display_name: row.get(0)?,
                    xp: row.get(1)?,
                    level: row.get(2)?,
                    rank: row.get(3)?,
                    brain_burners_today: row.get(4)?,
                    brain_burner_day: row.get(5)?,
                    chapter: row.get(6)?,
                    alignment: row.get(7)?,
                    last_active_at: row.get(8)?,
                    created_at: row.get(9)?,
                })
            },
        )?;
        row.decode()
    }

    pub fn set_display_name(&self, name: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE profile SET display_name = ?1 WHERE id = 1",
            params![name],
        )?;
        Ok(())
    }

    /// Add the XP for a finished task of `task_type` and refresh level,
    /// rank and last activity.
    pub fn award_xp(&self, task_type: TaskType, now: DateTime<Utc>) -> Result<XpAward> {
        let tx = self.conn.unchecked_transaction()?;
        let award = Self::award_xp_in(&tx, task_type, now)?;
        tx.commit()?;
        Ok(award)
    }

    fn award_xp_in(conn: &Connection, task_type: TaskType, now: DateTime<Utc>) -> Result<XpAward> {
        let current: i64 = conn.query_row("SELECT xp FROM profile WHERE id = 1", [], |row| {
            row.get(0)
        })?;
        let current = u64::try_from(current).map_err(|_| corrupt("xp", &current.to_string()))?;
        let award = XpAward::for_task(current, task_type);
        let snapshot = &award.snapshot;
        let total = i64::try_from(snapshot.total_xp).unwrap_or(i64::MAX);

        conn.execute(
            "UPDATE profile SET xp = ?1, level = ?2, rank = ?3, last_active_at = ?4 WHERE id = 1",
            params![total, snapshot.level, snapshot.rank.name, now.to_rfc3339()],
        )?;

        tracing::info!(
            task_type = %task_type,
            xp_gained = award.xp_gained,
            total_xp = snapshot.total_xp,
            level = snapshot.level,
            "awarded xp"
        );
        if award.ranked_up {
            tracing::info!(rank = snapshot.rank.name, "rank up");
        }
        Ok(award)
    }

    /// Count one more brain burner for today and return the new count.
    /// Counts as activity.
    ///
    /// The counter starts over when the stored day is not today.
    pub fn increment_brain_burner_count(&self, now: DateTime<Utc>) -> Result<i32> {
        let tx = self.conn.unchecked_transaction()?;
        let count = Self::increment_brain_burner_in(&tx, now)?;
        tx.commit()?;
        Ok(count)
    }

    fn increment_brain_burner_in(conn: &Connection, now: DateTime<Utc>) -> Result<i32> {
        let today = day_key(now);
        conn.execute(
            "UPDATE profile SET
                brain_burners_today = CASE WHEN brain_burner_day = ?1
                                           THEN brain_burners_today + 1 ELSE 1 END,
                brain_burner_day = ?1,
                last_active_at = ?2
             WHERE id = 1",
            params![today, now.to_rfc3339()],
        )?;
        let count: i64 = conn.query_row(
            "SELECT brain_burners_today FROM profile WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        tracing::debug!(count, "brain burner counted");
        i32::try_from(count).map_err(|_| corrupt("brain_burners_today", &count.to_string()))
    }

    /// Award XP and, for brain burners, bump the daily counter in one
    /// transaction.
    pub fn complete_task(&self, task_type: TaskType, now: DateTime<Utc>) -> Result<Completion> {
        let tx = self.conn.unchecked_transaction()?;
        let award = Self::award_xp_in(&tx, task_type, now)?;
        let brain_burners_today = match task_type {
            TaskType::BrainBurner => Self::increment_brain_burner_in(&tx, now)?,
            TaskType::Autopilot => {
                let (count, day): (i64, Option<String>) = tx.query_row(
                    "SELECT brain_burners_today, brain_burner_day FROM profile WHERE id = 1",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;
                if day.as_deref() == Some(day_key(now).as_str()) {
                    i32::try_from(count).unwrap_or(i32::MAX)
                } else {
                    0
                }
            }
        };
        tx.commit()?;
        Ok(Completion {
            award,
            brain_burners_today,
        })
    }

    /// Move the story to chapter `id`, recording `alignment` when given.
    /// Counts as activity.
    ///
    /// # Errors
    /// Returns a validation error if the chapter does not exist, is locked
    /// at the profile's level, or does not offer the alignment.
    pub fn advance_chapter(
        &self,
        id: u32,
        alignment: Option<Alignment>,
        now: DateTime<Utc>,
    ) -> Result<&'static Chapter> {
        let profile = self.profile()?;
        let chapter = story::validate_advance(id, profile.level, alignment)?;
        self.conn.execute(
            "UPDATE profile SET chapter = ?1, alignment = COALESCE(?2, alignment),
                                last_active_at = ?3
             WHERE id = 1",
            params![id, alignment.map(|a| a.as_str()), now.to_rfc3339()],
        )?;
        tracing::info!(chapter = id, alignment = ?alignment, "advanced story");
        Ok(chapter)
    }

    pub fn touch_active(&self, now: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "UPDATE profile SET last_active_at = ?1 WHERE id = 1",
            params![now.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Record a completed focus session.
    ///
    /// # Errors
    /// Returns an error if the depth score is above 100 or the insert fails.
    pub fn record_focus_session(&self, session: &FocusSession) -> Result<i64> {
        validate_depth_score(session.depth_score)?;
        self.conn.execute(
            "INSERT INTO focus_sessions (started_at, duration_min, task_type, depth_score)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.date.to_rfc3339(),
                session.duration_minutes,
                session.task_type.as_str(),
                session.depth_score,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, minutes = session.duration_minutes, "recorded focus session");
        Ok(id)
    }

    /// Sessions started at or after `since`, oldest first.
    pub fn focus_sessions_since(&self, since: DateTime<Utc>) -> Result<Vec<FocusSession>> {
        let mut stmt = self.conn.prepare(
            "SELECT started_at, duration_min, task_type, depth_score
             FROM focus_sessions
             WHERE started_at >= ?1
             ORDER BY started_at ASC",
        )?;
        let rows = stmt
            .query_map(params![since.to_rfc3339()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(started_at, duration_minutes, task_type, depth_score)| {
                Ok(FocusSession {
                    date: parse_time("started_at", &started_at)?,
                    duration_minutes,
                    task_type: task_type
                        .parse()
                        .map_err(|_| corrupt("task_type", &task_type))?,
                    depth_score,
                })
            })
            .collect()
    }

    /// Mark `uid` as currently focusing.
    pub fn set_presence(&self, uid: &str, now: DateTime<Utc>) -> Result<()> {
        self.write_presence(uid, true, now)
    }

    /// Mark `uid` as no longer focusing.
    pub fn clear_presence(&self, uid: &str, now: DateTime<Utc>) -> Result<()> {
        self.write_presence(uid, false, now)
    }

    fn write_presence(&self, uid: &str, focusing: bool, now: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO presence (uid, is_focusing, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(uid) DO UPDATE SET is_focusing = excluded.is_focusing,
                                            updated_at = excluded.updated_at",
            params![uid, focusing, now.to_rfc3339()],
        )?;
        tracing::debug!(uid, focusing, "presence updated");
        Ok(())
    }

    /// Number of users focusing right now, not counting `exclude`.
    pub fn focusing_count(&self, exclude: Option<&str>) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM presence WHERE is_focusing = 1 AND uid IS NOT ?1",
            params![exclude],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    // === Key-Value Store ===

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
