use super::db::parse_column;
use crate::libs::error::{PlannerError, Result};
use crate::libs::score::{SubjectScore, TestKind, TestScore};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use uuid::Uuid;

const INSERT_SCORE: &str = "INSERT INTO test_scores (id, date, kind, scores, remarks) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_SCORES: &str = "SELECT id, date, kind, scores, remarks FROM test_scores ORDER BY date DESC, rowid DESC";
const DELETE_SCORE: &str = "DELETE FROM test_scores WHERE id = ?1";

/// Logged tests. The per-subject breakdown is kept as a JSON column.
pub struct Scores<'a> {
    conn: &'a Connection,
}

impl<'a> Scores<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Scores { conn }
    }

    pub fn insert(&mut self, date: NaiveDate, kind: TestKind, scores: Vec<SubjectScore>, remarks: Option<String>) -> Result<TestScore> {
        if scores.is_empty() {
            return Err(PlannerError::validation("a test needs at least one subject score"));
        }

        let test = TestScore {
            id: Uuid::new_v4().to_string(),
            date,
            kind,
            scores,
            remarks,
        };
        let breakdown = serde_json::to_string(&test.scores).map_err(|e| PlannerError::persistence("save test score", e))?;

        self.conn
            .execute(
                INSERT_SCORE,
                params![test.id, test.date, test.kind.as_str(), breakdown, test.remarks],
            )
            .map_err(|e| PlannerError::persistence("save test score", e))?;
        Ok(test)
    }

    /// All tests, newest first.
    pub fn fetch(&self) -> Result<Vec<TestScore>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_SCORES)
            .map_err(|e| PlannerError::persistence("load test scores", e))?;
        let tests = stmt
            .query_map([], |row| {
                let breakdown: String = row.get(3)?;
                Ok(TestScore {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    kind: parse_column(row, 2)?,
                    scores: serde_json::from_str(&breakdown)
                        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
                    remarks: row.get(4)?,
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| PlannerError::persistence("load test scores", e))?;
        Ok(tests)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute(DELETE_SCORE, params![id])
            .map_err(|e| PlannerError::persistence("delete test score", e))?;
        if changed == 0 {
            return Err(PlannerError::NotFound(format!("test {}", id)));
        }
        Ok(())
    }
}
