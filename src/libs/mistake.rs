use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::error::{PlannerError, Result};
use super::task::Priority;

/// A logged mistake: what went wrong on which chapter, and how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mistake {
    pub id: String,
    pub subject_id: String,
    pub chapter_id: String,
    pub content: String,
    pub solution: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Local>,
    pub is_resolved: bool,
    pub revision_count: u32,
    pub last_revised: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMistake {
    pub subject_id: String,
    pub chapter_id: String,
    pub content: String,
    pub solution: Option<String>,
    pub priority: Priority,
}

impl NewMistake {
    pub fn new(subject_id: &str, chapter_id: &str, content: &str) -> Self {
        NewMistake {
            subject_id: subject_id.to_string(),
            chapter_id: chapter_id.to_string(),
            content: content.to_string(),
            solution: None,
            priority: Priority::Medium,
        }
    }

    pub fn with_solution(mut self, solution: Option<String>) -> Self {
        self.solution = solution.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Rejects blank content.
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(PlannerError::validation("mistake content must not be empty"));
        }
        Ok(())
    }
}

/// Fields that `mistake edit` may change. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MistakeUpdate {
    pub content: Option<String>,
    pub solution: Option<String>,
    pub priority: Option<Priority>,
}

impl MistakeUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.solution.is_none() && self.priority.is_none()
    }

    pub fn apply(&self, mistake: &mut Mistake) -> Result<()> {
        if let Some(content) = &self.content {
            if content.trim().is_empty() {
                return Err(PlannerError::validation("mistake content must not be empty"));
            }
            mistake.content = content.clone();
        }
        if let Some(solution) = &self.solution {
            mistake.solution = Some(solution.clone()).filter(|s| !s.trim().is_empty());
        }
        if let Some(priority) = self.priority {
            mistake.priority = priority;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mistake {
        Mistake {
            id: "m1".into(),
            subject_id: "physics".into(),
            chapter_id: "p4".into(),
            content: "Sign error in friction".into(),
            solution: None,
            priority: Priority::Medium,
            created_at: Local::now(),
            is_resolved: false,
            revision_count: 0,
            last_revised: None,
        }
    }

    #[test]
    fn test_blank_content_rejected() {
        assert!(NewMistake::new("physics", "p4", "   ").validate().is_err());
        assert!(NewMistake::new("physics", "p4", "units").validate().is_ok());
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let mut mistake = sample();
        let update = MistakeUpdate {
            solution: Some("Draw the free body diagram first".into()),
            priority: Some(Priority::High),
            ..Default::default()
        };
        update.apply(&mut mistake).unwrap();

        assert_eq!(mistake.content, "Sign error in friction");
        assert_eq!(mistake.solution.as_deref(), Some("Draw the free body diagram first"));
        assert_eq!(mistake.priority, Priority::High);
    }

    #[test]
    fn test_update_clears_blank_solution() {
        let mut mistake = sample();
        mistake.solution = Some("old".into());
        MistakeUpdate {
            solution: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut mistake)
        .unwrap();
        assert_eq!(mistake.solution, None);
    }
}
