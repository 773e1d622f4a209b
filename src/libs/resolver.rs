//! Turns a user-supplied task reference into exactly one task.
//!
//! A reference is either a numeric id or free text. Ids win; text goes
//! through [`match_score`], a fixed word-overlap heuristic with no stemming
//! or edit distance.

use super::error::{TaskError, TaskResult, MAX_SUGGESTIONS};
use super::task::Task;
use crate::db::db::Db;
use crate::db::tasks::Tasks;

const EXACT_SCORE: i64 = 1000;
const SUBSTRING_BASE: i64 = 500;
const SUBSTRING_PER_CHAR: i64 = 10;
const PREFIX_PER_CHAR: i64 = 5;
const CONTAINS_PER_CHAR: i64 = 2;
const MULTI_WORD_BONUS: i64 = 50;

/// Score of `title` against `query`, both compared trimmed and lowercased.
///
/// Zero means no match. Word-level credit is summed over every
/// (query word, title word) pair, so one title word can be credited more
/// than once.
pub fn match_score(title: &str, query: &str) -> i64 {
    let title = title.trim().to_lowercase();
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return 0;
    }
    if title == query {
        return EXACT_SCORE;
    }
    if title.contains(&query) {
        return SUBSTRING_BASE + SUBSTRING_PER_CHAR * query.chars().count() as i64;
    }

    let title_words: Vec<&str> = title.split_whitespace().collect();
    let query_words: Vec<&str> = query.split_whitespace().collect();

    let mut score = 0;
    for query_word in &query_words {
        let len = query_word.chars().count() as i64;
        for title_word in &title_words {
            if title_word.starts_with(query_word) {
                score += PREFIX_PER_CHAR * len;
            } else if title_word.contains(query_word) {
                score += CONTAINS_PER_CHAR * len;
            }
        }
    }

    if query_words.len() > 1 && score > 0 {
        score += MULTI_WORD_BONUS;
    }

    score
}

/// Resolves task references against one store.
///
/// ## Features
///
/// - **Ids first**: a numeric reference matching an active task wins
/// - **Fuzzy fallback**: otherwise the best scoring search result
/// - **Ambiguity**: close matches are reported with up to five suggestions
pub struct Resolver<'a> {
    tasks: Tasks<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { tasks: Tasks::new(db) }
    }

    /// Resolves `identifier` on `board_id`.
    ///
    /// A numeric identifier is looked up by id first, on any board; if no
    /// active task has that id it is searched as text like any other input.
    pub fn resolve(&self, board_id: i64, identifier: &str) -> TaskResult<Task> {
        let numeric = identifier.trim().parse::<i64>().ok();
        if let Some(id) = numeric {
            match self.tasks.get_task(id) {
                Ok(task) => return Ok(task),
                Err(TaskError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        let mut matches = self.tasks.search_tasks(board_id, identifier)?;
        match matches.len() {
            0 => Err(TaskError::not_found(match numeric {
                Some(id) => format!("no task found with ID {} and no tasks found matching '{}'", id, identifier),
                None => format!("no tasks found matching '{}'", identifier),
            })),
            1 => Ok(matches.remove(0)),
            _ => Err(TaskError::Ambiguous {
                identifier: identifier.to_string(),
                suggestions: matches.iter().take(MAX_SUGGESTIONS).map(Task::label).collect(),
            }),
        }
    }
}
