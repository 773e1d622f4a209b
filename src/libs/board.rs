//! Board registry: maps board names to store files and remembers the current board.
//!
//! Layout inside the application directory:
//!
//! ```text
//! ~/.cainban/
//! ├── cainban.db        default board
//! ├── current-board     name of the selected board, absent for default
//! └── boards/
//!     └── <name>.db     one store per additional board
//! ```
//!
//! The registry only resolves locations. Callers open the store with
//! [`Db::open`] and pass the resolved handle down.

use super::data_storage::DataStorage;
use super::error::{TaskError, TaskResult};
use crate::db::db::{Db, DB_FILE_NAME};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BOARD: &str = "default";
const BOARDS_DIR: &str = "boards";
const CURRENT_BOARD_FILE: &str = "current-board";
const UNNAMED_BOARD: &str = "unnamed";

/// A board known to the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    /// Sanitized name, also the store file stem.
    pub name: String,
    /// Description stored inside the board's own database.
    pub description: String,
    /// Location of the board's store file.
    pub path: PathBuf,
}

/// Resolves board names to store files inside one application directory.
///
/// ## Features
///
/// - **Current board**: persisted in a marker file next to the default store
/// - **Configured default**: reported as current when nothing is selected
/// - **Lifecycle**: create, list, look up and delete board stores
pub struct BoardRegistry {
    storage: DataStorage,
    default_board: String,
}

impl BoardRegistry {
    pub fn new(storage: DataStorage) -> Self {
        Self {
            storage,
            default_board: DEFAULT_BOARD.to_string(),
        }
    }

    /// Board reported as current when none has been selected.
    pub fn with_default_board(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.default_board = name.trim().to_string();
        }
        self
    }

    /// Application directory the registry works in.
    pub fn config_dir(&self) -> &Path {
        self.storage.base_path()
    }

    fn boards_dir(&self) -> PathBuf {
        self.config_dir().join(BOARDS_DIR)
    }

    /// Store location for a board. Empty and `default` map to the default store.
    pub fn board_path(&self, name: &str) -> PathBuf {
        let name = name.trim();
        if is_default(name) {
            return self.config_dir().join(DB_FILE_NAME);
        }
        self.boards_dir().join(format!("{}.db", sanitize_board_name(name)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.board_path(name).exists()
    }

    /// Selected board, or the configured default when no marker is present.
    pub fn current_board(&self) -> TaskResult<String> {
        let current_file = self.config_dir().join(CURRENT_BOARD_FILE);
        if !current_file.exists() {
            return Ok(self.default_board.clone());
        }

        let name = fs::read_to_string(current_file)?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(self.default_board.clone());
        }
        Ok(name.to_string())
    }

    /// Persists `name` as current and returns the stored form.
    ///
    /// The marker holds the sanitized name. It is removed only when the choice
    /// equals the configured default.
    pub fn set_current_board(&self, name: &str) -> TaskResult<String> {
        let current_file = self.storage.get_path(CURRENT_BOARD_FILE)?;
        let name = canonical_board_name(name);

        if name == canonical_board_name(&self.default_board) {
            if current_file.exists() {
                fs::remove_file(current_file)?;
            }
            return Ok(name);
        }

        fs::write(current_file, &name)?;
        tracing::debug!(board = %name, "switched current board");
        Ok(name)
    }

    /// Creates and initializes the store for a new board.
    pub fn create_board(&self, name: &str, description: &str) -> TaskResult<Board> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskError::validation("board name cannot be empty"));
        }

        let path = self.board_path(name);
        if path.exists() {
            return Err(TaskError::conflict(format!("board '{}' already exists", name)));
        }

        let db = Db::open(&path)?;
        db.conn.execute(
            "UPDATE boards SET name = ?1, description = ?2 WHERE id = 1",
            params![name, description],
        )?;
        tracing::info!(board = name, path = %path.display(), "created board");

        Ok(Board {
            name: board_name_from_path(&path).unwrap_or_else(|| name.to_string()),
            description: description.to_string(),
            path,
        })
    }

    /// Existing boards: the default one first if its store exists, then the rest by name.
    pub fn list_boards(&self) -> TaskResult<Vec<Board>> {
        let mut boards = Vec::new();

        let default_path = self.board_path(DEFAULT_BOARD);
        if default_path.exists() {
            boards.push(Board {
                name: DEFAULT_BOARD.to_string(),
                description: read_description(&default_path).unwrap_or_else(|| "Default kanban board".to_string()),
                path: default_path,
            });
        }

        let boards_dir = self.boards_dir();
        if boards_dir.is_dir() {
            let mut custom = Vec::new();
            for entry in fs::read_dir(&boards_dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    continue;
                }
                if let Some(name) = board_name_from_path(&path) {
                    custom.push(Board {
                        name,
                        description: read_description(&path).unwrap_or_default(),
                        path,
                    });
                }
            }
            custom.sort_by(|a, b| a.name.cmp(&b.name));
            boards.extend(custom);
        }

        Ok(boards)
    }

    /// Looks up an existing board by name. The name is sanitized before matching.
    pub fn get_board(&self, name: &str) -> TaskResult<Board> {
        let name = name.trim();
        let wanted = canonical_board_name(name);

        self.list_boards()?
            .into_iter()
            .find(|board| board.name == wanted)
            .ok_or_else(|| TaskError::not_found(format!("board '{}' not found", name)))
    }

    /// Removes a board's store. The default board cannot be deleted.
    ///
    /// Deleting the current board makes the default board current.
    pub fn delete_board(&self, name: &str) -> TaskResult<()> {
        let name = name.trim();
        if is_default(name) {
            return Err(TaskError::validation("cannot delete default board"));
        }

        let path = self.board_path(name);
        if !path.exists() {
            return Err(TaskError::not_found(format!("board '{}' does not exist", name)));
        }

        if self.board_path(&self.current_board()?) == path {
            self.set_current_board(DEFAULT_BOARD)?;
        }

        fs::remove_file(&path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = PathBuf::from(format!("{}{}", path.display(), suffix));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
        tracing::info!(board = name, "deleted board");
        Ok(())
    }
}

fn is_default(name: &str) -> bool {
    name.is_empty() || name == DEFAULT_BOARD
}

/// Name a board is stored and reported under.
fn canonical_board_name(name: &str) -> String {
    let name = name.trim();
    if is_default(name) {
        DEFAULT_BOARD.to_string()
    } else {
        sanitize_board_name(name)
    }
}

fn board_name_from_path(path: &Path) -> Option<String> {
    if path.extension()? != "db" {
        return None;
    }
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

fn read_description(path: &Path) -> Option<String> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).ok()?;
    conn.query_row("SELECT description FROM boards WHERE id = 1", [], |row| row.get::<_, Option<String>>(0))
        .optional()
        .ok()
        .flatten()
        .flatten()
}

/// Safe file name for a board: ASCII letters, digits, `-` and `_` are kept,
/// everything else becomes `_`.
pub fn sanitize_board_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if safe.is_empty() {
        UNNAMED_BOARD.to_string()
    } else {
        safe
    }
}

/// Board name suggested for a project directory.
///
/// Uses the repository name of the first remote URL in `.git/config`, then
/// the directory name, then `default`.
pub fn detect_project_board(dir: &Path) -> String {
    if let Some(name) = git_repo_name(dir) {
        return name;
    }

    match dir.file_name().map(|n| n.to_string_lossy().into_owned()) {
        Some(name) if !name.is_empty() && name != "." => name,
        _ => DEFAULT_BOARD.to_string(),
    }
}

fn git_repo_name(dir: &Path) -> Option<String> {
    let git_config = fs::read_to_string(dir.join(".git").join("config")).ok()?;

    git_config
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("url = "))
        .find_map(|line| {
            let last = line.rsplit(|c| c == '/' || c == ':').next()?;
            let name = last.trim().trim_end_matches(".git");
            (!name.is_empty()).then(|| name.to_string())
        })
}
