//! Tool catalogue and dispatch for the RPC front end.
//!
//! Each tool is a thin adapter: it validates arguments at the boundary,
//! calls exactly one core operation, and echoes the result as text content
//! plus a structured copy (`task`, `tasks`, `links` or `boards`).
//!
//! Error classes:
//!
//! | failure                                           | code   |
//! |---------------------------------------------------|--------|
//! | missing/mistyped argument, bad status/priority/link type | -32602 |
//! | unknown tool                                      | -32601 |
//! | any failure of the core operation itself          | -32603 |

use super::jsonrpc::{text_content, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use crate::db::db::Db;
use crate::db::links::Links;
use crate::db::tasks::Tasks;
use crate::libs::board::BoardRegistry;
use crate::libs::error::TaskError;
use crate::libs::resolver::Resolver;
use crate::libs::task::{LinkType, Priority, PriorityInput, Status, Task, DEFAULT_BOARD_ID};
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ToolError {
    pub code: i64,
    pub message: String,
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Tool not found: {}", name),
        }
    }

    /// Failure of a core operation, prefixed with what was being attempted.
    pub fn failed(action: &str, err: TaskError) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: format!("Failed to {}: {}", action, err),
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

type ToolResult = Result<Value, ToolError>;

/// Typed access to a `tools/call` arguments object.
struct ToolArgs<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> ToolArgs<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required_str(&self, key: &str) -> Result<&'a str, ToolError> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required and must be a string", key)))
    }

    fn optional_str(&self, key: &str) -> Result<Option<&'a str>, ToolError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ToolError::invalid_params(format!("{} must be a string", key))),
        }
    }

    fn optional_id(&self, key: &str) -> Result<Option<i64>, ToolError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => as_integer(value)
                .map(Some)
                .ok_or_else(|| ToolError::invalid_params(format!("{} must be an integer", key))),
        }
    }

    fn required_id(&self, key: &str) -> Result<i64, ToolError> {
        self.optional_id(key)?
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required and must be an integer", key)))
    }

    fn board_id(&self) -> Result<i64, ToolError> {
        Ok(self.optional_id("board_id")?.unwrap_or(DEFAULT_BOARD_ID))
    }

    fn optional_bool(&self, key: &str) -> Result<bool, ToolError> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(ToolError::invalid_params(format!("{} must be a boolean", key))),
        }
    }

    /// Priority given as a level or a name, resolved here so bad input is an argument error.
    fn priority(&self, key: &str) -> Result<Option<Priority>, ToolError> {
        let input = match self.get(key) {
            None => return Ok(None),
            Some(Value::String(name)) => PriorityInput::Named(name.clone()),
            Some(value) => as_integer(value)
                .map(PriorityInput::Numeric)
                .ok_or_else(|| ToolError::invalid_params("priority must be an integer 0-4 or a priority name"))?,
        };
        input
            .resolve()
            .map(Some)
            .map_err(|e| ToolError::invalid_params(e.to_string()))
    }

    fn status(&self, key: &str) -> Result<Option<Status>, ToolError> {
        self.optional_str(key)?
            .map(|s| s.parse::<Status>().map_err(|e| ToolError::invalid_params(e.to_string())))
            .transpose()
    }

    fn link_type(&self) -> Result<LinkType, ToolError> {
        match self.optional_str("link_type")? {
            None => Ok(LinkType::default()),
            Some(s) => s.parse().map_err(|e: TaskError| ToolError::invalid_params(e.to_string())),
        }
    }

    /// Task reference for `resolve_task`; numbers are accepted as ids.
    fn identifier(&self) -> Result<String, ToolError> {
        match self.get("identifier") {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(ToolError::invalid_params("identifier is required and must be a string or an integer")),
        }
    }
}

/// Whole floats past this magnitude are no longer exact and would saturate.
const MAX_EXACT_FLOAT: f64 = 9.0e15;

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT)
            .map(|f| f as i64)
    })
}

fn priority_suffix(task: &Task) -> String {
    match task.priority {
        Priority::None => String::new(),
        p => format!(" [{}]", p),
    }
}

fn task_line(task: &Task) -> String {
    format!("• #{}{} {}", task.id, priority_suffix(task), task.title)
}

/// Tool handlers bound to one open board store.
pub struct ToolServer {
    registry: BoardRegistry,
    board: String,
    db: Db,
}

impl ToolServer {
    pub fn new(registry: BoardRegistry, board: impl Into<String>, db: Db) -> Self {
        Self {
            registry,
            board: board.into(),
            db,
        }
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn call(&mut self, name: &str, arguments: &Map<String, Value>) -> ToolResult {
        let args = ToolArgs { map: arguments };
        tracing::debug!(tool = name, board = %self.board, "tool call");

        match name {
            "create_task" => self.create_task(&args),
            "list_tasks" => self.list_tasks(&args),
            "get_task" => self.get_task(&args),
            "update_task_status" => self.update_task_status(&args),
            "update_task" => self.update_task(&args),
            "update_task_priority" => self.update_task_priority(&args),
            "delete_task" => self.delete_task(&args),
            "restore_task" => self.restore_task(&args),
            "link_tasks" => self.link_tasks(&args),
            "unlink_tasks" => self.unlink_tasks(&args),
            "get_task_links" => self.get_task_links(&args),
            "search_tasks" => self.search_tasks(&args),
            "resolve_task" => self.resolve_task(&args),
            "list_boards" => self.list_boards(),
            "change_board" => self.change_board(&args),
            other => Err(ToolError::unknown_tool(other)),
        }
    }

    fn create_task(&self, args: &ToolArgs) -> ToolResult {
        let title = args.required_str("title")?;
        let description = args.optional_str("description")?.unwrap_or("");
        let board_id = args.board_id()?;
        let priority = args.priority("priority")?;

        let task = Tasks::new(&self.db)
            .create_task(board_id, title, description, priority.map(PriorityInput::from))
            .map_err(|e| ToolError::failed("create task", e))?;

        Ok(json!({
            "content": text_content([format!("Created task #{}{}: {}", task.id, priority_suffix(&task), task.title)]),
            "task": task,
        }))
    }

    fn list_tasks(&self, args: &ToolArgs) -> ToolResult {
        let board_id = args.board_id()?;
        let tasks = Tasks::new(&self.db);
        let listed = match args.status("status")? {
            Some(status) => tasks.list_tasks_by_status(board_id, status),
            None => tasks.list_tasks(board_id),
        }
        .map_err(|e| ToolError::failed("list tasks", e))?;

        let mut lines = Vec::new();
        if listed.is_empty() {
            lines.push(format!("No tasks found in board '{}'", self.board));
        }
        for status in Status::ALL {
            let column: Vec<&Task> = listed.iter().filter(|t| t.status == status).collect();
            if column.is_empty() {
                continue;
            }
            lines.push(format!("\n{}:", status.as_str().to_uppercase()));
            lines.extend(column.into_iter().map(task_line));
        }

        Ok(json!({ "content": text_content(lines), "tasks": listed }))
    }

    fn get_task(&self, args: &ToolArgs) -> ToolResult {
        let id = args.required_id("id")?;
        let task = Tasks::new(&self.db)
            .get_task(id)
            .map_err(|e| ToolError::failed("get task", e))?;

        Ok(json!({
            "content": text_content([format!("#{} [{}]{} {}\n{}", task.id, task.status, priority_suffix(&task), task.title, task.description)]),
            "task": task,
        }))
    }

    fn update_task_status(&self, args: &ToolArgs) -> ToolResult {
        let id = args.required_id("id")?;
        let status = args
            .status("status")?
            .ok_or_else(|| ToolError::invalid_params("status is required and must be a string"))?;

        Tasks::new(&self.db)
            .update_task_status(id, status)
            .map_err(|e| ToolError::failed("update task status", e))?;

        Ok(json!({ "content": text_content([format!("Updated task #{} status to {}", id, status)]) }))
    }

    fn update_task(&self, args: &ToolArgs) -> ToolResult {
        let id = args.required_id("id")?;
        let title = args.required_str("title")?;
        let description = args.optional_str("description")?.unwrap_or("");

        let tasks = Tasks::new(&self.db);
        tasks
            .update_task(id, title, description)
            .map_err(|e| ToolError::failed("update task", e))?;
        let task = tasks.get_task(id).map_err(|e| ToolError::failed("update task", e))?;

        Ok(json!({
            "content": text_content([format!("Updated task #{}: {}", id, task.title)]),
            "task": task,
        }))
    }

    fn update_task_priority(&self, args: &ToolArgs) -> ToolResult {
        let id = args.required_id("id")?;
        let priority = args
            .priority("priority")?
            .ok_or_else(|| ToolError::invalid_params("priority is required"))?;

        let priority = Tasks::new(&self.db)
            .update_task_priority(id, &priority.into())
            .map_err(|e| ToolError::failed("update task priority", e))?;

        Ok(json!({
            "content": text_content([format!("Task #{} priority updated to {} ({})", id, priority, priority.level())]),
        }))
    }

    fn delete_task(&self, args: &ToolArgs) -> ToolResult {
        let id = args.required_id("task_id")?;
        let tasks = Tasks::new(&self.db);

        let text = if args.optional_bool("hard_delete")? {
            tasks.hard_delete(id).map_err(|e| ToolError::failed("delete task", e))?;
            format!("Task {} permanently deleted", id)
        } else {
            tasks.soft_delete(id).map_err(|e| ToolError::failed("delete task", e))?;
            format!("Task {} deleted (can be restored)", id)
        };

        Ok(json!({ "content": text_content([text]) }))
    }

    fn restore_task(&self, args: &ToolArgs) -> ToolResult {
        let id = args.required_id("task_id")?;
        let tasks = Tasks::new(&self.db);
        tasks.restore_task(id).map_err(|e| ToolError::failed("restore task", e))?;
        let task = tasks.get_task(id).map_err(|e| ToolError::failed("restore task", e))?;

        Ok(json!({ "content": text_content([format!("Task {} restored", id)]), "task": task }))
    }

    fn link_tasks(&self, args: &ToolArgs) -> ToolResult {
        let from = args.required_id("from_task_id")?;
        let to = args.required_id("to_task_id")?;
        let link_type = args.link_type()?;

        let link = Links::new(&self.db)
            .link_tasks(from, to, link_type)
            .map_err(|e| ToolError::failed("link tasks", e))?;

        Ok(json!({
            "content": text_content([format!("Linked task {} {} task {}", from, link_type, to)]),
            "link": link,
        }))
    }

    fn unlink_tasks(&self, args: &ToolArgs) -> ToolResult {
        let from = args.required_id("from_task_id")?;
        let to = args.required_id("to_task_id")?;
        let link_type = args.link_type()?;

        Links::new(&self.db)
            .unlink_tasks(from, to, link_type)
            .map_err(|e| ToolError::failed("unlink tasks", e))?;

        Ok(json!({ "content": text_content([format!("Unlinked task {} {} task {}", from, link_type, to)]) }))
    }

    fn get_task_links(&self, args: &ToolArgs) -> ToolResult {
        let task_id = args.required_id("task_id")?;
        let links = Links::new(&self.db)
            .get_task_links(task_id)
            .map_err(|e| ToolError::failed("get task links", e))?;

        let text = if links.is_empty() {
            format!("Task {} has no links", task_id)
        } else {
            let lines: Vec<String> = links.iter().map(|l| format!("• {}", l.describe_for(task_id))).collect();
            format!("Task {} links:\n{}", task_id, lines.join("\n"))
        };

        Ok(json!({ "content": text_content([text]), "links": links }))
    }

    fn search_tasks(&self, args: &ToolArgs) -> ToolResult {
        let board_id = args.board_id()?;
        let query = args.required_str("query")?;
        let found = Tasks::new(&self.db)
            .search_tasks(board_id, query)
            .map_err(|e| ToolError::failed("search tasks", e))?;

        let mut lines = vec![format!("Found {} task(s) matching '{}'", found.len(), query)];
        lines.extend(found.iter().map(task_line));

        Ok(json!({ "content": text_content(lines), "tasks": found }))
    }

    fn resolve_task(&self, args: &ToolArgs) -> ToolResult {
        let board_id = args.board_id()?;
        let identifier = args.identifier()?;
        let task = Resolver::new(&self.db)
            .resolve(board_id, &identifier)
            .map_err(|e| ToolError::failed("resolve task", e))?;

        Ok(json!({
            "content": text_content([format!("#{} [{}]{} {}", task.id, task.status, priority_suffix(&task), task.title)]),
            "task": task,
        }))
    }

    fn list_boards(&self) -> ToolResult {
        let boards = self
            .registry
            .list_boards()
            .map_err(|e| ToolError::failed("list boards", e))?;

        let mut lines = Vec::new();
        if boards.is_empty() {
            lines.push("No boards found".to_string());
        } else {
            lines.push("Available boards:".to_string());
            for board in &boards {
                let marker = if board.name == self.board { " (current)" } else { "" };
                lines.push(format!("• {}{}", board.name, marker));
            }
        }

        Ok(json!({ "content": text_content(lines), "boards": boards, "current": self.board }))
    }

    /// Switches the served store and persists the choice as the current board.
    fn change_board(&mut self, args: &ToolArgs) -> ToolResult {
        let name = args.required_str("board_name")?;
        let board = self
            .registry
            .get_board(name)
            .map_err(|e| ToolError::failed("change board", e))?;

        let db = Db::open(&board.path).map_err(|e| ToolError::failed("change board", e))?;
        self.registry
            .set_current_board(&board.name)
            .map_err(|e| ToolError::failed("change board", e))?;

        self.db = db;
        self.board = board.name.clone();
        tracing::info!(board = %self.board, "changed board");

        Ok(json!({ "content": text_content([format!("Changed to board: {}", board.name)]), "boards": [board] }))
    }
}

/// `tools/list` payload.
pub fn tool_definitions() -> Value {
    let id = |what: &str| json!({ "type": "integer", "description": what });
    let board_id = json!({ "type": "integer", "description": "The board ID (defaults to 1)", "default": 1 });
    let status = json!({ "type": "string", "enum": ["todo", "doing", "done"] });
    let priority = json!({
        "description": "Priority level (none, low, medium, high, critical or 0-4)",
        "oneOf": [
            { "type": "integer", "minimum": 0, "maximum": 4 },
            { "type": "string", "enum": ["none", "low", "medium", "high", "critical"] }
        ]
    });
    let link_type = json!({
        "type": "string",
        "description": "Type of link (defaults to blocks)",
        "enum": ["blocks", "blocked_by", "related", "depends_on"],
        "default": "blocks"
    });

    json!({ "tools": [
        {
            "name": "create_task",
            "description": "Create a new task in the kanban board",
            "inputSchema": { "type": "object", "properties": {
                "title": { "type": "string", "description": "The title of the task" },
                "description": { "type": "string", "description": "The description of the task" },
                "board_id": board_id,
                "priority": priority
            }, "required": ["title"] }
        },
        {
            "name": "list_tasks",
            "description": "List tasks from the kanban board",
            "inputSchema": { "type": "object", "properties": {
                "board_id": board_id,
                "status": status
            } }
        },
        {
            "name": "get_task",
            "description": "Get a specific task by ID",
            "inputSchema": { "type": "object", "properties": { "id": id("The task ID") }, "required": ["id"] }
        },
        {
            "name": "update_task_status",
            "description": "Update the status of a task",
            "inputSchema": { "type": "object", "properties": {
                "id": id("The task ID"),
                "status": status
            }, "required": ["id", "status"] }
        },
        {
            "name": "update_task",
            "description": "Update a task's title and description",
            "inputSchema": { "type": "object", "properties": {
                "id": id("The task ID"),
                "title": { "type": "string", "description": "The new title" },
                "description": { "type": "string", "description": "The new description" }
            }, "required": ["id", "title"] }
        },
        {
            "name": "update_task_priority",
            "description": "Update the priority of a task",
            "inputSchema": { "type": "object", "properties": {
                "id": id("The task ID"),
                "priority": priority
            }, "required": ["id", "priority"] }
        },
        {
            "name": "delete_task",
            "description": "Delete a task (soft delete by default)",
            "inputSchema": { "type": "object", "properties": {
                "task_id": id("The task ID"),
                "hard_delete": { "type": "boolean", "description": "Permanently delete the task and its links", "default": false }
            }, "required": ["task_id"] }
        },
        {
            "name": "restore_task",
            "description": "Restore a soft-deleted task",
            "inputSchema": { "type": "object", "properties": { "task_id": id("The task ID") }, "required": ["task_id"] }
        },
        {
            "name": "link_tasks",
            "description": "Create a link between two tasks",
            "inputSchema": { "type": "object", "properties": {
                "from_task_id": id("The source task ID"),
                "to_task_id": id("The target task ID"),
                "link_type": link_type
            }, "required": ["from_task_id", "to_task_id"] }
        },
        {
            "name": "unlink_tasks",
            "description": "Remove a link between two tasks",
            "inputSchema": { "type": "object", "properties": {
                "from_task_id": id("The source task ID"),
                "to_task_id": id("The target task ID"),
                "link_type": link_type
            }, "required": ["from_task_id", "to_task_id"] }
        },
        {
            "name": "get_task_links",
            "description": "Get all links for a specific task",
            "inputSchema": { "type": "object", "properties": { "task_id": id("The task ID") }, "required": ["task_id"] }
        },
        {
            "name": "search_tasks",
            "description": "Fuzzy search active tasks by title, best match first",
            "inputSchema": { "type": "object", "properties": {
                "board_id": board_id,
                "query": { "type": "string", "description": "Text to match against task titles" }
            }, "required": ["query"] }
        },
        {
            "name": "resolve_task",
            "description": "Resolve a task ID or fuzzy title reference to exactly one task",
            "inputSchema": { "type": "object", "properties": {
                "board_id": board_id,
                "identifier": { "type": ["string", "integer"], "description": "Task ID or part of its title" }
            }, "required": ["identifier"] }
        },
        {
            "name": "list_boards",
            "description": "List all available kanban boards",
            "inputSchema": { "type": "object", "properties": {} }
        },
        {
            "name": "change_board",
            "description": "Change the active kanban board",
            "inputSchema": { "type": "object", "properties": {
                "board_name": { "type": "string", "description": "Name of the board to switch to" }
            }, "required": ["board_name"] }
        }
    ] })
}
