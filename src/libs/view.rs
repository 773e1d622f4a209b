use super::board::Board;
use super::task::{Link, Priority, Status, Task};
use prettytable::{row, Cell, Row, Table};

/// Column width (in characters) used for titles in the kanban snapshot.
const KANBAN_TITLE_WIDTH: usize = 32;

/// Terminal tables for the CLI.
pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "STATUS", "PRIORITY", "TITLE", "DESCRIPTION"]);
        for task in tasks {
            table.add_row(row![task.id, task.status, task.priority, task.title, task.description]);
        }
        table.printstd();
    }

    pub fn task(task: &Task) {
        let mut table = Table::new();

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description]);
        table.add_row(row!["STATUS", task.status]);
        table.add_row(row!["PRIORITY", format!("{} ({})", task.priority, task.priority.level())]);
        table.add_row(row!["BOARD", task.board_id]);
        table.add_row(row!["CREATED", task.created_at.format("%Y-%m-%d %H:%M:%S")]);
        table.add_row(row!["UPDATED", task.updated_at.format("%Y-%m-%d %H:%M:%S")]);
        table.printstd();
    }

    /// TODO / DOING / DONE side by side.
    pub fn kanban(tasks: &[Task]) {
        kanban_table(tasks).printstd();
    }

    pub fn links(task_id: i64, links: &[Link]) {
        let mut table = Table::new();

        table.add_row(row!["LINK ID", "RELATION", "CREATED"]);
        for link in links {
            table.add_row(row![link.id, link.describe_for(task_id), link.created_at.format("%Y-%m-%d %H:%M")]);
        }
        table.printstd();
    }

    pub fn boards(boards: &[Board], current: &str) {
        let mut table = Table::new();

        table.add_row(row!["", "NAME", "DESCRIPTION", "PATH"]);
        for board in boards {
            let marker = if board.name == current { "*" } else { "" };
            table.add_row(row![marker, board.name, board.description, board.path.display()]);
        }
        table.printstd();
    }

    pub fn migrations(history: &[(u32, String, String)]) {
        let mut table = Table::new();

        table.add_row(row!["VERSION", "NAME", "APPLIED AT"]);
        for (version, name, applied_at) in history {
            table.add_row(row![version, name, applied_at]);
        }
        table.printstd();
    }
}

/// Kanban snapshot: one column per status, tasks in listing order.
pub fn kanban_table(tasks: &[Task]) -> Table {
    let columns: Vec<Vec<String>> = Status::ALL
        .iter()
        .map(|status| tasks.iter().filter(|t| t.status == *status).map(kanban_card).collect())
        .collect();

    let mut table = Table::new();
    table.set_titles(Row::new(
        Status::ALL
            .iter()
            .zip(&columns)
            .map(|(status, cards)| Cell::new(&format!("{} ({})", status.as_str().to_uppercase(), cards.len())))
            .collect(),
    ));

    let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..depth {
        table.add_row(Row::new(
            columns
                .iter()
                .map(|cards| Cell::new(cards.get(i).map(String::as_str).unwrap_or("")))
                .collect(),
        ));
    }

    table
}

fn kanban_card(task: &Task) -> String {
    let title = truncate(&task.title, KANBAN_TITLE_WIDTH);
    match priority_marker(task.priority) {
        "" => format!("#{} {}", task.id, title),
        marker => format!("#{} {} {}", task.id, marker, title),
    }
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::None => "",
        Priority::Low => "[L]",
        Priority::Medium => "[M]",
        Priority::High => "[H]",
        Priority::Critical => "[!]",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
