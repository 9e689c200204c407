use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

use crate::components::editor::TaskEditor;
use crate::components::task_row::TaskRow;
use crate::core::list::{ListError, Sorting, TaskList};

const DUE_FORMAT: &str = "%Y-%m-%d %H:%M";

const USAGE: &str = "\
Usage: slate [COMMAND]

Commands:
  list [--sort due|completed|newest]    Show the task list (default)
  add <title> <details> [--due \"YYYY-MM-DD HH:MM\"]
  done <id>                             Toggle completion
  fav <id>                              Toggle favorite
  edit <id> [--title T] [--details D] [--due \"YYYY-MM-DD HH:MM\" | --no-due]
  rm <id>                               Delete a task

Task ids may be abbreviated to any unique prefix.";

pub fn run(list: &mut TaskList, args: &[String]) -> i32 {
    match args.first().map(String::as_str) {
        None | Some("list") => cmd_list(list, args.get(1..).unwrap_or(&[])),
        Some("add") => cmd_add(list, &args[1..]),
        Some("done") => cmd_toggle(list, &args[1..], Toggle::Completion),
        Some("fav") => cmd_toggle(list, &args[1..], Toggle::Favorite),
        Some("edit") => cmd_edit(list, &args[1..]),
        Some("rm") => cmd_rm(list, &args[1..]),
        Some("help" | "--help" | "-h") => {
            println!("{USAGE}");
            0
        }
        Some(other) => {
            eprintln!("Unknown command: {other}\n\n{USAGE}");
            2
        }
    }
}

enum Toggle {
    Completion,
    Favorite,
}

fn cmd_list(list: &mut TaskList, args: &[String]) -> i32 {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sort" => {
                let Some(value) = iter.next() else {
                    eprintln!("--sort needs a value: due, completed or newest");
                    return 2;
                };
                let Some(sorting) = parse_sorting(value) else {
                    eprintln!("Unknown sort mode '{value}': expected due, completed or newest");
                    return 2;
                };
                list.set_sorting(sorting);
            }
            other => {
                eprintln!("Unknown option: {other}");
                return 2;
            }
        }
    }

    let sorted = list.sorted_tasks();
    if sorted.is_empty() {
        println!("No tasks.");
        return 0;
    }
    println!("To Do List (sorted by {})", list.sorting().label());
    for task in &sorted {
        println!("{}  {}", short_id(task.id), TaskRow::from_task(task).render());
    }
    0
}

fn cmd_add(list: &mut TaskList, args: &[String]) -> i32 {
    let (Some(title), Some(details)) = (args.first(), args.get(1)) else {
        eprintln!("add needs a title and details");
        return 2;
    };

    let mut due = None;
    let mut iter = args[2..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--due" => {
                let Some(value) = iter.next() else {
                    eprintln!("--due needs a value ({DUE_FORMAT})");
                    return 2;
                };
                match parse_due(value) {
                    Some(parsed) => due = Some(parsed),
                    None => {
                        eprintln!("Could not parse due date '{value}' (expected {DUE_FORMAT})");
                        return 2;
                    }
                }
            }
            other => {
                eprintln!("Unknown option: {other}");
                return 2;
            }
        }
    }

    match list.create_task(title, details, due) {
        Ok(id) => {
            println!("Added task {}", short_id(id));
            0
        }
        Err(e) => report(e),
    }
}

fn cmd_toggle(list: &mut TaskList, args: &[String], which: Toggle) -> i32 {
    let Some(id) = args.first().and_then(|p| resolve(list, p)) else {
        return 1;
    };
    let result = match which {
        Toggle::Completion => list.toggle_completion(id),
        Toggle::Favorite => list.toggle_favorite(id),
    };
    if let Err(e) = result {
        return report(e);
    }
    if let Some(task) = list.task(id) {
        println!("{}  {}", short_id(id), TaskRow::from_task(task).render());
    }
    0
}

fn cmd_edit(list: &mut TaskList, args: &[String]) -> i32 {
    let Some(id) = args.first().and_then(|p| resolve(list, p)) else {
        return 1;
    };
    let now = Local::now().naive_local();
    let Some(task) = list.task(id) else {
        return 1;
    };
    let mut editor = TaskEditor::for_task(task, now);

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" => {
                let Some(value) = iter.next() else {
                    eprintln!("--title needs a value");
                    return 2;
                };
                editor.set_title(value);
            }
            "--details" => {
                let Some(value) = iter.next() else {
                    eprintln!("--details needs a value");
                    return 2;
                };
                editor.set_details(value);
            }
            "--due" => {
                let Some(value) = iter.next() else {
                    eprintln!("--due needs a value ({DUE_FORMAT})");
                    return 2;
                };
                let Some(parsed) = parse_due(value) else {
                    eprintln!("Could not parse due date '{value}' (expected {DUE_FORMAT})");
                    return 2;
                };
                editor.set_due_enabled(true);
                editor.set_due_date(parsed, now);
            }
            "--no-due" => editor.set_due_enabled(false),
            other => {
                eprintln!("Unknown option: {other}");
                return 2;
            }
        }
    }

    if let Err(e) = editor.submit(list) {
        return report(e);
    }
    if let Some(task) = list.task(id) {
        println!("{}  {}", short_id(id), TaskRow::from_task(task).render());
    }
    0
}

fn cmd_rm(list: &mut TaskList, args: &[String]) -> i32 {
    let Some(id) = args.first().and_then(|p| resolve(list, p)) else {
        return 1;
    };
    match list.delete_task(id) {
        Ok(()) => {
            println!("Deleted task {}", short_id(id));
            0
        }
        Err(e) => report(e),
    }
}

/// Validation blocks the action and tells the user. A failed save is only
/// logged; the in-memory change stands as what the user sees.
fn report(error: ListError) -> i32 {
    match error {
        ListError::Validation => {
            eprintln!("Please enter both a title and details for the task.");
            1
        }
        ListError::Store(e) => {
            log::error!("Failed to persist task change: {}", e);
            0
        }
    }
}

fn resolve(list: &TaskList, prefix: &str) -> Option<Uuid> {
    // An empty prefix would match every id.
    if prefix.is_empty() {
        eprintln!("Task id must not be empty");
        return None;
    }
    let matches: Vec<Uuid> = list
        .tasks()
        .iter()
        .map(|t| t.id)
        .filter(|id| id.to_string().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [id] => Some(*id),
        [] => {
            eprintln!("No task matches id '{prefix}'");
            None
        }
        _ => {
            eprintln!("Id '{prefix}' is ambiguous ({} matches)", matches.len());
            None
        }
    }
}

fn parse_sorting(value: &str) -> Option<Sorting> {
    match value {
        "due" => Some(Sorting::DueDate),
        "completed" => Some(Sorting::IsCompleted),
        "newest" => Some(Sorting::NewestTask),
        _ => None,
    }
}

fn parse_due(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, DUE_FORMAT) {
        return Some(parsed);
    }
    // Date-only input means start of day.
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sorting_accepts_the_three_modes() {
        assert_eq!(parse_sorting("due"), Some(Sorting::DueDate));
        assert_eq!(parse_sorting("completed"), Some(Sorting::IsCompleted));
        assert_eq!(parse_sorting("newest"), Some(Sorting::NewestTask));
        assert_eq!(parse_sorting("alphabetical"), None);
    }

    #[test]
    fn resolve_requires_a_nonempty_unique_prefix() {
        let dir = std::env::temp_dir().join(format!("slate-resolve-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = crate::store::TaskStore::new(dir.join("tasks.json"));
        let mut list = TaskList::load(store).unwrap();
        let id = list.create_task("Buy milk", "2%", None).unwrap();

        // Empty input must not match the whole list.
        assert_eq!(resolve(&list, ""), None);
        let prefix = &id.to_string()[..8];
        assert_eq!(resolve(&list, prefix), Some(id));
        assert_eq!(resolve(&list, "zzzzzzzz"), None);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn parse_due_accepts_datetime_and_bare_date() {
        let full = parse_due("2026-09-01 14:30").unwrap();
        assert_eq!(full.format("%Y-%m-%d %H:%M").to_string(), "2026-09-01 14:30");

        let bare = parse_due("2026-09-01").unwrap();
        assert_eq!(bare.format("%H:%M").to_string(), "00:00");

        assert!(parse_due("tomorrow").is_none());
    }
}
