use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::projects::move_project;
use crate::io::todo_store::{TodoStore, validate_project_name};
use crate::model::config::HangarConfig;
use crate::model::todo::TodoList;
use crate::ops::dashboard::{self, SummaryOptions, Tree};
use crate::ops::todo_ops;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let config = config_io::read_config(cli.config.as_deref())?;

    match cli.command {
        None => crate::tui::run(config),
        Some(Commands::Projects(args)) => cmd_projects(&config, args, json),
        Some(Commands::Todo(cmd)) => {
            let store = TodoStore::new(config.todos_dir());
            match cmd.action {
                TodoAction::List(args) => cmd_todo_list(&store, &args.project, json),
                TodoAction::Add(args) => cmd_todo_add(&store, args, json),
                TodoAction::Edit(args) => cmd_todo_edit(&store, args, json),
                TodoAction::Rm(args) => cmd_todo_rm(&store, args, json),
                TodoAction::Toggle(args) => cmd_todo_toggle(&store, args, json),
            }
        }
        Some(Commands::Mv(args)) => cmd_mv(&config, args, json),
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

fn cmd_projects(config: &HangarConfig, args: ProjectsArgs, json: bool) -> CmdResult {
    let tree = if args.archived {
        Tree::Archived
    } else {
        Tree::Active
    };
    let store = TodoStore::new(config.todos_dir());
    let options = SummaryOptions {
        git: true,
        pr_counts: false,
    };
    let projects = dashboard::load_projects(config, tree, &store, options)?;

    if json {
        let items: Vec<ProjectJson> = projects.iter().map(project_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("(no projects in {})", tree.root(config).display());
    }
    let name_width = projects
        .iter()
        .map(|p| crate::util::unicode::display_width(&p.name))
        .max()
        .unwrap_or(0);
    for project in &projects {
        println!("{}", format_project_line(project, name_width));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

fn cmd_todo_list(store: &TodoStore, project: &str, json: bool) -> CmdResult {
    let list = store.load(project)?;
    print_list(project, &list, json)
}

fn cmd_todo_add(store: &TodoStore, args: TodoAddArgs, json: bool) -> CmdResult {
    let mut list = store.load(&args.project)?;
    todo_ops::add_item(&mut list, &args.text.join(" "))?;
    store.save(&args.project, &list)?;
    if json {
        return print_list(&args.project, &list, true);
    }
    let index = list.len();
    println!("{}", format_todo_line(index, &list.items[index - 1]));
    Ok(())
}

fn cmd_todo_edit(store: &TodoStore, args: TodoEditArgs, json: bool) -> CmdResult {
    let mut list = store.load(&args.project)?;
    let index = to_index(&list, &args.project, args.index)?;
    todo_ops::edit_item(&mut list, index, &args.text.join(" "))?;
    store.save(&args.project, &list)?;
    if json {
        return print_list(&args.project, &list, true);
    }
    println!("{}", format_todo_line(args.index, &list.items[index]));
    Ok(())
}

fn cmd_todo_rm(store: &TodoStore, args: TodoIndexArgs, json: bool) -> CmdResult {
    let mut list = store.load(&args.project)?;
    let index = to_index(&list, &args.project, args.index)?;
    let removed = todo_ops::delete_item(&mut list, index)?;
    store.save(&args.project, &list)?;
    if json {
        return print_list(&args.project, &list, true);
    }
    println!("removed: {}", removed.content);
    Ok(())
}

fn cmd_todo_toggle(store: &TodoStore, args: TodoIndexArgs, json: bool) -> CmdResult {
    let mut list = store.load(&args.project)?;
    let index = to_index(&list, &args.project, args.index)?;
    todo_ops::toggle_status(&mut list, index)?;
    store.save(&args.project, &list)?;
    if json {
        return print_list(&args.project, &list, true);
    }
    println!("{}", format_todo_line(args.index, &list.items[index]));
    Ok(())
}

fn print_list(project: &str, list: &TodoList, json: bool) -> CmdResult {
    if json {
        let out = todo_list_to_json(project, &list.items);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    if list.is_empty() {
        println!("(no todos for {})", project);
    }
    for (i, item) in list.items.iter().enumerate() {
        println!("{}", format_todo_line(i + 1, item));
    }
    Ok(())
}

/// Convert a 1-based todo number into an index into `list`
fn to_index(list: &TodoList, project: &str, number: usize) -> Result<usize, String> {
    if number == 0 || number > list.len() {
        return Err(format!(
            "no todo #{} for {} ({} todos)",
            number,
            project,
            list.len()
        ));
    }
    Ok(number - 1)
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

fn cmd_mv(config: &HangarConfig, args: MvArgs, json: bool) -> CmdResult {
    validate_project_name(&args.project)?;
    let from = if args.restore {
        Tree::Archived
    } else {
        Tree::Active
    };
    let to = from.other();
    let src = from.root(config).join(&args.project);
    let dest = move_project(&src, &to.root(config))?;

    if json {
        let out = MoveJson {
            project: args.project.clone(),
            to: dest.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("moved {} to {}", args.project, to.label());
    }
    Ok(())
}
