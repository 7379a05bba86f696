use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::todo_store::TodoStore;
use crate::model::config::HangarConfig;
use crate::model::project::{Commit, GitInfo, Project, PullRequest};
use crate::ops::dashboard::{self, SummaryOptions, Tree};

use super::input;
use super::render;
use super::theme::Theme;
use super::todo_panel::TodoPanel;

/// Current interaction mode of the project list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a `/` filter
    Filter,
}

/// What a submitted text input is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    AddTodo,
    EditTodo,
}

impl InputPurpose {
    pub fn title(self) -> &'static str {
        match self {
            InputPurpose::AddTodo => "Add Todo",
            InputPurpose::EditTodo => "Edit Todo",
        }
    }
}

/// Single-line text input popup state
#[derive(Debug, Clone)]
pub struct TextInput {
    pub purpose: InputPurpose,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    pub cursor: usize,
}

impl TextInput {
    pub fn new(purpose: InputPurpose, initial: &str) -> Self {
        TextInput {
            purpose,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }
}

/// Details shown by the status popup, gathered when it opens
#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub name: String,
    pub git: GitInfo,
    pub commits: Vec<Commit>,
    pub prs: Vec<PullRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// One-shot message shown in the status row until the next key press
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

/// Main application state
pub struct App {
    pub config: HangarConfig,
    pub theme: Theme,
    pub tree: Tree,
    pub summary: SummaryOptions,
    /// Every project in the current tree, sorted by name
    pub projects: Vec<Project>,
    /// Cursor into the visible (filtered) rows
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub mode: Mode,
    /// Filter being typed in Filter mode
    pub filter_input: String,
    /// Filter applied in Navigate mode
    pub filter: Option<String>,
    pub todos: TodoPanel,
    pub text_input: Option<TextInput>,
    pub status: Option<StatusInfo>,
    pub show_help: bool,
    pub message: Option<Message>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: HangarConfig, summary: SummaryOptions) -> Self {
        let theme = Theme::from_config(&config.ui);
        let store = TodoStore::new(config.todos_dir());
        let mut app = App {
            config,
            theme,
            tree: Tree::Active,
            summary,
            projects: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Navigate,
            filter_input: String::new(),
            filter: None,
            todos: TodoPanel::new(store),
            text_input: None,
            status: None,
            show_help: false,
            message: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Rescan the current tree, keeping the selection on the same project
    /// when it still exists
    pub fn refresh(&mut self) {
        let selected = self.selected_project().map(|p| p.name.clone());
        match dashboard::load_projects(&self.config, self.tree, self.todos.store(), self.summary) {
            Ok(projects) => self.projects = projects,
            Err(e) => {
                self.projects.clear();
                self.set_message(MessageKind::Error, e.to_string());
            }
        }
        let visible = self.visible_indices();
        self.cursor = selected
            .and_then(|name| {
                visible
                    .iter()
                    .position(|&i| self.projects[i].name == name)
            })
            .unwrap_or(0);
        self.clamp_cursor();
    }

    /// Switch between the active and archived trees
    pub fn switch_tree(&mut self) {
        self.tree = self.tree.other();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.refresh();
    }

    /// Case-insensitive regex for the current filter. An invalid pattern is
    /// matched literally.
    pub fn filter_regex(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Filter => self.filter_input.as_str(),
            Mode::Navigate => self.filter.as_deref()?,
        };
        if pattern.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", pattern))
            .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
            .ok()
    }

    /// Indices into `projects` of the rows currently shown
    pub fn visible_indices(&self) -> Vec<usize> {
        let re = self.filter_regex();
        self.projects
            .iter()
            .enumerate()
            .filter(|(_, p)| re.as_ref().is_none_or(|re| re.is_match(&p.name)))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let idx = *self.visible_indices().get(self.cursor)?;
        self.projects.get(idx)
    }

    pub fn selected_project_mut(&mut self) -> Option<&mut Project> {
        let idx = *self.visible_indices().get(self.cursor)?;
        self.projects.get_mut(idx)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = self.cursor.saturating_add_signed(delta);
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_indices().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            kind,
        });
    }

    /// Re-read the open todo count of one project after its list changed
    pub fn refresh_todo_count(&mut self, name: &str) {
        let count = dashboard::todo_count(self.todos.store(), name);
        if let Some(project) = self.projects.iter_mut().find(|p| p.name == name) {
            project.todos = count;
        }
    }
}

/// Run the TUI application
pub fn run(config: HangarConfig) -> Result<(), Box<dyn std::error::Error>> {
    let summary = SummaryOptions {
        git: true,
        pr_counts: config.github.pr_counts,
    };
    let mut app = App::new(config, summary);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
