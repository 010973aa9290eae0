use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{PlaybackStep, TreeSession};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{self, DomainError, TraversalKind, TreeNode, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::source::to_json;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => _config(cli, command),
        _ => {
            let container = build_container(cli)?;
            let tree = container.tree_source().fetch_tree()?;
            let mut session = TreeSession::new(tree);
            execute_tree_command(&container, &mut session, command)
        }
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("determine current directory", e))),
    }
}

/// Settings with command-line overrides applied, wired into a container.
fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let project_dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(&project_dir))?;

    match &cli.tree {
        Some(tree) => settings.tree_file = Some(tree.clone()),
        None => {
            // Relative paths from config files are relative to the project
            if let Some(tree_file) = settings.tree_file.as_mut() {
                if tree_file.is_relative() {
                    *tree_file = project_dir.join(&*tree_file);
                }
            }
        }
    }
    if cli.no_color {
        settings.display.color = false;
    }
    if !settings.display.color {
        colored::control::set_override(false);
    }
    debug!("settings: {:?}", settings);

    Ok(ServiceContainer::new(settings))
}

fn execute_tree_command(
    container: &ServiceContainer,
    session: &mut TreeSession,
    command: &Commands,
) -> CliResult<()> {
    match command {
        Commands::Show { collapse } => _show(container, session, collapse),
        Commands::Dfs { animate } => _traverse(container, session, TraversalKind::Dfs, *animate),
        Commands::Bfs { animate } => _traverse(container, session, TraversalKind::Bfs, *animate),
        Commands::Path { start, end } => _path(container, session, start, end),
        Commands::Balance => _balance(container, session),
        Commands::Heap { write } => _heap(container, session, *write),
        Commands::Find { id } => _find(container, id),
        Commands::Search { query } => _search(container, session, query),
        Commands::SetValue { id, value, write } => _set_value(container, session, id, *value, *write),
        Commands::AddChild {
            parent,
            value,
            write,
        } => _add_child(container, session, parent, *value, *write),
        Commands::Export => _export(container, session.tree()),
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

fn render(container: &ServiceContainer, session: &TreeSession) {
    let options = container.settings.display.render_options();
    output::info(&session.view().render_tree(session.tree(), &options));
}

fn print_status(session: &TreeSession) {
    if let Some(status) = session.status() {
        output::status(status);
    }
}

/// Writes the session's tree back to the configured file.
fn write_back(container: &ServiceContainer, tree: &TreeNode) -> CliResult<()> {
    let source = container.json_source().ok_or_else(|| {
        CliError::Usage("--write requires a tree file (--tree or tree_file in config)".to_string())
    })?;
    source.store(tree)?;
    output::success(&format!("Wrote {}", source.path().display()));
    Ok(())
}

#[instrument(skip(container, session))]
fn _show(container: &ServiceContainer, session: &mut TreeSession, collapse: &[String]) -> CliResult<()> {
    for id in collapse {
        if domain::find_node(session.tree(), id).is_none() {
            return Err(DomainError::NodeNotFound(id.clone()).into());
        }
        session.toggle_collapse(id);
    }
    render(container, session);
    Ok(())
}

#[instrument(skip(container, session))]
fn _traverse(
    container: &ServiceContainer,
    session: &mut TreeSession,
    kind: TraversalKind,
    animate: bool,
) -> CliResult<()> {
    let playback = session.run_traversal(kind);
    print_status(session);

    if animate {
        let delay = Duration::from_millis(container.settings.playback.step_delay_ms);
        for step in playback {
            session.apply_step(&step);
            match &step {
                PlaybackStep::Visit { id, .. } => {
                    output::detail(&format!("{}  ->  {}", step.message(), id));
                    thread::sleep(delay);
                }
                PlaybackStep::Complete { message } => output::success(message),
            }
        }
    } else {
        for step in playback {
            session.apply_step(&step);
        }
    }

    let order = session
        .view()
        .visit_rank
        .iter()
        .sorted_by_key(|(_, rank)| **rank)
        .map(|(id, _)| id)
        .join(" -> ");
    output::action(&format!("{kind} order"), &order);
    render(container, session);
    Ok(())
}

#[instrument(skip(container, session))]
fn _path(container: &ServiceContainer, session: &mut TreeSession, start: &str, end: &str) -> CliResult<()> {
    session.start_path_mode();
    session.select_node(start);
    // Selecting the start twice is ignored by the session; the path is then the node itself
    let path = session
        .select_node(end)
        .unwrap_or_else(|| domain::find_shortest_path(session.tree(), start, end));

    if path.is_empty() {
        return Err(CliError::InvalidArgs(format!(
            "no path between {start} and {end}: node not in tree"
        )));
    }

    print_status(session);
    output::action("Path", &path.join(" -> "));
    render(container, session);
    Ok(())
}

#[instrument(skip(container, session))]
fn _balance(container: &ServiceContainer, session: &mut TreeSession) -> CliResult<()> {
    session.check_balance();
    print_status(session);

    let report = domain::analyze_balance(session.tree());
    for id in &report.unbalanced {
        if let Some(node) = domain::find_node(session.tree(), id) {
            let heights = node
                .children()
                .iter()
                .map(|child| format!("{}={}", child.id, report.height(&child.id).unwrap_or(0)))
                .join(", ");
            output::failure(&format!("{} child heights: {}", node, heights));
        }
    }
    render(container, session);
    Ok(())
}

#[instrument(skip(container, session))]
fn _heap(container: &ServiceContainer, session: &mut TreeSession, write: bool) -> CliResult<()> {
    session.convert_to_heap();
    print_status(session);
    render(container, session);
    if write {
        write_back(container, session.tree())?;
    }
    Ok(())
}

#[instrument(skip(container))]
fn _find(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let node = container
        .tree_source()
        .fetch_node(id)?
        .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))?;

    output::header(&format!("Node {}", node.id));
    output::action("Label", &node.label);
    if let Some(value) = node.value {
        output::action("Value", &value);
    }
    output::action("Type", if node.is_leaf() { "leaf" } else { "internal" });
    output::action("Children", &node.children().iter().map(|c| c.id.as_str()).join(", "));
    output::action("Subtree size", &node.node_count());
    output::action("Height", &domain::subtree_height(&node));
    output::info(&node.to_tree_string());
    Ok(())
}

#[instrument(skip(container, session))]
fn _search(container: &ServiceContainer, session: &mut TreeSession, query: &str) -> CliResult<()> {
    if query.trim().is_empty() {
        return Err(CliError::InvalidArgs("empty search query".to_string()));
    }
    let results = container.tree_source().search_nodes(query)?;
    let first = results
        .first()
        .ok_or_else(|| DomainError::NodeNotFound(query.to_string()))?;

    output::header(&format!("{} match(es)", results.len()));
    for node in &results {
        output::detail(node);
    }
    session.focus_node(&first.id);
    print_status(session);
    render(container, session);
    Ok(())
}

#[instrument(skip(container, session))]
fn _set_value(
    container: &ServiceContainer,
    session: &mut TreeSession,
    id: &str,
    value: f64,
    write: bool,
) -> CliResult<()> {
    session.update_node_value(id, value)?;
    print_status(session);
    render(container, session);
    if write {
        write_back(container, session.tree())?;
    }
    Ok(())
}

#[instrument(skip(container, session))]
fn _add_child(
    container: &ServiceContainer,
    session: &mut TreeSession,
    parent: &str,
    value: Option<f64>,
    write: bool,
) -> CliResult<()> {
    let id = session.add_child(parent, value)?;
    print_status(session);
    output::action("New node", &id);
    render(container, session);
    if write {
        write_back(container, session.tree())?;
    }
    Ok(())
}

fn _export(container: &ServiceContainer, tree: &TreeNode) -> CliResult<()> {
    let path = container
        .settings
        .tree_file
        .clone()
        .unwrap_or_else(|| PathBuf::from("<sample>"));
    output::info(&to_json(tree, &path)?);
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    let project_dir = project_dir(cli)?;
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(&project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))?
            } else {
                local_config_path(&project_dir)
            };
            init_config(&path)?;
            output::success(&format!("Created {}", path.display()));
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("cannot determine global config directory"),
            }
            output::action("local", &local_config_path(&project_dir).display());
        }
    }
    Ok(())
}

fn init_config(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::Usage(format!("config already exists: {}", path.display())));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}
