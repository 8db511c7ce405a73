//! Boresite command line front end.
//!
//! # Responsibility
//! - Drive the core state facade from shell commands.
//! - Own the UI-side concerns: id lookup, numeric parsing, CSV export.

mod cli;
mod export;

use anyhow::{anyhow, bail, Context, Result};
use boresite_core::{
    core_version, init_logging, ping, AppConfig, AppState, Borehole, BoreholeFilter,
    BoreholePatch, BoreholeStatus, FileBlobStorage, NewBorehole, NewProject, Project, ProjectFilter,
    ProjectId, ProjectPatch, ProjectStatus,
};
use clap::Parser;
use cli::{BoreholeCommand, Cli, Command, ProjectCommand};
use std::fs::File;
use std::io::{self, BufWriter};

type State = AppState<FileBlobStorage>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Ping => {
            println!("boresite_core ping={}", ping());
            return Ok(());
        }
        Command::Version => {
            println!("boresite_core version={}", core_version());
            return Ok(());
        }
        _ => {}
    }

    let mut config = AppConfig::from_env();
    if let Some(data_dir) = &cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    init_logging(&config.log_level, &config.log_dir).map_err(|err| anyhow!(err))?;

    let storage = FileBlobStorage::open(&config.data_dir)
        .with_context(|| format!("failed to open data dir {}", config.data_dir.display()))?;
    let mut state = AppState::with_storage(storage);
    state.initialize();
    ensure_ok(&mut state)?;

    match cli.command {
        Command::Ping | Command::Version => Ok(()),
        Command::Projects(command) => run_project_command(&mut state, command),
        Command::Boreholes(command) => run_borehole_command(&mut state, command),
        Command::Export(args) => {
            let project = load_project(&mut state, &args.project)?;
            match args.output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::write_boreholes_csv(&project.boreholes, BufWriter::new(file))?;
                    println!(
                        "Exported {} borehole(s) to {}",
                        project.boreholes.len(),
                        path.display()
                    );
                }
                None => export::write_boreholes_csv(&project.boreholes, io::stdout().lock())?,
            }
            Ok(())
        }
    }
}

fn run_project_command(state: &mut State, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List(args) => {
            let status = args.status.as_deref().map(parse_project_status).transpose()?;
            let filter = ProjectFilter {
                status,
                text: args.search,
            };
            for project in state.filtered_projects(&filter) {
                print_project(project);
            }
        }
        ProjectCommand::Create(args) => {
            let input = NewProject {
                client: args.client,
                location_description: args.location,
                ..NewProject::named(args.name)
            };
            let project = state.create_project(input);
            ensure_ok(state)?;
            if let Some(project) = project {
                print_project(&project);
            }
        }
        ProjectCommand::Archive { project } => {
            set_project_status(state, &project, ProjectStatus::Archived)?
        }
        ProjectCommand::Activate { project } => {
            set_project_status(state, &project, ProjectStatus::Active)?
        }
        ProjectCommand::Delete { project } => {
            let id = resolve_project_id(state, &project)?;
            let removed = state.delete_project(id);
            ensure_ok(state)?;
            if !removed {
                bail!("project not found: {project}");
            }
            println!("Deleted project {id}");
        }
    }
    Ok(())
}

fn run_borehole_command(state: &mut State, command: BoreholeCommand) -> Result<()> {
    match command {
        BoreholeCommand::List { project, status } => {
            load_project(state, &project)?;
            let status = status.as_deref().map(parse_borehole_status).transpose()?;
            let filter = BoreholeFilter { status, text: None };
            for borehole in state.filtered_boreholes(&filter) {
                print_borehole(borehole);
            }
        }
        BoreholeCommand::Add(args) => {
            let project = load_project(state, &args.project)?;
            let input = NewBorehole {
                latitude: args.lat,
                longitude: args.lng,
                code: args.code,
                name: args.name,
                notes: args.notes,
                ground_level: parse_optional_number("ground-level", args.ground_level)?,
                total_depth: parse_optional_number("total-depth", args.total_depth)?,
                status: None,
            };
            let created = state.add_borehole(project.id, input);
            ensure_ok(state)?;
            let borehole = created.ok_or_else(|| anyhow!("project not found: {}", project.id))?;
            print_borehole(&borehole);
        }
        BoreholeCommand::SetStatus {
            project,
            borehole,
            status,
        } => {
            let project = load_project(state, &project)?;
            let borehole_id = resolve_borehole(&project, &borehole)?.id;
            let patch = BoreholePatch::status(parse_borehole_status(&status)?);
            let updated = state.update_borehole(project.id, borehole_id, &patch);
            ensure_ok(state)?;
            let borehole = updated.ok_or_else(|| anyhow!("borehole not found: {borehole}"))?;
            print_borehole(&borehole);
        }
        BoreholeCommand::Delete { project, borehole } => {
            let project = load_project(state, &project)?;
            let target = resolve_borehole(&project, &borehole)?.clone();
            let removed = state.delete_borehole(project.id, target.id);
            ensure_ok(state)?;
            if !removed {
                bail!("borehole not found: {borehole}");
            }
            println!("Deleted borehole {} ({})", target.code, target.id);
        }
    }
    Ok(())
}

fn set_project_status(state: &mut State, project: &str, status: ProjectStatus) -> Result<()> {
    let id = resolve_project_id(state, project)?;
    let updated = state.update_project(id, &ProjectPatch::status(status));
    ensure_ok(state)?;
    let project = updated.ok_or_else(|| anyhow!("project not found: {project}"))?;
    print_project(&project);
    Ok(())
}

/// Converts the facade's error slot into a command failure.
fn ensure_ok(state: &mut State) -> Result<()> {
    if let Some(message) = state.error().map(str::to_string) {
        state.clear_error();
        bail!(message);
    }
    Ok(())
}

/// Accepts a full project id or a unique id prefix.
fn resolve_project_id(state: &State, needle: &str) -> Result<ProjectId> {
    let needle = needle.trim().to_ascii_lowercase();
    let matches: Vec<ProjectId> = state
        .projects()
        .iter()
        .map(|project| project.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("project not found: {needle}"),
        _ => bail!("project id prefix `{needle}` is ambiguous"),
    }
}

fn load_project(state: &mut State, needle: &str) -> Result<Project> {
    let id = resolve_project_id(state, needle)?;
    state.load_project(id);
    state
        .current_project()
        .project()
        .cloned()
        .ok_or_else(|| anyhow!("project not found: {id}"))
}

/// Accepts a borehole code or a unique id prefix.
fn resolve_borehole<'a>(project: &'a Project, needle: &str) -> Result<&'a Borehole> {
    let needle = needle.trim();
    let by_code: Vec<&Borehole> = project
        .boreholes
        .iter()
        .filter(|borehole| borehole.code.eq_ignore_ascii_case(needle))
        .collect();
    if let [borehole] = by_code.as_slice() {
        return Ok(borehole);
    }
    if by_code.len() > 1 {
        bail!("borehole code `{needle}` is used more than once; pass the id instead");
    }

    let lowered = needle.to_ascii_lowercase();
    let by_id: Vec<&Borehole> = project
        .boreholes
        .iter()
        .filter(|borehole| borehole.id.to_string().starts_with(&lowered))
        .collect();
    match by_id.as_slice() {
        [borehole] => Ok(borehole),
        [] => bail!("borehole not found: {needle}"),
        _ => bail!("borehole id prefix `{needle}` is ambiguous"),
    }
}

fn parse_project_status(value: &str) -> Result<ProjectStatus> {
    ProjectStatus::parse(value).ok_or_else(|| anyhow!("unknown project status `{value}`"))
}

fn parse_borehole_status(value: &str) -> Result<BoreholeStatus> {
    BoreholeStatus::parse(value).ok_or_else(|| anyhow!("unknown borehole status `{value}`"))
}

/// Empty input means "not measured".
fn parse_optional_number(field: &str, value: Option<String>) -> Result<Option<f64>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .with_context(|| format!("invalid number for --{field}: `{text}`")),
    }
}

fn print_project(project: &Project) {
    println!(
        "{}  {:<32} {:<8} boreholes={} client={}",
        project.id,
        project.name,
        project.status.as_str(),
        project.boreholes.len(),
        project.client.as_deref().unwrap_or("-")
    );
}

fn print_borehole(borehole: &Borehole) {
    let depth = borehole
        .total_depth
        .map(|depth| format!("{depth}m"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  {:<8} {:<10} ({:.5}, {:.5}) depth={}",
        borehole.id,
        borehole.code,
        borehole.status.as_str(),
        borehole.latitude,
        borehole.longitude,
        depth
    );
}
