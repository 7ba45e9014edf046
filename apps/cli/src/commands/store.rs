//! Store commands.

use std::io::{BufRead, Write};

use stocktally_core::StoreId;
use tracing::info;

use crate::cli::StoresCommand;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::render;
use crate::session::Session;

pub fn execute<R: BufRead, W: Write>(
    command: StoresCommand,
    session: &mut Session,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    match command {
        StoresCommand::List => list(session, console),
        StoresCommand::Add { name } => add(session, console, &name),
        StoresCommand::Rename { id, name } => rename(session, console, &StoreId::new(id), &name),
        StoresCommand::Delete { id, yes } => delete(session, console, &StoreId::new(id), yes),
        StoresCommand::Select { id } => select(session, console, StoreId::new(id)),
    }
}

fn list<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> CliResult<()> {
    let stores = session.state.stores();
    if stores.is_empty() {
        console.line("No stores yet.")?;
        return Ok(());
    }

    let selected = session.state.selected_store_id();
    let mut table = render::table(&["", "Name", "Id"]);
    for store in stores {
        let marker = if selected == Some(&store.id) { "*" } else { "" };
        table.add_row(vec![
            comfy_table::Cell::new(marker),
            comfy_table::Cell::new(&store.name),
            render::dim_cell(&store.id),
        ]);
    }
    console.line(table)?;
    Ok(())
}

fn add<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    name: &str,
) -> CliResult<()> {
    let id = session
        .state
        .add_store(name)
        .ok_or_else(|| CliError::Validation("Store name is required".to_string()))?;

    info!(store_id = %id, "Store added");
    console.line(format!("Added store {} ({id})", name.trim()))?;
    Ok(())
}

fn rename<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    id: &StoreId,
    name: &str,
) -> CliResult<()> {
    let current = session
        .state
        .store(id)
        .ok_or_else(|| CliError::not_found("Store", id.as_str()))?;

    let name = name.trim();
    if name.is_empty() || name == current.name {
        console.line("Nothing to rename.")?;
        return Ok(());
    }

    session.state.rename_store(id, name);
    console.line(format!("Renamed store to {name}"))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    id: &StoreId,
    yes: bool,
) -> CliResult<()> {
    let name = session
        .state
        .store(id)
        .map(|store| store.name.clone())
        .ok_or_else(|| CliError::not_found("Store", id.as_str()))?;

    if !yes && !console.confirm("Delete store and its data?")? {
        console.line("Cancelled.")?;
        return Ok(());
    }

    session.state.delete_store(id);
    info!(store_id = %id, "Store deleted");
    console.line(format!("Deleted store {name}"))?;

    match session.state.selected_store() {
        Some(store) => console.line(format!("Selected store: {}", store.name))?,
        None => console.line("No stores left.")?,
    }
    Ok(())
}

fn select<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    id: StoreId,
) -> CliResult<()> {
    let name = session
        .state
        .store(&id)
        .map(|store| store.name.clone())
        .ok_or_else(|| CliError::not_found("Store", id.as_str()))?;

    session.state.select_store(id);
    console.line(format!("Selected store: {name}"))?;
    Ok(())
}
