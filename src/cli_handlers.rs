use crate::error::{Error, Result};
use crate::graph::{Mode, Orderer, violations};
use crate::input::{self, Format};
use std::path::Path;
use tracing::warn;

/// Handle the sort command
pub fn handle_sort(file: &Path, format: Option<Format>, strict: bool, json: bool) -> Result<()> {
    let graph = input::load_graph(file, format)?;
    let mode = if strict { Mode::Strict } else { Mode::Lenient };
    let outcome = Orderer::new(&graph).sort_with(mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for (index, item) in outcome.order.iter().enumerate() {
        println!("{}:\t{item}", index + 1);
    }

    if !outcome.is_acyclic() {
        warn!(count = outcome.cycles.len(), "order ignores cyclic edges");
    }
    for cycle in &outcome.cycles {
        eprintln!("cycle: {cycle}");
    }

    Ok(())
}

/// Handle the cycles command
pub fn handle_cycles(file: &Path, format: Option<Format>) -> Result<()> {
    let graph = input::load_graph(file, format)?;
    let outcome = Orderer::new(&graph).sort();

    if outcome.is_acyclic() {
        println!("No cycles found");
        return Ok(());
    }

    for cycle in &outcome.cycles {
        println!("{cycle}");
    }

    Err(Error::CyclesFound {
        count: outcome.cycles.len(),
    })
}

/// Handle the check command
pub fn handle_check(
    file: &Path,
    order_file: &Path,
    format: Option<Format>,
    json: bool,
) -> Result<()> {
    let graph = input::load_graph(file, format)?;
    let order = input::parse_order(&input::read_source(order_file)?);
    let outcome = Orderer::new(&graph).sort();

    let found = violations(&graph, &order, &outcome.cycles);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else if found.is_empty() {
        println!("Order is valid");
    } else {
        for violation in &found {
            println!("{violation}");
        }
    }

    if found.is_empty() {
        return Ok(());
    }
    Err(Error::InvalidOrder { count: found.len() })
}
