//! Demo binary: reads JSON placement scenarios from a directory and prints
//! the assignment `solve` produces for each.

use std::{env, fs, path::Path};

use serde::Deserialize;

use placement_solver::{Engine, FilterProperties, Host, SolverSchedulerConfig};

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    config: SolverSchedulerConfig,
    hosts: Vec<Host>,
    filter_properties: FilterProperties,
}

fn run_scenario(path: &Path) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{}: could not read file: {e}", path.display());
            return;
        }
    };
    let scenario: Scenario = match serde_json::from_str(&text) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::warn!("{}: could not parse scenario: {e}", path.display());
            return;
        }
    };

    let engine = match Engine::new(scenario.config) {
        Ok(engine) => engine,
        Err(e) => {
            log::warn!("{}: could not build engine: {e}", path.display());
            return;
        }
    };

    let mut hosts = scenario.hosts;
    match engine.solve(&mut hosts, &scenario.filter_properties) {
        Ok(assignments) if assignments.is_empty() => {
            println!("{}: infeasible, no assignment found", path.display());
        }
        Ok(assignments) => {
            println!("{}:", path.display());
            for (host, instance_id) in assignments {
                println!("  {} -> {}", instance_id, host.host);
            }
        }
        Err(e) => {
            println!("{}: solve failed: {e}", path.display());
        }
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let dir = env::args().nth(1).unwrap_or_else(|| "scenarios".to_string());
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("could not read scenario directory '{dir}': {e}");
            std::process::exit(1);
        }
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            run_scenario(&path);
        }
    }
}
