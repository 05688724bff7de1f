use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use eo_data::{DropRow, Formulas, ItemDatabase, ItemDefinition, NpcDatabase, NpcDefId, NpcDefinition, WorldConfig};
use eoworld::game::resources::{load_map_file, GameData, MapList};
use eoworld::GameWorld;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use std::collections::HashMap;

const MAX_MAP_DIMENSION: u32 = 512;

fn load_config(path: &Path) -> Result<WorldConfig> {
    if !path.exists() {
        warn!("no config file at {}, running with defaults", path.display());
        return Ok(WorldConfig::default());
    }
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_json<T: serde::de::DeserializeOwned + Default>(path: &Path, what: &str) -> Result<T> {
    if !path.exists() {
        warn!("no {what} file at {}, starting empty", path.display());
        return Ok(T::default());
    }
    let text = fs::read_to_string(path).with_context(|| format!("reading {what} {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {what} {}", path.display()))
}

fn load_game_data(data_dir: &Path, config: WorldConfig) -> Result<GameData> {
    let items: Vec<ItemDefinition> = load_json(&data_dir.join("items.json"), "item table")?;
    let npcs: Vec<NpcDefinition> = load_json(&data_dir.join("npcs.json"), "npc table")?;
    let drops: HashMap<NpcDefId, Vec<DropRow>> = load_json(&data_dir.join("drops.json"), "drop table")?;
    let formula_sources: HashMap<String, String> = load_json(&data_dir.join("formulas.json"), "formula table")?;

    Ok(GameData::new(
        ItemDatabase::new(items),
        NpcDatabase::new(npcs),
        eo_data::DropTable::new(drops),
        Formulas::new(formula_sources),
        config,
    ))
}

fn load_maps(data_dir: &Path, config: &WorldConfig) -> MapList {
    let mut maps = MapList::new();
    let map_dir = data_dir.join(&config.map_dir);
    for &map_id in &config.maps {
        let path = map_dir.join(format!("{map_id}.emf"));
        match load_map_file(&path, map_id, MAX_MAP_DIMENSION) {
            Ok(emf) => {
                info!("loaded map {map_id} from {}", path.display());
                maps.install(map_id, Some(&emf));
            }
            Err(error) => {
                warn!("{error}");
                maps.install(map_id, None);
            }
        }
    }
    maps
}

fn main() -> Result<()> {
    TermLogger::init(LevelFilter::Info, LogConfig::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .context("initializing logger")?;

    let command = Command::new("eoworld")
        .about("Standalone world simulation core")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory containing config.json, items.json, npcs.json, drops.json, formulas.json and the map directory")
                .takes_value(true)
                .default_value("data"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the world's deterministic RNG")
                .takes_value(true),
        );
    let matches = command.get_matches();

    let data_dir = PathBuf::from(matches.get_one::<String>("data-dir").unwrap());
    let seed = matches
        .get_one::<String>("seed")
        .map(|value| value.parse::<u64>().context("parsing --seed as u64"))
        .transpose()?
        .unwrap_or(0);

    let started_load = Instant::now();
    let config = load_config(&data_dir.join("config.json"))?;
    let game_data = load_game_data(&data_dir, config.clone())?;
    let maps = load_maps(&data_dir, &config);
    info!("time taken to read game data: {:?}", started_load.elapsed());

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            if std::io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
                let _ = shutdown_tx.send(());
                return;
            }
            if line.trim().eq_ignore_ascii_case("quit") {
                let _ = shutdown_tx.send(());
                return;
            }
        }
    });

    GameWorld::new(shutdown_rx).run(game_data, maps, seed);
    Ok(())
}
