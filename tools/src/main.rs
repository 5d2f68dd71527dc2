//! pack-runner: headless pack selection and booster simulation.
//!
//! Usage:
//!   pack-runner select --total 200 --open 12 [--seed 12345] [--per-box 24]
//!   pack-runner simulate --catalog data/catalog/sample_catalog.json \
//!       --profile data/profiles/sample_box.json [--boxes 1] [--seed 42]
//!   pack-runner --ipc-mode
//!
//! Add --json to print the raw result instead of a summary.

use anyhow::Result;
use packlab_core::{
    catalog::CardCatalog,
    config::{parse_count, BoxProfile, OpenScope},
    engine::{run_selection, BoosterSim, SimulationReport},
    seed::SeedInput,
    selector::Selection,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Select {
        total_packs: serde_json::Value,
        open_packs: serde_json::Value,
        #[serde(default)]
        seed: Option<SeedInput>,
        #[serde(default)]
        packs_per_box: Option<u32>,
    },
    Simulate {
        catalog: CardCatalog,
        profile: BoxProfile,
        #[serde(default)]
        open: Option<OpenScope>,
        #[serde(default)]
        seed: Option<SeedInput>,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--ipc-mode") {
        return run_ipc_loop();
    }

    let json = args.iter().any(|a| a == "--json");
    let seed = parse_str(&args, "--seed").map(SeedInput::from);

    match args.get(1).map(String::as_str) {
        Some("select") => {
            let total = parse_count("total_packs", parse_str(&args, "--total").unwrap_or(""))?;
            let open = parse_count("open_packs", parse_str(&args, "--open").unwrap_or(""))?;
            let selection = run_selection(total, open, seed.as_ref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&selection)?);
            } else {
                print_selection(&selection, parse_arg(&args, "--per-box", 0u32))?;
            }
        }
        Some("simulate") => {
            let catalog_path = parse_str(&args, "--catalog").unwrap_or("./data/catalog/sample_catalog.json");
            let profile_path = parse_str(&args, "--profile").unwrap_or("./data/profiles/sample_box.json");
            let catalog = CardCatalog::load(catalog_path)?;
            let mut profile = BoxProfile::load(profile_path)?;
            if let Some(scope) = open_scope(&args) {
                profile.simulation = profile.simulation.opening(scope)?;
            }

            let sim = BoosterSim::from_input(seed.as_ref());
            let report = sim.run(&catalog, &profile)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        _ => {
            eprintln!("usage: pack-runner <select|simulate> [options] | --ipc-mode");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn run_ipc_loop() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, e)?;
                continue;
            }
        };

        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Select { total_packs, open_packs, seed, packs_per_box } => {
                handle_select(&total_packs, &open_packs, seed.as_ref(), packs_per_box)
            }
            IpcCommand::Simulate { catalog, profile, open, seed } => {
                handle_simulate(&catalog, profile, open, seed.as_ref())
            }
        };

        match response {
            Ok(value) => writeln!(stdout, "{value}")?,
            Err(e) => write_error(&mut stdout, e)?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn handle_select(
    total_packs: &serde_json::Value,
    open_packs: &serde_json::Value,
    seed: Option<&SeedInput>,
    packs_per_box: Option<u32>,
) -> Result<serde_json::Value> {
    let total = parse_count("total_packs", &json_scalar(total_packs))?;
    let open = parse_count("open_packs", &json_scalar(open_packs))?;
    let selection = run_selection(total, open, seed)?;
    let mut value = serde_json::to_value(&selection)?;
    if let Some(per_box) = packs_per_box {
        value["locations"] = serde_json::to_value(selection.locate(per_box)?)?;
    }
    Ok(value)
}

fn handle_simulate(
    catalog: &CardCatalog,
    mut profile: BoxProfile,
    open: Option<OpenScope>,
    seed: Option<&SeedInput>,
) -> Result<serde_json::Value> {
    if let Some(scope) = open {
        profile.simulation = profile.simulation.opening(scope)?;
    }
    let report = BoosterSim::from_input(seed).run(catalog, &profile)?;
    Ok(serde_json::to_value(&report)?)
}

/// Form fields arrive as numbers or strings; both go through the same
/// count parser so "abc" and "" are rejected the same way.
fn json_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_error(out: &mut impl Write, e: impl std::fmt::Display) -> Result<()> {
    let err_json = serde_json::json!({ "error": e.to_string() });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn print_selection(selection: &Selection, packs_per_box: u32) -> Result<()> {
    println!("=== PACK SELECTION ===");
    println!("  seed:     {}", selection.seed_used);
    println!("  opened:   {}", selection.selected.len());
    println!("  packs:    {:?}", selection.selected);
    if packs_per_box > 0 {
        println!();
        for spot in selection.locate(packs_per_box)? {
            println!("  pack {:>4} -> box {:>3}, slot {:>3}", spot.pack, spot.box_number, spot.slot);
        }
    }
    Ok(())
}

fn print_report(report: &SimulationReport<'_>) {
    let config = &report.config;
    println!("=== SIMULATION: {} ===", report.profile);
    println!("  seed:            {}", report.seed);
    println!(
        "  layout:          {} cards/pack, {} packs/box, {} boxes/case",
        config.cards_per_pack, config.packs_per_box, config.boxes_per_case
    );
    println!("  packs opened:    {}", report.summary.pack_count);
    println!("  tiers:           {:?}", report.tiers);
    println!("  card pool size:  {}", report.card_pool_size);
    println!("  rare pool:       {}", report.rare_pool_size);
    println!("  filler pool:     {}", report.filler_pool_size);

    println!();
    println!("=== TIER SHARES ===");
    for c in &report.contributions {
        println!(
            "  {:<6} 1 per {:>5} packs | {:>4}/{:<4} entries",
            c.rarity, c.denominator, c.drawn, c.requested
        );
    }

    println!();
    println!("=== PULLS BY RARITY ===");
    for r in &report.summary.by_rarity {
        println!("  {:<6} {:>6}", r.rarity, r.count);
    }

    println!();
    println!("=== TOP CARDS ===");
    for c in report.summary.by_card.iter().take(10) {
        let name = c.name.as_deref().unwrap_or("-");
        println!("  {:>4}x {:<12} [{}] {}", c.count, c.id, c.rarity, name);
    }

    if !report.warnings.is_empty() {
        println!();
        println!("=== WARNINGS ===");
        for w in &report.warnings {
            println!("  {w}");
        }
    }
}

fn open_scope(args: &[String]) -> Option<OpenScope> {
    if let Some(n) = parse_opt::<u32>(args, "--cases") {
        Some(OpenScope::Cases(n))
    } else if let Some(n) = parse_opt::<u32>(args, "--boxes") {
        Some(OpenScope::Boxes(n))
    } else {
        parse_opt::<u32>(args, "--packs").map(OpenScope::Packs)
    }
}

fn parse_str<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_opt<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    parse_str(args, flag).and_then(|v| v.parse().ok())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt(args, flag).unwrap_or(default)
}
