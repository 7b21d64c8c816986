use anyhow::Context;
use pegdeck_core::{ActivationKind, EventBus, RunState};
use pegdeck_data::{
    default_save_path, load_catalog_with_config, load_loadout_config, load_slot_file,
    save_slot_file,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

const HELP: &str = "\
commands:
  cards                 list the catalog
  inv                   owned stacks and picked loadout
  add <id> / remove <id>
  pick <id> / unpick <id>
  draw [alt]            grant a random card
  energy <n>            set the energy limit
  start | restart       enter the current level
  advance               leave the level forward
  effects               active modifiers
  shot                  fire a shot (spends the infusion)
  breaker | mirror | life | rescue
                        spend one charge
  newrun
  save [path] / load [path]
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    seed: u64,
    assets: PathBuf,
    save: Option<PathBuf>,
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut seed = DEFAULT_RUN_SEED;
    let mut assets = PathBuf::from("assets");
    let mut save = None;
    let mut verbose = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().unwrap_or(seed);
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--save" => {
                if let Some(value) = args.get(idx + 1) {
                    save = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--verbose" | "-v" => verbose = true,
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        seed,
        assets,
        save,
        verbose,
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_run(options: &CliOptions) -> anyhow::Result<RunState> {
    let config = load_loadout_config(&options.assets)?;
    let catalog = load_catalog_with_config(&options.assets, &config)?;
    tracing::info!(cards = catalog.len(), assets = %options.assets.display(), "catalog loaded");
    Ok(RunState::new(Arc::new(catalog), config, options.seed))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    init_tracing(options.verbose);

    let mut run = build_run(&options).context("load run")?;
    let mut events = EventBus::default();
    let stdin = io::stdin();
    let mut out = io::stdout();
    writeln!(out, "pegdeck, seed {} (type 'help')", options.seed)?;
    loop {
        write!(out, "level {}> ", run.current_level())?;
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let flow = match execute_command(&mut run, &options, line.trim(), &mut events, &mut out) {
            Ok(flow) => flow,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                Flow::Continue
            }
        };
        for event in events.drain() {
            tracing::debug!(?event, "event");
        }
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn save_path(options: &CliOptions, args: &[&str]) -> anyhow::Result<PathBuf> {
    if let Some(path) = args.first() {
        return Ok(PathBuf::from(*path));
    }
    options
        .save
        .clone()
        .or_else(default_save_path)
        .context("no save path: pass one or set PEGDECK_SAVE")
}

fn execute_command(
    run: &mut RunState,
    options: &CliOptions,
    line: &str,
    events: &mut EventBus,
    out: &mut impl Write,
) -> anyhow::Result<Flow> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Flow::Continue);
    };
    let args: Vec<&str> = parts.collect();
    let target = || args.first().copied().context("missing card id");
    match command {
        "help" | "h" | "?" => writeln!(out, "{HELP}")?,
        "quit" | "exit" | "q" => return Ok(Flow::Quit),
        "cards" => {
            for card in run.catalog.iter() {
                writeln!(
                    out,
                    "{:<16} {:<18} {:?} cost {} {}{}",
                    card.id,
                    card.display_name,
                    card.rarity,
                    card.energy_cost,
                    card.effect_key,
                    if card.stackable {
                        format!(" (stacks to {})", card.max_stacks)
                    } else {
                        String::new()
                    }
                )?;
            }
        }
        "inv" | "inventory" => print_inventory(run, out)?,
        "add" => {
            run.add_card(target()?, events)?;
            print_inventory(run, out)?;
        }
        "remove" => {
            run.remove_card(target()?, events)?;
            print_inventory(run, out)?;
        }
        "pick" => {
            run.pick(target()?, events)?;
            print_inventory(run, out)?;
        }
        "unpick" => {
            let id = target()?;
            if !run.unpick(id, events) {
                writeln!(out, "{id} is not picked")?;
            }
            print_inventory(run, out)?;
        }
        "draw" => {
            let alternate = args.first().map_or(false, |arg| *arg == "alt");
            let id = run.grant_random_card(alternate, events)?;
            writeln!(out, "drew {id}")?;
        }
        "energy" => {
            let limit: u32 = target()?.parse().context("energy limit must be a number")?;
            run.inventory.set_energy_limit(limit, events);
            print_inventory(run, out)?;
        }
        "start" | "restart" => {
            let kind = if command == "start" {
                run.start_level(events)
            } else {
                run.restart_level(events)
            };
            match kind {
                ActivationKind::Resumed => writeln!(out, "resumed level {}", run.current_level())?,
                ActivationKind::Fresh(report) => {
                    writeln!(
                        out,
                        "level {} locked in, paid {}/{} cards",
                        run.current_level(),
                        report.consumed,
                        report.requested
                    )?;
                    for (id, missing) in &report.shortfalls {
                        writeln!(out, "  short {missing} x {id}")?;
                    }
                }
            }
            print_effects(run, out)?;
        }
        "advance" | "next" => {
            run.advance_level(events);
            writeln!(out, "now at level {}", run.current_level())?;
        }
        "effects" | "fx" => print_effects(run, out)?,
        "shot" => {
            match run.effects.infusion() {
                Some(infusion) => writeln!(out, "shot infused with {infusion:?}")?,
                None => writeln!(out, "plain shot")?,
            }
            run.effects.after_first_shot_applied();
        }
        "breaker" => report_charge(out, "stone breaker", run.effects.try_consume_stone_breaker())?,
        "mirror" => report_charge(out, "mirror shot", run.effects.try_consume_mirror_shot())?,
        "life" => report_charge(out, "bonus life", run.effects.try_consume_bonus_life())?,
        "rescue" => report_charge(out, "rescue", run.effects.try_consume_rescue())?,
        "newrun" => {
            run.new_run(events);
            writeln!(out, "new run started")?;
        }
        "save" => {
            let path = save_path(options, &args)?;
            save_slot_file(&run.to_save(), run.rng.seed(), &path)?;
            writeln!(out, "saved to {}", path.display())?;
        }
        "load" => {
            let path = save_path(options, &args)?;
            *run = load_run(&*run, &path)?;
            writeln!(out, "loaded {}", path.display())?;
            print_inventory(run, out)?;
        }
        other => writeln!(out, "unknown command '{other}' (type 'help')")?,
    }
    Ok(Flow::Continue)
}

fn load_run(run: &RunState, path: &Path) -> anyhow::Result<RunState> {
    let saved = load_slot_file(path)?;
    Ok(RunState::from_save(
        Arc::clone(&run.catalog),
        run.config.clone(),
        &saved.slot,
        saved.seed,
    ))
}

fn report_charge(out: &mut impl Write, label: &str, spent: bool) -> io::Result<()> {
    if spent {
        writeln!(out, "{label} used")
    } else {
        writeln!(out, "no {label} left")
    }
}

fn print_inventory(run: &RunState, out: &mut impl Write) -> io::Result<()> {
    let inv = &run.inventory;
    writeln!(out, "owned:")?;
    if inv.stacks().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for stack in inv.stacks() {
        writeln!(out, "  {} x{}", stack.card.id, stack.count)?;
    }
    writeln!(
        out,
        "picked ({}/{} energy):",
        inv.energy_used(),
        inv.energy_limit()
    )?;
    for card in inv.picked() {
        writeln!(
            out,
            "  {} (cost {}, available {})",
            card.id,
            card.energy_cost,
            inv.displayed_available_count(&card.id)
        )?;
    }
    Ok(())
}

fn print_effects(run: &RunState, out: &mut impl Write) -> io::Result<()> {
    let fx = &run.effects;
    let active = run.ledger.active_ids();
    writeln!(
        out,
        "active: {}",
        if active.is_empty() {
            "(none)".to_string()
        } else {
            active.join(", ")
        }
    )?;
    writeln!(
        out,
        "infusion {:?}, breakers {}, lives {}, mirrors {}",
        fx.infusion(),
        fx.stone_breaker_charges(),
        fx.bonus_lives(),
        fx.mirror_shots()
    )?;
    writeln!(
        out,
        "score x{:.2}, speed x{:.2}, rescue {}, recharge {}",
        fx.score_multiplier(),
        fx.shot_speed_multiplier(),
        fx.has_rescue(),
        fx.has_recharge()
    )
}
