use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use being_lucky::console::{Table, Terminal};
use being_lucky::game::seat_players;
use being_lucky::rng::{DiceSource, ScriptedDice, SeededDice};
use being_lucky::{init_game, play, Event, GameConfig};
use rand::{rngs::StdRng, SeedableRng};

fn write_event_log(path: &Path, events: &[Event]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for ev in events {
        serde_json::to_writer(&mut out, ev)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = GameConfig::from_env()?;
    let rules = cfg.rules();

    let mut table = Terminal::stdio(cfg.pacing(), cfg.clear_screen);
    table.welcome()?;
    let count = table.prompt_number_of_players()?;

    let mut state = init_game(seat_players(count, cfg.bot_seats, cfg.bot_level, &rules), rules)?;
    let (seeded, mut bot_rng) = match cfg.seed {
        Some(seed) => (SeededDice::new(seed), StdRng::seed_from_u64(seed ^ 0xB07)),
        None => (SeededDice::from_entropy(), StdRng::from_entropy()),
    };
    let mut dice: Box<dyn DiceSource> = match &cfg.dice_script {
        Some(path) => Box::new(ScriptedDice::from_script(&std::fs::read_to_string(path)?)?),
        None => Box::new(seeded),
    };
    let report = play(&mut state, &mut dice, &mut table, &mut bot_rng)?;

    if let Some(path) = &cfg.event_log {
        if let Err(e) = write_event_log(path, &report.events) {
            eprintln!("Failed to write event log {}: {}", path.display(), e);
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("being-lucky: {}", e);
        std::process::exit(1);
    }
}
