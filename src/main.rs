mod display;

use std::fs::{self, OpenOptions};
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use runner_game::catalog::{self, Character, CHARACTERS};
use runner_game::compute::{handle_intents, init_world, tick};
use runner_game::config::GameConfig;
use runner_game::entities::GameStatus;
use runner_game::input::{Intent, IntentSource};
use runner_game::leaderboard::SaveData;
use runner_game::scheduler::TickDriver;
use runner_game::session::GameStore;

use display::Screen;

/// Render cadence.  Simulation ticks are paced separately by `TickDriver`.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "runner_game", about = "Side-scrolling arcade runner for the terminal")]
struct Cli {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name recorded on the leaderboard.
    #[arg(long)]
    name: Option<String>,
    /// Default character id for quick start.
    #[arg(long)]
    character: Option<String>,
    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Save file location.
    #[arg(long)]
    save: Option<PathBuf>,
    /// Log file location.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("runner_game"))
}

/// Logs go to a file because the terminal belongs to the game screen.
fn init_logging(path: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path.or_else(|| data_dir().map(|dir| dir.join("runner.log"))) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(name) = &cli.name {
        config.player_name = Some(name.clone());
    }
    if let Some(character) = &cli.character {
        config.character_id = character.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(save) = &cli.save {
        config.save_path = Some(save.clone());
    }
    Ok(config.validate()?)
}

fn persist(store: &GameStore, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = store.save_data().save_to(path) {
        warn!("Could not save leaderboard: {}", e);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(&'static Character),
    Leaderboard,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &GameStore,
    config: &GameConfig,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  KITCHEN  RUNNER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(8),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if let Some(best) = store.leaderboard().best_score() {
        let hs_str = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(7),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    let left = cx.saturating_sub(24);
    out.queue(cursor::MoveTo(left, cy.saturating_sub(5)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("Choose your runner, {}:", store.player_name())))?;

    for (i, character) in CHARACTERS.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        let c = character.color;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(Color::Rgb { r: c.0, g: c.1, b: c.2 }))?;
        out.queue(Print(format!("{:<8}", character.name)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(
            " SPD {} PWR {} DEF {}  {}",
            character.stats.speed,
            character.stats.power,
            character.stats.defense,
            character.description
        )))?;
    }

    out.queue(cursor::MoveTo(left, cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Perks (press Z near one to grab it):"))?;
    for (i, perk) in catalog::PERKS.iter().enumerate() {
        let c = perk.color;
        out.queue(cursor::MoveTo(left, cy + 3 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::Rgb { r: c.0, g: c.1, b: c.2 }))?;
        out.queue(Print(format!("{:<12}", perk.name)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(perk.description))?;
    }

    out.queue(cursor::MoveTo(left, cy + 8))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("ENTER : Quick start   L : Leaderboard   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Wait for a menu key
    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(MenuResult::Quit), // input thread is gone
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event {
            match code {
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if let Some(character) = CHARACTERS.get(index) {
                        return Ok(MenuResult::Start(character));
                    }
                }
                KeyCode::Enter => {
                    if let Some(character) = catalog::character(&config.character_id) {
                        return Ok(MenuResult::Start(character));
                    }
                }
                KeyCode::Char('l') | KeyCode::Char('L') => return Ok(MenuResult::Leaderboard),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

fn wait_for_key(rx: &mpsc::Receiver<Event>) {
    while let Ok(event) = rx.recv() {
        if let Event::Key(KeyEvent { kind: KeyEventKind::Press, .. }) = event {
            return;
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn intent_for_key(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::Right),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char(' ') => Some(Intent::Action),
        _ => None,
    }
}

/// Plays one run.  `Ok(true)` means quit the program, `Ok(false)` means
/// back to the menu.
///
/// Input never touches the simulation directly: keys and mouse drags become
/// intents, the intents are sampled once per frame, and the tick driver
/// decides how many simulation steps the elapsed time is worth.
fn game_loop<W: Write>(
    out: &mut W,
    store: &mut GameStore,
    config: &GameConfig,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let clock = Instant::now();
    let mut world = init_world(config.viewport());
    let mut intents = IntentSource::new();
    let mut driver = TickDriver::new(config.tick_rate);
    let mut drag_start: Option<(u16, u16)> = None;
    let mut last_now = Duration::ZERO;

    store.start_game();

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed();
        let screen = Screen::query()?;

        // ── Input: keys and drags become intents ──────────────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            if !store.pause_game() {
                                store.resume_game();
                            }
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if store.status().is_terminal() => {
                            return Ok(false);
                        }
                        _ => {
                            if let Some(intent) = intent_for_key(code) {
                                intents.trigger(intent, now);
                            }
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Down(MouseButton::Left) => drag_start = Some((column, row)),
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some((c0, r0)) = drag_start.take() {
                            let dx = f32::from(column) - f32::from(c0);
                            let dy = f32::from(row) - f32::from(r0);
                            let (wx, wy) = screen.cells_to_world(dx, dy, world.viewport);
                            intents.trigger(Intent::from_swipe(wx, wy).unwrap_or(Intent::Action), now);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // ── Intents, deferred player actions, then simulation ─────────────────
        let snapshot = intents.snapshot(now);
        handle_intents(&mut world, store, snapshot, now);
        world.player.update(now);

        driver.sync(store.status());
        let due = driver.advance(now.saturating_sub(last_now));
        last_now = now;
        for _ in 0..due {
            tick(&mut world, store, now, rng);
            if store.status() != GameStatus::Playing {
                driver.stop();
                break;
            }
        }

        display::render(out, &world, store, screen)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.clone())?;
    let config = load_config(&cli).context("loading configuration")?;
    info!("Starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Blocking terminal reads happen on their own thread; the menu and the
    // game loop only ever see the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config);

    // Restore the terminal even when the run failed
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> anyhow::Result<()> {
    let save_path = config.save_path.clone().or_else(SaveData::default_path);
    let save = save_path
        .as_deref()
        .map(SaveData::load_or_default)
        .unwrap_or_default();
    let mut store = GameStore::from_save(save);
    if let Some(name) = &config.player_name {
        store.set_player_name(name);
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        match show_menu(out, rx, &store, config)? {
            MenuResult::Quit => break,
            MenuResult::Leaderboard => {
                display::render_leaderboard(out, store.leaderboard(), Screen::query()?)?;
                wait_for_key(rx);
            }
            MenuResult::Start(character) => {
                store.select_character(character);
                let quit = game_loop(out, &mut store, config, &mut rng, rx)?;

                // Only finished runs add entries, so this is a no-op after
                // an abandoned game.
                persist(&store, save_path.as_deref());
                store.reset_game();

                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
