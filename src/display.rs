//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a writer and read-only views of the world and the
//! session.  Nothing here changes game state; it only maps simulation
//! coordinates onto terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use runner_game::catalog::{self, PerkKind, Rgb};
use runner_game::compute::World;
use runner_game::entities::{EnemyKind, EntityRef, GameStatus, Rect, Viewport};
use runner_game::leaderboard::Leaderboard;
use runner_game::session::{GameStore, MAX_HEALTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_STAGE: Color = Color::Cyan;
const C_ENEMY_SMALL: Color = Color::Green;
const C_ENEMY_MEDIUM: Color = Color::DarkYellow;
const C_ENEMY_LARGE: Color = Color::Red;
const C_BOSS_SHOT: Color = Color::Magenta;
const C_BOSS: Color = Color::DarkRed;
const C_PROJECTILE: Color = Color::Cyan;
const C_PROJECTILE_POWERED: Color = Color::Yellow;
const C_SHIELD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

// ── Screen mapping ────────────────────────────────────────────────────────────

/// Terminal size in cells.  Row 0 is the HUD, row 1 the top border, the
/// second-to-last row the ground and the last row the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub cols: u16,
    pub rows: u16,
}

impl Screen {
    pub fn query() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self { cols, rows })
    }

    fn play_cols(&self) -> f32 {
        f32::from(self.cols.saturating_sub(2).max(1))
    }

    fn play_rows(&self) -> f32 {
        f32::from(self.rows.saturating_sub(4).max(1))
    }

    /// Convert a displacement in cells to simulation units.
    pub fn cells_to_world(&self, dx: f32, dy: f32, viewport: Viewport) -> (f32, f32) {
        (
            dx * viewport.width / self.play_cols(),
            dy * viewport.height / self.play_rows(),
        )
    }

    /// Cell span covered by `rect`, clipped to the play area.  Always at
    /// least one cell wide and tall when any part is visible.
    fn cells(&self, rect: &Rect, viewport: Viewport) -> Option<(u16, u16, u16, u16)> {
        let sx = self.play_cols() / viewport.width;
        let sy = self.play_rows() / viewport.height;
        let left = 1.0 + rect.x * sx;
        let top = 2.0 + rect.y * sy;
        let right = (left + rect.width * sx).max(left + 1.0);
        let bottom = (top + rect.height * sy).max(top + 1.0);

        let min_col = 1.0;
        let max_col = f32::from(self.cols.saturating_sub(1));
        let min_row = 2.0;
        let max_row = f32::from(self.rows.saturating_sub(2));

        let c0 = left.max(min_col);
        let c1 = right.min(max_col);
        let r0 = top.max(min_row);
        let r1 = bottom.min(max_row);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, c1.ceil() as u16, r0 as u16, r1.ceil() as u16))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete game frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    store: &GameStore,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;
    draw_ground(out, world, screen)?;
    draw_hud(out, store, screen)?;
    draw_entities(out, world, screen)?;
    draw_player(out, world, store, screen)?;
    draw_controls_hint(out, screen)?;

    match store.status() {
        GameStatus::Paused => draw_banner(
            out,
            screen,
            &[("║      PAUSED      ║", Color::Cyan)],
            "P - Resume  Q - Quit",
        )?,
        GameStatus::GameOver => draw_game_over(out, store, screen)?,
        GameStatus::Victory => draw_victory(out, store, screen)?,
        _ => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Full-screen top-10 table.
pub fn render_leaderboard<W: Write>(
    out: &mut W,
    leaderboard: &Leaderboard,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cx = screen.cols / 2;
    let title = "★  LEADERBOARD  ★";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.chars().count() as u16 / 2), 1))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let left = cx.saturating_sub(26);
    out.queue(cursor::MoveTo(left, 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(format!(
        "{:<4}{:<14}{:<10}{:>10}{:>12}",
        "#", "Name", "Runner", "Score", "Distance"
    )))?;

    if leaderboard.is_empty() {
        out.queue(cursor::MoveTo(left, 5))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("No runs recorded yet."))?;
    }

    for (i, entry) in leaderboard.entries().iter().enumerate() {
        let runner = catalog::character(&entry.character_id).map_or("?", |c| c.name);
        let color = if i == 0 { Color::Yellow } else { Color::White };
        out.queue(cursor::MoveTo(left, 4 + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!(
            "{:<4}{:<14.13}{:<10.9}{:>10}{:>12.0}",
            i + 1,
            entry.player_name,
            runner,
            entry.score,
            entry.distance
        )))?;
    }

    let hint = "Press any key to return";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        screen.rows.saturating_sub(2),
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border & ground ───────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.cols as usize;
    let h = screen.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Bottom bar doubling as scrolling ground.
fn draw_ground<W: Write>(out: &mut W, world: &World, screen: Screen) -> std::io::Result<()> {
    let inner = screen.cols.saturating_sub(2) as usize;
    let shift = (world.background_offset / world.viewport.width * inner as f32) as usize;
    let ground: String = (0..inner)
        .map(|i| if (i + shift) % 6 == 0 { '┴' } else { '─' })
        .collect();

    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print("└"))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print(ground))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print("┘"))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, store: &GameStore, screen: Screen) -> std::io::Result<()> {
    let state = store.state();

    // Score and distance: left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>7}  Dist:{:>6.0}m",
        state.score, state.distance
    )))?;

    // Stage (or boss) name: centre
    let centre = match (state.boss_active, store.current_boss()) {
        (true, Some(boss)) => format!(
            "[ {} {:>3}% ]",
            boss.name,
            state.boss_health.unwrap_or(0)
        ),
        _ => format!("[ {} ]", store.current_stage().map_or("???", |s| s.name)),
    };
    let color = if state.boss_active { C_BOSS } else { C_HUD_STAGE };
    let lx = (screen.cols / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&centre))?;

    // Perks + health bar: right
    let perks: String = state
        .active_perks
        .iter()
        .map(|kind| perk_glyph(*kind))
        .collect();
    let filled = (state.health.max(0) as usize * 10) / MAX_HEALTH as usize;
    let bar = format!("HP[{}{}]", "█".repeat(filled), "░".repeat(10 - filled));
    let right = format!("{} {}", perks, bar);
    let rx = screen.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    for kind in &state.active_perks {
        out.queue(style::SetForegroundColor(rgb(kind.info().color)))?;
        out.queue(Print(perk_glyph(*kind)))?;
    }
    out.queue(Print(" "))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&bar))?;

    Ok(())
}

fn perk_glyph(kind: PerkKind) -> char {
    match kind {
        PerkKind::RapidFire => 'R',
        PerkKind::DoubleShoot => 'D',
        PerkKind::Shield => 'S',
        PerkKind::PowerUp => 'P',
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    screen: Screen,
    viewport: Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = screen.cells(rect, viewport) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(usize::from(c1 - c0)).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_entities<W: Write>(out: &mut W, world: &World, screen: Screen) -> std::io::Result<()> {
    let viewport = world.viewport;
    for entity in world.registry.entities() {
        let (glyph, color) = match entity {
            EntityRef::Boss(_) => ('█', C_BOSS),
            EntityRef::Perk(perk) => (perk_glyph(perk.kind), rgb(perk.kind.info().color)),
            EntityRef::Enemy(enemy) => match enemy.kind {
                EnemyKind::Small => ('▪', C_ENEMY_SMALL),
                EnemyKind::Medium => ('▒', C_ENEMY_MEDIUM),
                EnemyKind::Large => ('▓', C_ENEMY_LARGE),
                EnemyKind::BossProjectile => ('◆', C_BOSS_SHOT),
            },
            // Powered shots keep their colour after the perk is gone
            EntityRef::Projectile(p) if p.damage > 1 => ('═', C_PROJECTILE_POWERED),
            EntityRef::Projectile(_) => ('═', C_PROJECTILE),
        };
        fill(out, screen, viewport, &entity.bounds(), glyph, color)?;
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    world: &World,
    store: &GameStore,
    screen: Screen,
) -> std::io::Result<()> {
    let color = if store.state().has_perk(PerkKind::Shield) {
        C_SHIELD
    } else {
        store
            .selected_character()
            .map_or(Color::White, |c| rgb(c.color))
    };
    let flags = world.player.flags();
    let glyph = if flags.crouching {
        '▄'
    } else if flags.dashing || flags.avoiding {
        '▶'
    } else {
        '█'
    };
    fill(out, screen, world.viewport, &world.player.hitbox(), glyph, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑ Jump  ↓ Crouch  → Dash  ← Avoid  Z Perk  P Pause  Q Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Boxed message centred on screen, followed by extra lines and a hint.
fn draw_banner<W: Write>(
    out: &mut W,
    screen: Screen,
    lines: &[(&str, Color)],
    hint: &str,
) -> std::io::Result<()> {
    let width = lines
        .first()
        .map_or(20, |(msg, _)| msg.chars().count().saturating_sub(2));
    let top = format!("╔{}╗", "═".repeat(width));
    let bottom = format!("╚{}╝", "═".repeat(width));
    let frame_color = lines.first().map_or(Color::White, |(_, c)| *c);

    let mut rows: Vec<(String, Color)> = vec![(top, frame_color)];
    rows.extend(lines.iter().map(|(msg, c)| (msg.to_string(), *c)));
    rows.push((bottom, frame_color));
    rows.push((hint.to_string(), Color::White));

    let cx = screen.cols / 2;
    let start_row = (screen.rows / 2).saturating_sub(rows.len() as u16 / 2);
    for (i, (msg, color)) in rows.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, store: &GameStore, screen: Screen) -> std::io::Result<()> {
    let state = store.state();
    let score_line = format!("║ Score: {:>9} ║", state.score);
    let dist_line = format!("║ Dist:  {:>8.0}m ║", state.distance);
    let best = store.leaderboard().best_score().unwrap_or(0);
    let best_line = if state.score > 0 && state.score >= best {
        "║  ★ NEW  BEST ★   ║".to_string()
    } else {
        format!("║ Best:  {:>9} ║", best)
    };
    draw_banner(
        out,
        screen,
        &[
            ("║    GAME  OVER    ║", Color::Red),
            (&score_line, Color::Yellow),
            (&dist_line, Color::Yellow),
            (&best_line, Color::DarkGrey),
        ],
        "R - Menu  Q - Quit",
    )
}

fn draw_victory<W: Write>(out: &mut W, store: &GameStore, screen: Screen) -> std::io::Result<()> {
    let score_line = format!("║ Score: {:>9} ║", store.state().score);
    draw_banner(
        out,
        screen,
        &[
            ("║     VICTORY!     ║", Color::Green),
            ("║ All bosses down! ║", Color::Green),
            (&score_line, Color::Yellow),
        ],
        "R - Menu  Q - Quit",
    )
}
