/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Glyph)
///   2. Compare each glyph with `back` buffer (previous frame)
///   3. Only emit terminal commands for glyphs that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Reads the world only through `&WorldState`; never mutates it.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use super::input::InputState;
use crate::domain::cell::{Cell, TRAIL_SYMBOL};
use crate::domain::grid::Position;
use crate::sim::step::{FrameSink, Flow};
use crate::sim::world::{Phase, WorldState};

// ── Glyph: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::White, bg: Glyph::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real glyph, so every position will be diff'd.
    const INVALID: Glyph = Glyph { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Glyphs ──

struct FrameBuffer {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, glyphs: vec![Glyph::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.glyphs = vec![Glyph::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.glyphs.fill(Glyph::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, g: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x] = g;
        }
    }

    fn get(&self, x: usize, y: usize) -> Glyph {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x]
        } else {
            Glyph::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Glyph::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Glyph::new(' ', Color::White, bg));
        }
    }
}

// ── Renderer ──

/// Each grid cell = 2 terminal columns, so the map looks square.
const CELL_W: usize = 2;

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    input: InputState,
    final_pause: Duration,
}

impl Renderer {
    pub fn new(final_pause: Duration) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            input: InputState::new(),
            final_pause,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Glyph::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame.
        self.back.glyphs.fill(Glyph::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn render(&mut self, world: &WorldState, route: Option<&[Position]>) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.glyphs.fill(Glyph::INVALID);
            queue!(self.writer, SetBackgroundColor(Glyph::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        self.compose(world, route);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed glyphs ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Glyph::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Glyph::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let g = self.front.get(x, y);
                if g == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if g.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(g.fg))?;
                    last_fg = g.fg;
                }
                if g.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(g.bg))?;
                    last_bg = g.bg;
                }
                queue!(self.writer, Print(g.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, w: &WorldState, route: Option<&[Position]>) {
        // ── HUD row ──
        let status = match w.phase {
            Phase::Running => "RUNNING".to_string(),
            Phase::ReachedExit => "ESCAPED".to_string(),
            Phase::Trapped(cause) => format!("TRAPPED ({cause})"),
        };
        let hud = format!(
            " {}  Tick:{:<4}  Fire:{:<3}  {} ",
            w.name, w.tick, w.grid.count(Cell::Hazard), status,
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Map ──
        let grid = w.snapshot();
        for (gy, cells) in grid.row_slices().enumerate() {
            let row = MAP_ROW + gy;
            if row >= self.front.height { break; }
            for (gx, &cell) in cells.iter().enumerate() {
                let col = gx * CELL_W;
                if col + 1 >= self.front.width { break; }
                let pos = Position::new(gy, gx);
                let on_route = route.is_some_and(|r| r.contains(&pos));
                self.compose_cell(w, cell, pos, on_route, col, row);
            }
        }

        // ── Message bar ──
        let msg_row = MAP_ROW + grid.rows() + 1;
        let msg = match route {
            Some(r) => format!(" The safest path is marked with '{TRAIL_SYMBOL}' ({} steps) ", r.len()),
            None => w.events.last().map(|e| format!(" {e} ")).unwrap_or_default(),
        };
        if msg_row < self.front.height && !msg.is_empty() {
            self.front.fill_row(msg_row, MSG_BG);
            self.front.put_str(0, msg_row, &msg, Color::Black, MSG_BG);
        }

        // ── Help bar ──
        let help_row = msg_row + 2;
        if help_row < self.front.height {
            self.front.put_str(0, help_row, " Esc/Q: quit", Color::DarkGrey, Glyph::BASE_BG);
        }
    }

    /// Write the visual for grid cell `pos` at (col, row).
    fn compose_cell(&mut self, w: &WorldState, cell: Cell, pos: Position, on_route: bool, col: usize, row: usize) {
        let (ch, fg, bg) = match cell {
            Cell::Hazard => ('F', Color::Yellow, Color::Rgb { r: 170, g: 30, b: 0 }),
            Cell::Wall => ('#', Color::Grey, Color::Rgb { r: 70, g: 70, b: 80 }),
            Cell::Exit => ('E', Color::Black, Color::Green),
            Cell::Agent => ('P', Color::Black, Color::Cyan),
            Cell::Open if on_route || w.is_trail(pos) => (TRAIL_SYMBOL, Color::Cyan, Glyph::BASE_BG),
            Cell::Open => ('.', Color::DarkGrey, Glyph::BASE_BG),
        };
        self.front.set(col, row, Glyph::new(ch, fg, bg));
        self.front.set(col + 1, row, Glyph::new(' ', fg, bg));
    }
}

impl FrameSink for Renderer {
    fn frame(&mut self, world: &WorldState) -> io::Result<Flow> {
        self.input.drain_events();
        if self.input.abort_requested() {
            return Ok(Flow::Abort);
        }
        self.render(world, None)?;
        Ok(Flow::Continue)
    }

    /// Show the route, then hold it on screen until the pause runs out
    /// or a key is pressed.
    fn final_path(&mut self, world: &WorldState, path: &[Position]) -> io::Result<()> {
        self.render(world, Some(path))?;
        let started = Instant::now();
        while started.elapsed() < self.final_pause {
            self.input.drain_events();
            if self.input.any_key() {
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        Ok(())
    }
}
