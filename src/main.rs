use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use maze_survival::{Behavior, Cell as GridCell, Config, Dir, ItemCategory, Pos, Session};
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
const PANEL_ROWS: usize = 3;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Npc(Behavior),
    Wall,
    Floor,
    Item(ItemCategory),
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

enum Mode {
    Play,
    Talk { npc: usize, input: String },
}

struct Renderer {
    last: Vec<Cell>,
    last_panel: [String; PANEL_ROWS],
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                width * height
            ],
            last_panel: Default::default(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    init_logging()?;
    let mut session =
        Session::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut session);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Logs go to the file named by `MAZE_LOG`; the terminal is busy drawing.
fn init_logging() -> io::Result<()> {
    let Ok(path) = std::env::var("MAZE_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, session: &mut Session) -> io::Result<()> {
    let tick = session.config().tick;
    let frame_time = Duration::from_micros(1_000_000 / session.config().render_fps.max(1));
    let mut renderer = Renderer::new(session.grid.width(), session.grid.height());
    let started = Instant::now();
    let mut last_tick = Instant::now();
    let mut mode = Mode::Play;
    let mut message = String::from("Arrows/hjkl move, [ ] select, u use, g give, t talk, r new maze, q quit");

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match &mut mode {
                Mode::Talk { npc, input } => match key.code {
                    KeyCode::Enter => {
                        let label = session.npcs[*npc].behavior.label();
                        message = match session.talk(*npc, input) {
                            Some(reply) => format!("{label}: {reply}"),
                            None => "They wandered off.".to_string(),
                        };
                        mode = Mode::Play;
                    }
                    KeyCode::Esc => mode = Mode::Play,
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => input.push(c),
                    _ => {}
                },
                Mode::Play => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => move_player(session, Dir::Up, &mut message),
                    KeyCode::Down | KeyCode::Char('j') => {
                        move_player(session, Dir::Down, &mut message)
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        move_player(session, Dir::Left, &mut message)
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        move_player(session, Dir::Right, &mut message)
                    }
                    KeyCode::Char('[') => session.player.inventory.select_prev(),
                    KeyCode::Char(']') => session.player.inventory.select_next(),
                    KeyCode::Char('u') => message = session.player.use_selected(),
                    KeyCode::Char('g') => message = session.player.give_selected(),
                    KeyCode::Char('t') => match session.adjacent_npc() {
                        Some(npc) => {
                            mode = Mode::Talk {
                                npc,
                                input: String::new(),
                            }
                        }
                        None => message = "Nobody to talk to.".to_string(),
                    },
                    KeyCode::Char('r') => {
                        session
                            .regenerate()
                            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                        message = "The walls shift around you.".to_string();
                        renderer.needs_full = true;
                    }
                    _ => {}
                },
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.tick(started.elapsed());
        }
        render(stdout, session, &mut renderer, &mode, &message)?;
        if !session.player.is_alive() {
            render_game_over(stdout, session)?;
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn move_player(session: &mut Session, dir: Dir, message: &mut String) {
    if let Some(pickup) = session.move_player(dir) {
        *message = pickup;
    }
}

fn render(
    stdout: &mut Stdout,
    session: &Session,
    renderer: &mut Renderer,
    mode: &Mode,
    message: &str,
) -> io::Result<()> {
    let width = session.grid.width();
    let height = session.grid.height();
    let needed_h = (height + PANEL_ROWS + 1) as u16;
    let needed_w = (width * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let panel = panel_lines(session, mode, message);
    let panel_rows = [
        renderer.origin_y - 1,
        renderer.origin_y + height as u16,
        renderer.origin_y + height as u16 + 1,
    ];
    for (idx, line) in panel.iter().enumerate() {
        if renderer.needs_full || *line != renderer.last_panel[idx] {
            stdout.queue(MoveTo(renderer.origin_x, panel_rows[idx]))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(line))?;
            stdout.queue(ResetColor)?;
        }
    }
    renderer.last_panel = panel;

    for y in 0..height {
        for x in 0..width {
            let cell = cell_for(session, Pos::new(x as i32, y as i32));
            let idx = y * width + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn panel_lines(session: &Session, mode: &Mode, message: &str) -> [String; PANEL_ROWS] {
    let vitals = &session.player.vitals;
    let hud = format!(
        "Health: {:>3.0}  Hunger: {:>3.0}  Thirst: {:>3.0}",
        vitals.health, vitals.hunger, vitals.thirst
    );

    let inventory = session.player.inventory.items();
    let inventory_line = if inventory.is_empty() {
        "Inventory: (empty)".to_string()
    } else {
        let selected = session.player.inventory.selected_index();
        let entries: Vec<String> = inventory
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let label = format!("{} x{}", item.name, item.quantity);
                if idx == selected {
                    format!("[{label}]")
                } else {
                    label
                }
            })
            .collect();
        format!("Inventory: {}", entries.join("  "))
    };

    let dialogue = match mode {
        Mode::Play => message.to_string(),
        Mode::Talk { input, .. } => format!("You: {input}_"),
    };
    [hud, inventory_line, dialogue]
}

fn cell_for(session: &Session, pos: Pos) -> Cell {
    if pos == session.player.pos {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Blue,
        };
    }
    if let Some(npc) = session.npcs.iter().find(|npc| npc.pos == pos) {
        let color = match npc.behavior {
            Behavior::Stationary => Color::Green,
            Behavior::Wander { .. } => Color::Cyan,
            Behavior::Aggressive { .. } => Color::Red,
        };
        return Cell {
            glyph: Glyph::Npc(npc.behavior),
            color,
        };
    }
    match session.grid.get(pos) {
        Some(GridCell::Floor) => Cell {
            glyph: Glyph::Floor,
            color: Color::Reset,
        },
        Some(GridCell::Item(id)) => {
            let category = session
                .catalog
                .get(id)
                .map(|t| t.category())
                .unwrap_or(ItemCategory::Tool);
            let color = match category {
                ItemCategory::Food => Color::Yellow,
                ItemCategory::Drink => Color::Blue,
                ItemCategory::Tool => Color::Magenta,
            };
            Cell {
                glyph: Glyph::Item(category),
                color,
            }
        }
        Some(GridCell::Wall) | None => Cell {
            glyph: Glyph::Wall,
            color: Color::White,
        },
    }
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "🙂",
        Glyph::Npc(Behavior::Stationary) => "🧍",
        Glyph::Npc(Behavior::Wander { .. }) => "🚶",
        Glyph::Npc(Behavior::Aggressive { .. }) => "👹",
        Glyph::Wall => "██",
        Glyph::Floor => "  ",
        Glyph::Item(ItemCategory::Food) => "🍞",
        Glyph::Item(ItemCategory::Drink) => "💧",
        Glyph::Item(ItemCategory::Tool) => "🔨",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn render_game_over(stdout: &mut Stdout, session: &Session) -> io::Result<()> {
    let height = session.grid.height();
    let (term_w, term_h) = terminal::size()?;
    let needed_h = (height + PANEL_ROWS + 1) as u16;
    let needed_w = (session.grid.width() * CELL_W) as u16;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, needed_h))?;
    } else {
        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        stdout.queue(MoveTo(origin_x, origin_y + height as u16 + 2))?;
    }
    stdout.queue(Print("You collapse from hunger and thirst. (press q to quit)"))?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
