/// Terminal session context and the drawing surface built on it
use std::io::{self, Stdout, Write};
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use wirecube_core::{Color, DrawSurface, Rect, ScreenPoint, SurfaceError, SurfaceEvent, Viewport};

use crate::input::InputMapper;
use crate::renderer::{to_term_color, Canvas};

/// Rows reserved above the canvas for the title bar
const TITLE_ROWS: u16 = 1;

/// Raw-mode terminal session
///
/// Created once at startup. Dropping it leaves the alternate screen and
/// restores the cooked terminal. Surfaces borrow it, so they are always
/// released before the session ends.
pub struct TerminalContext {
    reports_release: bool,
}

impl TerminalContext {
    pub fn init() -> Result<Self, SurfaceError> {
        terminal::enable_raw_mode().map_err(init_error)?;
        let mut context = Self {
            reports_release: false,
        };

        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .map_err(init_error)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(init_error)?;
            context.reports_release = true;
        }

        log::info!(
            "terminal context ready (key release reporting: {})",
            context.reports_release
        );
        Ok(context)
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// Open a surface covering the whole terminal below the title bar
    pub fn create_surface(
        &self,
        title: &str,
        viewport: Viewport,
    ) -> Result<TerminalSurface<'_, Stdout>, SurfaceError> {
        let (cols, rows) = terminal::size().map_err(init_error)?;
        if rows <= TITLE_ROWS || cols == 0 {
            return Err(SurfaceError::initialization(format!(
                "terminal too small ({cols}x{rows})"
            )));
        }

        let mut surface = TerminalSurface::with_writer(
            title,
            viewport,
            (cols, rows - TITLE_ROWS),
            io::stdout(),
            InputMapper::new(self.reports_release),
        )?;
        surface.poll_terminal = true;
        Ok(surface)
    }
}

impl Drop for TerminalContext {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.reports_release {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::info!("terminal context restored");
    }
}

/// A `DrawSurface` that rasterizes into terminal cells
///
/// Logical viewport coordinates are scaled onto the cell grid, so the same
/// scene renders at any terminal size.
pub struct TerminalSurface<'ctx, W: Write> {
    title: String,
    viewport: Viewport,
    canvas: Canvas,
    color: Color,
    writer: W,
    input: InputMapper,
    poll_terminal: bool,
    _context: PhantomData<&'ctx TerminalContext>,
}

impl<'ctx, W: Write> TerminalSurface<'ctx, W> {
    /// Surface over an arbitrary writer, sized in cells
    ///
    /// Does not read terminal events; `poll_event` only reports what the
    /// input mapper already holds.
    pub fn with_writer(
        title: &str,
        viewport: Viewport,
        (cols, rows): (u16, u16),
        writer: W,
        input: InputMapper,
    ) -> Result<Self, SurfaceError> {
        if viewport.width <= 0 || viewport.height <= 0 {
            return Err(SurfaceError::initialization(format!(
                "invalid viewport {}x{}",
                viewport.width, viewport.height
            )));
        }

        log::info!(
            "surface {title:?} created: viewport {}x{} on {cols}x{rows} cells",
            viewport.width,
            viewport.height
        );
        Ok(Self {
            title: title.to_string(),
            viewport,
            canvas: Canvas::new(cols as usize, rows as usize),
            color: Color::WHITE,
            writer,
            input,
            poll_terminal: false,
            _context: PhantomData,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn input_mut(&mut self) -> &mut InputMapper {
        &mut self.input
    }

    /// Map a logical point to cell coordinates, flooring toward -inf
    pub fn to_cell(&self, point: ScreenPoint) -> (i64, i64) {
        (
            scale(point.x, self.viewport.width, self.canvas.width()),
            scale(point.y, self.viewport.height, self.canvas.height()),
        )
    }

    fn flush_frame(&mut self) -> io::Result<()> {
        queue!(
            self.writer,
            cursor::MoveTo(0, 0),
            SetForegroundColor(to_term_color(Color::WHITE)),
            terminal::Clear(ClearType::CurrentLine),
            Print(&self.title),
            ResetColor,
            cursor::MoveTo(0, TITLE_ROWS)
        )?;
        self.canvas.draw(&mut self.writer)?;
        self.writer.flush()
    }

    fn pump_terminal(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(cols, rows) = event {
                let rows = rows.saturating_sub(TITLE_ROWS);
                log::debug!("terminal resized to {cols}x{rows} cells");
                self.canvas.resize(cols as usize, rows as usize);
                queue!(self.writer, terminal::Clear(ClearType::All))?;
                continue;
            }
            self.input.push(&event, Instant::now());
        }
        Ok(())
    }
}

impl<'ctx, W: Write> DrawSurface for TerminalSurface<'ctx, W> {
    fn set_draw_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.color = color;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.canvas.clear(self.color);
        Ok(())
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint) -> Result<(), SurfaceError> {
        let (from, to) = (self.to_cell(from), self.to_cell(to));
        self.canvas.draw_line(from, to, self.color);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        let (x0, y0) = self.to_cell(ScreenPoint::new(rect.x, rect.y));
        let (x1, y1) = self.to_cell(ScreenPoint::new(rect.right(), rect.bottom()));
        // Anything with area covers at least one cell
        let x1 = if rect.w > 0 { x1.max(x0 + 1) } else { x1 };
        let y1 = if rect.h > 0 { y1.max(y0 + 1) } else { y1 };
        self.canvas.fill_rect(x0, y0, x1, y1, self.color);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.flush_frame().map_err(render_error)
    }

    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError> {
        if self.poll_terminal {
            self.pump_terminal().map_err(render_error)?;
        }
        self.input.expire(Instant::now());
        Ok(self.input.next())
    }
}

impl<'ctx, W: Write> Drop for TerminalSurface<'ctx, W> {
    fn drop(&mut self) {
        let _ = queue!(self.writer, ResetColor, terminal::Clear(ClearType::All));
        let _ = self.writer.flush();
        log::info!("surface {:?} destroyed", self.title);
    }
}

/// Scale `value` from a logical extent onto `cells`, rounding toward -inf
fn scale(value: i32, extent: i32, cells: usize) -> i64 {
    (value as i64 * cells as i64).div_euclid(extent as i64)
}

fn init_error(err: io::Error) -> SurfaceError {
    SurfaceError::initialization(err.to_string())
}

fn render_error(err: io::Error) -> SurfaceError {
    SurfaceError::render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirecube_core::{FrameDriver, Key, Scene, WireframeScene};

    fn surface(viewport: Viewport, cells: (u16, u16)) -> TerminalSurface<'static, Vec<u8>> {
        TerminalSurface::with_writer("test", viewport, cells, Vec::new(), InputMapper::new(true))
            .unwrap()
    }

    fn lit_cells(surface: &TerminalSurface<'_, Vec<u8>>) -> usize {
        let canvas = surface.canvas();
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.cell(x, y).map(|c| c.glyph) != Some(' '))
            .count()
    }

    #[test]
    fn test_rejects_empty_viewport() {
        let result = TerminalSurface::with_writer(
            "bad",
            Viewport::new(0, 10),
            (10, 10),
            Vec::new(),
            InputMapper::new(true),
        );
        assert!(matches!(result, Err(SurfaceError::Initialization(_))));
    }

    #[test]
    fn test_scales_logical_points_to_cells() {
        let s = surface(Viewport::new(640, 640), (80, 40));
        assert_eq!(s.to_cell(ScreenPoint::new(0, 0)), (0, 0));
        assert_eq!(s.to_cell(ScreenPoint::new(320, 320)), (40, 20));
        assert_eq!(s.to_cell(ScreenPoint::new(639, 639)), (79, 39));
        assert_eq!(s.to_cell(ScreenPoint::new(-1, 700)), (-1, 43));
    }

    #[test]
    fn test_out_of_bounds_line_is_accepted() {
        let mut s = surface(Viewport::new(100, 100), (10, 10));
        s.draw_line(ScreenPoint::new(-500, 50), ScreenPoint::new(500, 50)).unwrap();
        assert_eq!(lit_cells(&s), 10);
    }

    #[test]
    fn test_small_rect_covers_a_cell() {
        let mut s = surface(Viewport::new(1280, 720), (64, 18));
        s.fill_rect(Rect::new(5, 5, 4, 4)).unwrap();
        assert_eq!(lit_cells(&s), 1);
    }

    #[test]
    fn test_present_writes_title_and_canvas() {
        let mut s = surface(Viewport::new(640, 640), (20, 10));
        let scene = WireframeScene::default();
        scene.render(&mut s).unwrap();

        let out = String::from_utf8(s.writer().clone()).unwrap();
        assert!(out.contains("test"));
        assert!(out.contains('█'));
    }

    #[test]
    fn test_queued_events_reach_the_driver() {
        let mut s = surface(Viewport::new(640, 640), (20, 10));
        let now = Instant::now();
        let key = |code| Event::Key(event::KeyEvent::new(code, event::KeyModifiers::NONE));
        s.input_mut().push(&key(event::KeyCode::Up), now);
        s.input_mut().push(&key(event::KeyCode::Esc), now);

        assert_eq!(s.poll_event().unwrap(), Some(SurfaceEvent::KeyDown(Key::Up)));

        let mut driver = FrameDriver::new(s, WireframeScene::default());
        assert_eq!(driver.step().unwrap(), wirecube_core::DriverState::Stopped);
    }
}
