/// Wirecube Web - the rotating cube on an HTML canvas
///
/// The browser owns the frame loop: JavaScript calls `WebCube::frame` from
/// `requestAnimationFrame`, and each call runs one driver step.
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wirecube_core::{
    Color, CubeConfig, DrawSurface, DriverState, FrameDriver, Rect, ScreenPoint, SurfaceError,
    SurfaceEvent, Viewport, WireframeScene,
};

/// `DrawSurface` backed by a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    viewport: Viewport,
    color: String,
    quit_requested: bool,
}

impl CanvasSurface {
    /// Bind to the `<canvas>` element with the given id
    pub fn from_element_id(canvas_id: &str) -> Result<Self, SurfaceError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SurfaceError::initialization("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SurfaceError::initialization(format!("no element #{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::initialization(format!("#{canvas_id} is not a canvas")))?;
        let context = canvas
            .get_context("2d")
            .map_err(js_init_error)?
            .ok_or_else(|| SurfaceError::initialization("2d context unsupported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::initialization("unexpected context type"))?;

        let viewport = Viewport::new(canvas.width() as i32, canvas.height() as i32);
        context.set_line_width(1.0);
        Ok(Self {
            context,
            viewport,
            color: css_color(Color::WHITE),
            quit_requested: false,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl DrawSurface for CanvasSurface {
    fn set_draw_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.color = css_color(color);
        let style = JsValue::from_str(&self.color);
        self.context.set_fill_style(&style);
        self.context.set_stroke_style(&style);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.context.fill_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
        Ok(())
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint) -> Result<(), SurfaceError> {
        // Half-pixel offset keeps one-pixel lines crisp
        self.context.begin_path();
        self.context.move_to(from.x as f64 + 0.5, from.y as f64 + 0.5);
        self.context.line_to(to.x as f64 + 0.5, to.y as f64 + 0.5);
        self.context.stroke();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.context
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        // The browser composites the canvas after the animation callback
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError> {
        if self.quit_requested {
            self.quit_requested = false;
            return Ok(Some(SurfaceEvent::Quit));
        }
        Ok(None)
    }
}

/// The wireframe cube bound to a canvas
#[wasm_bindgen]
pub struct WebCube {
    driver: FrameDriver<CanvasSurface, WireframeScene>,
}

#[wasm_bindgen]
impl WebCube {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebCube, JsValue> {
        let surface = CanvasSurface::from_element_id(canvas_id).map_err(to_js)?;
        let config = CubeConfig {
            viewport: surface.viewport(),
            ..CubeConfig::default()
        };
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("web cube bound to #{canvas_id}");
        Ok(WebCube {
            driver: FrameDriver::new(surface, WireframeScene::new(&config)),
        })
    }

    /// Advance and draw one frame. Returns false once stopped.
    pub fn frame(&mut self) -> Result<bool, JsValue> {
        let state = self.driver.step().map_err(to_js)?;
        Ok(state == DriverState::Running)
    }

    /// Stop at the next frame
    pub fn stop(&mut self) {
        self.driver.surface_mut().quit_requested = true;
    }

    pub fn angle(&self) -> f32 {
        self.driver.scene().angle()
    }

    /// Camera position currently used by the scene
    pub fn camera(&self) -> Vec<f32> {
        let position = self.driver.scene().camera().position;
        vec![position.x, position.y, position.z]
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    Ok(())
}

fn css_color(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        color.r,
        color.g,
        color.b,
        color.a as f32 / 255.0
    )
}

fn js_init_error(err: JsValue) -> SurfaceError {
    SurfaceError::initialization(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn to_js(err: SurfaceError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
