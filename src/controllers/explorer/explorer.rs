use crate::controllers::explorer::ports::render_requester::RenderRequester;
use crate::controllers::progressive::RendererError;
use crate::core::data::rendered_image::RenderedImage;
use crate::core::data::viewport::{Viewport, ViewportError};

pub const DEFAULT_CENTER_X: f64 = -0.637011;
pub const DEFAULT_CENTER_Y: f64 = -0.0395159;
pub const DEFAULT_SCALE: f64 = 0.00403897;

pub const ZOOM_IN_FACTOR: f64 = 0.8;
pub const ZOOM_OUT_FACTOR: f64 = 1.0 / ZOOM_IN_FACTOR;
pub const SCROLL_STEP: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ScrollDirection {
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-SCROLL_STEP, 0),
            Self::Right => (SCROLL_STEP, 0),
            Self::Up => (0, -SCROLL_STEP),
            Self::Down => (0, SCROLL_STEP),
        }
    }
}

/// Navigation state of a viewer window, minus the window.
///
/// Every change to the view is sent to the requester straight away; images
/// coming back are kept until a newer one replaces them. When the held image
/// was rendered at a different scale than the one now desired it is a
/// preview: the UI should stretch it by [`preview_scale_factor`] rather than
/// throw it away.
///
/// [`preview_scale_factor`]: Explorer::preview_scale_factor
#[derive(Debug)]
pub struct Explorer<R: RenderRequester> {
    requester: R,
    center_x: f64,
    center_y: f64,
    scale: f64,
    width: i32,
    height: i32,
    device_pixel_ratio: f64,
    image: Option<RenderedImage>,
}

impl<R: RenderRequester> Explorer<R> {
    pub fn new(
        requester: R,
        width: i32,
        height: i32,
        device_pixel_ratio: f64,
    ) -> Result<Self, ViewportError> {
        Viewport::new(
            DEFAULT_CENTER_X,
            DEFAULT_CENTER_Y,
            DEFAULT_SCALE,
            width,
            height,
            device_pixel_ratio,
        )?;

        Ok(Self {
            requester,
            center_x: DEFAULT_CENTER_X,
            center_y: DEFAULT_CENTER_Y,
            scale: DEFAULT_SCALE,
            width,
            height,
            device_pixel_ratio,
            image: None,
        })
    }

    #[must_use]
    pub fn requester(&self) -> &R {
        &self.requester
    }

    pub fn requester_mut(&mut self) -> &mut R {
        &mut self.requester
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn viewport(&self) -> Result<Viewport, ViewportError> {
        Viewport::new(
            self.center_x,
            self.center_y,
            self.scale,
            self.width,
            self.height,
            self.device_pixel_ratio,
        )
    }

    /// Re-sends the current view.
    pub fn refresh(&self) -> Result<(), RendererError> {
        self.requester.request(self.viewport()?)
    }

    pub fn zoom(&mut self, factor: f64) -> Result<(), RendererError> {
        let viewport = Viewport::new(
            self.center_x,
            self.center_y,
            self.scale * factor,
            self.width,
            self.height,
            self.device_pixel_ratio,
        )?;

        self.scale = viewport.scale();
        self.requester.request(viewport)
    }

    pub fn zoom_in(&mut self) -> Result<(), RendererError> {
        self.zoom(ZOOM_IN_FACTOR)
    }

    pub fn zoom_out(&mut self) -> Result<(), RendererError> {
        self.zoom(ZOOM_OUT_FACTOR)
    }

    /// Zooms by `steps` notches; positive steps zoom in.
    pub fn zoom_steps(&mut self, steps: f64) -> Result<(), RendererError> {
        self.zoom(ZOOM_IN_FACTOR.powf(steps))
    }

    /// Moves the view by a pixel offset at the current scale.
    pub fn scroll(&mut self, delta_x: i32, delta_y: i32) -> Result<(), RendererError> {
        let viewport = Viewport::new(
            self.center_x + f64::from(delta_x) * self.scale,
            self.center_y + f64::from(delta_y) * self.scale,
            self.scale,
            self.width,
            self.height,
            self.device_pixel_ratio,
        )?;

        self.center_x = viewport.center_x();
        self.center_y = viewport.center_y();
        self.requester.request(viewport)
    }

    pub fn scroll_step(&mut self, direction: ScrollDirection) -> Result<(), RendererError> {
        let (delta_x, delta_y) = direction.delta();
        self.scroll(delta_x, delta_y)
    }

    pub fn resize(
        &mut self,
        width: i32,
        height: i32,
        device_pixel_ratio: f64,
    ) -> Result<(), RendererError> {
        let viewport = Viewport::new(
            self.center_x,
            self.center_y,
            self.scale,
            width,
            height,
            device_pixel_ratio,
        )?;

        self.width = width;
        self.height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        self.requester.request(viewport)
    }

    pub fn reset_view(&mut self) -> Result<(), RendererError> {
        self.center_x = DEFAULT_CENTER_X;
        self.center_y = DEFAULT_CENTER_Y;
        self.scale = DEFAULT_SCALE;
        self.refresh()
    }

    /// Keeps `image` as the one to display.
    pub fn accept(&mut self, image: RenderedImage) {
        self.image = Some(image);
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&RenderedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.image
            .as_ref()
            .is_some_and(|image| !fuzzy_eq(image.scale_factor, self.scale))
    }

    /// How much the held image must be stretched to match the current scale.
    #[must_use]
    pub fn preview_scale_factor(&self) -> Option<f64> {
        self.image
            .as_ref()
            .map(|image| image.scale_factor / self.scale)
    }
}

fn fuzzy_eq(a: f64, b: f64) -> bool {
    (a - b).abs() * 1e12 <= a.abs().min(b.abs())
}
