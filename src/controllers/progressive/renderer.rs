use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, error, info, trace, warn};

use crate::controllers::progressive::config::RendererConfig;
use crate::controllers::progressive::errors::RendererError;
use crate::controllers::progressive::ports::image_sink::ImageSink;
use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::actions::render_pass::render_pass::{PassParams, RenderPassError, render_pass};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::rendered_image::RenderedImage;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::spectral_palette::SpectralPalette;

struct ControlState {
    request: Option<Viewport>,
    worker: Option<JoinHandle<()>>,
}

struct SharedState {
    control: Mutex<ControlState>,
    wake: Condvar,
    // Only written while `control` is held. The pass loop reads them without
    // the lock so pixel computation never contends with `request`.
    restart: AtomicBool,
    abort: AtomicBool,
    config: RendererConfig,
    palette: SpectralPalette,
    sink: Arc<dyn ImageSink>,
}

impl SharedState {
    fn lock_control(&self) -> MutexGuard<'_, ControlState> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, ControlState>) -> MutexGuard<'a, ControlState> {
        self.wake.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn is_interrupted(&self) -> bool {
        self.restart.load(Ordering::Relaxed) || self.abort.load(Ordering::Relaxed)
    }

    fn interruption(&self) -> RenderOutcome {
        if self.abort.load(Ordering::Acquire) {
            RenderOutcome::Aborted
        } else {
            RenderOutcome::Restarted
        }
    }
}

enum RenderOutcome {
    Completed,
    Restarted,
    Aborted,
}

/// Renders the most recently requested viewport in passes of increasing
/// iteration depth on a single background thread.
///
/// The worker is spawned by the first [`request`](Self::request) and parks
/// between renders. A request arriving mid-render abandons the current pass
/// and starts over from pass 0 with the new viewport; requests are coalesced,
/// never queued. Every completed pass is handed to the [`ImageSink`].
pub struct ProgressiveRenderer {
    shared: Arc<SharedState>,
}

impl ProgressiveRenderer {
    pub fn new(config: RendererConfig, sink: Arc<dyn ImageSink>) -> Result<Self, RendererError> {
        config.validate()?;
        let palette = SpectralPalette::build(config.palette_size)?;

        Ok(Self {
            shared: Arc::new(SharedState {
                control: Mutex::new(ControlState {
                    request: None,
                    worker: None,
                }),
                wake: Condvar::new(),
                restart: AtomicBool::new(false),
                abort: AtomicBool::new(false),
                config,
                palette,
                sink,
            }),
        })
    }

    /// Replaces the pending viewport and makes the worker render it.
    ///
    /// Never blocks on rendering. Fails only after [`shutdown`](Self::shutdown)
    /// or if the worker thread cannot be spawned.
    pub fn request(&self, viewport: Viewport) -> Result<(), RendererError> {
        let mut control = self.shared.lock_control();

        if self.shared.abort.load(Ordering::Acquire) {
            return Err(RendererError::ShutDown);
        }

        control.request = Some(viewport);

        // Without abort the worker only exits by panicking.
        if let Some(handle) = control.worker.take_if(|handle| handle.is_finished()) {
            if handle.join().is_err() {
                warn!("render worker panicked, starting a new one");
            }
        }

        if control.worker.is_none() {
            let shared = Arc::clone(&self.shared);
            let handle = thread::Builder::new()
                .name(self.shared.config.thread_name.clone())
                .spawn(move || Self::worker_loop(&shared))?;

            control.worker = Some(handle);
            info!(
                "render worker started ({} palette, {} colours)",
                self.shared.palette.display_name(),
                self.shared.palette.len()
            );
        } else {
            self.shared.restart.store(true, Ordering::Release);
            self.shared.wake.notify_one();
        }

        Ok(())
    }

    pub fn request_view(
        &self,
        center_x: f64,
        center_y: f64,
        scale: f64,
        width: i32,
        height: i32,
        device_pixel_ratio: f64,
    ) -> Result<(), RendererError> {
        let viewport = Viewport::new(center_x, center_y, scale, width, height, device_pixel_ratio)?;
        self.request(viewport)
    }

    /// Stops the worker and waits for it to exit. No image is delivered after
    /// this returns.
    pub fn shutdown(&mut self) {
        let worker = {
            let mut control = self.shared.lock_control();
            self.shared.abort.store(true, Ordering::Release);
            self.shared.wake.notify_one();
            control.worker.take()
        };

        if let Some(handle) = worker {
            if handle.join().is_err() {
                error!("render worker panicked");
            }
            info!("render worker stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        let control = self.shared.lock_control();
        control
            .worker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
            && !self.shared.abort.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn palette(&self) -> &SpectralPalette {
        &self.shared.palette
    }

    fn worker_loop(shared: &SharedState) {
        loop {
            let viewport = {
                let mut control = shared.lock_control();
                loop {
                    if shared.abort.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(viewport) = control.request {
                        shared.restart.store(false, Ordering::Release);
                        break viewport;
                    }

                    control = shared.wait(control);
                }
            };

            match Self::render_viewport(shared, &viewport) {
                RenderOutcome::Completed => {}
                RenderOutcome::Restarted => {
                    debug!("render restarted for a newer request");
                    continue;
                }
                RenderOutcome::Aborted => return,
            }

            let mut control = shared.lock_control();
            while !shared.restart.load(Ordering::Acquire) && !shared.abort.load(Ordering::Acquire)
            {
                trace!("render worker parked");
                control = shared.wait(control);
            }
            trace!("render worker woken");
        }
    }

    fn render_viewport(shared: &SharedState, viewport: &Viewport) -> RenderOutcome {
        let schedule = &shared.config.passes;
        let cancel = || shared.is_interrupted();
        let mut raster = match PixelBuffer::try_new(viewport.width(), viewport.height()) {
            Ok(raster) => raster,
            Err(err) => {
                error!("cannot render viewport: {}", err);
                return RenderOutcome::Completed;
            }
        };
        let mut pass = 0;

        while !schedule.is_finished(pass) {
            let params = PassParams {
                max_iterations: schedule.max_iterations(pass),
                escape_limit: shared.config.escape_limit,
            };

            let start = Instant::now();
            let summary = match render_pass(viewport, params, &shared.palette, &mut raster, &cancel)
            {
                Ok(summary) => summary,
                Err(RenderPassError::Cancelled(_)) => return shared.interruption(),
                Err(err) => {
                    error!("render pass {} failed: {}", pass, err);
                    return RenderOutcome::Completed;
                }
            };
            let render_duration = start.elapsed();

            if shared.is_interrupted() {
                return shared.interruption();
            }

            let next = schedule.next_pass(pass, summary.all_black);
            debug!(
                "pass {} ({} iterations) done in {:?}, {} pixels escaped",
                pass, params.max_iterations, render_duration, summary.escaped_pixels
            );
            if next > pass + 1 {
                debug!("pass {} is all black, skipping to pass {}", pass, next);
            }

            shared.sink.image_ready(RenderedImage {
                pixel_buffer: raster.clone(),
                viewport: *viewport,
                scale_factor: viewport.scale(),
                pass,
                max_iterations: params.max_iterations,
                is_final: schedule.is_finished(next),
                render_duration,
            });

            pass = next;
        }

        RenderOutcome::Completed
    }
}

impl Drop for ProgressiveRenderer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
