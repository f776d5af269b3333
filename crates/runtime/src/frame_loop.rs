use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cubescene_input::{InputError, InputEvent, PlayerController};
use cubescene_render::{FrameComposer, Renderer};

use crate::{ConfigError, EngineConfig, FixedTimestep, FrameTimer, RenderContext};

/// Cloneable stop flag for a [`FrameLoop`]. Safe to trigger from any thread.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened during one call to [`FrameLoop::advance`].
#[derive(Debug, Clone)]
pub struct FrameReport<T> {
    pub frame_index: u64,
    /// Seconds since the previous frame.
    pub dt: f64,
    pub fixed_updates: u32,
    pub draws: usize,
    /// True when composition failed and the previous frame was submitted.
    pub reused: bool,
    /// Renderer output, `None` if no frame has ever composed.
    pub output: Option<T>,
}

/// Single-threaded cooperative loop driving both tasks: fixed-rate input
/// integration and per-frame composition + submission.
///
/// Both tasks run inside [`FrameLoop::advance`], so the player node is never
/// touched concurrently.
pub struct FrameLoop<R: Renderer> {
    context: RenderContext,
    composer: FrameComposer,
    controller: PlayerController,
    timestep: FixedTimestep,
    timer: FrameTimer,
    renderer: R,
    shutdown: ShutdownHandle,
    last_timestamp: Option<f64>,
    elapsed: f64,
    frame_index: u64,
    fixed_updates: u64,
}

impl<R: Renderer> FrameLoop<R> {
    pub fn new(config: &EngineConfig, context: RenderContext, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;
        renderer.shader_status().report("scene");
        Ok(Self {
            context,
            composer: FrameComposer::new(config.render),
            controller: PlayerController::new(config.controls),
            timestep: FixedTimestep::new(config.fixed_step(), config.max_catch_up_steps),
            timer: FrameTimer::new(config.frame_history),
            renderer,
            shutdown: ShutdownHandle::new(),
            last_timestamp: None,
            elapsed: 0.0,
            frame_index: 0,
            fixed_updates: 0,
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_stopped()
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Seconds of frame time seen so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn fixed_updates(&self) -> u64 {
        self.fixed_updates
    }

    /// Queue input for the next fixed update.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), InputError> {
        self.context.input.apply(event)
    }

    /// Run one display frame at timestamp `now` (seconds, monotonic).
    ///
    /// Returns `None` once the loop has been stopped.
    pub fn advance(&mut self, now: f64) -> Option<FrameReport<R::Output>> {
        if self.shutdown.is_stopped() {
            return None;
        }

        let dt = match self.last_timestamp {
            None => 0.0,
            Some(then) if now.is_finite() && now >= then => now - then,
            Some(then) => {
                tracing::warn!(now, then, "frame timestamp went backwards or is not finite, frame time ignored");
                0.0
            }
        };
        // A clock that steps backwards must not recount time already seen.
        if now.is_finite() && self.last_timestamp.is_none_or(|then| now >= then) {
            self.last_timestamp = Some(now);
        }
        self.elapsed += dt;
        self.frame_index += 1;

        if let Some((width, height)) = self.context.input.take_resize() {
            tracing::debug!(width, height, "viewport resized");
            self.context.viewport.width = width;
            self.context.viewport.height = height;
        }

        let steps = self.timestep.advance(dt);
        for _ in 0..steps {
            self.fixed_update();
        }

        let skipped_before = self.composer.stats().frames_skipped;
        let ctx = &self.context;
        let frame = self
            .composer
            .compose_or_reuse(ctx.viewport, ctx.camera(), &ctx.scene, self.elapsed);
        let draws = frame.map_or(0, |f| f.draws.len());
        let output = frame.map(|f| self.renderer.render(f));
        let reused = self.composer.stats().frames_skipped > skipped_before && output.is_some();

        if dt > 0.0 {
            self.timer.record(Duration::from_secs_f64(dt));
        }

        Some(FrameReport {
            frame_index: self.frame_index,
            dt,
            fixed_updates: steps,
            draws,
            reused,
            output,
        })
    }

    /// Drive the loop from a sequence of frame timestamps until the sequence
    /// ends or the loop is stopped. Returns the number of frames run.
    pub fn run<I, F>(&mut self, timestamps: I, mut on_frame: F) -> u64
    where
        I: IntoIterator<Item = f64>,
        F: FnMut(&mut Self, FrameReport<R::Output>),
    {
        tracing::info!(
            fixed_update_hz = 1.0 / self.timestep.step(),
            nodes = self.context.scene.len(),
            "frame loop starting"
        );
        let mut frames = 0;
        for now in timestamps {
            let Some(report) = self.advance(now) else {
                break;
            };
            frames += 1;
            on_frame(self, report);
        }
        tracing::info!(
            frames,
            fixed_updates = self.fixed_updates,
            fps = self.timer.fps(),
            stopped = self.is_stopped(),
            "frame loop finished"
        );
        frames
    }

    fn fixed_update(&mut self) {
        let camera = self.context.camera();
        let RenderContext { scene, input, .. } = &mut self.context;
        match scene.node_mut(camera) {
            Some(player) => {
                self.controller.fixed_update(input, player, 1.0);
                self.fixed_updates += 1;
            }
            None => tracing::warn!(%camera, "player node missing, fixed update skipped"),
        }
    }
}
