//#![deny(warnings)]

use anyhow::Context;
use log::{error, info, trace};
use std::sync::Arc;
use std::time::Duration;
use tracer::get_reasonable_log_filter;
use tracer::gpu::wgpu_device::WgpuDevice;
use tracer::render_loop::progress::{LoggingProgressDisplay, Progress, ProgressDisplay};
use tracer::render_loop::progressive_render_loop::ProgressiveRenderLoop;
use tracer::render_loop::scheduler::FrameScheduler;
use tracer::render_loop::state::LoopState;
use tracer::scene::cornell_box::cornell_box;
use tracer::settings::RenderSettings;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Progressive Path Tracer";
const PROGRESS_LOG_INTERVAL: Duration = Duration::from_secs(2);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(get_reasonable_log_filter())).init();

    let event_loop = EventLoop::new().context("event loop creation failed")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut application = Application::new(RenderSettings::default());

    event_loop.run_app(&mut application).context("event loop has failed")?;

    Ok(())
}

/// Redraw requests are the host's "run before the next refresh" primitive.
struct RedrawScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_next_step(&self) {
        self.window.request_redraw();
    }
}

struct TitleProgressDisplay {
    window: Arc<Window>,
    shown_percentage: Option<u32>,
    log: LoggingProgressDisplay,
}

impl ProgressDisplay for TitleProgressDisplay {
    fn show(&mut self, progress: Progress) {
        if self.shown_percentage != Some(progress.percentage()) {
            self.window.set_title(&format!("{WINDOW_TITLE}: {}%", progress.percentage()));
            self.shown_percentage = Some(progress.percentage());
        }
        self.log.show(progress);
    }
}

struct Session {
    render_loop: ProgressiveRenderLoop<WgpuDevice>,
    scheduler: RedrawScheduler,
    display: TitleProgressDisplay,
}

struct Application {
    settings: RenderSettings,
    session: Option<Session>,
}

impl Application {
    #[must_use]
    fn new(settings: RenderSettings) -> Self {
        Self { settings, session: None }
    }

    fn create_session(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Session> {
        let frame_size = self.settings.frame_size();
        let window = event_loop.create_window(Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(PhysicalSize::new(frame_size.width(), frame_size.height()))
                .with_resizable(false))
            .context("could not create the window")?;
        let window = Arc::new(window);

        let scene = cornell_box()?.build()?;
        let device = pollster::block_on(WgpuDevice::new(window.clone(), frame_size))?;
        let render_loop = ProgressiveRenderLoop::new(device, &scene, &self.settings)?;

        Ok(Session {
            render_loop,
            scheduler: RedrawScheduler { window: window.clone() },
            display: TitleProgressDisplay { window, shown_percentage: None, log: LoggingProgressDisplay::every(PROGRESS_LOG_INTERVAL) },
        })
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.create_session(event_loop) {
            Ok(session) => {
                session.render_loop.start(&session.scheduler);
                self.session = Some(session);
            }
            Err(error) => {
                error!("failed to start rendering: {:#}", error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                trace!("exiting the loop via close request");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(session) = self.session.as_mut() else { return };
                if LoopState::Converged == session.render_loop.state() {
                    if let Err(error) = session.render_loop.redisplay() {
                        error!("could not present the converged image: {}", error);
                    }
                    return;
                }
                if session.render_loop.state().is_finished() {
                    return;
                }
                match session.render_loop.step(&session.scheduler, &mut session.display) {
                    Ok(LoopState::Converged) => {
                        info!("rendering finished: {}", session.render_loop.progress());
                    }
                    Ok(_) => (),
                    Err(error) => {
                        error!("rendering stopped: {}", error);
                    }
                }
            }
            _ => (),
        }
    }
}
