// Declare modules directly in the binary crate root
pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod pacing;
pub mod render;
pub mod rules;
pub mod simulation;
pub mod state;
pub mod ui;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::config::Config;
use crate::error::AppError;
use crate::input::{Action, TITLE};
use crate::pacing::TickScheduler;
use crate::state::State;

fn run(event_loop: EventLoop<()>, mut state: State, mut scheduler: TickScheduler) -> Result<(), AppError> {
    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { window_id, ref event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::RedrawRequested => match state.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            log::warn!("Surface lost or outdated, reconfiguring");
                            state.resize(state.size);
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            log::warn!("Skipping frame due to surface timeout");
                            state.needs_frame = true;
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory, shutting down");
                            window_target.exit();
                        }
                    },
                    event => {
                        if state.handle_window_event(event) == Action::Quit {
                            log::info!("Quit requested");
                            window_target.exit();
                        }
                    }
                }
            }
            Event::AboutToWait => {
                state.end_event_batch();

                let now = Instant::now();
                if scheduler.is_due(now) {
                    if state.is_animating() || state.needs_frame {
                        state.update();
                        state.window.request_redraw();
                    }
                    scheduler.advance(now);
                }

                // Sleep until the next tick while something moves, otherwise
                // block until the platform has an event for us
                if state.is_animating() || state.needs_frame {
                    window_target.set_control_flow(ControlFlow::WaitUntil(scheduler.next_tick()));
                } else {
                    window_target.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => (),
        }
    })?;
    Ok(())
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let config = Config::parse();
    log::info!("Starting with {:?}", config);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width as f64, config.height as f64))
            .build(&event_loop)?,
    );

    let state = match pollster::block_on(State::new(window, &config)) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Initialization failed: {err}");
            return Err(err);
        }
    };

    let scheduler = TickScheduler::new(Instant::now(), config.tick_interval());
    run(event_loop, state, scheduler)
}
