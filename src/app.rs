use anyhow::Context;
use vip8::Emulator;

#[cfg(feature = "window")]
use std::time::Instant;

#[cfg(feature = "window")]
use sdl2::{event::Event, pixels::Color, rect::Rect};
#[cfg(feature = "window")]
use thiserror::Error;

#[cfg(feature = "window")]
use super::keymap::{Action, Keymap};
#[cfg(feature = "window")]
use vip8::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

#[cfg(feature = "window")]
const VBLANK_DELAY: u128 = 1_000_000 / 60;

#[cfg(feature = "window")]
#[derive(Error, Debug)]
enum AppError {
    #[error("SDL error: {0}")]
    Sdl(String),
}

#[cfg(feature = "window")]
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Sdl(s)
    }
}

#[cfg(feature = "window")]
#[derive(Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Paused,
    // the machine faulted; keep showing the last frame
    Halted,
    Quit,
}

/// Run up to `max_steps` instructions and print the final screen to stdout.
pub fn run_headless(mut emu: Emulator, max_steps: usize) -> Result<(), anyhow::Error> {
    let outcome = emu.run(max_steps);
    print!("{}", emu.framebuffer());

    let steps = outcome.context("emulation stopped")?;
    tracing::info!("stopped after {} steps at {:#05X}", steps, emu.pc());
    Ok(())
}

#[cfg(not(feature = "window"))]
pub fn run(_emu: Emulator, _speed: u32, _scale: u32) -> Result<(), anyhow::Error> {
    anyhow::bail!("built without the `window` feature, run with --headless instead")
}

/// Main application loop
#[cfg(feature = "window")]
pub fn run(mut emu: Emulator, speed: u32, scale: u32) -> Result<(), anyhow::Error> {
    // a zero delay would never drain cpu_delta
    let cycle_delay = (1_000_000 / speed.max(1) as u128).max(1);
    let zoom = scale.clamp(1, crate::MAX_SCALE);

    // initialize SDL context and subsystems
    let sdl_context = sdl2::init()
        .map_err(AppError::from)
        .context("failed to initialize SDL context")?;
    let sdl_video = sdl_context
        .video()
        .map_err(AppError::from)
        .context("failed to initialize video subsystem")?;

    // build the window
    let window = sdl_video
        .window(
            "VIP8",
            DISPLAY_WIDTH as u32 * zoom,
            DISPLAY_HEIGHT as u32 * zoom,
        )
        .position_centered()
        .build()
        .context("error creating window")?;

    // get the drawing canvas
    let mut canvas = window
        .into_canvas()
        .build()
        .context("error creating window canvas")?;

    // get the event pump
    let mut event_pump = sdl_context
        .event_pump()
        .map_err(AppError::from)
        .context("error obtaining the event pump")?;

    let mut state = AppState::Running;
    let keymap = Keymap::Default;
    let mut previous = Instant::now();
    let mut cpu_delta = 0;
    let mut vblank_delta = VBLANK_DELAY;

    loop {
        let now = Instant::now();
        let elapsed = previous.elapsed().as_micros();
        previous = now;

        // process input events
        for event in event_pump.poll_iter() {
            match keymap.translate_action(&event) {
                Some(Action::Quit) => state = AppState::Quit,
                Some(Action::TogglePause) => {
                    state = match state {
                        AppState::Running => AppState::Paused,
                        AppState::Paused => AppState::Running,
                        other => other,
                    }
                }
                Some(Action::Step) if state == AppState::Paused => {
                    if let Err(err) = emu.step() {
                        tracing::error!("{}", err);
                        state = AppState::Halted;
                    }
                }
                Some(Action::Step) => {}
                None => {
                    if let Event::Quit { .. } = event {
                        state = AppState::Quit
                    }
                }
            }
        }

        match state {
            // Only update the simulation when it is running
            AppState::Running => {
                cpu_delta += elapsed;

                while cpu_delta >= cycle_delay {
                    if let Err(err) = emu.step() {
                        tracing::error!("{}", err);
                        state = AppState::Halted;
                        break;
                    }
                    cpu_delta -= cycle_delay;
                }
            }
            AppState::Paused | AppState::Halted => cpu_delta = 0,
            // singnal to get out of the routine
            AppState::Quit => break,
        }

        // draw a frame, regardless of the simulation state
        vblank_delta += elapsed;
        if vblank_delta < VBLANK_DELAY {
            continue;
        }
        vblank_delta %= VBLANK_DELAY;

        canvas.set_draw_color(Color::RGB(0x00, 0x00, 0x00));
        canvas.clear();

        canvas.set_draw_color(Color::RGB(0xFF, 0xFF, 0xFF));
        let screen = emu.framebuffer();
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if screen.get_pixel(x, y) {
                    let rect = Rect::new(
                        (x as u32 * zoom) as i32,
                        (y as u32 * zoom) as i32,
                        zoom,
                        zoom,
                    );
                    canvas
                        .fill_rect(rect)
                        .map_err(AppError::from)
                        .context("error drawing to canvas")?;
                }
            }
        }
        canvas.present();
    }

    Ok(())
}
