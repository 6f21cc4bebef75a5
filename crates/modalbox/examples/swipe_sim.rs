//! Simulated session: open a modal, swipe it halfway, let it snap back, then
//! fling it away. Logs every transition.
//!
//! Run with: `RUST_LOG=modalbox=debug cargo run -p modalbox --example swipe_sim`

use std::time::Duration;

use modalbox::{BoxError, Modal, ModalCallbacks, ModalConfig, Viewport};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);

fn settle(modal: &mut Modal) -> Result<(), BoxError> {
    while modal.state().is_transitioning() && !modal.controller().is_interactive() {
        modal.tick(FRAME)?;
        let frame = modal.frame();
        println!(
            "  y={:>7.1} backdrop={:.2} state={:?}",
            frame.y,
            frame.backdrop_opacity,
            modal.state()
        );
    }
    Ok(())
}

fn swipe(modal: &mut Modal, distance: f64, frames: u32) -> Result<(), BoxError> {
    let t = Instant::now();
    let start = modal.frame().y + 12.0;
    modal.pointer_down(start, t)?;
    for step in 1..=frames {
        let y = start + distance * f64::from(step) / f64::from(frames);
        modal.pointer_move(y, t + FRAME * step)?;
    }
    modal.pointer_up(start + distance, t + FRAME * (frames + 1))?;
    Ok(())
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modalbox=debug")),
        )
        .init();

    let callbacks = ModalCallbacks::new()
        .on_open(|| {
            println!("-> opened");
            Ok(())
        })
        .on_closed(|| {
            println!("-> closed");
            Ok(())
        })
        .on_closing_state(|closing| {
            println!("-> closing state {closing}");
            Ok(())
        });
    let mut modal = Modal::new(ModalConfig::default(), Viewport::new(800.0, 320.0))?
        .callbacks(callbacks);

    println!("open");
    modal.open()?;
    settle(&mut modal)?;

    println!("slow half swipe");
    swipe(&mut modal, 40.0, 20)?;
    settle(&mut modal)?;

    println!("fling");
    swipe(&mut modal, 60.0, 3)?;
    settle(&mut modal)?;

    Ok(())
}
