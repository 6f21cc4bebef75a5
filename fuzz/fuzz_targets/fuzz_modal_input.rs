#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modalbox::{
    Edge, ModalConfig, ModalController, ModalEvent, ModalState, Placement, Platform, TimedDriver,
    Viewport,
};
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Input {
    Open,
    Close,
    Backdrop,
    BackButton,
    Down(i16),
    Move(i16),
    Up(i16),
    Cancel,
    Tick(u16),
    Resize { container: u16, modal: u16 },
    Keyboard(u16),
    Disable(bool),
}

#[derive(Debug, Arbitrary)]
struct Session {
    top_entry: bool,
    placement: u8,
    start_open: bool,
    duration_ms: u16,
    inputs: Vec<Input>,
}

fuzz_target!(|session: Session| {
    let placement = match session.placement % 3 {
        0 => Placement::Top,
        1 => Placement::Center,
        _ => Placement::Bottom,
    };
    let config = ModalConfig::for_platform(Platform::Android)
        .placement(placement)
        .entry(if session.top_entry { Edge::Top } else { Edge::Bottom })
        .start_open(session.start_open)
        .back_button_closes(true)
        .animation_duration(Duration::from_millis(u64::from(session.duration_ms % 2000)));
    let Ok(mut c) = ModalController::new(config, Viewport::new(800.0, 300.0), TimedDriver::new())
    else {
        return;
    };

    let mut now = Instant::now();
    let mut opened_outstanding = false;
    for input in session.inputs.iter().take(256) {
        now += Duration::from_millis(8);
        let events = match *input {
            Input::Open => c.open(),
            Input::Close => c.close(),
            Input::Backdrop => c.press_backdrop(),
            Input::BackButton => c.press_back_button(),
            Input::Down(y) => c.pointer_down(f64::from(y), now),
            Input::Move(y) => c.pointer_move(f64::from(y), now),
            Input::Up(y) => c.pointer_up(f64::from(y), now),
            Input::Cancel => c.pointer_cancel(),
            Input::Tick(ms) => c.tick(Duration::from_millis(u64::from(ms))),
            Input::Resize { container, modal } => {
                c.set_viewport(Viewport::new(f64::from(container), f64::from(modal)));
                Vec::new()
            }
            Input::Keyboard(h) => {
                c.set_keyboard_height(f64::from(h));
                Vec::new()
            }
            Input::Disable(d) => c.set_disabled(d),
        };

        for event in &events {
            match event {
                ModalEvent::Opened => {
                    assert!(!opened_outstanding, "Opened reported twice");
                    opened_outstanding = true;
                }
                ModalEvent::Closed => opened_outstanding = false,
                ModalEvent::ClosingState(_) | ModalEvent::RequestClose => {}
            }
        }

        assert!(c.driver().live() <= 1, "more than one live animation");
        if c.state().is_settled() {
            assert!(c.live_handle().is_none(), "settled with a live animation");
            assert!(!c.is_interactive(), "settled during a drag");
        }
        assert!(c.position().is_finite(), "position is not finite");
        let opacity = c.frame().backdrop_opacity;
        assert!((0.0..=1.0).contains(&opacity), "backdrop opacity out of range");
    }

    c.close();
    c.tick(Duration::from_secs(3));
    assert_eq!(c.state(), ModalState::Closed);
    assert_eq!(c.driver().live(), 0);
});
