use crate::tui::{TuiHandle, TuiMsg};
use crossterm::event;
use std::time::Duration;
use tokio::time;
use tokio_util::sync::CancellationToken;

const INPUT_POLL: Duration = Duration::from_millis(100);
const TICK: Duration = Duration::from_millis(80);

/// Feed terminal input and redraw ticks into the UI loop until `shutdown`
/// is cancelled.
pub fn spawn_tui_feeders(ui: TuiHandle, shutdown: CancellationToken) {
    let ui_in = ui.clone();
    let stop_input = shutdown.clone();
    // One blocking thread polls so cancellation is noticed between events.
    tokio::task::spawn_blocking(move || {
        while !stop_input.is_cancelled() {
            match event::poll(INPUT_POLL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(e) => {
                        if !ui_in.send(TuiMsg::InputEvent(e)) {
                            break;
                        }
                    }
                    Err(e) => {
                        ui_in.send(TuiMsg::OpError(format!("input: {e}")));
                        break;
                    }
                },
                Err(e) => {
                    ui_in.send(TuiMsg::OpError(format!("input: {e}")));
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = time::interval(TICK);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {
                    if !ui.send(TuiMsg::Tick) {
                        break;
                    }
                }
            }
        }
    });
}
