//! Interactive driver reading hotkey tokens and input events from stdin.
//!
//! Stdin is read on its own thread, which plays the role of the hotkey and
//! input-hook producers: it only ever enqueues messages on the pump handle.

use std::io::{BufRead, Write};
use std::thread;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tally_core::{
    ControlOp, DetachedHook, EventPump, InputEvent, MouseButton, PumpHandle, PumpMessage,
    SettingsDraft, WheelDirection,
};

use super::util::{runtime, write_notification};

/// Parses one line of interactive input.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str, now_ms: i64) -> Result<Option<PumpMessage>> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let msg = match (head.to_ascii_lowercase().as_str(), arg) {
        ("=" | "+", None) => PumpMessage::Control(ControlOp::Increment),
        ("-", None) => PumpMessage::Control(ControlOp::Decrement),
        ("0", None) => PumpMessage::Control(ControlOp::SetCount(0)),
        ("9", None) => PumpMessage::Control(ControlOp::TogglePause),
        ("delete" | "quit" | "q", None) => PumpMessage::Control(ControlOp::Stop),
        ("set", Some(n)) => {
            let n = n.parse::<i64>().with_context(|| format!("invalid count: {n}"))?;
            PumpMessage::Control(ControlOp::SetCount(n))
        }
        ("key", Some(code)) => {
            let code = code
                .parse::<u32>()
                .with_context(|| format!("invalid key code: {code}"))?;
            PumpMessage::Input(InputEvent::key_down(code, now_ms))
        }
        ("mouse", Some(button)) => {
            let button: MouseButton = button.parse()?;
            PumpMessage::Input(InputEvent::mouse_down(button, now_ms))
        }
        ("wheel", Some(direction)) => {
            let direction: WheelDirection = direction.parse()?;
            PumpMessage::Input(InputEvent::wheel(direction, now_ms))
        }
        _ => bail!("unrecognised input: {line}"),
    };
    Ok(Some(msg))
}

/// Forwards stdin lines to the pump until EOF, a quit token, or the pump
/// exiting on its own.
fn feed<R: BufRead>(reader: R, handle: &PumpHandle) {
    let mut lines = reader.lines();
    while !handle.is_stopped() {
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        match parse_line(&line, Utc::now().timestamp_millis()) {
            Ok(Some(msg)) => {
                let quit = msg == PumpMessage::Control(ControlOp::Stop);
                handle.send(msg);
                if quit {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "ignored input line"),
        }
    }
    handle.stop();
}

/// Runs the watch command until quit or EOF. Returns the final count.
pub fn run<R, W>(reader: R, writer: &mut W, draft: SettingsDraft, json: bool) -> Result<i64>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let rt = runtime()?;
    rt.block_on(async move {
        let (handle, mut rx, task) = EventPump::spawn(draft, DetachedHook::default());

        let producer = thread::spawn(move || feed(reader, &handle));

        while let Some(n) = rx.recv().await {
            write_notification(writer, &n, json)?;
            writer.flush()?;
        }

        let final_settings = task.await.context("pump task failed")?;
        if producer.join().is_err() {
            tracing::warn!("input thread panicked");
        }
        anyhow::Ok(final_settings.count())
    })
}
