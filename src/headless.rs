//! Terminal front end: the same conversation, driven from stdin.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::controller::ConversationController;
use crate::model::message::Role;

pub fn run(controller: ConversationController, request_timeout: Duration) -> anyhow::Result<()> {
    // The HTTP client gives up after `request_timeout`; the extra slack covers the worker hop.
    let wait_for = request_timeout + Duration::from_secs(5);
    let stdin = io::stdin();
    play(controller, wait_for, stdin.lock().lines(), &mut io::stdout().lock())?;
    Ok(())
}

/// Drives `controller` from `lines`, writing the story to `out`.
fn play<W: Write>(
    mut controller: ConversationController,
    wait_for: Duration,
    lines: impl IntoIterator<Item = io::Result<String>>,
    out: &mut W,
) -> io::Result<()> {
    let mut shown = 0;

    controller.start();
    settle(&mut controller, wait_for);
    print_new(&controller, &mut shown, out)?;
    prompt(out)?;

    for line in lines {
        let line = line?;

        // A reply that outlived `settle` may have arrived since.
        if controller.poll() > 0 {
            print_new(&controller, &mut shown, out)?;
        }

        if controller.state().is_busy() {
            writeln!(out, "(still waiting for the storyteller)")?;
            prompt(out)?;
            continue;
        }

        if controller.submit(&line) {
            settle(&mut controller, wait_for);
            print_new(&controller, &mut shown, out)?;
        }
        prompt(out)?;
    }

    if controller.state().is_busy() {
        settle(&mut controller, wait_for);
        print_new(&controller, &mut shown, out)?;
    }

    Ok(())
}

fn settle(controller: &mut ConversationController, wait_for: Duration) {
    if controller.state().is_busy() && !controller.wait(wait_for) {
        tracing::warn!("no reply from story engine");
    }
}

fn print_new<W: Write>(
    controller: &ConversationController,
    shown: &mut usize,
    out: &mut W,
) -> io::Result<()> {
    let state = controller.state();

    for turn in &state.transcript()[*shown..] {
        if turn.role == Role::Assistant {
            writeln!(out, "\n{}\n", turn.content)?;
        }
    }
    *shown = state.transcript().len();

    if let Some(err) = state.error() {
        writeln!(out, "[error] {err}")?;
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
