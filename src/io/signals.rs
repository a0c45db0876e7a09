//! Unix signal handling for the board.
//!
//! A dedicated thread waits for SIGINT, SIGTERM and SIGHUP. It never touches
//! board state: it clears the shared `running` flag and posts a message so the
//! board loop, which owns every timer, can shut down on its own thread.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{Receiver, Sender, TryRecvError, channel},
    thread,
};

/// Messages from the signal thread to the board loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    /// Stop the board (SIGTERM, SIGINT, SIGHUP)
    Shutdown { signal: i32 },
}

/// Signal handling state shared between threads
pub struct SignalState {
    /// Atomic flag indicating if the application should keep running
    pub running: Arc<AtomicBool>,
    /// Channel receiver for signal messages
    pub signal_receiver: Receiver<SignalMessage>,
    /// Channel sender, also used to request a shutdown from the board itself
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    /// State with no listener thread attached.
    pub fn detached() -> Self {
        let (signal_sender, signal_receiver) = channel();
        Self {
            running: Arc::new(AtomicBool::new(true)),
            signal_receiver,
            signal_sender,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the board loop to stop.
    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Drain pending messages without blocking.
    ///
    /// Returns the shutdown message if one arrived. A disconnected channel
    /// means the listener is gone and is not treated as a shutdown.
    pub fn poll(&self) -> Option<SignalMessage> {
        let mut shutdown = None;
        loop {
            match self.signal_receiver.try_recv() {
                Ok(message) => shutdown = Some(message),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        shutdown
    }
}

fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        _ => "signal",
    }
}

/// Log a received shutdown message.
pub fn log_signal_message(message: &SignalMessage) {
    match message {
        SignalMessage::Shutdown { signal } => {
            log_block_start!("Received {}, shutting down", signal_name(*signal));
        }
    }
}

/// Spawn the signal listener thread.
pub fn setup_signal_handler() -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let running_clone = Arc::clone(&state.running);
    let signal_sender_clone = state.signal_sender.clone();

    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                running_clone.store(false, Ordering::SeqCst);
                // The receiver may already be gone during shutdown
                let _ = signal_sender_clone.send(SignalMessage::Shutdown { signal });
            }
        })
        .context("failed to spawn signal handler thread")?;

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_state_starts_running() {
        let state = SignalState::detached();
        assert!(state.is_running());
        assert_eq!(state.poll(), None);
    }

    #[test]
    fn test_request_shutdown_clears_flag() {
        let state = SignalState::detached();
        state.request_shutdown();
        assert!(!state.is_running());
    }

    #[test]
    fn test_poll_drains_messages() {
        let state = SignalState::detached();
        state
            .signal_sender
            .send(SignalMessage::Shutdown { signal: SIGTERM })
            .unwrap();
        state
            .signal_sender
            .send(SignalMessage::Shutdown { signal: SIGINT })
            .unwrap();

        assert_eq!(state.poll(), Some(SignalMessage::Shutdown { signal: SIGINT }));
        assert_eq!(state.poll(), None);
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(signal_name(SIGHUP), "SIGHUP");
        assert_eq!(signal_name(-1), "signal");
    }
}
