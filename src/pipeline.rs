//! Plumbing between the (external) hand-landmark detector and the frame
//! loop: a producer thread behind a stop flag and a bounded channel, with a
//! drain-to-latest receive so a slow consumer processes the freshest report
//! instead of falling behind. The core itself stays single-threaded; whole
//! frames cross the channel, never partial ones.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam_channel::{Receiver, SendTimeoutError, Sender};

use crate::types::HandFrame;

/// How often a blocked producer re-checks the stop flag.
const SEND_POLL: Duration = Duration::from_millis(50);

/// A per-frame source of hand landmark reports. Anything that produces
/// ordered 21-point sets qualifies: a live detector, a recording, a script.
pub trait LandmarkSource: Send + 'static {
    /// Blocks until the next frame's reports are available; an empty vec
    /// means "no hand this frame", `None` ends the stream.
    fn next_hands(&mut self) -> Option<Vec<HandFrame>>;
}

#[derive(Debug)]
pub struct HandStream {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl HandStream {
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for HandStream {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawn the producer thread feeding `tx`. The thread ends when the source
/// runs dry, the consumer goes away, or the stream is stopped.
pub fn start_hand_stream<S: LandmarkSource>(mut source: S, tx: Sender<Vec<HandFrame>>) -> HandStream {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    let handle = thread::spawn(move || {
        'frames: while !stop_flag.load(Ordering::Relaxed) {
            let Some(mut hands) = source.next_hands() else {
                break;
            };
            // A full queue must not wedge shutdown; poll the stop flag
            // while waiting for capacity.
            loop {
                match tx.send_timeout(hands, SEND_POLL) {
                    Ok(()) => break,
                    Err(SendTimeoutError::Timeout(back)) => {
                        if stop_flag.load(Ordering::Relaxed) {
                            break 'frames;
                        }
                        hands = back;
                    }
                    Err(SendTimeoutError::Disconnected(_)) => break 'frames,
                }
            }
        }
        log::info!("landmark stream finished");
    });

    HandStream {
        stop,
        handle: Some(handle),
    }
}

/// Receive the next report, then drain anything newer that is already
/// queued. Stale frames are dropped whole; `None` once the stream is done.
pub fn recv_latest(rx: &Receiver<Vec<HandFrame>>) -> Option<Vec<HandFrame>> {
    let mut hands = rx.recv().ok()?;
    while let Ok(newer) = rx.try_recv() {
        hands = newer;
    }
    Some(hands)
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Handedness, Point};
    use crossbeam_channel::{bounded, unbounded};

    fn tagged(confidence: f32) -> Vec<HandFrame> {
        vec![HandFrame {
            landmarks: vec![Point::default(); 21],
            handedness: Handedness::Right,
            confidence,
        }]
    }

    struct Replay {
        left: usize,
    }

    impl LandmarkSource for Replay {
        fn next_hands(&mut self) -> Option<Vec<HandFrame>> {
            if self.left == 0 {
                return None;
            }
            self.left -= 1;
            Some(tagged(self.left as f32))
        }
    }

    #[test]
    fn recv_latest_drains_to_the_newest_report() {
        let (tx, rx) = unbounded();
        tx.send(tagged(1.0)).unwrap();
        tx.send(tagged(2.0)).unwrap();
        tx.send(tagged(3.0)).unwrap();
        let hands = recv_latest(&rx).unwrap();
        assert_eq!(hands[0].confidence, 3.0);
        drop(tx);
        assert!(recv_latest(&rx).is_none());
    }

    #[test]
    fn stream_delivers_every_frame_to_a_keeping_consumer() {
        let (tx, rx) = bounded(1);
        let stream = start_hand_stream(Replay { left: 5 }, tx);
        let mut seen = 0;
        while let Ok(hands) = rx.recv() {
            assert_eq!(hands[0].confidence, (4 - seen) as f32);
            seen += 1;
        }
        assert_eq!(seen, 5);
        stream.stop();
    }

    #[test]
    fn dropping_the_receiver_unblocks_the_producer() {
        let (tx, rx) = bounded(1);
        let stream = start_hand_stream(Replay { left: 100 }, tx);
        let _ = rx.recv();
        drop(rx);
        // Must join promptly instead of deadlocking on a full queue.
        stream.stop();
    }
}
