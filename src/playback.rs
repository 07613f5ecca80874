//! Endless replay of a compiled route

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::control::clock::LocalClock;
use crate::control::sink::{fire_and_forget, LocationSink};
use crate::error::{Result, WalkerError};
use crate::route::compiler::route_duration;
use crate::MovementInstruction;

const SEPARATOR: &str = "--------------------------------------";

/// Blocks the walk between two steps
pub trait Pause {
    fn pause(&mut self, duration: Duration);
}

/// Wall clock sleep of the current thread
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Everything resolved before the first step, fixed afterwards
pub struct Session {
    pub instructions: Vec<MovementInstruction>,
    pub device_id: String,
    pub clock: LocalClock,
    /// Metres per second the instructions were compiled with
    pub speed: f64,
}

/// Print the total duration of one lap
pub fn report_duration<W: Write>(
    out: &mut W,
    instructions: &[MovementInstruction],
) -> Result<()> {
    writeln!(out, "Duration of Route: {}", route_duration(instructions))?;
    writeln!(out, "{}", SEPARATOR)?;

    Ok(())
}

/// Walks the session instructions in order, forever.
///
/// Each step posts the position, prints it and then waits the instruction
/// dwell time. After the last instruction the walk starts again from the
/// first one. Only the playback moves its cursor.
pub struct Playback<S, P, W>
where
    S: LocationSink,
    P: Pause,
    W: Write,
{
    session: Session,
    cursor: usize,
    sink: S,
    pause: P,
    out: W,
}

impl<S, P, W> Playback<S, P, W>
where
    S: LocationSink,
    P: Pause,
    W: Write,
{
    pub fn new(session: Session, sink: S, pause: P, out: W) -> Result<Self> {
        if session.instructions.is_empty() {
            return Err(WalkerError::NoInstructions);
        }

        Ok(Self {
            session,
            cursor: 0,
            sink,
            pause,
            out,
        })
    }

    /// Index of the next instruction to play
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Play one instruction and advance, returning the index played
    pub fn step(&mut self) -> usize {
        let played = self.cursor;
        let instruction = self.session.instructions[played];

        fire_and_forget(&self.sink, instruction.coordinates, &self.session.device_id);

        if let Err(e) = self.display(played) {
            log::warn!("failed on print the step {}: {}", played + 1, e);
        }

        let dwell = Duration::try_from_secs_f64(instruction.dwell_seconds).unwrap_or_else(|e| {
            log::warn!(
                "step {} dwell of {} seconds can't be waited, moving on: {}",
                played + 1,
                instruction.dwell_seconds,
                e
            );
            Duration::ZERO
        });
        self.pause.pause(dwell);

        self.cursor = (played + 1) % self.session.instructions.len();

        played
    }

    /// Walk until the process is stopped
    pub fn run(&mut self) -> ! {
        log::info!(
            "walking {} steps at {} m/s",
            self.session.instructions.len(),
            self.session.speed
        );

        loop {
            self.step();
        }
    }

    fn display(&mut self, index: usize) -> std::io::Result<()> {
        let instruction = &self.session.instructions[index];

        writeln!(self.out, "{}", self.session.clock.now())?;
        writeln!(
            self.out,
            "({}/{}) Moving to waypoint with coordinates:",
            index + 1,
            self.session.instructions.len()
        )?;
        writeln!(
            self.out,
            "{},{}",
            instruction.latitude(),
            instruction.longitude()
        )?;
        writeln!(self.out, "Time before moving to next waypoint:")?;
        writeln!(self.out, "{} seconds", instruction.dwell_seconds)?;
        writeln!(self.out, "{}", SEPARATOR)?;
        self.out.flush()
    }
}
