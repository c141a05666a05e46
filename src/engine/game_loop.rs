// Logic frame clock
//
// Hero logic is frame-counted (every status duration, cooldown and
// animation tick is one logic frame), so it runs on a fixed timestep
// while rendering runs as fast as the window allows.

use std::time::{Duration, Instant};

/// Logic frames per second
pub const LOGIC_FPS: u32 = 30;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / LOGIC_FPS as u64);

/// Maximum number of logic frames per render frame to prevent spiral of death
const MAX_CATCH_UP_FRAMES: u32 = 5;

/// Fixed-timestep accumulator for avatar logic
#[derive(Debug)]
pub struct FrameClock {
    /// Accumulated time not yet spent on logic frames
    accumulator: Duration,

    /// Time of last render frame
    last_frame_time: Instant,

    paused: bool,

    /// Logic frames executed
    logic_frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            logic_frames: 0,
        }
    }

    /// Begin a render frame, returns the number of logic frames to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of wall clock, returns the logic frames due
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut frames = 0;
        while self.accumulator >= FRAME_DURATION && frames < MAX_CATCH_UP_FRAMES {
            self.accumulator -= FRAME_DURATION;
            frames += 1;
        }

        // Drop time we could not catch up on
        if frames == MAX_CATCH_UP_FRAMES && self.accumulator >= FRAME_DURATION {
            log::debug!("logic fell behind by {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.logic_frames += frames as u64;
        frames
    }

    /// Fraction of the next logic frame already elapsed, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FRAME_DURATION.as_secs_f32()
    }

    pub fn logic_frames(&self) -> u64 {
        self.logic_frames
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a burst of logic frames
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
