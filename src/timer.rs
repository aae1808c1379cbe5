use serde::Serialize;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerPreset {
    pub name: &'static str,
    pub minutes: u32,
    pub seconds: u32,
}

pub const PRESETS: [TimerPreset; 4] = [
    TimerPreset { name: "Pomodoro", minutes: 25, seconds: 0 },
    TimerPreset { name: "Short Break", minutes: 5, seconds: 0 },
    TimerPreset { name: "Long Break", minutes: 15, seconds: 0 },
    TimerPreset { name: "Deep Work", minutes: 45, seconds: 0 },
];

pub fn find_preset(name: &str) -> Option<TimerPreset> {
    PRESETS
        .iter()
        .copied()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u32),
    Completed,
    Idle,
}

/// Countdown state. Time only moves through [`FocusTimer::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTimer {
    minutes: u32,
    seconds: u32,
    time_left: u32,
    running: bool,
    completed: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self {
            minutes: 25,
            seconds: 0,
            time_left: 0,
            running: false,
            completed: false,
        }
    }
}

impl FocusTimer {
    pub fn duration_secs(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn start(&mut self) {
        if self.time_left == 0 {
            self.time_left = self.duration_secs();
        }
        self.running = self.time_left > 0;
        self.completed = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.time_left = 0;
        self.completed = false;
    }

    /// Changes the configured duration. Ignored while running.
    pub fn set_duration(&mut self, minutes: u32, seconds: u32) -> bool {
        if self.running {
            return false;
        }
        self.minutes = minutes;
        self.seconds = seconds;
        self.time_left = 0;
        self.completed = false;
        true
    }

    pub fn set_preset(&mut self, preset: TimerPreset) -> bool {
        self.set_duration(preset.minutes, preset.seconds)
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.running = false;
            self.completed = true;
            return Tick::Completed;
        }
        self.time_left -= 1;
        Tick::Running(self.time_left)
    }

    pub fn display(&self) -> String {
        let total = if self.time_left > 0 {
            self.time_left
        } else {
            self.duration_secs()
        };
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Percentage of the configured duration already elapsed; 0 when nothing is counting.
    pub fn progress(&self) -> f64 {
        let duration = self.duration_secs();
        if self.time_left == 0 || duration == 0 {
            return 0.0;
        }
        f64::from(duration.saturating_sub(self.time_left)) / f64::from(duration) * 100.0
    }
}

/// Drives a [`FocusTimer`] from a one-second tokio interval.
///
/// At most one ticking task exists; it is aborted on pause, stop and drop, and ends by
/// itself when the countdown completes.
pub struct TimerRunner {
    timer: Arc<Mutex<FocusTimer>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Default for TimerRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerRunner {
    pub fn new() -> Self {
        Self {
            timer: Arc::new(Mutex::new(FocusTimer::default())),
            ticker: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> FocusTimer {
        lock(&self.timer).clone()
    }

    pub fn start(&self) {
        let running = {
            let mut timer = lock(&self.timer);
            timer.start();
            timer.is_running()
        };
        if !running {
            return;
        }

        let mut ticker = lock(&self.ticker);
        if ticker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        let timer = Arc::clone(&self.timer);
        *ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                match lock(&timer).tick() {
                    Tick::Running(_) => {}
                    Tick::Completed => {
                        info!("focus session completed");
                        break;
                    }
                    Tick::Idle => break,
                }
            }
        }));
    }

    pub fn pause(&self) {
        lock(&self.timer).pause();
        self.cancel_ticker();
    }

    pub fn stop(&self) {
        lock(&self.timer).stop();
        self.cancel_ticker();
    }

    pub fn set_preset(&self, preset: TimerPreset) -> bool {
        lock(&self.timer).set_preset(preset)
    }

    fn cancel_ticker(&self) {
        if let Some(handle) = lock(&self.ticker).take() {
            handle.abort();
        }
    }
}

impl Drop for TimerRunner {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
