use std::time::Duration;

use tracing::{debug, info, trace};

use crate::display::{Display, PhaseColor, IDLE_LABEL, IDLE_TIME_TEXT, RESTARTED_LABEL};
use crate::phase::Phase;
use crate::scheduler::{Scheduler, Task, TaskHandle, TimerQueue};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Countdown bookkeeping, zeroed by reset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Phases started since the last reset; selects the next phase.
    pub repetition_count: u32,
    /// Work phases begun since the last reset (counted at start).
    pub completed_work_sessions: u32,
    pub current_phase: Option<Phase>,
    pub remaining_seconds: u32,
    pub is_paused: bool,
    pub tick_handle: Option<TaskHandle>,
    pub restore_handle: Option<TaskHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running(Phase),
    Paused(Phase),
}

/// "MM:SS"; minutes are not capped at 59.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// The pomodoro state machine.
///
/// Owns the session state and drives the display. Time never passes on its own:
/// every countdown step is a [`Task::Tick`] handed to the scheduler and fed back
/// through [`SessionController::dispatch`] when it falls due.
#[derive(Debug)]
pub struct SessionController<D: Display, S: Scheduler> {
    state: SessionState,
    display: D,
    scheduler: S,
}

impl<D: Display, S: Scheduler> SessionController<D, S> {
    pub fn new(display: D, scheduler: S) -> Self {
        Self {
            state: SessionState::default(),
            display,
            scheduler,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn status(&self) -> Status {
        match (self.state.current_phase, self.state.is_paused) {
            (None, _) => Status::Idle,
            (Some(phase), true) => Status::Paused(phase),
            (Some(phase), false) => Status::Running(phase),
        }
    }

    /// Starts the next phase, or continues the paused one where it stopped.
    pub fn start_or_resume(&mut self) {
        self.display.set_controls_enabled(false, true);

        match (self.state.is_paused, self.state.current_phase) {
            (true, Some(phase)) => {
                self.state.is_paused = false;
                info!(%phase, remaining = self.state.remaining_seconds, "resumed");

                self.display
                    .set_phase_label(RESTARTED_LABEL, PhaseColor::Work);
                if let Some(handle) = self.state.restore_handle.take() {
                    self.scheduler.cancel(handle);
                }
                self.state.restore_handle = Some(
                    self.scheduler
                        .schedule_after(TICK_INTERVAL, Task::RestoreLabel),
                );

                self.tick(self.state.remaining_seconds);
            }
            _ => {
                // a stop before anything ran leaves nothing to resume
                self.state.is_paused = false;

                self.state.repetition_count += 1;
                let phase = Phase::for_repetition(self.state.repetition_count);
                self.state.current_phase = Some(phase);
                if phase == Phase::Work {
                    self.state.completed_work_sessions += 1;
                }
                info!(
                    %phase,
                    repetition = self.state.repetition_count,
                    work_sessions = self.state.completed_work_sessions,
                    "phase started"
                );

                self.tick(phase.duration_secs());
                self.display.set_phase_label(phase.label(), phase.color());
            }
        }
    }

    /// Shows `seconds_left` and schedules the next step, or moves on to the
    /// next phase once the countdown hits zero.
    pub fn tick(&mut self, seconds_left: u32) {
        trace!(seconds_left, "tick");
        self.state.remaining_seconds = seconds_left;
        self.display.set_time_text(&format_time(seconds_left));

        if let Some(handle) = self.state.tick_handle.take() {
            self.scheduler.cancel(handle);
        }

        if seconds_left > 0 {
            self.state.tick_handle = Some(
                self.scheduler
                    .schedule_after(TICK_INTERVAL, Task::Tick(seconds_left - 1)),
            );
        } else {
            if let Some(finished) = self.state.current_phase {
                debug!(phase = %finished, "phase finished");
            }
            self.start_or_resume();
            self.display
                .set_completed_marks(self.state.completed_work_sessions);
            if let Some(next) = self.state.current_phase {
                self.display.phase_finished(next);
            }
        }
    }

    /// Pauses the countdown, keeping the remaining time and phase.
    pub fn stop(&mut self) {
        if let Some(handle) = self.state.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.state.is_paused = true;
        info!(remaining = self.state.remaining_seconds, "paused");
        self.display.set_controls_enabled(true, false);
    }

    /// Returns to the initial idle state from anywhere.
    pub fn reset(&mut self) {
        for handle in [self.state.tick_handle, self.state.restore_handle]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(handle);
        }
        self.display.set_time_text(IDLE_TIME_TEXT);
        self.display.set_phase_label(IDLE_LABEL, PhaseColor::Idle);
        self.display.set_completed_marks(0);
        self.state = SessionState::default();
        info!("reset");
        self.display.set_controls_enabled(true, false);
    }

    /// Runs a task the scheduler handed back.
    pub fn dispatch(&mut self, task: Task) {
        match task {
            Task::Tick(seconds_left) => {
                self.state.tick_handle = None;
                self.tick(seconds_left);
            }
            Task::RestoreLabel => {
                self.state.restore_handle = None;
                if let Some(phase) = self.state.current_phase {
                    self.display.set_phase_label(phase.label(), phase.color());
                }
            }
        }
    }
}

impl<D: Display> SessionController<D, TimerQueue> {
    /// Lets `elapsed` pass on the queue clock, dispatching everything that falls due.
    /// Returns the number of tasks run.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now() + elapsed;
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.dispatch(task);
            fired += 1;
        }
        self.scheduler.settle(until);
        fired
    }
}
