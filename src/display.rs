use crate::phase::Phase;

pub const IDLE_LABEL: &str = "Timer";
pub const RESTARTED_LABEL: &str = "Restarted";
pub const IDLE_TIME_TEXT: &str = "00:00";

/// Semantic label colors; the renderer decides what they look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseColor {
    Work,
    ShortBreak,
    LongBreak,
    Idle,
}

/// Presentation collaborator driven by the session controller
pub trait Display {
    fn set_time_text(&mut self, text: &str);
    fn set_phase_label(&mut self, text: &str, color: PhaseColor);
    /// One glyph per completed work session.
    fn set_completed_marks(&mut self, count: u32);
    fn set_controls_enabled(&mut self, start_enabled: bool, stop_enabled: bool);

    /// Called when a countdown reached zero and `next` was started in its place.
    fn phase_finished(&mut self, _next: Phase) {}
}

/// View model for the terminal renderer
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub time_text: String,
    pub label: String,
    pub color: PhaseColor,
    pub completed_marks: u32,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    /// Set on every automatic phase change, cleared by whoever consumes it.
    pub alert_pending: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            time_text: IDLE_TIME_TEXT.to_string(),
            label: IDLE_LABEL.to_string(),
            color: PhaseColor::Idle,
            completed_marks: 0,
            start_enabled: true,
            stop_enabled: false,
            alert_pending: false,
        }
    }
}

impl DisplayState {
    pub fn marks(&self, glyph: &str) -> String {
        glyph.repeat(self.completed_marks as usize)
    }

    pub fn take_alert(&mut self) -> bool {
        std::mem::take(&mut self.alert_pending)
    }
}

impl Display for DisplayState {
    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_string();
    }

    fn set_phase_label(&mut self, text: &str, color: PhaseColor) {
        self.label = text.to_string();
        self.color = color;
    }

    fn set_completed_marks(&mut self, count: u32) {
        self.completed_marks = count;
    }

    fn set_controls_enabled(&mut self, start_enabled: bool, stop_enabled: bool) {
        self.start_enabled = start_enabled;
        self.stop_enabled = stop_enabled;
    }

    fn phase_finished(&mut self, _next: Phase) {
        self.alert_pending = true;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    TimeText(String),
    PhaseLabel(String, PhaseColor),
    CompletedMarks(u32),
    ControlsEnabled { start: bool, stop: bool },
    PhaseFinished(Phase),
}

/// Test display that records every call in order
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn time_texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::TimeText(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<(&str, PhaseColor)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::PhaseLabel(t, color) => Some((t.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    pub fn marks(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::CompletedMarks(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn last_controls(&self) -> Option<(bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::ControlsEnabled { start, stop } => Some((*start, *stop)),
            _ => None,
        })
    }
}

impl Display for RecordingDisplay {
    fn set_time_text(&mut self, text: &str) {
        self.calls.push(DisplayCall::TimeText(text.to_string()));
    }

    fn set_phase_label(&mut self, text: &str, color: PhaseColor) {
        self.calls
            .push(DisplayCall::PhaseLabel(text.to_string(), color));
    }

    fn set_completed_marks(&mut self, count: u32) {
        self.calls.push(DisplayCall::CompletedMarks(count));
    }

    fn set_controls_enabled(&mut self, start_enabled: bool, stop_enabled: bool) {
        self.calls.push(DisplayCall::ControlsEnabled {
            start: start_enabled,
            stop: stop_enabled,
        });
    }

    fn phase_finished(&mut self, next: Phase) {
        self.calls.push(DisplayCall::PhaseFinished(next));
    }
}
