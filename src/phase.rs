use crate::display::PhaseColor;

pub const WORK_MIN: u32 = 30;
pub const SHORT_BREAK_MIN: u32 = 5;
pub const LONG_BREAK_MIN: u32 = 20;

/// Every 8th repetition is a long break.
pub const LONG_BREAK_EVERY: u32 = 8;

/// One interval of the pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Phase started by repetition `r` (1-based, counted since the last reset).
    pub fn for_repetition(r: u32) -> Self {
        if r % LONG_BREAK_EVERY == 0 {
            Phase::LongBreak
        } else if r % 2 == 0 {
            Phase::ShortBreak
        } else {
            Phase::Work
        }
    }

    pub fn minutes(&self) -> u32 {
        match self {
            Phase::Work => WORK_MIN,
            Phase::ShortBreak => SHORT_BREAK_MIN,
            Phase::LongBreak => LONG_BREAK_MIN,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.minutes() * 60
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak | Phase::LongBreak => "Break",
        }
    }

    pub fn color(&self) -> PhaseColor {
        match self {
            Phase::Work => PhaseColor::Work,
            Phase::ShortBreak => PhaseColor::ShortBreak,
            Phase::LongBreak => PhaseColor::LongBreak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rule_holds_for_first_thousand_repetitions() {
        for r in 1..=1000u32 {
            let expected = if r % 8 == 0 {
                Phase::LongBreak
            } else if r % 2 == 0 {
                Phase::ShortBreak
            } else {
                Phase::Work
            };
            assert_eq!(Phase::for_repetition(r), expected, "repetition {r}");
        }
    }

    #[test]
    fn test_first_cycle_order() {
        let cycle: Vec<Phase> = (1..=9).map(Phase::for_repetition).collect();
        assert_eq!(
            cycle,
            vec![
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
                Phase::Work,
            ]
        );
    }

    #[test]
    fn test_odd_repetitions_are_always_work() {
        assert!((1..200u32)
            .step_by(2)
            .all(|r| Phase::for_repetition(r) == Phase::Work));
    }

    #[test]
    fn test_durations() {
        assert_eq!(Phase::Work.duration_secs(), 1800);
        assert_eq!(Phase::ShortBreak.duration_secs(), 300);
        assert_eq!(Phase::LongBreak.duration_secs(), 1200);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(Phase::Work.label(), "Work");
        assert_eq!(Phase::ShortBreak.label(), "Break");
        assert_eq!(Phase::LongBreak.label(), "Break");
        assert_eq!(Phase::ShortBreak.color(), PhaseColor::ShortBreak);
        assert_eq!(Phase::LongBreak.color(), PhaseColor::LongBreak);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Phase::ShortBreak.to_string(), "ShortBreak");
        assert_eq!(Phase::Work.to_string(), "Work");
    }
}
