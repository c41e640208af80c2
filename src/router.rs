//! Top-level view selection

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    CheatSheet,
    Practice,
    Concepts,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::CheatSheet, View::Practice, View::Concepts];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::CheatSheet => "Cheat Sheet",
            View::Practice => "Exam Simulator",
            View::Concepts => "Key Concepts",
        }
    }

    /// One-line blurb for the dashboard menu
    pub fn description(self) -> &'static str {
        match self {
            View::Dashboard => "Countdown and exam format reminder.",
            View::CheatSheet => "View and print your condensed A4 study guide covering all 5 chapters.",
            View::Practice => "Practice error spotting and code completion with AI-generated questions.",
            View::Concepts => "Deep dive into MQTT vs HTTP, Sleep Modes, and FreeRTOS states.",
        }
    }

    /// Views reachable from the dashboard menu, in menu order
    pub fn destinations() -> [View; 3] {
        [View::CheatSheet, View::Practice, View::Concepts]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Holds the active view. Any view may navigate to any other.
#[derive(Debug, Default)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Switch views; returns the view that was left
    pub fn navigate(&mut self, view: View) -> View {
        log::debug!("Navigating {} -> {}", self.current, view);
        std::mem::replace(&mut self.current, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_dashboard() {
        assert_eq!(Router::new().current(), View::Dashboard);
    }

    #[test]
    fn test_navigate_between_any_views() {
        let mut router = Router::new();
        for from in View::ALL {
            for to in View::ALL {
                router.navigate(from);
                assert_eq!(router.navigate(to), from);
                assert_eq!(router.current(), to);
            }
        }
    }
}
