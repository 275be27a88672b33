//! Shared UI theme constants.

use ratatui::style::Color;

use crate::types::Emotion;

pub const CHART_TITLE: &str = "Data from Student Gaze monitor";
pub const X_AXIS_TITLE: &str = "Sample";
pub const Y_AXIS_TITLE: &str = "Number of Students";

pub const AXIS: Color = Color::Rgb(170, 170, 180);

// Neutral is drawn black in a light plot; white reads better on a terminal
pub fn emotion_color(e: Emotion) -> Color {
    match e {
        Emotion::Neutral => Color::White,
        Emotion::Happy => Color::Yellow,
        Emotion::Sad => Color::Magenta,
        Emotion::Surprised => Color::Rgb(255, 165, 0),
        Emotion::Anger => Color::Red,
    }
}
