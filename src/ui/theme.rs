use ratatui::style::Color;

use crate::queue::QueueClass;

pub struct Theme {
    pub fg: Color,
    pub comment: Color,   // Grey
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub function: Color,
    pub call_stack: Color,      // Pink for the call stack lane
    pub microtask: Color,       // Green for the microtask lane
    pub macrotask: Color,       // Orange for the macrotask lane
    pub animation_frame: Color, // Cyan for the animation frame lane
    pub idle: Color,            // Grey-blue for the idle lane
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    comment: Color::Rgb(108, 112, 134),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    function: Color::Rgb(249, 226, 175),       // Yellow for functions
    call_stack: Color::Rgb(245, 194, 231),     // Pink
    microtask: Color::Rgb(166, 227, 161),      // Green
    macrotask: Color::Rgb(250, 179, 135),      // Orange
    animation_frame: Color::Rgb(148, 226, 213), // Cyan/teal
    idle: Color::Rgb(147, 153, 178),           // Grey-blue
};

impl Theme {
    /// Lane color for one queue class.
    pub fn queue_color(&self, class: QueueClass) -> Color {
        match class {
            QueueClass::CallStack => self.call_stack,
            QueueClass::Microtask => self.microtask,
            QueueClass::Macrotask => self.macrotask,
            QueueClass::AnimationFrame => self.animation_frame,
            QueueClass::Idle => self.idle,
        }
    }
}
