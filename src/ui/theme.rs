use ratatui::style::Color;

pub struct Theme {
    #[allow(dead_code)] // Background color field for future use
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),             // Dark background
    fg: Color::Rgb(205, 214, 244),          // Light foreground
    primary: Color::Rgb(137, 180, 250),     // Blue
    secondary: Color::Rgb(250, 179, 135),   // Orange/Peach
    comment: Color::Rgb(108, 112, 134),     // Grey
    success: Color::Rgb(166, 227, 161),     // Green
    error: Color::Rgb(243, 139, 168),       // Red/Pink
    border_focused: Color::Rgb(249, 226, 175), // Yellow
    border_normal: Color::Rgb(108, 112, 134),  // Grey
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter than bg
};
