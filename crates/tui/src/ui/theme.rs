use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(200, 140, 60),
            border: Color::Rgb(70, 70, 70),
            positive: Color::Rgb(110, 170, 100),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
