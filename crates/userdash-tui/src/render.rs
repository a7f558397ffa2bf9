//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use userdash_core::router::Route;

use crate::state::AppState;
use crate::{dashboard, login};

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the current route.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match app.route {
        // The reducer redirects unauthenticated dashboard visits; this is the
        // last line in case a frame lands in between.
        Route::Dashboard if app.store.auth.is_authenticated => {
            dashboard::render_dashboard(frame, area, app);
        }
        Route::Dashboard | Route::Login => login::render_login(frame, area, app),
    }
}

pub(crate) fn spinner(frame_index: usize) -> &'static str {
    SPINNER_FRAMES[frame_index % SPINNER_FRAMES.len()]
}

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Renders key hints on the last row of `area`.
pub(crate) fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    if area.height == 0 {
        return;
    }
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}
