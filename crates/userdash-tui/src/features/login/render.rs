//! Login screen rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::state::LoginField;
use crate::common::{mask, tail_fit};
use crate::render::{centered_rect, render_hints, spinner};
use crate::state::AppState;

const FORM_WIDTH: u16 = 52;
const TEST_CREDENTIALS: &str = "Username: emilys | Password: emilyspass";

pub fn render_login(frame: &mut Frame, area: Rect, app: &AppState) {
    let login = &app.login;
    let auth = &app.store.auth;

    let banner_height = if auth.error.is_some() { 4 } else { 0 };
    let notice_height = u16::from(login.notice.is_some() && auth.error.is_none());

    let [
        header,
        notice,
        banner,
        username,
        username_msg,
        password,
        password_msg,
        button,
        _,
        hint,
    ] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(notice_height),
        Constraint::Length(banner_height),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
    ])
    .areas(centered_rect(area, FORM_WIDTH, 17 + banner_height + notice_height));

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Welcome Back",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Please login to your account",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, header);

    if let Some(text) = login.notice.as_deref().filter(|_| auth.error.is_none()) {
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Yellow)))
                .alignment(Alignment::Center),
            notice,
        );
    }

    if let Some(error) = auth.error.as_deref() {
        render_error_banner(frame, banner, error);
    }

    let locked = auth.is_loading || app.restoring;
    render_field(
        frame,
        username,
        "Username",
        &login.username,
        login.focus == LoginField::Username,
        locked,
    );
    render_validation(frame, username_msg, login.username_error);

    render_field(
        frame,
        password,
        "Password",
        &mask(&login.password),
        login.focus == LoginField::Password,
        locked,
    );
    render_validation(frame, password_msg, login.password_error);

    let label = if app.restoring {
        format!("{} Restoring session...", spinner(app.spinner_frame))
    } else if auth.is_loading {
        format!("{} Logging in...", spinner(app.spinner_frame))
    } else {
        "Login".to_string()
    };
    let button_style = if locked {
        Style::default().fg(Color::Black).bg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {label} "), button_style))
            .alignment(Alignment::Center),
        button,
    );

    let hint_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" ℹ Test Credentials ");
    frame.render_widget(
        Paragraph::new(TEST_CREDENTIALS)
            .block(hint_block)
            .wrap(Wrap { trim: true }),
        hint,
    );

    render_hints(
        frame,
        area,
        &[
            ("Tab", "switch field"),
            ("Enter", "login"),
            ("Esc", "dismiss"),
            ("Ctrl+C", "quit"),
        ],
    );
}

fn render_error_banner(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " ✖ Login Failed ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Esc to dismiss ").right_aligned());
    frame.render_widget(
        Paragraph::new(error).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    placeholder: &str,
    value: &str,
    focused: bool,
    locked: bool,
) {
    let border = match (focused, locked) {
        (_, true) => Color::DarkGray,
        (true, false) => Color::Blue,
        (false, false) => Color::Gray,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner_width = area.width.saturating_sub(2) as usize;

    let content = if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(tail_fit(value, inner_width.saturating_sub(1)))
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused && !locked {
        let shown = tail_fit(value, inner_width.saturating_sub(1)).width() as u16;
        frame.set_cursor_position((area.x + 1 + shown, area.y + 1));
    }
}

fn render_validation(frame: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
            area,
        );
    }
}
