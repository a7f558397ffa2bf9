//! Dashboard screen rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use userdash_core::api::Session;
use userdash_core::store::UsersState;

use super::state::{COLUMNS, DashboardState, SortColumn, SortOrder};
use crate::common::truncate_with_ellipsis;
use crate::render::{centered_rect, render_hints, spinner};
use crate::state::AppState;

const CARD_HEIGHT: u16 = 6;

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &AppState) {
    let body = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let card_height = if app.store.auth.user.is_some() {
        CARD_HEIGHT
    } else {
        0
    };
    let [header, card, table] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(card_height),
        Constraint::Min(3),
    ])
    .areas(body);

    render_header(frame, header);
    if let Some(user) = app.store.auth.user.as_ref() {
        render_user_card(frame, card, user);
    }
    render_users(frame, table, app);

    render_hints(frame, area, &key_hints(&app.store.users));
}

fn key_hints(users: &UsersState) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![
        ("←/→", "page"),
        ("p", "page size"),
        ("s", "sort"),
        ("o", "order"),
        ("r", "refetch"),
    ];
    if users.error.is_some() {
        hints.push(("Esc", "dismiss"));
    }
    hints.extend([("l", "logout"), ("q", "quit")]);
    hints
}

fn render_header(frame: &mut Frame, area: Rect) {
    let [title, action] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(12)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            " Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "[l] Logout ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        action,
    );
}

fn render_user_card(frame: &mut Frame, area: Rect, user: &Session) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
    };
    let lines = vec![
        field("Name", user.full_name()),
        field("Username", format!("@{}", user.username)),
        field("Email", user.email.clone()),
        field("Gender", user.gender.clone()),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Current User Information ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_users(frame: &mut Frame, area: Rect, app: &AppState) {
    let users = &app.store.users;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" All Users ({} total) ", users.users.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if users.is_loading {
        let spinner_area = centered_rect(inner, inner.width, 1);
        frame.render_widget(
            Paragraph::new(format!("{} Loading users...", spinner(app.spinner_frame)))
                .alignment(Alignment::Center),
            spinner_area,
        );
        return;
    }

    if let Some(error) = users.error.as_deref() {
        render_error(frame, inner, error);
        return;
    }

    let [table_area, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    render_table(frame, table_area, &app.dashboard, users);
    frame.render_widget(
        Paragraph::new(footer_text(&app.dashboard, users))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        footer,
    );
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " ✖ Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" r to retry · Esc to dismiss ").right_aligned());
    let banner = Rect::new(area.x, area.y, area.width, area.height.min(4));
    frame.render_widget(
        Paragraph::new(error).block(block).wrap(Wrap { trim: true }),
        banner,
    );
}

fn render_table(frame: &mut Frame, area: Rect, dash: &DashboardState, users: &UsersState) {
    let header = Row::new(COLUMNS.iter().map(|&column| {
        Cell::from(header_label(column, dash)).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().fg(Color::Cyan));

    let name_width = (area.width.saturating_sub(8) / 2).max(4) as usize;
    let sorted = dash.sort.apply(&users.users);
    let rows = sorted[dash.page_range(sorted.len())].iter().map(|user| {
        Row::new(vec![
            Cell::from(truncate_with_ellipsis(&user.first_name, name_width)),
            Cell::from(truncate_with_ellipsis(&user.last_name, name_width)),
            Cell::from(user.age.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(42),
            Constraint::Percentage(42),
            Constraint::Min(6),
        ],
    )
    .header(header);
    frame.render_widget(table, area);
}

fn header_label(column: SortColumn, dash: &DashboardState) -> String {
    match (dash.sort.column, dash.sort.order) {
        (Some(active), SortOrder::Ascending) if active == column => {
            format!("{} ▲", column.title())
        }
        (Some(active), SortOrder::Descending) if active == column => {
            format!("{} ▼", column.title())
        }
        _ => column.title().to_string(),
    }
}

/// `Total <n> users`, with the server total when it differs from the window.
pub(crate) fn footer_text(dash: &DashboardState, users: &UsersState) -> String {
    let rows = users.users.len();
    let total = if users.total > rows {
        format!("Total {rows} users ({} on server)", users.total)
    } else {
        format!("Total {rows} users")
    };
    format!(
        "{total} · Page {}/{} · {} / page ",
        dash.page + 1,
        dash.page_count(rows),
        dash.page_size
    )
}
