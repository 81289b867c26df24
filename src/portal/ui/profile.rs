use ratatui::{prelude::*, widgets::Paragraph};

use super::super::{PanelFocus, PortalApp};
use super::format_date;
use super::training::draw_input_field;
use crate::vim::InputBuffer;

pub fn draw(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 10 || area.width < 40 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_student_card(frame, columns[0], app);

    if app.changing_password {
        draw_password_form(frame, columns[1], app);
    } else {
        draw_progress_and_actions(frame, columns[1], app);
    }
}

fn draw_student_card(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let student = &app.config.student;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new(student.name.as_str())
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    frame.render_widget(
        Paragraph::new(format!("Student ID: {}", student.student_id))
            .style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    frame.render_widget(
        Paragraph::new(format!("[{}]", student.standing)).style(app.theme.secondary_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    let details = [
        format!("Email:  {}", student.email),
        format!("Phone:  {}", student.phone),
        format!("Joined: {}", format_date(&student.joined)),
    ];
    for detail in &details {
        if y >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(detail.as_str()).style(app.theme.style()),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }
}

fn draw_progress_and_actions(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let is_focused = app.panel_focus == PanelFocus::Content;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Academic Progress")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    // Empty score sets render as a dash, not a bogus zero
    let average = app
        .average_score()
        .map(|avg| format!("{}%", avg.trunc() as u32))
        .unwrap_or_else(|| "—".to_string());

    let stats = [
        (app.config.completed.len().to_string(), "Completed Courses"),
        (app.config.enrollments.len().to_string(), "Active Courses"),
        (app.config.certificates.len().to_string(), "Certificates"),
        (average, "Avg. Score"),
    ];
    for (value, label) in &stats {
        if y >= area.y + area.height {
            return;
        }
        let line = Line::from(vec![
            Span::styled(
                format!("{value:>4}"),
                app.theme.secondary_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {label}"), app.theme.muted_style()),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }
    y += 1;

    frame.render_widget(
        Paragraph::new("Password & Security")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    let button_style = if is_focused {
        app.theme
            .primary_style()
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        app.theme.muted_style().add_modifier(Modifier::REVERSED)
    };
    frame.render_widget(
        Paragraph::new(" [Enter] Change Password ").style(button_style),
        Rect::new(area.x + 2, y, 26, 1),
    );
    y += 2;

    if y + 1 < area.y + area.height {
        frame.render_widget(
            Paragraph::new("Help Center")
                .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new("[r] Contact Support (response within 24 hours)")
                .style(app.theme.muted_style()),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
    }
}

fn draw_password_form(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let is_focused = app.panel_focus == PanelFocus::Content;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Change Password")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    let fields: [(&str, &InputBuffer); 3] = [
        ("Current", &app.current_password),
        ("New", &app.new_password),
        ("Confirm", &app.confirm_password),
    ];
    for (field_idx, (label, buffer)) in fields.iter().enumerate() {
        if y >= area.y + area.height.saturating_sub(2) {
            break;
        }
        draw_input_field(frame, area, app, y, label, buffer, field_idx, is_focused);
        y += 2;
    }

    frame.render_widget(
        Paragraph::new("Enter on last field: update  Esc: cancel").style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
}
