use ratatui::{prelude::*, widgets::Paragraph};

use super::super::PortalApp;
use super::{format_date, progress_bar};

pub fn draw(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 10 || area.width < 40 {
        return;
    }

    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Welcome back! Here's your training overview.")
            .style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    draw_stat_tiles(frame, Rect::new(area.x + 2, y, area.width - 4, 2), app);
    y += 3;

    // Ongoing training with progress
    frame.render_widget(
        Paragraph::new("Ongoing Training")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    for enrollment in &app.config.enrollments {
        if y >= area.y + area.height {
            return;
        }
        let badge = app.registry.resolve("active");
        let line = Line::from(vec![
            Span::styled(format!("  {}", enrollment.name), app.theme.style()),
            Span::styled(
                format!("  [{}]", badge.label),
                app.theme.category_style(badge.category),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;

        if y >= area.y + area.height {
            return;
        }
        let detail = format!(
            "    {} {} of {} chapters completed",
            progress_bar(enrollment.percent_complete, 20),
            enrollment.chapters_completed,
            enrollment.chapters_total,
        );
        frame.render_widget(
            Paragraph::new(detail).style(app.theme.muted_style()),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }
    y += 1;

    // Completed training and certificates side by side
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(Rect::new(
            area.x + 2,
            y.min(area.y + area.height.saturating_sub(1)),
            area.width - 4,
            (area.y + area.height).saturating_sub(y),
        ));

    draw_completed_column(frame, columns[0], app);
    draw_certificate_column(frame, columns[1], app);

    // Paused training, only when present
    let paused_height = app.config.paused.len() as u16 + 1;
    let remaining = (area.y + area.height).saturating_sub(y);
    let list_height = app
        .config
        .completed
        .len()
        .max(app.config.certificates.len()) as u16
        * 2
        + 1;
    if !app.config.paused.is_empty() && remaining > list_height + paused_height {
        let mut py = y + list_height + 1;
        frame.render_widget(
            Paragraph::new("Paused Training")
                .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
            Rect::new(area.x + 2, py, area.width - 4, 1),
        );
        py += 1;
        for paused in &app.config.paused {
            let badge = app.registry.resolve("paused");
            let line = Line::from(vec![
                Span::styled(format!("  {}", paused.name), app.theme.style()),
                Span::styled(
                    format!("  [{}% Complete]", paused.percent_complete),
                    app.theme.category_style(badge.category),
                ),
                Span::styled(
                    format!("  last accessed {}", format_date(&paused.last_accessed)),
                    app.theme.muted_style(),
                ),
            ]);
            frame.render_widget(
                Paragraph::new(line),
                Rect::new(area.x + 2, py, area.width - 4, 1),
            );
            py += 1;
        }
    }
}

fn draw_stat_tiles(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let stats = [
        (
            app.config.completed.len(),
            "Training Completed",
            app.theme.success_style(),
        ),
        (
            app.config.enrollments.len(),
            "Ongoing Training",
            app.theme.secondary_style(),
        ),
        (
            app.config.paused.len(),
            "Paused",
            app.theme.warning_style(),
        ),
        (
            app.config.certificates.len(),
            "Certificates",
            app.theme.primary_style(),
        ),
    ];

    for (i, (count, label, style)) in stats.iter().enumerate() {
        frame.render_widget(
            Paragraph::new(count.to_string()).style(style.add_modifier(Modifier::BOLD)),
            Rect::new(tiles[i].x, tiles[i].y, tiles[i].width, 1),
        );
        frame.render_widget(
            Paragraph::new(*label).style(app.theme.muted_style()),
            Rect::new(tiles[i].x, tiles[i].y + 1, tiles[i].width, 1),
        );
    }
}

fn draw_completed_column(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 2 {
        return;
    }
    let mut y = area.y;
    frame.render_widget(
        Paragraph::new("Completed Training")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x, y, area.width, 1),
    );
    y += 1;

    for training in &app.config.completed {
        if y + 1 >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(format!("  [x] {}", training.name)).style(app.theme.success_style()),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new(format!(
                "      {} · Certificate {}",
                format_date(&training.completed_date),
                training.certificate
            ))
            .style(app.theme.muted_style()),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
    }
}

fn draw_certificate_column(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 2 {
        return;
    }
    let mut y = area.y;
    frame.render_widget(
        Paragraph::new("My Certificates")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x, y, area.width, 1),
    );
    y += 1;

    for cert in &app.config.certificates {
        if y + 1 >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(format!("  (*) {}", cert.name)).style(app.theme.style()),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new(format!(
                "      issued {} · valid until {}",
                format_date(&cert.issue_date),
                format_date(&cert.valid_until)
            ))
            .style(app.theme.muted_style()),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
    }
}
