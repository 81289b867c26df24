use ratatui::{prelude::*, widgets::Paragraph};

use super::super::{PanelFocus, PortalApp};
use super::format_date;
use crate::core::aggregate::{count_by, count_by_status};

pub fn draw(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 8 || area.width < 40 {
        return;
    }

    let is_focused = app.panel_focus == PanelFocus::Content;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Complete your final assessments to earn your professional certificates.")
            .style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    // Summary tiles
    let records = &app.config.assessments;
    let completed = count_by_status(records, "completed");
    let in_progress = count_by_status(records, "pending");
    let certificates_ready = count_by(records, |a| a.certificate_ready);

    let summary = Line::from(vec![
        Span::styled(
            format!("{completed} Completed"),
            app.theme.success_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", app.theme.style()),
        Span::styled(
            format!("{in_progress} In Progress"),
            app.theme.warning_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", app.theme.style()),
        Span::styled(
            format!("{certificates_ready} Certificates Ready"),
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(summary),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    frame.render_widget(
        Paragraph::new("Available Assessments")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    let guidelines_y = area.y + area.height.saturating_sub(4);
    for (idx, assessment) in records.iter().enumerate() {
        if y + 1 >= guidelines_y {
            break;
        }
        let is_cursor = idx == app.assessment_cursor;
        let prefix = if is_cursor { ">" } else { " " };
        let descriptor = app.registry.resolve(&assessment.status);

        let mut spans = vec![
            Span::styled(
                format!("{prefix} {}", assessment.course_name),
                if is_cursor && is_focused {
                    app.theme.primary_style().add_modifier(Modifier::BOLD)
                } else {
                    app.theme.style()
                },
            ),
            Span::styled(
                format!("  [{}]", descriptor.label),
                app.theme.category_style(descriptor.category),
            ),
        ];
        if let Some(action) = descriptor.primary_action() {
            spans.push(Span::styled(
                format!("  Enter: {}", action.label()),
                app.theme.muted_style(),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;

        let detail = match (assessment.theory_score, assessment.practical_score) {
            (Some(theory), Some(practical)) => {
                let when = assessment
                    .completed_date
                    .as_deref()
                    .map(format_date)
                    .unwrap_or_default();
                format!("    Theory: {theory}%  Practical: {practical}%  Completed {when}")
            }
            (Some(theory), None) => {
                format!("    Theory: {theory}%  Practical assessment pending")
            }
            _ => "    All course requirements complete. Start when ready.".to_string(),
        };
        frame.render_widget(
            Paragraph::new(detail).style(app.theme.muted_style()),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }

    // Guidelines panel
    let guidelines = [
        "Assessment Guidelines:",
        "  * Complete all course chapters before starting the final assessment",
        "  * A minimum score of 70% is required in both components to pass",
        "  * Certificates are verified by an admin before issuance",
    ];
    for (i, line) in guidelines.iter().enumerate() {
        let line_y = guidelines_y + i as u16;
        if line_y >= area.y + area.height {
            break;
        }
        let style = if i == 0 {
            app.theme.secondary_style()
        } else {
            app.theme.muted_style()
        };
        frame.render_widget(
            Paragraph::new(*line).style(style),
            Rect::new(area.x + 2, line_y, area.width - 4, 1),
        );
    }
}
