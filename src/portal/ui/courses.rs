use ratatui::{prelude::*, widgets::Paragraph};

use super::super::{MockTest, PanelFocus, PortalApp, MOCK_TEST_OPTIONS, MOCK_TEST_QUESTIONS};
use super::progress_bar;

pub fn draw(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 8 || area.width < 40 {
        return;
    }

    if let Some(test) = &app.mock_test {
        draw_mock_test(frame, area, app, test);
        return;
    }

    let Some(enrollment) = app.config.enrollments.get(app.course_cursor) else {
        frame.render_widget(
            Paragraph::new("No enrolled courses yet. Register on the Training Form page.")
                .style(app.theme.muted_style()),
            Rect::new(area.x + 2, area.y + 1, area.width - 4, 1),
        );
        return;
    };

    let is_focused = app.panel_focus == PanelFocus::Content;
    let mut y = area.y + 1;

    // Course switcher line
    let position = format!(
        "({}/{})",
        app.course_cursor + 1,
        app.config.enrollments.len()
    );
    let header = Line::from(vec![
        Span::styled(
            enrollment.name.clone(),
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {position}  n/p: switch"), app.theme.muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(header),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    frame.render_widget(
        Paragraph::new(format!(
            "{}  Complete all chapters to unlock the mock test",
            progress_bar(enrollment.percent_complete, 24)
        ))
        .style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    frame.render_widget(
        Paragraph::new("Course Chapters")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    let panel_y = area.y + area.height.saturating_sub(3);
    for (idx, chapter) in enrollment.chapters.iter().enumerate() {
        if y >= panel_y {
            break;
        }
        let is_cursor = idx == app.chapter_cursor;
        let prefix = if is_cursor { ">" } else { " " };
        let done = if chapter.completed { "[x]" } else { "[ ]" };
        let action = if chapter.completed { "Review" } else { "Start" };
        let line = format!(
            "{prefix} {done} {} {}  ({} min)  [{action}]",
            chapter.kind.marker(),
            chapter.title,
            chapter.minutes
        );

        let style = if is_cursor && is_focused {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if chapter.completed {
            app.theme.success_style()
        } else {
            app.theme.style()
        };

        frame.render_widget(
            Paragraph::new(line).style(style),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }

    // Mock test panel
    let panel_text = if enrollment.mock_test_available {
        Span::styled(
            " [t] Start Mock Test - practice before the final assessment ",
            app.theme
                .success_style()
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    } else {
        Span::styled(
            " Mock test locked - complete all chapters first ",
            app.theme.muted_style().add_modifier(Modifier::REVERSED),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(panel_text)),
        Rect::new(area.x + 2, panel_y, area.width - 4, 1),
    );
}

fn draw_mock_test(frame: &mut Frame, area: Rect, app: &PortalApp, test: &MockTest) {
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new(format!("Mock Test: {}", test.course_name))
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    frame.render_widget(
        Paragraph::new(format!(
            "Practice test: {} of {MOCK_TEST_QUESTIONS} questions answered",
            test.answered()
        ))
        .style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    let footer_y = area.y + area.height.saturating_sub(2);
    for (q_idx, answer) in test.answers.iter().enumerate() {
        if y + 1 >= footer_y {
            break;
        }
        let is_cursor = q_idx == test.cursor;
        let prefix = if is_cursor { ">" } else { " " };
        let question = format!(
            "{prefix} Question {}: What is the primary principle of {}?",
            q_idx + 1,
            test.topic
        );
        let style = if is_cursor {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else {
            app.theme.style()
        };
        frame.render_widget(
            Paragraph::new(question).style(style),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;

        let options: Vec<String> = MOCK_TEST_OPTIONS
            .iter()
            .enumerate()
            .map(|(o_idx, option)| {
                let marker = if *answer == Some(o_idx) { "(x)" } else { "( )" };
                format!("{}{marker} {option}", o_idx + 1)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(format!("    {}", options.join("   "))).style(
                if answer.is_some() {
                    app.theme.secondary_style()
                } else {
                    app.theme.muted_style()
                },
            ),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }

    frame.render_widget(
        Paragraph::new(" [Enter] Submit Mock Test   [s] Save Progress ").style(
            app.theme
                .primary_style()
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Rect::new(area.x + 2, footer_y, area.width - 4, 1),
    );
}
