use ratatui::{prelude::*, widgets::Paragraph};

use super::super::{ContentFocus, PanelFocus, PortalApp};
use crate::core::wizard::WizardStep;
use crate::ui::Layout as PortalLayout;
use crate::vim::{InputBuffer, VimMode};

pub fn draw(frame: &mut Frame, area: Rect, app: &PortalApp) {
    if area.height < 8 || area.width < 40 {
        return;
    }

    match app.wizard.step() {
        WizardStep::Selection => draw_selection(frame, area, app),
        WizardStep::Form => draw_form(frame, area, app),
        WizardStep::Confirmation => draw_confirmation(frame, area, app),
    }
}

fn draw_selection(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let is_focused = app.panel_focus == PanelFocus::Content;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Course Selection")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    frame.render_widget(
        Paragraph::new(format!(
            "Select the training courses you wish to enroll in. {} course(s) selected.",
            app.wizard.selection().len()
        ))
        .style(app.theme.muted_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    let button_y = area.y + area.height.saturating_sub(2);
    let list_height = button_y.saturating_sub(y + 1) as usize;

    let scroll_offset = if app.catalog_cursor >= list_height {
        app.catalog_cursor - list_height + 1
    } else {
        0
    };

    for (i, course) in app
        .config
        .catalog
        .iter()
        .skip(scroll_offset)
        .take(list_height)
        .enumerate()
    {
        let idx = i + scroll_offset;
        let is_cursor = idx == app.catalog_cursor;
        let is_selected = app.wizard.selection().contains(&course.id);

        let marker = if is_selected { "[x]" } else { "[ ]" };
        let prefix = if is_cursor { ">" } else { " " };
        let line = format!(
            "{prefix} {marker} {}  ({} hours, {})",
            course.name,
            course.duration_hours,
            course.level.label()
        );

        let style = if is_cursor && is_focused {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if is_selected {
            app.theme.success_style()
        } else {
            app.theme.style()
        };

        frame.render_widget(
            Paragraph::new(line).style(style),
            Rect::new(area.x + 2, y + i as u16, area.width - 4, 1),
        );
    }

    if !app.wizard.selection().is_empty() {
        let button_text = " [Enter] Continue to Registration Form ";
        let button_style = if is_focused {
            app.theme
                .primary_style()
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            app.theme.muted_style().add_modifier(Modifier::REVERSED)
        };
        frame.render_widget(
            Paragraph::new(button_text).style(button_style),
            Rect::new(area.x + 2, button_y, button_text.len() as u16, 1),
        );
    }
}

fn draw_form(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let is_focused = app.panel_focus == PanelFocus::Content;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Training Registration Form")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 1;

    let selected: Vec<String> = app
        .wizard
        .selection()
        .iter()
        .map(|id| {
            app.config
                .offering(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
        .collect();
    frame.render_widget(
        Paragraph::new(format!("Selected: {}", selected.join(", ")))
            .style(app.theme.secondary_style()),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    let fields: [(&str, &InputBuffer); 5] = [
        ("Full Name", &app.full_name),
        ("Email", &app.email),
        ("Phone", &app.phone),
        ("Education", &app.education),
        ("Experience", &app.experience),
    ];

    for (field_idx, (label, buffer)) in fields.iter().enumerate() {
        if y >= area.y + area.height.saturating_sub(3) {
            break;
        }
        draw_input_field(frame, area, app, y, label, buffer, field_idx, is_focused);
        y += 2;
    }

    let button_y = area.y + area.height.saturating_sub(2);
    let button_text = if app.is_submitting() {
        format!(" {} Submitting... ", app.spinner_char())
    } else {
        " [Enter on last field] Submit Registration   [b] Back ".to_string()
    };
    let button_style = if app.is_submitting() {
        app.theme.muted_style().add_modifier(Modifier::REVERSED)
    } else if is_focused {
        app.theme
            .primary_style()
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        app.theme.muted_style().add_modifier(Modifier::REVERSED)
    };
    frame.render_widget(
        Paragraph::new(button_text.clone()).style(button_style),
        Rect::new(area.x + 2, button_y, button_text.len() as u16, 1),
    );
}

#[allow(clippy::too_many_arguments)]
pub(super) fn draw_input_field(
    frame: &mut Frame,
    area: Rect,
    app: &PortalApp,
    y: u16,
    label: &str,
    buffer: &InputBuffer,
    field_idx: usize,
    is_content_focused: bool,
) {
    let is_field_focused = is_content_focused
        && matches!(app.content_focus, ContentFocus::InputField(i) if i == field_idx);
    let is_insert = app.vim_mode == VimMode::Insert && is_field_focused;

    let label_style = if is_field_focused {
        app.theme.primary_style()
    } else {
        app.theme.style()
    };
    frame.render_widget(
        Paragraph::new(label.to_string()).style(label_style),
        Rect::new(area.x + 2, y, 12, 1),
    );

    let field_x = area.x + 14;
    let field_width = area.width.saturating_sub(18);
    let content = buffer.display('*');

    if is_insert {
        // Insert mode: bar cursor
        let cursor_pos = buffer.cursor();
        let before: String = content.chars().take(cursor_pos).collect();
        let after: String = content.chars().skip(cursor_pos).collect();
        let line = Line::from(vec![
            Span::styled(before, app.theme.style()),
            Span::styled("|", app.theme.primary_style().add_modifier(Modifier::BOLD)),
            Span::styled(after, app.theme.style()),
        ]);
        frame.render_widget(Paragraph::new(line), Rect::new(field_x, y, field_width, 1));
    } else if is_field_focused {
        // Normal mode: block cursor
        let cursor_pos = buffer.cursor();
        let chars: Vec<char> = content.chars().collect();
        let mut spans = Vec::new();
        for (i, ch) in chars.iter().enumerate() {
            if i == cursor_pos {
                spans.push(Span::styled(
                    ch.to_string(),
                    app.theme.style().add_modifier(Modifier::REVERSED),
                ));
            } else {
                spans.push(Span::styled(ch.to_string(), app.theme.style()));
            }
        }
        if cursor_pos >= chars.len() {
            spans.push(Span::styled(
                " ",
                app.theme.style().add_modifier(Modifier::REVERSED),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(field_x, y, field_width, 1),
        );
    } else {
        let display = if content.is_empty() {
            "(empty)".to_string()
        } else {
            content
        };
        frame.render_widget(
            Paragraph::new(display).style(app.theme.muted_style()),
            Rect::new(field_x, y, field_width, 1),
        );
    }
}

fn draw_confirmation(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let centered = PortalLayout::centered_box(area, 60, 12);

    let mut y = centered.y;

    frame.render_widget(
        Paragraph::new("Registration Confirmed!")
            .style(app.theme.success_style().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        Rect::new(centered.x, y, centered.width, 1),
    );
    y += 2;

    let info = "Your training registration has been submitted successfully.";
    frame.render_widget(
        Paragraph::new(info)
            .style(app.theme.style())
            .alignment(Alignment::Center),
        Rect::new(centered.x, y, centered.width, 1),
    );
    y += 1;
    frame.render_widget(
        Paragraph::new("You will receive a confirmation email shortly.")
            .style(app.theme.muted_style())
            .alignment(Alignment::Center),
        Rect::new(centered.x, y, centered.width, 1),
    );
    y += 2;

    if let Some(id) = &app.last_registration_id {
        frame.render_widget(
            Paragraph::new(format!("Registration ID: {id}"))
                .style(app.theme.secondary_style())
                .alignment(Alignment::Center),
            Rect::new(centered.x, y, centered.width, 1),
        );
        y += 2;
    }

    frame.render_widget(
        Paragraph::new("Selected Courses:")
            .style(app.theme.primary_style())
            .alignment(Alignment::Center),
        Rect::new(centered.x, y, centered.width, 1),
    );
    y += 1;
    for id in app.wizard.selection().iter() {
        if y >= centered.y + centered.height.saturating_sub(2) {
            break;
        }
        let name = app
            .config
            .offering(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string());
        frame.render_widget(
            Paragraph::new(format!("· {name}"))
                .style(app.theme.style())
                .alignment(Alignment::Center),
            Rect::new(centered.x, y, centered.width, 1),
        );
        y += 1;
    }

    let button_text = "[ Enter: Register for More Courses ]";
    let button_y = centered.y + centered.height - 1;
    frame.render_widget(
        Paragraph::new(button_text)
            .style(
                app.theme
                    .primary_style()
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .alignment(Alignment::Center),
        Rect::new(centered.x, button_y, centered.width, 1),
    );
}
