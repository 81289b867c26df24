mod assessment;
mod courses;
mod dashboard;
mod profile;
mod training;

use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{NoticeKind, Page, PanelFocus, PortalApp};
use crate::ui::Layout as PortalLayout;
use crate::vim::VimMode;

/// Main draw function for the portal
pub fn draw(frame: &mut Frame, app: &PortalApp) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let layout = PortalLayout::new(area);

    draw_header(frame, layout.header, app);
    draw_sidebar(frame, layout.sidebar, app);
    draw_page(frame, layout.page, app);
    draw_message(frame, layout.message, app);
    draw_status_bar(frame, layout.status, app);

    // Overlays
    if app.confirm_quit {
        draw_quit_dialog(frame, app);
    }
    if app.show_help {
        draw_help(frame, app);
    }
}

/// Draw header bar (1 line, no borders)
fn draw_header(frame: &mut Frame, area: Rect, app: &PortalApp) {
    frame.render_widget(Clear, area);

    let title = format!(
        " {} (v{}) ",
        app.config.general.title,
        env!("CARGO_PKG_VERSION")
    );
    frame.render_widget(
        Paragraph::new(title).style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        area,
    );

    let right = format!(
        "[{}] {} ",
        app.config.student.name,
        Local::now().format("%H:%M")
    );
    frame.render_widget(
        Paragraph::new(right)
            .style(app.theme.secondary_style())
            .alignment(Alignment::Right),
        area,
    );
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let is_focused = app.panel_focus == PanelFocus::Sidebar;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.primary_style()
        } else {
            app.theme.border_style()
        })
        .title(" Pages ");

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    for (idx, page) in Page::ALL.iter().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }

        let is_selected = idx == app.selected_page;
        let line_text = format!(" {} {}", idx + 1, page.title());

        let style = if is_selected && is_focused {
            app.theme
                .primary_style()
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else if is_selected {
            app.theme.secondary_style().add_modifier(Modifier::REVERSED)
        } else {
            app.theme.style()
        };

        let line_area = Rect::new(inner.x, inner.y + idx as u16, inner.width, 1);
        if is_selected {
            frame.render_widget(Clear, line_area);
        }
        frame.render_widget(Paragraph::new(line_text).style(style), line_area);
    }

    // Subtitle pinned at the bottom
    if inner.height > Page::ALL.len() as u16 + 2 {
        let hint_y = inner.y + inner.height - 1;
        frame.render_widget(
            Paragraph::new(app.config.general.subtitle.as_str())
                .style(app.theme.muted_style()),
            Rect::new(inner.x, hint_y, inner.width, 1),
        );
    }
}

fn draw_page(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let is_focused = app.panel_focus == PanelFocus::Content;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.primary_style()
        } else {
            app.theme.border_style()
        })
        .title(format!(" {} ", app.page().title()));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    match app.page() {
        Page::Dashboard => dashboard::draw(frame, inner, app),
        Page::Training => training::draw(frame, inner, app),
        Page::Courses => courses::draw(frame, inner, app),
        Page::Assessment => assessment::draw(frame, inner, app),
        Page::Profile => profile::draw(frame, inner, app),
    }
}

fn draw_message(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let notice = match &app.message {
        Some(n) => n,
        None if app.is_submitting() => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.secondary_style())
                .title(" Info ")
                .title_style(app.theme.secondary_style().add_modifier(Modifier::BOLD));

            let content = Line::from(vec![Span::styled(
                format!("{} Submitting registration...", app.spinner_char()),
                app.theme.style(),
            )]);

            frame.render_widget(
                Paragraph::new(content).block(block).wrap(Wrap { trim: true }),
                area,
            );
            return;
        }
        None => return,
    };

    let (title, border_style, text_style) = match notice.kind {
        NoticeKind::Error => (" Error ", app.theme.error_style(), app.theme.error_style()),
        NoticeKind::Success => (" Info ", app.theme.secondary_style(), app.theme.style()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    let content = Line::from(vec![Span::styled(notice.text.as_str(), text_style)]);
    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &PortalApp) {
    frame.render_widget(Clear, area);

    let mode_name = app.vim_mode.display_name();
    let mode_style = app.theme.mode_style(mode_name);
    let mode_span = Span::styled(format!(" {mode_name} "), mode_style);

    let after_mode = if app.vim_mode == VimMode::Command {
        Span::styled(
            format!(":{}", app.command_buffer.content()),
            app.theme.style(),
        )
    } else if !app.status_bar.left_hint.is_empty() {
        Span::styled(app.status_bar.left_hint.clone(), app.theme.muted_style())
    } else {
        Span::raw("")
    };

    let left_line = Line::from(vec![mode_span, Span::raw(" "), after_mode]);
    frame.render_widget(
        Paragraph::new(left_line),
        Rect::new(area.x, area.y, area.width * 2 / 3, 1),
    );

    let page_pos = format!("{}/{}", app.selected_page + 1, Page::ALL.len());
    let right_text = if app.status_bar.right_hint.is_empty() {
        page_pos
    } else {
        format!("{page_pos}  {}", app.status_bar.right_hint)
    };

    frame.render_widget(
        Paragraph::new(right_text)
            .style(app.theme.muted_style())
            .alignment(Alignment::Right),
        Rect::new(area.x + area.width / 3, area.y, area.width * 2 / 3, 1),
    );
}

fn draw_quit_dialog(frame: &mut Frame, app: &PortalApp) {
    let area = PortalLayout::centered_box(frame.area(), 44, 7);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(" Quit ");

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new("Leave the student portal?")
            .style(app.theme.style().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );

    let hints = Line::from(vec![
        Span::styled("[", app.theme.style()),
        Span::styled("Y", app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Span::styled("]es / [", app.theme.style()),
        Span::styled("N", app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Span::styled("]o", app.theme.style()),
    ]);

    frame.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center),
        Rect::new(inner.x, inner.y + 3, inner.width, 1),
    );
}

fn draw_help(frame: &mut Frame, app: &PortalApp) {
    let area = PortalLayout::centered_box(frame.area(), 60, 20);

    let help_text = [
        "",
        "Navigation:",
        "",
        "  Ctrl+h         Focus sidebar",
        "  Ctrl+l         Focus page",
        "  j/k            Navigate up/down",
        "  1-5            Jump to page",
        "  Enter          Select / Edit",
        "",
        "Registration wizard:",
        "",
        "  Space          Toggle course",
        "  b              Back to selection",
        "  :submit        Submit registration",
        "",
        "Commands: :dashboard :training :courses",
        "          :assessment :profile :q",
        "",
        "Press q or Esc to close",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Help ");

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    for (i, line) in help_text.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(*line).style(app.theme.style()),
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
        );
    }
}

/// Text progress bar: `[=====     ] 65%`
pub(crate) fn progress_bar(percent: u8, bar_width: usize) -> String {
    let filled = (percent as usize * bar_width / 100).min(bar_width);
    let empty = bar_width - filled;
    format!("[{}{}] {percent}%", "=".repeat(filled), " ".repeat(empty))
}

/// Render `2024-03-15` as `Mar 15, 2024`; unparseable dates pass through.
pub(crate) fn format_date(raw: &str) -> String {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
