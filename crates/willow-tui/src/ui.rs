use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use willow_config::{plan_by_id, Theme};
use willow_core::{Message, Role};
use willow_responder::suggested_prompts;

use crate::app::{App, InputMode};

/// Colors for the current theme
struct Palette {
    accent: Color,
    text: Color,
    dim: Color,
    user: Color,
    assistant: Color,
    favorite: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: Color::Cyan,
            text: Color::White,
            dim: Color::DarkGray,
            user: Color::Cyan,
            assistant: Color::Green,
            favorite: Color::Yellow,
        },
        Theme::Light => Palette {
            accent: Color::Blue,
            text: Color::Black,
            dim: Color::Gray,
            user: Color::Blue,
            assistant: Color::Magenta,
            favorite: Color::Yellow,
        },
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let colors = palette(app.theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(40)])
        .split(f.size());

    draw_sidebar(f, app, &colors, columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Thread
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(columns[1]);

    draw_header(f, app, &colors, main[0]);
    draw_thread(f, app, &colors, main[1]);
    draw_input(f, app, &colors, main[2]);
    draw_status_bar(f, app, &colors, main[3]);
}

fn draw_sidebar(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .store
        .filtered_conversations()
        .iter()
        .map(|conversation| {
            let marker = if conversation.is_favorite { "★ " } else { "  " };
            let title = truncate_to_width(&conversation.title, width.saturating_sub(2));
            let style = if Some(conversation.id.as_str()) == app.store.active_id() {
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(colors.favorite)),
                Span::styled(title, style),
            ]))
        })
        .collect();

    let title = if app.mode == InputMode::Search || !app.store.search_query().is_empty() {
        format!("Chats /{}", app.store.search_query())
    } else {
        format!("Chats ({})", app.store.conversations().len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(colors.dim)),
    );
    f.render_widget(list, area);
}

fn draw_header(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let title = app
        .store
        .active_conversation()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| "Willow".to_string());

    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if app.mode == InputMode::Rename {
        spans = vec![
            Span::styled("Rename: ", Style::default().fg(colors.dim)),
            Span::styled(app.rename_buffer.clone(), Style::default().fg(colors.text)),
            Span::styled("▌", Style::default().fg(colors.accent)),
        ];
    } else if app.pending.is_some() {
        spans.push(Span::styled(
            "  ◐ Thinking...",
            Style::default().fg(colors.favorite),
        ));
    } else if app.streaming.is_some() {
        spans.push(Span::styled(
            "  ◐ Streaming...",
            Style::default().fg(colors.favorite),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.dim)),
    );
    f.render_widget(header, area);
}

fn draw_thread(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(conversation) = app.store.active_conversation() {
        for message in &conversation.messages {
            push_message_lines(&mut lines, message, colors);
        }
    }

    if let Some(streaming) = &app.streaming {
        lines.push(Line::from(Span::styled(
            "Willow",
            Style::default()
                .fg(colors.assistant)
                .add_modifier(Modifier::BOLD),
        )));
        for text_line in streaming.text.lines() {
            lines.push(Line::from(Span::styled(
                text_line.to_string(),
                Style::default().fg(colors.text),
            )));
        }
        // typing cursor on the last line
        let cursor = Span::styled("▌", Style::default().fg(colors.assistant));
        let inline = !streaming.text.is_empty() && !streaming.text.ends_with('\n');
        if inline {
            if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
        } else {
            lines.push(Line::from(cursor));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() && app.show_suggestions() {
        push_suggestion_lines(&mut lines, colors);
    }

    // Stick to the bottom, offset by the scroll position.
    let viewport = area.height.saturating_sub(2) as usize;
    let scroll = lines
        .len()
        .saturating_sub(viewport)
        .saturating_sub(app.scroll_offset.min(lines.len()));

    let thread = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Messages")
                .border_style(Style::default().fg(colors.dim)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    f.render_widget(thread, area);
}

fn push_message_lines(lines: &mut Vec<Line>, message: &Message, colors: &Palette) {
    let (author, style) = match message.role {
        Role::User => ("You", Style::default().fg(colors.user)),
        Role::Assistant => ("Willow", Style::default().fg(colors.assistant)),
    };
    let timestamp = message.timestamp.format("%H:%M").to_string();
    lines.push(Line::from(vec![
        Span::styled(author, style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {timestamp}"), Style::default().fg(colors.dim)),
    ]));
    for text_line in message.content.lines() {
        lines.push(Line::from(Span::styled(
            text_line.to_string(),
            Style::default().fg(colors.text),
        )));
    }
    lines.push(Line::from(""));
}

fn push_suggestion_lines(lines: &mut Vec<Line>, colors: &Palette) {
    lines.push(Line::from(Span::styled(
        "What can I help with?",
        Style::default()
            .fg(colors.text)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Try one of these (Tab to cycle them into the input):",
        Style::default().fg(colors.dim),
    )));
    for prompt in suggested_prompts() {
        lines.push(Line::from(vec![
            Span::styled("  · ", Style::default().fg(colors.dim)),
            Span::styled(*prompt, Style::default().fg(colors.text)),
        ]));
    }
}

fn draw_input(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let line = if app.mode == InputMode::Search {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(colors.accent)),
            Span::styled(
                app.store.search_query().to_string(),
                Style::default().fg(colors.text),
            ),
            Span::styled("▌", Style::default().fg(colors.accent)),
        ])
    } else if app.is_busy() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(colors.favorite)),
            Span::styled(
                "Replying... Press Ctrl+S to stop",
                Style::default()
                    .fg(colors.favorite)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else if app.input.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(colors.accent)),
            Span::styled(
                "Type a message and press Enter to send...",
                Style::default()
                    .fg(colors.dim)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(colors.accent)),
            Span::styled(app.input.clone(), Style::default().fg(colors.text)),
            Span::styled("▌", Style::default().fg(colors.accent)),
        ])
    };

    let title = if app.editing_message.is_some() {
        "Input (editing)"
    } else {
        "Input"
    };
    let input = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(colors.dim)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(input, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let help = match app.mode {
        InputMode::Search => "[Enter] Keep filter  [Esc] Clear  type to filter",
        InputMode::Rename => "[Enter] Save title  [Esc] Cancel",
        InputMode::Normal if app.is_busy() => "[Ctrl+S] Stop  [Ctrl+C] Quit",
        InputMode::Normal => {
            "[Enter] Send  [Ctrl+N] New  [Ctrl+R] Regen  [Ctrl+E] Edit  [F2] Rename  [/] Search  [Ctrl+C] Quit"
        }
    };
    let plan = plan_by_id(app.plan);
    let status = format!(" {} · {} plan | {}", app.user.name, plan.name, help);

    let bar = Paragraph::new(status)
        .alignment(Alignment::Left)
        .style(Style::default().fg(colors.dim).add_modifier(Modifier::REVERSED));
    f.render_widget(bar, area);
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 2 > width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}
