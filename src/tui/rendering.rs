use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        Wrap,
    },
};

use super::app::App;
use super::models::{ProcessingStatus, ViewMode};

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = if app.show_preview && app.view_mode == ViewMode::Flat {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    render_header(f, left_chunks[0], app);
    match app.view_mode {
        ViewMode::Flat => render_operation_list(f, left_chunks[1], app),
        ViewMode::Tree => render_tree_view(f, left_chunks[1], app),
    }
    render_status_bar(f, left_chunks[2], app);

    if chunks.len() > 1 {
        render_preview_panel(f, chunks[1], app);
    }

    if app.show_help {
        render_help_popup(f);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mode = if app.dry_run { " (dry run)" } else { "" };
    let title = if app.halted {
        format!("{} - Stopped on error{mode}", app.series_name)
    } else if app.finished {
        format!("{} - Completed!{mode}", app.series_name)
    } else if app.current_processing.is_some() {
        format!("{} - Renaming...{mode}", app.series_name)
    } else {
        format!("{} - Review renames{mode}", app.series_name)
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn status_marker(status: &ProcessingStatus) -> (&'static str, Color) {
    match status {
        ProcessingStatus::Pending => ("[PENDING]", Color::Yellow),
        ProcessingStatus::Processing => ("[PROCESSING]", Color::Blue),
        ProcessingStatus::Success => ("[SUCCESS]", Color::Green),
        ProcessingStatus::Error => ("[ERROR]", Color::Red),
        ProcessingStatus::Skipped => ("[SKIPPED]", Color::Gray),
    }
}

fn render_operation_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (marker, color) = status_marker(&item.status);
            let name_style = if app.current_processing == Some(i) {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(color)),
                Span::styled(item.original_name.clone(), name_style),
                Span::raw(" -> "),
                Span::styled(item.new_name.clone(), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    render_list(f, area, app, items, "Renames");
}

fn render_tree_view(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .tree_lines
        .iter()
        .map(|line| {
            let name_style = if line.is_dir {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![Span::styled(line.prefix.clone(), Style::default().fg(Color::DarkGray))];
            match &line.new_name {
                Some(new_name) => {
                    spans.push(Span::styled(
                        line.old_name.clone(),
                        name_style.fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
                    ));
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(new_name.clone(), Style::default().fg(Color::Green)));
                }
                None => spans.push(Span::styled(line.old_name.clone(), name_style)),
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    render_list(f, area, app, items, "Tree");
}

fn render_list(f: &mut Frame, area: Rect, app: &App, items: Vec<ListItem>, title: &str) {
    let row_count = items.len();
    let list = List::new(items)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White))
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.list_state.clone());

    if row_count > usize::from(area.height.saturating_sub(2)) {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut app.scroll_state.clone(),
        );
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let progress_label = if let Some(message) = &app.status_message {
        message.clone()
    } else if app.finished {
        format!(
            "Complete! {} renamed, {} skipped, {} failed",
            app.stats.successful, app.stats.skipped, app.stats.failed
        )
    } else if app.current_processing.is_some() {
        format!("Renaming... {}/{}", app.stats.processed + 1, app.stats.total)
    } else {
        format!("{} renames planned", app.stats.total)
    };

    let progress_style = if app.halted {
        Style::default().fg(Color::Red)
    } else if app.status_message.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    };

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(progress_style)
        .ratio(app.processing_progress.clamp(0.0, 1.0))
        .label(progress_label);
    f.render_widget(progress, chunks[0]);

    let controls_text = if app.finished {
        "Press ENTER or q to quit"
    } else {
        "ENTER confirm, q cancel, h help"
    };
    let controls = Paragraph::new(controls_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, chunks[1]);
}

fn render_preview_panel(f: &mut Frame, area: Rect, app: &App) {
    let Some(item) = app.selected_item() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let location = item
        .operation
        .old_path
        .parent()
        .and_then(|parent| parent.strip_prefix(&app.root).ok())
        .map(|parent| parent.display().to_string())
        .unwrap_or_default();

    let original = Paragraph::new(Text::from(vec![
        Line::from("Original:"),
        Line::from(Span::styled(
            item.original_name.clone(),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(format!("In: {}/{location}", app.series_name)),
    ]))
    .block(
        Block::default()
            .title("Before")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(original, chunks[0]);

    let new_style = match item.status {
        ProcessingStatus::Success => Style::default().fg(Color::Green),
        ProcessingStatus::Error => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Yellow),
    };

    let mut new_lines = vec![
        Line::from("New:"),
        Line::from(Span::styled(item.new_name.clone(), new_style)),
        Line::from(""),
    ];
    if let Some(target) = &item.target {
        new_lines.push(Line::from(format!("Season: {}", target.season)));
        if let Some(episode) = target.episode {
            new_lines.push(Line::from(format!("Episode: {episode}")));
        }
    }
    if let Some(error) = &item.error_message {
        new_lines.push(Line::from(""));
        new_lines.push(Line::from(Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let new = Paragraph::new(Text::from(new_lines))
        .block(
            Block::default()
                .title("After")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(new, chunks[1]);
}

fn render_help_popup(f: &mut Frame) {
    let popup_area = centered_rect(60, 50, f.area());

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Series Rename - Help",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  Up/k    - Move up"),
        Line::from("  Down/j  - Move down"),
        Line::from(""),
        Line::from("Actions:"),
        Line::from("  Enter/y - Confirm and rename"),
        Line::from("  t       - Toggle list/tree view"),
        Line::from("  p       - Toggle preview panel"),
        Line::from("  h/F1    - Toggle this help"),
        Line::from("  q/Esc   - Cancel without renaming"),
        Line::from(""),
        Line::from("Renames stop at the first error."),
        Line::from("Renames already applied are kept."),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or h to close",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
