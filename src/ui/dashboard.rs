use crate::ui::app::App;
use crate::ui::wireframe::{bounds, wireframe};
use crate::view::Pitch;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, List, ListItem, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

// Brand colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C);
const BRAND_ACCENT: Color = Color::Rgb(0x58, 0x6B, 0x71);
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0);
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68);
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C);
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65);

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let scene = app.editor.scene();
    let state = scene.state();
    let mode = match (state.floor, state.pitch) {
        (_, Pitch::TopDown) => "top down",
        (Some(_), Pitch::Normal) => "plan",
        (None, Pitch::Normal) => "3D",
    };
    let layer = if state.layer.is_empty() { "-" } else { state.layer.as_str() };
    let title = format!(
        " Building Viewer | {} | {mode} | yaw {}° | pitch {}° | layer {layer} ",
        scene.building().name,
        state.normalized_yaw(),
        state.pitch.degrees(),
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_main_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(15), // Levels
        Constraint::Percentage(50), // Canvas
        Constraint::Percentage(35), // Walls
    ])
    .split(area);

    draw_levels(frame, chunks[0], app);
    draw_canvas(frame, chunks[1], app);
    draw_walls(frame, chunks[2], app);
}

fn draw_levels(frame: &mut Frame, area: Rect, app: &App) {
    let building = app.editor.building();
    let selected = app.editor.scene().state().floor;

    let item = |label: &str, is_selected: bool, walls: usize| {
        let style = if is_selected {
            SELECTED_STYLE
        } else {
            Style::default()
        };
        let marker = if is_selected { " ◄" } else { "" };
        ListItem::new(Line::from(vec![
            Span::styled(label.to_string(), style),
            Span::styled(format!(" ({walls})"), Style::default().fg(BRAND_GREEN)),
            Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
        ]))
    };

    let mut items = vec![item("All", selected.is_none(), building.wall_count())];
    for floor in &building.floors {
        let label = if floor.name.is_empty() {
            format!("Level {}", floor.level)
        } else {
            floor.name.clone()
        };
        items.push(item(&label, selected == Some(floor.level), floor.walls.len()));
    }

    let title = format!(" Levels ({}) ", building.floors.len() + 1);
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(list, area);
}

fn draw_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let segments = wireframe(app.editor.scene());
    let (x_bounds, y_bounds) = bounds(&segments);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" View ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BRAND_ORANGE)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for s in &segments {
                let color = if Some(s.wall) == app.selected {
                    BRAND_ORANGE
                } else {
                    BRAND_ACCENT
                };
                ctx.draw(&CanvasLine::new(s.from.0, s.from.1, s.to.0, s.to.1, color));
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_walls(frame: &mut Frame, area: Rect, app: &App) {
    let scene = app.editor.scene();
    let walls: Vec<_> = scene.visible_walls().collect();

    let visible_rows = (area.height as usize).saturating_sub(3);
    let selected_index = app
        .selected
        .and_then(|id| walls.iter().position(|w| w.id == id))
        .unwrap_or(0);
    let scroll_offset = if selected_index >= visible_rows {
        selected_index - visible_rows + 1
    } else {
        0
    };

    let header = Row::new(vec!["Tags", "Level", "Main", "Reading"])
        .style(HEADER_STYLE)
        .height(1);

    let rows: Vec<Row> = walls
        .iter()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|w| {
            let style = if Some(w.id) == app.selected {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            let reading = app
                .editor
                .readout(w.id)
                .map(|r| match &r.state {
                    Some(state) => format!("{} [{state}]", r.text),
                    None => r.text.clone(),
                })
                .unwrap_or_default();
            Row::new(vec![
                w.tags.to_string(),
                w.floor.to_string(),
                w.main_side.to_string(),
                reading,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(50),
        Constraint::Percentage(10),
        Constraint::Percentage(12),
        Constraint::Percentage(28),
    ];

    let title = format!(" Visible walls ({}) ", walls.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);

    if walls.len() > visible_rows && area.height > 3 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(walls.len()).position(selected_index);

        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 2,
            width: 1,
            height: area.height - 3,
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = " ←→ Rotate | ↑↓ Tilt | f Floor | l Layer | v View | Tab Select | Del Delete | a Add | q Quit ";
    let text = if app.status.is_empty() {
        help.to_string()
    } else {
        format!("{help}| {} ", app.status)
    };
    let footer = Paragraph::new(text)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
