//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus the
//! screen layout the event loop uses for mouse hit-testing.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus, Mode};
use crate::config::Settings;
use crate::format::{format_duration, format_time};
use crate::library::Track;
use crate::studio::View;
use crate::waveform;

const SIDEBAR_WIDTH: u16 = 28;
const PARTIAL_BLOCKS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];

/// Screen regions, shared by the renderer and the mouse handler.
#[derive(Debug, Clone, Copy)]
pub struct Areas {
    pub header: Rect,
    pub playlists: Rect,
    pub tracks: Rect,
    pub waveform: Rect,
    pub footer: Rect,
}

impl Areas {
    /// The waveform strip without its border; clicks inside seek.
    pub fn waveform_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.waveform)
    }
}

pub fn layout(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(rows[1]);

    Areas {
        header: rows[0],
        playlists: body[0],
        tracks: body[1],
        waveform: rows[2],
        footer: rows[3],
    }
}

fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] move".to_string(),
        "[tab] pane".to_string(),
        "[space] play".to_string(),
        "[l] loop".to_string(),
        "[m] mute".to_string(),
        "[ [/] ] vol".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[P] all".to_string(),
        "[-/+] master".to_string(),
        "[t/T] sleep".to_string(),
        "[o] import".to_string(),
        "[n] playlist".to_string(),
        "[a] add to".to_string(),
        "[x/X] remove".to_string(),
        "[1/2] view".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// `[#####-----]`-style level meter.
fn level_meter(level: f32, cells: usize) -> String {
    let filled = ((level.clamp(0.0, 1.0) * cells as f32).round() as usize).min(cells);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(cells - filled))
}

/// Glyph for one cell of a bar `height` tall (0..=1), `row` counted from the top.
fn bar_glyph(height: f64, row: u16, rows: u16) -> char {
    let from_bottom = f64::from(rows.saturating_sub(row + 1));
    let fill = height * f64::from(rows) - from_bottom;
    if fill >= 1.0 {
        '█'
    } else if fill <= 0.0 {
        ' '
    } else {
        PARTIAL_BLOCKS[((fill * 8.0) as usize).min(PARTIAL_BLOCKS.len() - 1)]
    }
}

fn track_line(track: &Track) -> Line<'static> {
    let state = match (track.intended_playing, track.actual_playing) {
        (true, true) => "▶",
        (true, false) => "…",
        (false, _) => "⏸",
    };
    let mut flags = String::new();
    if track.looping {
        flags.push_str(" [loop]");
    }
    if track.muted {
        flags.push_str(" [mute]");
    }
    let time = format!(
        "{} / {}",
        format_duration(track.position),
        format_duration(track.duration)
    );

    Line::from(vec![
        Span::raw(format!("{state} ")),
        Span::styled(track.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {time}  vol {:>3.0}%", track.volume * 100.0)),
        Span::styled(flags, Style::default().fg(Color::Yellow)),
    ])
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings) {
    let areas = layout(frame.area());
    let studio = &app.studio;

    // Header
    let aggregate = if studio.all_playing() {
        "▶ all playing"
    } else {
        "⏸ paused"
    };
    let view = match studio.view() {
        View::AllTracks => "All tracks".to_string(),
        View::ActivePlaylist => studio.active_playlist().name.clone(),
    };
    let mut status = format!("{aggregate} • {view}");
    if studio.sleep_timer().is_armed() {
        status.push_str(&format!(
            " • sleep in {}",
            format_time(studio.sleep_timer().remaining() as f64)
        ));
    }
    let header = Paragraph::new(status).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(settings.ui.header_text.as_str())
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, areas.header);

    // Playlist sidebar
    {
        let items: Vec<ListItem> = studio
            .playlists()
            .iter()
            .map(|p| {
                let marker = if &p.id == studio.playlists().active_id() { "●" } else { " " };
                ListItem::new(format!("{marker} {} ({})", p.name, p.track_ids().len()))
            })
            .collect();
        let focused = app.focus == Focus::Playlists;
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" playlists ")
                    .border_style(focus_style(focused)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if focused {
            state.select(Some(app.selected_playlist));
        }
        frame.render_stateful_widget(list, areas.playlists, &mut state);
    }

    // Track list
    let visible = studio.visible_tracks();
    {
        let items: Vec<ListItem> = visible.iter().map(|t| ListItem::new(track_line(t))).collect();
        let focused = app.focus == Focus::Tracks;
        let title = format!(" tracks ({}) ", visible.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(focus_style(focused)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !visible.is_empty() {
            state.select(Some(app.selected_track));
        }
        frame.render_stateful_widget(list, areas.tracks, &mut state);
    }

    // Waveform
    {
        let selected = visible.get(app.selected_track).copied();
        let inner = areas.waveform_inner();
        let title = selected
            .map(|t| format!(" {} (click to seek) ", t.name))
            .unwrap_or_else(|| " waveform ".to_string());
        frame.render_widget(
            Block::default().borders(Borders::ALL).title(title),
            areas.waveform,
        );
        if let Some(track) = selected {
            let lines = waveform_lines(track, inner, settings.ui.waveform_bars);
            frame.render_widget(Paragraph::new(lines), inner);
        }
    }

    // Footer
    {
        let mut first = vec![Span::raw(format!(
            "master {} {:>3.0}%",
            level_meter(studio.master_volume(), 10),
            studio.master_volume() * 100.0
        ))];
        let timer = studio.sleep_timer();
        first.push(Span::raw(if timer.is_armed() {
            format!("  •  sleep {}", format_time(timer.remaining() as f64))
        } else {
            "  •  sleep off".to_string()
        }));
        if let Some(toast) = app.latest_toast() {
            let color = if toast.notice.is_rejection() {
                Color::Red
            } else {
                Color::Green
            };
            first.push(Span::raw("  •  "));
            first.push(Span::styled(toast.notice.to_string(), Style::default().fg(color)));
        }
        let text = vec![
            Line::from(first),
            Line::from(controls_text(settings.controls.scrub_seconds)),
        ];
        let footer = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" controls ")
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, areas.footer);
    }

    match &app.mode {
        Mode::Normal => {}
        Mode::Input { prompt, buffer } => {
            let popup = centered_rect_sized(60, 3, frame.area());
            frame.render_widget(Clear, popup);
            let input = Paragraph::new(format!("{buffer}_")).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(prompt.title())
                    .title_bottom(" enter confirms, esc cancels "),
            );
            frame.render_widget(input, popup);
        }
        Mode::PickPlaylist { cursor } => {
            let height = studio.playlists().len() as u16 + 2;
            let popup = centered_rect_sized(40, height, frame.area());
            frame.render_widget(Clear, popup);
            let items: Vec<ListItem> = studio
                .playlists()
                .iter()
                .map(|p| ListItem::new(p.name.clone()))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" add to playlist "))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(*cursor));
            frame.render_stateful_widget(list, popup, &mut state);
        }
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// One line per row of `area`, bars resampled to the strip width and
/// coloured up to the playhead.
fn waveform_lines(track: &Track, area: Rect, bars: usize) -> Vec<Line<'static>> {
    let width = usize::from(area.width);
    if width == 0 || area.height == 0 {
        return Vec::new();
    }
    let heights = waveform::bar_heights(track.id.as_str(), bars);
    let played = waveform::progress_bars(track.position, track.duration, width);

    (0..area.height)
        .map(|row| {
            let spans: Vec<Span> = (0..width)
                .map(|col| {
                    let h = heights.get(col * heights.len() / width).copied().unwrap_or(0.0);
                    let color = if col < played { Color::Cyan } else { Color::DarkGray };
                    Span::styled(
                        bar_glyph(h, row, area.height).to_string(),
                        Style::default().fg(color),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
