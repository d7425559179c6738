use crate::{feed::FeedLine, styles};
use anyhow::Result;
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use textwrap::wrap;

pub struct ViewSnap<'a> {
    pub input: &'a str,
    pub caret_col: u16,
    pub lines: &'a [FeedLine],
    pub scroll: usize,
    pub tweet_count: usize,
    pub container_id: &'a str,
    pub send_control_id: &'a str,
    pub author: &'a str,
    pub page: &'static str,
    pub in_flight: u32,
    pub spinner: &'static str,
    pub notice: Option<&'a FeedLine>,
}

pub fn draw<B: Backend>(term: &mut Terminal<B>, snap: &ViewSnap<'_>) -> Result<()> {
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![Span::styled(
            " Tweetboard ",
            styles::title(),
        )]))
        .wrap(Wrap { trim: true });
        frame.render_widget(header, layout[0]);

        // Tweet pane, scrolled from the bottom
        let visible_h = layout[1].height.saturating_sub(2) as usize;
        let content_width = layout[1].width.saturating_sub(2) as usize;
        let wrapped = wrap_feed(snap.lines, content_width);
        let total = wrapped.len();
        let scroll = snap.scroll.min(total);
        let start = total.saturating_sub(visible_h + scroll);
        let end = total - scroll;

        let items: Vec<ListItem> = wrapped[start..end]
            .iter()
            .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
            .collect();
        let pane_title = format!(" #{} ({}) ", snap.container_id, snap.tweet_count);
        let body = List::new(items).block(Block::default().borders(Borders::ALL).title(pane_title));
        frame.render_widget(body, layout[1]);

        let compose_title = format!(" #{} as @{} ", snap.send_control_id, snap.author);
        let input_box = Paragraph::new(snap.input)
            .block(Block::default().borders(Borders::ALL).title(compose_title));
        frame.render_widget(Clear, layout[2]);
        frame.render_widget(input_box, layout[2]);

        // Long lines pin the caret to the right edge of the box.
        let caret_col = snap.caret_col.min(layout[2].width.saturating_sub(2));
        frame.set_cursor_position(Position {
            x: layout[2].x.saturating_add(1).saturating_add(caret_col),
            y: layout[2].y.saturating_add(1),
        });

        let mut status = vec![
            Span::raw(" "),
            Span::styled(snap.spinner, styles::busy()),
            Span::raw(" "),
            if snap.in_flight > 0 {
                Span::styled("Posting…", styles::busy())
            } else {
                Span::styled(snap.page, styles::idle())
            },
            Span::raw(format!(" • in flight: {}", snap.in_flight)),
        ];
        if let Some(notice) = snap.notice {
            status.push(Span::raw(" • "));
            status.push(Span::styled(notice.text.clone(), notice.style));
        }
        let status = Paragraph::new(Line::from(status))
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, layout[3]);
    })?;

    Ok(())
}

fn wrap_feed(lines: &[FeedLine], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for entry in lines {
        if entry.text.is_empty() {
            out.push((String::new(), entry.style));
            continue;
        }
        let segments = wrap(&entry.text, effective_width);
        if segments.is_empty() {
            out.push((String::new(), entry.style));
        } else {
            out.extend(
                segments
                    .into_iter()
                    .map(|seg| (seg.into_owned(), entry.style)),
            );
        }
    }

    out
}
