use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Front for the event-archive manager. The manager itself lives in the
/// backend; this panel shows the event/year it is pointed at and what it
/// last reported, and advertises the keys that drive it.
pub struct ArchivePanel<'a> {
    pub event_key: Option<&'a str>,
    pub year: u16,
    pub last_action: Option<&'a str>,
    pub focused: bool,
}

impl Widget for ArchivePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" Archives ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines = vec![
            Line::from(vec![
                Span::styled("event ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.event_key.unwrap_or("-")),
                Span::styled("  season ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.year.to_string()),
            ]),
            Line::from(""),
        ];

        match self.last_action {
            Some(action) => lines.push(Line::from(Span::styled(
                format!("last: {action}"),
                Style::default().fg(Color::Gray),
            ))),
            None => lines.push(Line::from(Span::styled(
                "No archive activity yet",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "a=archive current  o=restore",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
