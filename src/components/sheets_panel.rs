use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Front for the scouting-sheet configuration manager, parameterized by the
/// effective event and season like the archive panel.
pub struct SheetsPanel<'a> {
    pub event_key: Option<&'a str>,
    pub year: u16,
    pub last_change: Option<&'a str>,
    pub focused: bool,
}

impl Widget for SheetsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" Sheet Config ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let target = match self.event_key {
            Some(key) => format!("{key} ({})", self.year),
            None => format!("season defaults ({})", self.year),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("sheets for ", Style::default().fg(Color::DarkGray)),
                Span::raw(target),
            ]),
            Line::from(""),
        ];

        match self.last_change {
            Some(at) => lines.push(Line::from(Span::styled(
                format!("config updated {at}"),
                Style::default().fg(Color::Gray),
            ))),
            None => lines.push(Line::from(Span::styled(
                "Config unchanged this session",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "g=regenerate sheet config",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
