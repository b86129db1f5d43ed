use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;

/// Pre-computed layout areas for the main draw loop. The side column hosts
/// the two management panels and is present in every mode; on narrow
/// terminals it drops below the main area instead.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    /// Everything below the tab bar. Tabs without a side column draw here.
    pub content: Rect,
    pub main: Rect,
    pub side: [Rect; 2],
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool) {
        *self = Self::from_rect(area, full_screen);
    }

    fn from_rect(area: Rect, full_screen: bool) -> Self {
        let (tab_bar, content) = if full_screen {
            ([Rect::ZERO, Rect::ZERO], area)
        } else {
            let [tab, content] = Layout::vertical([
                Constraint::Length(TAB_BAR_HEIGHT),
                Constraint::Fill(1),
            ])
            .areas(area);
            (Self::split_tab_bar(tab), content)
        };

        let (main, side_area) = if content.width >= 90 {
            let [main, side] =
                Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)])
                    .areas(content);
            (main, side)
        } else {
            let [main, side] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(12)]).areas(content);
            (main, side)
        };

        let side = if side_area.width >= side_area.height * 3 && content.width < 90 {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(side_area)
        } else {
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(side_area)
        };

        LayoutAreas { tab_bar, content, main, side }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}
