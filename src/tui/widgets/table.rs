//! Generic table widget: renders a [`TableViewModel`] plus its footer line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState as RatatuiTableState};

use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

/// Renders one tab's table with a header row, sort indicator and footer.
pub fn render_table<Id>(
    frame: &mut Frame,
    area: Rect,
    vm: &TableViewModel<Id>,
    ratatui_state: &mut RatatuiTableState,
) {
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    // Header with sort indicator
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .zip(vm.fields.iter())
        .map(|(h, f)| {
            let indicator = if !f.is_empty() && vm.sort_field == Some(*f) {
                if vm.sort_ascending { "^" } else { "v" }
            } else {
                ""
            };
            Span::styled(format!("{h}{indicator}"), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let base_style = Styles::from_class(vr.style);
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(base_style).height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> = vm
        .widths
        .iter()
        .map(|&w| Constraint::Length(w))
        .collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(vm.title.clone())
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    frame.render_stateful_widget(table, chunks[0], ratatui_state);

    let footer = Paragraph::new(vm.footer()).style(Styles::dim());
    frame.render_widget(footer, chunks[1]);
}
