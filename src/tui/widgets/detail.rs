//! Detail popups for annotations, experts and evaluation runs, plus the
//! shared popup chrome.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::fmt;
use crate::model::{InsightKind, Vote, Workspace};
use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;

// ---------------------------------------------------------------------------
// Popup chrome
// ---------------------------------------------------------------------------

/// Returns a centered rect of given percentage within `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Renders a popup with unified chrome: border, scroll clamping, footer.
pub fn render_popup_frame(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    content: Vec<Line<'static>>,
    scroll: &mut usize,
) {
    let popup_area = centered_rect(80, 85, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    // Estimate visual lines after wrapping to clamp the scroll offset.
    let inner_width = chunks[0].width as usize;
    let visual_lines: usize = if inner_width > 0 {
        content
            .iter()
            .map(|line| {
                let w = line.width();
                if w == 0 { 1 } else { w.div_ceil(inner_width) }
            })
            .sum()
    } else {
        content.len()
    };
    let visible_height = chunks[0].height as usize;
    let max_scroll = visual_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let bg = Style::default().fg(Color::White).bg(Color::Black);
    let paragraph = Paragraph::new(content)
        .style(bg)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, chunks[0]);

    let footer = Line::from(vec![
        Span::styled("Up/Dn", Styles::help_key()),
        Span::styled(" scroll  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(footer).style(bg), chunks[1]);
}

/// Section header: `-- {name} --`
pub fn section(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("-- {} --", name),
        Styles::section_header(),
    ))
}

/// Simple key-value line. Key is right-aligned 16 chars with colon.
pub fn kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>16}: ", key), Styles::key()),
        Span::raw(value.to_string()),
    ])
}

/// Plain wrapped text line, indented under the value column.
pub fn text_line(text: &str) -> Line<'static> {
    Line::from(Span::raw(format!("  {}", text)))
}

fn blank() -> Line<'static> {
    Line::from("")
}

fn vote_label(vote: Vote) -> &'static str {
    match vote {
        Vote::Positive => "+",
        Vote::Negative => "-",
        Vote::Neutral => "~",
    }
}

fn expert_name(ws: &Workspace, expert_id: u32) -> String {
    ws.experts
        .iter()
        .find(|e| e.id == expert_id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| format!("expert #{expert_id}"))
}

// ---------------------------------------------------------------------------
// Annotation detail
// ---------------------------------------------------------------------------

/// Renders the annotation detail popup (ANN tab, Enter).
pub fn render_annotation_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let (id, scroll) = match &mut state.popup {
        PopupState::AnnotationDetail { id, scroll } => (*id, scroll),
        _ => return,
    };
    let ws = &state.workspace;
    let Some(annotation) = ws.annotations.iter().find(|a| a.id == id) else {
        return;
    };

    let (positive, total) = annotation.vote_tally();
    let mut lines = vec![
        kv("Scan", &annotation.image),
        blank(),
        section("Input"),
        text_line(&annotation.input),
        blank(),
        section("Model Response"),
        text_line(&annotation.model_response),
        blank(),
        section("Eval Response"),
        text_line(&annotation.eval_response),
        blank(),
        kv("Grade", &fmt::format_grade(annotation.grade)),
        kv("Consensus", &format!("{} ({positive}/{total})", annotation.consensus)),
        kv("Cumulative", &annotation.cumulative_feedback),
        blank(),
        section("Expert Feedback"),
    ];
    for fb in &annotation.feedback {
        lines.push(text_line(&format!(
            "[{}] {}: {}",
            vote_label(fb.vote),
            expert_name(ws, fb.expert_id),
            fb.note
        )));
    }
    lines.push(blank());
    lines.push(section("Comments"));
    if annotation.comments.is_empty() {
        lines.push(text_line("(none - press c to add one)"));
    }
    for comment in &annotation.comments {
        lines.push(text_line(&format!(
            "{} ({}) at {}:",
            comment.author,
            comment.role,
            fmt::format_datetime(comment.posted_at)
        )));
        lines.push(text_line(&format!("  {}", comment.text)));
    }

    let title = format!("Annotation #{}", annotation.id);
    render_popup_frame(frame, area, &title, lines, scroll);
}

// ---------------------------------------------------------------------------
// Expert detail
// ---------------------------------------------------------------------------

/// Renders the expert detail popup (EXP tab, Enter): progress plus the
/// per-expert insight feed.
pub fn render_expert_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let (id, scroll) = match &mut state.popup {
        PopupState::ExpertDetail { id, scroll } => (*id, scroll),
        _ => return,
    };
    let ws = &state.workspace;
    let Some(expert) = ws.experts.iter().find(|e| e.id == id) else {
        return;
    };

    let last_edit = expert
        .latest_edit
        .map(fmt::format_datetime)
        .unwrap_or_else(|| "never".to_string());
    let mut lines = vec![
        kv("Name", &expert.name),
        kv("Role", &expert.role),
        kv("Progress", &fmt::format_percent(expert.progress_pct)),
        kv("Instructions", &format!("v{}", expert.doc_version)),
        kv("Status", expert.status.label()),
        kv("Last edit", &last_edit),
    ];

    for kind in [
        InsightKind::Alert,
        InsightKind::Progress,
        InsightKind::Quality,
        InsightKind::Trend,
    ] {
        let items: Vec<_> = ws
            .insights_for(expert.id)
            .into_iter()
            .filter(|i| i.kind == kind)
            .collect();
        if items.is_empty() {
            continue;
        }
        lines.push(blank());
        lines.push(section(kind.label()));
        for insight in items {
            lines.push(text_line(&insight.message));
        }
    }

    let title = format!("Expert: {}", expert.name);
    render_popup_frame(frame, area, &title, lines, scroll);
}

// ---------------------------------------------------------------------------
// Run detail
// ---------------------------------------------------------------------------

/// Renders the evaluation run detail popup (RUN tab, Enter).
pub fn render_run_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let (id, scroll) = match &mut state.popup {
        PopupState::RunDetail { id, scroll } => (*id, scroll),
        _ => return,
    };
    let ws = &state.workspace;
    let Some(run) = ws.runs.iter().find(|r| r.id == id) else {
        return;
    };

    let mut lines = vec![
        kv("Name", &run.name),
        kv("Date", &fmt::format_date(run.date)),
        kv("Dataset", &format!("v{}", run.data_version)),
        kv("Status", run.status.label()),
        blank(),
    ];
    match &run.status {
        crate::model::RunStatus::Completed {
            accuracy,
            completeness,
            insights,
        } => {
            lines.push(section("Metrics"));
            lines.push(kv("Accuracy", &fmt::format_ratio(*accuracy)));
            lines.push(kv("Completeness", &fmt::format_ratio(*completeness)));
            lines.push(blank());
            lines.push(section("Insights"));
            lines.push(text_line(insights));
        }
        crate::model::RunStatus::InProgress { progress_pct } => {
            lines.push(kv("Progress", &fmt::format_percent(*progress_pct)));
        }
        crate::model::RunStatus::Failed { error } => {
            lines.push(section("Error"));
            lines.push(text_line(error));
        }
    }

    let title = format!("Evaluation {}", run.name);
    render_popup_frame(frame, area, &title, lines, scroll);
}
