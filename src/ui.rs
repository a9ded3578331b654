use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use kanatype::reconcile::Outcome;
use kanatype::session::Phase;
use kanatype::token::TokenKind;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let completed_style = Style::default().fg(Color::Green).add_modifier(Modifier::DIM);
        let magenta_style = Style::default().fg(Color::Magenta);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        match session.phase() {
            Phase::Idle => {
                let prompt = Paragraph::new(Span::styled(
                    "Press SPACE to start",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });

                prompt.render(centered_line(area), buf);
            }
            Phase::Running => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Length(1), // counters
                            Constraint::Min(1),    // padding
                            Constraint::Length(2), // batch
                            Constraint::Length(1), // typed kana echo
                            Constraint::Min(1),    // padding
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let counters = Paragraph::new(Line::from(vec![
                    Span::styled(format!("スコア {}", session.score()), bold_style),
                    Span::raw("   "),
                    Span::styled(format!("タイム {}", session.secs_remaining()), dim_bold_style),
                    Span::raw("   "),
                    Span::styled(format!("WPM {}", session.wpm()), bold_style),
                ]))
                .alignment(Alignment::Center);
                counters.render(chunks[0], buf);

                let mut spans: Vec<Span> = Vec::new();
                for (idx, item) in session.batch().items().iter().enumerate() {
                    if idx > 0 {
                        spans.push(Span::raw("  "));
                    }

                    let is_past = idx < session.batch().cursor();
                    let is_active = idx == session.batch().cursor();

                    // annotated tokens show the glyph; the reading is what
                    // gets per-character classification colors
                    if item.token.kind() == TokenKind::Annotated {
                        spans.push(Span::styled(
                            item.token.display().to_string(),
                            if is_past { completed_style } else { dim_bold_style },
                        ));
                        spans.push(Span::styled("(", dim_bold_style));
                    }

                    for (char_idx, ch) in item.target.chars().enumerate() {
                        let style = if is_past {
                            completed_style
                        } else if is_active {
                            match session.outcome_at(char_idx) {
                                Outcome::Correct => green_bold_style,
                                Outcome::Incorrect => red_bold_style,
                                Outcome::Pending => dim_bold_style,
                            }
                        } else {
                            dim_bold_style
                        };
                        spans.push(Span::styled(ch.to_string(), style));
                    }

                    if item.token.kind() == TokenKind::Annotated {
                        spans.push(Span::styled(")", dim_bold_style));
                    }
                }

                let batch_width: usize = spans.iter().map(|s| s.content.width()).sum();
                let max_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2) as usize;
                let batch = Paragraph::new(Line::from(spans))
                    .alignment(if batch_width <= max_width {
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true });
                batch.render(chunks[2], buf);

                let typed = Paragraph::new(Span::styled(
                    if session.converted().is_empty() {
                        session.raw_input().to_string()
                    } else {
                        session.converted().to_string()
                    },
                    magenta_style,
                ))
                .alignment(Alignment::Center);
                typed.render(chunks[3], buf);
            }
            Phase::Over => {
                let lines = vec![
                    Line::from(Span::styled(
                        "ゲームオーバー！ (Game Over)",
                        Style::default().fg(Color::Yellow).patch(bold_style),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Score {}   WPM {}", session.score(), session.wpm()),
                        bold_style,
                    )),
                    Line::from(""),
                    Line::from(Span::styled("Press SPACE to restart", italic_style)),
                ];
                let over = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                over.render(centered_block(area, 5), buf);
            }
        }
    }
}

/// A one-line rect vertically centered in `area`.
fn centered_line(area: Rect) -> Rect {
    centered_block(area, 1)
}

fn centered_block(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    }
}
