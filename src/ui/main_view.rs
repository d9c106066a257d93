use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use crate::app::{App, InputMode, MessageType};
use crate::constants::MESSAGE_AREA_MARGIN;
use crate::utils::{format_sui_balance, mist_to_sui_string, shorten_id};
use crate::wallet::TipJarStats;
use super::utils::{input_line, sync_indicator, wrap_message};

/// Render the main application UI
pub fn draw_main(f: &mut Frame, app: &App) {
    let primary_color = Color::Cyan;
    let secondary_color = Color::LightBlue;
    let dim_color = Color::DarkGray;

    // Full screen border
    let main_block = Block::default()
        .title(" SUI TIP JAR ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(primary_color));
    f.render_widget(main_block, f.size());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(1),   // Network / wallet / balance
            Constraint::Length(1),   // Padding
            Constraint::Min(9),      // Stats and forms
            Constraint::Length(6),   // Message area
            Constraint::Length(3),   // Controls
        ])
        .split(f.size());

    render_header(f, app, main_layout[0], primary_color);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(main_layout[2]);

    render_stats(f, app, content_layout[0], primary_color, secondary_color);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Tip form
            Constraint::Length(4),  // Owner form
            Constraint::Min(0),     // Reset
        ])
        .split(content_layout[1]);

    render_tip_form(f, app, form_chunks[0], primary_color, secondary_color);
    render_owner_form(f, app, form_chunks[1], primary_color, secondary_color);
    render_reset(f, app, form_chunks[2], primary_color);

    render_message_area(f, app, main_layout[3], primary_color);
    render_help_controls(f, app, main_layout[4], dim_color);
}

fn render_header(f: &mut Frame, app: &App, area: Rect, primary_color: Color) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let network = Paragraph::new(format!("NETWORK: {}", app.config.network.name().to_uppercase()))
        .style(Style::default().fg(primary_color))
        .alignment(Alignment::Center);
    f.render_widget(network, chunks[0]);

    let wallet = Paragraph::new(format!("WALLET: {}", app.wallet_address))
        .style(Style::default().fg(primary_color))
        .alignment(Alignment::Center);
    f.render_widget(wallet, chunks[1]);

    let balance_text = match app.sui_balance {
        Some(balance) => format_sui_balance(balance),
        None => "--".to_string(),
    };
    let balance = Paragraph::new(format!("BALANCE: {}", balance_text))
        .style(Style::default().fg(primary_color))
        .alignment(Alignment::Center);
    f.render_widget(balance, chunks[2]);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect, primary_color: Color, secondary_color: Color) {
    let (indicator, indicator_color) = sync_indicator(app.stats.as_ref());
    let stats_block = Block::default()
        .title(Line::from(vec![
            Span::raw(" TIP JAR "),
            Span::styled(format!("[{}] ", indicator), Style::default().fg(indicator_color)),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color));

    let stats = app.stats.as_ref().map(|s| s.stats.clone()).unwrap_or_else(TipJarStats::default);
    let owner = if stats.owner.is_empty() {
        "--".to_string()
    } else {
        shorten_id(&stats.owner)
    };
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(secondary_color).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Total tips   ", label),
            Span::styled(format!("{} SUI", mist_to_sui_string(stats.total_tips_mist())), value),
        ]),
        Line::from(vec![
            Span::styled("Tip count    ", label),
            Span::styled(stats.tip_count.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Owner        ", label),
            Span::styled(owner, value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Jar          ", label),
            Span::styled(shorten_id(&app.config.tip_jar_id.to_string()), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(stats_block), area);
}

fn form_block(title: &str, focused: bool, primary_color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(Style::default().fg(if focused { Color::Yellow } else { primary_color }))
}

fn render_tip_form(f: &mut Frame, app: &App, area: Rect, primary_color: Color, secondary_color: Color) {
    let focused = app.input_mode == InputMode::EditingTip;
    let status = if app.loading && focused {
        Span::styled("Sending...", Style::default().fg(Color::Yellow))
    } else if app.can_send_tip() {
        Span::styled("Enter: Send Tip (Gas Free!)", Style::default().fg(Color::Green))
    } else {
        Span::styled("Send Tip (Gas Free!)", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        input_line("Amount (SUI) ", &app.tip_amount, focused, secondary_color),
        Line::from(status),
    ];
    f.render_widget(Paragraph::new(lines).block(form_block(" SEND TIP ", focused, primary_color)), area);
}

fn render_owner_form(f: &mut Frame, app: &App, area: Rect, primary_color: Color, secondary_color: Color) {
    let focused = app.input_mode == InputMode::EditingOwner;
    let status = if app.can_change_owner() {
        Span::styled("Enter: Change Owner", Style::default().fg(Color::Green))
    } else {
        Span::styled("Change Owner", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        input_line("New owner    ", &app.new_owner, focused, secondary_color),
        Line::from(status),
    ];
    f.render_widget(Paragraph::new(lines).block(form_block(" CHANGE OWNER ", focused, primary_color)), area);
}

fn render_reset(f: &mut Frame, app: &App, area: Rect, primary_color: Color) {
    let (text, color) = if app.is_confirming_reset {
        ("Reset tip statistics? (Y/N)", Color::Yellow)
    } else {
        ("Press X to reset statistics", Color::DarkGray)
    };
    let reset = Paragraph::new(text)
        .block(form_block(" RESET STATS ", app.is_confirming_reset, primary_color))
        .style(Style::default().fg(color));
    f.render_widget(reset, area);
}

fn render_message_area(f: &mut Frame, app: &App, area: Rect, primary_color: Color) {
    let message_block = Block::default()
        .title(" MESSAGE ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color));

    let available_width = area.width.saturating_sub(MESSAGE_AREA_MARGIN);
    let (message, color) = if app.loading {
        (Some("Processing...".to_string()), Color::Yellow)
    } else if let Some(success) = &app.success_message {
        (Some(success.clone()), Color::Green)
    } else if let Some(error) = &app.error_message {
        let color = match app.message_type {
            MessageType::Error => Color::Red,
            MessageType::Info | MessageType::Success => Color::White,
        };
        (Some(error.clone()), color)
    } else {
        (None, primary_color)
    };

    match message {
        Some(text) => {
            let message_text = Paragraph::new(wrap_message(&text, available_width))
                .style(Style::default().fg(color))
                .alignment(Alignment::Left)
                .block(message_block);
            f.render_widget(message_text, area);
        }
        // Just show the border when no message
        None => f.render_widget(message_block, area),
    }
}

fn render_help_controls(f: &mut Frame, app: &App, area: Rect, dim_color: Color) {
    let help_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(dim_color));

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let sep = || Span::raw("  |  ");

    let help_text = if app.is_confirming_reset {
        Line::from(vec![key("Y"), Span::raw(": Confirm"), sep(), key("N"), Span::raw(": Cancel")])
    } else if app.is_editing() {
        Line::from(vec![key("Enter"), Span::raw(": Submit"), sep(), key("Esc"), Span::raw(": Back")])
    } else {
        Line::from(vec![
            key("T"), Span::raw(": Tip"), sep(),
            key("O"), Span::raw(": Owner"), sep(),
            key("X"), Span::raw(": Reset"), sep(),
            key("R"), Span::raw(": Refresh"), sep(),
            key("Q"), Span::raw(": Quit"),
        ])
    };

    let help = Paragraph::new(help_text)
        .block(help_block)
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}
