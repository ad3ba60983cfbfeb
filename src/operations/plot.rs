use std::collections::BTreeMap;
use std::io;

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Color, Rect, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregate::by_category;
use crate::models::transaction::TransactionType;
use crate::query::filter::{month_bounds, resolve_month};
use crate::query::{Ordering, OrderBy, OrderDirection, Predicate, list_transactions};
use crate::{Database, Error};

/// Expense totals per category for the chart, plus the chart title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpensePlot {
    pub title: String,
    pub expenses: BTreeMap<String, Decimal>,
}

/// Sum expenses per category, either overall or for one `YYYY-MM` month.
pub fn expenses_by_category(
    database: &Database,
    month: Option<&str>,
) -> Result<ExpensePlot, Error> {
    let mut predicates = vec![Predicate::Type(TransactionType::Expense)];

    let title = match month {
        Some(month) => {
            let (year, month_number) = resolve_month(month.trim(), None)?;
            let (first, last) = month_bounds(year, month_number).ok_or_else(|| {
                Error::InvalidFilter(format!("invalid month '{month}', use YYYY-MM"))
            })?;
            predicates.push(Predicate::DateFrom(first));
            predicates.push(Predicate::DateTo(last));
            format!("Expenses by Category for {}", month.trim())
        }
        None => "Expenses by Category Overall".to_string(),
    };

    let ordering = Ordering {
        by: OrderBy::Date,
        direction: OrderDirection::Ascending,
    };
    let transactions = list_transactions(database, &predicates, Some(&ordering))?;

    Ok(ExpensePlot {
        title,
        expenses: by_category(&transactions, TransactionType::Expense),
    })
}

/// Whole currency units per category, the resolution of the bar chart.
/// Halves round away from zero.
fn bar_values(expenses: &BTreeMap<String, Decimal>) -> Vec<(String, u64)> {
    expenses
        .iter()
        .map(|(category, amount)| {
            let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            (category.clone(), whole.to_u64().unwrap_or(0))
        })
        .collect()
}

/// Draw the plot full screen until `q` or `Esc` is pressed.
pub fn run_plot(plot: &ExpensePlot, currency_symbol: &str) -> Result<(), Error> {
    enable_raw_mode().map_err(Error::Terminal)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(Error::Terminal)?;

    let result = (|| -> Result<(), Error> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend).map_err(Error::Terminal)?;
        let values = bar_values(&plot.expenses);

        loop {
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    render_bar_chart(frame, area, plot, &values, currency_symbol)
                })
                .map_err(Error::Terminal)?;

            if event::poll(std::time::Duration::from_millis(250)).map_err(Error::Terminal)? {
                match event::read().map_err(Error::Terminal)? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode().map_err(Error::Terminal)?;
    execute!(io::stdout(), LeaveAlternateScreen).map_err(Error::Terminal)?;

    result
}

/// Share the inner width between the bars, keeping each between 3 and 16
/// columns.
fn bar_width(area_width: u16, bar_count: usize) -> u16 {
    let bar_count = u16::try_from(bar_count).unwrap_or(u16::MAX).max(1);
    (area_width.saturating_sub(2) / bar_count)
        .saturating_sub(1)
        .clamp(3, 16)
}

fn render_bar_chart(
    frame: &mut ratatui::Frame,
    area: Rect,
    plot: &ExpensePlot,
    values: &[(String, u64)],
    currency_symbol: &str,
) {
    let block = Block::default()
        .title(format!("{}  (press q to exit)", plot.title))
        .borders(Borders::ALL);

    if values.is_empty() {
        let empty = Paragraph::new("No expenses found for the specified period.").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let bar_width = bar_width(area.width, values.len());

    let bars: Vec<Bar> = values
        .iter()
        .map(|(category, value)| {
            Bar::default()
                .label(category.clone())
                .value(*value)
                .text_value(format!("{currency_symbol}{value}"))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    frame.render_widget(chart, area);
}
