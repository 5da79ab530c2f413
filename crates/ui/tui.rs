use std::{error::Error, io};

use crate::data::{Annotation, BarValue, Chart, ChartKind, Series};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Layout, Rect},
    style::{self, Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Paragraph, Widget},
    Frame, Terminal,
};
use style::palette::tailwind;
use unicode_width::UnicodeWidthStr;

const PALETTES: [tailwind::Palette; 4] = [
    tailwind::BLUE,
    tailwind::EMERALD,
    tailwind::INDIGO,
    tailwind::RED,
];

// one colour per series in stacked and grouped charts
const SERIES_COLORS: [Color; 14] = [
    tailwind::BLUE.c500,
    tailwind::AMBER.c400,
    tailwind::EMERALD.c500,
    tailwind::RED.c500,
    tailwind::VIOLET.c400,
    tailwind::CYAN.c400,
    tailwind::PINK.c400,
    tailwind::LIME.c400,
    tailwind::ORANGE.c600,
    tailwind::INDIGO.c300,
    tailwind::TEAL.c700,
    tailwind::ROSE.c800,
    tailwind::SKY.c200,
    tailwind::STONE.c400,
];

const INFO_TEXT: &str = "(Esc) quit | (→) next color | (←) previous color";

const BAR_GAP: u16 = 1;
const GROUP_GAP: u16 = 2;
const MIN_BAR_WIDTH: u16 = 3;
const MAX_BAR_WIDTH: u16 = 16;

struct ChartColors {
    buffer_bg: Color,
    title_fg: Color,
    bar: Color,
    value_fg: Color,
    label_fg: Color,
    footer_border_color: Color,
}

impl ChartColors {
    const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            title_fg: tailwind::SLATE.c200,
            bar: color.c500,
            value_fg: tailwind::SLATE.c50,
            label_fg: tailwind::SLATE.c200,
            footer_border_color: color.c400,
        }
    }
}

struct App {
    chart: Chart,
    colors: ChartColors,
    color_index: usize,
}

impl App {
    fn new(chart: Chart) -> Self {
        Self {
            chart,
            colors: ChartColors::new(&PALETTES[0]),
            color_index: 0,
        }
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
        self.set_colors();
    }

    pub fn previous_color(&mut self) {
        let count = PALETTES.len();
        self.color_index = (self.color_index + count - 1) % count;
        self.set_colors();
    }

    fn set_colors(&mut self) {
        self.colors = ChartColors::new(&PALETTES[self.color_index]);
    }
}

/// Draw `chart` full screen and block until the user quits.
pub fn run(chart: Chart) -> Result<(), Box<dyn Error>> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(chart);
    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('l') | KeyCode::Right => app.next_color(),
                    KeyCode::Char('h') | KeyCode::Left => app.previous_color(),
                    _ => {}
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let [chart_area, footer_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).areas(f.area());

    f.render_widget(
        Block::new().style(Style::new().bg(app.colors.buffer_bg)),
        f.area(),
    );
    render_chart(f, app, chart_area);
    render_footer(f, app, footer_area);
}

fn render_chart(f: &mut Frame, app: &App, area: Rect) {
    let chart = &app.chart;
    let mut axes = format!(" {} / {} ", chart.x_label, chart.y_label);
    if let ChartKind::Stacked {
        annotation: Some(annotation),
        ..
    } = &chart.kind
    {
        axes.push_str(&format!("| above bars: {} ", annotation.label));
    }
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(app.colors.footer_border_color))
        .title(
            Line::from(format!(" {} ", chart.title))
                .centered()
                .bold()
                .fg(app.colors.title_fg),
        )
        .title_bottom(Line::from(axes).centered().fg(app.colors.label_fg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if chart.is_empty() {
        f.render_widget(
            Paragraph::new("no data")
                .style(Style::new().fg(app.colors.label_fg))
                .centered(),
            inner,
        );
        return;
    }

    match &chart.kind {
        ChartKind::Bars { bars } => render_bars(f, app, bars, inner),
        ChartKind::Grouped { categories, series } => {
            let [chart_area, legend_area] = legend_layout(series, inner);
            render_grouped(f, app, categories, series, chart_area);
            render_legend(f, app, series, legend_area);
        }
        ChartKind::Stacked {
            categories,
            series,
            annotation,
        } => {
            let [chart_area, legend_area] = legend_layout(series, inner);
            f.render_widget(
                StackedBars {
                    categories,
                    series,
                    annotation: annotation.as_ref(),
                    label_style: Style::new().fg(app.colors.label_fg),
                },
                chart_area,
            );
            render_legend(f, app, series, legend_area);
        }
    }
}

fn render_bars(f: &mut Frame, app: &App, bars: &[BarValue], area: Rect) {
    let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
    let width = bar_width_calculator(&labels, area.width, BAR_GAP);
    let data: Vec<Bar> = bars
        .iter()
        .map(|b| {
            Bar::default()
                .value(scaled(b.value, app.chart.precision))
                .text_value(app.chart.format_value(b.value))
                .label(Line::from(b.label.as_str()))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&data))
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .bar_style(Style::new().fg(app.colors.bar))
        .value_style(Style::new().fg(app.colors.value_fg).bg(app.colors.bar))
        .label_style(Style::new().fg(app.colors.label_fg));
    f.render_widget(chart, area);
}

fn render_grouped(f: &mut Frame, app: &App, categories: &[String], series: &[Series], area: Rect) {
    let width = grouped_bar_width(
        categories.len() as u16,
        series.len() as u16,
        area.width,
        GROUP_GAP,
    );
    let mut chart = BarChart::default()
        .bar_width(width)
        .bar_gap(0)
        .group_gap(GROUP_GAP)
        .label_style(Style::new().fg(app.colors.label_fg));
    for (i, category) in categories.iter().enumerate() {
        let bars: Vec<Bar> = series
            .iter()
            .enumerate()
            .map(|(j, s)| {
                let value = s.values.get(i).copied().unwrap_or(0.0);
                Bar::default()
                    .value(scaled(value, app.chart.precision))
                    .text_value(String::new())
                    .style(Style::new().fg(series_color(j)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(category.as_str()))
                .bars(&bars),
        );
    }
    f.render_widget(chart, area);
}

fn legend_layout(series: &[Series], area: Rect) -> [Rect; 2] {
    let width = series
        .iter()
        .map(|s| s.name.width())
        .max()
        .unwrap_or(0) as u16;
    // two for the swatch, two for the border
    Layout::horizontal([Constraint::Min(10), Constraint::Length(width + 4)]).areas(area)
}

fn render_legend(f: &mut Frame, app: &App, series: &[Series], area: Rect) {
    let lines: Vec<Line> = series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Line::from(vec![
                Span::styled("■ ", Style::new().fg(series_color(i))),
                Span::styled(s.name.as_str(), Style::new().fg(app.colors.label_fg)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(
            Block::bordered().border_style(Style::new().fg(app.colors.footer_border_color)),
        ),
        area,
    );
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let info_footer = Paragraph::new(Line::from(INFO_TEXT))
        .style(Style::new().fg(app.colors.label_fg).bg(app.colors.buffer_bg))
        .centered()
        .block(
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(Style::new().fg(app.colors.footer_border_color)),
        );
    f.render_widget(info_footer, area);
}

/// Vertical bars built from segments, one segment per series, bottom up.
struct StackedBars<'a> {
    categories: &'a [String],
    series: &'a [Series],
    annotation: Option<&'a Annotation>,
    label_style: Style,
}

impl Widget for StackedBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // label row at the bottom, one row above the tallest stack for the annotation
        if area.height < 3 {
            return;
        }
        let height = area.height - 2;
        let base = area.bottom() - 2;

        let labels: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        let bar_width = bar_width_calculator(&labels, area.width, BAR_GAP);
        let column = |i: usize| -> Vec<f64> {
            self.series
                .iter()
                .map(|s| s.values.get(i).copied().unwrap_or(0.0))
                .collect()
        };
        let totals: Vec<f64> = (0..self.categories.len())
            .map(|i| column(i).iter().sum())
            .collect();
        let max = totals.iter().copied().fold(0.0, f64::max);

        for (i, category) in self.categories.iter().enumerate() {
            let x = area
                .x
                .saturating_add((i as u16).saturating_mul(bar_width + BAR_GAP));
            if x.saturating_add(bar_width) > area.right() {
                break;
            }
            let mut filled = 0;
            for (j, h) in stack_heights(&column(i), max, height).into_iter().enumerate() {
                let style = Style::new().fg(series_color(j));
                for _ in 0..h {
                    buf.set_string(x, base - filled, "█".repeat(bar_width as usize), style);
                    filled += 1;
                }
            }
            if let Some(annotation) = self.annotation {
                let text = (totals[i] / f64::from(annotation.divisor)).floor().to_string();
                buf.set_stringn(x, base - filled, text, bar_width as usize, self.label_style);
            }
            buf.set_stringn(
                x,
                area.bottom() - 1,
                category,
                bar_width as usize,
                self.label_style,
            );
        }
    }
}

fn series_color(i: usize) -> Color {
    SERIES_COLORS[i % SERIES_COLORS.len()]
}

/// Bar values are integers; keep `precision` decimals by scaling.
fn scaled(value: f64, precision: usize) -> u64 {
    (value * 10f64.powi(precision as i32)).round().max(0.0) as u64
}

fn bar_width_calculator(labels: &[&str], available: u16, gap: u16) -> u16 {
    let count = labels.len() as u16;
    if count == 0 {
        return 1;
    }
    let widest = labels
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0) as u16;
    let fit = available.saturating_sub(gap.saturating_mul(count - 1)) / count;

    widest
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
        .min(fit)
        .max(1)
}

fn grouped_bar_width(groups: u16, per_group: u16, available: u16, group_gap: u16) -> u16 {
    if groups == 0 || per_group == 0 {
        return 1;
    }
    let gaps = group_gap.saturating_mul(groups - 1);
    (available.saturating_sub(gaps) / groups.saturating_mul(per_group)).max(1)
}

/// Row count of each segment so the whole stack is `total / max * height`
/// rows tall, rounding on the running sum.
fn stack_heights(values: &[f64], max: f64, height: u16) -> Vec<u16> {
    if max <= 0.0 {
        return vec![0; values.len()];
    }
    let mut heights = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut drawn = 0;
    for v in values {
        sum += v.max(0.0);
        let top = (sum / max * f64::from(height)).round() as u16;
        heights.push(top.saturating_sub(drawn));
        drawn = drawn.max(top);
    }
    heights
}
