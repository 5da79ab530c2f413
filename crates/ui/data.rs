use serde::Serialize;

/// Everything the renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// digits after the decimal point when values are shown
    pub precision: usize,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Bars {
        bars: Vec<BarValue>,
    },
    Stacked {
        categories: Vec<String>,
        series: Vec<Series>,
        annotation: Option<Annotation>,
    },
    Grouped {
        categories: Vec<String>,
        series: Vec<Series>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarValue {
    pub label: String,
    pub value: f64,
}

/// One key's values, slot `i` belonging to category `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Number printed above each stack: the stack total divided by `divisor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub divisor: u32,
    pub label: String,
}

impl Chart {
    pub fn bars<I, S>(title: &str, x_label: &str, y_label: &str, bars: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let bars = bars
            .into_iter()
            .map(|(label, value)| BarValue {
                label: label.into(),
                value,
            })
            .collect();
        Self::new(title, x_label, y_label, ChartKind::Bars { bars })
    }

    pub fn stacked(
        title: &str,
        x_label: &str,
        y_label: &str,
        categories: Vec<String>,
        series: Vec<Series>,
    ) -> Self {
        Self::new(
            title,
            x_label,
            y_label,
            ChartKind::Stacked {
                categories,
                series,
                annotation: None,
            },
        )
    }

    pub fn grouped(
        title: &str,
        x_label: &str,
        y_label: &str,
        categories: Vec<String>,
        series: Vec<Series>,
    ) -> Self {
        Self::new(
            title,
            x_label,
            y_label,
            ChartKind::Grouped { categories, series },
        )
    }

    fn new(title: &str, x_label: &str, y_label: &str, kind: ChartKind) -> Self {
        Chart {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            precision: 0,
            kind,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Only meaningful for stacked charts; ignored otherwise.
    pub fn with_annotation(mut self, divisor: u32, label: &str) -> Self {
        if let ChartKind::Stacked { annotation, .. } = &mut self.kind {
            *annotation = Some(Annotation {
                divisor,
                label: label.to_string(),
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Bars { bars } => bars.is_empty(),
            ChartKind::Stacked { categories, .. } | ChartKind::Grouped { categories, .. } => {
                categories.is_empty()
            }
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Series {
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Series {
            name: name.into(),
            values,
        }
    }
}
