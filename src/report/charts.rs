//! Pie charts of the category breakdowns on the reports page.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a matching HTML container and initialization script.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::{CARD_STYLE, CURRENCY_SYMBOL, HeadElement},
    report::CategoryAmount,
    transaction::category_color,
};

/// The path of the ECharts bundle served from the static directory.
pub(super) const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// A report chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// A donut chart of `breakdown`, coloured with the category palette.
pub(super) fn breakdown_chart(title: &str, breakdown: &[CategoryAmount]) -> Chart {
    let colors: Vec<Color> = breakdown
        .iter()
        .map(|category| Color::from(category_color(&category.category)))
        .collect();
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|category| (category.amount, category.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0"))
        .color(colors)
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

pub(super) fn charts_view(charts: &[ReportChart]) -> Markup {
    html!(
        section id="charts" class="grid grid-cols-1 lg:grid-cols-2 gap-4 mb-6"
        {
            @for chart in charts {
                div class=(CARD_STYLE)
                {
                    div id=(chart.id) class="min-h-[320px]" {}
                }
            }
        }
    )
}

/// Generates the JavaScript that initializes each chart once the page has
/// loaded, with dark mode support and responsive resizing.
pub(super) fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) return;
                    const chart = echarts.init(chartDom);
                    chart.setOption({});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }};
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    HeadElement::ScriptSource(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    )))
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        &format!(
            "const numberFormatter = new Intl.NumberFormat('en-IN', {{
                minimumFractionDigits: 2,
                maximumFractionDigits: 2
            }});
            return (number) ? '{CURRENCY_SYMBOL}' + numberFormatter.format(number) : \"-\";"
        ),
    )
}
