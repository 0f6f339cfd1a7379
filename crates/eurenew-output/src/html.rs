//! HTML rendering of the dashboard.
//!
//! Pages are self-contained apart from Plotly.js, which is loaded from its
//! CDN. Chart data is embedded as JSON; the raw data table sorts and
//! filters client-side.

use crate::dashboard::{BarChart, DASHBOARD_TITLE, DashboardView, LineSeries, RankedRow};
use eurenew_pipeline::Observation;
use serde_json::{Value, json};

/// Plotly.js bundle used by every page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render the full dashboard page.
pub fn render_dashboard(view: &DashboardView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>EU Renewables Top 10</title>
    <style>{css}</style>
    <script src="{plotly}"></script>
</head>
<body>
    <div class="layout">
        {sidebar}
        <main>
            <h1>&#127942; {title}</h1>
            <div class="columns">
                <section class="chart-column">
                    <h2>&#129351; {subheading}</h2>
                    <div id="bar-chart" class="chart"></div>
                </section>
                <section class="table-column">
                    <h2>&#128203; Leaderboard</h2>
                    {ranking}
                </section>
            </div>
            <hr>
            <section>
                <h2>&#128200; History of the Top 5</h2>
                <div id="trend-chart" class="chart"></div>
            </section>
            <hr>
            {raw}
        </main>
    </div>
    <script>{js}</script>
    <script>renderCharts({bar_figure}, {trend_figure});</script>
</body>
</html>"#,
        css = inline_css(),
        plotly = PLOTLY_CDN,
        js = inline_javascript(),
        title = html_escape(&view.title),
        sidebar = render_sidebar(view),
        subheading = html_escape(&view.subheading),
        ranking = render_ranking(&view.ranking),
        raw = render_raw_section(view),
        bar_figure = script_json(&bar_figure(&view.bar)),
        trend_figure = script_json(&trend_figure(&view.trend)),
    )
}

/// Render the page shown in place of the dashboard when the pipeline fails.
pub fn render_error(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>EU Renewables Top 10</title>
    <style>{css}</style>
</head>
<body>
    <div class="layout">
        <main>
            <h1>&#127942; {title}</h1>
            <div class="error" role="alert">Error: {message}</div>
        </main>
    </div>
</body>
</html>"#,
        css = inline_css(),
        title = DASHBOARD_TITLE,
        message = html_escape(message),
    )
}

fn render_sidebar(view: &DashboardView) -> String {
    let options: String = view
        .sectors
        .iter()
        .map(|s| {
            format!(
                r#"<option value="{name}"{selected}>{name}</option>"#,
                name = html_escape(s.name),
                selected = if s.selected { " selected" } else { "" },
            )
        })
        .collect();

    format!(
        r#"<aside class="sidebar">
            <h2>Filter Options</h2>
            <form method="get" action="/">
                <label for="sector">Select Energy Sector</label>
                <select id="sector" name="sector" onchange="this.form.submit()">{options}</select>
                <noscript><button type="submit">Show</button></noscript>
            </form>
        </aside>"#
    )
}

fn render_ranking(rows: &[RankedRow]) -> String {
    if rows.is_empty() {
        return r#"<p class="empty">No data available for this sector.</p>"#.to_string();
    }

    let body: String = rows
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.3}</td></tr>\n",
                r.rank,
                html_escape(&r.country),
                r.value
            )
        })
        .collect();

    format!(
        r#"<table id="leaderboard">
                <thead><tr><th></th><th>Country</th><th>Value</th></tr></thead>
                <tbody>
{body}</tbody>
            </table>"#
    )
}

fn render_raw_section(view: &DashboardView) -> String {
    format!(
        r#"<details class="raw-data">
                <summary>&#128194; View Full Raw Data (All Countries &amp; Years)</summary>
                <p><strong>Full Dataset for sector: {sector}</strong></p>
                <p>You can sort and search this table.</p>
                <input type="search" id="raw-search" placeholder="Search...">
                <span class="count"><span id="visible-count">{count}</span> rows</span>
                <table id="raw-table">
                    <thead>
                        <tr>
                            <th class="sortable" data-column="country">Country</th>
                            <th class="sortable" data-column="unit">unit</th>
                            <th class="sortable" data-column="code">nrg_bal</th>
                            <th class="sortable desc" data-column="year">Year</th>
                            <th class="sortable" data-column="value">Value</th>
                            <th class="sortable" data-column="sector">Sector</th>
                        </tr>
                    </thead>
                    <tbody>
{rows}</tbody>
                </table>
            </details>"#,
        sector = html_escape(view.sector.name()),
        count = view.raw.len(),
        rows = view.raw.iter().map(render_raw_row).collect::<String>(),
    )
}

fn render_raw_row(o: &Observation) -> String {
    let country = html_escape(&o.country);
    let unit = html_escape(o.unit.as_deref().unwrap_or(""));
    let sector = html_escape(o.sector.name());

    format!(
        r#"<tr data-country="{country}" data-unit="{unit}" data-code="{code}" data-year="{year}" data-value="{value}" data-sector="{sector}"><td>{country}</td><td>{unit}</td><td>{code}</td><td>{year}</td><td>{value:.3}</td><td>{sector}</td></tr>
"#,
        code = o.sector.code(),
        year = o.year,
        value = o.value,
    )
}

fn bar_figure(bar: &BarChart) -> Value {
    json!({
        "data": [{
            "type": "bar",
            "x": bar.x,
            "y": bar.y,
            "text": bar.text,
            "textposition": "outside",
            "marker": { "color": bar.colors },
            "hovertemplate": "%{x}: %{y:.1f}%<extra></extra>",
        }],
        "layout": {
            "title": { "text": bar.title },
            "xaxis": { "title": { "text": "Country" } },
            "yaxis": { "title": { "text": bar.y_label } },
            "showlegend": false,
        },
    })
}

fn trend_figure(series: &[LineSeries]) -> Value {
    let data: Vec<Value> = series
        .iter()
        .map(|s| {
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": s.country,
                "x": s.years,
                "y": s.values,
            })
        })
        .collect();

    json!({
        "data": data,
        "layout": {
            "xaxis": { "title": { "text": "Year" } },
            "yaxis": { "title": { "text": "Value" } },
            "legend": { "title": { "text": "Country" } },
        },
    })
}

/// Serialize JSON for embedding inside a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    color: #31333f;
    background: #ffffff;
}
.layout { display: flex; min-height: 100vh; }
.sidebar {
    width: 260px;
    flex-shrink: 0;
    padding: 2rem 1.25rem;
    background: #f0f2f6;
}
.sidebar label { display: block; font-size: 0.875rem; margin-bottom: 0.4rem; }
.sidebar select { width: 100%; padding: 0.45rem; border-radius: 6px; border: 1px solid #d0d3da; }
main { flex: 1; padding: 2rem 3rem; min-width: 0; }
h1 { font-size: 2.2rem; margin: 0 0 1.5rem; }
h2 { font-size: 1.35rem; margin: 0.5rem 0 1rem; }
hr { border: none; border-top: 1px solid #e6e8ee; margin: 2rem 0; }
.columns { display: grid; grid-template-columns: 2fr 1fr; gap: 2rem; }
.chart { width: 100%; min-height: 420px; }
table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
th, td { padding: 0.4rem 0.6rem; border-bottom: 1px solid #e6e8ee; text-align: left; }
td:last-child, th:last-child { text-align: right; }
th.sortable { cursor: pointer; user-select: none; }
th.sortable.asc::after { content: " \25B2"; }
th.sortable.desc::after { content: " \25BC"; }
details.raw-data summary { cursor: pointer; font-weight: 600; padding: 0.75rem 0; }
#raw-search { padding: 0.4rem 0.6rem; margin: 0.5rem 1rem 0.75rem 0; width: 260px; }
.count { color: #808495; font-size: 0.85rem; }
.empty { color: #808495; }
.error {
    padding: 1rem 1.25rem;
    border-radius: 6px;
    background: #ffe9e9;
    color: #7d353b;
}
@media (max-width: 900px) {
    .layout { flex-direction: column; }
    .sidebar { width: 100%; }
    .columns { grid-template-columns: 1fr; }
}
"#
}

fn inline_javascript() -> &'static str {
    r#"
function renderCharts(bar, trend) {
    if (typeof Plotly === 'undefined') {
        return;
    }
    Plotly.newPlot('bar-chart', bar.data, bar.layout, { responsive: true });
    Plotly.newPlot('trend-chart', trend.data, trend.layout, { responsive: true });
}

// Raw data table sorting and searching
(function() {
    let sortColumn = 'year';
    let sortDirection = 'desc';

    function sortTable(column) {
        const body = document.querySelector('#raw-table tbody');
        if (!body) {
            return;
        }
        const rows = Array.from(body.querySelectorAll('tr'));

        if (sortColumn === column) {
            sortDirection = sortDirection === 'asc' ? 'desc' : 'asc';
        } else {
            sortColumn = column;
            sortDirection = 'asc';
        }

        document.querySelectorAll('#raw-table th.sortable').forEach(th => {
            th.classList.remove('asc', 'desc');
        });
        const active = document.querySelector(`#raw-table th[data-column="${column}"]`);
        if (active) {
            active.classList.add(sortDirection);
        }

        rows.sort((a, b) => {
            const aVal = a.dataset[column] || '';
            const bVal = b.dataset[column] || '';
            const aNum = parseFloat(aVal);
            const bNum = parseFloat(bVal);
            let order;
            if (!isNaN(aNum) && !isNaN(bNum)) {
                order = aNum - bNum;
            } else {
                order = aVal.localeCompare(bVal);
            }
            return sortDirection === 'asc' ? order : -order;
        });

        rows.forEach(row => body.appendChild(row));
    }

    function filterTable() {
        const query = document.getElementById('raw-search').value.toLowerCase();
        const rows = document.querySelectorAll('#raw-table tbody tr');

        rows.forEach(row => {
            const match = !query || row.textContent.toLowerCase().includes(query);
            row.style.display = match ? '' : 'none';
        });

        const visible = Array.from(rows).filter(r => r.style.display !== 'none').length;
        const countEl = document.getElementById('visible-count');
        if (countEl) {
            countEl.textContent = visible;
        }
    }

    document.addEventListener('DOMContentLoaded', function() {
        document.querySelectorAll('#raw-table th.sortable').forEach(th => {
            th.addEventListener('click', function() {
                sortTable(this.dataset.column);
            });
        });

        const search = document.getElementById('raw-search');
        if (search) {
            search.addEventListener('input', filterTable);
        }
    });
})();
"#
}
