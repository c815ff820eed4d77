use std::collections::BTreeMap;

use yew::prelude::*;

use crate::model::{Algorithm, SimulateResponse};
use crate::util::{format_ms, format_number};

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub results: BTreeMap<Algorithm, SimulateResponse>,
}

/// Rows in BFS, DFS, A* order; algorithms without a result are left out.
pub fn stats_rows(results: &BTreeMap<Algorithm, SimulateResponse>) -> Vec<(Algorithm, &SimulateResponse)> {
    Algorithm::ALL
        .iter()
        .filter_map(|a| results.get(a).map(|r| (*a, r)))
        .collect()
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let panel_style = "background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; font-size:13px;";
    let rows = stats_rows(&props.results);
    if rows.is_empty() {
        return html! {
            <section class="stats-panel" style={format!("{} color:#8b949e;", panel_style)}>
                {"Run an algorithm to see performance metrics."}
            </section>
        };
    }
    let num_style = "text-align:right; font-variant-numeric:tabular-nums; padding:4px 8px;";
    html! {
        <section class="stats-panel" style={panel_style}>
            <div style="font-weight:600; margin-bottom:6px;">{"Algorithm Statistics"}</div>
            <table style="border-collapse:collapse; width:100%;">
                <thead style="color:#8b949e; font-size:11px; text-transform:uppercase;">
                    <tr>
                        <th style="text-align:left; padding:4px 8px;">{"Algorithm"}</th>
                        <th style={num_style}>{"Path Length"}</th>
                        <th style={num_style}>{"Expanded Nodes"}</th>
                        <th style={num_style}>{"Elapsed"}</th>
                        <th style="text-align:left; padding:4px 8px;">{"Result"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|(algorithm, result)| {
                        let (status, color) = if result.found { ("Path found", "#7ee787") } else { ("No path", "#ffa198") };
                        html! {
                            <tr key={algorithm.key()}>
                                <td style="padding:4px 8px; font-weight:500;">{ algorithm.label() }</td>
                                <td style={num_style}>{ format_number(result.stats.path_length) }</td>
                                <td style={num_style}>{ format_number(result.stats.expanded_nodes) }</td>
                                <td style={num_style}>{ format_ms(result.stats.elapsed_ms) }</td>
                                <td style={format!("padding:4px 8px; color:{};", color)}>{ status }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </section>
    }
}
