//! Human-readable ranking table.

use accord_graph::TrustGraph;

const HEADERS: [&str; 5] = ["Role", "Name Link", "Account", "Organization", "Weight"];

/// Highest rank still labeled as a top-tier participant.
const TOP_TIER_END: usize = 21;

/// Render the ranked peer table.
///
/// Index 0 is the boot node, indices 1 through 21 the top-tier
/// participants, everyone after that a general participant.
pub fn render_ranking(graph: &TrustGraph) -> String {
    let mut rows: Vec<[String; 5]> = Vec::with_capacity(graph.len() + 2);
    rows.push(HEADERS.map(str::to_string));
    rows.push(HEADERS.map(|h| "-".repeat(h.len())));

    for (index, peer) in graph.ordered_peers().enumerate() {
        rows.push([
            role_label(index),
            peer.discovery_link.to_string(),
            peer.account_name().to_string(),
            peer.organization_name().to_string(),
            format!("{:.2}", peer.total_weight),
        ]);
    }

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn role_label(index: usize) -> String {
    if index == 0 {
        "BOOT NODE".to_string()
    } else if index <= TOP_TIER_END {
        format!("TOP {index:02}")
    } else {
        format!("PART {index:02}")
    }
}
