//! Query -> report conversion utilities

use serde_json::json;

use crate::{Query, QueryFeatures, output};

/// Convert a checked query to a JSON report
pub fn query_report(query: &Query) -> serde_json::Value {
    let diagnostics: Vec<serde_json::Value> = query
        .diagnostics
        .iter()
        .map(|d| {
            json!({
                "key": d.message_key(),
                "params": d.params(),
                "message": d.to_string(),
            })
        })
        .collect();

    json!({
        "query": query.description.to_string(),
        "size": query.size(),
        "depth": query.depth(),
        "features": feature_names(query.features()),
        "description": output::to_json(&query.description),
        "diagnostics": diagnostics,
        "pruned": query.pruned,
    })
}

/// Convert a checked query to human-readable text
pub fn render_text(query: &Query) -> String {
    let mut out = String::new();
    let serialized = query.description.to_string();
    if serialized.is_empty() {
        out.push_str("query:    (no condition)\n");
    } else {
        out.push_str(&format!("query:    {}\n", serialized));
    }
    out.push_str(&format!("size:     {}\n", query.size()));
    out.push_str(&format!("depth:    {}\n", query.depth()));
    out.push_str(&format!(
        "features: {}\n",
        feature_names(query.features()).join(" | ")
    ));

    for request in query.description.print_requests() {
        out.push_str(&format!("print:    {}\n", request.label));
    }
    for fragment in &query.pruned {
        out.push_str(&format!("pruned:   {}\n", fragment));
    }
    for diagnostic in &query.diagnostics {
        out.push_str(&format!(
            "warning:  {} [{}]\n",
            diagnostic,
            diagnostic.message_key()
        ));
    }
    out
}

fn feature_names(features: QueryFeatures) -> Vec<&'static str> {
    features.iter_names().map(|(name, _)| name).collect()
}
