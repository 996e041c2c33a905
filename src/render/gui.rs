// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// The key under which the management host address is recorded for a cluster named `kind`.
pub fn gui_details_key(kind: &str) -> String {
    format!("{kind}_cluster_gui_ip_address")
}

/// Render the GUI details document: a single key naming the management host of the cluster.
/// Downstream access configuration reads this to find where the GUI runs.
pub fn render_gui_details(kind: &str, address: &str) -> Result<String, serde_json::Error> {
    let document = serde_json::Map::from_iter([(
        gui_details_key(kind),
        serde_json::Value::String(address.to_string()),
    )]);

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the GUI details document for a cluster named `kind` to `path`.
pub fn write_gui_details(path: &Path, kind: &str, address: &str) -> io::Result<()> {
    let document = render_gui_details(kind, address)?;
    std::fs::write(path, document)
}
