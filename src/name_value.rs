//! Human readable `group::name: value` snapshots for debug overlays and logs.

use std::fmt::{Display, Write as _};

pub type NameValuePair = (String, String);
pub type NameValuePairs = Vec<NameValuePair>;

pub fn get_pair(group: &str, name: &str, value: impl Display) -> NameValuePair {
    (format!("{group}::{name}"), value.to_string())
}

pub fn get_xy_pair(group: &str, name: &str, x: f32, y: f32) -> NameValuePair {
    get_pair(group, name, format_args!("({x:.4}, {y:.4})"))
}

pub fn move_name_value_pairs(src: NameValuePairs, dst: &mut NameValuePairs) {
    dst.extend(src);
}

pub fn format_name_value_pairs(pairs: &[NameValuePair]) -> String {
    let mut out = String::new();
    for (name, value) in pairs {
        let _ = writeln!(out, "{name}: {value}");
    }
    out
}
