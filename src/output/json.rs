use crate::model::Coordinate;
use anyhow::Result;

/// JSON encoding: the vulnerable subset by default, every audited
/// package when loud. Field names match the vulnerability service's
/// wire shape. Every vulnerability record is encoded, excluded or not;
/// only the internal `excluded` flag itself is never emitted.
pub fn render_json(loud: bool, packages: &[Coordinate]) -> Result<(usize, String)> {
    let (_, vulnerable) = super::split_packages(packages);
    let out = if loud {
        serde_json::to_string(packages)?
    } else {
        serde_json::to_string(&vulnerable)?
    };
    Ok((vulnerable.len(), out))
}
