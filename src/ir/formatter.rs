use crate::config::TreeConfig;
use crate::ir::atom::Handle;
use crate::ir::pattern_term::PatternTermPtr;

/// Formats a pattern-term subtree for diagnostics, one position per line.
///
/// Each line shows the position's atom (links by type only, since their
/// children follow on the next lines), prefixed by the consumed quotation
/// marker if any and by `'` when the position is quoted. Suffix flags: `*`
/// for `has_bound_var`, `+` for `has_any_bound_var`. Child slots whose
/// position has been dropped print as `<expired>`.
///
/// # Arguments
/// * `ptm` - The root of the subtree to format.
/// * `indent_size` - Spaces per nesting level.
pub fn format_term(ptm: &PatternTermPtr, indent_size: usize) -> String {
    if ptm.is_undefined() {
        return "-".to_string();
    }
    let mut lines = Vec::new();
    format_term_helper(ptm, 0, indent_size, &mut lines);
    lines.join("\n")
}

/// Formats with the indentation configured in `config`.
pub fn format_term_with(ptm: &PatternTermPtr, config: &TreeConfig) -> String {
    format_term(ptm, config.indent_size)
}

fn format_term_helper(ptm: &PatternTermPtr, level: usize, indent_size: usize, lines: &mut Vec<String>) {
    let indent = " ".repeat(level * indent_size);

    let mut line = indent;
    if let Some(marker) = ptm.get_quote().get_type() {
        line.push_str(&format!("{}> ", marker));
    }
    if ptm.is_quoted() {
        line.push('\'');
    }
    line.push_str(&format_label(ptm.get_term()));

    let mut flags = String::new();
    if ptm.has_bound_var() {
        flags.push('*');
    }
    if ptm.has_any_bound_var() {
        flags.push('+');
    }
    if !flags.is_empty() {
        line.push(' ');
        line.push_str(&flags);
    }
    lines.push(line);

    for pos in 0..ptm.arity() {
        let child = ptm.get_child(pos);
        if child.is_undefined() {
            lines.push(format!("{}<expired>", " ".repeat((level + 1) * indent_size)));
        } else {
            format_term_helper(&child, level + 1, indent_size, lines);
        }
    }
}

fn format_label(h: &Handle) -> String {
    match (h.get_type(), h.name()) {
        (Some(atom_type), Some(name)) => format!("{} {:?}", atom_type, name),
        (Some(atom_type), None) => atom_type.to_string(),
        (None, _) => "<undefined>".to_string(),
    }
}
