use itertools::Itertools;

fn center(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text.to_string();
    }
    let pad = width - text.len();
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

fn row(half_width: usize, name: &str, value: &str) -> String {
    format!(
        "|{:<width$}|{}|",
        format!(" {name}"),
        center(value, half_width - 1),
        width = half_width
    )
}

/// Render a titled two column table, the output format of `describe()`.
pub(crate) fn two_column_table(title: &str, body: &[(&str, String)]) -> String {
    let widest = body
        .iter()
        .map(|(name, value)| name.len().max(value.len()))
        .max()
        .unwrap_or(0);
    let mut width = title.len() + widest + 20;
    if (title.len() + widest) % 2 != 0 {
        width += 1;
    }

    let full_rule = format!("+{}+", "-".repeat(width));
    let split_rule = format!("+{}+{}+", "-".repeat(width / 2), "-".repeat(width / 2 - 1));

    let mut lines = vec![
        full_rule.clone(),
        format!("|{}|", center(title, width)),
        full_rule,
    ];
    for (name, value) in body {
        lines.push(row(width / 2, name, value));
        lines.push(split_rule.clone());
    }
    lines.iter().join("\n")
}

/// Bracketed list, `[1, 2, 3]`.
pub(crate) fn list<T: std::fmt::Display>(items: &[T]) -> String {
    format!("[{}]", items.iter().join(", "))
}

/// Bracketed list of pairs, `[(1, 2), (3, 4)]`.
pub(crate) fn pair_list(items: &[(usize, usize)]) -> String {
    format!(
        "[{}]",
        items.iter().map(|(a, b)| format!("({a}, {b})")).join(", ")
    )
}
