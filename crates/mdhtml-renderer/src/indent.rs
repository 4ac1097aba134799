//! Indentation trimming for code block content.

/// Strip up to `indent` columns of leading whitespace from every line.
///
/// Spaces count one column each; a tab advances to the next multiple of
/// `tab_width`. When a tab overshoots `indent`, the surplus columns are
/// written back as spaces so relative indentation survives. Lines with less
/// indentation than `indent` lose only what they have.
///
/// # Example
///
/// ```
/// use mdhtml_renderer::trim_indents;
///
/// assert_eq!(trim_indents("      a\n  b\nc", 4, 4), "  a\nb\nc");
/// ```
#[must_use]
pub fn trim_indents(text: &str, indent: usize, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut result = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let mut column = 0;
        let mut eaten = 0;
        for (index, c) in line.char_indices() {
            if column >= indent {
                break;
            }
            match c {
                ' ' => column += 1,
                '\t' => column = (column / tab_width + 1) * tab_width,
                _ => break,
            }
            eaten = index + c.len_utf8();
        }
        if column > indent {
            result.extend(std::iter::repeat_n(' ', column - indent));
        }
        result.push_str(&line[eaten..]);
    }

    result
}
