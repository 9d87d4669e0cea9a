//! Prompt rendering (§4.9): substitute placeholders, drop lines whose
//! placeholder went unfilled (along with their label line), collapse blank
//! runs.

use std::collections::HashMap;

use fenec_error::{DomainError, Result};

use crate::key::PromptKey;
use crate::templates::template_for_pass;

/// Renders the template selected by `key`, substituting `values` for
/// `{placeholder}` occurrences. Unknown `key` (pass outside `{1,2,3}` is
/// impossible by construction, but any caller-supplied axis combination the
/// registry doesn't recognize) is a [`DomainError::PromptError`].
pub fn render(key: &PromptKey, values: &HashMap<&str, String>) -> Result<String> {
    if !(1..=3).contains(&key.pass_number) {
        return Err(DomainError::prompt(key.as_strategy_key()).into());
    }

    let template = template_for_pass(key.pass_number);
    let substituted = substitute(template, values);
    let cleaned = drop_unresolved_lines(&substituted);
    Ok(collapse_blank_runs(&cleaned))
}

fn substitute(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

fn has_placeholder(line: &str) -> bool {
    if let (Some(start), Some(end)) = (line.find('{'), line.rfind('}')) {
        end > start
    } else {
        false
    }
}

fn drop_unresolved_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut drop = vec![false; lines.len()];
    for (i, line) in lines.iter().enumerate() {
        if has_placeholder(line) {
            drop[i] = true;
            if i > 0 {
                let prev = lines[i - 1].trim();
                if !prev.is_empty() && !has_placeholder(prev) && prev.ends_with(':') {
                    drop[i - 1] = true;
                }
            }
        }
    }
    lines
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !drop[*i])
        .map(|(_, l)| l)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_blank = false;
    for line in text.lines() {
        let blank = line.trim().is_empty();
        if blank && prev_blank {
            continue;
        }
        out.push_str(line);
        out.push('\n');
        prev_blank = blank;
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_no_residual_placeholders() {
        let key = PromptKey::new(1, false, false, false, false);
        let mut values = HashMap::new();
        values.insert("code_content", "x = 1".to_string());
        let rendered = render(&key, &values).unwrap();
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn drops_label_and_placeholder_line_together() {
        let key = PromptKey::new(1, false, false, false, false);
        let mut values = HashMap::new();
        values.insert("code_content", "x = 1".to_string());
        let rendered = render(&key, &values).unwrap();
        assert!(!rendered.contains("Children:"));
        assert!(!rendered.contains("Dependencies:"));
    }

    #[test]
    fn keeps_provided_sections() {
        let key = PromptKey::new(1, true, false, false, false);
        let mut values = HashMap::new();
        values.insert("code_content", "x = 1".to_string());
        values.insert("children_summaries", "child did a thing".to_string());
        let rendered = render(&key, &values).unwrap();
        assert!(rendered.contains("Children:"));
        assert!(rendered.contains("child did a thing"));
    }

    #[test]
    fn invalid_pass_number_is_prompt_error() {
        let key = PromptKey::new(7, false, false, false, false);
        assert!(render(&key, &HashMap::new()).is_err());
    }
}
