//! The fixed template set (C9), one body per pass number. Every optional
//! context field is rendered as a two-line "Label:\n{placeholder}" pair so
//! the renderer's line-removal rule (§4.9 step 2) has a label line to drop
//! alongside an unresolved placeholder.
//!
//! Wording is adapted from the project's own summarization prompts
//! (`summarization_prompts.py`), trimmed to the fields this design actually
//! threads through (`spec.md` §4.8f): code, children/dependency summaries,
//! import details, parent summary, previous summary.

pub fn template_for_pass(pass_number: u32) -> &'static str {
    match pass_number {
        1 => PASS_1,
        2 => PASS_2,
        _ => PASS_3,
    }
}

const PASS_1: &str = r#"You are summarizing a piece of source code for storage in a retrieval index. Describe its purpose, its key components, and how it fits together, in prose.

Code:
```
{code_content}
```

Children:
{children_summaries}

Dependencies:
{dependency_summaries}

Imports:
{import_details}

Write the summary now."#;

const PASS_2: &str = r#"You are refining a code summary with additional context gathered from the rest of the codebase. Build on the previous pass rather than starting over.

Previous summary:
{previous_summary}

Code:
```
{code_content}
```

Dependencies:
{dependency_summaries}

Imports:
{import_details}

Summary of entities that depend on this one:
{parent_summary}

Write the refined summary now."#;

const PASS_3: &str = r#"This is the final pass of a multi-pass summarization. Produce a summary that reflects both the code itself and everything learned about its place in the system so far.

Previous summary:
{previous_summary}

Code:
```
{code_content}
```

Children:
{children_summaries}

Dependencies:
{dependency_summaries}

Imports:
{import_details}

Summary of entities that depend on this one:
{parent_summary}

Write the final summary now."#;
