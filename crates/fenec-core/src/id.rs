//! Deterministic, path-encoded identifiers (C1).
//!
//! Every entity's id is a pure function of its location, name, and kind —
//! there is no random or time-based component, so re-parsing the same tree
//! produces the same ids every time. This is what lets incremental updates
//! overwrite rather than duplicate existing graph nodes.
//!
//! Formats (see `spec.md` §3):
//! - directory: `P__*__DIRECTORY`, `P` = directory path with `/` -> `:`
//! - module:    `P__*__MODULE`, `P` = file path with `/` -> `:`
//! - class:     `<parent_id>__*__CLASS-<name>`
//! - function:  `<parent_id>__*__FUNCTION-<name>`
//! - standalone: `<parent_id>__*__STANDALONE_BLOCK-<n>` (1-based within parent)

/// The literal separator between an id's location prefix and its terminal
/// block-type segment.
pub const SEGMENT_SEP: &str = "__*__";

/// Block type recovered from an id's terminal segment (C1).
///
/// `Unknown` must never appear for an id this crate generated; seeing it on a
/// stored id is a programming error upstream (a hand-crafted or corrupted
/// id), not a normal runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Directory,
    Module,
    Class,
    Function,
    Standalone,
    Unknown,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Directory => "DIRECTORY",
            BlockType::Module => "MODULE",
            BlockType::Class => "CLASS",
            BlockType::Function => "FUNCTION",
            BlockType::Standalone => "STANDALONE_BLOCK",
            BlockType::Unknown => "UNKNOWN",
        }
    }
}

fn path_to_id_fragment(path: &str) -> String {
    path.replace('/', ":")
}

/// Builds the id for a directory entity from its path relative to the
/// repository root.
pub fn directory_id(directory_path: &str) -> String {
    format!("{}{SEGMENT_SEP}DIRECTORY", path_to_id_fragment(directory_path))
}

/// Builds the id for a module entity from its file path relative to the
/// repository root.
pub fn module_id(file_path: &str) -> String {
    format!("{}{SEGMENT_SEP}MODULE", path_to_id_fragment(file_path))
}

/// Builds the id for a class nested under `parent_id`.
pub fn class_id(parent_id: &str, class_name: &str) -> String {
    format!("{parent_id}{SEGMENT_SEP}CLASS-{class_name}")
}

/// Builds the id for a function nested under `parent_id`.
pub fn function_id(parent_id: &str, function_name: &str) -> String {
    format!("{parent_id}{SEGMENT_SEP}FUNCTION-{function_name}")
}

/// Builds the id for the `counter`-th (1-based, source order) standalone
/// block nested under `parent_id`.
pub fn standalone_id(parent_id: &str, counter: usize) -> String {
    format!("{parent_id}{SEGMENT_SEP}STANDALONE_BLOCK-{counter}")
}

/// Recovers the block type from an id's terminal segment (inverse of the
/// `*_id` constructors).
pub fn block_type_of(id: &str) -> BlockType {
    let Some(idx) = id.rfind(SEGMENT_SEP) else {
        return BlockType::Unknown;
    };
    let tail = &id[idx + SEGMENT_SEP.len()..];
    if tail == "DIRECTORY" {
        BlockType::Directory
    } else if tail == "MODULE" {
        BlockType::Module
    } else if tail.starts_with("CLASS-") {
        BlockType::Class
    } else if tail.starts_with("FUNCTION-") {
        BlockType::Function
    } else if tail.starts_with("STANDALONE_BLOCK-") {
        BlockType::Standalone
    } else {
        BlockType::Unknown
    }
}

/// Returns the id prefix obtained by removing the final `__*__...` segment,
/// per invariant I-ID. For a class/function/standalone id this is the
/// parent's id; for a module/directory id it is the raw path fragment the id
/// was built from, which is not itself another entity's id.
pub fn strip_terminal_segment(id: &str) -> Option<&str> {
    id.rfind(SEGMENT_SEP).map(|idx| &id[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_expected_formats() {
        assert_eq!(directory_id("src/utils"), "src:utils__*__DIRECTORY");
        assert_eq!(module_id("src/main.py"), "src:main.py__*__MODULE");
        let m = module_id("a.py");
        assert_eq!(class_id(&m, "Foo"), format!("{m}__*__CLASS-Foo"));
        assert_eq!(function_id(&m, "bar"), format!("{m}__*__FUNCTION-bar"));
        assert_eq!(standalone_id(&m, 1), format!("{m}__*__STANDALONE_BLOCK-1"));
    }

    #[test]
    fn recovers_block_type() {
        assert_eq!(block_type_of(&directory_id("a/b")), BlockType::Directory);
        assert_eq!(block_type_of(&module_id("a.py")), BlockType::Module);
        let m = module_id("a.py");
        assert_eq!(block_type_of(&class_id(&m, "Foo")), BlockType::Class);
        assert_eq!(block_type_of(&function_id(&m, "bar")), BlockType::Function);
        assert_eq!(block_type_of(&standalone_id(&m, 3)), BlockType::Standalone);
        assert_eq!(block_type_of("not-an-id"), BlockType::Unknown);
    }

    #[test]
    fn parent_prefix_strips_terminal_segment() {
        let m = module_id("a.py");
        let c = class_id(&m, "Foo");
        assert_eq!(strip_terminal_segment(&c), Some(m.as_str()));
    }

    #[test]
    fn is_pure_and_deterministic() {
        assert_eq!(module_id("a/b.py"), module_id("a/b.py"));
        assert_eq!(directory_id("a/b"), directory_id("a/b"));
    }
}
