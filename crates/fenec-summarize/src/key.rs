//! The prompt strategy key (§4.9): `(pass_number, has_children, has_deps,
//! has_imports, has_parent)`, composed as
//! `children|nochildren` x `dependencies|nodependencies` x
//! `import_details|noimport_details` x `parent|noparent` x `pass<N>`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptKey {
    pub pass_number: u32,
    pub has_children: bool,
    pub has_deps: bool,
    pub has_imports: bool,
    pub has_parent: bool,
}

impl PromptKey {
    /// `has_parent` is forced to `false` on pass 1 regardless of what the
    /// caller supplies (§4.9: "For pass 1, `has_parent` is always `noparent`").
    pub fn new(
        pass_number: u32,
        has_children: bool,
        has_deps: bool,
        has_imports: bool,
        has_parent: bool,
    ) -> Self {
        Self {
            pass_number,
            has_children,
            has_deps,
            has_imports,
            has_parent: has_parent && pass_number != 1,
        }
    }

    pub fn as_strategy_key(&self) -> String {
        format!(
            "{}_{}_{}_{}_pass{}",
            if self.has_children { "children" } else { "nochildren" },
            if self.has_deps { "dependencies" } else { "nodependencies" },
            if self.has_imports { "import_details" } else { "noimport_details" },
            if self.has_parent { "parent" } else { "noparent" },
            self.pass_number,
        )
    }
}
