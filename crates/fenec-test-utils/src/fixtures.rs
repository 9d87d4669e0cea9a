//! Small, hand-built entity sets exercising the scenarios named in
//! `spec.md` §8, used across the planner, engine, and ingest test suites.

use fenec_core::{
    id, ClassEntity, Common, DirectoryEntity, Entity, FunctionEntity, Import, ImportModuleType,
    ModuleEntity,
};

fn module(path: &str, code: &str) -> ModuleEntity {
    let mut common = Common::new(id::module_id(path), path);
    common.code_content = code.to_string();
    ModuleEntity {
        common,
        docstring: None,
        header: Vec::new(),
        footer: Vec::new(),
        imports: Vec::new(),
    }
}

fn local_import(target_id: &str) -> Import {
    let mut import = Import::new(ImportModuleType::Local);
    import.local_module_id = Some(target_id.to_string());
    import
}

/// `a.py` imports `b.py` imports `c.py` (scenario 1/2 in §8): `c` has no
/// dependencies, `b` depends on `c`, `a` depends on `b`.
pub fn three_module_chain() -> Vec<Entity> {
    let c = module("c.py", "def base(): pass");
    let mut b = module("b.py", "from c import base");
    b.imports.push(local_import(&c.common.id));
    let mut a = module("a.py", "from b import base");
    a.imports.push(local_import(&b.common.id));
    vec![Entity::Module(c), Entity::Module(b), Entity::Module(a)]
}

/// Two modules importing each other (scenario 4 in §8).
pub fn two_node_cycle() -> Vec<Entity> {
    let mut a = module("a.py", "import b");
    let mut b = module("b.py", "import a");
    a.imports.push(local_import(&b.common.id));
    b.imports.push(local_import(&a.common.id));
    vec![Entity::Module(a), Entity::Module(b)]
}

/// `a.py` imports the third-party `math` module (scenario 3 in §8).
pub fn third_party_import() -> Vec<Entity> {
    let mut a = module("a.py", "import math");
    let mut import = Import::new(ImportModuleType::ThirdParty);
    import.imported_from = None;
    import.import_names = vec![fenec_core::ImportName::new("math")];
    a.imports.push(import);
    vec![Entity::Module(a)]
}

/// A directory containing one module, which in turn contains one class with
/// one method — a pure containment hierarchy, no dependency edges. Exercises
/// the planner's containment traversal and the engine's directory/children
/// summary path (§4.7, §4.8).
pub fn directory_with_mixed_children() -> Vec<Entity> {
    let dir_id = id::directory_id("pkg");
    let mut m = module("pkg/widget.py", "class Widget:\n    def spin(self): pass");
    m.common.parent_id = Some(dir_id.clone());

    let class_id = id::class_id(&m.common.id, "Widget");
    let mut class = ClassEntity {
        common: Common::new(class_id.clone(), "pkg/widget.py"),
        class_name: "Widget".into(),
        decorators: None,
        bases: None,
        docstring: None,
        keywords: None,
    };
    class.common.parent_id = Some(m.common.id.clone());

    let function_id = id::function_id(&class_id, "spin");
    let mut function = FunctionEntity {
        common: Common::new(function_id.clone(), "pkg/widget.py"),
        function_name: "spin".into(),
        docstring: None,
        decorators: None,
        parameters: None,
        returns: None,
        is_method: true,
        is_async: false,
    };
    function.common.parent_id = Some(class_id.clone());
    function.common.code_content = "def spin(self): pass".into();

    class.common.children_ids.push(function_id);
    m.common.children_ids.push(class_id);

    let directory = DirectoryEntity {
        id: dir_id.clone(),
        directory_name: "pkg".into(),
        sub_directories_ids: Vec::new(),
        children_ids: vec![m.common.id.clone()],
        parent_id: None,
        summary: None,
    };

    vec![
        Entity::Directory(directory),
        Entity::Module(m),
        Entity::Class(class),
        Entity::Function(function),
    ]
}
