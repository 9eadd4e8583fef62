//! Module registration source (`initialize_modules.gen.c`).

use super::exports::GENERATED_BANNER;

/// A module that ships a `module_initialize.h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    /// Directory holding `module_initialize.h`, with `/` separators.
    pub path: String,
}

/// Render the initialize/uninitialize dispatch for `modules`, in order.
pub fn modules_source(modules: &[ModuleEntry]) -> String {
    let mut includes = String::new();
    let mut initialize = String::new();
    let mut uninitialize = String::new();

    for module in modules {
        let guard = format!("#ifdef MODULE_{}_ENABLED\n", module.name.to_uppercase());
        includes.push_str(&format!("#include \"{}/module_initialize.h\"\n", module.path));
        initialize.push_str(&guard);
        initialize.push_str(&format!("\tinitialize_{}_module(p_level);\n#endif\n", module.name));
        uninitialize.push_str(&guard);
        uninitialize.push_str(&format!("\tuninitialize_{}_module(p_level);\n#endif\n", module.name));
    }

    format!(
        "{GENERATED_BANNER}\n\
         #include \"initialize_modules.h\"\n\
         \n\
         #include \"modules/modules_enabled.gen.h\"\n\
         \n\
         {includes}\n\
         void initialize_modules(ModuleInitializationLevel p_level) {{\n\
         {initialize}\
         }}\n\
         \n\
         void uninitialize_modules(ModuleInitializationLevel p_level) {{\n\
         {uninitialize}\
         }}\n"
    )
}
