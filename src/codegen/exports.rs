//! Export rewriting.
//!
//! Turns the aggregated export block into late-bound indirection glue:
//!
//! - a public header where each exported symbol is a macro redirecting to a
//!   slot (`#define ls_init _impl_ls_init`), preceded by the function-pointer
//!   typedefs and `extern` slot declarations,
//! - a consumer source defining every slot as `NULL` plus an init function
//!   copying all slots out of a caller-supplied interface table,
//! - the producer side: the same typedefs, the interface struct, and an
//!   initializer filling an interface table from the real symbols.
//!
//! Declarations are classified one line at a time. Parameters are sliced from
//! the declaration's first line, so parameter lists spanning several lines are
//! not supported; they are kept verbatim and reported in
//! [`RewrittenExports::unsupported`].

use serde::{Deserialize, Serialize};

use super::naming::{func_type_name, is_c_identifier, slot_name};
use crate::scan::ScanRules;

/// Placeholder for the public header's file name in the consumer source.
pub const API_HEADER_PLACEHOLDER: &str = "@API_HEADER@";

/// Banner carried by every generated file.
pub const GENERATED_BANNER: &str = "/* THIS FILE IS GENERATED DO NOT EDIT */";

/// Tokens that extend a return type by the following token.
const TYPE_QUALIFIERS: [&str; 4] = ["static", "const", "struct", "enum"];

/// Names used in the generated glue.
///
/// The export and inline markers come from the [`ScanRules`] that selected
/// the declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiNames {
    /// Prefix of indirection slot names.
    pub slot_prefix: String,
    /// Segment written in all caps in function-pointer type names.
    pub acronym: String,
    /// Interface table struct name.
    pub interface: String,
    /// Consumer-side init function.
    pub init_function: String,
    /// Producer-side interface table instance.
    pub producer_instance: String,
    /// Producer-side init function.
    pub producer_init: String,
    /// Allocator used by the producer-side init function.
    pub allocator: String,
}

impl Default for ApiNames {
    fn default() -> Self {
        ApiNames {
            slot_prefix: "_impl_".to_string(),
            acronym: "ls".to_string(),
            interface: "LSAPIInterface".to_string(),
            init_function: "ls_api_init".to_string(),
            producer_instance: "ls_api_interface".to_string(),
            producer_init: "api_interface_init".to_string(),
            allocator: "ls_malloc".to_string(),
        }
    }
}

/// What kind of declaration a slot stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Variable,
    Function,
}

/// One entry of the interface table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub kind: SlotKind,
    /// The exported symbol, e.g. `ls_init`.
    pub symbol: String,
    /// The slot variable, e.g. `_impl_ls_init`.
    pub slot: String,
    /// Variable type, or the function-pointer typedef name.
    pub slot_type: String,
}

/// Output of [`rewrite_exports`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenExports {
    /// Public header section: typedefs, slot externs, macro-indirected exports.
    pub header: String,
    /// Consumer source; includes [`API_HEADER_PLACEHOLDER`].
    pub source: String,
    /// Producer-side typedefs, interface struct and initializer.
    pub producer: String,
    /// Slots in first-seen order.
    pub slots: Vec<Slot>,
    /// Declarations with parameter lists spanning several lines.
    pub unsupported: Vec<String>,
}

enum Declaration {
    Variable { name: String, ty: String },
    Function { name: String, ret: String, params: String },
    MultiLine,
    Malformed,
}

/// Rewrite an aggregated export block.
///
/// `rules` gives the export marker stripped from each declaration (and put
/// on the consumer init function) and the inline marker of skipped bodies.
pub fn rewrite_exports(exports: &str, rules: &ScanRules, names: &ApiNames) -> RewrittenExports {
    let exports = strip_export_marker(exports, &rules.export_marker);

    let mut body = String::with_capacity(exports.len());
    let mut typedefs = String::new();
    let mut slots = Vec::new();
    let mut unsupported = Vec::new();

    let mut in_inline = false;
    let mut inline_depth = 0i32;
    let mut in_comment = false;
    let mut pending: Option<String> = None;

    for line in exports.lines() {
        if in_inline || rules.is_inline(line) {
            in_inline = true;
            inline_depth += line.matches('{').count() as i32 - line.matches('}').count() as i32;
            if (line.contains(';') || line.contains('}')) && inline_depth == 0 {
                in_inline = false;
            }
            continue;
        }

        if let Some(decl) = pending.as_mut() {
            decl.push('\n');
            decl.push_str(line);
            push_line(&mut body, line);
            if line.contains(';') {
                unsupported.extend(pending.take());
            }
            continue;
        }

        if line.starts_with("//") {
            push_line(&mut body, line);
            continue;
        }
        if in_comment || line.starts_with("/*") {
            in_comment = !line.contains("*/");
            push_line(&mut body, line);
            continue;
        }

        let decl = match line.strip_prefix("extern ") {
            Some(rest) => parse_variable(rest),
            None => parse_function(line),
        };

        match decl {
            Declaration::Variable { name, ty } => {
                let slot = slot_name(&names.slot_prefix, &name);
                push_line(&mut body, &format!("#define {name} {slot}"));
                slots.push(Slot {
                    kind: SlotKind::Variable,
                    symbol: name,
                    slot,
                    slot_type: ty,
                });
            }
            Declaration::Function { name, ret, params } => {
                let slot = slot_name(&names.slot_prefix, &name);
                let type_name = func_type_name(&name, &names.acronym);
                typedefs.push_str(&format!("typedef {ret}(*{type_name})({params});\n"));
                push_line(&mut body, &format!("#define {name} {slot}"));
                slots.push(Slot {
                    kind: SlotKind::Function,
                    symbol: name,
                    slot,
                    slot_type: type_name,
                });
            }
            Declaration::MultiLine => {
                push_line(&mut body, line);
                if line.contains(';') {
                    unsupported.push(line.to_string());
                } else {
                    pending = Some(line.to_string());
                }
            }
            Declaration::Malformed => {
                tracing::trace!(line, "skipping line that is not a declaration");
                push_line(&mut body, line);
            }
        }
    }
    unsupported.extend(pending);

    let interface = interface_struct(&slots, names);

    let mut header = typedefs.clone();
    header.push('\n');
    for slot in &slots {
        header.push_str(&format!("extern {} {};\n", slot.slot_type, slot.slot));
    }
    header.push('\n');
    header.push_str(&body);
    header.push('\n');

    RewrittenExports {
        header,
        source: consumer_source(&slots, &interface, &rules.export_marker, names),
        producer: producer_source(&typedefs, &slots, &interface, names),
        slots,
        unsupported,
    }
}

fn strip_export_marker(exports: &str, marker: &str) -> String {
    if marker.is_empty() {
        return exports.to_string();
    }
    exports.replace(&format!("{marker} "), "")
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn interface_struct(slots: &[Slot], names: &ApiNames) -> String {
    let mut out = format!("struct {} {{\n", names.interface);
    for slot in slots {
        out.push_str(&format!("\t{} {};\n", slot.slot_type, slot.slot));
    }
    out.push_str("};\n");
    out
}

fn consumer_source(slots: &[Slot], interface: &str, marker: &str, names: &ApiNames) -> String {
    let mut out = format!("{GENERATED_BANNER}\n#include \"{API_HEADER_PLACEHOLDER}\"\n\n");
    for slot in slots {
        out.push_str(&format!("{} {} = NULL;\n", slot.slot_type, slot.slot));
    }
    out.push('\n');
    out.push_str(interface);
    out.push('\n');
    out.push_str(&format!(
        "{} void {}({} *interface) {{\n",
        marker, names.init_function, names.interface
    ));
    for slot in slots {
        out.push_str(&format!("\t{0} = interface->{0};\n", slot.slot));
    }
    out.push_str("};\n\n\n");
    out
}

fn producer_source(typedefs: &str, slots: &[Slot], interface: &str, names: &ApiNames) -> String {
    let mut out = String::from(typedefs);
    out.push('\n');
    out.push_str(interface);
    out.push('\n');
    out.push_str(&format!(
        "\n{iface} *{instance} = NULL;\n\nvoid {init}() {{\n    {instance} = {alloc}(sizeof({iface}));\n",
        iface = names.interface,
        instance = names.producer_instance,
        init = names.producer_init,
        alloc = names.allocator,
    ));
    for slot in slots {
        out.push_str(&format!(
            "\t{}->{} = {};\n",
            names.producer_instance, slot.slot, slot.symbol
        ));
    }
    out.push_str("}\n");
    out
}

/// `type name;` after the leading `extern `.
fn parse_variable(rest: &str) -> Declaration {
    let decl = rest.replace("*const ", "*");
    let decl = decl.trim().trim_end_matches(';').trim_end();
    let tokens: Vec<&str> = decl.split_whitespace().collect();
    let Some((last, type_tokens)) = tokens.split_last() else {
        return Declaration::Malformed;
    };
    if type_tokens.is_empty() {
        return Declaration::Malformed;
    }

    let mut ty = type_tokens.join(" ");
    let mut name = *last;
    while let Some(stripped) = name.strip_prefix('*') {
        ty.push('*');
        name = stripped;
    }

    if !is_c_identifier(name) {
        return Declaration::Malformed;
    }
    Declaration::Variable {
        name: name.to_string(),
        ty,
    }
}

/// `[qualifier..] type name(params);` on a single line.
fn parse_function(line: &str) -> Declaration {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Declaration::Malformed;
    }
    let Some(open) = line.find('(') else {
        return Declaration::Malformed;
    };

    let mut idx = 0;
    let mut ret = tokens[0].to_string();
    while TYPE_QUALIFIERS.contains(&tokens[idx]) && idx + 2 < tokens.len() {
        idx += 1;
        ret.push(' ');
        ret.push_str(tokens[idx]);
    }
    ret.push(' ');

    let mut name = tokens[idx + 1].split('(').next().unwrap_or_default();
    while let Some(stripped) = name.strip_prefix('*') {
        ret.push('*');
        name = stripped;
    }
    if !is_c_identifier(name) {
        return Declaration::Malformed;
    }

    let Some(close) = matching_paren(&line[open..]) else {
        return Declaration::MultiLine;
    };

    Declaration::Function {
        name: name.to_string(),
        ret,
        params: line[open + 1..open + close].to_string(),
    }
}

/// Byte offset of the `)` matching the `(` at offset 0.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(exports: &str) -> RewrittenExports {
        rewrite_exports(exports, &ScanRules::default(), &ApiNames::default())
    }

    #[test]
    fn test_function_export() {
        let out = rewrite("LS_EXPORT int ls_foo(int a);\n");

        assert!(out.header.contains("typedef int (*LSFooFunc)(int a);\n"));
        assert!(out.header.contains("extern LSFooFunc _impl_ls_foo;\n"));
        assert!(out.header.contains("#define ls_foo _impl_ls_foo\n"));
        assert!(!out.header.contains("int ls_foo(int a);"));

        assert!(out.source.contains("struct LSAPIInterface {\n\tLSFooFunc _impl_ls_foo;\n};\n"));
        assert!(out.source.contains("LSFooFunc _impl_ls_foo = NULL;\n"));
        assert!(out
            .source
            .contains("LS_EXPORT void ls_api_init(LSAPIInterface *interface) {\n"));
        assert!(out.source.contains("\t_impl_ls_foo = interface->_impl_ls_foo;\n"));
        assert!(out.source.contains("#include \"@API_HEADER@\""));

        assert_eq!(
            out.slots,
            vec![Slot {
                kind: SlotKind::Function,
                symbol: "ls_foo".to_string(),
                slot: "_impl_ls_foo".to_string(),
                slot_type: "LSFooFunc".to_string(),
            }]
        );
    }

    #[test]
    fn test_header_layout() {
        let out = rewrite("LS_EXPORT void ls_init(void);\n");
        assert_eq!(
            out.header,
            "typedef void (*LSInitFunc)(void);\n\
             \n\
             extern LSInitFunc _impl_ls_init;\n\
             \n\
             #define ls_init _impl_ls_init\n\
             \n"
        );
    }

    #[test]
    fn test_extern_const_pointer_variable() {
        let out = rewrite("extern int *const g_counter;\n");

        assert_eq!(out.slots.len(), 1);
        assert_eq!(out.slots[0].kind, SlotKind::Variable);
        assert_eq!(out.slots[0].symbol, "g_counter");
        assert_eq!(out.slots[0].slot_type, "int*");
        assert!(out.header.contains("#define g_counter _impl_g_counter\n"));
        assert!(!out.header.contains("#define g_counter_impl_g_counter"));
        assert!(out.header.contains("extern int* _impl_g_counter;\n"));
        assert!(out.source.contains("int* _impl_g_counter = NULL;\n"));
    }

    #[test]
    fn test_pointer_return_and_qualifiers() {
        let out = rewrite(
            "LS_EXPORT const char *ls_get_name(const LSWindow *window);\n\
             LS_EXPORT struct LSVec2 ls_vec2_add(struct LSVec2 a, struct LSVec2 b);\n",
        );
        assert!(out
            .header
            .contains("typedef const char *(*LSGetNameFunc)(const LSWindow *window);\n"));
        assert!(out.header.contains(
            "typedef struct LSVec2 (*LSVec2AddFunc)(struct LSVec2 a, struct LSVec2 b);\n"
        ));
        assert_eq!(out.slots[0].symbol, "ls_get_name");
        assert_eq!(out.slots[1].symbol, "ls_vec2_add");
    }

    #[test]
    fn test_inline_functions_are_dropped() {
        let exports = "\
_FORCE_INLINE_ int ls_min(int a, int b) {
\treturn a < b ? a : b;
}
LS_EXPORT void ls_init(void);
_FORCE_INLINE_ int ls_abs(int a) { return a < 0 ? -a : a; }
";
        let out = rewrite(exports);
        assert!(!out.header.contains("ls_min"));
        assert!(!out.header.contains("ls_abs"));
        assert!(!out.header.contains("return"));
        assert_eq!(out.slots.len(), 1);
        assert_eq!(out.slots[0].symbol, "ls_init");
    }

    #[test]
    fn test_comments_are_not_classified() {
        let exports = "\
/*
 * Creates the core (call once).
 */
// int not_an_export(void);
LS_EXPORT void ls_core_init(void);
";
        let out = rewrite(exports);
        assert_eq!(out.slots.len(), 1);
        assert!(out.header.contains(" * Creates the core (call once).\n"));
        assert!(out.header.contains("// int not_an_export(void);\n"));
    }

    #[test]
    fn test_malformed_lines_are_skipped_silently() {
        let out = rewrite("LS_EXPORT garbage\n\n");
        assert!(out.slots.is_empty());
        assert!(out.unsupported.is_empty());
    }

    #[test]
    fn test_multi_line_params_are_reported() {
        let exports = "\
LS_EXPORT void ls_draw_rect(int x, int y,
\tint w, int h);
LS_EXPORT void ls_present(void);
";
        let out = rewrite(exports);
        assert_eq!(
            out.unsupported,
            vec!["void ls_draw_rect(int x, int y,\n\tint w, int h);".to_string()]
        );
        assert_eq!(out.slots.len(), 1);
        assert_eq!(out.slots[0].symbol, "ls_present");
        assert!(out.header.contains("void ls_draw_rect(int x, int y,\n\tint w, int h);\n"));
    }

    #[test]
    fn test_producer_side() {
        let out = rewrite("LS_EXPORT void ls_init(void);\nextern int ls_frame;\n");
        assert!(out.producer.starts_with("typedef void (*LSInitFunc)(void);\n\n"));
        assert!(out.producer.contains("struct LSAPIInterface {\n"));
        assert!(out.producer.contains("LSAPIInterface *ls_api_interface = NULL;\n"));
        assert!(out
            .producer
            .contains("ls_api_interface = ls_malloc(sizeof(LSAPIInterface));\n"));
        assert!(out
            .producer
            .contains("\tls_api_interface->_impl_ls_init = ls_init;\n"));
        assert!(out
            .producer
            .contains("\tls_api_interface->_impl_ls_frame = ls_frame;\n"));
        assert!(out.producer.ends_with("}\n"));
    }

    #[test]
    fn test_slot_order_is_first_seen() {
        let out = rewrite(
            "LS_EXPORT void ls_b(void);\nextern int ls_a;\nLS_EXPORT void ls_c(void);\n",
        );
        let symbols: Vec<_> = out.slots.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, ["ls_b", "ls_a", "ls_c"]);
    }

    #[test]
    fn test_markers_follow_scan_rules() {
        let rules = ScanRules {
            export_marker: "MY_API".to_string(),
            inline_marker: "MY_INLINE".to_string(),
            ..ScanRules::default()
        };
        let exports = "\
MY_INLINE int my_min(int a, int b) {
\treturn a < b ? a : b;
}
MY_API void ls_run(void);
";
        let out = rewrite_exports(exports, &rules, &ApiNames::default());

        assert_eq!(out.slots.len(), 1);
        assert_eq!(out.slots[0].symbol, "ls_run");
        assert!(out.header.contains("typedef void (*LSRunFunc)(void);\n"));
        assert!(out.header.contains("#define ls_run _impl_ls_run\n"));
        assert!(!out.header.contains("my_min"));
        assert!(out.source.contains("MY_API void ls_api_init(LSAPIInterface *interface) {\n"));
    }

    #[test]
    fn test_empty_export_marker_keeps_spacing() {
        let rules = ScanRules {
            export_marker: String::new(),
            ..ScanRules::default()
        };
        let out = rewrite_exports("int ls_foo(int a);\n", &rules, &ApiNames::default());

        assert_eq!(out.slots.len(), 1);
        assert_eq!(out.slots[0].symbol, "ls_foo");
        assert!(out.header.contains("typedef int (*LSFooFunc)(int a);\n"));
    }
}
