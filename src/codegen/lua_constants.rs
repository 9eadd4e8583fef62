//! Lua constant bindings.
//!
//! A small line state machine pulls `typedef enum { ... } Name;` bodies and
//! `#define NAME VALUE` lines out of C headers. Each enum or define becomes a
//! group; the generated C function pushes every constant into a Lua table
//! under its name with the caller's prefix removed.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::exports::GENERATED_BANNER;

static DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*define\s").expect("define pattern is valid"));

/// Lua value type, picked from the lexical shape of the C value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LuaType {
    String,
    Number,
    Integer,
}

impl LuaType {
    /// `"..."` is a string, `1.5` / `2f` are numbers, anything else is an integer.
    pub fn infer(value: &str) -> Self {
        if value.starts_with('"') {
            return LuaType::String;
        }
        let hex = value.starts_with("0x") || value.starts_with("0X");
        if value.contains('.') || (!hex && (value.ends_with('f') || value.ends_with('F'))) {
            LuaType::Number
        } else {
            LuaType::Integer
        }
    }

    fn push_function(&self) -> &'static str {
        match self {
            LuaType::String => "lua_pushstring",
            LuaType::Number => "lua_pushnumber",
            LuaType::Integer => "lua_pushinteger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LuaConstant {
    /// C identifier pushed onto the stack.
    pub value: String,
    /// Table field name (`value` without the prefix).
    pub name: String,
    pub kind: LuaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantGroup {
    pub type_name: String,
    pub constants: Vec<LuaConstant>,
}

/// Constant groups in first-seen order. A repeated type name replaces the
/// earlier constants but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConstantTable {
    groups: Vec<ConstantGroup>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[ConstantGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn insert(&mut self, group: ConstantGroup) {
        match self.groups.iter_mut().find(|g| g.type_name == group.type_name) {
            Some(existing) => existing.constants = group.constants,
            None => self.groups.push(group),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstantState {
    #[default]
    Normal,
    InEnum,
    InDefine,
}

#[derive(Debug, Default)]
struct Pending {
    type_name: String,
    constants: Vec<LuaConstant>,
}

impl Pending {
    fn flush_into(&mut self, table: &mut ConstantTable) {
        let pending = std::mem::take(self);
        if !pending.type_name.is_empty() {
            table.insert(ConstantGroup {
                type_name: pending.type_name,
                constants: pending.constants,
            });
        }
    }
}

/// Extract the constants of one header into `table`.
pub fn extract_constants(content: &str, prefix: &str, table: &mut ConstantTable) {
    let mut state = ConstantState::Normal;
    let mut pending = Pending::default();

    for line in content.split_inclusive('\n') {
        let mut next = match state {
            ConstantState::Normal => {
                pending.flush_into(table);
                normal(line)
            }
            ConstantState::InEnum => in_enum(prefix, line, &mut pending),
            ConstantState::InDefine => ConstantState::Normal,
        };
        if next == ConstantState::InDefine {
            next = in_define(prefix, line, &mut pending);
        }
        state = next;
    }

    pending.flush_into(table);
}

fn normal(line: &str) -> ConstantState {
    if line.contains("typedef enum") {
        ConstantState::InEnum
    } else if DEFINE.is_match(line) {
        ConstantState::InDefine
    } else {
        ConstantState::Normal
    }
}

fn in_enum(prefix: &str, line: &str, pending: &mut Pending) -> ConstantState {
    if line.contains('}') {
        pending.type_name = line
            .chars()
            .filter(|c| !matches!(c, '}' | ';') && !c.is_whitespace())
            .collect();
        return ConstantState::Normal;
    }

    let body = match line.find("//") {
        Some(at) => &line[..at],
        None => line,
    };
    let body = body.trim();
    if body.is_empty() || body.starts_with("/*") || body == "{" {
        return ConstantState::InEnum;
    }

    for entry in split_entries(body) {
        let value = entry.split('=').next().unwrap_or_default().trim();
        if value.is_empty() {
            continue;
        }
        pending.constants.push(LuaConstant {
            value: value.to_string(),
            name: strip_prefix(value, prefix),
            kind: LuaType::Integer,
        });
    }
    ConstantState::InEnum
}

/// Split enum entries on commas outside parentheses, so initializers such as
/// `LS_PACK(1, 2)` stay with their entry.
fn split_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth <= 0 => {
                entries.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&body[start..]);
    entries
}

fn in_define(prefix: &str, line: &str, pending: &mut Pending) -> ConstantState {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    if trimmed.ends_with('\\') {
        tracing::trace!("skipping multi-line define: {}", trimmed);
        return ConstantState::Normal;
    }

    let rest = trimmed.trim_start().trim_start_matches('#').trim_start();
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    // `define NAME VALUE`
    if tokens.len() < 3 || tokens[1].contains('(') {
        return ConstantState::Normal;
    }

    let name = tokens[1];
    pending.type_name = name.to_string();
    pending.constants.push(LuaConstant {
        value: name.to_string(),
        name: strip_prefix(name, prefix),
        kind: LuaType::infer(tokens[2]),
    });
    ConstantState::Normal
}

fn strip_prefix(value: &str, prefix: &str) -> String {
    value.strip_prefix(prefix).unwrap_or(value).to_string()
}

/// Render the registration function.
///
/// `includes` are header paths with any `../` segments removed.
pub fn lua_constants_source(function: &str, includes: &[String], table: &ConstantTable) -> String {
    let mut out = format!("{GENERATED_BANNER}\n#include \"core/core.h\"\n");
    for include in includes {
        out.push_str(&format!("#include \"{}\"\n", include.replace("../", "")));
    }
    out.push_str(&format!(
        "\n#include <lauxlib.h>\n#include <lua.h>\n#include <lualib.h>\n\n\
         void {function}(lua_State *L, int32 table_index) {{\n"
    ));

    for group in table.groups() {
        out.push_str(&format!("\t// {}\n", group.type_name));
        for constant in group.constants.iter().filter(|c| !c.name.is_empty()) {
            out.push_str(&format!(
                "\t{}(L, {});\n\tlua_setfield(L, table_index, \"{}\");\n",
                constant.kind.push_function(),
                constant.value,
                constant.name
            ));
        }
        out.push('\n');
    }

    out.pop();
    out.push_str("}\n");
    out
}
