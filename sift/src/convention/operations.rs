//! Built-in filter operation ids and their default GraphQL field names.

pub const EQUALS: i32 = 0;
pub const NOT_EQUALS: i32 = 1;
pub const CONTAINS: i32 = 2;
pub const NOT_CONTAINS: i32 = 3;
pub const IN: i32 = 4;
pub const NOT_IN: i32 = 5;
pub const STARTS_WITH: i32 = 6;
pub const NOT_STARTS_WITH: i32 = 7;
pub const ENDS_WITH: i32 = 8;
pub const NOT_ENDS_WITH: i32 = 9;
pub const AND: i32 = 10;
pub const OR: i32 = 11;
pub const DATA: i32 = 12;
pub const GREATER_THAN: i32 = 13;
pub const NOT_GREATER_THAN: i32 = 14;
pub const GREATER_THAN_OR_EQUALS: i32 = 15;
pub const NOT_GREATER_THAN_OR_EQUALS: i32 = 16;
pub const LOWER_THAN: i32 = 17;
pub const NOT_LOWER_THAN: i32 = 18;
pub const LOWER_THAN_OR_EQUALS: i32 = 19;
pub const NOT_LOWER_THAN_OR_EQUALS: i32 = 20;
pub const SOME: i32 = 21;
pub const NONE: i32 = 22;
pub const ALL: i32 = 23;
pub const ANY: i32 = 24;

/// `(id, name)` pairs known to the default convention.
pub const DEFAULT_OPERATION_NAMES: &[(i32, &str)] = &[
    (EQUALS, "eq"),
    (NOT_EQUALS, "neq"),
    (CONTAINS, "contains"),
    (NOT_CONTAINS, "ncontains"),
    (IN, "in"),
    (NOT_IN, "nin"),
    (STARTS_WITH, "startsWith"),
    (NOT_STARTS_WITH, "nstartsWith"),
    (ENDS_WITH, "endsWith"),
    (NOT_ENDS_WITH, "nendsWith"),
    (AND, "and"),
    (OR, "or"),
    (DATA, "data"),
    (GREATER_THAN, "gt"),
    (NOT_GREATER_THAN, "ngt"),
    (GREATER_THAN_OR_EQUALS, "gte"),
    (NOT_GREATER_THAN_OR_EQUALS, "ngte"),
    (LOWER_THAN, "lt"),
    (NOT_LOWER_THAN, "nlt"),
    (LOWER_THAN_OR_EQUALS, "lte"),
    (NOT_LOWER_THAN_OR_EQUALS, "nlte"),
    (SOME, "some"),
    (NONE, "none"),
    (ALL, "all"),
    (ANY, "any"),
];

/// Built-in name of `operation`, `None` for ids outside the table.
pub fn default_operation_name(operation: i32) -> Option<&'static str> {
    DEFAULT_OPERATION_NAMES
        .iter()
        .find(|(id, _)| *id == operation)
        .map(|(_, name)| *name)
}
