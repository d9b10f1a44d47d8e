//! Symbolic icon names for resolved nodes.
//!
//! Icons are host-theme symbol names, not image paths; the renderer maps
//! them to whatever its icon theme provides. File leaves get an icon from
//! a fixed extension table; container nodes get per-kind defaults unless
//! the configuration declares an override.

/// Default icon for group containers.
pub const GROUP: &str = "folder";

/// Default icon for static file-list containers.
pub const FILE_GROUP: &str = "folder-opened";

/// Default icon for filter-result containers.
pub const FILTER_GROUP: &str = "search";

/// Fallback icon for files with an unrecognized extension.
pub const FILE: &str = "file";

/// Map a file name to its icon by extension, case-insensitively.
pub fn for_file_name(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return FILE,
    };
    match ext.as_str() {
        "cpp" | "c" => "file-code",
        "h" | "hpp" => "symbol-class",
        "md" => "markdown",
        "json" => "json",
        "ts" => "symbol-method",
        "js" => "symbol-function",
        _ => FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_their_icons() {
        assert_eq!(for_file_name("main.cpp"), "file-code");
        assert_eq!(for_file_name("util.c"), "file-code");
        assert_eq!(for_file_name("api.h"), "symbol-class");
        assert_eq!(for_file_name("api.hpp"), "symbol-class");
        assert_eq!(for_file_name("README.md"), "markdown");
        assert_eq!(for_file_name("package.json"), "json");
        assert_eq!(for_file_name("app.ts"), "symbol-method");
        assert_eq!(for_file_name("app.js"), "symbol-function");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(for_file_name("MAIN.CPP"), "file-code");
        assert_eq!(for_file_name("Readme.MD"), "markdown");
    }

    #[test]
    fn unknown_extension_falls_back_to_generic_file() {
        assert_eq!(for_file_name("data.xyz"), FILE);
        assert_eq!(for_file_name("Makefile"), FILE);
        assert_eq!(for_file_name(".gitignore"), FILE);
    }
}
