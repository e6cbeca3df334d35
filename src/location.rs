//! Call-site helpers: trimming `file!()` paths and recovering the name of the
//! enclosing function.

/// Returns the part of `path` after the last `/` or `\`.
///
/// Both separators are recognized on every platform, so a backslash inside a
/// Unix file name is treated as a separator too. Without any separator the
/// whole input is returned.
///
/// ```
/// # use log_helper::extract_file_name;
/// assert_eq!(extract_file_name("/a/b/c.rs"), "c.rs");
/// assert_eq!(extract_file_name("a\\b\\c.rs"), "c.rs");
/// assert_eq!(extract_file_name("c.rs"), "c.rs");
/// ```
pub fn extract_file_name(path: &str) -> &str {
    match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Reduces the type name of a nested marker fn to the enclosing function name.
///
/// `function_name!()` declares `fn __f() {}` and hands over
/// `type_name_of(__f)`, e.g. `app::worker::do_thing::{{closure}}::__f`.
/// Closure segments are skipped so that a log call inside a closure reports
/// the function that owns it.
#[doc(hidden)]
pub fn trim_function_name(type_name: &str) -> &str {
    let mut name = type_name.strip_suffix("::__f").unwrap_or(type_name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    match name.rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_file_name() {
        assert_eq!(extract_file_name("/a/b/c.cpp"), "c.cpp");
        assert_eq!(extract_file_name("c.cpp"), "c.cpp");
        assert_eq!(extract_file_name("a\\b\\c.cpp"), "c.cpp");
        assert_eq!(extract_file_name("mixed/dir\\file.rs"), "file.rs");
        assert_eq!(extract_file_name(""), "");
        assert_eq!(extract_file_name("trailing/"), "");
    }

    #[test]
    fn test_trim_function_name() {
        assert_eq!(trim_function_name("app::worker::do_thing::__f"), "do_thing");
        assert_eq!(
            trim_function_name("app::run::{{closure}}::{{closure}}::__f"),
            "run"
        );
        assert_eq!(trim_function_name("main::__f"), "main");
        assert_eq!(trim_function_name("bare"), "bare");
    }

    #[test]
    fn test_function_name_macro() {
        assert_eq!(crate::function_name!(), "test_function_name_macro");
        let from_closure = || crate::function_name!();
        assert_eq!(from_closure(), "test_function_name_macro");
    }
}
