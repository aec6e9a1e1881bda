//! Canonical tool identifiers and route paths.
//!
//! Catalog entries, route entries and frontends reference these constants
//! instead of repeating string literals. When a tool is renamed, only this
//! file needs to change.

pub const JSON_TOOL: &str = "json-tool";
pub const MARKDOWN_TOOL: &str = "markdown-tool";
pub const TOON_CONVERTER: &str = "toon-converter";
pub const PASSWORD_GENERATOR: &str = "password-generator";
pub const DIFF_VIEWER: &str = "diff-viewer";
pub const DOCUMENT_VIEWER: &str = "document-viewer";

pub const ROOT_PATH: &str = "/";
pub const JSON_TOOL_PATH: &str = "/tool/json-tool";
pub const MARKDOWN_TOOL_PATH: &str = "/tool/markdown-tool";
pub const TOON_CONVERTER_PATH: &str = "/tool/toon-converter";
pub const PASSWORD_GENERATOR_PATH: &str = "/tool/password-generator";
pub const DIFF_VIEWER_PATH: &str = "/tool/diff-viewer";
pub const DOCUMENT_VIEWER_PATH: &str = "/tool/document-viewer";

pub const TEXT_TOOLS: &str = "text-tools";
pub const CONVERTERS: &str = "converters";
pub const GENERATORS: &str = "generators";
pub const VIEWERS: &str = "viewers";
