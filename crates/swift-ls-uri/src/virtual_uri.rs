//! Reference-document URI grammar: macro-expansion and generated-interface
//! virtual documents, and `DocumentUri`/`primary_file` resolution.
//!
//! Grammar (spec §6):
//!
//! ```text
//! <scheme>://macro-expansion/L<a>C<b>-L<c>C<d>.<ext>?fromLine=&fromColumn=&toLine=&toColumn=&bufferName=&parent=
//! <scheme>://generated-interface/<module-or-display-name>?module=&group=&primaryFile=
//! ```
//!
//! `parent` is always serialized last so that a naive URL re-parser does not
//! mistake its (possibly nested) query parameters for the outer URI's.

use std::fmt;

use url::Url;

use crate::error::UriError;

/// Maximum number of `parent` hops `primary_file` will follow before
/// concluding the chain is cyclic. Spec §9: "Reject cycles by bounding the
/// chain length."
pub const MAX_PARENT_CHAIN_DEPTH: usize = 16;

/// A zero-based (line, column) pair, as used by the parent-selection-range
/// query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCol {
    /// Zero-based line.
    pub line: u32,
    /// Zero-based UTF-16 column.
    pub column: u32,
}

impl LineCol {
    /// Construct a new zero-based position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A 1-based (line, column) pair, as encoded in a macro-expansion
/// display-name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCol1 {
    /// 1-based line.
    pub line: u32,
    /// 1-based UTF-16 column.
    pub column: u32,
}

impl LineCol1 {
    /// Construct a new 1-based position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A document URI: either a filesystem-backed (or otherwise non-virtual)
/// document, or a reference document synthesized on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentUri {
    /// A non-virtual document (typically `file://`, but any scheme that is
    /// not one of the reference-document hosts counts as non-virtual for
    /// the purposes of `primary_file` resolution).
    File(String),
    /// A reference document: a macro expansion or a generated module
    /// interface.
    Virtual(VirtualUri),
}

impl DocumentUri {
    /// Parse an arbitrary URI string into a `DocumentUri`.
    pub fn parse(s: &str) -> Result<Self, UriError> {
        let url = Url::parse(s).map_err(|e| UriError::Malformed(e.to_string()))?;
        match url.host_str() {
            Some("macro-expansion") => {
                Ok(DocumentUri::Virtual(VirtualUri::MacroExpansion(parse_macro_expansion(&url)?)))
            }
            Some("generated-interface") => Ok(DocumentUri::Virtual(VirtualUri::GeneratedInterface(
                parse_generated_interface(&url)?,
            ))),
            _ => Ok(DocumentUri::File(s.to_string())),
        }
    }

    /// Render this URI back to its string form.
    pub fn encode(&self) -> String {
        match self {
            DocumentUri::File(s) => s.clone(),
            DocumentUri::Virtual(v) => v.encode(),
        }
    }

    /// Resolve the first non-virtual ancestor by following `parent` links.
    ///
    /// Bounded to [`MAX_PARENT_CHAIN_DEPTH`] hops; a longer chain is
    /// presumed cyclic and reported as an error rather than looping forever.
    pub fn primary_file(&self) -> Result<String, UriError> {
        let mut current = self;
        let mut owned;
        for _ in 0..MAX_PARENT_CHAIN_DEPTH {
            match current {
                DocumentUri::File(s) => return Ok(s.clone()),
                DocumentUri::Virtual(v) => {
                    owned = (*v.parent()).clone();
                    current = &owned;
                }
            }
        }
        Err(UriError::ParentChainTooDeep(MAX_PARENT_CHAIN_DEPTH))
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// A reference-document URI: a macro expansion or generated interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualUri {
    /// A macro-expansion virtual buffer.
    MacroExpansion(MacroExpansionRef),
    /// A generated module-interface virtual buffer.
    GeneratedInterface(GeneratedInterfaceRef),
}

impl VirtualUri {
    /// The `parent` field common to both virtual-URI kinds.
    pub fn parent(&self) -> &DocumentUri {
        match self {
            VirtualUri::MacroExpansion(r) => &r.parent,
            VirtualUri::GeneratedInterface(r) => &r.primary_file,
        }
    }

    /// Encode back to the canonical URI string.
    pub fn encode(&self) -> String {
        match self {
            VirtualUri::MacroExpansion(r) => r.encode(),
            VirtualUri::GeneratedInterface(r) => r.encode(),
        }
    }
}

/// A macro-expansion reference document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpansionRef {
    /// The outer URI scheme (editor-defined, e.g. `swift-lsp`).
    pub scheme: String,
    /// The 1-based range encoded in the display-name, i.e. the
    /// macro-expansion edit range.
    pub edit_range: (LineCol1, LineCol1),
    /// File extension encoded in the display-name (usually `swift`).
    pub ext: String,
    /// The zero-based parent selection range (the macro-expansion site in
    /// the parent document).
    pub parent_selection_range: (LineCol, LineCol),
    /// The analysis daemon's internal name for the expansion buffer.
    pub buffer_name: String,
    /// The parent document this expansion was produced from.
    pub parent: Box<DocumentUri>,
}

impl MacroExpansionRef {
    /// Encode to the canonical
    /// `<scheme>://macro-expansion/L<a>C<b>-L<c>C<d>.<ext>?...&parent=` form.
    pub fn encode(&self) -> String {
        let (start, end) = self.edit_range;
        let display_name =
            format!("L{}C{}-L{}C{}.{}", start.line, start.column, end.line, end.column, self.ext);
        let (from, to) = self.parent_selection_range;
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("fromLine", &from.line.to_string())
            .append_pair("fromColumn", &from.column.to_string())
            .append_pair("toLine", &to.line.to_string())
            .append_pair("toColumn", &to.column.to_string())
            .append_pair("bufferName", &self.buffer_name)
            .append_pair("parent", &self.parent.encode());
        format!("{}://macro-expansion/{}?{}", self.scheme, display_name, serializer.finish())
    }
}

fn parse_macro_expansion(url: &Url) -> Result<MacroExpansionRef, UriError> {
    let scheme = url.scheme().to_string();
    let display_name = url.path().trim_start_matches('/').to_string();
    let edit_range_and_ext = parse_display_name(&display_name)?;

    let mut from_line = None;
    let mut from_col = None;
    let mut to_line = None;
    let mut to_col = None;
    let mut buffer_name = None;
    let mut parent = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "fromLine" => from_line = Some(parse_u32("fromLine", &value)?),
            "fromColumn" => from_col = Some(parse_u32("fromColumn", &value)?),
            "toLine" => to_line = Some(parse_u32("toLine", &value)?),
            "toColumn" => to_col = Some(parse_u32("toColumn", &value)?),
            "bufferName" => buffer_name = Some(value.into_owned()),
            "parent" => parent = Some(DocumentUri::parse(&value)?),
            _ => {}
        }
    }

    let from_line = from_line.ok_or(UriError::MissingParam("fromLine"))?;
    let from_col = from_col.ok_or(UriError::MissingParam("fromColumn"))?;
    let to_line = to_line.ok_or(UriError::MissingParam("toLine"))?;
    let to_col = to_col.ok_or(UriError::MissingParam("toColumn"))?;
    let buffer_name = buffer_name.ok_or(UriError::MissingParam("bufferName"))?;
    let parent = parent.ok_or(UriError::MissingParam("parent"))?;

    Ok(MacroExpansionRef {
        scheme,
        edit_range: edit_range_and_ext.0,
        ext: edit_range_and_ext.1,
        parent_selection_range: (LineCol::new(from_line, from_col), LineCol::new(to_line, to_col)),
        buffer_name,
        parent: Box::new(parent),
    })
}

/// Parse a `L<a>C<b>-L<c>C<d>.<ext>` display-name into its range and
/// extension.
fn parse_display_name(display_name: &str) -> Result<((LineCol1, LineCol1), String), UriError> {
    let (range_part, ext) = display_name
        .rsplit_once('.')
        .ok_or_else(|| UriError::MalformedRange(display_name.to_string()))?;
    let (start_part, end_part) = range_part
        .split_once('-')
        .ok_or_else(|| UriError::MalformedRange(display_name.to_string()))?;
    let start = parse_lc1(start_part, display_name)?;
    let end = parse_lc1(end_part, display_name)?;
    Ok(((start, end), ext.to_string()))
}

fn parse_lc1(part: &str, whole: &str) -> Result<LineCol1, UriError> {
    let rest = part.strip_prefix('L').ok_or_else(|| UriError::MalformedRange(whole.to_string()))?;
    let (line_str, col_str) =
        rest.split_once('C').ok_or_else(|| UriError::MalformedRange(whole.to_string()))?;
    let line: u32 =
        line_str.parse().map_err(|_| UriError::MalformedRange(whole.to_string()))?;
    let column: u32 =
        col_str.parse().map_err(|_| UriError::MalformedRange(whole.to_string()))?;
    Ok(LineCol1::new(line, column))
}

fn parse_u32(name: &'static str, value: &str) -> Result<u32, UriError> {
    value
        .parse()
        .map_err(|_| UriError::InvalidParam { name, value: value.to_string() })
}

/// A generated module-interface reference document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInterfaceRef {
    /// The outer URI scheme.
    pub scheme: String,
    /// The path segment identifying the interface (module name, or a
    /// disambiguated display name when the same module is opened for
    /// multiple groups).
    pub display_name: String,
    /// The module whose interface was synthesized.
    pub module: String,
    /// The optional compiler group the module was resolved against.
    pub group: Option<String>,
    /// The file that requested this interface (used to look up build
    /// settings and as the `parent`/primary file).
    pub primary_file: DocumentUri,
}

impl GeneratedInterfaceRef {
    /// Encode to the canonical
    /// `<scheme>://generated-interface/<display-name>?module=&group=&primaryFile=` form.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("module", &self.module);
        if let Some(group) = &self.group {
            serializer.append_pair("group", group);
        }
        serializer.append_pair("primaryFile", &self.primary_file.encode());
        format!(
            "{}://generated-interface/{}?{}",
            self.scheme,
            self.display_name,
            serializer.finish()
        )
    }
}

fn parse_generated_interface(url: &Url) -> Result<GeneratedInterfaceRef, UriError> {
    let scheme = url.scheme().to_string();
    let display_name = url.path().trim_start_matches('/').to_string();

    let mut module = None;
    let mut group = None;
    let mut primary_file = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "module" => module = Some(value.into_owned()),
            "group" => group = Some(value.into_owned()),
            "primaryFile" => primary_file = Some(DocumentUri::parse(&value)?),
            _ => {}
        }
    }

    Ok(GeneratedInterfaceRef {
        scheme,
        display_name,
        module: module.ok_or(UriError::MissingParam("module"))?,
        group,
        primary_file: primary_file.ok_or(UriError::MissingParam("primaryFile"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_macro_expansion() -> MacroExpansionRef {
        MacroExpansionRef {
            scheme: "swift-lsp".to_string(),
            edit_range: (LineCol1::new(4, 8), LineCol1::new(4, 24)),
            ext: "swift".to_string(),
            parent_selection_range: (LineCol::new(2, 7), LineCol::new(2, 22)),
            buffer_name: "@__swift_macro_Stringify_.swift".to_string(),
            parent: Box::new(DocumentUri::File("file:///p.swift".to_string())),
        }
    }

    #[test]
    fn macro_expansion_round_trips() {
        let original = sample_macro_expansion();
        let encoded = original.encode();
        let decoded = DocumentUri::parse(&encoded).unwrap();
        let re_encoded = decoded.encode();
        assert_eq!(encoded, re_encoded);
    }

    #[test]
    fn macro_expansion_decodes_fields() {
        let encoded = sample_macro_expansion().encode();
        let decoded = DocumentUri::parse(&encoded).unwrap();
        match decoded {
            DocumentUri::Virtual(VirtualUri::MacroExpansion(r)) => {
                assert_eq!(r.edit_range, (LineCol1::new(4, 8), LineCol1::new(4, 24)));
                assert_eq!(r.parent_selection_range, (LineCol::new(2, 7), LineCol::new(2, 22)));
                assert_eq!(r.buffer_name, "@__swift_macro_Stringify_.swift");
                assert_eq!(*r.parent, DocumentUri::File("file:///p.swift".to_string()));
            }
            _ => panic!("expected macro expansion"),
        }
    }

    #[test]
    fn generated_interface_round_trips() {
        let original = GeneratedInterfaceRef {
            scheme: "swift-lsp".to_string(),
            display_name: "MyModule".to_string(),
            module: "MyModule".to_string(),
            group: Some("MyGroup".to_string()),
            primary_file: DocumentUri::File("file:///origin.swift".to_string()),
        };
        let encoded = original.encode();
        let decoded = DocumentUri::parse(&encoded).unwrap();
        assert_eq!(encoded, decoded.encode());
        match decoded {
            DocumentUri::Virtual(VirtualUri::GeneratedInterface(r)) => {
                assert_eq!(r.module, "MyModule");
                assert_eq!(r.group.as_deref(), Some("MyGroup"));
            }
            _ => panic!("expected generated interface"),
        }
    }

    #[test]
    fn primary_file_follows_file_uri_directly() {
        let uri = DocumentUri::File("file:///a.swift".to_string());
        assert_eq!(uri.primary_file().unwrap(), "file:///a.swift");
    }

    #[test]
    fn primary_file_follows_nested_macro_expansion_chain() {
        let inner = sample_macro_expansion();
        let inner_uri = DocumentUri::Virtual(VirtualUri::MacroExpansion(inner));
        let mut outer = sample_macro_expansion();
        outer.parent = Box::new(inner_uri);
        let outer_uri = DocumentUri::Virtual(VirtualUri::MacroExpansion(outer));
        assert_eq!(outer_uri.primary_file().unwrap(), "file:///p.swift");
    }

    #[test]
    fn malformed_display_name_is_rejected() {
        let bad = "swift-lsp://macro-expansion/not-a-range.swift?fromLine=0&fromColumn=0&toLine=0&toColumn=0&bufferName=x&parent=file%3A%2F%2F%2Fa.swift";
        assert!(DocumentUri::parse(bad).is_err());
    }
}
