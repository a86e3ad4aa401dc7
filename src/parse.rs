//! Authored XML → [`SourceElement`] tree.
//!
//! This is the default host adapter: namespaces are resolved, namespace
//! declarations are dropped from the attribute list, and every element keeps
//! the line and column of its `<`. Text content is ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::{ParseError, ParseErrorKind, SourceLocation};
use crate::types::{QName, SourceAttribute, SourceElement};

/// Parse an XML document into its root element.
pub fn parse(input: &str) -> Result<SourceElement, ParseError> {
    parse_named(input, None)
}

/// Parse an XML document, recording `file` in every source location.
pub fn parse_named(input: &str, file: Option<&str>) -> Result<SourceElement, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    let mut reader = NsReader::from_str(input);
    let mut stack: Vec<SourceElement> = Vec::new();
    let mut root: Option<SourceElement> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        let (namespace, event) = match reader
            .read_resolved_event()
            .map(|(ns, event)| (owned_namespace(ns), event))
        {
            Ok(pair) => pair,
            Err(e) => {
                return Err(syntax_error(
                    input,
                    reader.error_position() as usize,
                    e.to_string(),
                ));
            }
        };
        let namespace = namespace.map_err(|prefix| unknown_prefix(input, offset, &prefix))?;

        match event {
            Event::Start(start) => {
                let element = build_element(&reader, &start, namespace, input, offset, file)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = build_element(&reader, &start, namespace, input, offset, file)?;
                attach(element, &mut stack, &mut root, input, offset)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(element, &mut stack, &mut root, input, offset)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(syntax_error(
            input,
            input.len(),
            "unexpected end of input: unclosed element".to_string(),
        ));
    }
    root.ok_or_else(|| ParseError {
        kind: ParseErrorKind::Syntax,
        message: "document has no root element".to_string(),
        line: None,
        column: None,
    })
}

fn build_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
    input: &str,
    offset: usize,
    file: Option<&str>,
) -> Result<SourceElement, ParseError> {
    let local = utf8(start.local_name().as_ref(), input, offset)?;
    let mut location = location_of(input, markup_start(input, offset));
    location.file = file.map(str::to_string);

    let mut element = SourceElement::new(
        QName {
            namespace,
            local,
        },
        location,
    );

    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax_error(input, offset, e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let namespace = owned_namespace(ns).map_err(|prefix| unknown_prefix(input, offset, &prefix))?;
        let local = utf8(local.as_ref(), input, offset)?;
        let value = attr
            .unescape_value()
            .map_err(|e| syntax_error(input, offset, e.to_string()))?
            .into_owned();
        element.attributes.push(SourceAttribute {
            name: QName { namespace, local },
            value,
        });
    }

    Ok(element)
}

fn attach(
    element: SourceElement,
    stack: &mut [SourceElement],
    root: &mut Option<SourceElement>,
    input: &str,
    offset: usize,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(syntax_error(
            input,
            offset,
            "multiple root elements".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn owned_namespace(ns: ResolveResult<'_>) -> Result<Option<String>, String> {
    match ns {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(String::from_utf8_lossy(&prefix).into_owned()),
    }
}

fn utf8(bytes: &[u8], input: &str, offset: usize) -> Result<String, ParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| {
            let loc = location_of(input, offset);
            ParseError {
                kind: ParseErrorKind::Encoding,
                message: e.to_string(),
                line: Some(loc.line),
                column: Some(loc.column),
            }
        })
}

/// Offset of the `<` opening the markup read from `offset`.
///
/// The reader may already have consumed the `<` when the markup follows text.
fn markup_start(input: &str, offset: usize) -> usize {
    let bytes = input.as_bytes();
    let end = (offset + 1).min(bytes.len());
    bytes[..end]
        .iter()
        .rposition(|&b| b == b'<')
        .unwrap_or(offset)
}

/// 1-based line and column of a byte offset.
fn location_of(input: &str, offset: usize) -> SourceLocation {
    let bytes = &input.as_bytes()[..offset.min(input.len())];
    let line = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = bytes
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    SourceLocation::new(line, offset.min(input.len()) - line_start + 1)
}

fn syntax_error(input: &str, offset: usize, message: String) -> ParseError {
    let loc = location_of(input, offset);
    ParseError {
        kind: ParseErrorKind::Syntax,
        message,
        line: Some(loc.line),
        column: Some(loc.column),
    }
}

fn unknown_prefix(input: &str, offset: usize, prefix: &str) -> ParseError {
    let loc = location_of(input, offset);
    ParseError {
        kind: ParseErrorKind::UnknownPrefix,
        message: format!("unknown namespace prefix '{}'", prefix),
        line: Some(loc.line),
        column: Some(loc.column),
    }
}
