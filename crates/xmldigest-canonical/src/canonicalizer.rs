use crate::dtd::{collapse_spaces, AttributeDecls};
use crate::methods::C14nMethod;
use crate::report::TransformReport;
use crate::xml::{self, XmlError};
use roxmltree::{Attribute, Document, Node, NodeType};
use std::collections::{BTreeMap, BTreeSet};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Input could not be decoded or parsed as XML.
    #[error("input is not well-formed XML: {0}")]
    Malformed(#[from] XmlError),
    /// No canonicalization routine is registered for the URI.
    #[error("unsupported canonicalization algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Result of canonicalization.
#[derive(Debug)]
pub struct CanonicalizationResult {
    /// Canonical UTF-8 bytes (or the untouched input for the identity method).
    pub bytes: Vec<u8>,
    /// Counters collected while serializing.
    pub report: TransformReport,
}

/// Namespace bindings keyed by prefix; the default namespace uses `""`.
type NsScope = BTreeMap<String, String>;

/// An attribute ready for output: specified in the start tag or defaulted by the DTD.
struct OutputAttribute {
    uri: String,
    local: String,
    qname: String,
    value: String,
}

impl OutputAttribute {
    fn prefix(&self) -> Option<&str> {
        self.qname.split_once(':').map(|(prefix, _)| prefix)
    }
}

/// Canonicalizer bound to one method.
///
/// Whole documents are serialized; the node-set subsets of the W3C
/// recommendations are not exposed, which makes Canonical XML 1.1 output
/// identical to 1.0 output.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer {
    method: C14nMethod,
}

impl Canonicalizer {
    /// Creates a canonicalizer for the provided method.
    pub fn new(method: C14nMethod) -> Self {
        Self { method }
    }

    /// Creates a canonicalizer for the method registered under `uri`.
    pub fn for_uri(uri: &str) -> Result<Self, CanonicalizationError> {
        C14nMethod::for_uri(uri)
            .map(Self::new)
            .map_err(|_| CanonicalizationError::UnsupportedAlgorithm(uri.to_string()))
    }

    /// Method this canonicalizer applies.
    pub fn method(&self) -> C14nMethod {
        self.method
    }

    /// Produces canonical bytes + report.
    ///
    /// [`C14nMethod::None`] returns the input unchanged without parsing it.
    /// Every other method requires well-formed XML.
    pub fn canonicalize(&self, input: &[u8]) -> Result<CanonicalizationResult, CanonicalizationError> {
        if !self.method.is_transform() {
            let mut report = TransformReport::new(self.method);
            report.add("output_bytes", input.len() as u64);
            return Ok(CanonicalizationResult {
                bytes: input.to_vec(),
                report,
            });
        }

        let text = xml::decode(input)?;
        let doc = xml::parse(&text)?;
        let decls = AttributeDecls::from_document(&text);

        let mut ctx = C14nContext::new(&doc, &decls, self.method);
        ctx.process_document();
        let C14nContext {
            output, mut report, ..
        } = ctx;

        let bytes = output.into_bytes();
        report.add("output_bytes", bytes.len() as u64);
        tracing::debug!(
            method = self.method.name(),
            input_bytes = input.len(),
            output_bytes = bytes.len(),
            "canonicalized document"
        );
        Ok(CanonicalizationResult { bytes, report })
    }
}

/// Where a document-level node sits relative to the document element.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Placement {
    BeforeRoot,
    AfterRoot,
    NoRoot,
}

struct C14nContext<'a, 'input> {
    doc: &'a Document<'input>,
    decls: &'a AttributeDecls,
    method: C14nMethod,
    output: String,
    report: TransformReport,
    /// Bindings rendered by each open output element.
    rendered: Vec<NsScope>,
}

impl<'a, 'input> C14nContext<'a, 'input> {
    fn new(doc: &'a Document<'input>, decls: &'a AttributeDecls, method: C14nMethod) -> Self {
        Self {
            doc,
            decls,
            method,
            output: String::new(),
            report: TransformReport::new(method),
            rendered: vec![NsScope::new()],
        }
    }

    fn process_document(&mut self) {
        let children: Vec<Node<'a, 'input>> = self.doc.root().children().collect();
        let root_index = children.iter().position(|n| n.is_element());

        for (i, child) in children.into_iter().enumerate() {
            let placement = match root_index {
                Some(root) if i < root => Placement::BeforeRoot,
                Some(root) if i > root => Placement::AfterRoot,
                _ => Placement::NoRoot,
            };
            match child.node_type() {
                NodeType::Element => self.process_element(child),
                NodeType::Comment if !self.method.with_comments() => {
                    self.report.add("comments_dropped", 1);
                }
                NodeType::Comment | NodeType::PI => {
                    if placement == Placement::AfterRoot {
                        self.output.push('\n');
                    }
                    self.process_node(child);
                    if placement == Placement::BeforeRoot {
                        self.output.push('\n');
                    }
                }
                // Whitespace between top-level nodes is not part of the output.
                NodeType::Text | NodeType::Root => {}
            }
        }
    }

    fn process_node(&mut self, node: Node<'a, 'input>) {
        match node.node_type() {
            NodeType::Element => self.process_element(node),
            NodeType::Text => write_c14n_text(&mut self.output, node.text().unwrap_or_default()),
            NodeType::Comment => {
                if self.method.with_comments() {
                    write_c14n_comment(&mut self.output, node.text().unwrap_or_default());
                } else {
                    self.report.add("comments_dropped", 1);
                }
            }
            NodeType::PI => {
                if let Some(pi) = node.pi() {
                    write_c14n_pi(&mut self.output, pi.target, pi.value);
                }
            }
            NodeType::Root => {}
        }
    }

    fn process_element(&mut self, node: Node<'a, 'input>) {
        self.report.add("elements", 1);

        let qname = self.element_qname(node);
        let prefix = qname.split_once(':').map(|(p, _)| p).unwrap_or("");
        let scope = in_scope_namespaces(node);
        let attributes = self.output_attributes(node, &qname);
        let declarations = if self.method.is_exclusive() {
            self.exclusive_declarations(prefix, &attributes, &scope)
        } else {
            self.inclusive_declarations(&scope)
        };

        self.output.push('<');
        self.output.push_str(&qname);
        self.write_ns_declarations(&declarations);
        self.write_sorted_attributes(attributes);
        self.output.push('>');

        for child in node.children() {
            self.process_node(child);
        }

        self.output.push_str("</");
        self.output.push_str(&qname);
        self.output.push('>');

        self.rendered.pop();
    }

    /// Qualified name as written in the source, so the original prefix survives.
    fn element_qname(&self, node: Node<'a, 'input>) -> String {
        let local = node.tag_name().name();
        let written = self
            .doc
            .input_text()
            .get(node.range())
            .and_then(|source| source.strip_prefix('<'))
            .map(|rest| {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
                    .unwrap_or(rest.len());
                &rest[..end]
            });
        if let Some(qname) = written {
            if qname == local || qname.ends_with(&format!(":{local}")) {
                return qname.to_string();
            }
        }

        let uri = match node.tag_name().namespace() {
            Some(uri) => uri,
            None => return local.to_string(),
        };
        let default_matches = node
            .namespaces()
            .any(|ns| ns.name().is_none() && ns.uri() == uri);
        match attribute_prefix(node, uri) {
            Some(prefix) if !default_matches => format!("{prefix}:{local}"),
            _ => local.to_string(),
        }
    }

    /// Inclusive rule: every in-scope binding the parent has not already rendered.
    fn inclusive_declarations(&mut self, scope: &NsScope) -> Vec<(String, String)> {
        let parent = self.rendered.last().cloned().unwrap_or_default();

        let mut declarations: Vec<(String, String)> = scope
            .iter()
            .filter(|(prefix, uri)| parent.get(prefix.as_str()) != Some(*uri))
            .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
            .collect();

        if !scope.contains_key("") && parent.get("").is_some_and(|uri| !uri.is_empty()) {
            declarations.push((String::new(), String::new()));
        }
        declarations.sort();

        self.rendered.push(scope.clone());
        declarations
    }

    /// Qualified attribute name as written, falling back to a bound prefix.
    fn attribute_qname(&self, node: Node<'a, 'input>, attr: &Attribute<'a, 'input>) -> String {
        let local = attr.name();
        if let Some(written) = self.doc.input_text().get(attr.range_qname()) {
            let matches_local = written == local
                || written
                    .strip_suffix(local)
                    .is_some_and(|prefix| prefix.len() > 1 && prefix.ends_with(':'));
            if matches_local {
                return written.to_string();
            }
        }
        match attr.namespace().and_then(|uri| attribute_prefix(node, uri)) {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.to_string(),
        }
    }

    /// Specified attributes plus DTD defaults, with non-CDATA values collapsed.
    fn output_attributes(&mut self, node: Node<'a, 'input>, element: &str) -> Vec<OutputAttribute> {
        let mut attributes: Vec<OutputAttribute> = node
            .attributes()
            .map(|attr| {
                let qname = self.attribute_qname(node, &attr);
                let value = match self.decls.find(element, &qname) {
                    Some(decl) if decl.tokenized => collapse_spaces(attr.value()),
                    _ => attr.value().to_string(),
                };
                OutputAttribute {
                    uri: attr.namespace().unwrap_or_default().to_string(),
                    local: attr.name().to_string(),
                    qname,
                    value,
                }
            })
            .collect();

        let mut defaulted = 0;
        for decl in self.decls.for_element(element) {
            let Some(value) = &decl.default else {
                continue;
            };
            if decl.name == "xmlns"
                || decl.name.starts_with("xmlns:")
                || attributes.iter().any(|a| a.qname == decl.name)
            {
                continue;
            }
            let (uri, local) = match decl.name.split_once(':') {
                Some(("xml", local)) => (XML_NAMESPACE, local),
                Some((prefix, local)) => match node.lookup_namespace_uri(Some(prefix)) {
                    Some(uri) => (uri, local),
                    None => continue,
                },
                None => ("", decl.name.as_str()),
            };
            attributes.push(OutputAttribute {
                uri: uri.to_string(),
                local: local.to_string(),
                qname: decl.name.clone(),
                value: value.clone(),
            });
            defaulted += 1;
        }
        if defaulted > 0 {
            self.report.add("attributes_defaulted", defaulted);
        }
        attributes
    }

    /// Exclusive rule: only prefixes visibly used by the element or its attributes.
    fn exclusive_declarations(
        &mut self,
        element_prefix: &str,
        attributes: &[OutputAttribute],
        scope: &NsScope,
    ) -> Vec<(String, String)> {
        let parent = self.rendered.last().cloned().unwrap_or_default();

        let mut utilized = BTreeSet::new();
        utilized.insert(element_prefix.to_string());
        for prefix in attributes.iter().filter_map(OutputAttribute::prefix) {
            if prefix != "xml" {
                utilized.insert(prefix.to_string());
            }
        }

        let mut rendered = parent.clone();
        let mut declarations = Vec::new();
        for prefix in utilized {
            match scope.get(&prefix) {
                Some(uri) => {
                    if parent.get(&prefix) != Some(uri) {
                        declarations.push((prefix.clone(), uri.clone()));
                        rendered.insert(prefix, uri.clone());
                    }
                }
                None => {
                    if prefix.is_empty() && parent.get("").is_some_and(|uri| !uri.is_empty()) {
                        declarations.push((String::new(), String::new()));
                        rendered.insert(String::new(), String::new());
                    }
                }
            }
        }

        self.rendered.push(rendered);
        declarations
    }

    fn write_ns_declarations(&mut self, declarations: &[(String, String)]) {
        for (prefix, uri) in declarations {
            if prefix.is_empty() {
                self.output.push_str(" xmlns=\"");
            } else {
                self.output.push_str(" xmlns:");
                self.output.push_str(prefix);
                self.output.push_str("=\"");
            }
            write_c14n_attr_value(&mut self.output, uri);
            self.output.push('"');
        }
        self.report.add("namespace_declarations", declarations.len() as u64);
    }

    /// Attributes ordered by namespace URI (none first), then local name.
    fn write_sorted_attributes(&mut self, mut attributes: Vec<OutputAttribute>) {
        attributes.sort_by(|a, b| a.uri.cmp(&b.uri).then_with(|| a.local.cmp(&b.local)));

        for attr in &attributes {
            self.output.push(' ');
            self.output.push_str(&attr.qname);
            self.output.push_str("=\"");
            write_c14n_attr_value(&mut self.output, &attr.value);
            self.output.push('"');
        }
        self.report.add("attributes", attributes.len() as u64);
    }
}

/// In-scope bindings of an element, without the implicit `xml` prefix.
fn in_scope_namespaces(node: Node<'_, '_>) -> NsScope {
    let mut scope = NsScope::new();
    for ns in node.namespaces() {
        let prefix = ns.name().unwrap_or_default();
        if prefix == "xml" || (prefix.is_empty() && ns.uri().is_empty()) {
            continue;
        }
        scope
            .entry(prefix.to_string())
            .or_insert_with(|| ns.uri().to_string());
    }
    scope
}

/// Non-default prefix bound to `uri` at `node`, used when the source text
/// does not show the name as written.
fn attribute_prefix(node: Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    node.namespaces()
        .find(|ns| ns.name().is_some() && ns.uri() == uri)
        .and_then(|ns| ns.name())
        .map(str::to_string)
}

fn write_c14n_pi(out: &mut String, target: &str, data: Option<&str>) {
    out.push_str("<?");
    out.push_str(target);
    if let Some(data) = data.filter(|d| !d.is_empty()) {
        out.push(' ');
        out.push_str(data);
    }
    out.push_str("?>");
}

fn write_c14n_comment(out: &mut String, content: &str) {
    out.push_str("<!--");
    out.push_str(content);
    out.push_str("-->");
}

fn write_c14n_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
}

fn write_c14n_attr_value(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
}
